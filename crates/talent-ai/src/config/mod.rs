use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::recruiting::JobWeights;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub recruiting: RecruitingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let recruiting = RecruitingConfig::from_env(environment)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            recruiting,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub const DEFAULT_ASSESSMENT_BUDGET_SECS: u32 = 180;
pub const DEFAULT_ASSESSMENT_RETENTION_SECS: u64 = 30 * 60;

/// Recruiting workflow knobs: assessment budget, default weights, mock latency.
#[derive(Debug, Clone, PartialEq)]
pub struct RecruitingConfig {
    pub assessment_budget_secs: u32,
    pub tick_period: Duration,
    /// How long an unstarted or expired assessment stays open after it was opened.
    pub assessment_retention: Duration,
    pub default_weights: JobWeights,
    pub simulated_latency: bool,
}

impl Default for RecruitingConfig {
    fn default() -> Self {
        Self {
            assessment_budget_secs: DEFAULT_ASSESSMENT_BUDGET_SECS,
            tick_period: Duration::from_secs(1),
            assessment_retention: Duration::from_secs(DEFAULT_ASSESSMENT_RETENTION_SECS),
            default_weights: JobWeights::default(),
            simulated_latency: true,
        }
    }
}

impl RecruitingConfig {
    fn from_env(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let assessment_budget_secs = match env::var("ASSESSMENT_BUDGET_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidAssessmentBudget)?,
            Err(_) => defaults.assessment_budget_secs,
        };

        let assessment_retention = match env::var("ASSESSMENT_RETENTION_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidAssessmentRetention)?,
            Err(_) => defaults.assessment_retention,
        };

        let resume = weight_from_env("DEFAULT_RESUME_WEIGHT", defaults.default_weights.resume)?;
        let behaviour = weight_from_env(
            "DEFAULT_BEHAVIOUR_WEIGHT",
            defaults.default_weights.behaviour,
        )?;
        let default_weights = JobWeights { resume, behaviour };
        if default_weights.total() == 0 {
            return Err(ConfigError::ZeroDefaultWeights);
        }

        let simulated_latency = match env::var("SIMULATED_LATENCY") {
            Ok(raw) => matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Err(_) => environment != AppEnvironment::Test,
        };

        Ok(Self {
            assessment_budget_secs,
            tick_period: defaults.tick_period,
            assessment_retention,
            default_weights,
            simulated_latency,
        })
    }
}

fn weight_from_env(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidWeight { key }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAssessmentBudget,
    InvalidAssessmentRetention,
    InvalidWeight { key: &'static str },
    ZeroDefaultWeights,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAssessmentBudget => {
                write!(f, "ASSESSMENT_BUDGET_SECS must be a positive integer")
            }
            ConfigError::InvalidAssessmentRetention => {
                write!(f, "ASSESSMENT_RETENTION_SECS must be a positive integer")
            }
            ConfigError::InvalidWeight { key } => {
                write!(f, "{key} must be a non-negative integer")
            }
            ConfigError::ZeroDefaultWeights => write!(
                f,
                "DEFAULT_RESUME_WEIGHT and DEFAULT_BEHAVIOUR_WEIGHT cannot both be zero"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAssessmentBudget
            | ConfigError::InvalidAssessmentRetention
            | ConfigError::InvalidWeight { .. }
            | ConfigError::ZeroDefaultWeights => None,
        }
    }
}
