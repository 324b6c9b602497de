use crate::cli::ServeArgs;
use crate::infra::{simulated_collaborators, AppState, InMemoryRecruitingRepository, Latency};
use crate::routes::with_recruiting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_ai::config::AppConfig;
use talent_ai::error::AppError;
use talent_ai::telemetry;
use talent_ai::workflows::recruiting::RecruitingService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let latency = Latency::new(config.recruiting.simulated_latency);
    let repository = Arc::new(InMemoryRecruitingRepository::seeded(latency));
    let recruiting_service = Arc::new(RecruitingService::new(
        repository,
        simulated_collaborators(latency),
        config.recruiting.clone(),
    ));

    let app = with_recruiting_routes(recruiting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        assessment_budget_secs = config.recruiting.assessment_budget_secs,
        "recruiting service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
