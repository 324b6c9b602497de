use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent AI",
    about = "Run or demonstrate the recruiting service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk through a full hiring round against the sample postings
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_and_demo_parses_flags() {
        let cli = Cli::try_parse_from(["talent-ai-api"]).expect("parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from([
            "talent-ai-api",
            "demo",
            "--tick-millis",
            "2",
            "--deadline",
            "2026-05-01",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.tick_millis, 2);
                assert!(args.deadline.is_some());
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn serve_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["talent-ai-api", "serve", "--port", "http"]).is_err());
    }
}
