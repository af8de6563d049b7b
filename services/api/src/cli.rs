use crate::predict::{run_prediction, PredictArgs};
use crate::server;
use accident_severity::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Road Accident Severity Prediction",
    about = "Predict road accident severity from driving and environmental conditions",
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
    /// Predict the severity for one set of driving conditions
    Predict(PredictArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured model artifact path
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_prediction(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["accident-severity-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn predict_accepts_condition_flags() {
        let cli = Cli::try_parse_from([
            "accident-severity-api",
            "predict",
            "--day",
            "Friday",
            "--hour",
            "23",
            "--weather",
            "Snow",
            "--speed-limit",
            "90",
            "--area",
            "Rural",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Predict(args)) => {
                assert_eq!(args.day.as_deref(), Some("Friday"));
                assert_eq!(args.hour, Some(23));
                assert_eq!(args.speed_limit, Some(90));
                assert!(args.json);
            }
            other => panic!("expected predict command, got {other:?}"),
        }
    }
}
