use crate::commands::{run_facilities, run_symptoms, run_triage, FacilitiesArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use health_triage::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Health Triage",
    about = "Score symptom urgency and recommend nearby health facilities",
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
    /// Run a single triage from the command line and print the recommendations
    Triage(TriageArgs),
    /// List the symptoms the classifier recognizes
    Symptoms,
    /// List active facilities in the catalog
    Facilities(FacilitiesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load facilities from a CSV export instead of the seeded catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Triage(args) => run_triage(args),
        Command::Symptoms => run_symptoms(),
        Command::Facilities(args) => run_facilities(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["health-triage"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_repeated_symptoms_and_location() {
        let cli = Cli::try_parse_from([
            "health-triage",
            "triage",
            "--symptom",
            "fever",
            "--symptom",
            "cough",
            "--lat",
            "9.01",
            "--lng",
            "38.76",
        ])
        .expect("parse");

        match cli.command {
            Some(Command::Triage(args)) => {
                assert_eq!(args.symptoms, vec!["fever", "cough"]);
                assert_eq!(args.lat, Some(9.01));
                assert_eq!(args.lng, Some(38.76));
            }
            other => panic!("expected triage command, got {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_catalog_override() {
        let cli = Cli::try_parse_from([
            "health-triage",
            "serve",
            "--port",
            "8080",
            "--catalog",
            "facilities.csv",
        ])
        .expect("parse");

        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.catalog, Some(PathBuf::from("facilities.csv")));
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }
}
