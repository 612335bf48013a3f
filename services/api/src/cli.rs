use crate::report::{run_classify_foreign, run_report, ClassifyForeignArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use landing_compliance::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Landing Compliance",
    about = "Validate export certificate landings against catch data from the command line",
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
    /// Build the landing validation report for a CSV or JSON export
    Report(ReportArgs),
    /// Classify a batch of storage or processing document rows against their foreign certificates
    ClassifyForeign(ClassifyForeignArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON snapshot of vessel, species and exporter base risk scores
    #[arg(long)]
    pub(crate) risk_scores: Option<PathBuf>,
    /// JSON list of vessel licences used for enrichment
    #[arg(long)]
    pub(crate) licences: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::ClassifyForeign(args) => run_classify_foreign(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["landing-compliance"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_accepts_reference_data_paths() {
        let cli = Cli::try_parse_from([
            "landing-compliance",
            "report",
            "--input",
            "landings.csv",
            "--risk-scores",
            "scores.json",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.input, PathBuf::from("landings.csv"));
                assert_eq!(args.risk_scores, Some(PathBuf::from("scores.json")));
                assert!(args.licences.is_none());
                assert!(args.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn report_requires_an_input() {
        assert!(Cli::try_parse_from(["landing-compliance", "report"]).is_err());
    }

    #[test]
    fn classify_foreign_uses_kebab_case() {
        let cli = Cli::try_parse_from([
            "landing-compliance",
            "classify-foreign",
            "--input",
            "rows.json",
        ])
        .expect("parses");
        assert!(matches!(cli.command, Some(Command::ClassifyForeign(_))));
    }
}
