use crate::demo::{run_demo, run_results_report, DemoArgs, ResultsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use govsurvey::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Governance Survey Service",
    about = "Run the governance survey reporting service from the command line",
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
    /// Print a results analysis for one survey from a submissions file
    Report(ResultsReportArgs),
    /// Run an end-to-end CLI demo over seeded sample submissions
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
        Command::Report(args) => run_results_report(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
