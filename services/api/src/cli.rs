use crate::demo::{run_demo, run_seniority_list, DemoArgs, SeniorityListArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hire_rotation::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hired Equipment Rotation Service",
    about = "Run the hired equipment seniority list service from the command line",
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
    /// Work with seniority lists for an equipment cohort
    Seniority {
        #[command(subcommand)]
        command: SeniorityCommand,
    },
    /// Run an end-to-end CLI demo over a sample fleet
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum SeniorityCommand {
    /// Recalculate a cohort and print its seniority list
    List(SeniorityListArgs),
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
        Command::Seniority {
            command: SeniorityCommand::List(args),
        } => run_seniority_list(args),
        Command::Demo(args) => run_demo(args),
    }
}
