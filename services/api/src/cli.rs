use crate::report::{run_review, run_score, ReviewArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use melma_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "MELMA-W Clinical Audit Service",
    about = "Audit language-model answers to clinical scenarios against the MELMA-W rubric",
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
    /// Run audits from the command line
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Score a saved judge response without touching the network
    Score(ScoreArgs),
    /// Fetch a fresh judgement from the configured judge model, then score it
    Review(ReviewArgs),
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
        Command::Audit {
            command: AuditCommand::Score(args),
        } => run_score(args),
        Command::Audit {
            command: AuditCommand::Review(args),
        } => run_review(args).await,
    }
}
