mod cli;
mod infra;
mod report;
mod routes;
mod server;

use melma_audit::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
