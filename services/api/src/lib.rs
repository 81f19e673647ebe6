mod cli;
mod infra;
mod report;
mod routes;
mod server;

use patent_fees::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
