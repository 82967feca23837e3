mod cli;
mod demo;
mod infra;
mod mock;
mod routes;
mod server;

use compliance_tracker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
