mod cli;
mod infra;
mod predict;
mod routes;
mod server;

use accident_severity::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
