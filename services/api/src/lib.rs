mod cli;
mod demo;
mod infra;
mod routes;
mod samples;
mod server;

use cv_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
