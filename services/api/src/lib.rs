mod cli;
mod infra;
mod list;
mod routes;
mod server;

use permit_list::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
