mod cli;
mod infra;
mod plan;
mod routes;
mod server;

use workforce_planning::error::AppError;

pub use routes::planner_router;
pub use infra::AppState;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
