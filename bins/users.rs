use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

use server::ServiceKind;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "user-backend", event = "logger_init", "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "user-backend", event = "start", %service_id, version, "service starting");

    match server::run(ServiceKind::Users).await {
        Ok(()) => {
            info!(service = "user-backend", event = "stop", %service_id, "service stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "user-backend", event = "run_failed", %service_id, error = %e, "service failed");
            std::process::ExitCode::FAILURE
        }
    }
}
