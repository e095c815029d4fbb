use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env first so RUST_LOG from the environment file applies
    dotenv().ok();
    common::utils::logging::init_logging_json();
    info!(service = "gateway", event = "logger_init", "tracing subscriber initialized");
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let version = env!("CARGO_PKG_VERSION");
    info!(service = "gateway", event = "start", %service_id, version, "gateway starting");

    match gateway::bootstrap::run().await {
        Ok(()) => {
            info!(service = "gateway", event = "stop", %service_id, "gateway stopped");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "gateway", event = "run_failed", %service_id, error = %e, "gateway failed");
            std::process::ExitCode::FAILURE
        }
    }
}
