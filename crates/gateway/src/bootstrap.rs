use std::env;
use std::net::SocketAddr;

use axum::{routing::get, Json, Router};
use tracing::{info, warn};

use common::types::Health;
use common::utils::logging::init_logging_json;

use crate::config::GatewayConfig;
use crate::observability;
use crate::proxy::{self, GatewayState};

fn init_tracing() {
    init_logging_json();
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the gateway router: health and metrics locally, everything
/// else goes through the forwarding fallback.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .fallback(proxy::forward)
        .with_state(state)
}

/// Public entry: load configuration, assemble state, and serve.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let path = env::var("GATEWAY_CONFIG").unwrap_or_else(|_| "gateway.json".to_string());
    let mut config = GatewayConfig::load_from_file(&path).unwrap_or_else(|e| {
        warn!(%path, error = %e, "failed to load gateway config; using defaults");
        GatewayConfig::default()
    });
    if let Ok(secret) = env::var("JWT_SECRET") {
        config.session.jwt_secret = secret;
    }
    info!(routes = config.routes.len(), "loaded gateway configuration");

    let addr: SocketAddr = format!("{}:{}", config.listen.host, config.listen.port).parse()?;
    let state = GatewayState::new(config);
    let app = build_router(state);

    info!(%addr, "gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
