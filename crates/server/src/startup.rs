use std::{env, net::SocketAddr};

use axum::{routing::get, Router};
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::{info, Level};

use common::utils::logging::init_logging_default;

use crate::routes;
use crate::state::AppState;

/// Which backend this process serves. Each runs as its own binary with
/// its own bind address; wiring is explicit, no container involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    Users,
    Products,
    Inventory,
    Orders,
}

impl ServiceKind {
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Users => "user-backend",
            ServiceKind::Products => "product-service",
            ServiceKind::Inventory => "inventory-service",
            ServiceKind::Orders => "order-service",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Users => 8081,
            ServiceKind::Products => 8082,
            ServiceKind::Inventory => 8083,
            ServiceKind::Orders => 8084,
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the backend router: health, OpenAPI document, and the entity
/// routes for the selected service.
pub fn build_router(kind: ServiceKind, state: AppState) -> Router {
    let api = match kind {
        ServiceKind::Users => routes::users::router(),
        ServiceKind::Products => routes::products::router(),
        ServiceKind::Inventory => routes::inventory::router(),
        ServiceKind::Orders => routes::orders::router(),
    };

    Router::new()
        .route("/health", get(routes::health))
        .route("/api-docs/openapi.json", get(routes::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(build_cors())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Load host/port from configs or env vars, with per-service fallbacks.
fn load_bind_addr(kind: ServiceKind) -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or_else(|| kind.default_port());
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: connect the store, build the app, and run the HTTP
/// server for one backend.
pub async fn run(kind: ServiceKind) -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let db = models::db::connect().await?;
    let state = AppState { db };
    let app = build_router(kind, state);

    let addr = load_bind_addr(kind)?;
    info!(%addr, service = kind.name(), "starting backend service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
