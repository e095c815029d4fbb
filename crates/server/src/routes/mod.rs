use axum::Json;
use utoipa::OpenApi as _;

use common::types::Health;

pub mod inventory;
pub mod orders;
pub mod products;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// OpenAPI document for the backend's combined surface.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::ApiDoc::openapi())
}
