use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use service::inventory_service;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddInventoryInput {
    pub sku: Option<String>,
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct StockLevel {
    pub sku: String,
    pub quantity: i32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/inventory", get(list).post(create))
        .route("/api/inventory/:sku", get(in_stock))
        .route("/api/inventory/quantity/:sku", get(quantity))
}

#[utoipa::path(
    get, path = "/api/inventory", tag = "inventory",
    responses(
        (status = 200, description = "Inventory listing"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::inventory::Model>>, JsonApiError> {
    let rows = inventory_service::list_inventory(&state.db)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/inventory/{sku}", tag = "inventory",
    params(("sku" = String, Path, description = "Stock sku")),
    responses((status = 200, description = "In-stock flag; false for unknown skus"))
)]
pub async fn in_stock(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<bool>, JsonApiError> {
    let flag = inventory_service::is_in_stock(&state.db, &sku)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(flag))
}

#[utoipa::path(
    get, path = "/api/inventory/quantity/{sku}", tag = "inventory",
    params(("sku" = String, Path, description = "Stock sku")),
    responses((status = 200, description = "Stored quantity; 0 for unknown skus"))
)]
pub async fn quantity(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<StockLevel>, JsonApiError> {
    let quantity = inventory_service::stock_quantity(&state.db, &sku)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(StockLevel { sku, quantity }))
}

#[utoipa::path(
    post, path = "/api/inventory", tag = "inventory",
    request_body = crate::openapi::AddInventoryRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 500, description = "Duplicate sku rejected by the store")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AddInventoryInput>,
) -> Result<(StatusCode, Json<models::inventory::Model>), JsonApiError> {
    let sku = input
        .sku
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("sku is required"))?;
    let quantity = input
        .quantity
        .ok_or_else(|| JsonApiError::bad_request("quantity is required"))?;
    let created = inventory_service::add_inventory(&state.db, sku, quantity)
        .await
        .map_err(JsonApiError::from_service)?;
    info!(sku = %created.sku, quantity = created.quantity, "created inventory record");
    Ok((StatusCode::CREATED, Json(created)))
}
