use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use service::order_service;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    pub order_number: Option<String>,
    pub user_id: Option<Uuid>,
    pub sku: Option<String>,
    pub quantity: Option<i32>,
    pub price_at_order: Option<f64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list).post(create))
        .route("/api/orders/:id", get(get_by_id))
        .route("/api/orders/number/:order_number", get(get_by_number))
}

#[utoipa::path(
    get, path = "/api/orders", tag = "orders",
    responses(
        (status = 200, description = "Order listing"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::order::Model>>, JsonApiError> {
    let rows = order_service::list_orders(&state.db)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/orders/{id}", tag = "orders",
    params(("id" = Uuid, Path, description = "Order id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::order::Model>, JsonApiError> {
    match order_service::get_order(&state.db, id).await {
        Ok(Some(o)) => Ok(Json(o)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    get, path = "/api/orders/number/{order_number}", tag = "orders",
    params(("order_number" = String, Path, description = "Order number")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(order_number): Path<String>,
) -> Result<Json<models::order::Model>, JsonApiError> {
    match order_service::find_by_order_number(&state.db, &order_number).await {
        Ok(Some(o)) => Ok(Json(o)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    post, path = "/api/orders", tag = "orders",
    request_body = crate::openapi::CreateOrderRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Order number already exists")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOrderInput>,
) -> Result<(StatusCode, Json<models::order::Model>), JsonApiError> {
    let order_number = input
        .order_number
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("order_number is required"))?;
    let user_id = input
        .user_id
        .ok_or_else(|| JsonApiError::bad_request("user_id is required"))?;
    let sku = input
        .sku
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("sku is required"))?;
    let quantity = input
        .quantity
        .ok_or_else(|| JsonApiError::bad_request("quantity is required"))?;
    let price_at_order = input
        .price_at_order
        .ok_or_else(|| JsonApiError::bad_request("price_at_order is required"))?;
    let created = order_service::create_order(&state.db, order_number, user_id, sku, quantity, price_at_order)
        .await
        .map_err(JsonApiError::from_service)?;
    info!(order_number = %created.order_number, "created order");
    Ok((StatusCode::CREATED, Json(created)))
}
