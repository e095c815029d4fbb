use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use service::product_service;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list).post(create))
        .route("/api/products/:id", get(get_by_id).patch(update).delete(remove))
        .route("/api/products/sku/:sku", get(get_by_sku))
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    responses(
        (status = 200, description = "Product listing"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<models::product::Model>>, JsonApiError> {
    let rows = product_service::list_products(&state.db)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::product::Model>, JsonApiError> {
    match product_service::get_product(&state.db, id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    get, path = "/api/products/sku/{sku}", tag = "products",
    params(("sku" = String, Path, description = "Product sku")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<models::product::Model>, JsonApiError> {
    match product_service::find_by_sku(&state.db, &sku).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    post, path = "/api/products", tag = "products",
    request_body = crate::openapi::CreateProductRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> Result<(StatusCode, Json<models::product::Model>), JsonApiError> {
    let sku = input
        .sku
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("sku is required"))?;
    let name = input
        .name
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("name is required"))?;
    let price = input
        .price
        .ok_or_else(|| JsonApiError::bad_request("price is required"))?;
    let created = product_service::create_product(&state.db, sku, name, price)
        .await
        .map_err(JsonApiError::from_service)?;
    info!(product_id = %created.id, sku = %created.sku, "created product");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = crate::openapi::UpdateProductRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> Result<Json<models::product::Model>, JsonApiError> {
    let updated = product_service::update_product(&state.db, id, input.name.as_deref(), input.price)
        .await
        .map_err(JsonApiError::from_service)?;
    info!(product_id = %updated.id, "updated product");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/products/{id}", tag = "products",
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match product_service::delete_product(&state.db, id).await {
        Ok(true) => {
            info!(product_id = %id, "deleted product");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}
