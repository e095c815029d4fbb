use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use common::pagination::Pagination;
use service::user_service;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

// Fields are optional so that missing input surfaces as a 400 with a
// message, not a framework-level deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list).post(create))
        .route("/api/users/:id", get(get_by_id).patch(update).delete(remove))
        .route("/api/users/name/:name", get(get_by_name))
}

#[utoipa::path(
    get, path = "/api/users", tag = "users",
    params(ListQuery),
    responses(
        (status = 200, description = "Paginated user listing"),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::user::Model>>, JsonApiError> {
    let opts = Pagination {
        page: q.page.unwrap_or(1),
        per_page: q.per_page.unwrap_or(20),
    };
    let users = user_service::list_users_paginated(&state.db, opts)
        .await
        .map_err(JsonApiError::from_service)?;
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/api/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    match user_service::get_user(&state.db, id).await {
        Ok(Some(u)) => Ok(Json(u)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    get, path = "/api/users/name/{name}", tag = "users",
    params(("name" = String, Path, description = "Display name")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    match user_service::find_by_name(&state.db, &name).await {
        Ok(Some(u)) => Ok(Json(u)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}

#[utoipa::path(
    post, path = "/api/users", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> Result<(StatusCode, Json<models::user::Model>), JsonApiError> {
    let name = input
        .name
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("name is required"))?;
    let email = input
        .email
        .as_deref()
        .ok_or_else(|| JsonApiError::bad_request("email is required"))?;
    let created = user_service::create_user(&state.db, name, email)
        .await
        .map_err(JsonApiError::from_service)?;
    info!(user_id = %created.id, "created user");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    patch, path = "/api/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserRequest,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateUserInput>,
) -> Result<Json<models::user::Model>, JsonApiError> {
    let updated = user_service::update_user(&state.db, id, input.name.as_deref(), input.email.as_deref())
        .await
        .map_err(JsonApiError::from_service)?;
    info!(user_id = %updated.id, "updated user");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    match user_service::delete_user(&state.db, id).await {
        Ok(true) => {
            info!(user_id = %id, "deleted user");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", None)),
        Err(e) => Err(JsonApiError::from_service(e)),
    }
}
