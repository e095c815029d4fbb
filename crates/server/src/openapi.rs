use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct CreateUserRequest { pub name: String, pub email: String }

#[derive(utoipa::ToSchema)]
pub struct UpdateUserRequest { pub name: Option<String>, pub email: Option<String> }

#[derive(utoipa::ToSchema)]
pub struct CreateProductRequest { pub sku: String, pub name: String, pub price: f64 }

#[derive(utoipa::ToSchema)]
pub struct UpdateProductRequest { pub name: Option<String>, pub price: Option<f64> }

#[derive(utoipa::ToSchema)]
pub struct AddInventoryRequest { pub sku: String, pub quantity: i32 }

#[derive(utoipa::ToSchema)]
pub struct CreateOrderRequest {
    pub order_number: String,
    pub user_id: Uuid,
    pub sku: String,
    pub quantity: i32,
    pub price_at_order: f64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::list,
        crate::routes::users::get_by_id,
        crate::routes::users::get_by_name,
        crate::routes::users::create,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::products::list,
        crate::routes::products::get_by_id,
        crate::routes::products::get_by_sku,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::remove,
        crate::routes::inventory::list,
        crate::routes::inventory::in_stock,
        crate::routes::inventory::quantity,
        crate::routes::inventory::create,
        crate::routes::orders::list,
        crate::routes::orders::get_by_id,
        crate::routes::orders::get_by_number,
        crate::routes::orders::create,
    ),
    components(
        schemas(
            HealthResponse,
            CreateUserRequest,
            UpdateUserRequest,
            CreateProductRequest,
            UpdateProductRequest,
            AddInventoryRequest,
            CreateOrderRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "products"),
        (name = "inventory"),
        (name = "orders")
    )
)]
pub struct ApiDoc;
