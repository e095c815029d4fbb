use sea_orm::DatabaseConnection;

/// Per-backend state, wired explicitly at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}
