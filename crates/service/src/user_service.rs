use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::ServiceError;
use common::pagination::Pagination;
use models::user;

/// Create a new user. Fails with a conflict when the email is already
/// taken, compared case-insensitively.
pub async fn create_user(db: &DatabaseConnection, name: &str, email: &str) -> Result<user::Model, ServiceError> {
    user::validate_email(email)?;
    user::validate_name(name)?;
    if user::find_by_email_ci(db, email).await?.is_some() {
        return Err(ServiceError::conflict("email already in use"));
    }
    let created = user::create(db, name, email).await?;
    Ok(created)
}

/// Get a user by id.
pub async fn get_user(db: &DatabaseConnection, id: Uuid) -> Result<Option<user::Model>, ServiceError> {
    let found = user::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Look a user up by display name.
pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<user::Model>, ServiceError> {
    use sea_orm::{ColumnTrait, QueryFilter};
    let found = user::Entity::find()
        .filter(user::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Look a user up by email, case-insensitively.
pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<user::Model>, ServiceError> {
    let found = user::find_by_email_ci(db, email).await?;
    Ok(found)
}

/// Apply a partial update. Only the provided fields change; changing the
/// email re-checks uniqueness excluding the user's own row.
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<user::Model, ServiceError> {
    let found = user::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let mut am: user::ActiveModel = found.clone().into();
    let mut dirty = false;
    if let Some(n) = name {
        user::validate_name(n)?;
        am.name = Set(n.to_string());
        dirty = true;
    }
    if let Some(e) = email {
        user::validate_email(e)?;
        if let Some(existing) = user::find_by_email_ci(db, e).await? {
            if existing.id != id {
                return Err(ServiceError::conflict("email already in use"));
            }
        }
        am.email = Set(e.to_string());
        dirty = true;
    }
    if !dirty {
        return Ok(found);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a user; returns whether a row existed.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = user::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// List users with pagination.
pub async fn list_users_paginated(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<user::Model>, ServiceError> {
    use sea_orm::PaginatorTrait;
    let (page_idx, per_page) = opts.normalize();
    let users = user::Entity::find()
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(users)
}
