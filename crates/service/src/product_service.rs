use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::errors::ServiceError;
use models::product;

/// List every product. No pagination contract here.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let rows = product::Entity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Get a product by id.
pub async fn get_product(db: &DatabaseConnection, id: Uuid) -> Result<Option<product::Model>, ServiceError> {
    let found = product::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Natural-key lookup by sku.
pub async fn find_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<product::Model>, ServiceError> {
    let found = product::find_by_sku(db, sku).await?;
    Ok(found)
}

/// Create a product. Price carries no sign constraint.
pub async fn create_product(db: &DatabaseConnection, sku: &str, name: &str, price: f64) -> Result<product::Model, ServiceError> {
    let created = product::create(db, sku, name, price).await?;
    Ok(created)
}

/// Apply a partial update to name and/or price.
pub async fn update_product(
    db: &DatabaseConnection,
    id: Uuid,
    name: Option<&str>,
    price: Option<f64>,
) -> Result<product::Model, ServiceError> {
    let mut am: product::ActiveModel = product::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("product"))?
        .into();
    if let Some(n) = name {
        if n.trim().is_empty() {
            return Err(ServiceError::Validation("name required".into()));
        }
        am.name = Set(n.to_string());
    }
    if let Some(p) = price {
        am.price = Set(p);
    }
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

/// Delete a product; returns whether a row existed.
pub async fn delete_product(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = product::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{db_available, get_db};

    #[tokio::test]
    async fn product_crud_service() -> Result<(), anyhow::Error> {
        if !db_available() { return Ok(()); }
        let db = get_db().await?;

        let sku = format!("SKU-{}", Uuid::new_v4().simple());
        let p = create_product(&db, &sku, "Widget", 9.99).await?;
        assert_eq!(p.sku, sku);

        let found = find_by_sku(&db, &sku).await?.unwrap();
        assert_eq!(found.id, p.id);

        let updated = update_product(&db, p.id, Some("Deluxe Widget"), Some(19.99)).await?;
        assert_eq!(updated.name, "Deluxe Widget");
        assert_eq!(updated.price, 19.99);

        assert!(delete_product(&db, p.id).await?);
        assert!(get_product(&db, p.id).await?.is_none());
        assert!(!delete_product(&db, p.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn blank_sku_is_rejected_before_store_access() -> Result<(), anyhow::Error> {
        if !db_available() { return Ok(()); }
        let db = get_db().await?;
        let res = create_product(&db, "  ", "No Sku", 1.0).await;
        assert!(res.is_err());
        Ok(())
    }
}
