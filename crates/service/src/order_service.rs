use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use models::order;

/// Create an order. The order number must be unused; price_at_order is
/// the caller-supplied snapshot and is never recomputed.
pub async fn create_order(
    db: &DatabaseConnection,
    order_number: &str,
    user_id: Uuid,
    sku: &str,
    quantity: i32,
    price_at_order: f64,
) -> Result<order::Model, ServiceError> {
    if order::find_by_order_number(db, order_number).await?.is_some() {
        return Err(ServiceError::conflict("order number already exists"));
    }
    let created = order::create(db, order_number, user_id, sku, quantity, price_at_order).await?;
    info!(order_number = %created.order_number, user_id = %created.user_id, sku = %created.sku, "order created");
    Ok(created)
}

/// Get an order by id.
pub async fn get_order(db: &DatabaseConnection, id: Uuid) -> Result<Option<order::Model>, ServiceError> {
    let found = order::Entity::find_by_id(id).one(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Natural-key lookup by order number.
pub async fn find_by_order_number(db: &DatabaseConnection, order_number: &str) -> Result<Option<order::Model>, ServiceError> {
    let found = order::find_by_order_number(db, order_number).await?;
    Ok(found)
}

/// List every order.
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<order::Model>, ServiceError> {
    let rows = order::Entity::find().all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{db_available, get_db};

    #[tokio::test]
    async fn order_create_and_lookup() -> Result<(), anyhow::Error> {
        if !db_available() { return Ok(()); }
        let db = get_db().await?;

        let number = format!("ORD-{}", Uuid::new_v4().simple());
        let user_id = Uuid::new_v4();
        let o = create_order(&db, &number, user_id, "SKU-1", 2, 19.99).await?;
        assert_eq!(o.order_number, number);
        assert_eq!(o.price_at_order, 19.99);

        let found = find_by_order_number(&db, &number).await?.unwrap();
        assert_eq!(found.id, o.id);

        let by_id = get_order(&db, o.id).await?.unwrap();
        assert_eq!(by_id.user_id, user_id);

        order::Entity::delete_by_id(o.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_order_number_conflicts() -> Result<(), anyhow::Error> {
        if !db_available() { return Ok(()); }
        let db = get_db().await?;

        let number = format!("ORD-{}", Uuid::new_v4().simple());
        let o = create_order(&db, &number, Uuid::new_v4(), "SKU-1", 1, 5.0).await?;
        let dup = create_order(&db, &number, Uuid::new_v4(), "SKU-2", 1, 6.0).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        order::Entity::delete_by_id(o.id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn blank_order_number_is_rejected() -> Result<(), anyhow::Error> {
        if !db_available() { return Ok(()); }
        let db = get_db().await?;
        let res = create_order(&db, " ", Uuid::new_v4(), "SKU-1", 1, 5.0).await;
        assert!(res.is_err());
        Ok(())
    }
}
