use chrono::Utc;
use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_order")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub sku: String,
    pub quantity: i32,
    /// Price snapshot taken at order time; never updated.
    pub price_at_order: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    order_number: &str,
    user_id: Uuid,
    sku: &str,
    quantity: i32,
    price_at_order: f64,
) -> Result<Model, errors::ModelError> {
    if order_number.trim().is_empty() {
        return Err(errors::ModelError::Validation("order_number required".into()));
    }
    if sku.trim().is_empty() {
        return Err(errors::ModelError::Validation("sku required".into()));
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        order_number: Set(order_number.to_string()),
        user_id: Set(user_id),
        sku: Set(sku.to_string()),
        quantity: Set(quantity),
        price_at_order: Set(price_at_order),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_order_number(db: &DatabaseConnection, order_number: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OrderNumber.eq(order_number))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
