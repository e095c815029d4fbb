use chrono::Utc;
use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sku: String,
    pub quantity: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Inserts a new row unconditionally. The sku column is unique, so a
/// second insert for the same sku is rejected by the store.
pub async fn create(db: &DatabaseConnection, sku: &str, quantity: i32) -> Result<Model, errors::ModelError> {
    if sku.trim().is_empty() {
        return Err(errors::ModelError::Validation("sku required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        sku: Set(sku.to_string()),
        quantity: Set(quantity),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Sku.eq(sku))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
