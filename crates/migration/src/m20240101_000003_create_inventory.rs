//! Create `inventory` table with one row per sku.
//!
//! The unique sku constraint is what rejects a second stock add for the
//! same sku; the service layer performs no merge.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(uuid(Inventory::Id).primary_key())
                    .col(string_len(Inventory::Sku, 64).unique_key().not_null())
                    .col(integer(Inventory::Quantity).not_null())
                    .col(timestamp_with_time_zone(Inventory::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Inventory::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Inventory::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Inventory { Table, Id, Sku, Quantity, CreatedAt, UpdatedAt }
