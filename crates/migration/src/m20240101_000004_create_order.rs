//! Create `customer_order` table.
//!
//! Orders reference users and skus by value only; no cross-service
//! foreign keys. price_at_order is the immutable price snapshot.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(uuid(Order::Id).primary_key())
                    .col(string_len(Order::OrderNumber, 64).unique_key().not_null())
                    .col(uuid(Order::UserId).not_null())
                    .col(string_len(Order::Sku, 64).not_null())
                    .col(integer(Order::Quantity).not_null())
                    .col(double(Order::PriceAtOrder).not_null())
                    .col(timestamp_with_time_zone(Order::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Order::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "customer_order")]
    Table,
    Id,
    OrderNumber,
    UserId,
    Sku,
    Quantity,
    PriceAtOrder,
    CreatedAt,
}
