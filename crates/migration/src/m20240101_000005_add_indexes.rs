//! Secondary indexes for natural-key lookups.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_product_sku")
                    .table(Product::Table)
                    .col(Product::Sku)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_user_name")
                    .table(User::Table)
                    .col(User::Name)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_user_id")
                    .table(Order::Table)
                    .col(Order::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_sku").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_name").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_order_user_id").table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Sku }

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "account_user")]
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Order {
    #[sea_orm(iden = "customer_order")]
    Table,
    UserId,
}
