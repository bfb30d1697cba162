use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

#[derive(DeriveIden)]
enum OrderDetail {
    Table,
    Id,
    OrderId,
    ProductId,
    ProductName,
    Quantity,
    Price,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // SQLite 只允许 INTEGER PRIMARY KEY 自增, 其它后端使用 bigint
        let mut id = ColumnDef::new(OrderDetail::Id);
        match manager.get_database_backend() {
            DatabaseBackend::Sqlite => id.integer(),
            _ => id.big_integer(),
        };

        manager
            .create_table(
                Table::create()
                    .table(OrderDetail::Table)
                    .if_not_exists()
                    .col(id.not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(OrderDetail::OrderId).integer().not_null())
                    .col(ColumnDef::new(OrderDetail::ProductId).integer().not_null())
                    .col(
                        ColumnDef::new(OrderDetail::ProductName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderDetail::Quantity).integer().not_null())
                    .col(ColumnDef::new(OrderDetail::Price).float().not_null())
                    .col(
                        ColumnDef::new(OrderDetail::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(OrderDetail::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_detail_order_id")
                    .table(OrderDetail::Table)
                    .col(OrderDetail::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(OrderDetail::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
