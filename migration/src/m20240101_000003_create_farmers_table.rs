use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Farmers {
    Table,
    Id,
    Name,
    Gender,
    Location,
    Crop,
    Contact,
    ProfilePicture,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Farmers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Farmers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Farmers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Farmers::Gender).string_len(255).not_null())
                    .col(ColumnDef::new(Farmers::Location).string_len(255).not_null())
                    .col(ColumnDef::new(Farmers::Crop).string_len(255).not_null())
                    .col(ColumnDef::new(Farmers::Contact).string_len(255).not_null())
                    // 头像可为空
                    .col(ColumnDef::new(Farmers::ProfilePicture).string_len(255).null())
                    .col(ColumnDef::new(Farmers::CreatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Farmers::UpdatedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Farmers::Table).if_exists().to_owned())
            .await
    }
}
