use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;

/// Kepala keluarga (head of household) records, one per family card.
#[derive(DeriveIden)]
enum Kepalakeluargas {
    Table,
    Id,
    IdUser,
    NoKk,
    NamaKk,
    Alamat,
    KodePos,
    StatusRumah,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 外键必须写在 CREATE TABLE 中, SQLite 不支持 ALTER TABLE ADD CONSTRAINT
        manager
            .create_table(
                Table::create()
                    .table(Kepalakeluargas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Kepalakeluargas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Kepalakeluargas::IdUser).integer().not_null())
                    .col(
                        ColumnDef::new(Kepalakeluargas::NoKk)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::NamaKk)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::Alamat)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::KodePos)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::StatusRumah)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::CreatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Kepalakeluargas::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_kepalakeluargas_id_user")
                            .from(Kepalakeluargas::Table, Kepalakeluargas::IdUser)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_kepalakeluargas_id_user")
                    .table(Kepalakeluargas::Table)
                    .col(Kepalakeluargas::IdUser)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Kepalakeluargas::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
