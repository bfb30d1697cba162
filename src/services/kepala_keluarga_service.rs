use crate::entities::{kepala_keluarga_entity as kk, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{require_text, validate_kode_pos, validate_no_kk};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr,
};

/// 用户在检查之后被删除时, 插入会违反外键约束, 同样返回 NotFound
fn insert_error(err: DbErr, id_user: i32, no_kk: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            log::debug!("Foreign key constraint violated: {detail}");
            AppError::NotFound(format!("user {id_user}"))
        }
        _ => AppError::on_unique_violation(err, format!("no_kk {no_kk} is already registered")),
    }
}

#[derive(Clone)]
pub struct KepalaKeluargaService {
    pool: DatabaseConnection,
}

impl KepalaKeluargaService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建户主记录
    /// - id_user 必须存在
    /// - no_kk 重复时返回 Conflict (由唯一索引保证)
    pub async fn create(
        &self,
        request: CreateKepalaKeluargaRequest,
    ) -> AppResult<KepalaKeluargaResponse> {
        let no_kk = validate_no_kk(&request.no_kk)?;
        let kode_pos = validate_kode_pos(&request.kode_pos)?;
        let nama_kk = require_text("nama_kk", &request.nama_kk)?;
        let alamat = require_text("alamat", &request.alamat)?;
        let status_rumah = require_text("status_rumah", &request.status_rumah)?;

        if users::Entity::find_by_id(request.id_user)
            .one(&self.pool)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("user {}", request.id_user)));
        }

        let now = Utc::now();
        let record = kk::ActiveModel {
            id_user: Set(request.id_user),
            no_kk: Set(no_kk.clone()),
            nama_kk: Set(nama_kk),
            alamat: Set(alamat),
            kode_pos: Set(kode_pos),
            status_rumah: Set(status_rumah),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| insert_error(e, request.id_user, &no_kk))?;

        Ok(record.into())
    }

    pub async fn get(&self, id: i32) -> AppResult<KepalaKeluargaResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn find_by_no_kk(&self, no_kk: &str) -> AppResult<KepalaKeluargaResponse> {
        let no_kk = validate_no_kk(no_kk)?;
        kk::Entity::find()
            .filter(kk::Column::NoKk.eq(no_kk.as_str()))
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("no_kk {no_kk}")))
    }

    pub async fn list_by_user(&self, id_user: i32) -> AppResult<Vec<KepalaKeluargaResponse>> {
        let list = kk::Entity::find()
            .filter(kk::Column::IdUser.eq(id_user))
            .order_by_asc(kk::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateKepalaKeluargaRequest,
    ) -> AppResult<KepalaKeluargaResponse> {
        let record = self.find(id).await?;
        let mut am = record.into_active_model();

        let mut new_no_kk = None;
        if let Some(v) = request.no_kk {
            let v = validate_no_kk(&v)?;
            am.no_kk = Set(v.clone());
            new_no_kk = Some(v);
        }
        if let Some(v) = request.nama_kk {
            am.nama_kk = Set(require_text("nama_kk", &v)?);
        }
        if let Some(v) = request.alamat {
            am.alamat = Set(require_text("alamat", &v)?);
        }
        if let Some(v) = request.kode_pos {
            am.kode_pos = Set(validate_kode_pos(&v)?);
        }
        if let Some(v) = request.status_rumah {
            am.status_rumah = Set(require_text("status_rumah", &v)?);
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await.map_err(|e| {
            AppError::on_unique_violation(
                e,
                format!(
                    "no_kk {} is already registered",
                    new_no_kk.as_deref().unwrap_or_default()
                ),
            )
        })?;
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = kk::Entity::delete_by_id(id).exec(&self.pool).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound(format!("kepala keluarga {id}")));
        }
        Ok(())
    }

    async fn find(&self, id: i32) -> AppResult<kk::Model> {
        kk::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("kepala keluarga {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    async fn setup_db() -> DatabaseConnection {
        let mut options = ConnectOptions::new("sqlite::memory:".to_string());
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    fn record(id_user: i32, no_kk: &str) -> kk::ActiveModel {
        kk::ActiveModel {
            id_user: Set(id_user),
            no_kk: Set(no_kk.to_string()),
            nama_kk: Set("Budi".to_string()),
            alamat: Set("Jl. Merdeka 1".to_string()),
            kode_pos: Set("40111".to_string()),
            status_rumah: Set("kontrak".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_for_vanished_user_maps_to_not_found() {
        let db = setup_db().await;

        let err = record(404, "3273010101010001")
            .insert(&db)
            .await
            .unwrap_err();
        match insert_error(err, 404, "3273010101010001") {
            AppError::NotFound(msg) => assert_eq!(msg, "user 404"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_insert_duplicate_no_kk_maps_to_conflict() {
        let db = setup_db().await;
        let user = users::ActiveModel {
            name: Set("Budi".to_string()),
            email: Set("budi@example.com".to_string()),
            password: Set("!".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        record(user.id, "3273010101010001").insert(&db).await.unwrap();
        let err = record(user.id, "3273010101010001")
            .insert(&db)
            .await
            .unwrap_err();
        assert!(matches!(
            insert_error(err, user.id, "3273010101010001"),
            AppError::Conflict(_)
        ));
    }
}
