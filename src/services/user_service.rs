use crate::entities::{kepala_keluarga_entity as kk, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{hash_password, require_text, validate_email, validate_password};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let name = require_text("name", &request.name)?;
        let email = validate_email(&request.email)?;
        validate_password(&request.password)?;
        let password = hash_password(&request.password)?;

        let now = Utc::now();
        let user = users::ActiveModel {
            name: Set(name),
            email: Set(email.clone()),
            password: Set(password),
            created_at: Set(Some(now)),
            updated_at: Set(Some(now)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| AppError::on_unique_violation(e, format!("email {email} is already registered")))?;

        log::info!("User {} created", user.id);
        Ok(user.into())
    }

    pub async fn get_user(&self, id: i32) -> AppResult<UserResponse> {
        users::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))
    }

    pub async fn list_users(&self, query: &UserQuery) -> AppResult<PaginatedResponse<UserResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let base_query = users::Entity::find();

        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_asc(users::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    /// 删除用户, 依赖的户主记录由外键级联删除
    ///
    /// If the store does not enforce the cascade the dependents are removed
    /// explicitly in the same transaction. If it refuses the delete because
    /// the rows are still referenced, `Conflict` is returned and nothing
    /// changes.
    pub async fn delete_user(&self, id: i32) -> AppResult<DeleteUserResponse> {
        let txn = self.pool.begin().await?;

        if users::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Err(AppError::NotFound(format!("user {id}")));
        }

        let dependents = kk::Entity::find()
            .filter(kk::Column::IdUser.eq(id))
            .count(&txn)
            .await?;

        users::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| {
                AppError::on_foreign_key_violation(
                    e,
                    format!("user {id} is still referenced by kepala keluarga records"),
                )
            })?;

        let orphans = kk::Entity::find()
            .filter(kk::Column::IdUser.eq(id))
            .count(&txn)
            .await?;
        if orphans > 0 {
            log::warn!(
                "Store did not cascade delete of user {id}, removing {orphans} kepala keluarga rows explicitly"
            );
            kk::Entity::delete_many()
                .filter(kk::Column::IdUser.eq(id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        log::info!("User {id} deleted with {dependents} kepala keluarga rows");

        Ok(DeleteUserResponse {
            id,
            kepala_keluarga_removed: dependents,
        })
    }
}
