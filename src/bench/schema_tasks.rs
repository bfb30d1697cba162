use super::{BenchTask, BenchTaskContext, BenchTaskError, BenchTaskResult};
use crate::entities::{
    kepala_keluarga_entity as kk, order_detail_entity as order_detail, user_entity as users,
};
use async_trait::async_trait;
use chrono::Utc;
use migration::{Migrator, MigratorTrait, SchemaManager};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};
use std::time::Instant;

type TaskOutcome = Result<String, BenchTaskError>;

fn random_no_kk() -> String {
    let mut rng = rand::thread_rng();
    (0..16).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

async fn insert_fixture_user(db: &DatabaseConnection) -> Result<users::Model, BenchTaskError> {
    let now = Utc::now();
    let user = users::ActiveModel {
        name: Set("bench fixture".to_string()),
        email: Set(format!("bench-{}@bench.invalid", uuid::Uuid::new_v4())),
        // 不可登录的占位哈希
        password: Set("!".to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(user)
}

async fn insert_fixture_kk(
    db: &DatabaseConnection,
    id_user: i32,
    no_kk: &str,
) -> Result<kk::Model, sea_orm::DbErr> {
    let now = Utc::now();
    kk::ActiveModel {
        id_user: Set(id_user),
        no_kk: Set(no_kk.to_string()),
        nama_kk: Set("bench fixture".to_string()),
        alamat: Set("-".to_string()),
        kode_pos: Set("00000".to_string()),
        status_rumah: Set("-".to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// 清理测试数据, 先删户主记录再删用户
async fn remove_fixture_user(db: &DatabaseConnection, id_user: i32) {
    if let Err(e) = kk::Entity::delete_many()
        .filter(kk::Column::IdUser.eq(id_user))
        .exec(db)
        .await
    {
        log::warn!("Failed to remove bench kepala keluarga rows of user {id_user}: {e}");
    }
    if let Err(e) = users::Entity::delete_by_id(id_user).exec(db).await {
        log::warn!("Failed to remove bench user {id_user}: {e}");
    }
}

/// Rolls the migrations back one step at a time, checking that each step
/// removes exactly the table it created, then re-applies all of them.
///
/// Destroys every row in the migrated tables.
#[derive(Default)]
pub struct MigrationRoundTripTask {
    error: Option<BenchTaskError>,
}

impl MigrationRoundTripTask {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, db: &DatabaseConnection) -> TaskOutcome {
        let manager = SchemaManager::new(db);
        let tables = Migrator::tables();

        Migrator::up(db, None).await?;

        for (created, table) in tables.iter().enumerate().rev() {
            Migrator::down(db, Some(1)).await?;

            if manager.has_table(*table).await? {
                return Err(BenchTaskError::Assertion(format!(
                    "table {table} still exists after its migration was reversed"
                )));
            }
            for earlier in &tables[..created] {
                if !manager.has_table(*earlier).await? {
                    return Err(BenchTaskError::Assertion(format!(
                        "reversing {table} also removed {earlier}"
                    )));
                }
            }
        }

        Migrator::up(db, None).await?;
        for table in tables {
            if !manager.has_table(*table).await? {
                return Err(BenchTaskError::Assertion(format!(
                    "table {table} missing after re-applying migrations"
                )));
            }
        }

        Ok(format!("{} tables dropped and recreated", tables.len()))
    }
}

#[async_trait]
impl BenchTask for MigrationRoundTripTask {
    fn name(&self) -> &str {
        "migration_round_trip"
    }

    fn error(&self) -> Option<&BenchTaskError> {
        self.error.as_ref()
    }

    async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
        let started = Instant::now();
        let outcome = self.run(&ctx.db).await;
        let result = BenchTaskResult::finish(self.name(), ctx, started, &outcome);
        self.error = outcome.err();
        result
    }
}

/// Checks that `kepalakeluargas.no_kk` rejects a duplicate value.
#[derive(Default)]
pub struct UniqueNoKkTask {
    error: Option<BenchTaskError>,
}

impl UniqueNoKkTask {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, db: &DatabaseConnection) -> TaskOutcome {
        let user = insert_fixture_user(db).await?;
        let outcome = Self::check(db, user.id).await;
        remove_fixture_user(db, user.id).await;
        outcome
    }

    async fn check(db: &DatabaseConnection, id_user: i32) -> TaskOutcome {
        let no_kk = random_no_kk();
        insert_fixture_kk(db, id_user, &no_kk).await?;

        match insert_fixture_kk(db, id_user, &no_kk).await {
            Ok(dup) => Err(BenchTaskError::Assertion(format!(
                "duplicate no_kk {no_kk} accepted as row {}",
                dup.id
            ))),
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Ok(format!("duplicate no_kk {no_kk} rejected"))
                }
                _ => Err(e.into()),
            },
        }
    }
}

#[async_trait]
impl BenchTask for UniqueNoKkTask {
    fn name(&self) -> &str {
        "unique_no_kk"
    }

    fn error(&self) -> Option<&BenchTaskError> {
        self.error.as_ref()
    }

    async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
        let started = Instant::now();
        let outcome = self.run(&ctx.db).await;
        let result = BenchTaskResult::finish(self.name(), ctx, started, &outcome);
        self.error = outcome.err();
        result
    }
}

/// Checks that deleting a user removes its kepala keluarga rows. A store
/// without cascade support yields `Unsupported`, never a panic.
pub struct CascadeDeleteTask {
    dependents: u32,
    error: Option<BenchTaskError>,
}

impl Default for CascadeDeleteTask {
    fn default() -> Self {
        Self {
            dependents: 2,
            error: None,
        }
    }
}

impl CascadeDeleteTask {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, db: &DatabaseConnection) -> TaskOutcome {
        let user = insert_fixture_user(db).await?;
        for _ in 0..self.dependents {
            if let Err(e) = insert_fixture_kk(db, user.id, &random_no_kk()).await {
                remove_fixture_user(db, user.id).await;
                return Err(e.into());
            }
        }

        if let Err(e) = users::Entity::delete_by_id(user.id).exec(db).await {
            remove_fixture_user(db, user.id).await;
            return match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    Err(BenchTaskError::Unsupported(format!(
                        "store refused to delete a referenced user: {detail}"
                    )))
                }
                _ => Err(e.into()),
            };
        }

        let remaining = kk::Entity::find()
            .filter(kk::Column::IdUser.eq(user.id))
            .count(db)
            .await?;
        if remaining > 0 {
            remove_fixture_user(db, user.id).await;
            return Err(BenchTaskError::Unsupported(format!(
                "store kept {remaining} of {} dependent rows, cascade delete is not enforced",
                self.dependents
            )));
        }

        Ok(format!(
            "{} dependent rows removed with their user",
            self.dependents
        ))
    }
}

#[async_trait]
impl BenchTask for CascadeDeleteTask {
    fn name(&self) -> &str {
        "cascade_delete"
    }

    fn error(&self) -> Option<&BenchTaskError> {
        self.error.as_ref()
    }

    async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
        let started = Instant::now();
        let outcome = self.run(&ctx.db).await;
        let result = BenchTaskResult::finish(self.name(), ctx, started, &outcome);
        self.error = outcome.err();
        result
    }
}

/// Inserts `iterations` order lines under a throwaway order id, then
/// deletes them.
#[derive(Default)]
pub struct OrderDetailInsertTask {
    error: Option<BenchTaskError>,
}

impl OrderDetailInsertTask {
    pub fn new() -> Self {
        Self::default()
    }

    async fn run(&self, db: &DatabaseConnection, iterations: u32) -> TaskOutcome {
        // 负数订单号不会与真实订单冲突
        let order_id = -rand::thread_rng().gen_range(1..i32::MAX);

        let Ok(count) = i32::try_from(iterations) else {
            return Err(BenchTaskError::Assertion(format!(
                "{iterations} iterations exceed the product id range"
            )));
        };
        let started = Instant::now();

        for product_id in 0..count {
            let now = Utc::now();
            let inserted = order_detail::ActiveModel {
                order_id: Set(order_id),
                product_id: Set(product_id),
                product_name: Set(format!("bench product {product_id}")),
                quantity: Set(1),
                price: Set(1.0),
                created_at: Set(Some(now)),
                updated_at: Set(Some(now)),
                ..Default::default()
            }
            .insert(db)
            .await;
            if let Err(e) = inserted {
                Self::cleanup(db, order_id).await;
                return Err(e.into());
            }
        }
        let elapsed = started.elapsed();

        let removed = order_detail::Entity::delete_many()
            .filter(order_detail::Column::OrderId.eq(order_id))
            .exec(db)
            .await?
            .rows_affected;
        if removed != u64::from(iterations) {
            return Err(BenchTaskError::Assertion(format!(
                "inserted {iterations} rows but removed {removed}"
            )));
        }

        let per_sec = if elapsed.as_secs_f64() > 0.0 {
            f64::from(iterations) / elapsed.as_secs_f64()
        } else {
            0.0
        };
        Ok(format!(
            "{iterations} rows inserted in {} ms ({per_sec:.0} rows/s)",
            elapsed.as_millis()
        ))
    }

    async fn cleanup(db: &DatabaseConnection, order_id: i32) {
        if let Err(e) = order_detail::Entity::delete_many()
            .filter(order_detail::Column::OrderId.eq(order_id))
            .exec(db)
            .await
        {
            log::warn!("Failed to remove bench order lines of order {order_id}: {e}");
        }
    }
}

#[async_trait]
impl BenchTask for OrderDetailInsertTask {
    fn name(&self) -> &str {
        "order_detail_insert"
    }

    fn error(&self) -> Option<&BenchTaskError> {
        self.error.as_ref()
    }

    async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
        let started = Instant::now();
        let outcome = self.run(&ctx.db, ctx.iterations).await;
        let result = BenchTaskResult::finish(self.name(), ctx, started, &outcome);
        self.error = outcome.err();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::{BenchOutcome, QueryBinding};

    #[tokio::test]
    async fn test_order_detail_insert_rejects_oversized_iterations() {
        let mut task = OrderDetailInsertTask::new();
        let ctx = BenchTaskContext {
            db: DatabaseConnection::Disconnected,
            binding: QueryBinding::new("primary", "order_detail_insert"),
            iterations: i32::MAX as u32 + 1,
        };

        let result = task.execute(&ctx).await;
        assert_eq!(result.outcome, BenchOutcome::Failed);
        assert!(matches!(task.error(), Some(BenchTaskError::Assertion(_))));
    }
}
