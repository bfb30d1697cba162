#![allow(dead_code)]

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use registry_backend::entities::user_entity as users;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

/// Fresh in-memory SQLite database with all migrations applied.
///
/// A single connection is used because every `:memory:` connection opens
/// its own database.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

/// Inserts a user without going through bcrypt.
pub async fn insert_user(db: &DatabaseConnection, email: &str) -> users::Model {
    let now = Utc::now();
    users::ActiveModel {
        name: Set("Test User".to_string()),
        email: Set(email.to_string()),
        password: Set("!".to_string()),
        created_at: Set(Some(now)),
        updated_at: Set(Some(now)),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
