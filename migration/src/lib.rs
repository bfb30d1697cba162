pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_order_detail_table;
mod m20240101_000003_create_farmers_table;
mod m20240101_000004_create_kepalakeluargas_table;

pub struct Migrator;

impl Migrator {
    /// Tables created by the migrations, in creation order.
    pub fn tables() -> &'static [&'static str] {
        &["users", "order_detail", "farmers", "kepalakeluargas"]
    }
}

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_order_detail_table::Migration),
            Box::new(m20240101_000003_create_farmers_table::Migration),
            Box::new(m20240101_000004_create_kepalakeluargas_table::Migration),
        ]
    }
}
