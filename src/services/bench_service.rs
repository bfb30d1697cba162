use crate::bench::{BenchReport, BenchRunner};
use crate::config::BenchConfig;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct BenchService {
    pool: DatabaseConnection,
    config: BenchConfig,
    // 同一时间只允许一次运行
    running: Arc<Mutex<()>>,
}

impl BenchService {
    pub fn new(pool: DatabaseConnection, config: BenchConfig) -> Self {
        Self {
            pool,
            config,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Runs the configured task set; waits for a run already in progress.
    pub async fn run(&self) -> BenchReport {
        let _guard = self.running.lock().await;
        BenchRunner::from_config(&self.config).run(&self.pool).await
    }
}
