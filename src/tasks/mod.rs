//! Background scheduled tasks for the application.
//!
//! Call `spawn_all` once during startup to launch them.

use crate::config::BenchConfig;
use crate::services::BenchService;

/// Spawn all background tasks.
///
/// Notes
/// - The bench loop only starts when `interval_secs` is configured.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(bench_service: BenchService, config: &BenchConfig) {
    // 定时运行 bench 任务
    if let Some(interval) = config.interval_secs.filter(|s| *s > 0) {
        let svc = bench_service.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(interval)).await;
                let report = svc.run().await;
                if !report.is_success() {
                    log::error!(
                        "Scheduled bench run {} had {} failed tasks",
                        report.run_id,
                        report.failed
                    );
                }
            }
        });
    }
}
