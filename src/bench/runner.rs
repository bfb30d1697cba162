use super::{
    BenchOutcome, BenchTask, BenchTaskContext, BenchTaskResult, CascadeDeleteTask,
    MigrationRoundTripTask, OrderDetailInsertTask, QueryBinding, UniqueNoKkTask,
};
use crate::config::BenchConfig;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BenchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub results: Vec<BenchTaskResult>,
    pub passed: usize,
    pub failed: usize,
    pub unsupported: usize,
}

impl BenchReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Runs bench tasks one after another against one data source.
pub struct BenchRunner {
    data_source_id: String,
    iterations: u32,
    tasks: Vec<Box<dyn BenchTask>>,
}

impl BenchRunner {
    pub fn new(data_source_id: impl Into<String>, iterations: u32) -> Self {
        Self {
            data_source_id: data_source_id.into(),
            iterations,
            tasks: Vec::new(),
        }
    }

    /// The standard task set. The migration round trip drops every table,
    /// so it is only included when `allow_destructive` is set.
    pub fn from_config(config: &BenchConfig) -> Self {
        let mut runner = Self::new(config.data_source_id.clone(), config.iterations);
        if config.allow_destructive {
            runner.add_task(MigrationRoundTripTask::new());
        }
        runner.add_task(UniqueNoKkTask::new());
        runner.add_task(CascadeDeleteTask::new());
        runner.add_task(OrderDetailInsertTask::new());
        runner
    }

    pub fn add_task(&mut self, task: impl BenchTask + 'static) -> &mut Self {
        self.tasks.push(Box::new(task));
        self
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    pub async fn run(&mut self, db: &DatabaseConnection) -> BenchReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        log::info!("Bench run {run_id} started with {} tasks", self.tasks.len());

        let mut results = Vec::with_capacity(self.tasks.len());
        for task in self.tasks.iter_mut() {
            let ctx = BenchTaskContext {
                db: db.clone(),
                binding: QueryBinding::new(self.data_source_id.clone(), task.name()),
                iterations: self.iterations,
            };
            let result = task.execute(&ctx).await;
            let message = result.message.as_deref().unwrap_or_default();
            match result.outcome {
                BenchOutcome::Passed => log::info!(
                    "Bench task {} passed in {} ms: {message}",
                    result.task,
                    result.elapsed_ms
                ),
                BenchOutcome::Unsupported => {
                    log::warn!("Bench task {} unsupported: {message}", result.task)
                }
                BenchOutcome::Failed => {
                    log::error!("Bench task {} failed: {message}", result.task)
                }
            }
            results.push(result);
        }

        let count = |o: BenchOutcome| results.iter().filter(|r| r.outcome == o).count();
        let (passed, failed, unsupported) = (
            count(BenchOutcome::Passed),
            count(BenchOutcome::Failed),
            count(BenchOutcome::Unsupported),
        );
        let report = BenchReport {
            run_id,
            started_at,
            results,
            passed,
            failed,
            unsupported,
        };
        log::info!(
            "Bench run {run_id} finished: {} passed, {} failed, {} unsupported",
            report.passed,
            report.failed,
            report.unsupported
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::BenchTaskError;
    use async_trait::async_trait;
    use std::time::Instant;

    /// Fails every other run.
    struct FlakyTask {
        runs: u32,
        error: Option<BenchTaskError>,
    }

    #[async_trait]
    impl BenchTask for FlakyTask {
        fn name(&self) -> &str {
            "flaky"
        }

        fn error(&self) -> Option<&BenchTaskError> {
            self.error.as_ref()
        }

        async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
            let started = Instant::now();
            self.runs += 1;
            let outcome = if self.runs % 2 == 1 {
                Err(BenchTaskError::Assertion(format!("run {}", self.runs)))
            } else {
                Ok("fine".to_string())
            };
            let result = BenchTaskResult::finish(self.name(), ctx, started, &outcome);
            self.error = outcome.err();
            result
        }
    }

    struct UnsupportedTask;

    #[async_trait]
    impl BenchTask for UnsupportedTask {
        fn name(&self) -> &str {
            "unsupported"
        }

        fn error(&self) -> Option<&BenchTaskError> {
            None
        }

        async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult {
            BenchTaskResult::finish(
                self.name(),
                ctx,
                Instant::now(),
                &Err(BenchTaskError::Unsupported("no cascade".into())),
            )
        }
    }

    #[tokio::test]
    async fn test_runner_collects_outcomes() {
        let db = DatabaseConnection::Disconnected;
        let mut runner = BenchRunner::new("primary", 3);
        runner
            .add_task(FlakyTask {
                runs: 0,
                error: None,
            })
            .add_task(UnsupportedTask);

        let report = runner.run(&db).await;
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.unsupported, 1);
        assert_eq!(report.passed, 0);
        assert!(!report.is_success());

        let flaky = &report.results[0];
        assert_eq!(flaky.binding, QueryBinding::new("primary", "flaky"));
        assert_eq!(flaky.iterations, 3);
        assert_eq!(flaky.message.as_deref(), Some("assertion failed: run 1"));

        // 第二次运行成功
        let report = runner.run(&db).await;
        assert_eq!(report.passed, 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_default_task_set() {
        let mut config = BenchConfig::default();
        assert_eq!(
            BenchRunner::from_config(&config).task_names(),
            vec!["unique_no_kk", "cascade_delete", "order_detail_insert"]
        );

        config.allow_destructive = true;
        assert_eq!(
            BenchRunner::from_config(&config).task_names()[0],
            "migration_round_trip"
        );
    }
}
