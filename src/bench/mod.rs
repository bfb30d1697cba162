//! Bench tasks: named, self-contained checks executed against a live
//! database.
//!
//! A task exposes its name, the error of its last run and an `execute`
//! operation taking a [`BenchTaskContext`]. Tasks never panic on a failed
//! check; the outcome is reported in the returned [`BenchTaskResult`] and
//! the error stays readable through [`BenchTask::error`] until the next run.

mod runner;
mod schema_tasks;

pub use runner::{BenchReport, BenchRunner};
pub use schema_tasks::{
    CascadeDeleteTask, MigrationRoundTripTask, OrderDetailInsertTask, UniqueNoKkTask,
};

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use utoipa::ToSchema;

/// Binds a data source to a query, serialised with the element names
/// `DataSourceID` and `QueryID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QueryBinding {
    #[serde(rename = "DataSourceID")]
    pub data_source_id: String,
    #[serde(rename = "QueryID")]
    pub query_id: String,
}

impl QueryBinding {
    pub fn new(data_source_id: impl Into<String>, query_id: impl Into<String>) -> Self {
        Self {
            data_source_id: data_source_id.into(),
            query_id: query_id.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BenchTaskError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The store lacks a capability the task checks for.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BenchOutcome {
    Passed,
    Failed,
    Unsupported,
}

pub struct BenchTaskContext {
    pub db: DatabaseConnection,
    pub binding: QueryBinding,
    /// Work units for tasks that measure throughput.
    pub iterations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BenchTaskResult {
    pub task: String,
    pub binding: QueryBinding,
    pub outcome: BenchOutcome,
    pub iterations: u32,
    pub elapsed_ms: u64,
    pub message: Option<String>,
}

impl BenchTaskResult {
    /// Builds the result of a run that started at `started`.
    pub fn finish(
        task: &str,
        ctx: &BenchTaskContext,
        started: Instant,
        outcome: &Result<String, BenchTaskError>,
    ) -> Self {
        let (outcome, message) = match outcome {
            Ok(msg) => (BenchOutcome::Passed, msg.clone()),
            Err(e @ BenchTaskError::Unsupported(_)) => (BenchOutcome::Unsupported, e.to_string()),
            Err(e) => (BenchOutcome::Failed, e.to_string()),
        };
        Self {
            task: task.to_string(),
            binding: ctx.binding.clone(),
            outcome,
            iterations: ctx.iterations,
            elapsed_ms: started.elapsed().as_millis() as u64,
            message: Some(message),
        }
    }
}

#[async_trait]
pub trait BenchTask: Send + Sync {
    fn name(&self) -> &str;

    /// Error of the most recent `execute`, `None` if it succeeded or the
    /// task has not run yet.
    fn error(&self) -> Option<&BenchTaskError>;

    async fn execute(&mut self, ctx: &BenchTaskContext) -> BenchTaskResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_binding_field_names() {
        let binding = QueryBinding::new("primary", "unique_no_kk");
        let json = serde_json::to_value(&binding).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"DataSourceID": "primary", "QueryID": "unique_no_kk"})
        );

        let back: QueryBinding = serde_json::from_value(json).unwrap();
        assert_eq!(back, binding);
    }

    #[test]
    fn test_finish_maps_errors_to_outcomes() {
        let ctx = BenchTaskContext {
            db: DatabaseConnection::Disconnected,
            binding: QueryBinding::new("primary", "sample_task"),
            iterations: 1,
        };
        let started = Instant::now();

        let ok = BenchTaskResult::finish("sample_task", &ctx, started, &Ok("done".into()));
        assert_eq!(ok.outcome, BenchOutcome::Passed);
        assert_eq!(ok.message.as_deref(), Some("done"));
        assert_eq!(ok.binding, ctx.binding);

        let failed = BenchTaskResult::finish(
            "sample_task",
            &ctx,
            started,
            &Err(BenchTaskError::Assertion("row left behind".into())),
        );
        assert_eq!(failed.outcome, BenchOutcome::Failed);
        assert_eq!(
            failed.message.as_deref(),
            Some("assertion failed: row left behind")
        );

        let unsupported = BenchTaskResult::finish(
            "sample_task",
            &ctx,
            started,
            &Err(BenchTaskError::Unsupported("no cascade".into())),
        );
        assert_eq!(unsupported.outcome, BenchOutcome::Unsupported);
    }

    #[test]
    fn test_outcome_serialises_snake_case() {
        assert_eq!(
            serde_json::to_string(&BenchOutcome::Unsupported).unwrap(),
            "\"unsupported\""
        );
    }
}
