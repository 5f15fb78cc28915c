//! Trigger handling and the execution lifecycle.

use std::sync::Arc;

use avtomat_core::{Result, epoch_millis_now};
use avtomat_data::model::{Execution, ExecutionLog, ExecutionStatus};
use avtomat_data::{ExecutionLedger, WorkflowRegistry};
use tokio_util::task::TaskTracker;

use crate::step::CompletionStep;

/// Tracing target for engine operations.
const TRACING_TARGET: &str = "avtomat_engine::engine";

/// Orchestrates executions: validates triggers, creates ledger entries, and
/// schedules one completion task per execution.
///
/// Creation is synchronous — the `running` record is durably recorded before
/// `trigger` returns — while completion runs as an independent tracked task
/// with no ordering guarantee across executions. The ledger enforces at most
/// one terminal transition per id.
#[derive(Clone)]
pub struct ExecutionEngine {
    registry: WorkflowRegistry,
    ledger: ExecutionLedger,
    step: Arc<dyn CompletionStep>,
    tracker: TaskTracker,
}

impl ExecutionEngine {
    /// Creates an engine over the given stores and completion step.
    pub fn new(
        registry: WorkflowRegistry,
        ledger: ExecutionLedger,
        step: Arc<dyn CompletionStep>,
    ) -> Self {
        Self {
            registry,
            ledger,
            step,
            tracker: TaskTracker::new(),
        }
    }

    /// Accepts a trigger for the given workflow.
    ///
    /// The workflow is resolved first, so a bad trigger never creates a
    /// ledger entry. On success the new execution id is returned as soon as
    /// the `running` record is recorded; the caller never waits for the
    /// completion task.
    pub async fn trigger(&self, workflow_id: &str) -> Result<String> {
        self.registry.get(workflow_id).await?;

        let execution = Execution::start(workflow_id);
        let execution_id = execution.id.clone();
        self.ledger.append(execution.clone()).await?;

        tracing::info!(
            target: TRACING_TARGET,
            execution_id = %execution_id,
            workflow_id = %workflow_id,
            "execution triggered"
        );

        let ledger = self.ledger.clone();
        let step = Arc::clone(&self.step);
        self.tracker.spawn(async move {
            run_completion(ledger, step, execution).await;
        });

        Ok(execution_id)
    }

    /// Drains the engine: refuses new completion tasks and waits for every
    /// in-flight one to apply its terminal transition.
    pub async fn shutdown(&self) {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            tracing::info!(
                target: TRACING_TARGET,
                pending = pending,
                "draining in-flight completion tasks"
            );
        }
        self.tracker.wait().await;
    }
}

/// Runs the completion step and applies the terminal transition.
async fn run_completion(
    ledger: ExecutionLedger,
    step: Arc<dyn CompletionStep>,
    execution: Execution,
) {
    let execution_id = execution.id.clone();

    let (status, log) = match step.run(&execution).await {
        Ok(()) => (
            ExecutionStatus::Success,
            ExecutionLog::info("Execution finished"),
        ),
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET,
                execution_id = %execution_id,
                error = %error,
                "completion step failed"
            );
            (
                ExecutionStatus::Failure,
                ExecutionLog::error(format!("Execution failed: {error}")),
            )
        }
    };

    match ledger
        .complete(&execution_id, status, epoch_millis_now(), log)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            // Already terminal; the ledger kept the first transition.
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                execution_id = %execution_id,
                error = %error,
                "failed to record completion"
            );
        }
    }
}
