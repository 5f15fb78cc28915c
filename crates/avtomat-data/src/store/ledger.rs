//! The append/update store of execution records.

use std::sync::Arc;

use avtomat_core::{Error, Result};
use tokio::sync::RwLock;

use crate::model::{Execution, ExecutionLog, ExecutionStatus};
use crate::snapshot::SnapshotFile;

/// Tracing target for ledger operations.
const TRACING_TARGET: &str = "avtomat_data::store::ledger";

/// Holds execution records keyed by id and by owning workflow id.
///
/// Records are appended at trigger time and updated at most once more by the
/// completion transition; nothing is ever deleted, so the ledger keeps
/// history for workflows that no longer exist.
#[derive(Clone)]
pub struct ExecutionLedger {
    executions: Arc<RwLock<Vec<Execution>>>,
    snapshot: SnapshotFile,
}

impl ExecutionLedger {
    /// Loads the ledger from its snapshot; a missing document starts empty.
    pub async fn load(snapshot: SnapshotFile) -> Self {
        let executions: Vec<Execution> = snapshot.load().await;
        tracing::debug!(
            target: TRACING_TARGET,
            count = executions.len(),
            "execution ledger loaded"
        );
        Self {
            executions: Arc::new(RwLock::new(executions)),
            snapshot,
        }
    }

    /// Appends a freshly-created record.
    ///
    /// The record is fully formed before the write guard is taken, so a
    /// concurrent reader sees either nothing or the whole record.
    pub async fn append(&self, execution: Execution) -> Result<()> {
        let mut executions = self.executions.write().await;
        executions.push(execution);
        self.snapshot.persist(&executions).await
    }

    /// Applies the terminal transition for one execution.
    ///
    /// Returns `true` if the transition was applied and `false` if the
    /// record was already terminal; the second application of a completion
    /// is a no-op, never a double log append.
    pub async fn complete(
        &self,
        id: &str,
        status: ExecutionStatus,
        finished_at: i64,
        log: ExecutionLog,
    ) -> Result<bool> {
        if !status.is_terminal() {
            return Err(Error::internal("completion requires a terminal status"));
        }

        let mut executions = self.executions.write().await;
        let execution = executions
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::not_found("execution"))?;

        if execution.status.is_terminal() {
            tracing::warn!(
                target: TRACING_TARGET,
                execution_id = %id,
                status = execution.status.as_ref(),
                "completion ignored, execution already terminal"
            );
            return Ok(false);
        }

        execution.status = status;
        execution.finished_at = Some(finished_at);
        execution.logs.push(log);
        self.snapshot.persist(&executions).await?;

        tracing::info!(
            target: TRACING_TARGET,
            execution_id = %id,
            status = status.as_ref(),
            "execution completed"
        );

        Ok(true)
    }

    /// Looks up one execution by id.
    pub async fn get(&self, id: &str) -> Result<Execution> {
        let executions = self.executions.read().await;
        executions
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("execution"))
    }

    /// Returns all executions for a workflow in creation order.
    pub async fn list_by_workflow(&self, workflow_id: &str) -> Vec<Execution> {
        let executions = self.executions.read().await;
        executions
            .iter()
            .filter(|e| e.workflow_id == workflow_id)
            .cloned()
            .collect()
    }

    /// Returns a snapshot of every execution in creation order.
    pub async fn list_all(&self) -> Vec<Execution> {
        self.executions.read().await.clone()
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.executions.read().await.len()
    }

    /// Whether the ledger holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use avtomat_core::{ErrorKind, epoch_millis_now};

    use super::*;

    #[tokio::test]
    async fn append_then_get() -> anyhow::Result<()> {
        let ledger = ExecutionLedger::load(SnapshotFile::disabled()).await;
        let execution = Execution::start("w1");
        let id = execution.id.clone();

        ledger.append(execution).await?;
        let fetched = ledger.get(&id).await?;
        assert_eq!(fetched.status, ExecutionStatus::Running);
        assert!(fetched.logs.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn complete_is_idempotent() -> anyhow::Result<()> {
        let ledger = ExecutionLedger::load(SnapshotFile::disabled()).await;
        let execution = Execution::start("w1");
        let id = execution.id.clone();
        ledger.append(execution).await?;

        let applied = ledger
            .complete(
                &id,
                ExecutionStatus::Success,
                epoch_millis_now(),
                ExecutionLog::info("Execution finished"),
            )
            .await?;
        assert!(applied);

        let first = ledger.get(&id).await?;

        // Second transition attempt must be a no-op.
        let applied = ledger
            .complete(
                &id,
                ExecutionStatus::Failure,
                epoch_millis_now(),
                ExecutionLog::error("late failure"),
            )
            .await?;
        assert!(!applied);

        let second = ledger.get(&id).await?;
        assert_eq!(second.status, ExecutionStatus::Success);
        assert_eq!(second.finished_at, first.finished_at);
        assert_eq!(second.logs.len(), 1);
        assert_eq!(second.logs[0].message, "Execution finished");
        Ok(())
    }

    #[tokio::test]
    async fn complete_rejects_non_terminal_status() -> anyhow::Result<()> {
        let ledger = ExecutionLedger::load(SnapshotFile::disabled()).await;
        let execution = Execution::start("w1");
        let id = execution.id.clone();
        ledger.append(execution).await?;

        let error = ledger
            .complete(
                &id,
                ExecutionStatus::Running,
                epoch_millis_now(),
                ExecutionLog::info("nope"),
            )
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Internal);
        Ok(())
    }

    #[tokio::test]
    async fn list_by_workflow_filters_and_orders() -> anyhow::Result<()> {
        let ledger = ExecutionLedger::load(SnapshotFile::disabled()).await;
        let first = Execution::start("w1");
        let second = Execution::start("w2");
        let third = Execution::start("w1");
        let (first_id, third_id) = (first.id.clone(), third.id.clone());

        ledger.append(first).await?;
        ledger.append(second).await?;
        ledger.append(third).await?;

        let listed = ledger.list_by_workflow("w1").await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first_id);
        assert_eq!(listed[1].id, third_id);
        assert_eq!(ledger.list_all().await.len(), 3);
        assert_eq!(ledger.len().await, 3);
        Ok(())
    }

    #[tokio::test]
    async fn missing_execution_is_not_found() {
        let ledger = ExecutionLedger::load(SnapshotFile::disabled()).await;
        assert_eq!(
            ledger.get("missing").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn survives_a_reload() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let ledger = ExecutionLedger::load(SnapshotFile::new(dir.path(), "executions")).await;
        let execution = Execution::start("w1");
        let id = execution.id.clone();
        ledger.append(execution).await?;
        ledger
            .complete(
                &id,
                ExecutionStatus::Success,
                epoch_millis_now(),
                ExecutionLog::info("Execution finished"),
            )
            .await?;

        let reloaded = ExecutionLedger::load(SnapshotFile::new(dir.path(), "executions")).await;
        let fetched = reloaded.get(&id).await?;
        assert_eq!(fetched.status, ExecutionStatus::Success);
        assert!(fetched.finished_at.is_some());
        assert_eq!(fetched.logs.len(), 1);
        Ok(())
    }
}
