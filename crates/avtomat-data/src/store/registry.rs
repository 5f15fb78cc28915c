//! Workflow definition CRUD.

use std::sync::Arc;

use avtomat_core::{Error, Result, new_record_id};
use tokio::sync::RwLock;

use crate::model::{NewWorkflow, Workflow, WorkflowChanges};
use crate::snapshot::SnapshotFile;

/// Tracing target for registry operations.
const TRACING_TARGET: &str = "avtomat_data::store::registry";

/// The CRUD store of workflow definitions.
///
/// Authorization is the gateway's job; the registry assumes every mutating
/// caller has already been authenticated.
#[derive(Clone)]
pub struct WorkflowRegistry {
    workflows: Arc<RwLock<Vec<Workflow>>>,
    snapshot: SnapshotFile,
}

impl WorkflowRegistry {
    /// Loads the registry from its snapshot; a missing document starts empty.
    pub async fn load(snapshot: SnapshotFile) -> Self {
        let workflows: Vec<Workflow> = snapshot.load().await;
        tracing::debug!(
            target: TRACING_TARGET,
            count = workflows.len(),
            "workflow registry loaded"
        );
        Self {
            workflows: Arc::new(RwLock::new(workflows)),
            snapshot,
        }
    }

    /// Creates a workflow with a fresh id and returns the stored record.
    pub async fn create(&self, new_workflow: NewWorkflow) -> Result<Workflow> {
        let workflow = Workflow {
            id: new_record_id(),
            name: new_workflow.name,
            description: new_workflow.description,
        };

        let mut workflows = self.workflows.write().await;
        workflows.push(workflow.clone());
        self.snapshot.persist(&workflows).await?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %workflow.id,
            "workflow created"
        );

        Ok(workflow)
    }

    /// Returns a snapshot of all workflows in insertion order.
    pub async fn list(&self) -> Vec<Workflow> {
        self.workflows.read().await.clone()
    }

    /// Looks up one workflow by id.
    pub async fn get(&self, id: &str) -> Result<Workflow> {
        let workflows = self.workflows.read().await;
        workflows
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found("workflow"))
    }

    /// Applies a partial update; omitted fields retain their prior value.
    pub async fn update(&self, id: &str, changes: WorkflowChanges) -> Result<Workflow> {
        let mut workflows = self.workflows.write().await;
        let workflow = workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::not_found("workflow"))?;

        changes.apply(workflow);
        let updated = workflow.clone();
        self.snapshot.persist(&workflows).await?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %id,
            "workflow updated"
        );

        Ok(updated)
    }

    /// Removes a workflow. Historical executions are untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let mut workflows = self.workflows.write().await;
        let index = workflows
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| Error::not_found("workflow"))?;

        workflows.remove(index);
        self.snapshot.persist(&workflows).await?;

        tracing::info!(
            target: TRACING_TARGET,
            workflow_id = %id,
            "workflow deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use avtomat_core::ErrorKind;

    use super::*;

    fn named(name: &str) -> NewWorkflow {
        NewWorkflow {
            name: Some(name.to_owned()),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() -> anyhow::Result<()> {
        let registry = WorkflowRegistry::load(SnapshotFile::disabled()).await;

        let created = registry.create(named("A")).await?;
        let fetched = registry.get(&created.id).await?;
        assert_eq!(fetched.name.as_deref(), Some("A"));
        Ok(())
    }

    #[tokio::test]
    async fn update_retains_omitted_fields() -> anyhow::Result<()> {
        let registry = WorkflowRegistry::load(SnapshotFile::disabled()).await;
        let created = registry.create(named("A")).await?;

        let changes = WorkflowChanges {
            name: None,
            description: Some("B".to_owned()),
        };
        let updated = registry.update(&created.id, changes).await?;

        assert_eq!(updated.name.as_deref(), Some("A"));
        assert_eq!(updated.description.as_deref(), Some("B"));
        Ok(())
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() -> anyhow::Result<()> {
        let registry = WorkflowRegistry::load(SnapshotFile::disabled()).await;
        let first = registry.create(named("first")).await?;
        let second = registry.create(named("second")).await?;

        let listed = registry.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let registry = WorkflowRegistry::load(SnapshotFile::disabled()).await;

        assert_eq!(
            registry.get("missing").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            registry
                .update("missing", WorkflowChanges::default())
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            registry.delete("missing").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[tokio::test]
    async fn survives_a_reload() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let registry = WorkflowRegistry::load(SnapshotFile::new(dir.path(), "workflows")).await;
        let created = registry.create(named("persisted")).await?;
        registry.delete(&registry.create(named("removed")).await?.id).await?;

        let reloaded = WorkflowRegistry::load(SnapshotFile::new(dir.path(), "workflows")).await;
        let listed = reloaded.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        Ok(())
    }
}
