//! Workflow definition records.

use serde::{Deserialize, Serialize};

/// A named automation unit that can be triggered.
///
/// No owner is tracked: any authenticated user may mutate any workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Opaque unique identifier.
    pub id: String,
    /// Optional human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for creating a workflow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    /// Optional human-readable name.
    pub name: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Partial update for a workflow; omitted fields retain their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowChanges {
    /// New name, if provided.
    pub name: Option<String>,
    /// New description, if provided.
    pub description: Option<String>,
}

impl WorkflowChanges {
    /// Applies the provided fields onto an existing record.
    pub fn apply(self, workflow: &mut Workflow) {
        if let Some(name) = self.name {
            workflow.name = Some(name);
        }
        if let Some(description) = self.description {
            workflow.description = Some(description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_retain_omitted_fields() {
        let mut workflow = Workflow {
            id: "w1".to_owned(),
            name: Some("A".to_owned()),
            description: None,
        };

        let changes = WorkflowChanges {
            name: None,
            description: Some("B".to_owned()),
        };
        changes.apply(&mut workflow);

        assert_eq!(workflow.name.as_deref(), Some("A"));
        assert_eq!(workflow.description.as_deref(), Some("B"));
    }

    #[test]
    fn absent_fields_are_omitted_on_the_wire() {
        let workflow = Workflow {
            id: "w1".to_owned(),
            name: None,
            description: None,
        };

        let json = serde_json::to_value(&workflow).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("description").is_none());
    }
}
