//! Execution records and their lifecycle types.

use avtomat_core::{epoch_millis_now, new_record_id};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, IntoStaticStr};

/// Lifecycle state of an execution.
///
/// `Running` is the only initial state; `Success` and `Failure` are terminal
/// and absorb any further transition attempts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExecutionStatus {
    /// The completion task has been scheduled but has not finished.
    Running,
    /// The completion task finished without error.
    Success,
    /// The completion task reported an error.
    Failure,
}

impl ExecutionStatus {
    /// Returns `true` for terminal states.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Severity tag of a log line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    /// Informational message.
    Info,
    /// Something unexpected but non-fatal.
    Warn,
    /// The execution failed.
    Error,
}

/// One line of execution output; immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLog {
    /// Severity tag.
    pub level: LogLevel,
    /// Free-text message.
    pub message: String,
}

impl ExecutionLog {
    /// Creates an info-level log line.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    /// Creates an error-level log line.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// One run instance of a workflow.
///
/// Created when a trigger is accepted; mutated exactly once more by the
/// asynchronous completion step; never deleted. Timestamps are epoch
/// milliseconds, `finishedAt` is absent while running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    /// Opaque unique identifier.
    pub id: String,
    /// Owning workflow id; a lookup relation, never validated after creation.
    pub workflow_id: String,
    /// Lifecycle state.
    pub status: ExecutionStatus,
    /// When the trigger was accepted, in epoch milliseconds.
    pub started_at: i64,
    /// When the completion task finished, in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<i64>,
    /// Ordered, append-only log lines.
    pub logs: Vec<ExecutionLog>,
}

impl Execution {
    /// Creates a fresh `running` record for the given workflow.
    pub fn start(workflow_id: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            workflow_id: workflow_id.into(),
            status: ExecutionStatus::Running,
            started_at: epoch_millis_now(),
            finished_at: None,
            logs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_execution_is_running() {
        let execution = Execution::start("w1");
        assert_eq!(execution.status, ExecutionStatus::Running);
        assert!(execution.finished_at.is_none());
        assert!(execution.logs.is_empty());
        assert!(execution.started_at > 0);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ExecutionStatus::Success).unwrap();
        assert_eq!(json, r#""success""#);
        assert!(ExecutionStatus::Failure.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
    }

    #[test]
    fn finished_at_is_omitted_while_running() {
        let execution = Execution::start("w1");
        let json = serde_json::to_value(&execution).unwrap();
        assert!(json.get("finishedAt").is_none());
        assert_eq!(json["status"], "running");
        assert_eq!(json["workflowId"], "w1");
    }
}
