//! Domain records stored by the avtomat backend.

mod execution;
mod user;
mod workflow;

pub use execution::{Execution, ExecutionLog, ExecutionStatus, LogLevel};
pub use user::{NewUser, User, UserProfile};
pub use workflow::{NewWorkflow, Workflow, WorkflowChanges};
