//! The body of a completion task.

use std::time::Duration;

use async_trait::async_trait;
use avtomat_core::BoxedError;
use avtomat_data::model::Execution;

/// Work performed between a trigger and the terminal transition.
///
/// The engine maps `Ok` to `success` and `Err` to `failure`; swapping the
/// step out is how real step-graph execution would replace the placeholder,
/// and how tests reach the `failure` state.
#[async_trait]
pub trait CompletionStep: Send + Sync {
    /// Runs the work for one execution.
    async fn run(&self, execution: &Execution) -> Result<(), BoxedError>;
}

/// Placeholder step: waits a fixed delay to simulate work, then succeeds.
#[derive(Debug, Clone)]
pub struct FixedDelayStep {
    delay: Duration,
}

impl FixedDelayStep {
    /// Delay used when none is configured.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    /// Creates a step with the given simulated work duration.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelayStep {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl CompletionStep for FixedDelayStep {
    async fn run(&self, _execution: &Execution) -> Result<(), BoxedError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
