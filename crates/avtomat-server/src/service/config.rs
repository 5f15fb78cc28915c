//! Runtime configuration for the service layer.

use std::path::PathBuf;
use std::time::Duration;

use avtomat_engine::FixedDelayStep;

/// Shared secret used when none is configured.
///
/// Fine for local development; deployments are expected to override it.
pub const DEFAULT_AUTH_SECRET: &str = "dev-secret";

/// Settings consumed by [`ServiceState::from_config`].
///
/// [`ServiceState::from_config`]: crate::service::ServiceState::from_config
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory holding the JSON snapshot files. `None` keeps every
    /// collection in memory only, which is what tests use.
    pub data_dir: Option<PathBuf>,
    /// Shared secret for signing and verifying bearer tokens.
    pub auth_secret: String,
    /// Simulated work duration for each triggered execution.
    pub completion_delay: Duration,
}

impl ServiceConfig {
    /// Returns a config persisting snapshots under the given directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::default()
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            auth_secret: DEFAULT_AUTH_SECRET.to_owned(),
            completion_delay: FixedDelayStep::DEFAULT_DELAY,
        }
    }
}
