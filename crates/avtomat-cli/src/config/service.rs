//! Service-layer configuration flags.

use std::path::PathBuf;
use std::time::Duration;

use avtomat_server::service::{DEFAULT_AUTH_SECRET, ServiceConfig};
use clap::Args;

use crate::TRACING_TARGET_CONFIG;

/// Storage, authentication, and engine options.
///
/// Environment variables:
/// - `DATA_DIR` - Snapshot directory; unset keeps everything in memory
/// - `JWT_SECRET` - Shared secret for signing bearer tokens
/// - `COMPLETION_DELAY_MS` - Simulated work duration per execution
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceOptions {
    /// Directory for the JSON snapshot files.
    #[arg(long, env = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Shared secret for signing and verifying bearer tokens.
    #[arg(long, env = "JWT_SECRET", default_value = DEFAULT_AUTH_SECRET, hide_default_value = true)]
    pub auth_secret: String,

    /// Milliseconds each triggered execution takes to complete.
    #[arg(long, env = "COMPLETION_DELAY_MS", default_value_t = 1000)]
    pub completion_delay_ms: u64,
}

impl ServiceOptions {
    /// Converts the parsed flags into the service layer's config.
    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_dir: self.data_dir.clone(),
            auth_secret: self.auth_secret.clone(),
            completion_delay: Duration::from_millis(self.completion_delay_ms),
        }
    }

    /// Logs service configuration (no secrets).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            data_dir = ?self.data_dir,
            persistence = self.data_dir.is_some(),
            default_auth_secret = self.auth_secret == DEFAULT_AUTH_SECRET,
            completion_delay_ms = self.completion_delay_ms,
            "Service configured successfully"
        );

        if self.auth_secret == DEFAULT_AUTH_SECRET {
            tracing::warn!(
                target: TRACING_TARGET_CONFIG,
                "Using the default auth secret. Set JWT_SECRET for any shared deployment."
            );
        }
    }
}
