//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig    # Host, port, shutdown
//! └── service: ServiceOptions # Snapshot dir, auth secret, engine delay
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

mod server;
mod service;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use server::ServerConfig;
pub use service::ServiceOptions;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_SERVER_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "avtomat")]
#[command(about = "Avtomat workflow automation server")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// Storage, authentication, and engine configuration.
    #[clap(flatten)]
    pub service: ServiceOptions,
}

impl Cli {
    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        Ok(())
    }

    /// Logs configuration at startup (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.server.log();
        self.service.log();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            "Build information"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Startup is the single validation gate; `server::serve` trusts what it
    // is handed.
    #[test]
    fn validate_gates_bad_server_config_at_startup() {
        let cli = Cli::try_parse_from(["avtomat", "--port", "80"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["avtomat"]).unwrap();
        assert!(cli.validate().is_ok());
    }
}
