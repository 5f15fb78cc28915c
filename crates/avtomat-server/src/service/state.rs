//! Application state and dependency injection.

use std::sync::Arc;

use avtomat_data::{CredentialStore, ExecutionLedger, SnapshotFile, WorkflowRegistry};
use avtomat_engine::{CompletionStep, ExecutionEngine, FixedDelayStep};

use crate::service::{ServiceConfig, TokenKeys};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    credentials: CredentialStore,
    registry: WorkflowRegistry,
    ledger: ExecutionLedger,
    engine: ExecutionEngine,
    token_keys: TokenKeys,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Loads every collection from its snapshot file (or starts it empty when
    /// no data directory is configured) and wires the engine over them.
    pub async fn from_config(config: &ServiceConfig) -> Self {
        let step = Arc::new(FixedDelayStep::new(config.completion_delay));
        Self::from_config_with_step(config, step).await
    }

    /// Same as [`Self::from_config`], with a caller-provided completion step.
    pub async fn from_config_with_step(
        config: &ServiceConfig,
        step: Arc<dyn CompletionStep>,
    ) -> Self {
        let snapshot = |collection: &str| match &config.data_dir {
            Some(dir) => SnapshotFile::new(dir, collection),
            None => SnapshotFile::disabled(),
        };

        let credentials = CredentialStore::load(snapshot("users")).await;
        let registry = WorkflowRegistry::load(snapshot("workflows")).await;
        let ledger = ExecutionLedger::load(snapshot("executions")).await;
        let engine = ExecutionEngine::new(registry.clone(), ledger.clone(), step);

        Self {
            credentials,
            registry,
            ledger,
            engine,
            token_keys: TokenKeys::from_secret(&config.auth_secret),
        }
    }

    /// Drains in-flight execution completions before the process exits.
    pub async fn shutdown(&self) {
        self.engine.shutdown().await;
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(credentials: CredentialStore);
impl_di!(registry: WorkflowRegistry);
impl_di!(ledger: ExecutionLedger);
impl_di!(engine: ExecutionEngine);
impl_di!(token_keys: TokenKeys);
