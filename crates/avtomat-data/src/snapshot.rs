//! Wholesale JSON snapshots, one document per collection.
//!
//! The on-disk layout mirrors what the stores hold in memory: a single JSON
//! array per collection, loaded at startup and rewritten in full after every
//! mutation. A missing or unreadable file is treated as an empty collection;
//! write failures surface as storage errors instead of being dropped.

use std::path::{Path, PathBuf};

use avtomat_core::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Tracing target for snapshot persistence.
const TRACING_TARGET: &str = "avtomat_data::snapshot";

/// Handle to one collection's snapshot document.
///
/// A disabled handle (no data directory configured) loads empty and persists
/// as a no-op, which keeps the stores oblivious to whether persistence is on.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: Option<PathBuf>,
}

impl SnapshotFile {
    /// Creates a handle for `<dir>/<collection>.json`.
    pub fn new(dir: impl AsRef<Path>, collection: &str) -> Self {
        Self {
            path: Some(dir.as_ref().join(format!("{collection}.json"))),
        }
    }

    /// Creates a handle that never touches the filesystem.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// Loads the full collection from disk.
    ///
    /// A missing, unreadable, or unparsable document yields an empty
    /// collection; the reader must accept anything [`persist`] wrote.
    ///
    /// [`persist`]: Self::persist
    pub async fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    "snapshot not found, starting empty"
                );
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    error = %error,
                    "failed to read snapshot, starting empty"
                );
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    path = %path.display(),
                    error = %error,
                    "failed to parse snapshot, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Rewrites the collection document wholesale.
    ///
    /// Writes to a sibling temp file and renames it into place so readers
    /// never observe a partially-written document.
    pub async fn persist<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| storage_error(path, "create snapshot directory", e))?;
        }

        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| Error::storage("serialize snapshot").with_source(e))?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| storage_error(&tmp_path, "write snapshot", e))?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| storage_error(path, "replace snapshot", e))?;

        tracing::trace!(
            target: TRACING_TARGET,
            path = %path.display(),
            bytes = bytes.len(),
            "snapshot persisted"
        );

        Ok(())
    }
}

fn storage_error(path: &Path, action: &str, source: std::io::Error) -> Error {
    Error::storage(format!("{action} at {}", path.display())).with_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Workflow;

    #[tokio::test]
    async fn round_trips_a_collection() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let snapshot = SnapshotFile::new(dir.path(), "workflows");

        let records = vec![Workflow {
            id: "w1".to_owned(),
            name: Some("A".to_owned()),
            description: None,
        }];
        snapshot.persist(&records).await?;

        let loaded: Vec<Workflow> = snapshot.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "w1");
        assert_eq!(loaded[0].name.as_deref(), Some("A"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SnapshotFile::new(dir.path(), "users");
        let loaded: Vec<Workflow> = snapshot.load().await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("executions.json");
        tokio::fs::write(&path, b"not json").await?;

        let snapshot = SnapshotFile::new(dir.path(), "executions");
        let loaded: Vec<Workflow> = snapshot.load().await;
        assert!(loaded.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn disabled_handle_is_a_no_op() -> anyhow::Result<()> {
        let snapshot = SnapshotFile::disabled();
        snapshot.persist::<Workflow>(&[]).await?;
        let loaded: Vec<Workflow> = snapshot.load().await;
        assert!(loaded.is_empty());
        Ok(())
    }
}
