#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod model;
mod snapshot;
pub mod store;

pub use avtomat_core::{Error, ErrorKind, Result};
pub use snapshot::SnapshotFile;
pub use store::{CredentialStore, ExecutionLedger, WorkflowRegistry};
