//! Shared-mutable collections behind per-collection locks.
//!
//! Each store owns one collection, one `RwLock`, and one snapshot handle.
//! Mutators hold the write guard for the whole read-modify-write sequence,
//! snapshot rewrite included, so readers never observe a torn record and
//! persisted documents are serialized too.

mod credentials;
mod ledger;
mod registry;

pub use credentials::CredentialStore;
pub use ledger::ExecutionLedger;
pub use registry::WorkflowRegistry;
