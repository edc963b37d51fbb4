//! Error types for the sync boundary.

use lexibase_changes::{ApplyError, PatchError};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during an import or sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The legacy store failed to read or write.
    #[error("legacy store error: {0}")]
    LegacyStore(String),

    /// The commit path rejected an append.
    #[error("change sink error: {0}")]
    ChangeSink(String),

    /// The snapshot marker failed to load or persist.
    #[error("snapshot store error: {0}")]
    SnapshotStore(String),

    /// A change failed to fold while appending.
    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),

    /// The diff produced a patch the log would reject.
    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A sync pass was requested before the first import.
    #[error("no last-synced snapshot; run an import pass first")]
    NotImported,

    /// An import pass was requested on an already-imported project.
    #[error("project already imported; run a sync pass instead")]
    AlreadyImported,
}
