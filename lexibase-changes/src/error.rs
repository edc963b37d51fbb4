//! Error types for change construction and application.

use lexibase_model::EntityKind;
use thiserror::Error;
use uuid::Uuid;

/// Result type for change application.
pub type ApplyResult<T> = Result<T, ApplyError>;

/// Result type for patch construction.
pub type PatchResult<T> = Result<T, PatchError>;

/// Errors raised by [`crate::Change::apply`].
///
/// These indicate misuse by the replay framework (a causal-delivery
/// violation), never a data conflict. Convergence conflicts are resolved
/// inside each change's apply logic and cannot fail.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// An edit was delivered for an entity with no reconstructed state.
    /// Causal delivery guarantees the create is replayed first.
    #[error("no state for {kind} {id}; edit delivered before its create")]
    MissingEntity { id: Uuid, kind: EntityKind },

    /// The snapshot handed in wraps a different entity kind than the
    /// change targets.
    #[error("change targets {expected} {id} but the snapshot is a {found}")]
    KindMismatch {
        id: Uuid,
        expected: EntityKind,
        found: EntityKind,
    },
}

/// Errors raised while constructing a structural patch.
///
/// Raised by [`crate::LexPatch::new`] and by deserialization, before the
/// change can enter the commit log. Applying an accepted patch never fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    /// A path segment begins with an ASCII digit, i.e. addresses a list
    /// position. List positions are not stable under concurrent edits;
    /// list members are edited through their own id-addressed changes.
    #[error("patch path {path:?} addresses a list position; edit list items by id")]
    IndexedPath { path: String },

    /// Empty path or empty path segment.
    #[error("malformed patch path {path:?}")]
    MalformedPath { path: String },
}
