//! Legacy-store sync boundary for Lexibase.
//!
//! Projects usually predate their change log: the data lives in a legacy
//! lexicon tool that keeps editing it. This crate keeps one project's change
//! log and one legacy store convergent without either side replaying the
//! other's history:
//!
//! - [`ProjectSnapshot`]: a whole project's live state in one comparable
//!   value, children attached and ordered
//! - [`LegacyStore`], [`ChangeSink`], [`SnapshotStore`]: the three
//!   boundaries a host wires in
//! - [`diff`]: turns the difference of two snapshots into ordinary changes
//! - [`SyncService`]: the import and sync passes
//!
//! The first pass is an import: the legacy project is diffed against the
//! empty project and copied into the log wholesale. Every later pass is
//! differential against the last-synced marker, so a field edited on one
//! side since the last pass moves to the other side and untouched fields
//! never generate traffic.

pub mod diff;
mod error;
mod service;
mod snapshot;
mod store;

pub use error::{SyncError, SyncResult};
pub use service::{SyncOptions, SyncService, SyncSummary};
pub use snapshot::ProjectSnapshot;
pub use store::{ChangeSink, LegacyStore, SnapshotStore, mock};
