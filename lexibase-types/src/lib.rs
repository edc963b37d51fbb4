//! Core type definitions for Lexibase.
//!
//! This crate defines the fundamental, domain-agnostic types shared by the
//! data model and the sync boundary:
//! - Commit and client identifiers (UUID)
//! - Hybrid Logical Clock timestamps
//! - Commit metadata handed to every change application
//!
//! Everything lexicographic (entries, senses, writing systems, change types)
//! belongs in `lexibase-model` and `lexibase-changes`, not here.

mod commit;
mod ids;
mod timestamp;

pub use commit::CommitMeta;
pub use ids::{ClientId, CommitId};
pub use timestamp::HybridTimestamp;
