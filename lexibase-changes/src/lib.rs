//! Change types for Lexibase.
//!
//! Every mutation to dictionary data is a value of one change type; entity
//! state is only ever derived by folding an entity's changes in causal
//! order. This crate defines:
//!
//! - The change contracts ([`LexChange`], [`CreateChange`], [`EditChange`])
//! - The concrete changes, from [`CreateEntryChange`] to
//!   [`JsonPatchChange`]
//! - [`Change`]: the closed, exhaustively-matched union the commit log
//!   stores and the replay framework folds
//! - [`ChangeContext`]: the causally consistent view a change dereferences
//!   other entities through
//!
//! Changes merge without locks. Each change type is idempotent and commutes
//! with the concurrent changes it can race with:
//! - reference lists are id-keyed sets with a tombstone guard on add
//! - referential fields re-resolve through the context at apply time
//! - list positions are fractional `f64` keys, ties broken by UUID
//! - deletion is a tombstone timestamp, never a row removal
//!
//! Replay may deliver a change more than once and in any causally
//! consistent order; the guarantees above are what make that safe.

mod change;
mod context;
mod create;
mod delete;
mod edit;
mod error;
mod order;
mod patch;
mod view;

pub use change::{Change, CreateChange, EditChange, LexChange};
pub use context::{ChangeContext, mock};
pub use create::{
    CreateComplexFormTypeChange, CreateEntryChange, CreateExampleSentenceChange,
    CreatePartOfSpeechChange, CreatePublicationChange, CreateSemanticDomainChange,
    CreateSenseChange, CreateWritingSystemChange,
};
pub use delete::DeleteChange;
pub use edit::{
    AddComplexFormTypeChange, AddPublicationChange, AddSemanticDomainChange,
    RemoveComplexFormTypeChange, RemovePublicationChange, RemoveSemanticDomainChange,
    ReplacePublicationChange, ReplaceSemanticDomainChange, SetPartOfSpeechChange,
};
pub use error::{ApplyError, ApplyResult, PatchError, PatchResult};
pub use order::{SetOrderChange, sibling_order};
pub use patch::{JsonPatchChange, LexPatch, PatchOp};
pub use view::{CreateCustomViewChange, EditCustomViewChange};
