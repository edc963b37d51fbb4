//! Entity model for Lexibase.
//!
//! Defines the snapshot side of the change-sourced data model:
//! - Multilingual value containers ([`MultiString`], [`RichMultiString`])
//! - The nine entity types, from [`Entry`] down to [`Publication`]
//! - The [`LexObject`] contract every entity implements (identity,
//!   tombstone, cross-entity references)
//! - [`EntitySnapshot`], the tagged union the commit log stores and the
//!   query context returns
//!
//! Entities here are plain data. All mutation goes through change types in
//! `lexibase-changes`; nothing in this crate enforces merge rules.

mod custom_view;
mod entry;
mod example_sentence;
mod multi_string;
mod object;
mod rich_text;
mod sense;
mod snapshot;
mod taxonomy;
mod writing_system;

pub use custom_view::{CustomView, ViewBase, ViewField};
pub use entry::Entry;
pub use example_sentence::ExampleSentence;
pub use multi_string::MultiString;
pub use object::{EntityKind, LexObject, Ordered};
pub use rich_text::{RichMultiString, RichSpan, RichString};
pub use sense::Sense;
pub use snapshot::EntitySnapshot;
pub use taxonomy::{ComplexFormType, PartOfSpeech, Publication, SemanticDomain};
pub use writing_system::{WritingSystem, WritingSystemId, WritingSystemKind};
