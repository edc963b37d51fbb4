//! The contract every change-tracked entity implements.

use crate::EntitySnapshot;
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Discriminant for the nine entity types.
///
/// The string form is stable: it appears in snapshot tags and in the type
/// tags of entity-generic changes, so renaming a variant's string is a wire
/// format break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Entry,
    Sense,
    ExampleSentence,
    WritingSystem,
    PartOfSpeech,
    SemanticDomain,
    ComplexFormType,
    Publication,
    CustomView,
}

impl EntityKind {
    /// The stable wire name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Sense => "sense",
            Self::ExampleSentence => "exampleSentence",
            Self::WritingSystem => "writingSystem",
            Self::PartOfSpeech => "partOfSpeech",
            Self::SemanticDomain => "semanticDomain",
            Self::ComplexFormType => "complexFormType",
            Self::Publication => "publication",
            Self::CustomView => "customView",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot contract shared by every entity.
///
/// Deletion is always a tombstone: `deleted_at` carries the timestamp of the
/// deleting commit and the row is never physically removed. When an entity
/// is deleted, the replay framework calls [`LexObject::remove_reference`] on
/// every entity that referenced it; removing an owner reference tombstones
/// the dependent entity, removing any other reference just clears it.
pub trait LexObject: Sized {
    /// The kind discriminant for this entity type.
    const KIND: EntityKind;

    /// The entity's UUID.
    fn id(&self) -> Uuid;

    /// Tombstone timestamp, if the entity has been deleted.
    fn deleted_at(&self) -> Option<HybridTimestamp>;

    /// Sets or clears the tombstone.
    fn set_deleted_at(&mut self, at: Option<HybridTimestamp>);

    /// Returns true if the entity is tombstoned.
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// All entity UUIDs this entity refers to (owner and cross references).
    fn references(&self) -> Vec<Uuid>;

    /// Scrubs a reference to a deleted entity. `commit` is the deleting
    /// commit; owner references cascade its timestamp into `deleted_at`.
    fn remove_reference(&mut self, id: Uuid, commit: &CommitMeta);

    /// Wraps the entity in the tagged union stored by the commit log.
    fn into_snapshot(self) -> EntitySnapshot;

    /// Unwraps the tagged union; `None` if the snapshot holds another kind.
    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self>;
}

/// Entities positioned by a fractional order key.
///
/// Keys only ever come from the order-change constructors; display and
/// merge tie-breaking on equal keys falls back to UUID comparison.
pub trait Ordered {
    /// The current order key.
    fn order(&self) -> f64;

    /// Replaces the order key.
    fn set_order(&mut self, order: f64);
}
