//! The tagged union over every entity type.
//!
//! `EntitySnapshot` is what the replay framework stores after each apply and
//! what the query context hands back from `get_current`. The tag names are
//! the stable wire strings from [`EntityKind`]; changing one breaks every
//! serialized snapshot.

use crate::{
    ComplexFormType, CustomView, EntityKind, Entry, ExampleSentence, LexObject, PartOfSpeech,
    Publication, SemanticDomain, Sense, WritingSystem,
};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A snapshot of any entity, tagged by kind.
///
/// Exhaustive over the nine entity types. Code that consumes snapshots
/// matches on this enum directly or unwraps a concrete type via
/// [`LexObject::from_snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "camelCase")]
pub enum EntitySnapshot {
    Entry(Entry),
    Sense(Sense),
    ExampleSentence(ExampleSentence),
    WritingSystem(WritingSystem),
    PartOfSpeech(PartOfSpeech),
    SemanticDomain(SemanticDomain),
    ComplexFormType(ComplexFormType),
    Publication(Publication),
    CustomView(CustomView),
}

/// Expands `$body` once per variant with the inner entity bound to `$entity`.
macro_rules! with_entity {
    ($snapshot:expr, $entity:ident => $body:expr) => {
        match $snapshot {
            EntitySnapshot::Entry($entity) => $body,
            EntitySnapshot::Sense($entity) => $body,
            EntitySnapshot::ExampleSentence($entity) => $body,
            EntitySnapshot::WritingSystem($entity) => $body,
            EntitySnapshot::PartOfSpeech($entity) => $body,
            EntitySnapshot::SemanticDomain($entity) => $body,
            EntitySnapshot::ComplexFormType($entity) => $body,
            EntitySnapshot::Publication($entity) => $body,
            EntitySnapshot::CustomView($entity) => $body,
        }
    };
}

impl EntitySnapshot {
    /// The kind discriminant of the wrapped entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Entry(_) => EntityKind::Entry,
            Self::Sense(_) => EntityKind::Sense,
            Self::ExampleSentence(_) => EntityKind::ExampleSentence,
            Self::WritingSystem(_) => EntityKind::WritingSystem,
            Self::PartOfSpeech(_) => EntityKind::PartOfSpeech,
            Self::SemanticDomain(_) => EntityKind::SemanticDomain,
            Self::ComplexFormType(_) => EntityKind::ComplexFormType,
            Self::Publication(_) => EntityKind::Publication,
            Self::CustomView(_) => EntityKind::CustomView,
        }
    }

    /// The wrapped entity's UUID.
    #[must_use]
    pub fn id(&self) -> Uuid {
        with_entity!(self, entity => entity.id())
    }

    /// Tombstone timestamp, if the wrapped entity has been deleted.
    #[must_use]
    pub fn deleted_at(&self) -> Option<HybridTimestamp> {
        with_entity!(self, entity => entity.deleted_at())
    }

    /// Returns true if the wrapped entity is tombstoned.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Sets or clears the wrapped entity's tombstone.
    pub fn set_deleted_at(&mut self, at: Option<HybridTimestamp>) {
        with_entity!(self, entity => entity.set_deleted_at(at));
    }

    /// All entity UUIDs the wrapped entity refers to.
    #[must_use]
    pub fn references(&self) -> Vec<Uuid> {
        with_entity!(self, entity => entity.references())
    }

    /// Scrubs a reference to a deleted entity, cascading the tombstone when
    /// the reference was an owner.
    pub fn remove_reference(&mut self, id: Uuid, commit: &CommitMeta) {
        with_entity!(self, entity => entity.remove_reference(id, commit));
    }

    /// Unwraps the snapshot into a concrete entity type.
    ///
    /// `None` if the snapshot holds a different kind.
    #[must_use]
    pub fn into_entity<T: LexObject>(self) -> Option<T> {
        T::from_snapshot(self)
    }
}
