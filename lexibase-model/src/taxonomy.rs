//! Shared reference lists: parts of speech, semantic domains, complex-form
//! types, and publications.
//!
//! These are the entities other objects point at by UUID. They carry a
//! tombstone like everything else; referential integrity on deletion is the
//! replay framework's job (see [`LexObject::remove_reference`]).

use crate::{EntityKind, EntitySnapshot, LexObject, MultiString};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A grammatical category (noun, verb, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfSpeech {
    pub id: Uuid,
    #[serde(default)]
    pub name: MultiString,
    /// True for categories seeded from the standard list rather than
    /// created by a user.
    #[serde(default)]
    pub predefined: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl PartOfSpeech {
    #[must_use]
    pub fn new(id: Uuid, name: MultiString) -> Self {
        Self {
            id,
            name,
            predefined: false,
            deleted_at: None,
        }
    }
}

impl LexObject for PartOfSpeech {
    const KIND: EntityKind = EntityKind::PartOfSpeech;

    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<HybridTimestamp> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<HybridTimestamp>) {
        self.deleted_at = at;
    }

    fn references(&self) -> Vec<Uuid> {
        Vec::new()
    }

    fn remove_reference(&mut self, _id: Uuid, _commit: &CommitMeta) {}

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::PartOfSpeech(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::PartOfSpeech(pos) => Some(pos),
            _ => None,
        }
    }
}

/// A semantic domain from a classification scheme, e.g. `"1.2 Sky"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticDomain {
    pub id: Uuid,
    #[serde(default)]
    pub name: MultiString,
    /// Position in the classification scheme, e.g. `"1.2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub predefined: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl SemanticDomain {
    #[must_use]
    pub fn new(id: Uuid, name: MultiString) -> Self {
        Self {
            id,
            name,
            code: None,
            predefined: false,
            deleted_at: None,
        }
    }
}

impl LexObject for SemanticDomain {
    const KIND: EntityKind = EntityKind::SemanticDomain;

    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<HybridTimestamp> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<HybridTimestamp>) {
        self.deleted_at = at;
    }

    fn references(&self) -> Vec<Uuid> {
        Vec::new()
    }

    fn remove_reference(&mut self, _id: Uuid, _commit: &CommitMeta) {}

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::SemanticDomain(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::SemanticDomain(domain) => Some(domain),
            _ => None,
        }
    }
}

/// A type of complex form (compound, phrase, contraction, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexFormType {
    pub id: Uuid,
    #[serde(default)]
    pub name: MultiString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl ComplexFormType {
    #[must_use]
    pub fn new(id: Uuid, name: MultiString) -> Self {
        Self {
            id,
            name,
            deleted_at: None,
        }
    }
}

impl LexObject for ComplexFormType {
    const KIND: EntityKind = EntityKind::ComplexFormType;

    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<HybridTimestamp> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<HybridTimestamp>) {
        self.deleted_at = at;
    }

    fn references(&self) -> Vec<Uuid> {
        Vec::new()
    }

    fn remove_reference(&mut self, _id: Uuid, _commit: &CommitMeta) {}

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::ComplexFormType(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::ComplexFormType(cft) => Some(cft),
            _ => None,
        }
    }
}

/// A publication entries can be included in, e.g. the main dictionary
/// versus a school edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub id: Uuid,
    #[serde(default)]
    pub name: MultiString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl Publication {
    #[must_use]
    pub fn new(id: Uuid, name: MultiString) -> Self {
        Self {
            id,
            name,
            deleted_at: None,
        }
    }
}

impl LexObject for Publication {
    const KIND: EntityKind = EntityKind::Publication;

    fn id(&self) -> Uuid {
        self.id
    }

    fn deleted_at(&self) -> Option<HybridTimestamp> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, at: Option<HybridTimestamp>) {
        self.deleted_at = at;
    }

    fn references(&self) -> Vec<Uuid> {
        Vec::new()
    }

    fn remove_reference(&mut self, _id: Uuid, _commit: &CommitMeta) {}

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::Publication(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::Publication(publication) => Some(publication),
            _ => None,
        }
    }
}
