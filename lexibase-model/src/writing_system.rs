//! Writing systems: the languages and scripts a project writes in.

use crate::{EntityKind, EntitySnapshot, LexObject, Ordered};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A writing-system tag, e.g. `"en"` or `"seh-fonipa"`.
///
/// Tags key the multilingual containers and identify writing systems across
/// projects; the [`WritingSystem`] entity's UUID only identifies the entity
/// within one project's change log.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WritingSystemId(String);

impl WritingSystemId {
    /// Creates a tag from a language-tag string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WritingSystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WritingSystemId {
    fn from(tag: &str) -> Self {
        Self(tag.to_owned())
    }
}

impl From<String> for WritingSystemId {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Whether a writing system records the language under study or the
/// language of analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WritingSystemKind {
    Vernacular,
    Analysis,
}

/// A writing system configured for the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSystem {
    pub id: Uuid,
    pub ws_id: WritingSystemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub font: String,
    /// Characters shown on the on-screen keyboard for this script.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemplars: Vec<String>,
    #[serde(rename = "type")]
    pub kind: WritingSystemKind,
    #[serde(default)]
    pub order: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl WritingSystem {
    /// Creates a writing system with empty display fields.
    #[must_use]
    pub fn new(id: Uuid, ws_id: WritingSystemId, kind: WritingSystemKind) -> Self {
        Self {
            id,
            ws_id,
            name: String::new(),
            abbreviation: String::new(),
            font: String::new(),
            exemplars: Vec::new(),
            kind,
            order: 0.0,
            deleted_at: None,
        }
    }
}

impl LexObject for WritingSystem {
    const KIND: EntityKind = EntityKind::WritingSystem;

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
        EntitySnapshot::WritingSystem(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::WritingSystem(ws) => Some(ws),
            _ => None,
        }
    }
}

impl Ordered for WritingSystem {
    fn order(&self) -> f64 {
        self.order
    }

    fn set_order(&mut self, order: f64) {
        self.order = order;
    }
}
