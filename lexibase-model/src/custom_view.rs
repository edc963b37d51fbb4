//! Per-user view configurations.

use crate::{EntityKind, EntitySnapshot, LexObject, WritingSystemId};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The built-in view a custom view derives its defaults from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewBase {
    #[default]
    Lite,
    Classic,
}

/// One field toggle in a view configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewField {
    pub field_id: String,
}

impl ViewField {
    #[must_use]
    pub fn new(field_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
        }
    }
}

/// A saved view configuration: which fields and writing systems to show.
///
/// Views are single-owner configuration, not collaboratively merged data;
/// edits replace the whole value, last writer wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomView {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base: ViewBase,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry_fields: Vec<ViewField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sense_fields: Vec<ViewField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_fields: Vec<ViewField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vernacular: Vec<WritingSystemId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analysis: Vec<WritingSystemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl CustomView {
    /// Creates an empty view derived from the default base.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            base: ViewBase::default(),
            entry_fields: Vec::new(),
            sense_fields: Vec::new(),
            example_fields: Vec::new(),
            vernacular: Vec::new(),
            analysis: Vec::new(),
            deleted_at: None,
        }
    }
}

impl LexObject for CustomView {
    const KIND: EntityKind = EntityKind::CustomView;

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
        // Writing systems are referenced by tag here, not by entity UUID.
        Vec::new()
    }

    fn remove_reference(&mut self, _id: Uuid, _commit: &CommitMeta) {}

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::CustomView(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::CustomView(view) => Some(view),
            _ => None,
        }
    }
}
