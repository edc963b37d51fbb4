//! Example sentences attached to senses.

use crate::{EntityKind, EntitySnapshot, LexObject, Ordered, RichMultiString, RichString};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A usage example for a sense, owned the same way a sense is owned by its
/// entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSentence {
    pub id: Uuid,
    pub sense_id: Uuid,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub sentence: RichMultiString,
    #[serde(default)]
    pub translation: RichMultiString,
    /// Source citation, e.g. the text the example was collected from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<RichString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl ExampleSentence {
    /// Creates an empty example owned by `sense_id`.
    #[must_use]
    pub fn new(id: Uuid, sense_id: Uuid) -> Self {
        Self {
            id,
            sense_id,
            order: 0.0,
            sentence: RichMultiString::new(),
            translation: RichMultiString::new(),
            reference: None,
            deleted_at: None,
        }
    }
}

impl LexObject for ExampleSentence {
    const KIND: EntityKind = EntityKind::ExampleSentence;

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
        vec![self.sense_id]
    }

    fn remove_reference(&mut self, id: Uuid, commit: &CommitMeta) {
        if self.sense_id == id {
            self.deleted_at = Some(commit.timestamp);
        }
    }

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::ExampleSentence(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::ExampleSentence(example) => Some(example),
            _ => None,
        }
    }
}

impl Ordered for ExampleSentence {
    fn order(&self) -> f64 {
        self.order
    }

    fn set_order(&mut self, order: f64) {
        self.order = order;
    }
}
