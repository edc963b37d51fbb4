//! Senses: the meanings of an entry.

use crate::{
    EntityKind, EntitySnapshot, ExampleSentence, LexObject, MultiString, Ordered,
    RichMultiString, SemanticDomain,
};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One meaning of an entry.
///
/// A sense is owned by its entry: deleting the entry tombstones the sense
/// through reference scrubbing, and a sense created under an already
/// tombstoned entry is born tombstoned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    pub id: Uuid,
    pub entry_id: Uuid,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub definition: RichMultiString,
    #[serde(default)]
    pub gloss: MultiString,
    /// Grammatical-info reference; cleared when the target is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech_id: Option<Uuid>,
    /// Id-keyed set of semantic-domain references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub semantic_domains: Vec<SemanticDomain>,
    /// Projection of the sense's examples, like `Entry::senses`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub example_sentences: Vec<ExampleSentence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl Sense {
    /// Creates an empty sense owned by `entry_id`.
    #[must_use]
    pub fn new(id: Uuid, entry_id: Uuid) -> Self {
        Self {
            id,
            entry_id,
            order: 0.0,
            definition: RichMultiString::new(),
            gloss: MultiString::new(),
            part_of_speech_id: None,
            semantic_domains: Vec::new(),
            example_sentences: Vec::new(),
            deleted_at: None,
        }
    }
}

impl LexObject for Sense {
    const KIND: EntityKind = EntityKind::Sense;

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
        let mut refs = vec![self.entry_id];
        refs.extend(self.part_of_speech_id);
        refs.extend(self.semantic_domains.iter().map(|d| d.id));
        refs
    }

    fn remove_reference(&mut self, id: Uuid, commit: &CommitMeta) {
        if self.entry_id == id {
            // The owning entry is gone; the sense goes with it.
            self.deleted_at = Some(commit.timestamp);
        }
        if self.part_of_speech_id == Some(id) {
            self.part_of_speech_id = None;
        }
        self.semantic_domains.retain(|d| d.id != id);
    }

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::Sense(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::Sense(sense) => Some(sense),
            _ => None,
        }
    }
}

impl Ordered for Sense {
    fn order(&self) -> f64 {
        self.order
    }

    fn set_order(&mut self, order: f64) {
        self.order = order;
    }
}
