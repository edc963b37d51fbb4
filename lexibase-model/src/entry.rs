//! Dictionary entries.

use crate::{
    ComplexFormType, EntityKind, EntitySnapshot, LexObject, MultiString, Publication,
    RichMultiString, Sense,
};
use lexibase_types::{CommitMeta, HybridTimestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dictionary entry: one headword with its senses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Uuid,
    /// The headword as written in each vernacular writing system.
    #[serde(default)]
    pub lexeme_form: MultiString,
    /// Citation form shown in print, when it differs from the lexeme form.
    #[serde(default)]
    pub citation_form: MultiString,
    #[serde(default)]
    pub literal_meaning: RichMultiString,
    #[serde(default)]
    pub note: RichMultiString,
    /// Senses are change-tracked objects of their own; this list is the
    /// projection assembled for queries and sync, in `(order, id)` order.
    /// The entry's own change stream never touches it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub senses: Vec<Sense>,
    /// Id-keyed set of complex-form type references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub complex_form_types: Vec<ComplexFormType>,
    /// Id-keyed set of publications this entry appears in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publish_in: Vec<Publication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<HybridTimestamp>,
}

impl Entry {
    /// Creates an empty entry.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            lexeme_form: MultiString::new(),
            citation_form: MultiString::new(),
            literal_meaning: RichMultiString::new(),
            note: RichMultiString::new(),
            senses: Vec::new(),
            complex_form_types: Vec::new(),
            publish_in: Vec::new(),
            deleted_at: None,
        }
    }
}

impl LexObject for Entry {
    const KIND: EntityKind = EntityKind::Entry;

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
        self.publish_in
            .iter()
            .map(|p| p.id)
            .chain(self.complex_form_types.iter().map(|t| t.id))
            .collect()
    }

    fn remove_reference(&mut self, id: Uuid, _commit: &CommitMeta) {
        self.publish_in.retain(|p| p.id != id);
        self.complex_form_types.retain(|t| t.id != id);
    }

    fn into_snapshot(self) -> EntitySnapshot {
        EntitySnapshot::Entry(self)
    }

    fn from_snapshot(snapshot: EntitySnapshot) -> Option<Self> {
        match snapshot {
            EntitySnapshot::Entry(entry) => Some(entry),
            _ => None,
        }
    }
}
