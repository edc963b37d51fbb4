//! Set-like and referential edits.
//!
//! The reference lists on entries and senses are id-keyed sets. Add-like
//! changes carry the full referenced value but apply it under a guard: skip
//! when the id is already present, skip when the target is tombstoned as of
//! this commit. With removal id-keyed, adds commute with each other and
//! with removes of other ids, and re-delivery is harmless.

use crate::{ChangeContext, EditChange, LexChange};
use lexibase_model::{ComplexFormType, Entry, Publication, SemanticDomain, Sense};
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Sense: semantic domains ─────────────────────────────────────

/// Adds a semantic domain to a sense's domain set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSemanticDomainChange {
    /// The sense being modified.
    pub entity_id: Uuid,
    pub semantic_domain: SemanticDomain,
}

impl AddSemanticDomainChange {
    #[must_use]
    pub fn new(sense_id: Uuid, semantic_domain: SemanticDomain) -> Self {
        Self {
            entity_id: sense_id,
            semantic_domain,
        }
    }
}

impl LexChange for AddSemanticDomainChange {
    type Entity = Sense;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for AddSemanticDomainChange {
    fn apply_change(&self, sense: &mut Sense, _commit: &CommitMeta, ctx: &dyn ChangeContext) {
        let domain = &self.semantic_domain;
        if ctx.is_deleted(domain.id) {
            return;
        }
        if sense.semantic_domains.iter().any(|d| d.id == domain.id) {
            return;
        }
        sense.semantic_domains.push(domain.clone());
    }
}

/// Removes a semantic domain from a sense's domain set by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSemanticDomainChange {
    /// The sense being modified.
    pub entity_id: Uuid,
    pub semantic_domain_id: Uuid,
}

impl RemoveSemanticDomainChange {
    #[must_use]
    pub fn new(sense_id: Uuid, semantic_domain_id: Uuid) -> Self {
        Self {
            entity_id: sense_id,
            semantic_domain_id,
        }
    }
}

impl LexChange for RemoveSemanticDomainChange {
    type Entity = Sense;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for RemoveSemanticDomainChange {
    fn apply_change(&self, sense: &mut Sense, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        sense
            .semantic_domains
            .retain(|d| d.id != self.semantic_domain_id);
    }
}

/// Swaps one semantic domain for another in a single change.
///
/// The removal always happens; the addition runs under the usual add guard,
/// so replacing with a tombstoned domain degrades to a plain removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceSemanticDomainChange {
    /// The sense being modified.
    pub entity_id: Uuid,
    pub old_semantic_domain_id: Uuid,
    pub semantic_domain: SemanticDomain,
}

impl ReplaceSemanticDomainChange {
    #[must_use]
    pub fn new(sense_id: Uuid, old_semantic_domain_id: Uuid, semantic_domain: SemanticDomain) -> Self {
        Self {
            entity_id: sense_id,
            old_semantic_domain_id,
            semantic_domain,
        }
    }
}

impl LexChange for ReplaceSemanticDomainChange {
    type Entity = Sense;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for ReplaceSemanticDomainChange {
    fn apply_change(&self, sense: &mut Sense, commit: &CommitMeta, ctx: &dyn ChangeContext) {
        RemoveSemanticDomainChange::new(self.entity_id, self.old_semantic_domain_id)
            .apply_change(sense, commit, ctx);
        AddSemanticDomainChange::new(self.entity_id, self.semantic_domain.clone())
            .apply_change(sense, commit, ctx);
    }
}

// ── Sense: part of speech ───────────────────────────────────────

/// Sets or clears a sense's part of speech.
///
/// The id is re-resolved through the context at apply time, not trusted
/// from construction time: if the part of speech has since been deleted,
/// the field is cleared instead of left dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPartOfSpeechChange {
    /// The sense being modified.
    pub entity_id: Uuid,
    pub part_of_speech_id: Option<Uuid>,
}

impl SetPartOfSpeechChange {
    #[must_use]
    pub fn new(sense_id: Uuid, part_of_speech_id: Option<Uuid>) -> Self {
        Self {
            entity_id: sense_id,
            part_of_speech_id,
        }
    }
}

impl LexChange for SetPartOfSpeechChange {
    type Entity = Sense;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for SetPartOfSpeechChange {
    fn apply_change(&self, sense: &mut Sense, _commit: &CommitMeta, ctx: &dyn ChangeContext) {
        sense.part_of_speech_id = self
            .part_of_speech_id
            .and_then(|id| ctx.deleted_as_null(id));
    }
}

// ── Entry: publications ─────────────────────────────────────────

/// Adds a publication to an entry's `publish_in` set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPublicationChange {
    /// The entry being modified.
    pub entity_id: Uuid,
    pub publication: Publication,
}

impl AddPublicationChange {
    #[must_use]
    pub fn new(entry_id: Uuid, publication: Publication) -> Self {
        Self {
            entity_id: entry_id,
            publication,
        }
    }
}

impl LexChange for AddPublicationChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for AddPublicationChange {
    fn apply_change(&self, entry: &mut Entry, _commit: &CommitMeta, ctx: &dyn ChangeContext) {
        let publication = &self.publication;
        if ctx.is_deleted(publication.id) {
            return;
        }
        if entry.publish_in.iter().any(|p| p.id == publication.id) {
            return;
        }
        entry.publish_in.push(publication.clone());
    }
}

/// Removes a publication from an entry's `publish_in` set by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovePublicationChange {
    /// The entry being modified.
    pub entity_id: Uuid,
    pub publication_id: Uuid,
}

impl RemovePublicationChange {
    #[must_use]
    pub fn new(entry_id: Uuid, publication_id: Uuid) -> Self {
        Self {
            entity_id: entry_id,
            publication_id,
        }
    }
}

impl LexChange for RemovePublicationChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for RemovePublicationChange {
    fn apply_change(&self, entry: &mut Entry, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        entry.publish_in.retain(|p| p.id != self.publication_id);
    }
}

/// Swaps one publication for another in a single change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacePublicationChange {
    /// The entry being modified.
    pub entity_id: Uuid,
    pub old_publication_id: Uuid,
    pub publication: Publication,
}

impl ReplacePublicationChange {
    #[must_use]
    pub fn new(entry_id: Uuid, old_publication_id: Uuid, publication: Publication) -> Self {
        Self {
            entity_id: entry_id,
            old_publication_id,
            publication,
        }
    }
}

impl LexChange for ReplacePublicationChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for ReplacePublicationChange {
    fn apply_change(&self, entry: &mut Entry, commit: &CommitMeta, ctx: &dyn ChangeContext) {
        RemovePublicationChange::new(self.entity_id, self.old_publication_id)
            .apply_change(entry, commit, ctx);
        AddPublicationChange::new(self.entity_id, self.publication.clone())
            .apply_change(entry, commit, ctx);
    }
}

// ── Entry: complex-form types ───────────────────────────────────

/// Adds a complex-form type to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComplexFormTypeChange {
    /// The entry being modified.
    pub entity_id: Uuid,
    pub complex_form_type: ComplexFormType,
}

impl AddComplexFormTypeChange {
    #[must_use]
    pub fn new(entry_id: Uuid, complex_form_type: ComplexFormType) -> Self {
        Self {
            entity_id: entry_id,
            complex_form_type,
        }
    }
}

impl LexChange for AddComplexFormTypeChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for AddComplexFormTypeChange {
    fn apply_change(&self, entry: &mut Entry, _commit: &CommitMeta, ctx: &dyn ChangeContext) {
        let cft = &self.complex_form_type;
        if ctx.is_deleted(cft.id) {
            return;
        }
        if entry.complex_form_types.iter().any(|t| t.id == cft.id) {
            return;
        }
        entry.complex_form_types.push(cft.clone());
    }
}

/// Removes a complex-form type from an entry by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveComplexFormTypeChange {
    /// The entry being modified.
    pub entity_id: Uuid,
    pub complex_form_type_id: Uuid,
}

impl RemoveComplexFormTypeChange {
    #[must_use]
    pub fn new(entry_id: Uuid, complex_form_type_id: Uuid) -> Self {
        Self {
            entity_id: entry_id,
            complex_form_type_id,
        }
    }
}

impl LexChange for RemoveComplexFormTypeChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for RemoveComplexFormTypeChange {
    fn apply_change(&self, entry: &mut Entry, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        entry
            .complex_form_types
            .retain(|t| t.id != self.complex_form_type_id);
    }
}
