//! Create changes: the first change in every entity's stream.
//!
//! A create copies its constructor input verbatim into a fresh snapshot.
//! The only context-sensitive work happens where the new entity points at
//! other entities: owner gone means the child is born tombstoned, and
//! references to tombstoned targets are dropped rather than kept dangling.

use crate::{ChangeContext, CreateChange, LexChange};
use lexibase_model::{
    ComplexFormType, Entry, ExampleSentence, LexObject, MultiString, PartOfSpeech, Publication,
    RichMultiString, RichString, SemanticDomain, Sense, WritingSystem, WritingSystemId,
    WritingSystemKind,
};
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn id_or_new(id: Uuid) -> Uuid {
    if id.is_nil() { Uuid::new_v4() } else { id }
}

/// Creates an [`Entry`]. Senses come from their own create changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryChange {
    pub entity_id: Uuid,
    #[serde(default)]
    pub lexeme_form: MultiString,
    #[serde(default)]
    pub citation_form: MultiString,
    #[serde(default)]
    pub literal_meaning: RichMultiString,
    #[serde(default)]
    pub note: RichMultiString,
}

impl CreateEntryChange {
    /// Captures the entry's own fields; a nil id gets a fresh UUID.
    #[must_use]
    pub fn new(entry: &Entry) -> Self {
        Self {
            entity_id: id_or_new(entry.id),
            lexeme_form: entry.lexeme_form.clone(),
            citation_form: entry.citation_form.clone(),
            literal_meaning: entry.literal_meaning.clone(),
            note: entry.note.clone(),
        }
    }
}

impl LexChange for CreateEntryChange {
    type Entity = Entry;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateEntryChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> Entry {
        let mut entry = Entry::new(self.entity_id);
        entry.lexeme_form = self.lexeme_form.clone();
        entry.citation_form = self.citation_form.clone();
        entry.literal_meaning = self.literal_meaning.clone();
        entry.note = self.note.clone();
        entry
    }
}

/// Creates a [`Sense`] under an owning entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSenseChange {
    pub entity_id: Uuid,
    pub entry_id: Uuid,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub definition: RichMultiString,
    #[serde(default)]
    pub gloss: MultiString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub semantic_domains: Vec<SemanticDomain>,
}

impl CreateSenseChange {
    /// Captures the sense's fields; a nil id gets a fresh UUID. Examples
    /// come from their own create changes.
    #[must_use]
    pub fn new(sense: &Sense, entry_id: Uuid) -> Self {
        Self {
            entity_id: id_or_new(sense.id),
            entry_id,
            order: sense.order,
            definition: sense.definition.clone(),
            gloss: sense.gloss.clone(),
            part_of_speech_id: sense.part_of_speech_id,
            semantic_domains: sense.semantic_domains.clone(),
        }
    }
}

impl LexChange for CreateSenseChange {
    type Entity = Sense;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateSenseChange {
    fn new_entity(&self, commit: &CommitMeta, ctx: &dyn ChangeContext) -> Sense {
        let mut sense = Sense::new(self.entity_id, self.entry_id);
        sense.order = self.order;
        sense.definition = self.definition.clone();
        sense.gloss = self.gloss.clone();
        // Re-resolve references as of this commit rather than trusting the
        // state the author saw.
        sense.part_of_speech_id = self
            .part_of_speech_id
            .and_then(|id| ctx.deleted_as_null(id));
        sense.semantic_domains = self
            .semantic_domains
            .iter()
            .filter(|domain| !ctx.is_deleted(domain.id))
            .cloned()
            .collect();
        if ctx.is_deleted(self.entry_id) {
            sense.deleted_at = Some(commit.timestamp);
        }
        sense
    }
}

/// Creates an [`ExampleSentence`] under an owning sense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExampleSentenceChange {
    pub entity_id: Uuid,
    pub sense_id: Uuid,
    #[serde(default)]
    pub order: f64,
    #[serde(default)]
    pub sentence: RichMultiString,
    #[serde(default)]
    pub translation: RichMultiString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<RichString>,
}

impl CreateExampleSentenceChange {
    /// Captures the example's fields; a nil id gets a fresh UUID.
    #[must_use]
    pub fn new(example: &ExampleSentence, sense_id: Uuid) -> Self {
        Self {
            entity_id: id_or_new(example.id),
            sense_id,
            order: example.order,
            sentence: example.sentence.clone(),
            translation: example.translation.clone(),
            reference: example.reference.clone(),
        }
    }
}

impl LexChange for CreateExampleSentenceChange {
    type Entity = ExampleSentence;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateExampleSentenceChange {
    fn new_entity(&self, commit: &CommitMeta, ctx: &dyn ChangeContext) -> ExampleSentence {
        let mut example = ExampleSentence::new(self.entity_id, self.sense_id);
        example.order = self.order;
        example.sentence = self.sentence.clone();
        example.translation = self.translation.clone();
        example.reference = self.reference.clone();
        if ctx.is_deleted(self.sense_id) {
            example.deleted_at = Some(commit.timestamp);
        }
        example
    }
}

/// Creates a [`WritingSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWritingSystemChange {
    pub entity_id: Uuid,
    pub ws_id: WritingSystemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub font: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemplars: Vec<String>,
    #[serde(rename = "type")]
    pub kind: WritingSystemKind,
    #[serde(default)]
    pub order: f64,
}

impl CreateWritingSystemChange {
    #[must_use]
    pub fn new(ws: &WritingSystem, entity_id: Uuid, order: f64) -> Self {
        Self {
            entity_id: id_or_new(entity_id),
            ws_id: ws.ws_id.clone(),
            name: ws.name.clone(),
            abbreviation: ws.abbreviation.clone(),
            font: ws.font.clone(),
            exemplars: ws.exemplars.clone(),
            kind: ws.kind,
            order,
        }
    }
}

impl LexChange for CreateWritingSystemChange {
    type Entity = WritingSystem;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateWritingSystemChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> WritingSystem {
        let mut ws = WritingSystem::new(self.entity_id, self.ws_id.clone(), self.kind);
        ws.name = self.name.clone();
        ws.abbreviation = self.abbreviation.clone();
        ws.font = self.font.clone();
        ws.exemplars = self.exemplars.clone();
        ws.order = self.order;
        ws
    }
}

/// Creates a [`PartOfSpeech`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartOfSpeechChange {
    pub entity_id: Uuid,
    pub name: MultiString,
    #[serde(default)]
    pub predefined: bool,
}

impl CreatePartOfSpeechChange {
    #[must_use]
    pub fn new(entity_id: Uuid, name: MultiString, predefined: bool) -> Self {
        Self {
            entity_id: id_or_new(entity_id),
            name,
            predefined,
        }
    }
}

impl LexChange for CreatePartOfSpeechChange {
    type Entity = PartOfSpeech;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreatePartOfSpeechChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> PartOfSpeech {
        let mut pos = PartOfSpeech::new(self.entity_id, self.name.clone());
        pos.predefined = self.predefined;
        pos
    }
}

/// Creates a [`SemanticDomain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSemanticDomainChange {
    pub entity_id: Uuid,
    pub name: MultiString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub predefined: bool,
}

impl CreateSemanticDomainChange {
    #[must_use]
    pub fn new(entity_id: Uuid, name: MultiString, code: Option<String>, predefined: bool) -> Self {
        Self {
            entity_id: id_or_new(entity_id),
            name,
            code,
            predefined,
        }
    }
}

impl LexChange for CreateSemanticDomainChange {
    type Entity = SemanticDomain;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateSemanticDomainChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> SemanticDomain {
        let mut domain = SemanticDomain::new(self.entity_id, self.name.clone());
        domain.code = self.code.clone();
        domain.predefined = self.predefined;
        domain
    }
}

/// Creates a [`ComplexFormType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplexFormTypeChange {
    pub entity_id: Uuid,
    pub name: MultiString,
}

impl CreateComplexFormTypeChange {
    #[must_use]
    pub fn new(entity_id: Uuid, name: MultiString) -> Self {
        Self {
            entity_id: id_or_new(entity_id),
            name,
        }
    }
}

impl LexChange for CreateComplexFormTypeChange {
    type Entity = ComplexFormType;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateComplexFormTypeChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> ComplexFormType {
        ComplexFormType::new(self.entity_id, self.name.clone())
    }
}

/// Creates a [`Publication`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePublicationChange {
    pub entity_id: Uuid,
    pub name: MultiString,
}

impl CreatePublicationChange {
    #[must_use]
    pub fn new(entity_id: Uuid, name: MultiString) -> Self {
        Self {
            entity_id: id_or_new(entity_id),
            name,
        }
    }
}

impl LexChange for CreatePublicationChange {
    type Entity = Publication;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreatePublicationChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> Publication {
        Publication::new(self.entity_id, self.name.clone())
    }
}
