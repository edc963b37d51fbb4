//! The closed union of every change, and the contracts behind it.
//!
//! Every mutation in the system is one of the variants below. The union is
//! closed on purpose: replay must be able to fold any log it is handed, so
//! an unknown change kind is a wire-format error, not an extension point.

use crate::{
    AddComplexFormTypeChange, AddPublicationChange, AddSemanticDomainChange, ApplyError,
    ApplyResult, ChangeContext, CreateComplexFormTypeChange, CreateCustomViewChange,
    CreateEntryChange, CreateExampleSentenceChange, CreatePartOfSpeechChange,
    CreatePublicationChange, CreateSemanticDomainChange, CreateSenseChange,
    CreateWritingSystemChange, DeleteChange, EditCustomViewChange, JsonPatchChange,
    RemoveComplexFormTypeChange, RemovePublicationChange, RemoveSemanticDomainChange,
    ReplacePublicationChange, ReplaceSemanticDomainChange, SetOrderChange, SetPartOfSpeechChange,
};
use lexibase_model::{
    ComplexFormType, CustomView, EntityKind, EntitySnapshot, Entry, ExampleSentence, LexObject,
    PartOfSpeech, Publication, SemanticDomain, Sense, WritingSystem,
};
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common shape of every concrete change: it targets exactly one entity of
/// one kind.
pub trait LexChange {
    /// The entity type this change folds into.
    type Entity: LexObject;

    /// The UUID of the targeted entity.
    fn entity_id(&self) -> Uuid;
}

/// A change that starts an entity's stream.
pub trait CreateChange: LexChange {
    /// Constructs the initial snapshot. Pure and total: same change, same
    /// commit, same context state always yield the same entity.
    fn new_entity(&self, commit: &CommitMeta, ctx: &dyn ChangeContext) -> Self::Entity;
}

/// A change that folds into an existing snapshot.
pub trait EditChange: LexChange {
    /// Mutates a private working copy of the entity. Infallible: any
    /// conflict or dangling reference resolves to a deterministic outcome
    /// inside this method.
    fn apply_change(&self, entity: &mut Self::Entity, commit: &CommitMeta, ctx: &dyn ChangeContext);
}

/// Any change to any entity.
///
/// The serialized form is internally tagged with `"$type"`. Tag strings are
/// stable wire format; entity-generic changes bake the target kind into the
/// tag (`"delete:entry"`, `"jsonPatch:sense"`, `"setOrder:writingSystem"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", rename_all = "camelCase")]
pub enum Change {
    // ── Creates ─────────────────────────────────────────────────
    CreateEntry(CreateEntryChange),
    CreateSense(CreateSenseChange),
    CreateExampleSentence(CreateExampleSentenceChange),
    CreateWritingSystem(CreateWritingSystemChange),
    CreatePartOfSpeech(CreatePartOfSpeechChange),
    CreateSemanticDomain(CreateSemanticDomainChange),
    CreateComplexFormType(CreateComplexFormTypeChange),
    CreatePublication(CreatePublicationChange),
    CreateCustomView(CreateCustomViewChange),

    // ── Reference-set edits ─────────────────────────────────────
    AddSemanticDomain(AddSemanticDomainChange),
    RemoveSemanticDomain(RemoveSemanticDomainChange),
    ReplaceSemanticDomain(ReplaceSemanticDomainChange),
    AddPublication(AddPublicationChange),
    RemovePublication(RemovePublicationChange),
    ReplacePublication(ReplacePublicationChange),
    AddComplexFormType(AddComplexFormTypeChange),
    RemoveComplexFormType(RemoveComplexFormTypeChange),
    SetPartOfSpeech(SetPartOfSpeechChange),

    // ── Whole-value edits ───────────────────────────────────────
    EditCustomView(EditCustomViewChange),

    // ── Ordering ────────────────────────────────────────────────
    #[serde(rename = "setOrder:sense")]
    SetSenseOrder(SetOrderChange<Sense>),
    #[serde(rename = "setOrder:exampleSentence")]
    SetExampleSentenceOrder(SetOrderChange<ExampleSentence>),
    #[serde(rename = "setOrder:writingSystem")]
    SetWritingSystemOrder(SetOrderChange<WritingSystem>),

    // ── Deletion ────────────────────────────────────────────────
    #[serde(rename = "delete:entry")]
    DeleteEntry(DeleteChange<Entry>),
    #[serde(rename = "delete:sense")]
    DeleteSense(DeleteChange<Sense>),
    #[serde(rename = "delete:exampleSentence")]
    DeleteExampleSentence(DeleteChange<ExampleSentence>),
    #[serde(rename = "delete:writingSystem")]
    DeleteWritingSystem(DeleteChange<WritingSystem>),
    #[serde(rename = "delete:partOfSpeech")]
    DeletePartOfSpeech(DeleteChange<PartOfSpeech>),
    #[serde(rename = "delete:semanticDomain")]
    DeleteSemanticDomain(DeleteChange<SemanticDomain>),
    #[serde(rename = "delete:complexFormType")]
    DeleteComplexFormType(DeleteChange<ComplexFormType>),
    #[serde(rename = "delete:publication")]
    DeletePublication(DeleteChange<Publication>),
    #[serde(rename = "delete:customView")]
    DeleteCustomView(DeleteChange<CustomView>),

    // ── Structural patches ──────────────────────────────────────
    #[serde(rename = "jsonPatch:entry")]
    PatchEntry(JsonPatchChange<Entry>),
    #[serde(rename = "jsonPatch:sense")]
    PatchSense(JsonPatchChange<Sense>),
    #[serde(rename = "jsonPatch:exampleSentence")]
    PatchExampleSentence(JsonPatchChange<ExampleSentence>),
    #[serde(rename = "jsonPatch:writingSystem")]
    PatchWritingSystem(JsonPatchChange<WritingSystem>),
    #[serde(rename = "jsonPatch:partOfSpeech")]
    PatchPartOfSpeech(JsonPatchChange<PartOfSpeech>),
    #[serde(rename = "jsonPatch:semanticDomain")]
    PatchSemanticDomain(JsonPatchChange<SemanticDomain>),
    #[serde(rename = "jsonPatch:complexFormType")]
    PatchComplexFormType(JsonPatchChange<ComplexFormType>),
    #[serde(rename = "jsonPatch:publication")]
    PatchPublication(JsonPatchChange<Publication>),
}

/// Runs `$body` with `$change` bound to the inner concrete change,
/// whichever variant `$target` holds.
macro_rules! with_change {
    ($target:expr, $change:ident => $body:expr) => {
        match $target {
            Change::CreateEntry($change) => $body,
            Change::CreateSense($change) => $body,
            Change::CreateExampleSentence($change) => $body,
            Change::CreateWritingSystem($change) => $body,
            Change::CreatePartOfSpeech($change) => $body,
            Change::CreateSemanticDomain($change) => $body,
            Change::CreateComplexFormType($change) => $body,
            Change::CreatePublication($change) => $body,
            Change::CreateCustomView($change) => $body,
            Change::AddSemanticDomain($change) => $body,
            Change::RemoveSemanticDomain($change) => $body,
            Change::ReplaceSemanticDomain($change) => $body,
            Change::AddPublication($change) => $body,
            Change::RemovePublication($change) => $body,
            Change::ReplacePublication($change) => $body,
            Change::AddComplexFormType($change) => $body,
            Change::RemoveComplexFormType($change) => $body,
            Change::SetPartOfSpeech($change) => $body,
            Change::EditCustomView($change) => $body,
            Change::SetSenseOrder($change) => $body,
            Change::SetExampleSentenceOrder($change) => $body,
            Change::SetWritingSystemOrder($change) => $body,
            Change::DeleteEntry($change) => $body,
            Change::DeleteSense($change) => $body,
            Change::DeleteExampleSentence($change) => $body,
            Change::DeleteWritingSystem($change) => $body,
            Change::DeleteSemanticDomain($change) => $body,
            Change::DeletePartOfSpeech($change) => $body,
            Change::DeleteComplexFormType($change) => $body,
            Change::DeletePublication($change) => $body,
            Change::DeleteCustomView($change) => $body,
            Change::PatchEntry($change) => $body,
            Change::PatchSense($change) => $body,
            Change::PatchExampleSentence($change) => $body,
            Change::PatchWritingSystem($change) => $body,
            Change::PatchPartOfSpeech($change) => $body,
            Change::PatchSemanticDomain($change) => $body,
            Change::PatchComplexFormType($change) => $body,
            Change::PatchPublication($change) => $body,
        }
    };
}

impl Change {
    /// The UUID of the entity this change targets.
    #[must_use]
    pub fn entity_id(&self) -> Uuid {
        with_change!(self, change => change.entity_id())
    }

    /// The kind of entity this change targets.
    #[must_use]
    pub fn target_kind(&self) -> EntityKind {
        with_change!(self, change => kind_of(change))
    }

    /// True for the variants that start an entity's stream.
    #[must_use]
    pub fn creates_entity(&self) -> bool {
        matches!(
            self,
            Self::CreateEntry(_)
                | Self::CreateSense(_)
                | Self::CreateExampleSentence(_)
                | Self::CreateWritingSystem(_)
                | Self::CreatePartOfSpeech(_)
                | Self::CreateSemanticDomain(_)
                | Self::CreateComplexFormType(_)
                | Self::CreatePublication(_)
                | Self::CreateCustomView(_)
        )
    }

    /// The stable `"$type"` tag this change serializes under.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::CreateEntry(_) => "createEntry",
            Self::CreateSense(_) => "createSense",
            Self::CreateExampleSentence(_) => "createExampleSentence",
            Self::CreateWritingSystem(_) => "createWritingSystem",
            Self::CreatePartOfSpeech(_) => "createPartOfSpeech",
            Self::CreateSemanticDomain(_) => "createSemanticDomain",
            Self::CreateComplexFormType(_) => "createComplexFormType",
            Self::CreatePublication(_) => "createPublication",
            Self::CreateCustomView(_) => "createCustomView",
            Self::AddSemanticDomain(_) => "addSemanticDomain",
            Self::RemoveSemanticDomain(_) => "removeSemanticDomain",
            Self::ReplaceSemanticDomain(_) => "replaceSemanticDomain",
            Self::AddPublication(_) => "addPublication",
            Self::RemovePublication(_) => "removePublication",
            Self::ReplacePublication(_) => "replacePublication",
            Self::AddComplexFormType(_) => "addComplexFormType",
            Self::RemoveComplexFormType(_) => "removeComplexFormType",
            Self::SetPartOfSpeech(_) => "setPartOfSpeech",
            Self::EditCustomView(_) => "editCustomView",
            Self::SetSenseOrder(_) => "setOrder:sense",
            Self::SetExampleSentenceOrder(_) => "setOrder:exampleSentence",
            Self::SetWritingSystemOrder(_) => "setOrder:writingSystem",
            Self::DeleteEntry(_) => "delete:entry",
            Self::DeleteSense(_) => "delete:sense",
            Self::DeleteExampleSentence(_) => "delete:exampleSentence",
            Self::DeleteWritingSystem(_) => "delete:writingSystem",
            Self::DeletePartOfSpeech(_) => "delete:partOfSpeech",
            Self::DeleteSemanticDomain(_) => "delete:semanticDomain",
            Self::DeleteComplexFormType(_) => "delete:complexFormType",
            Self::DeletePublication(_) => "delete:publication",
            Self::DeleteCustomView(_) => "delete:customView",
            Self::PatchEntry(_) => "jsonPatch:entry",
            Self::PatchSense(_) => "jsonPatch:sense",
            Self::PatchExampleSentence(_) => "jsonPatch:exampleSentence",
            Self::PatchWritingSystem(_) => "jsonPatch:writingSystem",
            Self::PatchPartOfSpeech(_) => "jsonPatch:partOfSpeech",
            Self::PatchSemanticDomain(_) => "jsonPatch:semanticDomain",
            Self::PatchComplexFormType(_) => "jsonPatch:complexFormType",
            Self::PatchPublication(_) => "jsonPatch:publication",
        }
    }

    /// Folds this change into the entity's stream.
    ///
    /// `state` is the entity's snapshot as of the previous change in causal
    /// order, `None` before the create. A create ignores prior state and
    /// reconstructs deterministically; an edit folds into the snapshot it
    /// is handed. Edits apply to tombstoned snapshots too. Errors mean the
    /// replay framework violated causal delivery, never a data conflict.
    pub fn apply(
        &self,
        state: Option<EntitySnapshot>,
        commit: &CommitMeta,
        ctx: &dyn ChangeContext,
    ) -> ApplyResult<EntitySnapshot> {
        match self {
            Self::CreateEntry(c) => apply_create(c, commit, ctx),
            Self::CreateSense(c) => apply_create(c, commit, ctx),
            Self::CreateExampleSentence(c) => apply_create(c, commit, ctx),
            Self::CreateWritingSystem(c) => apply_create(c, commit, ctx),
            Self::CreatePartOfSpeech(c) => apply_create(c, commit, ctx),
            Self::CreateSemanticDomain(c) => apply_create(c, commit, ctx),
            Self::CreateComplexFormType(c) => apply_create(c, commit, ctx),
            Self::CreatePublication(c) => apply_create(c, commit, ctx),
            Self::CreateCustomView(c) => apply_create(c, commit, ctx),
            Self::AddSemanticDomain(c) => apply_edit(c, state, commit, ctx),
            Self::RemoveSemanticDomain(c) => apply_edit(c, state, commit, ctx),
            Self::ReplaceSemanticDomain(c) => apply_edit(c, state, commit, ctx),
            Self::AddPublication(c) => apply_edit(c, state, commit, ctx),
            Self::RemovePublication(c) => apply_edit(c, state, commit, ctx),
            Self::ReplacePublication(c) => apply_edit(c, state, commit, ctx),
            Self::AddComplexFormType(c) => apply_edit(c, state, commit, ctx),
            Self::RemoveComplexFormType(c) => apply_edit(c, state, commit, ctx),
            Self::SetPartOfSpeech(c) => apply_edit(c, state, commit, ctx),
            Self::EditCustomView(c) => apply_edit(c, state, commit, ctx),
            Self::SetSenseOrder(c) => apply_edit(c, state, commit, ctx),
            Self::SetExampleSentenceOrder(c) => apply_edit(c, state, commit, ctx),
            Self::SetWritingSystemOrder(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteEntry(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteSense(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteExampleSentence(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteWritingSystem(c) => apply_edit(c, state, commit, ctx),
            Self::DeletePartOfSpeech(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteSemanticDomain(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteComplexFormType(c) => apply_edit(c, state, commit, ctx),
            Self::DeletePublication(c) => apply_edit(c, state, commit, ctx),
            Self::DeleteCustomView(c) => apply_edit(c, state, commit, ctx),
            Self::PatchEntry(c) => apply_edit(c, state, commit, ctx),
            Self::PatchSense(c) => apply_edit(c, state, commit, ctx),
            Self::PatchExampleSentence(c) => apply_edit(c, state, commit, ctx),
            Self::PatchWritingSystem(c) => apply_edit(c, state, commit, ctx),
            Self::PatchPartOfSpeech(c) => apply_edit(c, state, commit, ctx),
            Self::PatchSemanticDomain(c) => apply_edit(c, state, commit, ctx),
            Self::PatchComplexFormType(c) => apply_edit(c, state, commit, ctx),
            Self::PatchPublication(c) => apply_edit(c, state, commit, ctx),
        }
    }
}

fn kind_of<C: LexChange>(_: &C) -> EntityKind {
    <C::Entity as LexObject>::KIND
}

fn apply_create<C: CreateChange>(
    change: &C,
    commit: &CommitMeta,
    ctx: &dyn ChangeContext,
) -> ApplyResult<EntitySnapshot> {
    Ok(change.new_entity(commit, ctx).into_snapshot())
}

fn apply_edit<C: EditChange>(
    change: &C,
    state: Option<EntitySnapshot>,
    commit: &CommitMeta,
    ctx: &dyn ChangeContext,
) -> ApplyResult<EntitySnapshot> {
    let id = change.entity_id();
    let kind = <C::Entity as LexObject>::KIND;
    let Some(snapshot) = state else {
        return Err(ApplyError::MissingEntity { id, kind });
    };
    let found = snapshot.kind();
    let Some(mut entity) = <C::Entity as LexObject>::from_snapshot(snapshot) else {
        return Err(ApplyError::KindMismatch {
            id,
            expected: kind,
            found,
        });
    };
    change.apply_change(&mut entity, commit, ctx);
    Ok(entity.into_snapshot())
}

macro_rules! impl_from_change {
    ($($change:ty => $variant:ident),* $(,)?) => {$(
        impl From<$change> for Change {
            fn from(change: $change) -> Self {
                Self::$variant(change)
            }
        }
    )*};
}

impl_from_change! {
    CreateEntryChange => CreateEntry,
    CreateSenseChange => CreateSense,
    CreateExampleSentenceChange => CreateExampleSentence,
    CreateWritingSystemChange => CreateWritingSystem,
    CreatePartOfSpeechChange => CreatePartOfSpeech,
    CreateSemanticDomainChange => CreateSemanticDomain,
    CreateComplexFormTypeChange => CreateComplexFormType,
    CreatePublicationChange => CreatePublication,
    CreateCustomViewChange => CreateCustomView,
    AddSemanticDomainChange => AddSemanticDomain,
    RemoveSemanticDomainChange => RemoveSemanticDomain,
    ReplaceSemanticDomainChange => ReplaceSemanticDomain,
    AddPublicationChange => AddPublication,
    RemovePublicationChange => RemovePublication,
    ReplacePublicationChange => ReplacePublication,
    AddComplexFormTypeChange => AddComplexFormType,
    RemoveComplexFormTypeChange => RemoveComplexFormType,
    SetPartOfSpeechChange => SetPartOfSpeech,
    EditCustomViewChange => EditCustomView,
    SetOrderChange<Sense> => SetSenseOrder,
    SetOrderChange<ExampleSentence> => SetExampleSentenceOrder,
    SetOrderChange<WritingSystem> => SetWritingSystemOrder,
    DeleteChange<Entry> => DeleteEntry,
    DeleteChange<Sense> => DeleteSense,
    DeleteChange<ExampleSentence> => DeleteExampleSentence,
    DeleteChange<WritingSystem> => DeleteWritingSystem,
    DeleteChange<PartOfSpeech> => DeletePartOfSpeech,
    DeleteChange<SemanticDomain> => DeleteSemanticDomain,
    DeleteChange<ComplexFormType> => DeleteComplexFormType,
    DeleteChange<Publication> => DeletePublication,
    DeleteChange<CustomView> => DeleteCustomView,
    JsonPatchChange<Entry> => PatchEntry,
    JsonPatchChange<Sense> => PatchSense,
    JsonPatchChange<ExampleSentence> => PatchExampleSentence,
    JsonPatchChange<WritingSystem> => PatchWritingSystem,
    JsonPatchChange<PartOfSpeech> => PatchPartOfSpeech,
    JsonPatchChange<SemanticDomain> => PatchSemanticDomain,
    JsonPatchChange<ComplexFormType> => PatchComplexFormType,
    JsonPatchChange<Publication> => PatchPublication,
}
