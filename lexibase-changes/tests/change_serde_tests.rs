//! Wire-format stability for the change union.
//!
//! The `$type` tag strings here are load-bearing: they are what replicas of
//! any version parse out of the commit log. Renaming one is a format break,
//! so each is pinned to a literal.

use lexibase_changes::{
    AddComplexFormTypeChange, AddPublicationChange, AddSemanticDomainChange, Change,
    CreateComplexFormTypeChange, CreateCustomViewChange, CreateEntryChange,
    CreateExampleSentenceChange, CreatePartOfSpeechChange, CreatePublicationChange,
    CreateSemanticDomainChange, CreateSenseChange, CreateWritingSystemChange, DeleteChange,
    EditCustomViewChange, JsonPatchChange, LexPatch, PatchOp, RemoveComplexFormTypeChange,
    RemovePublicationChange, RemoveSemanticDomainChange, ReplacePublicationChange,
    ReplaceSemanticDomainChange, SetOrderChange, SetPartOfSpeechChange,
};
use lexibase_model::{
    ComplexFormType, CustomView, EntityKind, Entry, ExampleSentence, MultiString, PartOfSpeech,
    Publication, SemanticDomain, Sense, WritingSystem, WritingSystemKind,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

fn domain() -> SemanticDomain {
    SemanticDomain::new(Uuid::new_v4(), MultiString::single("en", "Sky"))
}

fn publication() -> Publication {
    Publication::new(Uuid::new_v4(), MultiString::single("en", "Main"))
}

fn cft() -> ComplexFormType {
    ComplexFormType::new(Uuid::new_v4(), MultiString::single("en", "Compound"))
}

fn patch() -> LexPatch {
    LexPatch::single(PatchOp::replace("gloss/en", json!("feline"))).unwrap()
}

/// Every change variant paired with its pinned wire tag.
fn tagged_changes() -> Vec<(Change, &'static str)> {
    let entry = Entry::new(Uuid::new_v4());
    let sense = Sense::new(Uuid::new_v4(), entry.id);
    let example = ExampleSentence::new(Uuid::new_v4(), sense.id);
    let ws = WritingSystem::new(Uuid::new_v4(), "seh".into(), WritingSystemKind::Vernacular);
    let view = CustomView::new(Uuid::new_v4(), "My view");

    vec![
        (CreateEntryChange::new(&entry).into(), "createEntry"),
        (CreateSenseChange::new(&sense, entry.id).into(), "createSense"),
        (
            CreateExampleSentenceChange::new(&example, sense.id).into(),
            "createExampleSentence",
        ),
        (
            CreateWritingSystemChange::new(&ws, ws.id, 1.0).into(),
            "createWritingSystem",
        ),
        (
            CreatePartOfSpeechChange::new(Uuid::new_v4(), MultiString::single("en", "noun"), true)
                .into(),
            "createPartOfSpeech",
        ),
        (
            CreateSemanticDomainChange::new(
                Uuid::new_v4(),
                MultiString::single("en", "Sky"),
                Some("1.2".into()),
                true,
            )
            .into(),
            "createSemanticDomain",
        ),
        (
            CreateComplexFormTypeChange::new(Uuid::new_v4(), MultiString::single("en", "Compound"))
                .into(),
            "createComplexFormType",
        ),
        (
            CreatePublicationChange::new(Uuid::new_v4(), MultiString::single("en", "Main")).into(),
            "createPublication",
        ),
        (CreateCustomViewChange::new(&view).into(), "createCustomView"),
        (
            AddSemanticDomainChange::new(sense.id, domain()).into(),
            "addSemanticDomain",
        ),
        (
            RemoveSemanticDomainChange::new(sense.id, Uuid::new_v4()).into(),
            "removeSemanticDomain",
        ),
        (
            ReplaceSemanticDomainChange::new(sense.id, Uuid::new_v4(), domain()).into(),
            "replaceSemanticDomain",
        ),
        (
            AddPublicationChange::new(entry.id, publication()).into(),
            "addPublication",
        ),
        (
            RemovePublicationChange::new(entry.id, Uuid::new_v4()).into(),
            "removePublication",
        ),
        (
            ReplacePublicationChange::new(entry.id, Uuid::new_v4(), publication()).into(),
            "replacePublication",
        ),
        (
            AddComplexFormTypeChange::new(entry.id, cft()).into(),
            "addComplexFormType",
        ),
        (
            RemoveComplexFormTypeChange::new(entry.id, Uuid::new_v4()).into(),
            "removeComplexFormType",
        ),
        (
            SetPartOfSpeechChange::new(sense.id, Some(Uuid::new_v4())).into(),
            "setPartOfSpeech",
        ),
        (
            EditCustomViewChange::new(view.id, view.clone()).into(),
            "editCustomView",
        ),
        (
            SetOrderChange::<Sense>::to(sense.id, 1.5).into(),
            "setOrder:sense",
        ),
        (
            SetOrderChange::<ExampleSentence>::to(example.id, 1.5).into(),
            "setOrder:exampleSentence",
        ),
        (
            SetOrderChange::<WritingSystem>::to(ws.id, 1.5).into(),
            "setOrder:writingSystem",
        ),
        (DeleteChange::<Entry>::new(entry.id).into(), "delete:entry"),
        (DeleteChange::<Sense>::new(sense.id).into(), "delete:sense"),
        (
            DeleteChange::<ExampleSentence>::new(example.id).into(),
            "delete:exampleSentence",
        ),
        (
            DeleteChange::<WritingSystem>::new(ws.id).into(),
            "delete:writingSystem",
        ),
        (
            DeleteChange::<PartOfSpeech>::new(Uuid::new_v4()).into(),
            "delete:partOfSpeech",
        ),
        (
            DeleteChange::<SemanticDomain>::new(Uuid::new_v4()).into(),
            "delete:semanticDomain",
        ),
        (
            DeleteChange::<ComplexFormType>::new(Uuid::new_v4()).into(),
            "delete:complexFormType",
        ),
        (
            DeleteChange::<Publication>::new(Uuid::new_v4()).into(),
            "delete:publication",
        ),
        (
            DeleteChange::<CustomView>::new(view.id).into(),
            "delete:customView",
        ),
        (
            JsonPatchChange::<Entry>::new(entry.id, patch()).into(),
            "jsonPatch:entry",
        ),
        (
            JsonPatchChange::<Sense>::new(sense.id, patch()).into(),
            "jsonPatch:sense",
        ),
        (
            JsonPatchChange::<ExampleSentence>::new(example.id, patch()).into(),
            "jsonPatch:exampleSentence",
        ),
        (
            JsonPatchChange::<WritingSystem>::new(ws.id, patch()).into(),
            "jsonPatch:writingSystem",
        ),
        (
            JsonPatchChange::<PartOfSpeech>::new(Uuid::new_v4(), patch()).into(),
            "jsonPatch:partOfSpeech",
        ),
        (
            JsonPatchChange::<SemanticDomain>::new(Uuid::new_v4(), patch()).into(),
            "jsonPatch:semanticDomain",
        ),
        (
            JsonPatchChange::<ComplexFormType>::new(Uuid::new_v4(), patch()).into(),
            "jsonPatch:complexFormType",
        ),
        (
            JsonPatchChange::<Publication>::new(Uuid::new_v4(), patch()).into(),
            "jsonPatch:publication",
        ),
    ]
}

// ── Tag table ─────────────────────────────────────────────────────

#[test]
fn every_variant_serializes_under_its_pinned_tag() {
    for (change, tag) in tagged_changes() {
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["$type"], json!(tag), "tag mismatch for {tag}");
    }
}

#[test]
fn tag_accessor_matches_serialized_tag() {
    for (change, tag) in tagged_changes() {
        assert_eq!(change.tag(), tag);
    }
}

#[test]
fn tags_are_unique() {
    let changes = tagged_changes();
    let mut tags: Vec<&str> = changes.iter().map(|(_, tag)| *tag).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), changes.len());
}

#[test]
fn every_variant_roundtrips() {
    for (change, tag) in tagged_changes() {
        let json = serde_json::to_string(&change).unwrap();
        let parsed: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(change, parsed, "roundtrip mismatch for {tag}");
    }
}

#[test]
fn unknown_tag_is_rejected() {
    let raw = json!({"$type": "renameEverything", "entityId": Uuid::new_v4()});
    assert!(serde_json::from_value::<Change>(raw).is_err());
}

// ── Dispatch accessors ────────────────────────────────────────────

#[test]
fn entity_id_reaches_through_every_variant() {
    for (change, tag) in tagged_changes() {
        assert_ne!(change.entity_id(), Uuid::nil(), "nil entity id for {tag}");
    }
}

#[test]
fn target_kind_matches_generic_tags() {
    let sense_delete: Change = DeleteChange::<Sense>::new(Uuid::new_v4()).into();
    assert_eq!(sense_delete.target_kind(), EntityKind::Sense);

    let ws_patch: Change = JsonPatchChange::<WritingSystem>::new(Uuid::new_v4(), patch()).into();
    assert_eq!(ws_patch.target_kind(), EntityKind::WritingSystem);

    let entry = Entry::new(Uuid::new_v4());
    let create: Change = CreateEntryChange::new(&entry).into();
    assert_eq!(create.target_kind(), EntityKind::Entry);
}

#[test]
fn known_json_shape_parses() {
    // A change as another client would write it.
    let id = Uuid::new_v4();
    let raw = json!({
        "$type": "setPartOfSpeech",
        "entityId": id,
        "partOfSpeechId": null,
    });
    let parsed: Change = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.tag(), "setPartOfSpeech");
    assert_eq!(parsed.entity_id(), id);
}

#[test]
fn delete_payload_is_just_the_entity_id() {
    let id = Uuid::new_v4();
    let raw = json!({"$type": "delete:entry", "entityId": id});
    let parsed: Change = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.entity_id(), id);
    assert_eq!(parsed.target_kind(), EntityKind::Entry);
}
