use lexibase_changes::mock::MemoryContext;
use lexibase_changes::{
    Change, ChangeContext, CreateEntryChange, CreateSenseChange, DeleteChange, JsonPatchChange,
    LexPatch, PatchError, PatchOp,
};
use lexibase_model::{Entry, EntitySnapshot, MultiString, Sense};
use lexibase_types::{ClientId, CommitId, CommitMeta, HybridTimestamp};
use serde_json::json;
use uuid::Uuid;

fn commit_at(wall: u64) -> CommitMeta {
    CommitMeta::new(
        CommitId::new(),
        HybridTimestamp::new(wall, 0),
        ClientId::new(),
    )
}

fn entry_ctx() -> (MemoryContext, Entry) {
    let mut ctx = MemoryContext::new();
    let mut entry = Entry::new(Uuid::new_v4());
    entry.lexeme_form = MultiString::single("seh", "nyumba");
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(1))
        .unwrap();
    (ctx, entry)
}

fn entry_of(ctx: &MemoryContext, id: Uuid) -> Entry {
    match ctx.get_current(id) {
        Some(EntitySnapshot::Entry(entry)) => entry,
        other => panic!("expected an entry, got {other:?}"),
    }
}

// ── Construction-time validation ──────────────────────────────────

#[test]
fn indexed_path_is_rejected() {
    let result = LexPatch::single(PatchOp::replace("senses/0/gloss", json!("x")));
    assert!(matches!(result, Err(PatchError::IndexedPath { .. })));
}

#[test]
fn keyed_path_is_accepted() {
    assert!(LexPatch::single(PatchOp::replace("gloss/en", json!("feline"))).is_ok());
}

#[test]
fn leading_digit_anywhere_in_path_is_rejected() {
    let result = LexPatch::single(PatchOp::add("senses/12", json!({})));
    assert!(matches!(result, Err(PatchError::IndexedPath { .. })));
}

#[test]
fn segment_with_trailing_digits_is_fine() {
    // Only a leading digit marks a list position.
    assert!(LexPatch::single(PatchOp::replace("field2", json!(1))).is_ok());
}

#[test]
fn empty_path_is_rejected() {
    let result = LexPatch::single(PatchOp::replace("", json!(1)));
    assert!(matches!(result, Err(PatchError::MalformedPath { .. })));
}

#[test]
fn empty_segment_is_rejected() {
    let result = LexPatch::single(PatchOp::replace("gloss//en", json!(1)));
    assert!(matches!(result, Err(PatchError::MalformedPath { .. })));
}

#[test]
fn move_validates_both_paths() {
    let bad_from = LexPatch::single(PatchOp::move_value("senses/0", "note"));
    assert!(matches!(bad_from, Err(PatchError::IndexedPath { .. })));

    let bad_to = LexPatch::single(PatchOp::move_value("note", "senses/0"));
    assert!(matches!(bad_to, Err(PatchError::IndexedPath { .. })));
}

#[test]
fn append_segment_is_accepted() {
    // `-` appends to a list without naming a position.
    assert!(LexPatch::single(PatchOp::add("exemplars/-", json!("ny"))).is_ok());
}

// ── Deserialization re-validates ──────────────────────────────────

#[test]
fn deserialize_rejects_indexed_path() {
    let raw = r#"[{"op":"replace","path":"senses/0/gloss","value":"x"}]"#;
    assert!(serde_json::from_str::<LexPatch>(raw).is_err());
}

#[test]
fn deserialize_rejects_remove_op() {
    // `remove` is not a variant at all.
    let raw = r#"[{"op":"remove","path":"note"}]"#;
    assert!(serde_json::from_str::<LexPatch>(raw).is_err());
}

#[test]
fn deserialize_accepts_valid_patch() {
    let raw = r#"[{"op":"replace","path":"gloss/en","value":"feline"}]"#;
    let patch: LexPatch = serde_json::from_str(raw).unwrap();
    assert_eq!(patch.len(), 1);
}

#[test]
fn patch_serde_roundtrip() {
    let patch = LexPatch::new(vec![
        PatchOp::replace("gloss/en", json!("feline")),
        PatchOp::move_value("note/en", "definition/en"),
    ])
    .unwrap();
    let json = serde_json::to_string(&patch).unwrap();
    let parsed: LexPatch = serde_json::from_str(&json).unwrap();
    assert_eq!(patch, parsed);
}

// ── Application ───────────────────────────────────────────────────

#[test]
fn replace_rewrites_a_multistring_value() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::replace("lexemeForm/seh", json!("nyumba yathu"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert_eq!(stored.lexeme_form.get(&"seh".into()), Some("nyumba yathu"));
}

#[test]
fn add_creates_a_missing_key() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::add("citationForm/seh", json!("nyumba"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert_eq!(stored.citation_form.get(&"seh".into()), Some("nyumba"));
}

#[test]
fn replace_of_missing_key_is_a_noop() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::replace("citationForm/en", json!("house"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    assert!(entry_of(&ctx, entry.id).citation_form.is_empty());
}

#[test]
fn move_relocates_a_value() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::move_value("lexemeForm/seh", "citationForm/seh")).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert!(stored.lexeme_form.is_empty());
    assert_eq!(stored.citation_form.get(&"seh".into()), Some("nyumba"));
}

#[test]
fn move_of_missing_source_is_a_noop() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::move_value("citationForm/en", "lexemeForm/en")).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert_eq!(stored.lexeme_form.get(&"seh".into()), Some("nyumba"));
    assert!(stored.citation_form.is_empty());
}

#[test]
fn escaped_segments_address_keys_with_slashes() {
    let (mut ctx, entry) = entry_ctx();
    // Writing-system tag "x/y" is addressed as "x~1y".
    let patch = LexPatch::single(PatchOp::add("lexemeForm/x~1y", json!("odd"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert_eq!(stored.lexeme_form.get(&"x/y".into()), Some("odd"));
}

// ── Guard fields ──────────────────────────────────────────────────

#[test]
fn patch_cannot_change_the_id() {
    let (mut ctx, entry) = entry_ctx();
    let patch = LexPatch::single(PatchOp::replace("id", json!(Uuid::new_v4()))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    assert_eq!(entry_of(&ctx, entry.id).id, entry.id);
}

#[test]
fn patch_cannot_resurrect_a_tombstoned_entity() {
    let (mut ctx, entry) = entry_ctx();
    let delete_commit = commit_at(5);
    ctx.commit(&DeleteChange::<Entry>::new(entry.id).into(), &delete_commit)
        .unwrap();

    let patch = LexPatch::single(PatchOp::replace("lexemeForm/seh", json!("changed"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let stored = entry_of(&ctx, entry.id);
    assert_eq!(stored.deleted_at, Some(delete_commit.timestamp));
    assert_eq!(stored.lexeme_form.get(&"seh".into()), Some("changed"));
}

#[test]
fn patch_cannot_tombstone_a_live_entity() {
    let (mut ctx, entry) = entry_ctx();
    let patch =
        LexPatch::single(PatchOp::add("deletedAt", json!({"wall_time": 9, "logical": 0}))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    assert!(entry_of(&ctx, entry.id).deleted_at.is_none());
}

// ── Soft failure ──────────────────────────────────────────────────

#[test]
fn patch_producing_invalid_entity_is_dropped_whole() {
    let (mut ctx, entry) = entry_ctx();
    // lexemeForm must be an object; a bare number cannot deserialize.
    let patch = LexPatch::single(PatchOp::replace("lexemeForm", json!(42))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Entry>::new(entry.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    // Prior state is kept.
    assert_eq!(
        entry_of(&ctx, entry.id).lexeme_form.get(&"seh".into()),
        Some("nyumba")
    );
}

#[test]
fn patch_applies_to_senses_too() {
    let (mut ctx, entry) = entry_ctx();
    let mut sense = Sense::new(Uuid::new_v4(), entry.id);
    sense.gloss = MultiString::single("en", "house");
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(2))
        .unwrap();

    let patch = LexPatch::single(PatchOp::replace("gloss/en", json!("dwelling"))).unwrap();
    ctx.commit(
        &JsonPatchChange::<Sense>::new(sense.id, patch).into(),
        &commit_at(10),
    )
    .unwrap();

    let Some(EntitySnapshot::Sense(stored)) = ctx.get_current(sense.id) else {
        panic!("expected a sense");
    };
    assert_eq!(stored.gloss.get(&"en".into()), Some("dwelling"));
}
