use lexibase_changes::mock::MemoryContext;
use lexibase_changes::{
    Change, ChangeContext, CreateEntryChange, CreateExampleSentenceChange,
    CreatePartOfSpeechChange, CreatePublicationChange, CreateSemanticDomainChange,
    CreateSenseChange, CreateWritingSystemChange, DeleteChange,
};
use lexibase_model::{
    Entry, EntitySnapshot, ExampleSentence, MultiString, PartOfSpeech, RichString, SemanticDomain,
    Sense, WritingSystem, WritingSystemKind,
};
use lexibase_types::{ClientId, CommitId, CommitMeta, HybridTimestamp};
use uuid::Uuid;

fn commit_at(wall: u64) -> CommitMeta {
    CommitMeta::new(
        CommitId::new(),
        HybridTimestamp::new(wall, 0),
        ClientId::new(),
    )
}

fn sense_of(ctx: &MemoryContext, id: Uuid) -> Sense {
    match ctx.get_current(id) {
        Some(EntitySnapshot::Sense(sense)) => sense,
        other => panic!("expected a sense, got {other:?}"),
    }
}

// ── Entry ─────────────────────────────────────────────────────────

#[test]
fn create_entry_copies_fields() {
    let mut entry = Entry::new(Uuid::new_v4());
    entry.lexeme_form = MultiString::single("seh", "nyumba");
    entry.citation_form = MultiString::single("seh", "nyumba");

    let change = CreateEntryChange::new(&entry);
    let mut ctx = MemoryContext::new();
    ctx.commit(&Change::from(change.clone()), &commit_at(10)).unwrap();

    let stored = ctx.get_current(entry.id).unwrap();
    assert_eq!(stored.id(), entry.id);
    let EntitySnapshot::Entry(stored) = stored else {
        panic!("expected an entry");
    };
    assert_eq!(stored.lexeme_form, entry.lexeme_form);
    assert_eq!(stored.citation_form, entry.citation_form);
    assert!(stored.deleted_at.is_none());
}

#[test]
fn create_entry_assigns_id_when_nil() {
    let entry = Entry::new(Uuid::nil());
    let change = CreateEntryChange::new(&entry);
    assert_ne!(change.entity_id, Uuid::nil());
}

#[test]
fn create_entry_keeps_given_id() {
    let id = Uuid::new_v4();
    let change = CreateEntryChange::new(&Entry::new(id));
    assert_eq!(change.entity_id, id);
}

#[test]
fn create_entry_does_not_carry_senses() {
    let mut entry = Entry::new(Uuid::new_v4());
    entry.senses.push(Sense::new(Uuid::new_v4(), entry.id));

    let change = CreateEntryChange::new(&entry);
    let mut ctx = MemoryContext::new();
    ctx.commit(&Change::from(change), &commit_at(10)).unwrap();

    let EntitySnapshot::Entry(stored) = ctx.get_current(entry.id).unwrap() else {
        panic!("expected an entry");
    };
    // Senses enter via their own create changes.
    assert!(stored.senses.is_empty());
}

// ── Sense ─────────────────────────────────────────────────────────

#[test]
fn create_sense_under_live_entry() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();

    let mut sense = Sense::new(Uuid::new_v4(), entry.id);
    sense.gloss = MultiString::single("en", "house");
    ctx.commit(
        &CreateSenseChange::new(&sense, entry.id).into(),
        &commit_at(20),
    )
    .unwrap();

    let stored = sense_of(&ctx, sense.id);
    assert_eq!(stored.entry_id, entry.id);
    assert_eq!(stored.gloss, sense.gloss);
    assert!(stored.deleted_at.is_none());
}

#[test]
fn sense_created_under_tombstoned_entry_is_born_tombstoned() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();
    ctx.commit(&DeleteChange::<Entry>::new(entry.id).into(), &commit_at(20))
        .unwrap();

    let sense = Sense::new(Uuid::new_v4(), entry.id);
    let create_commit = commit_at(30);
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &create_commit)
        .unwrap();

    let stored = sense_of(&ctx, sense.id);
    assert_eq!(stored.deleted_at, Some(create_commit.timestamp));
}

#[test]
fn sense_created_under_unknown_entry_is_born_tombstoned() {
    // An id the context has never seen counts as deleted.
    let mut ctx = MemoryContext::new();
    let sense = Sense::new(Uuid::new_v4(), Uuid::new_v4());
    let create_commit = commit_at(10);
    ctx.commit(
        &CreateSenseChange::new(&sense, sense.entry_id).into(),
        &create_commit,
    )
    .unwrap();

    assert_eq!(sense_of(&ctx, sense.id).deleted_at, Some(create_commit.timestamp));
}

#[test]
fn create_sense_clears_tombstoned_part_of_speech() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();
    let pos_id = Uuid::new_v4();
    ctx.commit(
        &CreatePartOfSpeechChange::new(pos_id, MultiString::single("en", "noun"), true).into(),
        &commit_at(11),
    )
    .unwrap();
    ctx.commit(
        &DeleteChange::<PartOfSpeech>::new(pos_id).into(),
        &commit_at(12),
    )
    .unwrap();

    let mut sense = Sense::new(Uuid::new_v4(), entry.id);
    sense.part_of_speech_id = Some(pos_id);
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(20))
        .unwrap();

    assert_eq!(sense_of(&ctx, sense.id).part_of_speech_id, None);
}

#[test]
fn create_sense_keeps_live_part_of_speech() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();
    let pos_id = Uuid::new_v4();
    ctx.commit(
        &CreatePartOfSpeechChange::new(pos_id, MultiString::single("en", "verb"), true).into(),
        &commit_at(11),
    )
    .unwrap();

    let mut sense = Sense::new(Uuid::new_v4(), entry.id);
    sense.part_of_speech_id = Some(pos_id);
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(20))
        .unwrap();

    assert_eq!(sense_of(&ctx, sense.id).part_of_speech_id, Some(pos_id));
}

#[test]
fn create_sense_drops_tombstoned_domains() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();

    let live = SemanticDomain::new(Uuid::new_v4(), MultiString::single("en", "Sky"));
    let dead = SemanticDomain::new(Uuid::new_v4(), MultiString::single("en", "Sea"));
    ctx.commit(
        &CreateSemanticDomainChange::new(live.id, live.name.clone(), Some("1.2".into()), true)
            .into(),
        &commit_at(11),
    )
    .unwrap();
    ctx.commit(
        &CreateSemanticDomainChange::new(dead.id, dead.name.clone(), Some("1.3".into()), true)
            .into(),
        &commit_at(12),
    )
    .unwrap();
    ctx.commit(
        &DeleteChange::<SemanticDomain>::new(dead.id).into(),
        &commit_at(13),
    )
    .unwrap();

    let mut sense = Sense::new(Uuid::new_v4(), entry.id);
    sense.semantic_domains = vec![live.clone(), dead.clone()];
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(20))
        .unwrap();

    let domains: Vec<Uuid> = sense_of(&ctx, sense.id)
        .semantic_domains
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(domains, vec![live.id]);
}

// ── Example sentence ──────────────────────────────────────────────

#[test]
fn create_example_under_live_sense() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();
    let sense = Sense::new(Uuid::new_v4(), entry.id);
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(11))
        .unwrap();

    let mut example = ExampleSentence::new(Uuid::new_v4(), sense.id);
    example.reference = Some(RichString::plain("field notes 2019"));
    ctx.commit(
        &CreateExampleSentenceChange::new(&example, sense.id).into(),
        &commit_at(20),
    )
    .unwrap();

    let EntitySnapshot::ExampleSentence(stored) = ctx.get_current(example.id).unwrap() else {
        panic!("expected an example sentence");
    };
    assert_eq!(stored.sense_id, sense.id);
    assert_eq!(stored.reference, example.reference);
    assert!(stored.deleted_at.is_none());
}

#[test]
fn example_created_under_tombstoned_sense_is_born_tombstoned() {
    let mut ctx = MemoryContext::new();
    let entry = Entry::new(Uuid::new_v4());
    ctx.commit(&CreateEntryChange::new(&entry).into(), &commit_at(10))
        .unwrap();
    let sense = Sense::new(Uuid::new_v4(), entry.id);
    ctx.commit(&CreateSenseChange::new(&sense, entry.id).into(), &commit_at(11))
        .unwrap();
    ctx.commit(&DeleteChange::<Sense>::new(sense.id).into(), &commit_at(12))
        .unwrap();

    let example = ExampleSentence::new(Uuid::new_v4(), sense.id);
    let create_commit = commit_at(20);
    ctx.commit(
        &CreateExampleSentenceChange::new(&example, sense.id).into(),
        &create_commit,
    )
    .unwrap();

    let EntitySnapshot::ExampleSentence(stored) = ctx.get_current(example.id).unwrap() else {
        panic!("expected an example sentence");
    };
    assert_eq!(stored.deleted_at, Some(create_commit.timestamp));
}

// ── Project-level entities ────────────────────────────────────────

#[test]
fn create_writing_system_sets_kind_and_order() {
    let ws = WritingSystem::new(
        Uuid::new_v4(),
        "seh".into(),
        WritingSystemKind::Vernacular,
    );
    let change = CreateWritingSystemChange::new(&ws, ws.id, 2.0);

    let mut ctx = MemoryContext::new();
    ctx.commit(&change.into(), &commit_at(10)).unwrap();

    let EntitySnapshot::WritingSystem(stored) = ctx.get_current(ws.id).unwrap() else {
        panic!("expected a writing system");
    };
    assert_eq!(stored.ws_id.as_str(), "seh");
    assert_eq!(stored.kind, WritingSystemKind::Vernacular);
    assert_eq!(stored.order, 2.0);
}

#[test]
fn create_semantic_domain_carries_code_and_predefined() {
    let id = Uuid::new_v4();
    let change = CreateSemanticDomainChange::new(
        id,
        MultiString::single("en", "Sky"),
        Some("1.2".into()),
        true,
    );

    let mut ctx = MemoryContext::new();
    ctx.commit(&change.into(), &commit_at(10)).unwrap();

    let EntitySnapshot::SemanticDomain(stored) = ctx.get_current(id).unwrap() else {
        panic!("expected a semantic domain");
    };
    assert_eq!(stored.code.as_deref(), Some("1.2"));
    assert!(stored.predefined);
}

#[test]
fn create_publication_by_name() {
    let id = Uuid::new_v4();
    let change = CreatePublicationChange::new(id, MultiString::single("en", "Main Dictionary"));

    let mut ctx = MemoryContext::new();
    ctx.commit(&change.into(), &commit_at(10)).unwrap();

    let EntitySnapshot::Publication(stored) = ctx.get_current(id).unwrap() else {
        panic!("expected a publication");
    };
    assert_eq!(stored.name.get(&"en".into()), Some("Main Dictionary"));
}

// ── Dispatch ──────────────────────────────────────────────────────

#[test]
fn creates_entity_flags_create_variants_only() {
    let entry = Entry::new(Uuid::new_v4());
    let create: Change = CreateEntryChange::new(&entry).into();
    let delete: Change = DeleteChange::<Entry>::new(entry.id).into();

    assert!(create.creates_entity());
    assert!(!delete.creates_entity());
}

#[test]
fn create_is_deterministic_under_redelivery() {
    let mut entry = Entry::new(Uuid::new_v4());
    entry.lexeme_form = MultiString::single("seh", "nyumba");
    let change: Change = CreateEntryChange::new(&entry).into();
    let commit = commit_at(10);

    let mut ctx = MemoryContext::new();
    ctx.commit(&change, &commit).unwrap();
    let first = ctx.get_current(entry.id).unwrap();
    ctx.commit(&change, &commit).unwrap();
    let second = ctx.get_current(entry.id).unwrap();

    assert_eq!(first, second);
}
