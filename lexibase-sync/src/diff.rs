//! Differential comparison of two project states.
//!
//! [`project_diff`] computes the changes that turn one [`ProjectSnapshot`]
//! into another. The output speaks the normal change vocabulary, so one diff
//! routine serves both directions of a sync pass: toward the change log the
//! changes are appended and folded, toward the legacy store they are handed
//! to the adapter as update records.
//!
//! Entities pair by UUID, except writing systems, which pair by tag: two
//! stores may know `"en"` under different entity UUIDs, and the tag is what
//! keys every multitext value.

use crate::error::SyncResult;
use crate::snapshot::ProjectSnapshot;
use lexibase_changes::{
    AddComplexFormTypeChange, AddPublicationChange, AddSemanticDomainChange, Change,
    CreateComplexFormTypeChange, CreateEntryChange, CreateExampleSentenceChange,
    CreatePartOfSpeechChange, CreatePublicationChange, CreateSemanticDomainChange,
    CreateSenseChange, CreateWritingSystemChange, DeleteChange, JsonPatchChange, LexPatch,
    PatchOp, RemoveComplexFormTypeChange, RemovePublicationChange, RemoveSemanticDomainChange,
    SetOrderChange, SetPartOfSpeechChange,
};
use lexibase_model::{
    ComplexFormType, Entry, ExampleSentence, MultiString, PartOfSpeech, Publication,
    RichMultiString, SemanticDomain, Sense, WritingSystem, WritingSystemId,
};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use uuid::Uuid;

/// Computes the changes that turn `before` into `after`.
///
/// Collections diff in dependency order, referenced entities ahead of the
/// entities referencing them, so every reference an add-guard checks is
/// already live when the produced changes fold in sequence.
pub fn project_diff(before: &ProjectSnapshot, after: &ProjectSnapshot) -> SyncResult<Vec<Change>> {
    let mut changes = Vec::new();
    diff_writing_systems(before, after, &mut changes)?;
    diff_publications(before, after, &mut changes)?;
    diff_parts_of_speech(before, after, &mut changes)?;
    diff_semantic_domains(before, after, &mut changes)?;
    diff_complex_form_types(before, after, &mut changes)?;
    diff_entries(before, after, &mut changes)?;
    Ok(changes)
}

// ── Collection pairing ──────────────────────────────────────────

struct Pairing<'a, T> {
    /// In `after` only, in `after` order.
    added: Vec<&'a T>,
    /// In `before` only, in `before` order.
    removed: Vec<&'a T>,
    /// In both, in `after` order.
    paired: Vec<(&'a T, &'a T)>,
}

fn pair_by<'a, T, K, F>(before: &'a [T], after: &'a [T], key: F) -> Pairing<'a, T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let before_by_key: HashMap<K, &T> = before.iter().map(|item| (key(item), item)).collect();
    let after_keys: HashSet<K> = after.iter().map(&key).collect();

    let mut added = Vec::new();
    let mut paired = Vec::new();
    for item in after {
        match before_by_key.get(&key(item)) {
            Some(prior) => paired.push((*prior, item)),
            None => added.push(item),
        }
    }
    let removed = before
        .iter()
        .filter(|item| !after_keys.contains(&key(item)))
        .collect();

    Pairing {
        added,
        removed,
        paired,
    }
}

// ── Writing systems ─────────────────────────────────────────────

fn diff_writing_systems(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.writing_systems, &after.writing_systems, |ws| {
        ws.ws_id.clone()
    });
    for ws in pairing.added {
        out.push(CreateWritingSystemChange::new(ws, ws.id, ws.order).into());
    }
    // Removals are never forwarded. Dropping a writing system orphans every
    // value keyed by its tag across the whole project, so a missing tag is
    // treated as a gap on that side: the opposite pass recreates it.
    for (b, a) in pairing.paired {
        let mut ops = Vec::new();
        if b.name != a.name {
            ops.push(PatchOp::replace("name", Value::String(a.name.clone())));
        }
        if b.abbreviation != a.abbreviation {
            ops.push(PatchOp::replace(
                "abbreviation",
                Value::String(a.abbreviation.clone()),
            ));
        }
        if b.font != a.font {
            ops.push(PatchOp::replace("font", Value::String(a.font.clone())));
        }
        if b.exemplars != a.exemplars {
            // Absent from the serialized form when empty, so add, not replace.
            ops.push(PatchOp::add("exemplars", json!(a.exemplars)));
        }
        if !ops.is_empty() {
            out.push(JsonPatchChange::<WritingSystem>::new(b.id, LexPatch::new(ops)?).into());
        }
        if b.order != a.order {
            out.push(SetOrderChange::<WritingSystem>::to(b.id, a.order).into());
        }
    }
    Ok(())
}

// ── Reference lists ─────────────────────────────────────────────

fn diff_publications(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.publications, &after.publications, |p| p.id);
    for publication in pairing.added {
        out.push(CreatePublicationChange::new(publication.id, publication.name.clone()).into());
    }
    for publication in pairing.removed {
        out.push(DeleteChange::<Publication>::new(publication.id).into());
    }
    for (b, a) in pairing.paired {
        let ops = multi_string_ops("name", &b.name, &a.name);
        if !ops.is_empty() {
            out.push(JsonPatchChange::<Publication>::new(b.id, LexPatch::new(ops)?).into());
        }
    }
    Ok(())
}

fn diff_parts_of_speech(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.parts_of_speech, &after.parts_of_speech, |p| p.id);
    for pos in pairing.added {
        out.push(CreatePartOfSpeechChange::new(pos.id, pos.name.clone(), pos.predefined).into());
    }
    for pos in pairing.removed {
        out.push(DeleteChange::<PartOfSpeech>::new(pos.id).into());
    }
    for (b, a) in pairing.paired {
        let ops = multi_string_ops("name", &b.name, &a.name);
        if !ops.is_empty() {
            out.push(JsonPatchChange::<PartOfSpeech>::new(b.id, LexPatch::new(ops)?).into());
        }
    }
    Ok(())
}

fn diff_semantic_domains(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.semantic_domains, &after.semantic_domains, |d| d.id);
    for domain in pairing.added {
        out.push(
            CreateSemanticDomainChange::new(
                domain.id,
                domain.name.clone(),
                domain.code.clone(),
                domain.predefined,
            )
            .into(),
        );
    }
    for domain in pairing.removed {
        out.push(DeleteChange::<SemanticDomain>::new(domain.id).into());
    }
    for (b, a) in pairing.paired {
        let mut ops = multi_string_ops("name", &b.name, &a.name);
        if b.code != a.code {
            let value = a
                .code
                .as_ref()
                .map_or(Value::Null, |code| Value::String(code.clone()));
            ops.push(PatchOp::add("code", value));
        }
        if !ops.is_empty() {
            out.push(JsonPatchChange::<SemanticDomain>::new(b.id, LexPatch::new(ops)?).into());
        }
    }
    Ok(())
}

fn diff_complex_form_types(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.complex_form_types, &after.complex_form_types, |t| {
        t.id
    });
    for cft in pairing.added {
        out.push(CreateComplexFormTypeChange::new(cft.id, cft.name.clone()).into());
    }
    for cft in pairing.removed {
        out.push(DeleteChange::<ComplexFormType>::new(cft.id).into());
    }
    for (b, a) in pairing.paired {
        let ops = multi_string_ops("name", &b.name, &a.name);
        if !ops.is_empty() {
            out.push(JsonPatchChange::<ComplexFormType>::new(b.id, LexPatch::new(ops)?).into());
        }
    }
    Ok(())
}

// ── Entries ─────────────────────────────────────────────────────

fn diff_entries(
    before: &ProjectSnapshot,
    after: &ProjectSnapshot,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let pairing = pair_by(&before.entries, &after.entries, |e| e.id);
    for entry in pairing.added {
        push_entry_graph(entry, out);
    }
    for entry in pairing.removed {
        out.push(DeleteChange::<Entry>::new(entry.id).into());
    }
    for (b, a) in pairing.paired {
        entry_pair_diff(b, a, out)?;
    }
    Ok(())
}

/// Creates an entry and everything under it. The create captures the
/// entry's own fields; memberships and children need their own changes.
fn push_entry_graph(entry: &Entry, out: &mut Vec<Change>) {
    out.push(CreateEntryChange::new(entry).into());
    for publication in &entry.publish_in {
        out.push(AddPublicationChange::new(entry.id, publication.clone()).into());
    }
    for cft in &entry.complex_form_types {
        out.push(AddComplexFormTypeChange::new(entry.id, cft.clone()).into());
    }
    for sense in &entry.senses {
        push_sense_graph(sense, entry.id, out);
    }
}

fn push_sense_graph(sense: &Sense, entry_id: Uuid, out: &mut Vec<Change>) {
    out.push(CreateSenseChange::new(sense, entry_id).into());
    for example in &sense.example_sentences {
        out.push(CreateExampleSentenceChange::new(example, sense.id).into());
    }
}

fn entry_pair_diff(b: &Entry, a: &Entry, out: &mut Vec<Change>) -> SyncResult<()> {
    let mut ops = multi_string_ops("lexemeForm", &b.lexeme_form, &a.lexeme_form);
    ops.extend(multi_string_ops(
        "citationForm",
        &b.citation_form,
        &a.citation_form,
    ));
    ops.extend(rich_multi_string_ops(
        "literalMeaning",
        &b.literal_meaning,
        &a.literal_meaning,
    )?);
    ops.extend(rich_multi_string_ops("note", &b.note, &a.note)?);
    if !ops.is_empty() {
        out.push(JsonPatchChange::<Entry>::new(b.id, LexPatch::new(ops)?).into());
    }

    // Paired references carry no field edits here; the referenced entity's
    // own stream owns its fields.
    let publications = pair_by(&b.publish_in, &a.publish_in, |p| p.id);
    for publication in publications.added {
        out.push(AddPublicationChange::new(b.id, publication.clone()).into());
    }
    for publication in publications.removed {
        out.push(RemovePublicationChange::new(b.id, publication.id).into());
    }
    let cfts = pair_by(&b.complex_form_types, &a.complex_form_types, |t| t.id);
    for cft in cfts.added {
        out.push(AddComplexFormTypeChange::new(b.id, cft.clone()).into());
    }
    for cft in cfts.removed {
        out.push(RemoveComplexFormTypeChange::new(b.id, cft.id).into());
    }

    let senses = pair_by(&b.senses, &a.senses, |s| s.id);
    for sense in senses.added {
        push_sense_graph(sense, b.id, out);
    }
    for sense in senses.removed {
        out.push(DeleteChange::<Sense>::new(sense.id).into());
    }
    for (sb, sa) in senses.paired {
        sense_pair_diff(sb, sa, out)?;
    }
    Ok(())
}

fn sense_pair_diff(b: &Sense, a: &Sense, out: &mut Vec<Change>) -> SyncResult<()> {
    let mut ops = rich_multi_string_ops("definition", &b.definition, &a.definition)?;
    ops.extend(multi_string_ops("gloss", &b.gloss, &a.gloss));
    if !ops.is_empty() {
        out.push(JsonPatchChange::<Sense>::new(b.id, LexPatch::new(ops)?).into());
    }
    if b.part_of_speech_id != a.part_of_speech_id {
        out.push(SetPartOfSpeechChange::new(b.id, a.part_of_speech_id).into());
    }
    let domains = pair_by(&b.semantic_domains, &a.semantic_domains, |d| d.id);
    for domain in domains.added {
        out.push(AddSemanticDomainChange::new(b.id, domain.clone()).into());
    }
    for domain in domains.removed {
        out.push(RemoveSemanticDomainChange::new(b.id, domain.id).into());
    }
    if b.order != a.order {
        out.push(SetOrderChange::<Sense>::to(b.id, a.order).into());
    }

    let examples = pair_by(&b.example_sentences, &a.example_sentences, |e| e.id);
    for example in examples.added {
        out.push(CreateExampleSentenceChange::new(example, b.id).into());
    }
    for example in examples.removed {
        out.push(DeleteChange::<ExampleSentence>::new(example.id).into());
    }
    for (eb, ea) in examples.paired {
        example_pair_diff(eb, ea, out)?;
    }
    Ok(())
}

fn example_pair_diff(
    b: &ExampleSentence,
    a: &ExampleSentence,
    out: &mut Vec<Change>,
) -> SyncResult<()> {
    let mut ops = rich_multi_string_ops("sentence", &b.sentence, &a.sentence)?;
    ops.extend(rich_multi_string_ops(
        "translation",
        &b.translation,
        &a.translation,
    )?);
    if b.reference != a.reference {
        let value = match &a.reference {
            Some(reference) => serde_json::to_value(reference)?,
            None => Value::Null,
        };
        // Add, not replace: the field is absent from the serialized form
        // when unset, and a null clears it on the way back in.
        ops.push(PatchOp::add("reference", value));
    }
    if !ops.is_empty() {
        out.push(JsonPatchChange::<ExampleSentence>::new(b.id, LexPatch::new(ops)?).into());
    }
    if b.order != a.order {
        out.push(SetOrderChange::<ExampleSentence>::to(b.id, a.order).into());
    }
    Ok(())
}

// ── Multitext fields ────────────────────────────────────────────

/// Patch ops turning multitext `before` into `after` under `field`.
///
/// The patch grammar has no remove, so a dropped value is written as a
/// replace with the empty string: the canonical "cleared" form, dropped
/// again when the patched entity deserializes.
#[must_use]
pub fn multi_string_ops(field: &str, before: &MultiString, after: &MultiString) -> Vec<PatchOp> {
    let mut ops = Vec::new();
    for (ws, value) in after.iter() {
        let path = field_path(field, ws);
        match before.get(ws) {
            None => ops.push(PatchOp::add(path, Value::String(value.to_owned()))),
            Some(prior) if prior != value => {
                ops.push(PatchOp::replace(path, Value::String(value.to_owned())));
            }
            Some(_) => {}
        }
    }
    for (ws, _) in before.iter() {
        if !after.contains(ws) {
            ops.push(PatchOp::replace(
                field_path(field, ws),
                Value::String(String::new()),
            ));
        }
    }
    ops
}

/// Rich-text counterpart of [`multi_string_ops`]. The cleared form is an
/// empty object: a rich string with no spans.
pub fn rich_multi_string_ops(
    field: &str,
    before: &RichMultiString,
    after: &RichMultiString,
) -> SyncResult<Vec<PatchOp>> {
    let mut ops = Vec::new();
    for (ws, value) in after.iter() {
        let path = field_path(field, ws);
        match before.get(ws) {
            None => ops.push(PatchOp::add(path, serde_json::to_value(value)?)),
            Some(prior) if prior != value => {
                ops.push(PatchOp::replace(path, serde_json::to_value(value)?));
            }
            Some(_) => {}
        }
    }
    for (ws, _) in before.iter() {
        if after.get(ws).is_none() {
            ops.push(PatchOp::replace(field_path(field, ws), json!({})));
        }
    }
    Ok(ops)
}

fn field_path(field: &str, ws: &WritingSystemId) -> String {
    let tag = ws.as_str().replace('~', "~0").replace('/', "~1");
    format!("{field}/{tag}")
}
