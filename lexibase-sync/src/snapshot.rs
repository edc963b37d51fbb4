//! The last-synced project marker.

use lexibase_changes::sibling_order;
use lexibase_model::{
    ComplexFormType, EntitySnapshot, Entry, ExampleSentence, LexObject, PartOfSpeech, Publication,
    SemanticDomain, Sense, WritingSystem,
};
use serde::{Deserialize, Serialize};

/// Everything a sync pass compares: one project's live dictionary content,
/// children attached to their owners.
///
/// A copy of this, taken from the CRDT side after each successful pass, is
/// persisted as the "last synced state" marker that makes the next pass
/// differential: each side's edits are whatever differs from the marker.
/// Tombstoned entities are never included; absence from a snapshot is what
/// "deleted" looks like at this boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub writing_systems: Vec<WritingSystem>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub parts_of_speech: Vec<PartOfSpeech>,
    #[serde(default)]
    pub semantic_domains: Vec<SemanticDomain>,
    #[serde(default)]
    pub complex_form_types: Vec<ComplexFormType>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl ProjectSnapshot {
    /// Assembles a project snapshot from flat entity snapshots.
    ///
    /// Tombstoned entities are dropped, senses attach to their entries and
    /// examples to their senses in `(order, id)` order, and every collection
    /// is sorted so that equal states produce identical snapshots. Embedded
    /// child projections on the inputs are discarded and rebuilt from the
    /// flat stream. Custom views are per-user UI configuration rather than
    /// dictionary content and are skipped.
    #[must_use]
    pub fn from_snapshots(snapshots: impl IntoIterator<Item = EntitySnapshot>) -> Self {
        let mut project = Self::default();
        let mut senses: Vec<Sense> = Vec::new();
        let mut examples: Vec<ExampleSentence> = Vec::new();

        for snapshot in snapshots {
            if snapshot.is_deleted() {
                continue;
            }
            match snapshot {
                EntitySnapshot::Entry(mut entry) => {
                    entry.senses.clear();
                    project.entries.push(entry);
                }
                EntitySnapshot::Sense(mut sense) => {
                    sense.example_sentences.clear();
                    senses.push(sense);
                }
                EntitySnapshot::ExampleSentence(example) => examples.push(example),
                EntitySnapshot::WritingSystem(ws) => project.writing_systems.push(ws),
                EntitySnapshot::PartOfSpeech(pos) => project.parts_of_speech.push(pos),
                EntitySnapshot::SemanticDomain(domain) => project.semantic_domains.push(domain),
                EntitySnapshot::ComplexFormType(cft) => project.complex_form_types.push(cft),
                EntitySnapshot::Publication(publication) => project.publications.push(publication),
                EntitySnapshot::CustomView(_) => {}
            }
        }

        // Children of entities absent from the stream are dropped: a live
        // child under a tombstoned owner cannot survive replay's cascade,
        // so an orphan here is stale input, not content.
        examples.sort_by(sibling_order);
        senses.sort_by(sibling_order);
        for example in examples {
            if let Some(sense) = senses.iter_mut().find(|s| s.id == example.sense_id) {
                sense.example_sentences.push(example);
            }
        }
        project.entries.sort_by_key(|e| e.id);
        for sense in senses {
            if let Some(entry) = project.entries.iter_mut().find(|e| e.id == sense.entry_id) {
                entry.senses.push(sense);
            }
        }
        project.writing_systems.sort_by(sibling_order);
        project.publications.sort_by_key(|p| p.id);
        project.parts_of_speech.sort_by_key(|p| p.id);
        project.semantic_domains.sort_by_key(|d| d.id);
        project.complex_form_types.sort_by_key(|t| t.id);
        project
    }

    /// Flattens the snapshot back into per-entity snapshots, the inverse of
    /// [`ProjectSnapshot::from_snapshots`].
    #[must_use]
    pub fn into_snapshots(self) -> Vec<EntitySnapshot> {
        let mut snapshots = Vec::new();
        for ws in self.writing_systems {
            snapshots.push(ws.into_snapshot());
        }
        for publication in self.publications {
            snapshots.push(publication.into_snapshot());
        }
        for pos in self.parts_of_speech {
            snapshots.push(pos.into_snapshot());
        }
        for domain in self.semantic_domains {
            snapshots.push(domain.into_snapshot());
        }
        for cft in self.complex_form_types {
            snapshots.push(cft.into_snapshot());
        }
        for mut entry in self.entries {
            let senses = std::mem::take(&mut entry.senses);
            snapshots.push(entry.into_snapshot());
            for mut sense in senses {
                let examples = std::mem::take(&mut sense.example_sentences);
                snapshots.push(sense.into_snapshot());
                for example in examples {
                    snapshots.push(example.into_snapshot());
                }
            }
        }
        snapshots
    }

    /// True when the project holds no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writing_systems.is_empty()
            && self.publications.is_empty()
            && self.parts_of_speech.is_empty()
            && self.semantic_domains.is_empty()
            && self.complex_form_types.is_empty()
            && self.entries.is_empty()
    }
}
