//! The query context handed to every change application.
//!
//! Replay hands each change a causally consistent view of the rest of the
//! database: everything that happened before this change's commit, plus
//! concurrent changes that have already been applied locally. Changes use
//! the context for every cross-entity dereference so that dangling
//! references resolve to deterministic outcomes instead of errors.

use lexibase_model::EntitySnapshot;
use uuid::Uuid;

/// Causally consistent read access during change application.
///
/// Only [`ChangeContext::get_current`] is required; the tombstone helpers
/// are provided on top of it and shared by every change's apply logic.
/// Implementations with a cheap deletion index may override `is_deleted`.
pub trait ChangeContext {
    /// Returns the entity's reconstructed state as of the current commit,
    /// or `None` if the context has never seen the id.
    fn get_current(&self, id: Uuid) -> Option<EntitySnapshot>;

    /// Returns true if the entity is tombstoned as of the current commit.
    ///
    /// An id the context has never seen counts as deleted: causal delivery
    /// guarantees a referenced entity's create has already been replayed,
    /// so an unknown id can only mean the reference is not safe to keep.
    fn is_deleted(&self, id: Uuid) -> bool {
        self.get_current(id).is_none_or(|s| s.is_deleted())
    }

    /// Returns `None` instead of the id when the target is deleted.
    fn deleted_as_null(&self, id: Uuid) -> Option<Uuid> {
        if self.is_deleted(id) { None } else { Some(id) }
    }

    /// Filters a candidate id collection down to non-tombstoned members.
    fn filter_deleted(&self, ids: &[Uuid]) -> Vec<Uuid> {
        ids.iter()
            .copied()
            .filter(|id| !self.is_deleted(*id))
            .collect()
    }
}

/// An in-memory context for tests and tools.
pub mod mock {
    use super::ChangeContext;
    use crate::{ApplyResult, Change};
    use lexibase_model::EntitySnapshot;
    use lexibase_types::CommitMeta;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    /// A context over a plain map of current snapshots.
    ///
    /// Doubles as a miniature replay loop: [`MemoryContext::commit`] applies
    /// a change against the stored state and runs the reference scrub a real
    /// replay framework performs after a deletion.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryContext {
        entities: BTreeMap<Uuid, EntitySnapshot>,
    }

    impl MemoryContext {
        /// Creates an empty context.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a context holding the given snapshots.
        pub fn from_snapshots(snapshots: impl IntoIterator<Item = EntitySnapshot>) -> Self {
            let mut ctx = Self::new();
            for snapshot in snapshots {
                ctx.insert(snapshot);
            }
            ctx
        }

        /// Inserts or replaces a snapshot, keyed by its entity id.
        pub fn insert(&mut self, snapshot: EntitySnapshot) {
            self.entities.insert(snapshot.id(), snapshot);
        }

        /// Builder-style [`MemoryContext::insert`].
        #[must_use]
        pub fn with(mut self, snapshot: EntitySnapshot) -> Self {
            self.insert(snapshot);
            self
        }

        /// Number of stored snapshots, tombstoned ones included.
        pub fn len(&self) -> usize {
            self.entities.len()
        }

        /// Returns true if no snapshot is stored.
        pub fn is_empty(&self) -> bool {
            self.entities.is_empty()
        }

        /// Iterates over all stored snapshots.
        pub fn snapshots(&self) -> impl Iterator<Item = &EntitySnapshot> {
            self.entities.values()
        }

        /// Applies one change and stores the resulting snapshot.
        ///
        /// When the change tombstones its entity, every other entity
        /// referencing it gets [`EntitySnapshot::remove_reference`] called,
        /// mirroring what the replay framework does after a deletion. The
        /// scrub cascades: an owner reference tombstones the dependent
        /// entity, whose own referencing entities are scrubbed in turn.
        pub fn commit(&mut self, change: &Change, commit: &CommitMeta) -> ApplyResult<()> {
            let id = change.entity_id();
            let prior = self.get_current(id);
            let was_deleted = prior.as_ref().is_some_and(EntitySnapshot::is_deleted);

            let next = change.apply(prior, commit, self)?;
            let newly_deleted = next.is_deleted() && !was_deleted;
            self.entities.insert(id, next);

            let mut pending = if newly_deleted { vec![id] } else { Vec::new() };
            while let Some(deleted_id) = pending.pop() {
                for snapshot in self.entities.values_mut() {
                    if snapshot.id() == deleted_id
                        || !snapshot.references().contains(&deleted_id)
                    {
                        continue;
                    }
                    let was = snapshot.is_deleted();
                    snapshot.remove_reference(deleted_id, commit);
                    if !was && snapshot.is_deleted() {
                        pending.push(snapshot.id());
                    }
                }
            }
            Ok(())
        }

        /// Applies a sequence of `(change, commit)` pairs in order.
        pub fn commit_all<'a>(
            &mut self,
            changes: impl IntoIterator<Item = (&'a Change, &'a CommitMeta)>,
        ) -> ApplyResult<()> {
            for (change, commit) in changes {
                self.commit(change, commit)?;
            }
            Ok(())
        }
    }

    impl ChangeContext for MemoryContext {
        fn get_current(&self, id: Uuid) -> Option<EntitySnapshot> {
            self.entities.get(&id).cloned()
        }
    }
}
