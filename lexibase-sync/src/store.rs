//! Boundary traits between the change log, the legacy store, and the
//! last-synced marker.
//!
//! A host wires concrete implementations of these into [`crate::SyncService`].
//! The sync pass itself stays I/O-free: it reads two project states and the
//! marker, diffs, and hands the results back through these traits.

use crate::error::SyncResult;
use crate::snapshot::ProjectSnapshot;
use async_trait::async_trait;
use lexibase_changes::Change;

/// Read/write access to the legacy project this CRDT project mirrors.
///
/// Implementations adapt a concrete legacy lexicon tool to the sync pass.
/// The sync service never reads or writes CRDT state through this trait.
#[async_trait]
pub trait LegacyStore: Send + Sync {
    /// Reads the legacy project's full current state.
    async fn load_project(&self) -> SyncResult<ProjectSnapshot>;

    /// Applies update records produced by a sync pass.
    ///
    /// Updates use the same vocabulary as CRDT changes; the adapter maps
    /// each record onto its own update API. Records arrive in dependency
    /// order, referenced entities before the entities referencing them.
    async fn apply_updates(&self, updates: &[Change]) -> SyncResult<()>;

    /// Persists pending writes at the end of a pass.
    async fn flush(&self) -> SyncResult<()> {
        Ok(())
    }
}

/// The write path into the CRDT project, plus the projected state a pass
/// diffs against.
///
/// Appending through this trait is the only way a sync pass mutates CRDT
/// data: every record enters the normal commit path and folds through the
/// usual apply machinery, merge guards included.
#[async_trait]
pub trait ChangeSink: Send + Sync {
    /// Appends changes to the commit log, in order.
    async fn append(&self, changes: &[Change]) -> SyncResult<()>;

    /// The current projected state: live entities only, children attached.
    async fn project_state(&self) -> SyncResult<ProjectSnapshot>;
}

/// Load/persist the per-project last-synced marker.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Loads the marker, `None` before the first import.
    async fn load(&self) -> SyncResult<Option<ProjectSnapshot>>;

    /// Replaces the marker after a successful pass.
    async fn save(&self, snapshot: &ProjectSnapshot) -> SyncResult<()>;
}

/// In-memory boundary implementations for tests and tools.
pub mod mock {
    use super::{ChangeSink, LegacyStore, SnapshotStore};
    use crate::error::SyncResult;
    use crate::snapshot::ProjectSnapshot;
    use async_trait::async_trait;
    use lexibase_changes::Change;
    use lexibase_changes::mock::MemoryContext;
    use lexibase_types::{ClientId, CommitId, CommitMeta, HybridTimestamp};
    use std::sync::Mutex;

    struct Replica {
        context: MemoryContext,
        clock: HybridTimestamp,
    }

    impl Replica {
        fn new(context: MemoryContext) -> Self {
            Self {
                context,
                clock: HybridTimestamp::now(),
            }
        }

        fn commit(&mut self, client_id: ClientId, change: &Change) -> SyncResult<()> {
            self.clock = self.clock.tick();
            let commit = CommitMeta::new(CommitId::new(), self.clock, client_id);
            self.context.commit(change, &commit)?;
            Ok(())
        }

        fn project(&self) -> ProjectSnapshot {
            ProjectSnapshot::from_snapshots(self.context.snapshots().cloned())
        }
    }

    /// A CRDT backend over [`MemoryContext`]: appended changes fold through
    /// the real apply machinery, so the projected state is genuine.
    pub struct MemoryChangeSink {
        client_id: ClientId,
        replica: Mutex<Replica>,
        log: Mutex<Vec<Change>>,
    }

    impl MemoryChangeSink {
        /// Creates an empty sink.
        #[must_use]
        pub fn new() -> Self {
            Self {
                client_id: ClientId::new(),
                replica: Mutex::new(Replica::new(MemoryContext::new())),
                log: Mutex::new(Vec::new()),
            }
        }

        /// Commits one change as a local edit, outside any sync pass.
        pub fn commit_local(&self, change: Change) -> SyncResult<()> {
            self.replica.lock().unwrap().commit(self.client_id, &change)?;
            self.log.lock().unwrap().push(change);
            Ok(())
        }

        /// Every change committed so far, sync-appended and local alike.
        #[must_use]
        pub fn committed(&self) -> Vec<Change> {
            self.log.lock().unwrap().clone()
        }

        /// The current projected state.
        #[must_use]
        pub fn state(&self) -> ProjectSnapshot {
            self.replica.lock().unwrap().project()
        }
    }

    impl Default for MemoryChangeSink {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ChangeSink for MemoryChangeSink {
        async fn append(&self, changes: &[Change]) -> SyncResult<()> {
            let mut replica = self.replica.lock().unwrap();
            let mut log = self.log.lock().unwrap();
            for change in changes {
                replica.commit(self.client_id, change)?;
                log.push(change.clone());
            }
            Ok(())
        }

        async fn project_state(&self) -> SyncResult<ProjectSnapshot> {
            Ok(self.replica.lock().unwrap().project())
        }
    }

    /// A legacy store that folds the update records it receives into its
    /// own replica, standing in for an adapter that maps each record onto
    /// a real legacy project.
    pub struct MemoryLegacyStore {
        client_id: ClientId,
        replica: Mutex<Replica>,
        updates: Mutex<Vec<Change>>,
    }

    impl MemoryLegacyStore {
        /// Creates a legacy store holding the given project state.
        #[must_use]
        pub fn new(state: ProjectSnapshot) -> Self {
            Self {
                client_id: ClientId::new(),
                replica: Mutex::new(Replica::new(MemoryContext::from_snapshots(
                    state.into_snapshots(),
                ))),
                updates: Mutex::new(Vec::new()),
            }
        }

        /// Replaces the whole project state, standing in for edits made in
        /// the legacy tool since the last pass.
        pub fn set_state(&self, state: ProjectSnapshot) {
            *self.replica.lock().unwrap() =
                Replica::new(MemoryContext::from_snapshots(state.into_snapshots()));
        }

        /// The current project state.
        #[must_use]
        pub fn state(&self) -> ProjectSnapshot {
            self.replica.lock().unwrap().project()
        }

        /// Every update record received so far.
        #[must_use]
        pub fn updates(&self) -> Vec<Change> {
            self.updates.lock().unwrap().clone()
        }
    }

    impl Default for MemoryLegacyStore {
        fn default() -> Self {
            Self::new(ProjectSnapshot::default())
        }
    }

    #[async_trait]
    impl LegacyStore for MemoryLegacyStore {
        async fn load_project(&self) -> SyncResult<ProjectSnapshot> {
            Ok(self.replica.lock().unwrap().project())
        }

        async fn apply_updates(&self, updates: &[Change]) -> SyncResult<()> {
            let mut replica = self.replica.lock().unwrap();
            let mut log = self.updates.lock().unwrap();
            for update in updates {
                replica.commit(self.client_id, update)?;
                log.push(update.clone());
            }
            Ok(())
        }
    }

    /// A snapshot marker held in memory.
    #[derive(Default)]
    pub struct MemorySnapshotStore {
        marker: Mutex<Option<ProjectSnapshot>>,
    }

    impl MemorySnapshotStore {
        /// Creates an empty marker store (project never imported).
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a marker store already holding a snapshot.
        #[must_use]
        pub fn with_marker(snapshot: ProjectSnapshot) -> Self {
            Self {
                marker: Mutex::new(Some(snapshot)),
            }
        }

        /// The stored marker, if any.
        #[must_use]
        pub fn marker(&self) -> Option<ProjectSnapshot> {
            self.marker.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SnapshotStore for MemorySnapshotStore {
        async fn load(&self) -> SyncResult<Option<ProjectSnapshot>> {
            Ok(self.marker.lock().unwrap().clone())
        }

        async fn save(&self, snapshot: &ProjectSnapshot) -> SyncResult<()> {
            *self.marker.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }
    }
}
