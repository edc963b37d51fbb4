//! The sync passes: import and differential three-way sync.
//!
//! A pass never replays history at the legacy store. It compares three
//! project states (the last-synced marker, the legacy store, and the change
//! log's projection) and moves only the differences, as ordinary changes.

use crate::diff::project_diff;
use crate::error::{SyncError, SyncResult};
use crate::snapshot::ProjectSnapshot;
use crate::store::{ChangeSink, LegacyStore, SnapshotStore};
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a sync pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute both diffs but write to neither store and leave the marker
    /// untouched.
    pub dry_run: bool,
}

/// What a pass moved (or, dry, would move) in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Changes appended to the change log.
    pub crdt_changes: usize,
    /// Update records handed to the legacy store.
    pub legacy_changes: usize,
}

/// Coordinates one project's sync passes across the three stores.
pub struct SyncService {
    legacy: Arc<dyn LegacyStore>,
    sink: Arc<dyn ChangeSink>,
    snapshots: Arc<dyn SnapshotStore>,
    options: SyncOptions,
}

impl SyncService {
    /// Creates a service with default options.
    pub fn new(
        legacy: Arc<dyn LegacyStore>,
        sink: Arc<dyn ChangeSink>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self::with_options(legacy, sink, snapshots, SyncOptions::default())
    }

    /// Creates a service with explicit options.
    pub fn with_options(
        legacy: Arc<dyn LegacyStore>,
        sink: Arc<dyn ChangeSink>,
        snapshots: Arc<dyn SnapshotStore>,
        options: SyncOptions,
    ) -> Self {
        Self {
            legacy,
            sink,
            snapshots,
            options,
        }
    }

    /// The options this service runs with.
    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// First pass for a project: copies the whole legacy project into the
    /// change log and establishes the marker.
    ///
    /// An import is a diff against the empty project, so it reuses the
    /// normal diff path; it just must not run twice, or every legacy entity
    /// would be re-created over the existing log.
    pub async fn import_pass(&self) -> SyncResult<SyncSummary> {
        if self.snapshots.load().await?.is_some() {
            return Err(SyncError::AlreadyImported);
        }
        let legacy_state = self.legacy.load_project().await?;
        let changes = project_diff(&ProjectSnapshot::default(), &legacy_state)?;
        info!("Importing {} changes from the legacy project", changes.len());

        let summary = SyncSummary {
            crdt_changes: changes.len(),
            legacy_changes: 0,
        };
        if self.options.dry_run {
            return Ok(summary);
        }

        if !changes.is_empty() {
            self.sink.append(&changes).await?;
        }
        // The marker is the log's own projection of what it now holds, not
        // the legacy state: the next pass must diff against exactly what
        // fold-up produced.
        let marker = self.sink.project_state().await?;
        self.snapshots.save(&marker).await?;
        Ok(summary)
    }

    /// Differential pass: moves legacy-born edits into the change log, then
    /// log-born edits back to the legacy store, and advances the marker.
    pub async fn sync_pass(&self) -> SyncResult<SyncSummary> {
        let Some(last_synced) = self.snapshots.load().await? else {
            return Err(SyncError::NotImported);
        };
        let legacy_state = self.legacy.load_project().await?;

        // Legacy-born edits land in the log first, so the reverse diff sees
        // them and does not echo them back. This is also what makes the
        // legacy value win when both sides edited the same field.
        let to_crdt = project_diff(&last_synced, &legacy_state)?;
        debug!("{} legacy-born changes for the change log", to_crdt.len());
        if !self.options.dry_run && !to_crdt.is_empty() {
            self.sink.append(&to_crdt).await?;
        }

        // Dry runs skip the append above, so this projection is stale and
        // the reverse count an upper bound.
        let crdt_state = self.sink.project_state().await?;
        let to_legacy = project_diff(&legacy_state, &crdt_state)?;
        debug!("{} log-born updates for the legacy store", to_legacy.len());

        let summary = SyncSummary {
            crdt_changes: to_crdt.len(),
            legacy_changes: to_legacy.len(),
        };
        if self.options.dry_run {
            info!(
                "Dry run: would sync {} changes in, {} updates out",
                summary.crdt_changes, summary.legacy_changes
            );
            return Ok(summary);
        }

        if !to_legacy.is_empty() {
            self.legacy.apply_updates(&to_legacy).await?;
        }
        self.legacy.flush().await?;
        self.snapshots.save(&crdt_state).await?;
        info!(
            "Synced {} changes in, {} updates out",
            summary.crdt_changes, summary.legacy_changes
        );
        Ok(summary)
    }
}
