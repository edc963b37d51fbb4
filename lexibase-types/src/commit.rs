//! Commit metadata handed to every change application.

use crate::{ClientId, CommitId, HybridTimestamp};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Metadata of the commit a change belongs to.
///
/// The commit log owns commit construction; change application only ever
/// reads this. Commits are totally ordered by `(timestamp, id)` so replicas
/// agree on the position of every commit regardless of arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitMeta {
    /// Unique identifier of the commit.
    pub id: CommitId,
    /// When the commit was authored, in hybrid logical time.
    pub timestamp: HybridTimestamp,
    /// The client that authored the commit.
    pub client_id: ClientId,
}

impl CommitMeta {
    /// Creates commit metadata from its parts.
    #[must_use]
    pub const fn new(id: CommitId, timestamp: HybridTimestamp, client_id: ClientId) -> Self {
        Self {
            id,
            timestamp,
            client_id,
        }
    }

    /// The key commits sort by: timestamp first, commit id as tie-breaker.
    #[must_use]
    pub fn order_key(&self) -> (HybridTimestamp, Uuid) {
        (self.timestamp, self.id.as_uuid())
    }
}

impl PartialOrd for CommitMeta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CommitMeta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}
