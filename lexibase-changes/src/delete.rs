//! Tombstone deletion.

use crate::{ChangeContext, EditChange, LexChange};
use lexibase_model::LexObject;
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uuid::Uuid;

/// Tombstones an entity of kind `T`.
///
/// Deletion never removes the row: the snapshot stays queryable so that
/// concurrent edits keep a target to fold into, and the replay framework
/// scrubs references from other entities. Re-delivery rewrites the same
/// timestamp, so the change is idempotent per commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteChange<T> {
    pub entity_id: Uuid,
    #[serde(skip)]
    marker: PhantomData<T>,
}

impl<T: LexObject> DeleteChange<T> {
    #[must_use]
    pub fn new(entity_id: Uuid) -> Self {
        Self {
            entity_id,
            marker: PhantomData,
        }
    }
}

impl<T: LexObject> LexChange for DeleteChange<T> {
    type Entity = T;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl<T: LexObject> EditChange for DeleteChange<T> {
    fn apply_change(&self, entity: &mut T, commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        entity.set_deleted_at(Some(commit.timestamp));
    }
}
