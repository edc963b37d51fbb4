//! Custom-view changes.
//!
//! Views are single-owner configuration, not collaboratively merged data.
//! An edit carries the whole view and replaces the stored value outright;
//! concurrent edits resolve last-writer-wins by commit order, which is the
//! right shape for "my saved settings" and would be wrong for dictionary
//! content.

use crate::{ChangeContext, CreateChange, EditChange, LexChange};
use lexibase_model::CustomView;
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Creates a [`CustomView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomViewChange {
    pub entity_id: Uuid,
    pub view: CustomView,
}

impl CreateCustomViewChange {
    /// Captures the view as the initial value; a nil id gets a fresh UUID.
    #[must_use]
    pub fn new(view: &CustomView) -> Self {
        let entity_id = if view.id.is_nil() {
            Uuid::new_v4()
        } else {
            view.id
        };
        let mut view = view.clone();
        view.id = entity_id;
        view.deleted_at = None;
        Self { entity_id, view }
    }
}

impl LexChange for CreateCustomViewChange {
    type Entity = CustomView;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl CreateChange for CreateCustomViewChange {
    fn new_entity(&self, _commit: &CommitMeta, _ctx: &dyn ChangeContext) -> CustomView {
        let mut view = self.view.clone();
        view.id = self.entity_id;
        view.deleted_at = None;
        view
    }
}

/// Replaces a [`CustomView`]'s value wholesale.
///
/// Identity and tombstone survive the edit: the stored id and `deleted_at`
/// win over whatever the carried value says.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCustomViewChange {
    pub entity_id: Uuid,
    pub view: CustomView,
}

impl EditCustomViewChange {
    #[must_use]
    pub fn new(entity_id: Uuid, view: CustomView) -> Self {
        Self { entity_id, view }
    }
}

impl LexChange for EditCustomViewChange {
    type Entity = CustomView;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl EditChange for EditCustomViewChange {
    fn apply_change(&self, view: &mut CustomView, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        let id = view.id;
        let deleted_at = view.deleted_at;
        *view = self.view.clone();
        view.id = id;
        view.deleted_at = deleted_at;
    }
}
