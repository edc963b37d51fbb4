//! Fractional ordering of list members.
//!
//! Siblings carry `f64` sort keys instead of dense indices. Moving an item
//! assigns it a key computed from its new neighbors' keys; nothing else in
//! the list is renumbered, so concurrent moves of different items never
//! conflict. Concurrent moves to "the same place" each compute a midpoint
//! independently and land on distinct, order-preserving values; a genuine
//! key tie is broken by UUID when the list is sorted.

use crate::{ChangeContext, EditChange, LexChange};
use lexibase_model::{LexObject, Ordered};
use lexibase_types::CommitMeta;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::marker::PhantomData;
use uuid::Uuid;

/// Assigns a new order key to an entity of kind `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOrderChange<T> {
    pub entity_id: Uuid,
    pub order: f64,
    #[serde(skip)]
    marker: PhantomData<T>,
}

impl<T: LexObject + Ordered> SetOrderChange<T> {
    /// Sets an explicit order key.
    #[must_use]
    pub fn to(entity_id: Uuid, order: f64) -> Self {
        Self {
            entity_id,
            order,
            marker: PhantomData,
        }
    }

    /// Places the entity between two siblings, at the arithmetic midpoint
    /// of their keys.
    #[must_use]
    pub fn between(entity_id: Uuid, left: &T, right: &T) -> Self {
        Self::to(entity_id, (left.order() + right.order()) / 2.0)
    }

    /// Places the entity after the last sibling.
    #[must_use]
    pub fn after(entity_id: Uuid, prev: &T) -> Self {
        Self::to(entity_id, prev.order() + 1.0)
    }

    /// Places the entity before the first sibling.
    #[must_use]
    pub fn before(entity_id: Uuid, next: &T) -> Self {
        Self::to(entity_id, next.order() - 1.0)
    }
}

impl<T: LexObject + Ordered> LexChange for SetOrderChange<T> {
    type Entity = T;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl<T: LexObject + Ordered> EditChange for SetOrderChange<T> {
    fn apply_change(&self, entity: &mut T, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        entity.set_order(self.order);
    }
}

/// Display and merge ordering for siblings: order key first, UUID as the
/// deterministic tiebreak.
#[must_use]
pub fn sibling_order<T: LexObject + Ordered>(a: &T, b: &T) -> Ordering {
    a.order()
        .total_cmp(&b.order())
        .then_with(|| a.id().cmp(&b.id()))
}
