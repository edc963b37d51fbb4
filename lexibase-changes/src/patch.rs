//! Structural field edits as validated JSON patches.
//!
//! `JsonPatchChange<T>` covers the long tail of scalar and map-valued field
//! updates with one generic change instead of a change type per field. The
//! patch grammar is deliberately narrower than RFC 6902:
//!
//! - no `remove` op (not even expressible in [`PatchOp`]);
//! - no path segment may begin with an ASCII digit.
//!
//! List positions are not stable identifiers under concurrent mutation: a
//! patch authored against position 2 may, after concurrent inserts from
//! another replica, land on a different logical item. Rejecting indexed
//! paths and removals at construction closes that hole at the type level;
//! structural list edits go through the dedicated id-addressed changes
//! instead.

use crate::{ChangeContext, EditChange, LexChange, PatchError, PatchResult};
use lexibase_model::LexObject;
use lexibase_types::CommitMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::warn;
use uuid::Uuid;

/// One patch operation. Paths are `/`-separated field names relative to the
/// entity root, e.g. `"gloss/en"`; `~0`/`~1` escape literal `~` and `/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PatchOp {
    /// Sets a field, creating it if absent. On a list field, path segment
    /// `-` appends.
    Add { path: String, value: Value },

    /// Sets a field only if it already exists.
    Replace { path: String, value: Value },

    /// Moves the value at `from` to `path`.
    Move { from: String, path: String },
}

impl PatchOp {
    #[must_use]
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self::Add {
            path: path.into(),
            value,
        }
    }

    #[must_use]
    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self::Replace {
            path: path.into(),
            value,
        }
    }

    #[must_use]
    pub fn move_value(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Move {
            from: from.into(),
            path: path.into(),
        }
    }

    fn paths(&self) -> [Option<&str>; 2] {
        match self {
            Self::Add { path, .. } | Self::Replace { path, .. } => [Some(path), None],
            Self::Move { from, path } => [Some(from), Some(path)],
        }
    }
}

/// A validated sequence of [`PatchOp`]s.
///
/// Validation runs at construction and again on deserialization, so a
/// `LexPatch` in hand is always safe to put in the log; apply never
/// re-checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LexPatch {
    ops: Vec<PatchOp>,
}

impl LexPatch {
    /// Validates and wraps a sequence of operations.
    pub fn new(ops: Vec<PatchOp>) -> PatchResult<Self> {
        for op in &ops {
            for path in op.paths().into_iter().flatten() {
                validate_path(path)?;
            }
        }
        Ok(Self { ops })
    }

    /// Validates and wraps a single operation.
    pub fn single(op: PatchOp) -> PatchResult<Self> {
        Self::new(vec![op])
    }

    /// The validated operations, in application order.
    #[must_use]
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl TryFrom<Vec<PatchOp>> for LexPatch {
    type Error = PatchError;

    fn try_from(ops: Vec<PatchOp>) -> PatchResult<Self> {
        Self::new(ops)
    }
}

impl<'de> Deserialize<'de> for LexPatch {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ops = Vec::<PatchOp>::deserialize(deserializer)?;
        Self::new(ops).map_err(serde::de::Error::custom)
    }
}

fn validate_path(path: &str) -> PatchResult<()> {
    if path.is_empty() {
        return Err(PatchError::MalformedPath {
            path: path.to_owned(),
        });
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(PatchError::MalformedPath {
                path: path.to_owned(),
            });
        }
        if segment.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(PatchError::IndexedPath {
                path: path.to_owned(),
            });
        }
    }
    Ok(())
}

/// Applies a [`LexPatch`] to entity `T`'s JSON representation.
///
/// Apply is soft: an op whose target is missing is skipped, and a patch
/// that produces JSON no longer deserializable as `T` is dropped whole.
/// A divergent replica state must degrade to a no-op here, never to an
/// error, or replicas would disagree on whether the change applied. The
/// entity's `id` and `deletedAt` always keep their prior values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPatchChange<T> {
    pub entity_id: Uuid,
    pub patch: LexPatch,
    #[serde(skip)]
    marker: PhantomData<T>,
}

impl<T: LexObject> JsonPatchChange<T> {
    #[must_use]
    pub fn new(entity_id: Uuid, patch: LexPatch) -> Self {
        Self {
            entity_id,
            patch,
            marker: PhantomData,
        }
    }
}

impl<T: LexObject> LexChange for JsonPatchChange<T> {
    type Entity = T;

    fn entity_id(&self) -> Uuid {
        self.entity_id
    }
}

impl<T> EditChange for JsonPatchChange<T>
where
    T: LexObject + Serialize + DeserializeOwned,
{
    fn apply_change(&self, entity: &mut T, _commit: &CommitMeta, _ctx: &dyn ChangeContext) {
        let mut value = match serde_json::to_value(&*entity) {
            Ok(value) => value,
            Err(error) => {
                warn!("Failed to serialize {} for patching: {}", self.entity_id, error);
                return;
            }
        };
        let prior_id = value.get("id").cloned();
        let prior_deleted = value.get("deletedAt").cloned();

        for op in self.patch.ops() {
            apply_op(&mut value, op);
        }

        if let Value::Object(map) = &mut value {
            if let Some(id) = prior_id {
                map.insert("id".to_owned(), id);
            }
            match prior_deleted {
                Some(deleted) => {
                    map.insert("deletedAt".to_owned(), deleted);
                }
                None => {
                    map.remove("deletedAt");
                }
            }
        }

        match serde_json::from_value::<T>(value) {
            Ok(patched) => *entity = patched,
            Err(error) => {
                warn!(
                    "Dropping patch for {} that produced an invalid entity: {}",
                    self.entity_id, error
                );
            }
        }
    }
}

fn apply_op(root: &mut Value, op: &PatchOp) {
    match op {
        PatchOp::Add { path, value } => add_at(root, path, value.clone()),
        PatchOp::Replace { path, value } => replace_at(root, path, value.clone()),
        PatchOp::Move { from, path } => {
            if let Some(moved) = take_at(root, from) {
                add_at(root, path, moved);
            }
        }
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Walks to the container holding the path's final segment. Intermediate
/// segments only traverse objects; indexed list traversal is ruled out by
/// validation.
fn parent_of<'a>(root: &'a mut Value, path: &str) -> Option<(&'a mut Value, String)> {
    let mut parts = segments(path);
    let last = parts.pop()?;
    let mut cursor = root;
    for segment in &parts {
        cursor = cursor.as_object_mut()?.get_mut(segment)?;
    }
    Some((cursor, last))
}

fn add_at(root: &mut Value, path: &str, value: Value) {
    let Some((parent, key)) = parent_of(root, path) else {
        return;
    };
    match parent {
        Value::Object(map) => {
            map.insert(key, value);
        }
        Value::Array(items) if key == "-" => items.push(value),
        _ => {}
    }
}

fn replace_at(root: &mut Value, path: &str, value: Value) {
    let Some((parent, key)) = parent_of(root, path) else {
        return;
    };
    if let Some(slot) = parent.as_object_mut().and_then(|map| map.get_mut(&key)) {
        *slot = value;
    }
}

fn take_at(root: &mut Value, path: &str) -> Option<Value> {
    let (parent, key) = parent_of(root, path)?;
    parent.as_object_mut()?.remove(&key)
}
