//! Multilingual string container.

use crate::WritingSystemId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A string with one value per writing system.
///
/// Serializes as a plain JSON object keyed by writing-system tag. An empty
/// value means "cleared"; cleared entries are dropped on deserialization so
/// every replica holds the same canonical form after applying a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MultiString(BTreeMap<WritingSystemId, String>);

impl MultiString {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a container holding a single value.
    #[must_use]
    pub fn single(ws: impl Into<WritingSystemId>, value: impl Into<String>) -> Self {
        let mut ms = Self::new();
        ms.set(ws.into(), value);
        ms
    }

    /// Returns the value for a writing system, if present.
    #[must_use]
    pub fn get(&self, ws: &WritingSystemId) -> Option<&str> {
        self.0.get(ws).map(String::as_str)
    }

    /// Sets the value for a writing system. An empty value clears it.
    pub fn set(&mut self, ws: WritingSystemId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&ws);
        } else {
            self.0.insert(ws, value);
        }
    }

    /// Removes the value for a writing system, returning it if present.
    pub fn remove(&mut self, ws: &WritingSystemId) -> Option<String> {
        self.0.remove(ws)
    }

    /// Returns true if a value exists for the writing system.
    #[must_use]
    pub fn contains(&self, ws: &WritingSystemId) -> bool {
        self.0.contains_key(ws)
    }

    /// Number of writing systems with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no writing system has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(writing system, value)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&WritingSystemId, &str)> {
        self.0.iter().map(|(ws, v)| (ws, v.as_str()))
    }

    /// Iterates over the writing systems with a value, in tag order.
    pub fn writing_systems(&self) -> impl Iterator<Item = &WritingSystemId> {
        self.0.keys()
    }
}

impl FromIterator<(WritingSystemId, String)> for MultiString {
    fn from_iter<I: IntoIterator<Item = (WritingSystemId, String)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}

impl<'de> Deserialize<'de> for MultiString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<WritingSystemId, String>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}
