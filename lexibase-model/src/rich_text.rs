//! Formatted text containers.
//!
//! Rich text is a flat run of spans, each carrying its own writing system
//! and formatting flags. There is no nesting and no block structure; fields
//! like an entry's note are a single paragraph of styled runs.

use crate::WritingSystemId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One styled run of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichSpan {
    pub text: String,
    /// Writing system of this run, when it differs from the field's own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws: Option<WritingSystemId>,
    /// Base writing system for runs embedded in another script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_base: Option<WritingSystemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
}

impl RichSpan {
    /// Creates an unstyled span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ws: None,
            ws_base: None,
            bold: None,
            italic: None,
        }
    }
}

/// A sequence of styled runs forming one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichString {
    #[serde(default)]
    pub spans: Vec<RichSpan>,
}

impl RichString {
    /// Creates an empty rich string.
    #[must_use]
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Creates a rich string with a single unstyled span.
    /// Empty text produces an empty string with no spans.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::new()
        } else {
            Self {
                spans: vec![RichSpan::plain(text)],
            }
        }
    }

    /// Returns true if the string holds no visible text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|span| span.text.is_empty())
    }

    /// Concatenates all span texts, dropping formatting.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// A rich string with one value per writing system.
///
/// Same canonical-form rule as [`crate::MultiString`]: empty values mean
/// "cleared" and are dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichMultiString(BTreeMap<WritingSystemId, RichString>);

impl RichMultiString {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Creates a container holding a single value.
    #[must_use]
    pub fn single(ws: impl Into<WritingSystemId>, value: RichString) -> Self {
        let mut ms = Self::new();
        ms.set(ws.into(), value);
        ms
    }

    /// Returns the value for a writing system, if present.
    #[must_use]
    pub fn get(&self, ws: &WritingSystemId) -> Option<&RichString> {
        self.0.get(ws)
    }

    /// Sets the value for a writing system. An empty value clears it.
    pub fn set(&mut self, ws: WritingSystemId, value: RichString) {
        if value.is_empty() {
            self.0.remove(&ws);
        } else {
            self.0.insert(ws, value);
        }
    }

    /// Removes the value for a writing system, returning it if present.
    pub fn remove(&mut self, ws: &WritingSystemId) -> Option<RichString> {
        self.0.remove(ws)
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
    pub fn iter(&self) -> impl Iterator<Item = (&WritingSystemId, &RichString)> {
        self.0.iter()
    }
}

impl FromIterator<(WritingSystemId, RichString)> for RichMultiString {
    fn from_iter<I: IntoIterator<Item = (WritingSystemId, RichString)>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}

impl<'de> Deserialize<'de> for RichMultiString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = BTreeMap::<WritingSystemId, RichString>::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}
