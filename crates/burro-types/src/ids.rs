//! Identifier types for stars.
//!
//! A star is identified in two ways: the document-local [`StarId`] used by
//! `linkedTo` references in the input file, and the [`StarLabel`] that is the
//! unique key everywhere else (graph, planner, reports).

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Unique display label of a star. The primary key of the star graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarLabel(String);

impl StarLabel {
    /// Create a label from any string-like value.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the label and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for StarLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StarLabel {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for StarLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for StarLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StarLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Document-local star identifier, as written in the input file.
///
/// Source files use either integers or strings, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StarId {
    /// Numeric identifier (`"id": 7`).
    Number(i64),
    /// Textual identifier (`"id": "s-7"`).
    Text(String),
}

impl core::fmt::Display for StarId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
