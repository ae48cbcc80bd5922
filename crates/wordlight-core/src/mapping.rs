//! The word → color mapping read from the user's JSON file.
//!
//! ## Learning: Ordered Maps
//!
//! `HashMap` iterates in an arbitrary order. Highlights are rendered in the
//! order words appear in the file, so the mapping is an `IndexMap`, and
//! `serde_json` is built with `preserve_order` so its own `Map` keeps
//! insertion order while parsing.

use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

use crate::{HighlightError, HighlightResult};

/// Ordered mapping from word to color.
///
/// Colors are opaque: they are forwarded to the renderer untouched.
/// A mapping is built once per load and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordColorMapping {
    entries: IndexMap<String, String>,
}

impl WordColorMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses the mapping file at `path`.
    ///
    /// Read failures become [`HighlightError::ConfigRead`], malformed JSON
    /// or a non-flat shape becomes a parse error. Nothing is returned on
    /// failure, so a caller can never install half a mapping.
    pub fn load(path: impl AsRef<Path>) -> HighlightResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| HighlightError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|err| err.with_path(path))
    }

    /// Parses a JSON object of string values.
    ///
    /// A key that appears twice keeps its first position and its last value.
    pub fn parse(content: &str) -> HighlightResult<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| {
            HighlightError::ConfigParse {
                path: None,
                source,
            }
        })?;

        let Value::Object(object) = value else {
            return Err(HighlightError::InvalidShape {
                path: None,
                reason: format!("expected a JSON object, found {}", kind_of(&value)),
            });
        };

        let mut entries = IndexMap::with_capacity(object.len());
        for (word, color) in object {
            let Value::String(color) = color else {
                return Err(HighlightError::InvalidShape {
                    path: None,
                    reason: format!(
                        "value for \"{word}\" must be a string, found {}",
                        kind_of(&color)
                    ),
                });
            };
            if word.is_empty() {
                tracing::warn!("Ignoring empty word in highlight configuration");
                continue;
            }
            entries.insert(word, color);
        }

        Ok(Self { entries })
    }

    /// Returns the color for a word.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    /// Iterates `(word, color)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(w, c)| (w.as_str(), c.as_str()))
    }

    /// Iterates the configured words in file order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<W, C> FromIterator<(W, C)> for WordColorMapping
where
    W: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, C)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(w, c)| (w.into(), c.into()))
            .filter(|(w, _): &(String, String)| !w.is_empty())
            .collect();
        Self { entries }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
