//! Document selectors: the caller-supplied description of which documents a
//! provider applies to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::SelectorError;

/// Filter constraining documents by language id, URI scheme, and path glob.
///
/// Absent and empty fields place no constraint, so the empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentFilter {
    /// Language id the document must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// URI scheme the document must use, e.g. `file` or `untitled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Extended glob matched against the URI path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl DocumentFilter {
    /// Filter on language id only.
    #[must_use]
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// Filter on URI scheme only.
    #[must_use]
    pub fn scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            ..Self::default()
        }
    }

    /// Filter on path glob only.
    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    /// Adds a language constraint.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Adds a scheme constraint.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Adds a path glob constraint.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// One element of a selector sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorEntry {
    /// Bare language id, compared case-sensitively.
    Language(String),
    /// Structured filter.
    Filter(DocumentFilter),
}

/// Selector accepted by every registration operation.
///
/// Deserialises from a JSON string, filter object, or array of those. Any
/// other shape is rejected rather than defaulting to "match nothing" or
/// "match everything".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Value")]
pub enum Selector {
    /// Bare language id.
    Language(String),
    /// Structured filter.
    Filter(DocumentFilter),
    /// Ordered alternatives; matches when any entry matches.
    Sequence(Vec<SelectorEntry>),
}

impl Selector {
    /// Selector for a single language id.
    #[must_use]
    pub fn language(language: impl Into<String>) -> Self {
        Self::Language(language.into())
    }

    /// Parses a selector from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Malformed`] when the text is not JSON or the
    /// value has none of the accepted shapes.
    pub fn from_json_str(input: &str) -> Result<Self, SelectorError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|error| SelectorError::malformed(error.to_string()))?;
        Self::try_from(value)
    }
}

impl From<DocumentFilter> for Selector {
    fn from(filter: DocumentFilter) -> Self {
        Self::Filter(filter)
    }
}

impl From<Vec<SelectorEntry>> for Selector {
    fn from(entries: Vec<SelectorEntry>) -> Self {
        Self::Sequence(entries)
    }
}

impl From<DocumentFilter> for SelectorEntry {
    fn from(filter: DocumentFilter) -> Self {
        Self::Filter(filter)
    }
}

impl TryFrom<Value> for Selector {
    type Error = SelectorError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(language) => Ok(Self::Language(language)),
            Value::Object(fields) => parse_filter(fields).map(Self::Filter),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_entry(index, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Sequence),
            other => Err(SelectorError::malformed(format!(
                "expected a language id, filter, or sequence, found {}",
                describe(&other)
            ))),
        }
    }
}

fn parse_entry(index: usize, value: Value) -> Result<SelectorEntry, SelectorError> {
    match value {
        Value::String(language) => Ok(SelectorEntry::Language(language)),
        Value::Object(fields) => parse_filter(fields).map(SelectorEntry::Filter),
        other => Err(SelectorError::malformed(format!(
            "sequence element {index} must be a language id or filter, found {}",
            describe(&other)
        ))),
    }
}

fn parse_filter(fields: Map<String, Value>) -> Result<DocumentFilter, SelectorError> {
    let mut filter = DocumentFilter::default();
    for (key, value) in fields {
        let slot = match key.as_str() {
            "language" => &mut filter.language,
            "scheme" => &mut filter.scheme,
            "pattern" => &mut filter.pattern,
            _ => {
                return Err(SelectorError::malformed(format!(
                    "unknown filter field '{key}'"
                )));
            }
        };
        *slot = match value {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => {
                return Err(SelectorError::malformed(format!(
                    "filter field '{key}' must be a string, found {}",
                    describe(&other)
                )));
            }
        };
    }
    Ok(filter)
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
