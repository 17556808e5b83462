//! Conversation records and attribute values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single user-defined attribute value.
///
/// JSON `true`/`false` map to [`Bool`](Self::Bool), numbers to
/// [`Number`](Self::Number) and strings to [`Text`](Self::Text). Variant order
/// matters for untagged deserialization: booleans are tried before numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric measurement.
    Number(f64),
    /// Categorical label.
    Text(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Attribute map of one record.
///
/// A key mapped to `None` (JSON `null`) is present in the schema but carries
/// no value for this record.
pub type Attributes = BTreeMap<String, Option<AttributeValue>>;

/// One conversation to be clustered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Unique within a batch.
    pub id: String,

    /// Dense embedding; every record in a batch shares the same width.
    pub semantic_embedding: Vec<f64>,

    /// User-defined structured attributes.
    #[serde(default)]
    pub attributes: Attributes,

    /// Outcome label (`satisfied`, `unsatisfied`, `unclear`, anything else).
    pub outcome: String,
}

impl ConversationRecord {
    /// Create a record with no attributes.
    pub fn new(
        id: impl Into<String>,
        semantic_embedding: Vec<f64>,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            semantic_embedding,
            attributes: Attributes::new(),
            outcome: outcome.into(),
        }
    }

    /// Set an attribute value.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), Some(value.into()));
        self
    }

    /// Declare an attribute key with an explicit `null` value.
    #[must_use]
    pub fn with_null_attribute(mut self, key: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), None);
        self
    }

    /// Value for `key`, treating explicit nulls and missing keys alike.
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key).and_then(Option::as_ref)
    }
}
