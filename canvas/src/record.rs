//! Display records supplied by the data provider.
//!
//! The engine only needs a record's position in the snapshot (for layout) and
//! a label to print on its card. Any other fields in the payload are ignored.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record identifier as delivered by the provider: a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// One fetched data object shown as a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<RecordId>, name: Option<String>) -> Self {
        Self { id: id.into(), name }
    }

    /// Text printed on the card: the name, or `Object <id>` when it is missing or empty.
    #[must_use]
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Object {}", self.id),
        }
    }
}

/// Decode a JSON array of records.
///
/// # Errors
///
/// Returns the `serde_json` error if the payload is not an array of objects
/// each carrying an `id`.
pub fn parse_records(json: &str) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_str(json)
}
