//! Contact record returned by a successful verification.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contact record as a mapping of field name to value.
///
/// The backend owns the schema; the portal only stores and displays
/// whatever fields it returns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contact(Map<String, Value>);

impl Contact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Field value when it is a JSON string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Contact {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
