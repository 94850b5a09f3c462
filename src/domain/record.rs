//! Per-item detail records returned by the detail source.

use serde_json::{Map, Value};

/// Fields probed for a display name, highest priority first
pub const NAME_FIELDS: [&str; 4] = ["brand", "name", "drug", "title"];

/// Detail payload for one slug
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRecord {
    fields: Map<String, Value>,
}

impl ItemRecord {
    /// Extract the record from a detail document.
    ///
    /// The record is read from `item` if present and truthy, else `data`,
    /// else the document itself. Returns `None` when that is not an object.
    pub fn from_document(document: &Value) -> Option<Self> {
        let candidate = ["item", "data"]
            .iter()
            .filter_map(|key| document.get(key))
            .find(|v| is_truthy(v))
            .unwrap_or(document);

        candidate.as_object().map(|fields| Self {
            fields: fields.clone(),
        })
    }

    /// Text of a field, trimmed. Null and container values count as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// First non-empty value among [`NAME_FIELDS`]
    pub fn display_name(&self) -> Option<String> {
        NAME_FIELDS.iter().find_map(|key| self.text(key))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// JSON truthiness: null, false, zero, and empty strings/containers are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
