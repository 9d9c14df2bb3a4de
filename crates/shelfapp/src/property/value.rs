//! Property value types.
//!
//! [`PropertyValue`] is what an entry's accessor hands back. It has two string forms:
//! - `Display`: the value's own stringification, used for card text.
//! - [`PropertyValue::to_group_string`]: the normalized group key.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::text::strip_inline_refs;

/// Group key for absent, unresolvable, or empty values.
pub const NONE_KEY: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    /// A reference to another document, shown as `[[target|display]]`.
    Link {
        target: String,
        display: Option<String>,
    },
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn text(s: impl Into<String>) -> Self {
        PropertyValue::Text(s.into())
    }

    pub fn link(target: impl Into<String>) -> Self {
        PropertyValue::Link {
            target: target.into(),
            display: None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Whether the value carries anything worth showing.
    ///
    /// Empty stringifications and the literal `null` / `undefined` count as no value; some
    /// hosts stringify missing values that way.
    pub fn is_usable(&self) -> bool {
        if self.is_null() {
            return false;
        }
        let rendered = self.to_string();
        !matches!(rendered.as_str(), "" | "null" | "undefined")
    }

    /// Normalizes the value into a group key.
    ///
    /// | Value | Key |
    /// |-------|-----|
    /// | `Null` | `"None"` |
    /// | `Date`, `Link` | own stringification, refs stripped, `"None"` if unusable |
    /// | `Text` | refs stripped, `"None"` if empty |
    /// | `Number` | decimal form |
    /// | `Bool` | `"True"` / `"False"` |
    /// | `List` | `"None"` if empty, else element keys joined by `", "` |
    pub fn to_group_string(&self) -> String {
        match self {
            PropertyValue::Null => NONE_KEY.to_string(),
            PropertyValue::Date(_) | PropertyValue::Link { .. } => {
                let stripped = strip_inline_refs(&self.to_string());
                match stripped.trim() {
                    "" | "null" | "undefined" => NONE_KEY.to_string(),
                    _ => stripped,
                }
            }
            PropertyValue::Text(s) => {
                let stripped = strip_inline_refs(s);
                if stripped.trim().is_empty() {
                    NONE_KEY.to_string()
                } else {
                    stripped
                }
            }
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Bool(true) => "True".to_string(),
            PropertyValue::Bool(false) => "False".to_string(),
            PropertyValue::List(items) if items.is_empty() => NONE_KEY.to_string(),
            PropertyValue::List(items) => items
                .iter()
                .map(PropertyValue::to_group_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// The value as a flat list of strings, for list-shaped fields like tags.
    pub fn to_string_list(&self) -> Vec<String> {
        match self {
            PropertyValue::Null => Vec::new(),
            PropertyValue::List(items) => items
                .iter()
                .flat_map(PropertyValue::to_string_list)
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => f.write_str("null"),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            PropertyValue::Link { target, display } => match display {
                Some(alias) => write!(f, "[[{}|{}]]", target, alias),
                None => write!(f, "[[{}]]", target),
            },
            PropertyValue::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(b),
            Value::Number(n) => n
                .as_f64()
                .map(PropertyValue::Number)
                .unwrap_or_else(|| PropertyValue::Text(n.to_string())),
            Value::String(s) => PropertyValue::Text(s),
            Value::Array(items) => {
                PropertyValue::List(items.into_iter().map(PropertyValue::from).collect())
            }
            Value::Object(map) => PropertyValue::Text(Value::Object(map).to_string()),
        }
    }
}

impl From<&serde_json::Value> for PropertyValue {
    fn from(value: &serde_json::Value) -> Self {
        PropertyValue::from(value.clone())
    }
}
