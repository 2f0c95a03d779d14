//! Front-matter values.
//!
//! A decoded front-matter block is an insertion-ordered map from key to
//! [`Value`]. The enum covers everything the codec can read back
//! (`String`, `Number`, `Bool`, `Array`, `Raw`) plus the kinds a caller may
//! hand to the encoder (`Date`, `Other`, `Null`).
//!
//! ## JSON Bridging
//!
//! The CLI speaks JSON on both ends, so values convert from
//! `serde_json::Value` via [`Value::from_json`] and serialize back to the
//! natural JSON shape:
//!
//! ```text
//! String / Raw   →  "text"
//! Number         →  3 (integral) or 3.14
//! Bool           →  true
//! Array          →  ["a", 1]
//! Date           →  "2024-05-01T10:00:00+02:00"
//! Other          →  the wrapped JSON as-is
//! Null           →  null
//! ```

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Insertion-ordered mapping produced by decoding a front-matter block.
pub type FrontMatter = IndexMap<String, Value>;

/// A single front-matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A quoted string (single or double quotes on decode).
    String(String),
    Number(f64),
    Bool(bool),
    Array(Vec<ArrayItem>),
    /// Unquoted text that matched no other kind; kept verbatim after trimming.
    Raw(String),
    /// Timestamp, encoded as an unquoted ISO-8601 string.
    Date(DateTime<FixedOffset>),
    /// Any other structured value. Encodes through the lossy quoted fallback.
    Other(serde_json::Value),
    /// Absent value. Skipped on encode.
    Null,
}

/// An element of an array value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItem {
    String(String),
    Number(f64),
}

impl Value {
    /// Short type name used in CLI output and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "array",
            Value::Raw(_) => "raw",
            Value::Date(_) => "date",
            Value::Other(_) => "other",
            Value::Null => "null",
        }
    }

    /// Convert a JSON value into a front-matter value.
    ///
    /// Arrays map to [`Value::Array`] only when every element is a string
    /// or a number; anything else, objects included, becomes
    /// [`Value::Other`] and will take the encoder's fallback branch.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Value::Number(f),
                None => Value::Other(serde_json::Value::Number(n)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                let converted: Option<Vec<ArrayItem>> = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Some(ArrayItem::String(s.clone())),
                        serde_json::Value::Number(n) => n.as_f64().map(ArrayItem::Number),
                        _ => None,
                    })
                    .collect();
                match converted {
                    Some(items) => Value::Array(items),
                    None => Value::Other(serde_json::Value::Array(items)),
                }
            }
            obj @ serde_json::Value::Object(_) => Value::Other(obj),
        }
    }
}

/// Convert a JSON object into a front-matter mapping, keeping key order.
///
/// Returns `None` when `json` is not an object.
pub fn front_matter_from_json(json: serde_json::Value) -> Option<FrontMatter> {
    match json {
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(k, v)| (k, Value::from_json(v)))
                .collect(),
        ),
        _ => None,
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for ArrayItem {
    fn from(s: &str) -> Self {
        ArrayItem::String(s.to_string())
    }
}

impl From<f64> for ArrayItem {
    fn from(n: f64) -> Self {
        ArrayItem::Number(n)
    }
}

// i64 covers every integer f64 can hold exactly, so the cast is lossless
// whenever the bounds check passes.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

impl Serialize for ArrayItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArrayItem::String(s) => serializer.serialize_str(s),
            ArrayItem::Number(n) => serialize_number(*n, serializer),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) | Value::Raw(s) => serializer.serialize_str(s),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Date(d) => serializer.serialize_str(&d.to_rfc3339()),
            Value::Other(json) => json.serialize(serializer),
            Value::Null => serializer.serialize_unit(),
        }
    }
}
