//! Front-matter codec: a best-effort reader and writer for a restricted
//! key/value subset of TOML.
//!
//! ## Accepted Input
//!
//! One `key = value` pair per line. Blank lines and lines starting with `#`
//! are ignored, and so is any line without an `=`. The key is everything
//! before the first `=`, the value everything after it, both trimmed:
//!
//! ```text
//! title = "Night Walk"        →  String("Night Walk")
//! subtitle = 'no escapes'     →  String("no escapes")
//! tags = ["film", "city"]     →  Array([String, String])
//! draft = false               →  Bool(false)
//! weight = -2.5               →  Number(-2.5)
//! date = 2024-05-01           →  Raw("2024-05-01")
//! ```
//!
//! Inference is tried in exactly that order: double-quoted, single-quoted,
//! array, boolean, number, raw. Quoted strings have their outer quotes
//! stripped and nothing else; `\"` inside a value stays as two characters.
//!
//! ## Best-Effort Contract
//!
//! [`decode`] and [`encode`] never fail. Unparseable lines are dropped and
//! values with no front-matter form are written through a quoted fallback.
//! A repeated key overwrites the earlier value but keeps its first position.
//!
//! [`decode_strict`] and [`encode_strict`] are the opt-in stricter variants:
//! they report the first line or value the best-effort path would have
//! silently dropped or downgraded.
//!
//! ## Known Asymmetry
//!
//! [`encode`] escapes embedded double quotes with a backslash but [`decode`]
//! does not unescape them, so `say "hi"` comes back as `say \"hi\"`.

use crate::value::{ArrayItem, FrontMatter, Value};
use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Malformed line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("Cannot encode value for key {key:?}: {reason}")]
    UnencodableValue { key: String, reason: String },
}

// =============================================================================
// Decoding
// =============================================================================

/// Outcome of reading a single line.
enum Line<'a> {
    Blank,
    Malformed,
    Entry(&'a str, &'a str),
}

fn classify_line(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Line::Blank;
    }
    match trimmed.split_once('=') {
        Some((key, raw)) => Line::Entry(key.trim(), raw.trim()),
        None => Line::Malformed,
    }
}

/// Decode a front-matter block into an insertion-ordered mapping.
///
/// Never fails: lines without `=` are skipped.
pub fn decode(text: &str) -> FrontMatter {
    let mut out = FrontMatter::new();
    for (idx, line) in text.lines().enumerate() {
        match classify_line(line) {
            Line::Blank => {}
            Line::Malformed => trace!(line = idx + 1, "skipping line without '='"),
            Line::Entry(key, raw) => {
                out.insert(key.to_string(), infer_value(raw));
            }
        }
    }
    out
}

/// Decode, rejecting lines the best-effort decoder would skip.
///
/// A non-blank, non-comment line without `=`, or with an empty key, yields
/// [`CodecError::MalformedLine`] with its 1-based line number.
pub fn decode_strict(text: &str) -> Result<FrontMatter, CodecError> {
    let mut out = FrontMatter::new();
    for (idx, line) in text.lines().enumerate() {
        match classify_line(line) {
            Line::Blank => {}
            Line::Entry(key, raw) if !key.is_empty() => {
                out.insert(key.to_string(), infer_value(raw));
            }
            _ => {
                return Err(CodecError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                });
            }
        }
    }
    Ok(out)
}

/// Infer the type of a single raw (already trimmed) value.
pub fn infer_value(raw: &str) -> Value {
    if let Some(inner) = strip_quotes(raw, '"') {
        return Value::String(inner.to_string());
    }
    if let Some(inner) = strip_quotes(raw, '\'') {
        return Value::String(inner.to_string());
    }
    if raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2 {
        let inner = &raw[1..raw.len() - 1];
        return Value::Array(inner.split(',').filter_map(parse_array_item).collect());
    }
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    match parse_number(raw) {
        Some(n) => Value::Number(n),
        None => Value::Raw(raw.to_string()),
    }
}

/// Strip one matching quote from each end.
///
/// A lone quote character counts as an empty quoted string.
fn strip_quotes(raw: &str, quote: char) -> Option<&str> {
    if !(raw.starts_with(quote) && raw.ends_with(quote)) {
        return None;
    }
    if raw.len() == 1 {
        Some("")
    } else {
        Some(&raw[1..raw.len() - 1])
    }
}

/// Parse one comma-separated array element.
///
/// One layer of double quotes is removed from either end. Quoted elements
/// stay strings; unquoted numeric ones become numbers. Empty elements are
/// dropped.
fn parse_array_item(element: &str) -> Option<ArrayItem> {
    let trimmed = element.trim();
    let open = trimmed.strip_prefix('"');
    let rest = open.unwrap_or(trimmed);
    let close = rest.strip_suffix('"');
    let text = close.unwrap_or(rest);
    if text.is_empty() {
        return None;
    }
    let quoted = open.is_some() || close.is_some();
    if !quoted && let Some(n) = parse_number(text) {
        return Some(ArrayItem::Number(n));
    }
    Some(ArrayItem::String(text.to_string()))
}

/// Plain decimal numbers only: sign, digits, fraction, exponent.
///
/// Hex literals, `inf`, `NaN` and overflowing exponents stay raw text.
fn parse_number(raw: &str) -> Option<f64> {
    if raw.is_empty()
        || !raw
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

// =============================================================================
// Encoding
// =============================================================================

/// How a single value is written out.
enum Rendering {
    Skip,
    Exact(String),
    /// Lossy text that `decode` will not read back as the original value.
    Fallback { text: String, reason: String },
}

/// Wrap in double quotes, escaping embedded double quotes with a backslash.
fn quote_string(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

fn format_number(n: f64) -> String {
    n.to_string()
}

fn render_array_item(item: &ArrayItem) -> String {
    match item {
        ArrayItem::String(s) => format!("\"{s}\""),
        ArrayItem::Number(n) if n.is_finite() => format_number(*n),
        ArrayItem::Number(n) => quote_string(&n.to_string()),
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Why an array element would not decode back to itself, if it would not.
fn array_item_problem(item: &ArrayItem) -> Option<String> {
    match item {
        ArrayItem::Number(n) if !n.is_finite() => Some(format!("non-finite number {n} in array")),
        ArrayItem::Number(_) => None,
        ArrayItem::String(s) if has_line_break(s) => {
            Some("line break in array element".to_string())
        }
        ArrayItem::String(s) if s.contains([',', '"']) => {
            Some(format!("array element {s:?} contains ',' or '\"'"))
        }
        ArrayItem::String(s) if s.trim().is_empty() => Some("empty array element".to_string()),
        ArrayItem::String(s) if s.trim() != s => {
            Some(format!("array element {s:?} has surrounding whitespace"))
        }
        ArrayItem::String(_) => None,
    }
}

fn render(value: &Value) -> Rendering {
    match value {
        Value::Null => Rendering::Skip,
        Value::String(s) | Value::Raw(s) if has_line_break(s) => Rendering::Fallback {
            text: quote_string(s),
            reason: "line break in string".to_string(),
        },
        Value::String(s) | Value::Raw(s) => Rendering::Exact(quote_string(s)),
        Value::Bool(b) => Rendering::Exact(b.to_string()),
        Value::Number(n) if n.is_finite() => Rendering::Exact(format_number(*n)),
        Value::Number(n) => Rendering::Fallback {
            text: quote_string(&n.to_string()),
            reason: format!("non-finite number {n}"),
        },
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_array_item).collect();
            let text = format!("[{}]", parts.join(", "));
            match items.iter().find_map(array_item_problem) {
                Some(reason) => Rendering::Fallback { text, reason },
                None => Rendering::Exact(text),
            }
        }
        Value::Date(d) => Rendering::Exact(
            d.with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Value::Other(json) => Rendering::Fallback {
            text: quote_string(&json.to_string()),
            reason: format!("{} has no front-matter form", json_kind(json)),
        },
    }
}

/// Why a key would not decode back to itself, if it would not.
fn key_problem(key: &str) -> Option<&'static str> {
    if key.trim().is_empty() {
        Some("empty key")
    } else if key.contains('=') {
        Some("'=' in key")
    } else if has_line_break(key) {
        Some("line break in key")
    } else if key.trim_start().starts_with('#') {
        Some("key starts with '#'")
    } else if key.trim() != key {
        Some("surrounding whitespace in key")
    } else {
        None
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Object(_) => "object",
        serde_json::Value::Array(_) => "nested array",
        _ => "value",
    }
}

/// Encode a mapping as `key = value` lines joined with `\n`.
///
/// Null entries are skipped. Never fails: values without a front-matter
/// form are written as quoted JSON text.
pub fn encode(front_matter: &FrontMatter) -> String {
    let lines: Vec<String> = front_matter
        .iter()
        .filter_map(|(key, value)| match render(value) {
            Rendering::Skip => None,
            Rendering::Exact(text) => Some(format!("{key} = {text}")),
            Rendering::Fallback { text, reason } => {
                trace!(key = key.as_str(), %reason, "encoding through fallback");
                Some(format!("{key} = {text}"))
            }
        })
        .collect();
    lines.join("\n")
}

/// Encode, rejecting anything `decode` would not read back as written:
/// values that take the lossy fallback branch, strings with line breaks,
/// array strings with `,` or `"`, and keys that are not plain words.
pub fn encode_strict(front_matter: &FrontMatter) -> Result<String, CodecError> {
    let mut lines = Vec::with_capacity(front_matter.len());
    for (key, value) in front_matter {
        if let Some(reason) = key_problem(key) {
            return Err(CodecError::UnencodableValue {
                key: key.clone(),
                reason: reason.to_string(),
            });
        }
        match render(value) {
            Rendering::Skip => {}
            Rendering::Exact(text) => lines.push(format!("{key} = {text}")),
            Rendering::Fallback { reason, .. } => {
                return Err(CodecError::UnencodableValue {
                    key: key.clone(),
                    reason,
                });
            }
        }
    }
    Ok(lines.join("\n"))
}
