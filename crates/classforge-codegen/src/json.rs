//! JSON value model
//!
//! Input text is parsed with `serde_json` (object order preserved) and then
//! converted into [`JsonValue`], a closed sum type the inference engine can
//! match exhaustively. Strings that look like timestamps are not a separate
//! variant; [`is_timestamp`] classifies them on demand.

use chrono::{DateTime, NaiveDateTime};
use classforge_core::{ForgeError, ForgeResult};
use indexmap::IndexMap;

/// Layouts accepted for date-times without an offset.
const NAIVE_DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// A parsed JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// Any literal that fits `i64` or `u64`
    Integer(i128),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    /// Members in document order; a repeated key keeps its first position
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    /// Parse JSON text.
    ///
    /// Empty or whitespace-only text is rejected before the parser runs.
    pub fn parse(text: &str) -> ForgeResult<Self> {
        if text.trim().is_empty() {
            return Err(ForgeError::InvalidInput(
                "JSON input cannot be empty".to_string(),
            ));
        }

        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| ForgeError::InvalidInput(format!("invalid JSON: {e}")))?;
        Ok(Self::from(value))
    }

    /// Short name of the variant, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Integer(_) => "integer",
            JsonValue::Float(_) => "float",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonValue::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    JsonValue::Integer(i128::from(u))
                } else {
                    // Integer literals past u64 arrive as f64 with the token
                    // text gone, so they infer as `double`, not `int`.
                    n.as_f64().map_or(JsonValue::Null, JsonValue::Float)
                }
            }
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(members) => JsonValue::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Whether `text` parses as a JSON document. Empty text never does.
pub fn is_valid_json(text: &str) -> bool {
    !text.trim().is_empty() && serde_json::from_str::<serde_json::Value>(text).is_ok()
}

/// Whether a string value should be typed as a timestamp.
///
/// Accepts RFC 3339 date-times, naive ISO 8601 date-times with a `T`
/// separator, and the `/Date(ms)/` form. A bare date stays text.
pub fn is_timestamp(text: &str) -> bool {
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }

    if NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
    {
        return true;
    }

    is_epoch_date(text)
}

/// `/Date(1700000000000)/`, optionally with a `+hhmm`/`-hhmm` offset.
fn is_epoch_date(text: &str) -> bool {
    let Some(inner) = text
        .strip_prefix("/Date(")
        .and_then(|rest| rest.strip_suffix(")/"))
    else {
        return false;
    };

    let millis = inner.strip_prefix('-').unwrap_or(inner);
    let (millis, offset) = match millis.find(['+', '-']) {
        Some(at) => (&millis[..at], Some(&millis[at + 1..])),
        None => (millis, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(millis) && offset.is_none_or(|o| o.len() == 4 && all_digits(o))
}
