//! Lenient decoders for values written by form-driven collaborators.
//!
//! Forms store whatever their widgets hold: widths arrive as `8` or `"8"`,
//! flags as `true`, `1` or `"yes"`. These helpers accept all of those so a
//! unit record only falls back to defaults when its shape is truly wrong.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Converts a JSON scalar into its text form. `null` becomes empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Interprets a JSON value as a boolean flag.
///
/// Numbers are true when non-zero; strings accept `true/yes/on/1` and
/// `false/no/off/0` case-insensitively (anything else non-empty is true).
pub fn value_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "no" | "off" | "0" => false,
            _ => true,
        },
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// `deserialize_with` adapter for lenient text fields.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(|v| value_text(&v))
}

/// `deserialize_with` adapter for lenient boolean fields.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Value::deserialize(d).map(|v| value_flag(&v))
}

/// `deserialize_with` adapter for lists of records.
///
/// Elements that are not valid records (e.g. a bare string in a signal list)
/// are skipped instead of rejecting the whole unit. A non-list becomes empty.
pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// `deserialize_with` adapter for lists of plain names.
pub fn names<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    })
}

/// An insertion-ordered `name → text` mapping.
///
/// Used for parameter tables, modport access lists, directed assignments and
/// per-component custom code. Fields of this type decode through
/// [`text_map`], so `{"len": 4}` and `{"len": "4"}` are the same.
pub type TextMap = IndexMap<String, String>;

/// Converts a JSON object into a [`TextMap`] in authored order. Anything
/// else becomes empty.
pub fn value_text_map(value: &Value) -> TextMap {
    match value {
        Value::Object(entries) => entries
            .iter()
            .map(|(k, v)| (k.clone(), value_text(v)))
            .collect(),
        _ => TextMap::new(),
    }
}

/// `deserialize_with` adapter for [`TextMap`] fields.
pub fn text_map<'de, D: Deserializer<'de>>(d: D) -> Result<TextMap, D::Error> {
    Value::deserialize(d).map(|v| value_text_map(&v))
}
