// Lenient field decoders for backend payloads.
//
// Every decoder accepts any JSON value and never fails: a wrong-typed field
// decodes to `None` (or an empty list) instead of rejecting the whole payload.
use super::series::as_number;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode an array element by element, dropping elements that don't fit.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode an object of `name -> count` pairs in key order; non-numeric
/// counts become zero.
pub fn counts<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, count)| (name.clone(), as_number(count).unwrap_or(0.0)))
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode a whole payload, falling back to `T::default()` on any mismatch.
pub fn decode<T>(raw: Option<&Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match raw {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value.clone()).unwrap_or_default(),
    }
}
