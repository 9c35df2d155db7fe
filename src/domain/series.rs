// Series domain model - ordered records of loosely typed fields
use serde_json::{Map, Value};

/// One data record: field name -> value, in insertion order.
pub type Record = Map<String, Value>;

/// The ordered list of records feeding a chart.
pub type Series = Vec<Record>;

/// Build a record from `(field, value)` pairs, keeping their order.
pub fn record<K, V, I>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Numeric view of a field value. Numbers pass through, numeric strings are
/// parsed, everything else is `None`.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Display text of a field value.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// JSON number for `v`, preferring an integer representation when exact.
pub fn number(v: f64) -> Value {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Value::from(v as i64)
    } else {
        serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
