// Shape inference over loosely typed series
//
// Keys are always derived from the first record. Later records may carry
// other fields; those are ignored rather than rejected.
use crate::domain::series::{Record, Series};
use serde_json::Value;

/// Label field candidates, most preferred first.
pub const LABEL_KEY_PRIORITY: [&str; 5] = ["name", "month", "label", "category", "date"];

/// Category name given to the record produced by [`consolidate`].
pub const CONSOLIDATED_NAME: &str = "Module Usage";

/// Pick the categorical field of a series: the first priority key present in
/// the first record, else that record's first key.
pub fn derive_label_key(data: &[Record]) -> Option<&str> {
    let first = data.first()?;
    LABEL_KEY_PRIORITY
        .iter()
        .copied()
        .find(|key| first.contains_key(*key))
        .or_else(|| first.keys().next().map(String::as_str))
}

/// Transpose N single-field records into one record named
/// [`CONSOLIDATED_NAME`]. Anything else is returned as is, which makes the
/// operation idempotent.
pub fn consolidate(data: &[Record]) -> Series {
    let single_field = !data.is_empty() && data.iter().all(|r| r.len() == 1);
    if !single_field {
        return data.to_vec();
    }

    let mut merged = Record::new();
    merged.insert("name".to_string(), Value::from(CONSOLIDATED_NAME));
    for r in data {
        for (key, value) in r {
            merged.insert(key.clone(), value.clone());
        }
    }
    vec![merged]
}

/// Category field and value fields of a bar series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarKeys {
    pub category: String,
    pub series: Vec<String>,
}

/// With a `name` field and at least one other, `name` is the category and
/// all other fields are series. Otherwise the first field is the category.
pub fn bar_keys(data: &[Record]) -> Option<BarKeys> {
    let first = data.first()?;
    if first.contains_key("name") && first.len() > 1 {
        return Some(BarKeys {
            category: "name".to_string(),
            series: first.keys().filter(|k| *k != "name").cloned().collect(),
        });
    }

    let mut keys = first.keys().cloned();
    let category = keys.next()?;
    Some(BarKeys {
        category,
        series: keys.collect(),
    })
}

/// Value fields of a line or area series: every field of the first record
/// except the label key.
pub fn trace_keys(data: &[Record], label_key: &str) -> Vec<String> {
    data.first()
        .map(|first| first.keys().filter(|k| *k != label_key).cloned().collect())
        .unwrap_or_default()
}
