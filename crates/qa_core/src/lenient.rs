//! crates/qa_core/src/lenient.rs
//! Field decoders used with `#[serde(default, deserialize_with = "...")]`.
//!
//! Each decoder first reads an arbitrary JSON value (which cannot fail for
//! well-formed JSON) and then projects it, so a missing or wrongly-typed field
//! is simply absent.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Finite JSON number, else `None`.
pub fn number<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(v.as_f64().filter(|x| x.is_finite()))
}

/// JSON string, else `None`.
pub fn text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// JSON boolean, else `None`.
pub fn flag<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(d)?.as_bool())
}

/// Array of strings; non-string items are dropped, non-arrays become empty.
pub fn strings<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strings_of(Value::deserialize(d)?))
}

/// Array of records; only object items that decode are kept.
pub fn records<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(d)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Nested object; anything else (or an undecodable object) becomes `T::default()`.
pub fn record<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(record_of(Value::deserialize(d)?))
}

/// Owned-value variant of [`strings`].
pub fn strings_of(v: Value) -> Vec<String> {
    match v {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|x| match x {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Owned-value variant of [`record`].
pub fn record_of<T>(v: Value) -> T
where
    T: DeserializeOwned + Default,
{
    if v.is_object() {
        serde_json::from_value(v).unwrap_or_default()
    } else {
        T::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        score: Option<f64>,
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "flag")]
        found: Option<bool>,
        #[serde(default, deserialize_with = "strings")]
        notes: Vec<String>,
    }

    #[test]
    fn wrong_types_decode_as_absent() {
        let p: Probe = record_of(json!({
            "score": "7.5",
            "label": 12,
            "found": "yes",
            "notes": "not a list"
        }));
        assert_eq!(p, Probe::default());
    }

    #[test]
    fn well_typed_fields_survive() {
        let p: Probe = record_of(json!({
            "score": 7.3,
            "label": "ok",
            "found": true,
            "notes": ["a", 1, null, "b"]
        }));
        assert_eq!(p.score, Some(7.3));
        assert_eq!(p.label.as_deref(), Some("ok"));
        assert_eq!(p.found, Some(true));
        assert_eq!(p.notes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn non_object_record_is_default() {
        let p: Probe = record_of(json!([1, 2, 3]));
        assert_eq!(p, Probe::default());
        let p: Probe = record_of(Value::Null);
        assert_eq!(p, Probe::default());
    }
}
