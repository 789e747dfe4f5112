//! Tolerant field decoders.
//!
//! ERP payloads and hand-edited fixtures disagree on scalar types: identifiers
//! arrive as numbers, quantities as strings typed into a grid cell. Decoding
//! accepts both and falls back to the field default on `null`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s = string(d)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}

/// Parse a quantity as typed by a user. Empty input is zero; a decimal
/// comma is accepted.
pub fn parse_quantity(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite())
        .ok_or_else(|| format!("invalid quantity: {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Entry {
        #[serde(default, deserialize_with = "string")]
        id: String,
        #[serde(default, deserialize_with = "opt_string")]
        lot: Option<String>,
    }

    fn entry(json: &str) -> Entry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_and_strings_both_decode() {
        let e = entry(r#"{"id": 42, "lot": "A-1"}"#);
        assert_eq!(e.id, "42");
        assert_eq!(e.lot.as_deref(), Some("A-1"));
        assert_eq!(entry(r#"{"id": true}"#).id, "true");
    }

    #[test]
    fn nulls_and_missing_fall_back_to_defaults() {
        let e = entry(r#"{"id": null, "lot": null}"#);
        assert_eq!(e.id, "");
        assert!(e.lot.is_none());
        assert!(entry(r#"{"lot": ""}"#).lot.is_none());
    }

    #[test]
    fn typed_quantities() {
        assert_eq!(parse_quantity("12,5").unwrap(), 12.5);
        assert_eq!(parse_quantity("  ").unwrap(), 0.0);
        assert!(parse_quantity("NaN").is_err());
        assert!(parse_quantity("2 pcs").is_err());
    }
}
