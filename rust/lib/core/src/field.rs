//! Document fields that survive a load/save cycle unchanged.
//!
//! The ERP owns the wire format. A field this client reads is written back
//! exactly as it arrived (same JSON type, same text) unless the user changed
//! it, and a field that was missing stays missing.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::lenient::parse_quantity;

// ── Scalar ──────────────────────────────────────────────────────────

/// An identifier or label. Reads as text whatever its JSON type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scalar {
    text: String,
    /// The value as received; `None` when absent or reassigned.
    received: Option<Value>,
}

impl Scalar {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Missing on input and never assigned. Such fields are not serialized.
    pub fn is_absent(&self) -> bool {
        self.received.is_none() && self.text.is_empty()
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            received: None,
        }
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Self {
            text,
            received: None,
        }
    }
}

impl Deref for Scalar {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for Scalar {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match &self.received {
            Some(value) => value.serialize(s),
            None => s.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(d)?;
        let text = match &value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Ok(Self {
            text,
            received: Some(value),
        })
    }
}

// ── Quantity ────────────────────────────────────────────────────────

/// A planned or actual amount.
///
/// Numbers and numeric text read as their value. Anything else (free text
/// typed into a grid cell, say) reads as zero and is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantity {
    value: f64,
    origin: Origin,
}

#[derive(Debug, Clone, Default, PartialEq)]
enum Origin {
    #[default]
    Absent,
    Received(Value),
    Entered,
}

impl Quantity {
    /// A quantity entered by the user.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            origin: Origin::Entered,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_absent(&self) -> bool {
        self.origin == Origin::Absent
    }

    /// Received value that does not read as a number.
    fn unreadable(&self) -> Option<&Value> {
        match &self.origin {
            Origin::Received(Value::String(s)) if parse_quantity(s).is_err() => self.raw(),
            Origin::Received(Value::Array(_) | Value::Object(_) | Value::Bool(_)) => self.raw(),
            _ => None,
        }
    }

    fn raw(&self) -> Option<&Value> {
        match &self.origin {
            Origin::Received(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq<f64> for Quantity {
    fn eq(&self, other: &f64) -> bool {
        self.value == *other
    }
}

/// Whole numbers without a fractional part, so `48` stays `48`.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unreadable() {
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
            None => write!(f, "{}", number(self.value)),
        }
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match &self.origin {
            Origin::Received(value) => value.serialize(s),
            Origin::Absent | Origin::Entered => number(self.value).serialize(s),
        }
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let received = Value::deserialize(d)?;
        let value = match &received {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => parse_quantity(s).unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(Self {
            value,
            origin: Origin::Received(received),
        })
    }
}
