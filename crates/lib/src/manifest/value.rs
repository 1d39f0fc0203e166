//! Value model for arbitrary JSON carried by the manifest.
//!
//! `initialProperties` can hold any JSON, so the emitters need a closed
//! representation they can walk. [`JsonValue`] mirrors the six JSON kinds and
//! keeps object keys in insertion order, which is the order the generated
//! literals are written in.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered JSON object.
pub type JsonObject = IndexMap<String, JsonValue>;

/// Largest integer a double can hold without losing precision (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A JSON value.
///
/// Numbers are stored as `f64`. Whether a number is written as an integer or
/// a floating point literal is decided by [`as_integer`] at emission time.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
  Null,
  Bool(bool),
  Number(f64),
  String(String),
  Array(Vec<JsonValue>),
  Object(JsonObject),
}

impl JsonValue {
  /// Name of the JSON kind, for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      JsonValue::Null => "null",
      JsonValue::Bool(_) => "boolean",
      JsonValue::Number(_) => "number",
      JsonValue::String(_) => "string",
      JsonValue::Array(_) => "array",
      JsonValue::Object(_) => "object",
    }
  }

  /// Arrays and objects.
  pub fn is_container(&self) -> bool {
    matches!(self, JsonValue::Array(_) | JsonValue::Object(_))
  }

  pub fn as_object(&self) -> Option<&JsonObject> {
    match self {
      JsonValue::Object(map) => Some(map),
      _ => None,
    }
  }
}

/// Returns the integer value of `n` if it is whole and exactly representable.
///
/// Non-finite numbers and whole numbers beyond 2^53 return `None`.
pub fn as_integer(n: f64) -> Option<i64> {
  if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
    Some(n as i64)
  } else {
    None
  }
}

impl From<serde_json::Value> for JsonValue {
  fn from(value: serde_json::Value) -> Self {
    match value {
      serde_json::Value::Null => JsonValue::Null,
      serde_json::Value::Bool(b) => JsonValue::Bool(b),
      // `as_f64` only fails for arbitrary precision numbers; NaN is reported
      // as an unsupported value by the emitters.
      serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
      serde_json::Value::String(s) => JsonValue::String(s),
      serde_json::Value::Array(items) => JsonValue::Array(items.into_iter().map(JsonValue::from).collect()),
      serde_json::Value::Object(map) => JsonValue::Object(map.into_iter().map(|(k, v)| (k, JsonValue::from(v))).collect()),
    }
  }
}

impl Serialize for JsonValue {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      JsonValue::Null => serializer.serialize_unit(),
      JsonValue::Bool(b) => serializer.serialize_bool(*b),
      JsonValue::Number(n) => match as_integer(*n) {
        Some(i) => serializer.serialize_i64(i),
        None => serializer.serialize_f64(*n),
      },
      JsonValue::String(s) => serializer.serialize_str(s),
      JsonValue::Array(items) => items.serialize(serializer),
      JsonValue::Object(map) => map.serialize(serializer),
    }
  }
}

impl<'de> Deserialize<'de> for JsonValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    serde_json::Value::deserialize(deserializer).map(JsonValue::from)
  }
}
