//! The untyped record exchanged with storage, sync, and UI.
//!
//! A [`Record`] is a plain JSON object. The engine never mutates a record it
//! was handed; every operation that changes data builds a new one.

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use till_types::{parse_timestamp, Millis};

/// Field carrying the modification time of a record.
pub const LAST_UPDATED: &str = "lastUpdated";
/// Field carrying the creation time of a record.
pub const CREATED_AT: &str = "createdAt";

/// One entity snapshot as an untyped key/value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wraps a JSON value, rejecting anything that is not an object.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Err(ModelError::NotAnObject("null")),
            Value::Bool(_) => Err(ModelError::NotAnObject("boolean")),
            Value::Number(_) => Err(ModelError::NotAnObject("number")),
            Value::String(_) => Err(ModelError::NotAnObject("string")),
            Value::Array(_) => Err(ModelError::NotAnObject("array")),
        }
    }

    /// Parses a record from JSON text.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the field is absent, `null`, or the empty string.
    #[must_use]
    pub fn is_missing(&self, field: &str) -> bool {
        is_missing_value(self.get(field))
    }

    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Numeric value of a field, accepting numeric strings. Non-finite
    /// results are treated as absent.
    #[must_use]
    pub fn get_number(&self, field: &str) -> Option<f64> {
        self.get(field)
            .and_then(parse_number)
            .filter(|n| n.is_finite())
    }

    #[must_use]
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    #[must_use]
    pub fn get_array(&self, field: &str) -> Option<&Vec<Value>> {
        self.get(field).and_then(Value::as_array)
    }

    #[must_use]
    pub fn timestamp(&self, field: &str) -> Option<Millis> {
        self.get(field).and_then(parse_timestamp)
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<Millis> {
        self.timestamp(LAST_UPDATED)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}

/// Absent, `null`, and `""` all count as "no value supplied".
#[must_use]
pub fn is_missing_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Float parse of a record value: JSON numbers as-is, strings trimmed and
/// parsed whole. The result may be non-finite (`"inf"`); callers decide.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Structural equality over optional record values.
///
/// - An absent value equals only another absent value.
/// - Numbers compare by numeric value, so `5` equals `5.0`.
/// - Arrays compare element-wise in order.
/// - Objects are equal when their key sets match and every value is
///   recursively equal.
#[must_use]
pub fn deep_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => a == b,
    }
}
