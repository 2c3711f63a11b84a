//! Event payload normalization.
//!
//! Host event payloads are arbitrary structured values. Before the envelope
//! is handed to the shell command they are normalized into a JSON-safe tree.
//! The input side is a closed [`Payload`] union; opaque host objects plug in
//! through the [`ObjectPayload`] adapter trait instead of reflection.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Number, Value};

/// Adapter for opaque host objects carried inside an event payload.
///
/// Host-side payload types implement this to describe their structured form.
/// When both capabilities are provided, [`to_dict`](Self::to_dict) wins and
/// the attribute map is ignored. A type providing neither falls back to its
/// `Display` string during normalization.
pub trait ObjectPayload: fmt::Debug + fmt::Display + Send + Sync {
    /// The object's own dictionary form, if it has one.
    fn to_dict(&self) -> Option<Payload> {
        None
    }

    /// The object's public attribute map, if it exposes one.
    ///
    /// An empty map is a valid answer and normalizes to `{}`.
    fn attributes(&self) -> Option<Vec<(String, Payload)>> {
        None
    }
}

/// A structured payload value prior to normalization.
#[derive(Debug, Clone)]
pub enum Payload {
    /// String-keyed mapping.
    Map(Vec<(String, Payload)>),
    /// Ordered sequence.
    List(Vec<Payload>),
    /// Fixed-arity sequence. Normalizes like a list.
    Tuple(Vec<Payload>),
    /// Unordered collection. Element order is not guaranteed stable.
    Set(Vec<Payload>),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Boolean.
    Bool(bool),
    /// Absent value.
    Null,
    /// Opaque host object, adapted through [`ObjectPayload`].
    Object(Arc<dyn ObjectPayload>),
}

impl Payload {
    /// Wrap a host object as a payload value.
    pub fn object(obj: impl ObjectPayload + 'static) -> Self {
        Self::Object(Arc::new(obj))
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Recursively convert a payload into a JSON-safe value.
///
/// Dispatch order, first match wins: mapping, ordered sequence, tuple, set,
/// object dictionary form, object attribute map, primitive, string fallback.
/// This never fails; shapes with no structured form degrade to their string
/// representation. Non-finite floats are the one JSON gap and map to null.
pub fn normalize(value: &Payload) -> Value {
    match value {
        Payload::Map(entries) => normalize_entries(entries),
        Payload::List(items) | Payload::Tuple(items) | Payload::Set(items) => {
            Value::Array(items.iter().map(normalize).collect())
        }
        Payload::Object(obj) => {
            if let Some(dict) = obj.to_dict() {
                normalize(&dict)
            } else if let Some(attrs) = obj.attributes() {
                normalize_entries(&attrs)
            } else {
                Value::String(obj.to_string())
            }
        }
        Payload::Int(n) => Value::Number((*n).into()),
        Payload::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Payload::Str(s) => Value::String(s.clone()),
        Payload::Bool(b) => Value::Bool(*b),
        Payload::Null => Value::Null,
    }
}

fn normalize_entries(entries: &[(String, Payload)]) -> Value {
    let map: JsonMap<String, Value> = entries
        .iter()
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect();
    Value::Object(map)
}
