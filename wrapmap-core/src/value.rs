//! Dynamic value model and ordered item mapping

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};

/// The ordered key-to-value mapping backing one collection instance.
///
/// Insertion order is preserved for iteration and export; keys are unique.
pub type ItemMap = IndexMap<Key, Value>;

/// A mapping key: either an integer index or a string name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer index
    Int(i64),
    /// String name
    Str(String),
}

impl Key {
    /// Convert a dynamic value into a key.
    ///
    /// Booleans become `0`/`1`, floats are truncated, null becomes the
    /// empty string. Aggregates cannot be keys.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Int(i) => Ok(Key::Int(*i)),
            Value::Str(s) => Ok(Key::Str(s.clone())),
            Value::Bool(b) => Ok(Key::Int(i64::from(*b))),
            Value::Float(f) => Ok(Key::Int(*f as i64)),
            Value::Null => Ok(Key::Str(String::new())),
            other => Err(Error::InvalidKey(format!(
                "cannot use a {} as a mapping key",
                other.type_name()
            ))),
        }
    }

    /// Convert this key back into a dynamic value.
    pub fn to_value(&self) -> Value {
        match self {
            Key::Int(i) => Value::Int(*i),
            Key::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// An open, recursively defined dynamic value.
///
/// `Seq` and `Map` are *raw* aggregates as they arrive from a source;
/// `Coll` marks a nested, already-wrapped collection node. Primitives and
/// strings are opaque and never wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    Str(String),
    /// Raw ordered sequence
    Seq(Vec<Value>),
    /// Raw ordered mapping
    Map(ItemMap),
    /// Wrapped nested collection node
    Coll(ItemMap),
}

impl Value {
    /// Human-readable name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
            Value::Coll(_) => "collection",
        }
    }

    /// Truthiness used by filtering predicates.
    ///
    /// Null, `false`, zero, the empty string and empty aggregates are
    /// falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Seq(s) => !s.is_empty(),
            Value::Map(m) | Value::Coll(m) => !m.is_empty(),
        }
    }

    /// Numeric view of this value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric coercion used by loose comparison: numbers, booleans and
    /// numeric strings all coerce.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Loose (coercive) equality: `1`, `1.0`, `"1"` and `true` all
    /// compare equal. Falls back to strict equality when neither side
    /// coerces to a number.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }
        match (self.coerce_f64(), other.coerce_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Total, deterministic ordering used by sorting operations.
    ///
    /// Values rank by type class (null < bool < number < string <
    /// aggregate); numbers compare numerically across `Int`/`Float`;
    /// aggregates compare by length, then entry-wise.
    pub fn cmp_order(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Int(_) | Value::Float(_) => 2,
                Value::Str(_) => 3,
                Value::Seq(_) => 4,
                Value::Map(_) => 5,
                Value::Coll(_) => 6,
            }
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (a, b) if rank(a) == 2 && rank(b) == 2 => {
                let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
                a.total_cmp(&b)
            }
            (Value::Seq(a), Value::Seq(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| {
                    for (x, y) in a.iter().zip(b.iter()) {
                        let ord = x.cmp_order(y);
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    Ordering::Equal
                }),
            (Value::Map(a), Value::Map(b)) | (Value::Coll(a), Value::Coll(b)) => a
                .len()
                .cmp(&b.len())
                .then_with(|| {
                    for ((ka, va), (kb, vb)) in a.iter().zip(b.iter()) {
                        let ord = ka.cmp(kb).then_with(|| va.cmp_order(vb));
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    Ordering::Equal
                }),
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }

    /// Build a value from a parsed JSON tree, preserving object key order.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Key::Str(k), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Parse a value from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Value> {
        Ok(Value::from_json(serde_json::from_str(s)?))
    }

    /// Serialize into a JSON tree.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize into a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Value {
    /// Mappings whose keys are exactly `0..n` integers serialize as
    /// arrays; all other mappings serialize as objects with stringified
    /// keys. Wrapped and raw aggregates serialize identically.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Seq(items) => serializer.collect_seq(items),
            Value::Map(m) | Value::Coll(m) => {
                if is_sequential(m) {
                    serializer.collect_seq(m.values())
                } else {
                    serializer.collect_map(m.iter().map(|(k, v)| (k.to_string(), v)))
                }
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<ItemMap> for Value {
    fn from(items: ItemMap) -> Self {
        Value::Map(items)
    }
}

/// Whether the mapping's keys are exactly the integers `0..n` in order.
///
/// This is the list/object heuristic used for export and unwrapping.
pub fn is_sequential(items: &ItemMap) -> bool {
    items
        .keys()
        .enumerate()
        .all(|(i, key)| *key == Key::Int(i as i64))
}

/// The key an append assigns: one past the largest integer key, never
/// below zero.
pub fn next_index(items: &ItemMap) -> Key {
    let next = items
        .keys()
        .filter_map(|k| match k {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        })
        .max()
        .map_or(0, |max| max.saturating_add(1).max(0));
    Key::Int(next)
}
