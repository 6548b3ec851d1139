//! Permissive source-to-mapping conversion
//!
//! Construction never fails on shape: mappings and wrapped nodes keep
//! their entries, sequences are indexed in order, and anything else is
//! treated as a single-element sequence rather than rejected.

use crate::error::Result;
use crate::value::{ItemMap, Key, Value};

/// Normalize an arbitrary value into an ordered item mapping.
pub fn to_items(value: Value) -> ItemMap {
    match value {
        Value::Map(items) | Value::Coll(items) => items,
        Value::Seq(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::Int(i as i64), v))
            .collect(),
        opaque => [(Key::Int(0), opaque)].into_iter().collect(),
    }
}

/// Parse a JSON string and normalize the result into a mapping.
pub fn items_from_json(s: &str) -> Result<ItemMap> {
    Ok(to_items(Value::from_json_str(s)?))
}
