//! Dotted-path lookup into nested values
//!
//! Supports `"a.b.0"`-style descent through mappings (string or integer
//! segment), wrapped collection nodes and sequences (integer segment).

use crate::value::{ItemMap, Key, Value};

fn lookup<'a>(items: &'a ItemMap, segment: &str) -> Option<&'a Value> {
    if let Some(v) = items.get(&Key::Str(segment.to_string())) {
        return Some(v);
    }
    let index = segment.parse::<i64>().ok()?;
    items.get(&Key::Int(index))
}

fn step<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Map(items) | Value::Coll(items) => lookup(items, segment),
        Value::Seq(items) => items.get(segment.parse::<usize>().ok()?),
        _ => None,
    }
}

/// Resolve a dotted path against a value tree.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Resolve a dotted path whose first segment indexes into a mapping.
pub fn get_in<'a>(items: &'a ItemMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = lookup(items, segments.next()?)?;
    for segment in segments {
        current = step(current, segment)?;
    }
    Some(current)
}
