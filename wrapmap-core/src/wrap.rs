//! Recursive wrapping and unwrapping of aggregate values
//!
//! `wrap` turns any collection-like value into a wrapped collection node
//! whose nested aggregates are themselves wrapped; `unwrap` is the full
//! recursive inverse down to raw sequences and mappings. Both are pure.

use crate::value::{is_sequential, ItemMap, Key, Value};

/// Whether a value is an ordered/keyed aggregate that wrapping applies to.
///
/// Primitives, strings and null are opaque and never wrapped.
pub fn is_collection_like(value: &Value) -> bool {
    matches!(value, Value::Seq(_) | Value::Map(_) | Value::Coll(_))
}

/// Recursively wrap a value.
///
/// Collection-like values become `Coll` nodes with every entry wrapped
/// in turn; sequences get integer keys in order. Opaque values are
/// returned unchanged, so already-plain values never get double-wrapped.
pub fn wrap(value: &Value) -> Value {
    match value {
        Value::Seq(items) => Value::Coll(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| (Key::Int(i as i64), wrap(v)))
                .collect(),
        ),
        Value::Map(items) | Value::Coll(items) => Value::Coll(
            items
                .iter()
                .map(|(k, v)| (k.clone(), wrap(v)))
                .collect(),
        ),
        opaque => opaque.clone(),
    }
}

/// Recursively unwrap a value down to raw aggregates.
///
/// A `Coll` node whose keys are exactly `0..n` integers exports as a
/// sequence, otherwise as a mapping. Raw aggregates are recursed into as
/// well, since wrapped nodes may sit anywhere inside them.
pub fn unwrap(value: &Value) -> Value {
    match value {
        Value::Coll(items) => {
            let raw: ItemMap = items
                .iter()
                .map(|(k, v)| (k.clone(), unwrap(v)))
                .collect();
            if is_sequential(&raw) {
                Value::Seq(raw.into_iter().map(|(_, v)| v).collect())
            } else {
                Value::Map(raw)
            }
        }
        Value::Map(items) => Value::Map(
            items
                .iter()
                .map(|(k, v)| (k.clone(), unwrap(v)))
                .collect(),
        ),
        Value::Seq(items) => Value::Seq(items.iter().map(unwrap).collect()),
        opaque => opaque.clone(),
    }
}

/// Deep raw export of a whole mapping: every entry unwrapped.
///
/// This is the snapshot handed to a fresh reference instance at the
/// start of every delegated call.
pub fn export_items(items: &ItemMap) -> ItemMap {
    items
        .iter()
        .map(|(k, v)| (k.clone(), unwrap(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_values_pass_through() {
        assert_eq!(wrap(&Value::Int(5)), Value::Int(5));
        assert_eq!(wrap(&Value::Str("x".into())), Value::Str("x".into()));
        assert_eq!(wrap(&Value::Null), Value::Null);
        assert_eq!(unwrap(&Value::Bool(true)), Value::Bool(true));
    }

    #[test]
    fn test_wrap_sequence_assigns_int_keys() {
        let wrapped = wrap(&Value::Seq(vec![Value::Int(1), Value::Int(2)]));
        match wrapped {
            Value::Coll(items) => {
                assert_eq!(items.get(&Key::Int(0)), Some(&Value::Int(1)));
                assert_eq!(items.get(&Key::Int(1)), Some(&Value::Int(2)));
            }
            other => panic!("expected Coll, got {:?}", other),
        }
    }

    #[test]
    fn test_wrap_is_recursive() {
        let nested: ItemMap = [(
            Key::Str("inner".into()),
            Value::Seq(vec![Value::Int(1)]),
        )]
        .into_iter()
        .collect();
        let wrapped = wrap(&Value::Map(nested));
        match wrapped {
            Value::Coll(items) => {
                assert!(matches!(
                    items.get(&Key::Str("inner".into())),
                    Some(Value::Coll(_))
                ));
            }
            other => panic!("expected Coll, got {:?}", other),
        }
    }

    #[test]
    fn test_unwrap_sequential_coll_to_seq() {
        let coll = wrap(&Value::Seq(vec![Value::Int(3), Value::Int(4)]));
        assert_eq!(
            unwrap(&coll),
            Value::Seq(vec![Value::Int(3), Value::Int(4)])
        );
    }

    #[test]
    fn test_unwrap_keyed_coll_to_map() {
        let items: ItemMap = [(Key::Str("a".into()), Value::Int(1))]
            .into_iter()
            .collect();
        let raw = unwrap(&Value::Coll(items.clone()));
        assert_eq!(raw, Value::Map(items));
    }

    #[test]
    fn test_wrap_unwrap_roundtrip() {
        let tree = Value::Map(
            [
                (
                    Key::Str("list".into()),
                    Value::Seq(vec![Value::Int(1), Value::Str("two".into())]),
                ),
                (
                    Key::Str("deep".into()),
                    Value::Map(
                        [(Key::Str("x".into()), Value::Float(1.5))]
                            .into_iter()
                            .collect(),
                    ),
                ),
            ]
            .into_iter()
            .collect(),
        );
        let wrapped = wrap(&tree);
        assert_eq!(wrap(&unwrap(&wrapped)), wrapped);
    }

    #[test]
    fn test_rewrap_is_shape_stable() {
        let tree = Value::Seq(vec![Value::Map(
            [(Key::Str("a".into()), Value::Int(1))].into_iter().collect(),
        )]);
        let once = wrap(&tree);
        assert_eq!(wrap(&once), once);
    }
}
