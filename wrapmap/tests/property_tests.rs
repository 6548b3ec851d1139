//! Property-based tests for the collection facade

use proptest::prelude::*;

use wrapmap::{Collection, ItemMap, Key, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z0-9]{0,6}".prop_map(Value::Str),
    ]
}

proptest! {
    #[test]
    fn prop_unique_strict_output_has_no_duplicates(values in prop::collection::vec(scalar(), 0..24)) {
        let c: Collection = values.iter().cloned().collect();
        let out: Vec<Value> = c.unique_strict(None).items().values().cloned().collect();
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn prop_unique_loose_output_has_no_coercible_duplicates(values in prop::collection::vec(scalar(), 0..24)) {
        let c: Collection = values.iter().cloned().collect();
        let out: Vec<Value> = c.unique(None, false).items().values().cloned().collect();
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                prop_assert!(!a.loose_eq(b));
            }
        }
    }

    #[test]
    fn prop_unique_keeps_input_order(values in prop::collection::vec(scalar(), 0..24)) {
        let c: Collection = values.iter().cloned().collect();
        let out: Vec<Value> = c.unique_strict(None).items().values().cloned().collect();
        // kept values form an ordered subsequence of the input
        let mut input = values.iter();
        for kept in &out {
            prop_assert!(input.any(|v| v == kept));
        }
    }

    #[test]
    fn prop_overwrite_remerge_is_idempotent(entries in prop::collection::vec(("[a-z]{1,5}", any::<i64>()), 0..12)) {
        let incoming = Value::Map(
            entries
                .iter()
                .cloned()
                .map(|(k, v)| (Key::Str(k), Value::Int(v)))
                .collect::<ItemMap>(),
        );
        let mut c = Collection::from_json(r#"{"seed":true}"#).unwrap();
        c.overwrite(incoming.clone());
        let after_first = c.items().clone();
        c.overwrite(incoming);
        prop_assert_eq!(c.items(), &after_first);
    }

    #[test]
    fn prop_sequence_roundtrips_through_to_raw(values in prop::collection::vec(scalar(), 0..16)) {
        let c = Collection::from_value(Value::Seq(values.clone()));
        prop_assert_eq!(c.to_raw(), Value::Seq(values));
    }
}
