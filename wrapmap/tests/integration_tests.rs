//! End-to-end tests for the collection facade

use wrapmap::{Attr, Collection, Config, Error, Key, OpArg, Selector, Value};

#[test]
fn delegated_sort_replaces_the_owning_mapping() {
    let mut c = Collection::from_value(Value::Seq(vec![
        Value::Int(3),
        Value::Int(1),
        Value::Int(2),
    ]));
    c.call("sort", vec![]).unwrap();
    // the owner's own subsequent export reflects the sorted order, not
    // merely the returned value
    assert_eq!(
        c.to_raw(),
        Value::Seq(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(c.to_json().unwrap(), "[1,2,3]");
}

#[test]
fn failed_delegation_leaves_state_at_pre_call() {
    let mut c = Collection::from_json(r#"{"a":1}"#).unwrap();
    let before = c.items().clone();
    assert!(matches!(
        c.call("definitely_not_an_op", vec![]),
        Err(Error::UnknownOperation(_))
    ));
    assert_eq!(c.items(), &before);
}

#[test]
fn map_callback_observes_wrapped_elements() {
    let mut c = Collection::from_json(r#"[{"n":1},{"n":2},{"n":3}]"#).unwrap();
    let result = c
        .call(
            "map",
            vec![OpArg::callback(|item, _| match item {
                Value::Coll(_) => wrapmap::get_path(item, "n").cloned().unwrap_or(Value::Null),
                other => panic!("expected a wrapped element, got {:?}", other),
            })],
        )
        .unwrap();
    match result {
        Value::Coll(items) => {
            let values: Vec<_> = items.values().cloned().collect();
            assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        }
        other => panic!("expected Coll, got {:?}", other),
    }
}

#[test]
fn missing_property_honors_the_toggle() {
    let strict = Collection::from_json(r#"{"a":1}"#).unwrap();
    assert!(matches!(
        strict.prop("missing"),
        Err(Error::MissingProperty(_))
    ));

    let lenient = Collection::from_json(r#"{"a":1}"#)
        .unwrap()
        .with_config(Config {
            raise_on_missing: false,
        });
    match lenient.prop("missing").unwrap() {
        Attr::Value(Value::Null) => {}
        other => panic!("expected null, got {:?}", other),
    }
}

#[test]
fn property_access_spans_naming_conventions() {
    let c = Collection::from_json(r#"{"home_town":"london","APIKey":"k"}"#).unwrap();
    for name in ["home_town", "homeTown", "HOME_TOWN", "HomeTown"] {
        match c.prop(name).unwrap() {
            Attr::Value(Value::Str(s)) => assert_eq!(s, "london", "via {}", name),
            other => panic!("expected string via {}, got {:?}", name, other),
        }
    }
    match c.prop("api_key").unwrap() {
        Attr::Value(Value::Str(s)) => assert_eq!(s, "k"),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn offset_access_bypasses_normalization() {
    let c = Collection::from_json(r#"{"homeTown":"london"}"#).unwrap();
    assert!(c.offset_exists(&Key::Str("homeTown".into())));
    assert!(!c.offset_exists(&Key::Str("home_town".into())));
}

#[test]
fn unique_testable_properties() {
    // first-occurrence order under loose comparison
    let c = Collection::from_json(r#"["a","b","a","c","b"]"#).unwrap();
    let out: Vec<_> = c.unique(None, false).items().values().cloned().collect();
    assert_eq!(
        out,
        vec![
            Value::Str("a".into()),
            Value::Str("b".into()),
            Value::Str("c".into())
        ]
    );

    // strict keeps loose-equal but type-different values apart
    let mixed = Collection::from_value(Value::Seq(vec![
        Value::Int(1),
        Value::Str("1".into()),
        Value::Int(1),
    ]));
    let strict: Vec<_> = mixed.unique_strict(None).items().values().cloned().collect();
    assert_eq!(strict, vec![Value::Int(1), Value::Str("1".into())]);
    let loose: Vec<_> = mixed
        .unique(None, false)
        .items()
        .values()
        .cloned()
        .collect();
    assert_eq!(loose, vec![Value::Int(1)]);
}

#[test]
fn overwrite_merges_recursively() {
    let mut c = Collection::from_json(r#"{"a":{"x":1,"y":2}}"#).unwrap();
    c.overwrite(Value::from_json_str(r#"{"a":{"y":9,"z":3}}"#).unwrap());
    assert_eq!(
        c.to_json().unwrap(),
        r#"{"a":{"x":1,"y":9,"z":3}}"#
    );
}

#[test]
fn count_and_iteration_delegate() {
    let mut c = Collection::from_json(r#"{"a":1,"b":2}"#).unwrap();
    assert_eq!(c.count().unwrap(), 2);
    let values: Vec<_> = c.iter().unwrap().collect();
    assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn json_export_preserves_insertion_order() {
    let mut c = Collection::from_json(r#"{"zeta":1,"alpha":2}"#).unwrap();
    assert_eq!(c.to_json().unwrap(), r#"{"zeta":1,"alpha":2}"#);
    c.push(Value::Int(3));
    let json = c.to_json().unwrap();
    assert_eq!(json, r#"{"zeta":1,"alpha":2,"0":3}"#);
}

#[test]
fn grouping_restructures_keys_wholesale() {
    let mut c = Collection::from_json(r#"[1,2,3,4]"#).unwrap();
    c.call(
        "key_by",
        vec![OpArg::callback(|v, _| match v {
            Value::Int(i) => Value::Str(format!("k{}", i)),
            _ => Value::Null,
        })],
    )
    .unwrap();
    // the owner absorbed the reindexed mapping
    assert!(c.offset_exists(&Key::Str("k3".into())));
    assert_eq!(c.items().len(), 4);
}

#[test]
fn proxies_defer_an_operation_over_a_snapshot() {
    let mut c = Collection::from_json(r#"[2,4,6]"#).unwrap();
    let mut bound = match c.prop("filter").unwrap() {
        Attr::Proxy(bound) => bound,
        other => panic!("expected a proxy, got {:?}", other),
    };

    // mutate the owner after taking the proxy; the proxy keeps its
    // snapshot
    c.push(Value::Int(100));
    let result = bound
        .invoke(vec![OpArg::callback(|v, _| {
            Value::Bool(matches!(v, Value::Int(i) if *i > 3))
        })])
        .unwrap();
    match result {
        Value::Coll(items) => assert_eq!(items.len(), 2),
        other => panic!("expected Coll, got {:?}", other),
    }
}

#[test]
fn extension_registry_is_checked_before_delegation() {
    let mut c = Collection::from_json(r#"[1,2,3]"#).unwrap();
    c.register("middle", |collection, _| {
        let idx = (collection.items().len() / 2) as i64;
        Ok(collection
            .items()
            .get(&Key::Int(idx))
            .cloned()
            .unwrap_or(Value::Null))
    });
    assert_eq!(c.call("middle", vec![]).unwrap(), Value::Int(2));

    // unregistered names still fall through to the engine
    assert_eq!(c.call("count", vec![]).unwrap(), Value::Int(3));
}

#[test]
fn unique_with_selector_over_nested_rows() {
    let c = Collection::from_json(
        r#"[{"user":{"id":1}},{"user":{"id":1}},{"user":{"id":2}}]"#,
    )
    .unwrap();
    let out = c.unique(Some(Selector::path("user.id")), true);
    assert_eq!(out.items().len(), 2);
}

#[test]
fn get_prefers_engine_then_falls_back_to_paths() {
    let mut c = Collection::from_json(r#"{"user":{"name":"ada"},"n":0}"#).unwrap();
    // engine hit
    assert_eq!(c.get("n", None).unwrap(), Value::Int(0));
    // engine miss, dotted-path fallback
    assert_eq!(c.get("user.name", None).unwrap(), Value::Str("ada".into()));
    // full miss, default
    assert_eq!(
        c.get("user.missing", Some(Value::Str("d".into()))).unwrap(),
        Value::Str("d".into())
    );
}
