//! Property tests for canonical JSON and content hashes.

use proptest::prelude::*;
use serde_json::{Map, Value};

use registry_reconcile::{canonical_json, ContentHash};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| Value::from(n)),
        "[a-zA-Z0-9 _\\-]{0,12}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[a-z$]{1,6}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Rebuild every object with its keys in reverse order
fn reverse_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut reversed = Map::new();
            for (key, item) in map.iter().rev() {
                reversed.insert(key.clone(), reverse_keys(item));
            }
            Value::Object(reversed)
        }
        Value::Array(items) => Value::Array(items.iter().map(reverse_keys).collect()),
        other => other.clone(),
    }
}

/// Turn every integer into the equivalent float
fn as_floats(value: &Value) -> Value {
    match value {
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| serde_json::Number::from_f64(i as f64))
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.clone(), as_floats(v))).collect()),
        Value::Array(items) => Value::Array(items.iter().map(as_floats).collect()),
        other => other.clone(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: key order never changes the hash.
    #[test]
    fn property_hash_ignores_key_order(value in json_value()) {
        prop_assert_eq!(
            ContentHash::of_value(&value),
            ContentHash::of_value(&reverse_keys(&value))
        );
    }

    /// PROPERTY: integral floats hash like the integers they equal.
    #[test]
    fn property_hash_ignores_integral_float_form(value in json_value()) {
        prop_assert_eq!(canonical_json(&value), canonical_json(&as_floats(&value)));
    }

    /// PROPERTY: canonical output is valid JSON denoting the same value.
    #[test]
    fn property_canonical_json_parses_back(value in json_value()) {
        let reparsed: Value = serde_json::from_str(&canonical_json(&value)).unwrap();
        prop_assert_eq!(reparsed, value);
    }

    /// PROPERTY: hashes are 64 lowercase hex digits.
    #[test]
    fn property_hash_shape(value in json_value()) {
        let hash = ContentHash::of_value(&value);
        prop_assert_eq!(hash.as_str().len(), 64);
        prop_assert!(hash.as_str().chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
