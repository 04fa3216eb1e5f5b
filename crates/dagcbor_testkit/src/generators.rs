//! Property-based test generators using proptest.
//!
//! All strategies produce values the codec must accept: integers within the
//! wire range, finite floats, and maps with unique keys.

use dagcbor_codec::{Cid, Value};
use proptest::prelude::*;

/// Strategy for integers within the wire-representable range.
///
/// Mixes ordinary magnitudes with values near the 64-bit boundaries in both
/// directions.
pub fn integer_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        4 => any::<i64>().prop_map(i128::from),
        1 => any::<u64>().prop_map(i128::from),
        1 => any::<u64>().prop_map(|n| -1 - i128::from(n)),
    ]
}

/// Strategy for finite floats.
pub fn float_strategy() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("float must be finite", |x| x.is_finite())
}

/// Strategy for map keys.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9_]{0,12}").expect("valid regex")
}

/// Strategy for links with non-empty raw bytes.
pub fn cid_strategy() -> impl Strategy<Value = Cid> {
    prop::collection::vec(any::<u8>(), 1..48).prop_map(Cid::from_raw)
}

/// Strategy for scalar values only.
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        integer_strategy().prop_map(Value::Integer),
        float_strategy().prop_map(Value::Float),
        prop::collection::vec(any::<u8>(), 0..48).prop_map(Value::Bytes),
        prop::string::string_regex(".{0,16}")
            .expect("valid regex")
            .prop_map(Value::Text),
        cid_strategy().prop_map(Value::Link),
    ]
}

/// Strategy for arbitrary values, nesting lists and maps a few levels deep.
///
/// Map keys are drawn through a `BTreeMap`, so they are unique by
/// construction; their order is left to the encoder.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::btree_map(key_strategy(), inner, 0..6)
                .prop_map(|map| Value::Map(map.into_iter().collect())),
        ]
    })
}
