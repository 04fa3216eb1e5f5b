//! Shared value builders for the codec benchmarks.

use dagcbor_codec::{Cid, Value};

/// A small map with mixed scalar values.
pub fn simple_map() -> Value {
    Value::Map(vec![
        ("name".to_string(), Value::Text("Alice".to_string())),
        (
            "email".to_string(),
            Value::Text("alice@example.com".to_string()),
        ),
        ("age".to_string(), Value::Integer(30)),
        ("score".to_string(), Value::Float(0.75)),
    ])
}

/// A map nesting `width` children per level, `depth` levels deep.
pub fn nested_map(depth: usize, width: usize) -> Value {
    if depth == 0 {
        Value::Text("leaf".to_string())
    } else {
        let children = (0..width)
            .map(|i| (format!("key_{i}"), nested_map(depth - 1, width)))
            .collect();
        Value::Map(children)
    }
}

/// A list cycling through every value kind.
pub fn mixed_list(len: usize) -> Value {
    let items = (0..len)
        .map(|i| match i % 6 {
            0 => Value::Integer(i as i128 * 31),
            1 => Value::Text(format!("item_{i}")),
            2 => Value::Float(i as f64 / 3.0),
            3 => Value::Bytes(vec![0xab; 16]),
            4 => Value::Link(Cid::from_raw(vec![0x01; 34])),
            _ => Value::Bool(i % 2 == 0),
        })
        .collect();
    Value::List(items)
}
