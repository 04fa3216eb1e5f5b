//! Dynamic IPLD value type.

use std::cmp::Ordering;

use crate::cid::Cid;

/// A dynamic IPLD value.
///
/// This type represents any value the DAG-CBOR wire format can carry. The
/// set of kinds is closed: every value is one of the nine variants below,
/// and encoding dispatches over them exhaustively.
///
/// Map entries keep the caller's insertion order; the encoder emits them in
/// canonical key order regardless. Use [`Value::map`] to sort entries up
/// front when a canonical in-memory representation is wanted.
#[derive(Debug, Clone)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer. The encodable range is
    /// [`Value::INTEGER_MIN`]`..=`[`Value::INTEGER_MAX`].
    Integer(i128),
    /// 64-bit float. NaN and the infinities have no canonical encoding and
    /// are rejected by the codec.
    Float(f64),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Text string (UTF-8).
    Text(String),
    /// Ordered sequence of values.
    List(Vec<Value>),
    /// Map with string keys, unique under the canonical comparator.
    Map(Vec<(String, Value)>),
    /// Link to other content, carried as an opaque [`Cid`].
    Link(Cid),
}

/// Canonical ordering for map keys.
///
/// Keys sort by the length of their UTF-8 encoding first, with ties broken
/// by bytewise comparison of the UTF-8 bytes. This differs from `str`'s own
/// ordering only for keys containing characters outside ASCII, but those
/// are exactly the cases that matter on the wire.
pub fn canonical_key_cmp(a: &str, b: &str) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.as_bytes().cmp(b.as_bytes()),
        other => other,
    }
}

impl Value {
    /// Smallest encodable integer (-2^64).
    pub const INTEGER_MIN: i128 = -(1i128 << 64);

    /// Largest encodable integer (2^64 - 1).
    pub const INTEGER_MAX: i128 = (1i128 << 64) - 1;

    /// Creates a map value with entries sorted in canonical key order.
    ///
    /// Duplicate keys are kept as given; the encoder rejects them.
    #[must_use]
    pub fn map(mut pairs: Vec<(String, Value)>) -> Self {
        pairs.sort_by(|a, b| canonical_key_cmp(&a.0, &b.0));
        Value::Map(pairs)
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get this value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get this value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Get this value as bytes, if it is a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get this value as a string, if it is a text string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as map entries, if it is a map.
    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Get this value as a link, if it is one.
    pub fn as_link(&self) -> Option<&Cid> {
        match self {
            Value::Link(cid) => Some(cid),
            _ => None,
        }
    }

    /// Look up a key in this map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Equality over values.
///
/// Floats compare by bit pattern, matching the canonical encoding: `0.0`
/// and `-0.0` serialise to different bytes and are therefore distinct.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Link(a), Value::Link(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i128::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(i128::from(n))
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i128::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Integer(i128::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Cid> for Value {
    fn from(cid: Cid) -> Self {
        Value::Link(cid)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_are_sorted() {
        let map = Value::map(vec![
            ("z".to_string(), Value::Integer(1)),
            ("a".to_string(), Value::Integer(2)),
            ("m".to_string(), Value::Integer(3)),
        ]);

        if let Value::Map(pairs) = map {
            assert_eq!(pairs[0].0, "a");
            assert_eq!(pairs[1].0, "m");
            assert_eq!(pairs[2].0, "z");
        } else {
            panic!("Expected Map");
        }
    }

    #[test]
    fn map_key_length_ordering() {
        // Shorter keys come first regardless of their bytes.
        let map = Value::map(vec![
            ("abc".to_string(), Value::Integer(1)),
            ("a".to_string(), Value::Integer(2)),
            ("zz".to_string(), Value::Integer(3)),
        ]);

        if let Value::Map(pairs) = map {
            assert_eq!(pairs[0].0, "a");
            assert_eq!(pairs[1].0, "zz");
            assert_eq!(pairs[2].0, "abc");
        } else {
            panic!("Expected Map");
        }
    }

    #[test]
    fn key_cmp_is_length_first() {
        // "é" is two UTF-8 bytes, so it sorts after any one-byte key.
        assert_eq!(canonical_key_cmp("z", "é"), Ordering::Less);
        assert_eq!(canonical_key_cmp("é", "z"), Ordering::Greater);
        // Length-first diverges from plain string ordering: "aé" is three
        // bytes and loses to the two-byte "zz".
        assert_eq!(canonical_key_cmp("zz", "aé"), Ordering::Less);
        assert!("aé" < "zz");
        assert_eq!(canonical_key_cmp("aa", "ab"), Ordering::Less);
        assert_eq!(canonical_key_cmp("a", "a"), Ordering::Equal);
    }

    #[test]
    fn float_equality_is_bitwise() {
        assert_eq!(Value::Float(1.5), Value::Float(1.5));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn value_accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_bool(), None);

        assert_eq!(Value::Integer(42).as_integer(), Some(42));
        assert_eq!(Value::Text("42".to_string()).as_integer(), None);

        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Text("hello".to_string()).as_text(), Some("hello"));
        assert_eq!(Value::Bytes(vec![1, 2, 3]).as_bytes(), Some(&[1, 2, 3][..]));

        let cid = Cid::from_raw(vec![1, 2]);
        assert_eq!(Value::Link(cid.clone()).as_link(), Some(&cid));
    }

    #[test]
    fn map_get() {
        let map = Value::map(vec![
            ("name".to_string(), Value::Text("Alice".to_string())),
            ("age".to_string(), Value::Integer(30)),
        ]);

        assert_eq!(map.get("name"), Some(&Value::Text("Alice".to_string())));
        assert_eq!(map.get("age"), Some(&Value::Integer(30)));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from(42i32), Value::Integer(42));
        assert_eq!(Value::from(42u32), Value::Integer(42));
        assert_eq!(Value::from(u64::MAX), Value::Integer(i128::from(u64::MAX)));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from(vec![1u8, 2, 3]), Value::Bytes(vec![1, 2, 3]));
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn integer_range_constants() {
        assert_eq!(Value::INTEGER_MAX, 18_446_744_073_709_551_615);
        assert_eq!(Value::INTEGER_MIN, -18_446_744_073_709_551_616);
    }
}
