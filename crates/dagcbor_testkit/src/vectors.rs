//! Shared wire-format test vectors.
//!
//! These vectors pin the canonical byte representations and the rejection
//! behaviour, so alternative implementations can be checked against the
//! same data. The JSON helpers exist for exactly that: exporting the suite
//! to other languages.

use serde::{Deserialize, Serialize};

/// A wire-format test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input bytes (hex-encoded).
    pub bytes_hex: String,
    /// Expected decode error kind name, or `None` if the bytes are the
    /// canonical encoding of a value and must round-trip unchanged.
    pub expected_error: Option<String>,
}

impl TestVector {
    fn ok(id: &str, description: &str, bytes_hex: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            bytes_hex: bytes_hex.into(),
            expected_error: None,
        }
    }

    fn err(id: &str, description: &str, bytes_hex: &str, kind: &str) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            bytes_hex: bytes_hex.into(),
            expected_error: Some(kind.into()),
        }
    }
}

/// Vectors that must decode, and re-encode to the identical bytes.
pub fn encoding_vectors() -> Vec<TestVector> {
    vec![
        TestVector::ok("null", "null", "f6"),
        TestVector::ok("false", "false", "f4"),
        TestVector::ok("true", "true", "f5"),
        TestVector::ok("int_0", "integer 0", "00"),
        TestVector::ok("int_23", "largest one-byte integer", "17"),
        TestVector::ok("int_24", "smallest two-byte integer", "1818"),
        TestVector::ok("int_255", "integer 255", "18ff"),
        TestVector::ok("int_256", "integer 256", "190100"),
        TestVector::ok("int_65536", "integer 65536", "1a00010000"),
        TestVector::ok(
            "int_2_32",
            "integer 2^32",
            "1b0000000100000000",
        ),
        TestVector::ok(
            "int_max",
            "integer 2^64-1",
            "1bffffffffffffffff",
        ),
        TestVector::ok("int_neg1", "integer -1", "20"),
        TestVector::ok("int_neg24", "integer -24", "37"),
        TestVector::ok("int_neg25", "integer -25", "3818"),
        TestVector::ok("int_neg100", "integer -100", "3863"),
        TestVector::ok(
            "int_min",
            "integer -2^64",
            "3bffffffffffffffff",
        ),
        TestVector::ok("float_1_5", "float 1.5", "fb3ff8000000000000"),
        TestVector::ok("float_neg0", "float -0.0", "fb8000000000000000"),
        TestVector::ok("bytes_empty", "empty byte string", "40"),
        TestVector::ok("bytes_3", "byte string 010203", "43010203"),
        TestVector::ok("text_empty", "empty text string", "60"),
        TestVector::ok("text_a", "text \"a\"", "6161"),
        TestVector::ok("text_hello", "text \"hello\"", "6568656c6c6f"),
        TestVector::ok("list_empty", "empty list", "80"),
        TestVector::ok("list_0_1", "list [0, 1]", "820001"),
        TestVector::ok("map_empty", "empty map", "a0"),
        TestVector::ok(
            "map_two_keys",
            "map {\"a\": 12, \"b\": \"hello!\"}",
            "a261610c61626668656c6c6f21",
        ),
        TestVector::ok(
            "map_length_first",
            "map {\"a\": 2, \"bb\": 1} in length-first key order",
            "a261610262626201",
        ),
        TestVector::ok(
            "link",
            "link with raw bytes 01020304",
            "d82a450001020304",
        ),
        TestVector::ok(
            "nested",
            "map {\"x\": [1, {\"y\": null}]}",
            "a161788201a16179f6",
        ),
    ]
}

/// Vectors that must be rejected, with the expected error kind.
pub fn rejection_vectors() -> Vec<TestVector> {
    vec![
        TestVector::err("empty", "no bytes at all", "", "UnexpectedEndOfInput"),
        TestVector::err(
            "truncated_argument",
            "head promises one argument byte",
            "18",
            "UnexpectedEndOfInput",
        ),
        TestVector::err(
            "truncated_payload",
            "byte string shorter than declared",
            "450102",
            "UnexpectedEndOfInput",
        ),
        TestVector::err(
            "truncated_list",
            "list missing its second item",
            "8200",
            "UnexpectedEndOfInput",
        ),
        TestVector::err(
            "overlong_24",
            "23 encoded in two bytes",
            "1817",
            "NonCanonicalArgument",
        ),
        TestVector::err(
            "overlong_255",
            "255 encoded in three bytes",
            "1900ff",
            "NonCanonicalArgument",
        ),
        TestVector::err(
            "overlong_65535",
            "65535 encoded in five bytes",
            "1a0000ffff",
            "NonCanonicalArgument",
        ),
        TestVector::err(
            "overlong_length",
            "one-byte string length that fits inline",
            "780161",
            "NonCanonicalArgument",
        ),
        TestVector::err(
            "indefinite_bytes",
            "indefinite-length byte string",
            "5f",
            "InvalidHead",
        ),
        TestVector::err(
            "indefinite_text",
            "indefinite-length text string",
            "7f",
            "InvalidHead",
        ),
        TestVector::err(
            "indefinite_list",
            "indefinite-length list",
            "9f",
            "InvalidHead",
        ),
        TestVector::err(
            "indefinite_map",
            "indefinite-length map",
            "bf",
            "InvalidHead",
        ),
        TestVector::err("break", "lone break byte", "ff", "InvalidHead"),
        TestVector::err("undefined", "simple value undefined", "f7", "InvalidHead"),
        TestVector::err(
            "simple_escape",
            "two-byte simple value",
            "f820",
            "InvalidHead",
        ),
        TestVector::err("half_float", "half-precision float", "f93c00", "InvalidHead"),
        TestVector::err(
            "single_float",
            "single-precision float",
            "fa3fc00000",
            "InvalidHead",
        ),
        TestVector::err(
            "float_nan",
            "float NaN",
            "fb7ff8000000000000",
            "DisallowedFloat",
        ),
        TestVector::err(
            "float_inf",
            "float Infinity",
            "fb7ff0000000000000",
            "DisallowedFloat",
        ),
        TestVector::err(
            "float_neg_inf",
            "float -Infinity",
            "fbfff0000000000000",
            "DisallowedFloat",
        ),
        TestVector::err(
            "bad_utf8",
            "text string with invalid UTF-8",
            "62fffe",
            "InvalidUtf8",
        ),
        TestVector::err(
            "map_key_int",
            "map with an integer key",
            "a10102",
            "MapKeyNotString",
        ),
        TestVector::err(
            "map_key_dup",
            "map repeating key \"a\"",
            "a2616101616102",
            "MapKeyDuplicate",
        ),
        TestVector::err(
            "map_key_order",
            "map with keys \"b\" then \"a\"",
            "a2616201616102",
            "MapKeyOutOfOrder",
        ),
        TestVector::err(
            "map_key_length_order",
            "map with keys \"bb\" then \"a\"",
            "a262626201616102",
            "MapKeyOutOfOrder",
        ),
        TestVector::err("tag_1", "tag 1 (epoch time)", "c100", "UnexpectedTag"),
        TestVector::err(
            "cid_not_bytes",
            "tag 42 wrapping an integer",
            "d82a00",
            "InvalidCidPrefix",
        ),
        TestVector::err(
            "cid_bad_prefix",
            "tag 42 bytes without the 0x00 prefix",
            "d82a4101",
            "InvalidCidPrefix",
        ),
        TestVector::err(
            "cid_empty",
            "tag 42 wrapping an empty byte string",
            "d82a40",
            "InvalidCidPrefix",
        ),
        TestVector::err(
            "trailing",
            "two nulls back to back",
            "f6f6",
            "TrailingBytes",
        ),
    ]
}

/// Hex-encodes bytes, lowercase, no separators.
pub fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Decodes a hex string produced by [`hex_encode`].
///
/// # Panics
///
/// Panics on odd length or non-hex characters; vectors are authored data.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "hex string must have even length");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("invalid hex digit"))
        .collect()
}

/// Serialises vectors to pretty JSON for sharing with other implementations.
pub fn vectors_to_json(vectors: &[TestVector]) -> String {
    serde_json::to_string_pretty(vectors).expect("vectors serialise")
}

/// Reads vectors back from JSON produced by [`vectors_to_json`].
///
/// # Panics
///
/// Panics if the JSON does not describe a vector list.
pub fn vectors_from_json(json: &str) -> Vec<TestVector> {
    serde_json::from_str(json).expect("well-formed vector JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let bytes = vec![0x00, 0xa2, 0xff, 0x10];
        assert_eq!(hex_decode(&hex_encode(&bytes)), bytes);
        assert_eq!(hex_encode(&[0xd8, 0x2a]), "d82a");
    }

    #[test]
    fn vector_ids_are_unique() {
        let mut ids: Vec<String> = encoding_vectors()
            .into_iter()
            .chain(rejection_vectors())
            .map(|v| v.id)
            .collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn json_roundtrip() {
        let vectors = encoding_vectors();
        let json = vectors_to_json(&vectors);
        let restored = vectors_from_json(&json);
        assert_eq!(restored.len(), vectors.len());
        assert_eq!(restored[0].id, vectors[0].id);
        assert_eq!(restored[0].bytes_hex, vectors[0].bytes_hex);
    }
}
