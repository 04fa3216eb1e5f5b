//! Runs the shared wire-format vector suite against the codec.

use dagcbor_codec::{decode, encode, DecodeErrorKind};
use dagcbor_testkit::vectors::{encoding_vectors, hex_decode, rejection_vectors};

fn kind_name(kind: &DecodeErrorKind) -> &'static str {
    match kind {
        DecodeErrorKind::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
        DecodeErrorKind::InvalidHead { .. } => "InvalidHead",
        DecodeErrorKind::NonCanonicalArgument { .. } => "NonCanonicalArgument",
        DecodeErrorKind::InvalidUtf8 => "InvalidUtf8",
        DecodeErrorKind::UnexpectedTag { .. } => "UnexpectedTag",
        DecodeErrorKind::DisallowedFloat(_) => "DisallowedFloat",
        DecodeErrorKind::MapKeyNotString { .. } => "MapKeyNotString",
        DecodeErrorKind::MapKeyDuplicate { .. } => "MapKeyDuplicate",
        DecodeErrorKind::MapKeyOutOfOrder { .. } => "MapKeyOutOfOrder",
        DecodeErrorKind::InvalidCidPrefix => "InvalidCidPrefix",
        DecodeErrorKind::TrailingBytes { .. } => "TrailingBytes",
        DecodeErrorKind::NestingTooDeep { .. } => "NestingTooDeep",
        DecodeErrorKind::Io { .. } => "Io",
    }
}

#[test]
fn encoding_vectors_roundtrip_unchanged() {
    for vector in encoding_vectors() {
        let bytes = hex_decode(&vector.bytes_hex);
        let value = decode(&bytes)
            .unwrap_or_else(|e| panic!("vector {} must decode, got: {e}", vector.id));
        let encoded = encode(&value)
            .unwrap_or_else(|e| panic!("vector {} must re-encode, got: {e}", vector.id));
        assert_eq!(
            encoded, bytes,
            "vector {} must re-encode to its own bytes",
            vector.id
        );
    }
}

#[test]
fn rejection_vectors_fail_with_expected_kind() {
    for vector in rejection_vectors() {
        let bytes = hex_decode(&vector.bytes_hex);
        let expected = vector.expected_error.as_deref().expect("rejection vector");
        match decode(&bytes) {
            Ok(value) => panic!(
                "vector {} must be rejected, decoded to {value:?}",
                vector.id
            ),
            Err(e) => assert_eq!(
                kind_name(&e.kind),
                expected,
                "vector {} failed with the wrong kind: {e}",
                vector.id
            ),
        }
    }
}
