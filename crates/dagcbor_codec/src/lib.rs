//! # DAG-CBOR Codec
//!
//! Strict, deterministic DAG-CBOR encoding and decoding.
//!
//! Every value has exactly one valid byte representation, and the decoder
//! rejects everything else. The rules on top of plain CBOR:
//!
//! - Integers and lengths use the minimal head encoding
//! - Map keys are strings, unique, and sorted by UTF-8 byte length first,
//!   then bytewise
//! - The only tag is 42, wrapping a byte string with a leading 0x00 byte
//!   (a link to other content)
//! - Floats are 64-bit only; NaN and the infinities are rejected
//! - No indefinite-length items, no break byte, no simple values other
//!   than `false`, `true` and `null`
//! - Exactly one top-level item, unless trailing data is explicitly
//!   permitted
//!
//! ## Usage
//!
//! ```
//! use dagcbor_codec::{decode, encode, Value};
//!
//! let value = Value::Map(vec![
//!     ("a".into(), Value::Integer(12)),
//!     ("b".into(), Value::Text("hello!".into())),
//! ]);
//!
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, b"\xa2aa\x0cabfhello!");
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! Decoding failures carry the byte offset and the logical path of
//! containers leading to the offence:
//!
//! ```
//! use dagcbor_codec::{decode, DecodeErrorKind};
//!
//! // Map keys "b" and "a" in the wrong order.
//! let err = decode(&[0xa2, 0x61, 0x62, 0x01, 0x61, 0x61, 0x02]).unwrap_err();
//! assert!(matches!(err.kind, DecodeErrorKind::MapKeyOutOfOrder { .. }));
//! assert_eq!(err.offset, 4);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cid;
mod decoder;
mod encoder;
mod error;
mod head;
mod path;
mod value;

pub use cid::Cid;
pub use decoder::{decode, decode_first, decode_reader, DecodeOptions, Decoder};
pub use encoder::{
    canonical_order, check_key_compliance, encode, encode_into, EncodeOptions, Encoder,
};
pub use error::{DecodeError, DecodeErrorKind, DecodeResult, EncodeError, EncodeResult, NonFinite};
pub use path::{PathSegment, ValuePath};
pub use value::{canonical_key_cmp, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_scalars() {
        for value in [
            Value::Null,
            Value::Bool(true),
            Value::Bool(false),
            Value::Integer(0),
            Value::Integer(-42),
            Value::Float(1.5),
            Value::Bytes(vec![1, 2, 3]),
            Value::Text("hello".to_string()),
        ] {
            let bytes = encode(&value).unwrap();
            assert_eq!(decode(&bytes).unwrap(), value);
        }
    }

    #[test]
    fn roundtrip_nested() {
        let value = Value::Map(vec![
            (
                "users".to_string(),
                Value::List(vec![
                    Value::Map(vec![
                        ("age".to_string(), Value::Integer(30)),
                        ("name".to_string(), Value::Text("Alice".to_string())),
                    ]),
                    Value::Map(vec![
                        ("age".to_string(), Value::Integer(25)),
                        ("name".to_string(), Value::Text("Bob".to_string())),
                    ]),
                ]),
            ),
            ("count".to_string(), Value::Integer(2)),
            ("ratio".to_string(), Value::Float(0.8)),
            ("link".to_string(), Value::Link(Cid::from_raw(vec![1, 2, 3]))),
        ]);
        let bytes = encode(&value).unwrap();
        let decoded = decode(&bytes).unwrap();
        // Entries come back in canonical key order.
        let expected = Value::map(match value {
            Value::Map(pairs) => pairs,
            _ => unreachable!(),
        });
        assert_eq!(decoded, expected);
    }

    #[test]
    fn decoding_is_the_inverse_of_encoding() {
        let bytes: &[u8] = b"\xa2aa\x0cabfhello!";
        let value = decode(bytes).unwrap();
        assert_eq!(encode(&value).unwrap(), bytes);
    }
}
