//! Fuzz testing harnesses for the codec.
//!
//! These entry points are written for cargo-fuzz style drivers but are also
//! usable directly from property tests.

use dagcbor_codec::{decode, decode_first, encode};

/// Fuzz target for decoding.
///
/// Arbitrary byte sequences must either decode to a value or return a
/// proper error; panics are bugs.
pub fn fuzz_decode(data: &[u8]) {
    let _ = decode(data);
}

/// Fuzz target for the decode-then-encode identity.
///
/// Any input the strict decoder accepts is canonical by definition, so
/// re-encoding it must reproduce the input bytes exactly.
pub fn fuzz_roundtrip(data: &[u8]) {
    if let Ok(value) = decode(data) {
        let encoded = encode(&value).expect("decoded value must re-encode");
        assert_eq!(encoded, data, "re-encoding must reproduce the input");
    }
}

/// Fuzz target for partial decoding.
///
/// When the first item decodes, the reported length must point at a clean
/// item boundary.
pub fn fuzz_concat(data: &[u8]) {
    if let Ok((value, consumed)) = decode_first(data) {
        assert!(consumed <= data.len());
        let encoded = encode(&value).expect("decoded value must re-encode");
        assert_eq!(encoded.len(), consumed, "consumed bytes must match the item");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fuzz_targets_accept_arbitrary_bytes() {
        for data in [
            &[][..],
            &[0x00][..],
            &[0xff][..],
            &[0xa2, 0x61, 0x62][..],
            &[0xd8, 0x2a, 0x45, 0x00, 0x01, 0x02, 0x03, 0x04][..],
            &[0x9b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff][..],
        ] {
            fuzz_decode(data);
            fuzz_roundtrip(data);
            fuzz_concat(data);
        }
    }
}
