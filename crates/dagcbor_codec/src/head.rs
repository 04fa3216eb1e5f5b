//! Data item heads.
//!
//! Every CBOR item opens with a head packing a major type (top 3 bits) and
//! an unsigned argument into one to nine bytes. Canonical form uses the
//! unique shortest head that fits the argument.

pub(crate) const MAJOR_UNSIGNED: u8 = 0;
pub(crate) const MAJOR_NEGATIVE: u8 = 1;
pub(crate) const MAJOR_BYTES: u8 = 2;
pub(crate) const MAJOR_TEXT: u8 = 3;
pub(crate) const MAJOR_LIST: u8 = 4;
pub(crate) const MAJOR_MAP: u8 = 5;
pub(crate) const MAJOR_TAG: u8 = 6;
pub(crate) const MAJOR_SIMPLE: u8 = 7;

// Additional-info values selecting how many argument bytes follow.
pub(crate) const AI_ONE_BYTE: u8 = 24;
pub(crate) const AI_TWO_BYTES: u8 = 25;
pub(crate) const AI_FOUR_BYTES: u8 = 26;
pub(crate) const AI_EIGHT_BYTES: u8 = 27;

// Simple values carried inline in a major-type-7 head.
pub(crate) const SIMPLE_FALSE: u8 = 20;
pub(crate) const SIMPLE_TRUE: u8 = 21;
pub(crate) const SIMPLE_NULL: u8 = 22;

/// The only tag the codec accepts; wraps a CID byte string.
pub(crate) const CID_TAG: u64 = 42;

/// Encodes a head in its unique minimal form.
///
/// Returns the scratch buffer and the number of significant bytes.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn encode_head(major: u8, argument: u64) -> ([u8; 9], usize) {
    debug_assert!(major <= 7);
    let mt = major << 5;
    let mut head = [0u8; 9];
    if argument < 24 {
        head[0] = mt | argument as u8;
        (head, 1)
    } else if argument <= 0xff {
        head[0] = mt | AI_ONE_BYTE;
        head[1] = argument as u8;
        (head, 2)
    } else if argument <= 0xffff {
        head[0] = mt | AI_TWO_BYTES;
        head[1..3].copy_from_slice(&(argument as u16).to_be_bytes());
        (head, 3)
    } else if argument <= 0xffff_ffff {
        head[0] = mt | AI_FOUR_BYTES;
        head[1..5].copy_from_slice(&(argument as u32).to_be_bytes());
        (head, 5)
    } else {
        head[0] = mt | AI_EIGHT_BYTES;
        head[1..9].copy_from_slice(&argument.to_be_bytes());
        (head, 9)
    }
}

/// Smallest argument that justifies the given number of argument bytes.
///
/// An argument below this floor has a shorter encoding, so reading it at
/// this width means the input was not canonical.
pub(crate) fn canonical_floor(argument_bytes: usize) -> u64 {
    match argument_bytes {
        1 => 24,
        2 => 1 << 8,
        4 => 1 << 16,
        8 => 1 << 32,
        _ => unreachable!("argument widths are 1, 2, 4 or 8 bytes"),
    }
}
