//! Error types for the codec crate.

use std::fmt::Write as _;
use std::io;

use thiserror::Error;

use crate::path::ValuePath;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// The float values without a canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFinite {
    /// Not a number.
    Nan,
    /// Positive infinity.
    PositiveInfinity,
    /// Negative infinity.
    NegativeInfinity,
}

impl NonFinite {
    /// Classifies a float, returning `None` for finite values.
    pub(crate) fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(Self::Nan)
        } else if value == f64::INFINITY {
            Some(Self::PositiveInfinity)
        } else if value == f64::NEG_INFINITY {
            Some(Self::NegativeInfinity)
        } else {
            None
        }
    }
}

impl std::fmt::Display for NonFinite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NonFinite::Nan => "NaN",
            NonFinite::PositiveInfinity => "Infinity",
            NonFinite::NegativeInfinity => "-Infinity",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while encoding a value.
///
/// Each variant names the offending value through its [`ValuePath`] within
/// the in-memory tree.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Two map entries compare equal under the canonical key order.
    #[error("duplicate map key {key:?} at {path}")]
    DuplicateMapKey {
        /// The repeated key.
        key: String,
        /// Path of the map holding the entries.
        path: ValuePath,
    },

    /// NaN and the infinities have no canonical encoding.
    #[error("{float} is not an allowed float value at {path}")]
    DisallowedFloat {
        /// Which disallowed value was encountered.
        float: NonFinite,
        /// Path of the float.
        path: ValuePath,
    },

    /// Integer magnitude exceeds what a 64-bit wire argument can carry.
    #[error("integer {value} out of range at {path}")]
    IntegerOutOfRange {
        /// The rejected integer.
        value: i128,
        /// Path of the integer.
        path: ValuePath,
    },

    /// The value tree nests containers deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels at {path}")]
    NestingTooDeep {
        /// The configured depth limit.
        max_depth: usize,
        /// Path of the container that crossed the limit.
        path: ValuePath,
    },

    /// The byte sink failed.
    #[error("sink error: {0}")]
    Io(#[from] io::Error),
}

/// The kind of a [`DecodeError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// The input ended before the current item was complete.
    #[error("unexpected end of input: {needed} more bytes needed")]
    UnexpectedEndOfInput {
        /// How many further bytes the current read required.
        needed: usize,
    },

    /// The head carries an additional-info value the codec rejects, such as
    /// an indefinite-length marker, a break byte, or a non-double float.
    #[error("invalid head: additional info {info} is not allowed for major type {major}")]
    InvalidHead {
        /// Major type of the offending head.
        major: u8,
        /// Additional-info bits of the offending head.
        info: u8,
    },

    /// An argument was encoded wider than its minimal form.
    #[error("non-canonical head: argument {argument} does not need {width} argument bytes")]
    NonCanonicalArgument {
        /// The decoded argument value.
        argument: u64,
        /// The number of argument bytes the input used.
        width: usize,
    },

    /// A text payload is not valid UTF-8.
    #[error("string payload is not valid utf-8")]
    InvalidUtf8,

    /// A tag other than 42 was encountered.
    #[error("unexpected tag {tag}: only tag 42 is allowed")]
    UnexpectedTag {
        /// The rejected tag number.
        tag: u64,
    },

    /// A float decoded to NaN or an infinity.
    #[error("{0} is not an allowed float value")]
    DisallowedFloat(NonFinite),

    /// A map key is not a text string on the wire.
    #[error("map key is not a string: major type {major}")]
    MapKeyNotString {
        /// Major type of the offending key item.
        major: u8,
    },

    /// The same key appears twice in one map.
    #[error("duplicate map key {key:?}")]
    MapKeyDuplicate {
        /// The repeated key.
        key: String,
    },

    /// Map keys are not strictly increasing in canonical order.
    #[error("map key {key:?} out of canonical order after {previous:?}")]
    MapKeyOutOfOrder {
        /// The key decoded immediately before.
        previous: String,
        /// The offending key.
        key: String,
    },

    /// Tag 42 content is not a byte string with a leading 0x00 byte.
    #[error("CID content must be a byte string with a leading 0x00 byte")]
    InvalidCidPrefix,

    /// Bytes remain after the single top-level item.
    #[error("{remaining} trailing bytes after the top-level item")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// Containers nest deeper than the configured limit.
    #[error("nesting deeper than {max_depth} levels")]
    NestingTooDeep {
        /// The configured depth limit.
        max_depth: usize,
    },

    /// The byte source failed before decoding could start.
    #[error("source error: {message}")]
    Io {
        /// Description of the I/O failure.
        message: String,
    },
}

/// Bytes captured around the offending offset, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ByteWindow {
    pub(crate) start: usize,
    pub(crate) bytes: Vec<u8>,
}

/// An error produced while decoding.
///
/// Carries the byte offset at which decoding failed and the logical path of
/// containers leading to the item being decoded. [`DecodeError::snippet`]
/// renders the bytes around the offence for human diagnosis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset} ({path})")]
pub struct DecodeError {
    /// What went wrong.
    pub kind: DecodeErrorKind,
    /// Offset of the offending byte in the input.
    pub offset: usize,
    /// Container stack at the point of failure.
    pub path: ValuePath,
    window: ByteWindow,
}

impl DecodeError {
    pub(crate) fn new(
        kind: DecodeErrorKind,
        offset: usize,
        path: ValuePath,
        window: ByteWindow,
    ) -> Self {
        Self {
            kind,
            offset,
            path,
            window,
        }
    }

    /// Renders a hex line of the bytes around the offence, with a caret
    /// under the offending byte:
    ///
    /// ```text
    /// At byte #4: a2 61 62 01 61 61 02
    ///                         ^^
    /// ```
    ///
    /// When the offence is the end of the input, the caret points past the
    /// last byte at an `<eof>` marker.
    pub fn snippet(&self) -> String {
        let mut line = format!("At byte #{}: ", self.window.start);
        let mut caret_col = None;
        for (i, byte) in self.window.bytes.iter().enumerate() {
            if self.window.start + i == self.offset {
                caret_col = Some(line.len());
            }
            let _ = write!(line, "{byte:02x} ");
        }
        let caret_col = match caret_col {
            Some(col) => col,
            None => {
                let col = line.len();
                line.push_str("<eof>");
                col
            }
        };
        let line = line.trim_end().to_string();
        let mut caret = " ".repeat(caret_col);
        caret.push_str("^^");
        format!("{line}\n{caret}")
    }
}
