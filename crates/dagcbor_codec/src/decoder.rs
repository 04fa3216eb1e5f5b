//! Strict DAG-CBOR decoder.

use std::cmp::Ordering;
use std::io::Read;

use crate::cid::Cid;
use crate::error::{ByteWindow, DecodeError, DecodeErrorKind, DecodeResult, NonFinite};
use crate::head::{
    canonical_floor, AI_EIGHT_BYTES, AI_FOUR_BYTES, AI_ONE_BYTE, AI_TWO_BYTES, CID_TAG,
    MAJOR_BYTES, MAJOR_LIST, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT,
    MAJOR_UNSIGNED, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE,
};
use crate::path::ValuePath;
use crate::value::{canonical_key_cmp, Value};

/// Options controlling a decode invocation.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Permit trailing bytes after the first top-level item.
    pub allow_concat: bool,
    /// Maximum container nesting depth before decoding fails.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_concat: false,
            max_depth: 256,
        }
    }
}

impl DecodeOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether trailing bytes after the first item are permitted.
    #[must_use]
    pub const fn allow_concat(mut self, allow_concat: bool) -> Self {
        self.allow_concat = allow_concat;
        self
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Decodes a single value from the given bytes.
///
/// The whole input must be consumed; anything after the first item fails
/// with [`DecodeErrorKind::TrailingBytes`].
///
/// # Errors
///
/// Returns an error for any input that is not the canonical encoding of
/// exactly one value. The error carries the byte offset and container path
/// of the offence.
pub fn decode(input: &[u8]) -> DecodeResult<Value> {
    Decoder::new(input).decode()
}

/// Decodes the first value from the given bytes, permitting trailing data.
///
/// Returns the value together with the number of bytes it occupied, so a
/// caller holding back-to-back items can continue from that position.
///
/// # Errors
///
/// As [`decode`], except that trailing bytes are not an error.
pub fn decode_first(input: &[u8]) -> DecodeResult<(Value, usize)> {
    let mut decoder = Decoder::with_options(input, DecodeOptions::new().allow_concat(true));
    let value = decoder.decode()?;
    Ok((value, decoder.position()))
}

/// Decodes a single value from a sequential reader.
///
/// This is a thin adapter: the reader is drained into a buffer and the
/// byte-oriented decoder runs over it. The reader must yield exactly one
/// encoded item.
///
/// # Errors
///
/// As [`decode`], plus [`DecodeErrorKind::Io`] if the reader fails.
pub fn decode_reader<R: Read>(reader: &mut R) -> DecodeResult<Value> {
    let mut buf = Vec::new();
    if let Err(e) = reader.read_to_end(&mut buf) {
        return Err(DecodeError::new(
            DecodeErrorKind::Io {
                message: e.to_string(),
            },
            buf.len(),
            ValuePath::new(),
            ByteWindow::default(),
        ));
    }
    decode(&buf)
}

/// The head of one data item, with simple values already resolved.
enum ItemHead {
    Unsigned(u64),
    Negative(u64),
    Bytes(u64),
    Text(u64),
    List(u64),
    Map(u64),
    Tag(u64),
    False,
    True,
    Null,
    Float(f64),
}

impl ItemHead {
    fn major(&self) -> u8 {
        match self {
            ItemHead::Unsigned(_) => MAJOR_UNSIGNED,
            ItemHead::Negative(_) => MAJOR_NEGATIVE,
            ItemHead::Bytes(_) => MAJOR_BYTES,
            ItemHead::Text(_) => MAJOR_TEXT,
            ItemHead::List(_) => MAJOR_LIST,
            ItemHead::Map(_) => MAJOR_MAP,
            ItemHead::Tag(_) => MAJOR_TAG,
            ItemHead::False | ItemHead::True | ItemHead::Null | ItemHead::Float(_) => MAJOR_SIMPLE,
        }
    }
}

/// A strict DAG-CBOR decoder over a byte slice.
///
/// The decoder validates every canonicality rule as it reads: minimal head
/// encodings, UTF-8 text, unique and canonically ordered map keys, the tag
/// whitelist, and the float restrictions. No byte is read twice and no
/// backtracking occurs.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    path: ValuePath,
    options: DecodeOptions,
    observer: Option<Box<dyn FnMut(&Value, usize) + 'a>>,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder with default options.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    /// Creates a decoder with the given options.
    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            path: ValuePath::new(),
            options,
            observer: None,
        }
    }

    /// Installs an observer invoked after each complete item.
    ///
    /// The observer receives the item and the number of bytes it consumed,
    /// not counting nested sub-items (a container reports its head only; a
    /// link reports the tag head plus its payload item). It is purely
    /// informational and never alters parsing.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(&Value, usize) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Decodes one top-level value.
    ///
    /// Unless the options allow concatenation, the input must end exactly
    /// after the item.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn decode(&mut self) -> DecodeResult<Value> {
        let value = self.decode_item(0)?;
        if !self.options.allow_concat && self.pos < self.data.len() {
            return Err(self.error_at(
                self.pos,
                DecodeErrorKind::TrailingBytes {
                    remaining: self.data.len() - self.pos,
                },
            ));
        }
        Ok(value)
    }

    /// The current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn decode_item(&mut self, depth: usize) -> DecodeResult<Value> {
        let item_start = self.pos;
        let head = self.read_head()?;
        let head_len = self.pos - item_start;
        let value = match head {
            ItemHead::Unsigned(n) => Value::Integer(i128::from(n)),
            ItemHead::Negative(n) => Value::Integer(-1 - i128::from(n)),
            ItemHead::False => Value::Bool(false),
            ItemHead::True => Value::Bool(true),
            ItemHead::Null => Value::Null,
            ItemHead::Float(x) => {
                if let Some(float) = NonFinite::classify(x) {
                    return Err(self.error_at(item_start, DecodeErrorKind::DisallowedFloat(float)));
                }
                Value::Float(x)
            }
            ItemHead::Bytes(len) => Value::Bytes(self.read_payload(len)?.to_vec()),
            ItemHead::Text(len) => Value::Text(self.read_text(len)?),
            ItemHead::List(len) => return self.decode_list(len, depth, item_start, head_len),
            ItemHead::Map(len) => return self.decode_map(len, depth, item_start, head_len),
            ItemHead::Tag(tag) => return self.decode_link(tag, depth, item_start),
        };
        self.notify(&value, self.pos - item_start);
        Ok(value)
    }

    fn read_head(&mut self) -> DecodeResult<ItemHead> {
        let head_start = self.pos;
        let leading = self.read_byte()?;
        let major = leading >> 5;
        let info = leading & 0x1f;

        if major == MAJOR_SIMPLE {
            // Only the three inline simple values and the 8-byte float are
            // allowed; everything else (smaller floats, the simple-value
            // escape, break) is rejected outright.
            return match info {
                SIMPLE_FALSE => Ok(ItemHead::False),
                SIMPLE_TRUE => Ok(ItemHead::True),
                SIMPLE_NULL => Ok(ItemHead::Null),
                AI_EIGHT_BYTES => {
                    let raw = self.read_exact(8)?;
                    let mut be = [0u8; 8];
                    be.copy_from_slice(raw);
                    Ok(ItemHead::Float(f64::from_be_bytes(be)))
                }
                _ => Err(self.error_at(head_start, DecodeErrorKind::InvalidHead { major, info })),
            };
        }

        let argument = match info {
            0..=23 => u64::from(info),
            AI_ONE_BYTE | AI_TWO_BYTES | AI_FOUR_BYTES | AI_EIGHT_BYTES => {
                let width = 1usize << (info - AI_ONE_BYTE);
                let raw = self.read_exact(width)?;
                let mut argument = 0u64;
                for &byte in raw {
                    argument = argument << 8 | u64::from(byte);
                }
                if argument < canonical_floor(width) {
                    return Err(self.error_at(
                        head_start,
                        DecodeErrorKind::NonCanonicalArgument { argument, width },
                    ));
                }
                argument
            }
            _ => {
                // 28-30 are reserved, 31 signals indefinite length or break.
                return Err(
                    self.error_at(head_start, DecodeErrorKind::InvalidHead { major, info })
                );
            }
        };

        Ok(match major {
            MAJOR_UNSIGNED => ItemHead::Unsigned(argument),
            MAJOR_NEGATIVE => ItemHead::Negative(argument),
            MAJOR_BYTES => ItemHead::Bytes(argument),
            MAJOR_TEXT => ItemHead::Text(argument),
            MAJOR_LIST => ItemHead::List(argument),
            MAJOR_MAP => ItemHead::Map(argument),
            _ => ItemHead::Tag(argument),
        })
    }

    fn decode_list(
        &mut self,
        length: u64,
        depth: usize,
        item_start: usize,
        head_len: usize,
    ) -> DecodeResult<Value> {
        self.check_depth(depth, item_start)?;
        let mut items = Vec::with_capacity(self.capped_capacity(length));
        for idx in 0..length {
            self.path.push_index(idx as usize);
            let item = self.decode_item(depth + 1)?;
            self.path.pop();
            items.push(item);
        }
        let value = Value::List(items);
        self.notify(&value, head_len);
        Ok(value)
    }

    fn decode_map(
        &mut self,
        length: u64,
        depth: usize,
        item_start: usize,
        head_len: usize,
    ) -> DecodeResult<Value> {
        self.check_depth(depth, item_start)?;
        let mut pairs: Vec<(String, Value)> = Vec::with_capacity(self.capped_capacity(length));
        for _ in 0..length {
            let key_start = self.pos;
            let key = self.decode_key(key_start)?;
            if let Some((previous, _)) = pairs.last() {
                match canonical_key_cmp(previous, &key) {
                    Ordering::Less => {}
                    Ordering::Equal => {
                        return Err(
                            self.error_at(key_start, DecodeErrorKind::MapKeyDuplicate { key })
                        );
                    }
                    Ordering::Greater => {
                        return Err(self.error_at(
                            key_start,
                            DecodeErrorKind::MapKeyOutOfOrder {
                                previous: previous.clone(),
                                key,
                            },
                        ));
                    }
                }
            }
            self.path.push_key(&key);
            let value = self.decode_item(depth + 1)?;
            self.path.pop();
            pairs.push((key, value));
        }
        let value = Value::Map(pairs);
        self.notify(&value, head_len);
        Ok(value)
    }

    fn decode_key(&mut self, key_start: usize) -> DecodeResult<String> {
        let head = self.read_head()?;
        let length = match head {
            ItemHead::Text(length) => length,
            other => {
                return Err(self.error_at(
                    key_start,
                    DecodeErrorKind::MapKeyNotString {
                        major: other.major(),
                    },
                ));
            }
        };
        let key = self.read_text(length)?;
        if self.observer.is_some() {
            let preview = Value::Text(key.clone());
            self.notify(&preview, self.pos - key_start);
        }
        Ok(key)
    }

    fn decode_link(&mut self, tag: u64, depth: usize, item_start: usize) -> DecodeResult<Value> {
        if tag != CID_TAG {
            return Err(self.error_at(item_start, DecodeErrorKind::UnexpectedTag { tag }));
        }
        self.check_depth(depth, item_start)?;
        let content_start = self.pos;
        // The payload item must not fire the observer; the link reports as
        // one item covering the tag head and the payload together.
        let suppressed = self.observer.take();
        let content = self.decode_item(depth + 1);
        self.observer = suppressed;
        let bytes = match content? {
            Value::Bytes(bytes) => bytes,
            _ => return Err(self.error_at(content_start, DecodeErrorKind::InvalidCidPrefix)),
        };
        match bytes.split_first() {
            Some((0x00, raw)) => {
                let value = Value::Link(Cid::from_raw(raw.to_vec()));
                self.notify(&value, self.pos - item_start);
                Ok(value)
            }
            _ => Err(self.error_at(content_start, DecodeErrorKind::InvalidCidPrefix)),
        }
    }

    fn read_text(&mut self, length: u64) -> DecodeResult<String> {
        let payload_start = self.pos;
        let bytes = self.read_payload(length)?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => Err(self.error_at(
                payload_start + e.valid_up_to(),
                DecodeErrorKind::InvalidUtf8,
            )),
        }
    }

    fn read_byte(&mut self) -> DecodeResult<u8> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(byte)
            }
            None => Err(self.error_at(
                self.pos,
                DecodeErrorKind::UnexpectedEndOfInput { needed: 1 },
            )),
        }
    }

    fn read_exact(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        let available = self.data.len() - self.pos;
        if available < n {
            return Err(self.error_at(
                self.data.len(),
                DecodeErrorKind::UnexpectedEndOfInput {
                    needed: n - available,
                },
            ));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_payload(&mut self, length: u64) -> DecodeResult<&'a [u8]> {
        let available = (self.data.len() - self.pos) as u64;
        if available < length {
            return Err(self.error_at(
                self.data.len(),
                DecodeErrorKind::UnexpectedEndOfInput {
                    needed: usize::try_from(length - available).unwrap_or(usize::MAX),
                },
            ));
        }
        // In range: checked against the slice length above.
        self.read_exact(length as usize)
    }

    /// Capacity to pre-allocate for a declared element count.
    ///
    /// Capped by the bytes actually remaining, so a forged length cannot
    /// drive a huge allocation; the body read then fails on end of input.
    fn capped_capacity(&self, declared: u64) -> usize {
        let remaining = (self.data.len() - self.pos) as u64;
        declared.min(remaining) as usize
    }

    fn check_depth(&self, depth: usize, offset: usize) -> DecodeResult<()> {
        if depth >= self.options.max_depth {
            return Err(self.error_at(
                offset,
                DecodeErrorKind::NestingTooDeep {
                    max_depth: self.options.max_depth,
                },
            ));
        }
        Ok(())
    }

    fn notify(&mut self, value: &Value, consumed: usize) {
        if let Some(observer) = self.observer.as_mut() {
            observer(value, consumed);
        }
    }

    fn error_at(&self, offset: usize, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(kind, offset, self.path.clone(), self.window(offset))
    }

    fn window(&self, offset: usize) -> ByteWindow {
        const CONTEXT: usize = 8;
        let end = self.data.len().min(offset.saturating_add(CONTEXT));
        let start = offset.saturating_sub(CONTEXT).min(end);
        ByteWindow {
            start,
            bytes: self.data[start..end].to_vec(),
        }
    }
}
