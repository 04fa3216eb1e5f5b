//! Canonical DAG-CBOR encoder.

use std::cmp::Ordering;
use std::io::Write;

use crate::cid::Cid;
use crate::error::{EncodeError, EncodeResult, NonFinite};
use crate::head::{
    encode_head, AI_EIGHT_BYTES, CID_TAG, MAJOR_BYTES, MAJOR_LIST, MAJOR_MAP, MAJOR_NEGATIVE,
    MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED, SIMPLE_FALSE, SIMPLE_NULL, SIMPLE_TRUE,
};
use crate::path::ValuePath;
use crate::value::{canonical_key_cmp, Value};

/// Options controlling an encode invocation.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Maximum container nesting depth before encoding fails.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl EncodeOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum container nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Encodes a value to its canonical byte sequence.
///
/// The returned buffer is the unique encoding of the value; on failure no
/// bytes are produced.
///
/// # Errors
///
/// Returns an error for duplicate map keys, non-finite floats, integers
/// outside the 64-bit wire range, or nesting beyond the depth limit.
pub fn encode(value: &Value) -> EncodeResult<Vec<u8>> {
    let mut buf = Vec::new();
    Encoder::new(&mut buf).encode(value)?;
    Ok(buf)
}

/// Encodes a value into the given sink, returning the bytes written.
///
/// On failure the sink keeps whatever was written before the error.
///
/// # Errors
///
/// As [`encode`], plus any error reported by the sink.
pub fn encode_into<W: Write>(value: &Value, sink: &mut W) -> EncodeResult<usize> {
    Encoder::new(sink).encode(value)
}

/// Returns the keys sorted in canonical order.
#[must_use]
pub fn canonical_order(mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by(|a, b| canonical_key_cmp(a, b));
    keys
}

/// Checks that map entries satisfy the key rules.
///
/// Key type is enforced statically, so the only remaining rule is
/// uniqueness under the canonical comparator.
///
/// # Errors
///
/// Returns [`EncodeError::DuplicateMapKey`] naming the first repeated key.
pub fn check_key_compliance(pairs: &[(String, Value)]) -> EncodeResult<()> {
    let mut keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    keys.sort_by(|a, b| canonical_key_cmp(a, b));
    for pair in keys.windows(2) {
        if pair[0] == pair[1] {
            return Err(EncodeError::DuplicateMapKey {
                key: pair[0].to_string(),
                path: ValuePath::new(),
            });
        }
    }
    Ok(())
}

/// A canonical DAG-CBOR encoder writing into a byte sink.
///
/// The encoder can be fed several values in a row; each call appends one
/// complete item to the sink. After an error the sink may hold a partial
/// item and the encoder should be discarded.
pub struct Encoder<W: Write> {
    sink: W,
    options: EncodeOptions,
    path: ValuePath,
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder with default options.
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, EncodeOptions::default())
    }

    /// Creates an encoder with the given options.
    pub fn with_options(sink: W, options: EncodeOptions) -> Self {
        Self {
            sink,
            options,
            path: ValuePath::new(),
        }
    }

    /// Encodes one value, returning the number of bytes written for it.
    ///
    /// # Errors
    ///
    /// See [`encode`].
    pub fn encode(&mut self, value: &Value) -> EncodeResult<usize> {
        self.encode_value(value, 0)
    }

    /// Consumes the encoder and returns the sink.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn encode_value(&mut self, value: &Value, depth: usize) -> EncodeResult<usize> {
        match value {
            Value::Null => self.write_head(MAJOR_SIMPLE, u64::from(SIMPLE_NULL)),
            Value::Bool(b) => {
                let simple = if *b { SIMPLE_TRUE } else { SIMPLE_FALSE };
                self.write_head(MAJOR_SIMPLE, u64::from(simple))
            }
            Value::Integer(n) => self.encode_integer(*n),
            Value::Float(x) => self.encode_float(*x),
            Value::Bytes(bytes) => self.encode_bytes(bytes),
            Value::Text(text) => self.encode_text(text),
            Value::List(items) => self.encode_list(items, depth),
            Value::Map(pairs) => self.encode_map(pairs, depth),
            Value::Link(cid) => self.encode_link(cid),
        }
    }

    #[allow(clippy::cast_sign_loss)]
    fn encode_integer(&mut self, n: i128) -> EncodeResult<usize> {
        if n < Value::INTEGER_MIN || n > Value::INTEGER_MAX {
            return Err(EncodeError::IntegerOutOfRange {
                value: n,
                path: self.path.clone(),
            });
        }
        if n >= 0 {
            self.write_head(MAJOR_UNSIGNED, n as u64)
        } else {
            // The wire carries -1-n, so -1 maps to argument 0.
            self.write_head(MAJOR_NEGATIVE, (-1 - n) as u64)
        }
    }

    fn encode_float(&mut self, x: f64) -> EncodeResult<usize> {
        if let Some(float) = NonFinite::classify(x) {
            return Err(EncodeError::DisallowedFloat {
                float,
                path: self.path.clone(),
            });
        }
        self.sink.write_all(&[MAJOR_SIMPLE << 5 | AI_EIGHT_BYTES])?;
        self.sink.write_all(&x.to_bits().to_be_bytes())?;
        Ok(9)
    }

    fn encode_bytes(&mut self, bytes: &[u8]) -> EncodeResult<usize> {
        let n = self.write_head(MAJOR_BYTES, bytes.len() as u64)?;
        Ok(n + self.write_payload(bytes)?)
    }

    fn encode_text(&mut self, text: &str) -> EncodeResult<usize> {
        // `str` guarantees valid UTF-8, so the head can go out first.
        let n = self.write_head(MAJOR_TEXT, text.len() as u64)?;
        Ok(n + self.write_payload(text.as_bytes())?)
    }

    fn encode_list(&mut self, items: &[Value], depth: usize) -> EncodeResult<usize> {
        self.check_depth(depth)?;
        let mut n = self.write_head(MAJOR_LIST, items.len() as u64)?;
        for (idx, item) in items.iter().enumerate() {
            self.path.push_index(idx);
            n += self.encode_value(item, depth + 1)?;
            self.path.pop();
        }
        Ok(n)
    }

    fn encode_map(&mut self, pairs: &[(String, Value)], depth: usize) -> EncodeResult<usize> {
        self.check_depth(depth)?;
        let in_order = pairs
            .windows(2)
            .all(|w| canonical_key_cmp(&w[0].0, &w[1].0) == Ordering::Less);
        if in_order {
            let mut n = self.write_head(MAJOR_MAP, pairs.len() as u64)?;
            for (key, value) in pairs {
                n += self.encode_entry(key, value, depth)?;
            }
            return Ok(n);
        }

        let mut order: Vec<usize> = (0..pairs.len()).collect();
        order.sort_by(|&a, &b| canonical_key_cmp(&pairs[a].0, &pairs[b].0));
        // Validate before the head goes out, so a duplicate never leaves a
        // half-written map behind.
        for pair in order.windows(2) {
            if pairs[pair[0]].0 == pairs[pair[1]].0 {
                return Err(EncodeError::DuplicateMapKey {
                    key: pairs[pair[0]].0.clone(),
                    path: self.path.clone(),
                });
            }
        }
        let mut n = self.write_head(MAJOR_MAP, pairs.len() as u64)?;
        for &idx in &order {
            let (key, value) = &pairs[idx];
            n += self.encode_entry(key, value, depth)?;
        }
        Ok(n)
    }

    fn encode_entry(&mut self, key: &str, value: &Value, depth: usize) -> EncodeResult<usize> {
        let mut n = self.encode_text(key)?;
        self.path.push_key(key);
        n += self.encode_value(value, depth + 1)?;
        self.path.pop();
        Ok(n)
    }

    fn encode_link(&mut self, cid: &Cid) -> EncodeResult<usize> {
        let raw = cid.as_raw();
        let mut n = self.write_head(MAJOR_TAG, CID_TAG)?;
        n += self.write_head(MAJOR_BYTES, (raw.len() + 1) as u64)?;
        n += self.write_payload(&[0x00])?;
        n += self.write_payload(raw)?;
        Ok(n)
    }

    fn write_head(&mut self, major: u8, argument: u64) -> EncodeResult<usize> {
        let (head, len) = encode_head(major, argument);
        self.sink.write_all(&head[..len])?;
        Ok(len)
    }

    fn write_payload(&mut self, bytes: &[u8]) -> EncodeResult<usize> {
        self.sink.write_all(bytes)?;
        Ok(bytes.len())
    }

    fn check_depth(&self, depth: usize) -> EncodeResult<()> {
        if depth >= self.options.max_depth {
            return Err(EncodeError::NestingTooDeep {
                max_depth: self.options.max_depth,
                path: self.path.clone(),
            });
        }
        Ok(())
    }
}
