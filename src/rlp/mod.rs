//! # Canonical RLP Codec
//!
//! Recursive Length Prefix encoding — the wire format every Minter
//! transaction, data payload, and signature travels in. An item is either a
//! byte string or a list of items, and that's the whole grammar. Everything
//! else in this crate is layered on top of these two constructors.
//!
//! ## Canonicality
//!
//! Encoding is injective: one logical value, one byte string. The decoder is
//! strict about it, because a node compares transactions by their bytes and
//! a "flexible" decoder is how you get signature malleability:
//!
//! - A single byte below `0x80` is its own encoding. Wrapping it in a
//!   string header is rejected.
//! - Length prefixes are minimal. A long-form header for a payload that fits
//!   the short form is rejected, as is a length with leading zero bytes.
//! - The top-level item must consume the entire input. Trailing bytes are
//!   rejected, not ignored.
//! - Integers are big-endian with no leading zeros; zero is the empty string.
//!
//! All parsing happens on untrusted input. Every length is validated before
//! any slice access, parsing fails closed, and nesting depth is capped so a
//! crafted input cannot recurse the stack away.

use num_bigint::BigUint;
use thiserror::Error;

/// Byte-string payloads up to this length use the single-byte short header.
const SHORT_PAYLOAD_MAX: usize = 55;

/// Nesting limit for decoded lists. Protocol structures are at most four
/// levels deep; sixteen leaves generous headroom.
const MAX_DEPTH: usize = 16;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while decoding or interpreting RLP.
///
/// One taxonomy for both structural decoding (headers, lengths) and item
/// interpretation (a schema asked for bytes and found a list, an integer
/// field carried a leading zero). Callers get a specific reason, never a
/// silently "fixed" value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RlpError {
    /// A length prefix claims more bytes than the input holds.
    #[error("unexpected end of input: need {needed} more byte(s)")]
    UnexpectedEnd {
        /// How many bytes past the end the header pointed.
        needed: usize,
    },

    /// A value was encoded in a longer form than the minimal one.
    #[error("non-canonical encoding: {0}")]
    NonCanonical(&'static str),

    /// Bytes remained after the top-level item was fully decoded.
    #[error("{0} trailing byte(s) after top-level item")]
    TrailingBytes(usize),

    /// Lists nested deeper than [`MAX_DEPTH`].
    #[error("list nesting exceeds maximum depth")]
    TooDeep,

    /// A schema expected a byte string and found a list.
    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    /// A schema expected a list and found a byte string.
    #[error("expected a list, found a byte string")]
    ExpectedList,

    /// A list did not carry the exact field count its tag demands.
    #[error("wrong field count: expected {expected}, got {got}")]
    WrongFieldCount {
        /// Fields the schema defines.
        expected: usize,
        /// Fields actually present.
        got: usize,
    },

    /// A fixed-width field (address, public key, proof) had the wrong length.
    #[error("wrong field length: expected {expected} byte(s), got {got}")]
    WrongFieldLength {
        /// Required byte length.
        expected: usize,
        /// Actual byte length.
        got: usize,
    },

    /// An integer field started with a zero byte.
    #[error("integer field has a leading zero byte")]
    LeadingZero,

    /// An integer field was wider than its declared maximum.
    #[error("integer field too wide: {got} byte(s), maximum {max}")]
    IntegerTooWide {
        /// Maximum width the field allows.
        max: usize,
        /// Width found on the wire.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// RlpItem
// ---------------------------------------------------------------------------

/// One node of the recursive wire grammar: raw bytes or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string. Length is implied by the encoding, never stored.
    Bytes(Vec<u8>),
    /// An ordered sequence of items, prefixed by total payload length.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Wraps a byte slice.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    /// Wraps a list of items.
    pub fn list(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }

    /// Encodes an arbitrary-precision unsigned integer: big-endian, no
    /// leading zeros, zero is the empty string.
    pub fn uint(value: &BigUint) -> Self {
        if value.bits() == 0 {
            return Self::Bytes(Vec::new());
        }
        Self::Bytes(value.to_bytes_be())
    }

    /// Encodes a machine word the same way as [`uint`](Self::uint).
    pub fn uint_u64(value: u64) -> Self {
        Self::uint(&BigUint::from(value))
    }

    /// Borrows the byte payload, or fails if this is a list.
    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    /// Borrows the item sequence, or fails if this is a byte string.
    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            Self::List(items) => Ok(items),
            Self::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    /// Borrows the item sequence and checks the exact field count.
    pub fn as_fields(&self, expected: usize) -> Result<&[RlpItem], RlpError> {
        let items = self.as_list()?;
        if items.len() != expected {
            return Err(RlpError::WrongFieldCount {
                expected,
                got: items.len(),
            });
        }
        Ok(items)
    }

    /// Interprets the payload as a canonical unsigned integer of at most
    /// `max_width` bytes. A leading zero byte or an over-wide value is an
    /// error, never a quietly reduced number.
    pub fn as_uint(&self, max_width: usize) -> Result<BigUint, RlpError> {
        let bytes = self.as_bytes()?;
        if bytes.len() > max_width {
            return Err(RlpError::IntegerTooWide {
                max: max_width,
                got: bytes.len(),
            });
        }
        if bytes.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        Ok(BigUint::from_bytes_be(bytes))
    }

    /// Interprets the payload as an integer that must fit a `u64`.
    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let value = self.as_uint(8)?;
        let mut out = 0u64;
        for byte in value.to_bytes_be() {
            out = (out << 8) | u64::from(byte);
        }
        // to_bytes_be() of zero yields [0], folded above to 0.
        Ok(out)
    }

    /// Interprets the payload as a fixed-width byte array.
    pub fn as_fixed<const N: usize>(&self) -> Result<[u8; N], RlpError> {
        let bytes = self.as_bytes()?;
        let arr: [u8; N] = bytes.try_into().map_err(|_| RlpError::WrongFieldLength {
            expected: N,
            got: bytes.len(),
        })?;
        Ok(arr)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encodes an item into its unique wire representation.
///
/// Total: every `RlpItem` has an encoding, and `decode(encode(x)) == x`.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::with_capacity(64);
    encode_into(item, &mut out);
    out
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < 0x80 {
                out.push(bytes[0]);
            } else {
                encode_header(bytes.len(), 0x80, out);
                out.extend_from_slice(bytes);
            }
        }
        RlpItem::List(items) => {
            let mut payload = Vec::with_capacity(64);
            for inner in items {
                encode_into(inner, &mut payload);
            }
            encode_header(payload.len(), 0xc0, out);
            out.extend_from_slice(&payload);
        }
    }
}

fn encode_header(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= SHORT_PAYLOAD_MAX {
        out.push(offset + len as u8);
    } else {
        let len_bytes = (len as u64).to_be_bytes();
        let skip = len_bytes.iter().take_while(|b| **b == 0).count();
        let len_of_len = 8 - skip;
        out.push(offset + SHORT_PAYLOAD_MAX as u8 + len_of_len as u8);
        out.extend_from_slice(&len_bytes[skip..]);
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decodes one top-level item, consuming the entire input.
pub fn decode(input: &[u8]) -> Result<RlpItem, RlpError> {
    let (item, consumed) = decode_at(input, 0)?;
    if consumed != input.len() {
        return Err(RlpError::TrailingBytes(input.len() - consumed));
    }
    Ok(item)
}

/// Decodes one item starting at the beginning of `input`, returning the item
/// and the number of bytes consumed.
fn decode_at(input: &[u8], depth: usize) -> Result<(RlpItem, usize), RlpError> {
    if depth > MAX_DEPTH {
        return Err(RlpError::TooDeep);
    }
    let &marker = input.first().ok_or(RlpError::UnexpectedEnd { needed: 1 })?;

    match marker {
        // Single byte, its own encoding.
        0x00..=0x7f => Ok((RlpItem::Bytes(vec![marker]), 1)),

        // Short string: length in the marker.
        0x80..=0xb7 => {
            let len = (marker - 0x80) as usize;
            let payload = take(input, 1, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(RlpError::NonCanonical(
                    "single byte below 0x80 must encode itself",
                ));
            }
            Ok((RlpItem::Bytes(payload.to_vec()), 1 + len))
        }

        // Long string: length-of-length in the marker.
        0xb8..=0xbf => {
            let (len, header) = decode_long_length(input, marker - 0xb7)?;
            let payload = take(input, header, len)?;
            Ok((RlpItem::Bytes(payload.to_vec()), header + len))
        }

        // Short list.
        0xc0..=0xf7 => {
            let len = (marker - 0xc0) as usize;
            let payload = take(input, 1, len)?;
            let items = decode_list_payload(payload, depth)?;
            Ok((RlpItem::List(items), 1 + len))
        }

        // Long list.
        0xf8..=0xff => {
            let (len, header) = decode_long_length(input, marker - 0xf7)?;
            let payload = take(input, header, len)?;
            let items = decode_list_payload(payload, depth)?;
            Ok((RlpItem::List(items), header + len))
        }
    }
}

/// Reads a long-form payload length (`len_of_len` bytes after the marker),
/// enforcing minimality. Returns the payload length and total header size.
fn decode_long_length(input: &[u8], len_of_len: u8) -> Result<(usize, usize), RlpError> {
    let len_of_len = len_of_len as usize;
    let len_bytes = take(input, 1, len_of_len)?;
    if len_bytes[0] == 0 {
        return Err(RlpError::NonCanonical("length has leading zero byte"));
    }
    if len_of_len > core::mem::size_of::<usize>() {
        // A length this large cannot describe real input anyway.
        return Err(RlpError::UnexpectedEnd { needed: usize::MAX });
    }
    let mut len = 0usize;
    for &b in len_bytes {
        len = (len << 8) | b as usize;
    }
    if len <= SHORT_PAYLOAD_MAX {
        return Err(RlpError::NonCanonical(
            "long form used for a short payload",
        ));
    }
    Ok((len, 1 + len_of_len))
}

/// Decodes list payload bytes into items, requiring the payload to be an
/// exact concatenation — a partial trailing item fails.
fn decode_list_payload(payload: &[u8], depth: usize) -> Result<Vec<RlpItem>, RlpError> {
    let mut items = Vec::new();
    let mut offset = 0;
    while offset < payload.len() {
        let (item, consumed) = decode_at(&payload[offset..], depth + 1)?;
        items.push(item);
        offset += consumed;
    }
    Ok(items)
}

/// Bounds-checked slice of `len` bytes starting at `start`.
fn take(input: &[u8], start: usize, len: usize) -> Result<&[u8], RlpError> {
    let end = start.checked_add(len).ok_or(RlpError::UnexpectedEnd {
        needed: usize::MAX,
    })?;
    input.get(start..end).ok_or_else(|| RlpError::UnexpectedEnd {
        needed: end - input.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(item: &RlpItem) -> String {
        hex::encode(encode(item))
    }

    #[test]
    fn encodes_reference_values() {
        assert_eq!(enc(&RlpItem::bytes(b"dog".to_vec())), "83646f67");
        assert_eq!(enc(&RlpItem::bytes(Vec::new())), "80");
        assert_eq!(enc(&RlpItem::list(Vec::new())), "c0");
        assert_eq!(enc(&RlpItem::bytes(vec![0x0f])), "0f");
        assert_eq!(enc(&RlpItem::uint_u64(1024)), "820400");
        assert_eq!(enc(&RlpItem::uint_u64(0)), "80");
        assert_eq!(
            enc(&RlpItem::list(vec![
                RlpItem::bytes(b"cat".to_vec()),
                RlpItem::bytes(b"dog".to_vec()),
            ])),
            "c88363617483646f67"
        );
    }

    #[test]
    fn long_string_uses_length_of_length() {
        let payload = vec![0xab; 56];
        let encoded = encode(&RlpItem::bytes(payload.clone()));
        assert_eq!(encoded[0], 0xb8);
        assert_eq!(encoded[1], 56);
        assert_eq!(&encoded[2..], payload.as_slice());
    }

    #[test]
    fn roundtrip_nested_structure() {
        let item = RlpItem::list(vec![
            RlpItem::uint_u64(1),
            RlpItem::bytes(b"MNT".to_vec()),
            RlpItem::list(vec![RlpItem::bytes(vec![0u8; 20]), RlpItem::uint_u64(7)]),
            RlpItem::bytes(Vec::new()),
        ]);
        let encoded = encode(&item);
        assert_eq!(decode(&encoded).unwrap(), item);
    }

    #[test]
    fn roundtrip_large_payload() {
        let item = RlpItem::list(vec![RlpItem::bytes(vec![0x42; 300])]);
        let encoded = encode(&item);
        // 300-byte string inside forces long forms for both string and list.
        assert_eq!(decode(&encoded).unwrap(), item);
    }

    #[test]
    fn rejects_wrapped_single_byte() {
        // 0x05 must encode as itself, not as 0x81 0x05.
        assert_eq!(
            decode(&[0x81, 0x05]),
            Err(RlpError::NonCanonical(
                "single byte below 0x80 must encode itself"
            ))
        );
        // 0x80 genuinely needs the wrapper.
        assert_eq!(
            decode(&[0x81, 0x80]).unwrap(),
            RlpItem::bytes(vec![0x80])
        );
    }

    #[test]
    fn rejects_long_form_for_short_payload() {
        let mut input = vec![0xb8, 0x05];
        input.extend_from_slice(&[1, 2, 3, 4, 5]);
        assert_eq!(
            decode(&input),
            Err(RlpError::NonCanonical("long form used for a short payload"))
        );
    }

    #[test]
    fn rejects_length_with_leading_zero() {
        let mut input = vec![0xb9, 0x00, 0x38];
        input.extend_from_slice(&[0u8; 56]);
        assert_eq!(
            decode(&input),
            Err(RlpError::NonCanonical("length has leading zero byte"))
        );
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(
            decode(&[0x83, 0x64, 0x6f]),
            Err(RlpError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            decode(&[0xc8, 0x83]),
            Err(RlpError::UnexpectedEnd { .. })
        ));
        assert!(matches!(decode(&[]), Err(RlpError::UnexpectedEnd { .. })));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(
            decode(&[0x0f, 0x00]),
            Err(RlpError::TrailingBytes(1))
        );
    }

    #[test]
    fn decodes_list_fields_ending_before_input_end() {
        // Every field but the last ends mid-slice; the bounds check must not
        // evaluate its shortfall on the success path.
        let item = RlpItem::list(vec![RlpItem::bytes(b"MNT".to_vec()), RlpItem::uint_u64(7)]);
        assert_eq!(decode(&encode(&item)).unwrap(), item);
    }

    #[test]
    fn reports_missing_byte_count() {
        // 3-byte string header with one payload byte: 2 bytes short.
        assert_eq!(
            decode(&[0x83, 0x64]),
            Err(RlpError::UnexpectedEnd { needed: 2 })
        );
    }

    #[test]
    fn rejects_partial_item_inside_list() {
        // List payload of 2 bytes containing a header that promises 3.
        assert!(matches!(
            decode(&[0xc2, 0x83, 0x01]),
            Err(RlpError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let mut item = RlpItem::list(Vec::new());
        for _ in 0..40 {
            item = RlpItem::list(vec![item]);
        }
        assert_eq!(decode(&encode(&item)), Err(RlpError::TooDeep));
    }

    #[test]
    fn uint_roundtrip_and_canonicality() {
        let value = BigUint::parse_bytes(b"1000000000000000000", 10).unwrap();
        let item = RlpItem::uint(&value);
        assert_eq!(enc(&item), "880de0b6b3a7640000");
        let decoded = decode(&encode(&item)).unwrap();
        assert_eq!(decoded.as_uint(32).unwrap(), value);
    }

    #[test]
    fn uint_rejects_leading_zero() {
        let item = RlpItem::bytes(vec![0x00, 0x01]);
        assert_eq!(item.as_uint(32), Err(RlpError::LeadingZero));
    }

    #[test]
    fn uint_rejects_over_wide_value() {
        let item = RlpItem::bytes(vec![0xff; 33]);
        assert_eq!(
            item.as_uint(32),
            Err(RlpError::IntegerTooWide { max: 32, got: 33 })
        );
    }

    #[test]
    fn zero_is_the_empty_string() {
        assert_eq!(RlpItem::uint_u64(0), RlpItem::Bytes(Vec::new()));
        assert_eq!(RlpItem::Bytes(Vec::new()).as_u64().unwrap(), 0);
    }

    #[test]
    fn as_u64_folds_big_endian() {
        assert_eq!(RlpItem::uint_u64(0x0102).as_u64().unwrap(), 0x0102);
        assert_eq!(RlpItem::uint_u64(u64::MAX).as_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn shape_accessors_enforce_kind() {
        let bytes = RlpItem::bytes(vec![1]);
        let list = RlpItem::list(vec![]);
        assert_eq!(list.as_bytes(), Err(RlpError::ExpectedBytes));
        assert_eq!(bytes.as_list(), Err(RlpError::ExpectedList));
    }

    #[test]
    fn field_count_is_exact() {
        let list = RlpItem::list(vec![RlpItem::uint_u64(1), RlpItem::uint_u64(2)]);
        assert!(list.as_fields(2).is_ok());
        assert_eq!(
            list.as_fields(3),
            Err(RlpError::WrongFieldCount {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn fixed_width_accessor() {
        let item = RlpItem::bytes(vec![0u8; 20]);
        assert_eq!(item.as_fixed::<20>().unwrap(), [0u8; 20]);
        assert_eq!(
            item.as_fixed::<32>(),
            Err(RlpError::WrongFieldLength {
                expected: 32,
                got: 20
            })
        );
    }
}
