//! Packing of register values into little-endian byte sequences.

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::{Error, InvalidInputError};

/// Widest register that fits into the `u128` carried by the codec.
pub const MAX_REGISTER_WIDTH: usize = 16;

/// One or more raw values decoded from a single register read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawValue {
    /// The register holds a single value.
    Single(u128),
    /// The register holds several values of equal width, in address order.
    Multiple(Vec<u128>),
}

impl RawValue {
    /// Number of values held.
    pub fn count(&self) -> usize {
        match self {
            RawValue::Single(_) => 1,
            RawValue::Multiple(values) => values.len(),
        }
    }
}

impl From<u128> for RawValue {
    fn from(value: u128) -> Self {
        RawValue::Single(value)
    }
}

impl From<Vec<u128>> for RawValue {
    fn from(values: Vec<u128>) -> Self {
        RawValue::Multiple(values)
    }
}

/// Decodes a little-endian byte sequence into an unsigned integer.
///
/// Byte `i` contributes `bytes[i] << (8 * i)`.
///
/// ```rust
/// use dynamixel_conversion::protocol::codec;
///
/// assert_eq!(codec::decode(&[0x00, 0x08]).unwrap(), 2048);
/// assert!(codec::decode(&[]).is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<u128, Error> {
    if bytes.is_empty() {
        return Err(InvalidInputError::EmptyBuffer.into());
    }
    if bytes.len() > MAX_REGISTER_WIDTH {
        return Err(InvalidInputError::BufferTooLong(bytes.len()).into());
    }
    let value = LittleEndian::read_uint128(bytes, bytes.len());
    trace!("decoded {} -> {}", hex::encode(bytes), value);
    Ok(value)
}

/// Splits `bytes` into `count` values of equal width and decodes each.
///
/// A `count` of 0 or 1 decodes the whole buffer into a [`RawValue::Single`].
pub fn decode_all(bytes: &[u8], count: usize) -> Result<RawValue, Error> {
    if count <= 1 {
        return decode(bytes).map(RawValue::Single);
    }
    if bytes.is_empty() {
        return Err(InvalidInputError::EmptyBuffer.into());
    }
    if bytes.len() % count != 0 {
        return Err(InvalidInputError::UnevenSplit {
            len: bytes.len(),
            count,
        }
        .into());
    }
    bytes
        .chunks(bytes.len() / count)
        .map(decode)
        .collect::<Result<Vec<_>, _>>()
        .map(RawValue::Multiple)
}

/// Encodes `value` into exactly `length` little-endian bytes.
///
/// Bits that do not fit in `length` bytes are dropped without error: `encode(300, 1)` yields
/// `[44]`. Existing callers rely on this.
///
/// ```rust
/// use dynamixel_conversion::protocol::codec;
///
/// assert_eq!(codec::encode(2048, 2).unwrap(), vec![0x00, 0x08]);
/// assert_eq!(codec::encode(300, 1).unwrap(), vec![44]);
/// ```
pub fn encode(value: u128, length: usize) -> Result<Vec<u8>, Error> {
    if length == 0 {
        return Err(InvalidInputError::InvalidWidth(length).into());
    }
    let mut buf = vec![0; length];
    let width = length.min(MAX_REGISTER_WIDTH);
    let truncated = if width == MAX_REGISTER_WIDTH {
        value
    } else {
        value & ((1u128 << (8 * width)) - 1)
    };
    LittleEndian::write_uint128(&mut buf[..width], truncated, width);
    trace!("encoded {} -> {}", value, hex::encode(&buf));
    Ok(buf)
}

/// Encodes every value held by `value` into `length` bytes each and concatenates them.
pub fn encode_all(value: &RawValue, length: usize) -> Result<Vec<u8>, Error> {
    match value {
        RawValue::Single(v) => encode(*v, length),
        RawValue::Multiple(values) => {
            let mut buf = Vec::with_capacity(values.len() * length);
            for v in values {
                buf.extend(encode(*v, length)?);
            }
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode(&[0x2a]).unwrap(), 42);
        assert_eq!(decode(&[0x00, 0x08]).unwrap(), 2048);
        assert_eq!(decode(&[0xff, 0xff, 0xff, 0xff]).unwrap(), u32::MAX as u128);
        assert_eq!(decode(&[1, 2, 3]).unwrap(), 0x030201);
        assert_eq!(decode(&[0xff; 16]).unwrap(), u128::MAX);
    }

    #[test]
    fn test_decode_invalid() {
        assert_eq!(
            decode(&[]),
            Err(Error::InvalidInput(InvalidInputError::EmptyBuffer))
        );
        assert_eq!(
            decode(&[0; 17]),
            Err(Error::InvalidInput(InvalidInputError::BufferTooLong(17)))
        );
        assert_eq!(
            decode_all(&[], 1),
            Err(Error::InvalidInput(InvalidInputError::EmptyBuffer))
        );
        assert_eq!(
            decode_all(&[], 3),
            Err(Error::InvalidInput(InvalidInputError::EmptyBuffer))
        );
    }

    #[test]
    fn test_decode_all() {
        assert_eq!(
            decode_all(&[0x00, 0x08], 1).unwrap(),
            RawValue::Single(2048)
        );
        assert_eq!(
            decode_all(&[0x00, 0x08, 0xff, 0x03], 2).unwrap(),
            RawValue::Multiple(vec![2048, 1023])
        );
        assert_eq!(
            decode_all(&[32, 0, 0], 3).unwrap(),
            RawValue::Multiple(vec![32, 0, 0])
        );
        assert_eq!(
            decode_all(&[1, 2, 3], 2),
            Err(Error::InvalidInput(InvalidInputError::UnevenSplit {
                len: 3,
                count: 2
            }))
        );
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode(42, 1).unwrap(), vec![42]);
        assert_eq!(encode(2048, 2).unwrap(), vec![0x00, 0x08]);
        assert_eq!(encode(2048, 4).unwrap(), vec![0x00, 0x08, 0, 0]);
        assert_eq!(encode(u128::MAX, 16).unwrap(), vec![0xff; 16]);
        let mut wide = vec![0xff; 16];
        wide.extend([0; 4]);
        assert_eq!(encode(u128::MAX, 20).unwrap(), wide);
    }

    #[test]
    fn test_encode_truncates() {
        assert_eq!(encode(300, 1).unwrap(), vec![44]);
        assert_eq!(encode(0x1_0000, 2).unwrap(), vec![0, 0]);
        assert_eq!(encode(0x12_3456, 2).unwrap(), vec![0x56, 0x34]);
    }

    #[test]
    fn test_encode_invalid_width() {
        assert_eq!(
            encode(5, 0),
            Err(Error::InvalidInput(InvalidInputError::InvalidWidth(0)))
        );
        assert!(encode_all(&RawValue::Multiple(vec![1, 2]), 0).is_err());
    }

    #[test]
    fn test_encode_all() {
        assert_eq!(encode_all(&RawValue::Single(1023), 2).unwrap(), vec![0xff, 0x03]);
        assert_eq!(
            encode_all(&RawValue::Multiple(vec![2048, 1023]), 2).unwrap(),
            vec![0x00, 0x08, 0xff, 0x03]
        );
        assert_eq!(
            encode_all(&RawValue::from(vec![250, 2, 8]), 1).unwrap(),
            vec![250, 2, 8]
        );
    }

    #[test]
    fn test_encode_then_decode_all() {
        let value = RawValue::Multiple(vec![1, 65535, 512]);
        let bytes = encode_all(&value, 2).unwrap();
        assert_eq!(decode_all(&bytes, value.count()).unwrap(), value);
    }
}
