//! Value level encoding of the Dynamixel control table.
//!
//! [`codec`] packs register values into little-endian bytes, [`quantities`] and [`enums`] convert
//! register values into physical units for a given model, and [`registers`] composes the two.

pub mod codec;
pub mod enums;
pub mod quantities;
pub mod registers;

pub use codec::RawValue;

use crate::Error;

/// Decodes a register read into `count` values of equal width.
///
/// Fails with [`crate::InvalidInputError::EmptyBuffer`] on an empty buffer.
pub fn decode_register(bytes: &[u8], count: usize) -> Result<RawValue, Error> {
    codec::decode_all(bytes, count)
}

/// Encodes one or more values into `width` bytes each.
///
/// Fails with [`crate::InvalidInputError::InvalidWidth`] when `width` is 0. Values wider than
/// `width` are truncated.
///
/// ```rust
/// use dynamixel_conversion::{encode_register, RawValue};
///
/// assert_eq!(encode_register(&RawValue::Single(300), 1).unwrap(), vec![44]);
/// assert!(encode_register(&RawValue::Single(5), 0).is_err());
/// ```
pub fn encode_register(value: &RawValue, width: usize) -> Result<Vec<u8>, Error> {
    codec::encode_all(value, width)
}
