use thiserror::Error;

/// Errors that can occur when converting between register values and physical units.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input cannot be encoded or decoded at all (empty buffer, zero width, ...).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
    /// A value or code has no entry in the corresponding conversion table.
    #[error("lookup failure: {0}")]
    Lookup(#[from] LookupError),
}

/// Errors raised by the byte codec before any quantity conversion happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    /// Returned when decoding an empty byte buffer.
    #[error("cannot decode an empty buffer")]
    EmptyBuffer,
    /// Registers wider than 16 bytes do not fit in a `u128`.
    #[error("buffer of {0} bytes is too long to decode")]
    BufferTooLong(usize),
    /// Returned when encoding into a register of zero bytes.
    #[error("cannot encode a value with width {0}")]
    InvalidWidth(usize),
    /// The buffer cannot be split into `count` values of equal width.
    #[error("cannot split {len} bytes into {count} equal values")]
    UnevenSplit {
        /// Length of the buffer in bytes.
        len: usize,
        /// Number of values requested.
        count: usize,
    },
    /// The decoded register holds more values, or larger values, than the quantity reads.
    #[error("decoded register does not fit the quantity")]
    Overflow,
}

/// Errors raised when a name, code or rate is missing from a conversion table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The status return level name is not one of `never`, `read`, `always`.
    #[error("status {0:?} should be chosen among never, read, always")]
    UnknownStatusLevel(String),
    /// The error name is not one of the eight alarm flags.
    #[error("unknown error name {0:?}")]
    UnknownErrorName(String),
    /// The LED color name is not one of the eight XL-320 colors.
    #[error("unknown led color {0:?}")]
    UnknownLedColor(String),
    /// A raw code has no semantic value for the quantity.
    #[error("no {quantity} for code {code}")]
    UnknownCode {
        /// Name of the quantity being decoded.
        quantity: &'static str,
        /// The raw code read from the register.
        code: u32,
    },
    /// The model number is not a known Dynamixel model.
    #[error("unknown model id {0}")]
    UnknownModelId(u16),
    /// No baud rate in the table is within 5% of the requested one.
    #[error("incorrect baudrate {value} (possible values {possible})")]
    NoMatchingBaudRate {
        /// The requested baud rate.
        value: f64,
        /// The rates available for the model.
        possible: String,
    },
}
