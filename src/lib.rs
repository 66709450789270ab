//! Conversions between the raw register values of Dynamixel servo motors and physical units.
//!
//! The bus carries fixed-width little-endian unsigned integers. This crate turns them into
//! degrees, degrees/s, volts, error flags and so on, using the scale factors of the motor's model
//! family, and back. It does not talk to the bus: byte buffers are handed in and out by the caller.
//!
//! ```rust
//! use dynamixel_conversion::{decode_register, position_from_raw, RawValue};
//!
//! # fn main() -> Result<(), dynamixel_conversion::Error> {
//! let RawValue::Single(raw) = decode_register(&[0x00, 0x08], 1)? else {
//!     unreachable!()
//! };
//! assert_eq!(position_from_raw(raw as u32, "MX-28"), 0.04);
//! # Ok(())
//! # }
//! ```

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true
)]
#![deny(
// missing_debug_implementations,
missing_docs,
trivial_casts,
trivial_numeric_casts,
unused_extern_crates,
unused_import_braces,
unused_qualifications,
// unused_results
)]
#![warn(clippy::unwrap_used)]

mod error;
mod model;
pub mod protocol;

pub use error::*;
pub use model::{
    max_torque, max_velocity, model_from_raw, model_to_raw, ModelFamily, PositionRange,
};
pub use protocol::enums::{
    alarm_from_raw, alarm_names_to_raw, alarm_to_raw, baudrate_from_raw, baudrate_to_raw,
    control_mode_from_raw, control_mode_name_to_raw, control_mode_to_raw, drive_mode_from_raw,
    drive_mode_to_raw, led_color_from_raw, led_color_to_raw, status_from_raw, status_to_raw,
    ControlMode, Direction, DriveMode, ErrorFlag, LedColor, Role, StatusLevel,
};
pub use protocol::quantities::*;
pub use protocol::{decode_register, encode_register, registers, RawValue};
