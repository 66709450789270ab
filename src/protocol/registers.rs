//! Register level conversions.
//!
//! Each control table quantity is a unit struct implementing [`Conversion`] (and [`Reversible`] when
//! it can be written). [`read`] and [`write`] compose the byte codec with the conversion so a
//! caller can go straight from the bytes of a register to a physical value and back.
//!
//! ```rust
//! use dynamixel_conversion::registers::{self, Position};
//!
//! # fn main() -> Result<(), dynamixel_conversion::Error> {
//! let degrees = registers::read::<Position>(&[0x00, 0x08], "MX-28")?;
//! assert_eq!(degrees, 0.04);
//! assert_eq!(registers::write::<Position>(0.0, 2, "MX-28")?, vec![0x00, 0x08]);
//! # Ok(())
//! # }
//! ```

use crate::protocol::codec::{self, RawValue};
use crate::protocol::enums::{self, ErrorFlag};
use crate::protocol::quantities::{self, PidGains};
use crate::{model, Error, InvalidInputError};

/// Integer types a register can be decoded into.
pub trait RawRegister: Sized {
    /// Number of values of equal width stored in the register.
    const COUNT: usize;
    /// Narrows the codec output into the register type.
    fn from_raw_value(value: &RawValue) -> Result<Self, Error>;
    /// Widens the register into the codec input.
    fn into_raw_value(self) -> RawValue;
}

macro_rules! single_raw_register {
    ($($t:ty),*) => {
        $(
            impl RawRegister for $t {
                const COUNT: usize = 1;

                fn from_raw_value(value: &RawValue) -> Result<Self, Error> {
                    match value {
                        RawValue::Single(v) => {
                            <$t>::try_from(*v).map_err(|_| InvalidInputError::Overflow.into())
                        }
                        RawValue::Multiple(_) => Err(InvalidInputError::Overflow.into()),
                    }
                }

                fn into_raw_value(self) -> RawValue {
                    RawValue::Single(u128::from(self))
                }
            }
        )*
    };
}

single_raw_register!(u8, u16, u32, u128);

impl RawRegister for [u8; 3] {
    const COUNT: usize = 3;

    fn from_raw_value(value: &RawValue) -> Result<Self, Error> {
        let RawValue::Multiple(values) = value else {
            return Err(InvalidInputError::Overflow.into());
        };
        let mut raw = [0; 3];
        if values.len() != raw.len() {
            return Err(InvalidInputError::Overflow.into());
        }
        for (r, v) in raw.iter_mut().zip(values) {
            *r = u8::try_from(*v).map_err(|_| InvalidInputError::Overflow)?;
        }
        Ok(raw)
    }

    fn into_raw_value(self) -> RawValue {
        RawValue::Multiple(self.iter().map(|v| u128::from(*v)).collect())
    }
}

/// Conversion from a register value to a physical value.
pub trait Conversion {
    /// The integer stored in the register.
    type Raw: RawRegister;
    /// The physical or semantic value.
    type Value;

    /// Converts a register value for the given model.
    fn from_raw(raw: Self::Raw, model: &str) -> Result<Self::Value, Error>;
}

/// Conversion of a writable register.
pub trait Reversible: Conversion {
    /// Converts a physical value into a register value for the given model.
    fn to_raw(value: Self::Value, model: &str) -> Result<Self::Raw, Error>;
}

macro_rules! conversion {
    (@call infallible, $f:expr, $arg:expr, $model:expr) => {
        Ok(($f)($arg, $model))
    };
    (@call fallible, $f:expr, $arg:expr, $model:expr) => {
        ($f)($arg, $model)
    };
    ($(#[$meta:meta])* $reg:ident : $raw:ty => $value:ty, $fk:ident $from:expr $(, $tk:ident $to:expr)?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $reg;

        impl Conversion for $reg {
            type Raw = $raw;
            type Value = $value;

            fn from_raw(raw: $raw, model: &str) -> Result<$value, Error> {
                conversion!(@call $fk, $from, raw, model)
            }
        }

        $(
            impl Reversible for $reg {
                fn to_raw(value: $value, model: &str) -> Result<$raw, Error> {
                    conversion!(@call $tk, $to, value, model)
                }
            }
        )?
    };
}

conversion!(
    /// Goal and present position, in degrees.
    Position: u32 => f64,
    infallible quantities::position_from_raw,
    infallible quantities::position_to_raw
);
conversion!(
    /// Extended (multi-turn) position, in degrees.
    MultiTurnPosition: u32 => f64,
    infallible quantities::multi_turn_from_raw,
    infallible quantities::multi_turn_to_raw
);
conversion!(
    /// Moving speed, in degrees/s.
    Speed: u32 => f64,
    infallible quantities::speed_from_raw,
    infallible quantities::speed_to_raw
);
conversion!(
    /// Torque limit, in percent of the maximum torque.
    Torque: u16 => f64,
    infallible |raw: u16, model| quantities::torque_from_raw(i32::from(raw), model),
    infallible quantities::torque_to_raw
);
conversion!(
    /// Present load. Read-only.
    Load: u16 => f64,
    infallible quantities::load_from_raw
);
conversion!(
    /// Time registers, in milliseconds.
    Time: u32 => f64,
    infallible quantities::ms_from_raw,
    infallible quantities::ms_to_raw
);
conversion!(
    /// Return delay time, in microseconds.
    ReturnDelayTime: u8 => f64,
    infallible quantities::return_delay_from_raw,
    infallible quantities::return_delay_to_raw
);
conversion!(
    /// Goal acceleration, in degrees/s².
    Acceleration: u32 => f64,
    infallible quantities::acceleration_from_raw,
    infallible quantities::acceleration_to_raw
);
conversion!(
    /// The three consecutive gain registers.
    Pid: [u8; 3] => PidGains,
    infallible quantities::pid_from_raw,
    infallible quantities::pid_to_raw
);
conversion!(
    /// Temperature, in degrees Celsius.
    Temperature: u8 => f64,
    infallible quantities::temperature_from_raw,
    infallible quantities::temperature_to_raw
);
conversion!(
    /// Present current, in amperes. Read-only.
    Current: u16 => f64,
    infallible quantities::current_from_raw
);
conversion!(
    /// Voltage limits and present voltage, in volts.
    Voltage: u8 => f64,
    infallible quantities::voltage_from_raw,
    infallible quantities::voltage_to_raw
);
conversion!(
    /// Torque enable, LED and the other single flag registers.
    Flag: u8 => bool,
    infallible quantities::bool_from_raw,
    infallible quantities::bool_to_raw
);
conversion!(
    /// Drive mode.
    DriveMode: u8 => enums::DriveMode,
    infallible enums::drive_mode_from_raw,
    infallible enums::drive_mode_to_raw
);
conversion!(
    /// Status return level.
    StatusReturnLevel: u8 => enums::StatusLevel,
    fallible enums::status_from_raw,
    infallible enums::status_to_raw
);
conversion!(
    /// Alarm LED and alarm shutdown flags.
    Alarm: u8 => Vec<ErrorFlag>,
    infallible enums::alarm_from_raw,
    infallible |flags: Vec<ErrorFlag>, model| enums::alarm_to_raw(&flags, model)
);
conversion!(
    /// XL-320 LED color.
    LedColor: u8 => enums::LedColor,
    fallible enums::led_color_from_raw,
    infallible enums::led_color_to_raw
);
conversion!(
    /// Operating mode.
    ControlMode: u8 => enums::ControlMode,
    fallible enums::control_mode_from_raw,
    infallible enums::control_mode_to_raw
);
conversion!(
    /// Baud rate, in bits/s.
    BaudRate: u8 => f64,
    fallible enums::baudrate_from_raw,
    fallible enums::baudrate_to_raw
);
conversion!(
    /// Model number. Read-only.
    ModelNumber: u16 => &'static str,
    fallible |raw: u16, _model: &str| model::model_from_raw(raw)
);
conversion!(
    /// Present load, speed and position read as one block. Read-only.
    PresentState: u128 => (f64, f64, f64),
    infallible quantities::load_velocity_position_from_raw
);
conversion!(
    /// Present load, speed and multi-turn position read as one block. Read-only.
    PresentStateMultiTurn: u128 => (f64, f64, f64),
    infallible quantities::load_velocity_multi_position_from_raw
);

/// Decodes the bytes of a register and converts them for the given model.
pub fn read<C: Conversion>(bytes: &[u8], model: &str) -> Result<C::Value, Error> {
    let raw = codec::decode_all(bytes, C::Raw::COUNT)?;
    C::from_raw(C::Raw::from_raw_value(&raw)?, model)
}

/// Converts a value for the given model and encodes it into `width` bytes per register value.
///
/// As with [`codec::encode`], bits that do not fit in `width` are dropped.
pub fn write<C: Reversible>(value: C::Value, width: usize, model: &str) -> Result<Vec<u8>, Error> {
    let raw = C::to_raw(value, model)?;
    codec::encode_all(&raw.into_raw_value(), width)
}
