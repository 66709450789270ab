//! Table driven registers: drive mode, status return level, alarms, LED color, control mode and
//! baud rate.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use log::{debug, warn};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use zerocopy::AsBytes;

use crate::{Error, LookupError};

/// Rotation direction bit of the drive mode register.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
}

/// Dual joint role bit of the drive mode register.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Master,
    Slave,
}

/// Content of the drive mode register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DriveMode {
    /// Bit 0.
    pub direction: Direction,
    /// Bit 1.
    pub role: Role,
}

/// Splits the drive mode register into its direction and role bits.
pub fn drive_mode_from_raw(raw: u8, _model: &str) -> DriveMode {
    DriveMode {
        direction: if raw & 0b01 != 0 {
            Direction::Reverse
        } else {
            Direction::Normal
        },
        role: if raw & 0b10 != 0 {
            Role::Slave
        } else {
            Role::Master
        },
    }
}

/// Packs direction and role into the drive mode register.
pub fn drive_mode_to_raw(mode: DriveMode, _model: &str) -> u8 {
    let slave = u8::from(mode.role == Role::Slave);
    let reverse = u8::from(mode.direction == Direction::Reverse);
    (slave << 1) | reverse
}

/// When the motor answers instruction packets.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, AsBytes)]
#[repr(u8)]
pub enum StatusLevel {
    Never = 0,
    Read = 1,
    Always = 2,
}

impl StatusLevel {
    /// Name used by the control table documentation.
    pub fn name(&self) -> &'static str {
        match self {
            StatusLevel::Never => "never",
            StatusLevel::Read => "read",
            StatusLevel::Always => "always",
        }
    }
}

impl fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatusLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "never" => Ok(StatusLevel::Never),
            "read" => Ok(StatusLevel::Read),
            "always" => Ok(StatusLevel::Always),
            _ => Err(LookupError::UnknownStatusLevel(s.to_owned()).into()),
        }
    }
}

/// Converts the status return level register.
pub fn status_from_raw(raw: u8, _model: &str) -> Result<StatusLevel, Error> {
    StatusLevel::from_u8(raw).ok_or(
        LookupError::UnknownCode {
            quantity: "status level",
            code: u32::from(raw),
        }
        .into(),
    )
}

/// Converts a status return level into its register value.
///
/// Unknown names are rejected when parsing:
///
/// ```rust
/// use dynamixel_conversion::protocol::enums::{status_to_raw, StatusLevel};
///
/// let level: StatusLevel = "always".parse().unwrap();
/// assert_eq!(status_to_raw(level, "MX-28"), 2);
/// assert!("bogus".parse::<StatusLevel>().is_err());
/// ```
pub fn status_to_raw(level: StatusLevel, _model: &str) -> u8 {
    level.as_bytes()[0]
}

/// One bit of the alarm (error) register, valued by its bit.
///
/// The most significant bit comes first.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ErrorFlag {
    NoneError = 0x80,
    Instruction = 0x40,
    Overload = 0x20,
    Checksum = 0x10,
    Range = 0x08,
    Overheating = 0x04,
    AngleLimit = 0x02,
    InputVoltage = 0x01,
}

impl ErrorFlag {
    /// Every flag, most significant bit first.
    pub const ALL: [ErrorFlag; 8] = [
        ErrorFlag::NoneError,
        ErrorFlag::Instruction,
        ErrorFlag::Overload,
        ErrorFlag::Checksum,
        ErrorFlag::Range,
        ErrorFlag::Overheating,
        ErrorFlag::AngleLimit,
        ErrorFlag::InputVoltage,
    ];

    /// Name reported by the motor documentation.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorFlag::NoneError => "None Error",
            ErrorFlag::Instruction => "Instruction Error",
            ErrorFlag::Overload => "Overload Error",
            ErrorFlag::Checksum => "Checksum Error",
            ErrorFlag::Range => "Range Error",
            ErrorFlag::Overheating => "Overheating Error",
            ErrorFlag::AngleLimit => "Angle Limit Error",
            ErrorFlag::InputVoltage => "Input Voltage Error",
        }
    }
}

impl fmt::Display for ErrorFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ErrorFlag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == s)
            .ok_or(LookupError::UnknownErrorName(s.to_owned()).into())
    }
}

/// Unpacks the alarm register into the flags that are set, most significant bit first.
pub fn alarm_from_raw(raw: u8, _model: &str) -> Vec<ErrorFlag> {
    ErrorFlag::ALL
        .into_iter()
        .filter(|flag| raw & (*flag as u8) != 0)
        .collect()
}

/// Packs flags into the alarm register. Repeated flags are counted once.
pub fn alarm_to_raw(flags: &[ErrorFlag], _model: &str) -> u8 {
    flags.iter().fold(0, |acc, flag| acc | *flag as u8)
}

/// Parses error names and packs them into the alarm register.
///
/// Fails if any name is not one of the eight flags.
pub fn alarm_names_to_raw<S: AsRef<str>>(names: &[S], model: &str) -> Result<u8, Error> {
    let flags = names
        .iter()
        .map(|name| name.as_ref().parse())
        .collect::<Result<Vec<ErrorFlag>, _>>()?;
    Ok(alarm_to_raw(&flags, model))
}

/// Colors of the XL-320 LED.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, AsBytes)]
#[repr(u8)]
pub enum LedColor {
    Off = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Pink = 5,
    Cyan = 6,
    White = 7,
}

impl LedColor {
    const ALL: [LedColor; 8] = [
        LedColor::Off,
        LedColor::Red,
        LedColor::Green,
        LedColor::Yellow,
        LedColor::Blue,
        LedColor::Pink,
        LedColor::Cyan,
        LedColor::White,
    ];

    /// Lower case color name.
    pub fn name(&self) -> &'static str {
        match self {
            LedColor::Off => "off",
            LedColor::Red => "red",
            LedColor::Green => "green",
            LedColor::Yellow => "yellow",
            LedColor::Blue => "blue",
            LedColor::Pink => "pink",
            LedColor::Cyan => "cyan",
            LedColor::White => "white",
        }
    }
}

impl fmt::Display for LedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LedColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LedColor::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or(LookupError::UnknownLedColor(s.to_owned()).into())
    }
}

/// Converts the LED register into a color.
pub fn led_color_from_raw(raw: u8, _model: &str) -> Result<LedColor, Error> {
    LedColor::from_u8(raw).ok_or(
        LookupError::UnknownCode {
            quantity: "led color",
            code: u32::from(raw),
        }
        .into(),
    )
}

/// Converts a color into the LED register.
pub fn led_color_to_raw(color: LedColor, _model: &str) -> u8 {
    color.as_bytes()[0] & 0b111
}

/// Operating modes of the control mode register.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, AsBytes)]
#[repr(u8)]
pub enum ControlMode {
    Velocity = 1,
    Position = 3,
    ExtendedPosition = 4,
}

impl ControlMode {
    /// Snake case mode name.
    pub fn name(&self) -> &'static str {
        match self {
            ControlMode::Velocity => "velocity",
            ControlMode::Position => "position",
            ControlMode::ExtendedPosition => "extended_position",
        }
    }

    /// Looks a mode up by name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            ControlMode::Velocity,
            ControlMode::Position,
            ControlMode::ExtendedPosition,
        ]
        .into_iter()
        .find(|mode| mode.name() == name)
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts the control mode register.
pub fn control_mode_from_raw(raw: u8, _model: &str) -> Result<ControlMode, Error> {
    ControlMode::from_u8(raw).ok_or(
        LookupError::UnknownCode {
            quantity: "control mode",
            code: u32::from(raw),
        }
        .into(),
    )
}

/// Converts a control mode into its register value.
pub fn control_mode_to_raw(mode: ControlMode, _model: &str) -> u8 {
    debug!("converting mode {}", mode);
    mode.as_bytes()[0]
}

/// Converts a control mode name into its register value, or `None` if the name is unknown.
pub fn control_mode_name_to_raw(name: &str, model: &str) -> Option<u8> {
    ControlMode::from_name(name).map(|mode| control_mode_to_raw(mode, model))
}

/// Baud rate register codes, in lookup order.
const BAUDRATES: &[(u8, f64)] = &[
    (1, 1_000_000.0),
    (3, 500_000.0),
    (4, 400_000.0),
    (16, 117_647.1),
    (34, 57_600.0),
    (103, 19_230.8),
    (207, 9_615.4),
    (250, 2_250_000.0),
    (251, 2_500_000.0),
    (252, 3_000_000.0),
];

const XL320_BAUDRATES: &[(u8, f64)] = &[
    (0, 9_600.0),
    (1, 57_600.0),
    (2, 115_200.0),
    (3, 1_000_000.0),
];

/// Relative error accepted when matching a requested baud rate.
pub const BAUDRATE_TOLERANCE: f64 = 0.05;

/// The XL-320 has its own table; it is selected by exact model name.
fn baudrates(model: &str) -> &'static [(u8, f64)] {
    if model == "XL-320" {
        XL320_BAUDRATES
    } else {
        BAUDRATES
    }
}

/// Converts the baud rate register into bits/s.
pub fn baudrate_from_raw(raw: u8, model: &str) -> Result<f64, Error> {
    baudrates(model)
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(_, rate)| *rate)
        .ok_or(
            LookupError::UnknownCode {
                quantity: "baud rate",
                code: u32::from(raw),
            }
            .into(),
        )
}

/// Finds the register code of the first tabulated baud rate within 5% of `baudrate`.
///
/// ```rust
/// use dynamixel_conversion::baudrate_to_raw;
///
/// assert_eq!(baudrate_to_raw(1_000_000.5, "*").unwrap(), 1);
/// assert!(baudrate_to_raw(1.0, "*").is_err());
/// ```
pub fn baudrate_to_raw(baudrate: f64, model: &str) -> Result<u8, Error> {
    let table = baudrates(model);
    for (code, rate) in table {
        if (rate - baudrate).abs() / baudrate < BAUDRATE_TOLERANCE {
            if *rate != baudrate {
                warn!("baudrate {} approximated by {} (code {})", baudrate, rate, code);
            }
            return Ok(*code);
        }
    }
    debug!("no baudrate of {} matches {}", model, baudrate);
    Err(LookupError::NoMatchingBaudRate {
        value: baudrate,
        possible: format!("[{}]", table.iter().map(|(_, rate)| rate).join(", ")),
    }
    .into())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_drive_mode() {
        assert_eq!(drive_mode_from_raw(0, "MX-28"), DriveMode::default());
        assert_eq!(
            drive_mode_from_raw(3, "MX-28"),
            DriveMode {
                direction: Direction::Reverse,
                role: Role::Slave
            }
        );
        assert_eq!(
            drive_mode_from_raw(2, "MX-28"),
            DriveMode {
                direction: Direction::Normal,
                role: Role::Slave
            }
        );
        // only the two low bits are read
        assert_eq!(drive_mode_from_raw(0b101, "MX-28").direction, Direction::Reverse);
        assert_eq!(drive_mode_from_raw(0b101, "MX-28").role, Role::Master);

        for raw in 0..4 {
            assert_eq!(drive_mode_to_raw(drive_mode_from_raw(raw, "MX-28"), "MX-28"), raw);
        }
    }

    #[test]
    fn test_status_level() {
        for raw in 0..3 {
            let level = status_from_raw(raw, "MX-28").unwrap();
            assert_eq!(status_to_raw(level, "MX-28"), raw);
        }
        assert_eq!(status_from_raw(1, "MX-28").unwrap(), StatusLevel::Read);
        assert!(status_from_raw(3, "MX-28").is_err());

        assert_eq!("never".parse::<StatusLevel>().unwrap(), StatusLevel::Never);
        assert_eq!(StatusLevel::Always.to_string(), "always");
        assert_eq!(
            "bogus".parse::<StatusLevel>(),
            Err(Error::Lookup(LookupError::UnknownStatusLevel(
                "bogus".to_owned()
            )))
        );
    }

    #[test]
    fn test_alarm() {
        assert!(alarm_from_raw(0, "MX-28").is_empty());
        assert_eq!(alarm_from_raw(0x80, "MX-28"), vec![ErrorFlag::NoneError]);
        assert_eq!(alarm_from_raw(0x01, "MX-28"), vec![ErrorFlag::InputVoltage]);
        assert_eq!(
            alarm_from_raw(0x24, "MX-28"),
            vec![ErrorFlag::Overload, ErrorFlag::Overheating]
        );
        assert_eq!(alarm_from_raw(0xff, "MX-28"), ErrorFlag::ALL.to_vec());

        assert_eq!(alarm_to_raw(&[ErrorFlag::Overload], "MX-28"), 32);
        assert_eq!(
            alarm_to_raw(&[ErrorFlag::Overheating, ErrorFlag::Overload], "MX-28"),
            0x24
        );
        assert_eq!(
            alarm_to_raw(&[ErrorFlag::Range, ErrorFlag::Range], "MX-28"),
            0x08
        );
    }

    #[test]
    fn test_alarm_round_trip_every_subset() {
        for raw in 0..=u8::MAX {
            let flags = alarm_from_raw(raw, "MX-28");
            assert_eq!(alarm_to_raw(&flags, "MX-28"), raw);
            // decoding is in list order, so comparing vectors compares sets
            assert_eq!(alarm_from_raw(alarm_to_raw(&flags, "MX-28"), "MX-28"), flags);
        }
    }

    #[test]
    fn test_alarm_names() {
        assert_eq!(
            alarm_names_to_raw(&["Overload Error", "Input Voltage Error"], "MX-28").unwrap(),
            0x21
        );
        assert_eq!(alarm_names_to_raw::<&str>(&[], "MX-28").unwrap(), 0);
        assert_eq!(
            alarm_names_to_raw(&["Overload Error", "Bogus Error"], "MX-28"),
            Err(Error::Lookup(LookupError::UnknownErrorName(
                "Bogus Error".to_owned()
            )))
        );
        for flag in ErrorFlag::ALL {
            assert_eq!(flag.to_string().parse::<ErrorFlag>().unwrap(), flag);
        }
    }

    #[test]
    fn test_led_color() {
        assert_eq!(led_color_from_raw(0, "XL-320").unwrap(), LedColor::Off);
        assert_eq!(led_color_from_raw(2, "XL-320").unwrap(), LedColor::Green);
        assert_eq!(led_color_from_raw(7, "XL-320").unwrap(), LedColor::White);
        assert!(led_color_from_raw(8, "XL-320").is_err());

        for raw in 0..8 {
            let color = led_color_from_raw(raw, "XL-320").unwrap();
            assert_eq!(led_color_to_raw(color, "XL-320"), raw);
        }
        assert_eq!("pink".parse::<LedColor>().unwrap(), LedColor::Pink);
        assert!("purple".parse::<LedColor>().is_err());
    }

    #[test]
    fn test_control_mode() {
        assert_eq!(
            control_mode_from_raw(1, "XM-430").unwrap(),
            ControlMode::Velocity
        );
        assert_eq!(
            control_mode_from_raw(4, "XM-430").unwrap(),
            ControlMode::ExtendedPosition
        );
        assert!(control_mode_from_raw(2, "XM-430").is_err());

        assert_eq!(control_mode_to_raw(ControlMode::Position, "XM-430"), 3);
        assert_eq!(control_mode_name_to_raw("extended_position", "XM-430"), Some(4));
        assert_eq!(control_mode_name_to_raw("torque", "XM-430"), None);
    }

    #[test]
    fn test_baudrate_from_raw() {
        assert_eq!(baudrate_from_raw(1, "MX-28").unwrap(), 1_000_000.0);
        assert_eq!(baudrate_from_raw(34, "MX-28").unwrap(), 57_600.0);
        assert_eq!(baudrate_from_raw(16, "*").unwrap(), 117_647.1);
        assert_eq!(baudrate_from_raw(1, "XL-320").unwrap(), 57_600.0);
        assert_eq!(baudrate_from_raw(3, "XL-320").unwrap(), 1_000_000.0);
        assert!(baudrate_from_raw(2, "MX-28").is_err());
        assert!(baudrate_from_raw(34, "XL-320").is_err());
    }

    #[test]
    fn test_baudrate_to_raw() {
        assert_eq!(baudrate_to_raw(1_000_000.5, "*").unwrap(), 1);
        assert_eq!(baudrate_to_raw(1_000_000.0, "MX-28").unwrap(), 1);
        assert_eq!(baudrate_to_raw(1_040_000.0, "MX-28").unwrap(), 1);
        assert_eq!(baudrate_to_raw(115_200.0, "MX-28").unwrap(), 16);
        assert_eq!(baudrate_to_raw(57_600.0, "XL-320").unwrap(), 1);
        assert_eq!(baudrate_to_raw(115_200.0, "XL-320").unwrap(), 2);
        assert_eq!(baudrate_to_raw(9_600.0, "AX-12").unwrap(), 207);
    }

    #[test]
    fn test_baudrate_no_match() {
        let err = baudrate_to_raw(1.0, "*").unwrap_err();
        assert!(matches!(
            err,
            Error::Lookup(LookupError::NoMatchingBaudRate { value, .. }) if value == 1.0
        ));
        assert!(err.to_string().contains("1000000"));
        assert!(baudrate_to_raw(1_100_000.0, "MX-28").is_err());
        assert!(baudrate_to_raw(0.0, "MX-28").is_err());
        assert!(baudrate_to_raw(3_000_000.0, "XL-320").is_err());
    }
}
