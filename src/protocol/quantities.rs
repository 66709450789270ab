//! Numeric quantities: position, speed, torque, time and the other scaled registers.
//!
//! Each quantity has a `*_from_raw` function turning the register value into a physical value and,
//! unless the register is read-only, a `*_to_raw` inverse. Every function takes the model name so
//! the caller does not need to know which quantities depend on the model family.
//!
//! Encoders return the register's unsigned type. Values that would be negative are wrapped
//! two's-complement into that type, which is the byte pattern the codec puts on the wire.

use crate::ModelFamily;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Degrees per tick of the multi-turn (extended position) registers.
pub const MULTI_TURN_RESOLUTION: f64 = 0.088;
/// Degrees/s² per tick of the goal acceleration register.
pub const ACCELERATION_RESOLUTION: f64 = 8.583;
/// Milliseconds per tick of the time registers.
pub const TIME_RESOLUTION: f64 = 20.0;
/// Microseconds per tick of the return delay time register.
pub const RETURN_DELAY_RESOLUTION: f64 = 2.0;

/// Scale factors of the `(P, I, D)` gain registers.
const PID_SCALE: (f64, f64, f64) = (0.004, 0.48828125, 0.125);
/// Inverse of [`PID_SCALE`] as used when writing gains.
const PID_FACTOR: (f64, f64, f64) = (250.0, 2.048, 8.0);
const PID_MAX: f64 = 254.0;

/// Rounds to `digits` decimals, ties to even, on the exact binary value of `value`.
fn round_to(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

/// Truncates towards zero and wraps into an unsigned register of `bits` bits.
fn wrapping(value: f64, bits: u32) -> u64 {
    (value as i128).rem_euclid(1i128 << bits) as u64
}

/// Values above half the 32 bit range are negative.
fn signed_from_u32(raw: u32) -> i64 {
    let raw = i64::from(raw);
    if raw > 1 << 31 {
        raw - (1 << 32)
    } else {
        raw
    }
}

fn speed_factor(model: &str) -> f64 {
    match ModelFamily::from_model(model) {
        ModelFamily::Mx | ModelFamily::Sr => 0.114,
        ModelFamily::Xm => 0.229,
        ModelFamily::Ex | ModelFamily::Generic => 0.111,
    }
}

/// Converts a single-turn position register into degrees, centred on zero.
///
/// ```rust
/// use dynamixel_conversion::position_from_raw;
///
/// assert_eq!(position_from_raw(2048, "MX-28"), 0.04);
/// assert_eq!(position_from_raw(0, "AX-12"), -150.0);
/// ```
pub fn position_from_raw(raw: u32, model: &str) -> f64 {
    let range = ModelFamily::from_model(model).position_range();
    let max_pos = f64::from(range.max_ticks());
    let max_deg = range.max_degrees();

    round_to(
        ((max_deg * f64::from(raw)) / (max_pos - 1.0)) - (max_deg / 2.0),
        2,
    )
}

/// Converts degrees into a single-turn position register, clamped to the encoder range.
pub fn position_to_raw(degrees: f64, model: &str) -> u32 {
    let range = ModelFamily::from_model(model).position_range();
    let max_pos = f64::from(range.max_ticks());
    let max_deg = range.max_degrees();

    let pos = ((max_pos - 1.0) * ((max_deg / 2.0 + degrees) / max_deg)).round_ties_even();
    pos.clamp(0.0, max_pos - 1.0) as u32
}

/// Converts a multi-turn position register into degrees.
///
/// The register is signed: `u32::MAX` is one tick below zero.
pub fn multi_turn_from_raw(raw: u32, _model: &str) -> f64 {
    MULTI_TURN_RESOLUTION * signed_from_u32(raw) as f64
}

/// Converts degrees into a multi-turn position register.
pub fn multi_turn_to_raw(degrees: f64, _model: &str) -> u32 {
    let pos = if degrees < 0.0 {
        TWO_POW_32 + degrees / MULTI_TURN_RESOLUTION
    } else {
        degrees / MULTI_TURN_RESOLUTION
    };
    // clamping to 2^32 inclusive; a rounded 2^32 wraps to 0 like it does on the wire
    wrapping(pos.clamp(0.0, TWO_POW_32).round_ties_even(), 32) as u32
}

/// Converts a signed velocity register into degrees/s.
///
/// ```rust
/// use dynamixel_conversion::speed_from_raw;
///
/// assert_eq!(speed_from_raw(u32::MAX, "MX-64"), -0.114);
/// assert_eq!(speed_from_raw(u32::MAX, "XM-430"), -0.229);
/// ```
pub fn speed_from_raw(raw: u32, model: &str) -> f64 {
    signed_from_u32(raw) as f64 * speed_factor(model)
}

/// Converts degrees/s into a velocity register.
pub fn speed_to_raw(speed: f64, model: &str) -> u32 {
    let factor = speed_factor(model);
    let speed = if speed < 0.0 {
        TWO_POW_32 + speed / factor
    } else {
        speed / factor
    };
    wrapping(speed.round_ties_even(), 32) as u32
}

/// Converts a torque register into a percentage of the maximum torque
/// (or, for the XM family, into N.m).
///
/// `raw` is signed so that [`load_from_raw`] can pass a negative load through.
pub fn torque_from_raw(raw: i32, model: &str) -> f64 {
    let raw = f64::from(raw);
    match ModelFamily::from_model(model) {
        ModelFamily::Xm => round_to(raw * 0.00269 * 1.66, 1),
        _ => round_to(raw / 10.0, 1),
    }
}

/// Converts a torque percentage into a torque register.
///
/// There is no XM specific inverse: every family is encoded with the `/ 10` scale, so an XM
/// torque does not survive a round trip.
// TODO: add the XM inverse once the N.m scale of the XM torque registers is confirmed on hardware
pub fn torque_to_raw(torque: f64, _model: &str) -> u16 {
    wrapping((torque * 10.0).round_ties_even(), 16) as u16
}

/// Converts a present load register into a torque. Read-only.
///
/// Registers above 1000 are treated as negative 16 bit values.
pub fn load_from_raw(raw: u16, model: &str) -> f64 {
    let raw = i32::from(raw);
    let load = if raw > 1000 { raw - 65536 } else { raw };
    torque_from_raw(load, model)
}

/// Converts a time register into milliseconds.
///
/// One tick is 20 ms for every model family.
pub fn ms_from_raw(raw: u32, _model: &str) -> f64 {
    f64::from(raw) * TIME_RESOLUTION
}

/// Converts milliseconds into a time register, truncating.
pub fn ms_to_raw(ms: f64, _model: &str) -> u32 {
    wrapping(ms / TIME_RESOLUTION, 32) as u32
}

/// Converts the return delay time register into microseconds.
pub fn return_delay_from_raw(raw: u8, _model: &str) -> f64 {
    f64::from(raw) * RETURN_DELAY_RESOLUTION
}

/// Converts microseconds into the return delay time register, truncating.
pub fn return_delay_to_raw(us: f64, _model: &str) -> u8 {
    wrapping(us / RETURN_DELAY_RESOLUTION, 8) as u8
}

/// Converts an acceleration register into degrees/s².
pub fn acceleration_from_raw(raw: u32, _model: &str) -> f64 {
    f64::from(raw) * ACCELERATION_RESOLUTION
}

/// Converts degrees/s² into an acceleration register.
pub fn acceleration_to_raw(acceleration: f64, _model: &str) -> u32 {
    wrapping((acceleration / ACCELERATION_RESOLUTION).round_ties_even(), 32) as u32
}

/// Proportional, integral and derivative gains of the position controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PidGains {
    /// Proportional gain.
    pub p: f64,
    /// Integral gain.
    pub i: f64,
    /// Derivative gain.
    pub d: f64,
}

impl From<(f64, f64, f64)> for PidGains {
    fn from((p, i, d): (f64, f64, f64)) -> Self {
        Self { p, i, d }
    }
}

/// Converts the three gain registers, given in `(P, I, D)` order, into gains.
pub fn pid_from_raw(raw: [u8; 3], _model: &str) -> PidGains {
    PidGains {
        p: f64::from(raw[0]) * PID_SCALE.0,
        i: f64::from(raw[1]) * PID_SCALE.1,
        d: f64::from(raw[2]) * PID_SCALE.2,
    }
}

/// Converts gains into the three gain registers, clamping each to `0..=254`.
pub fn pid_to_raw(gains: PidGains, _model: &str) -> [u8; 3] {
    let truncate = |x: f64| x.min(PID_MAX).max(0.0) as u8;
    [
        truncate(gains.p * PID_FACTOR.0),
        truncate(gains.i * PID_FACTOR.1),
        truncate(gains.d * PID_FACTOR.2),
    ]
}

/// Converts a temperature register into degrees Celsius.
pub fn temperature_from_raw(raw: u8, _model: &str) -> f64 {
    f64::from(raw)
}

/// Converts degrees Celsius into a temperature register, truncating.
pub fn temperature_to_raw(temperature: f64, _model: &str) -> u8 {
    wrapping(temperature, 8) as u8
}

/// Converts a current register into amperes. Read-only.
///
/// SR motors report an unsigned current; the other families are centred on 2048.
pub fn current_from_raw(raw: u16, model: &str) -> f64 {
    let raw = f64::from(raw);
    match ModelFamily::from_model(model) {
        ModelFamily::Sr => (raw * 0.4889) / 1000.0,
        _ => 4.5 * (raw - 2048.0) / 1000.0,
    }
}

/// Converts a voltage register into volts.
pub fn voltage_from_raw(raw: u8, _model: &str) -> f64 {
    f64::from(raw) * 0.1
}

/// Converts volts into a voltage register, truncating.
pub fn voltage_to_raw(voltage: f64, _model: &str) -> u8 {
    wrapping(voltage * 10.0, 8) as u8
}

/// Converts a flag register into a boolean.
pub fn bool_from_raw(raw: u8, _model: &str) -> bool {
    raw != 0
}

/// Converts a boolean into a flag register.
pub fn bool_to_raw(value: bool, _model: &str) -> u8 {
    u8::from(value)
}

/// Decodes the present load, speed and position block read in one request.
///
/// Bits 0..16 hold the load, bits 16..48 the speed and bits 48..80 the position.
pub fn load_velocity_position_from_raw(raw: u128, model: &str) -> (f64, f64, f64) {
    let (load, speed, position) = split_state(raw);
    (
        load_from_raw(load, model),
        speed_from_raw(speed, model),
        position_from_raw(position, model),
    )
}

/// Same as [`load_velocity_position_from_raw`] for models using the multi-turn position.
pub fn load_velocity_multi_position_from_raw(raw: u128, model: &str) -> (f64, f64, f64) {
    let (load, speed, position) = split_state(raw);
    (
        load_from_raw(load, model),
        speed_from_raw(speed, model),
        multi_turn_from_raw(position, model),
    )
}

fn split_state(raw: u128) -> (u16, u32, u32) {
    (raw as u16, (raw >> 16) as u32, (raw >> 48) as u32)
}
