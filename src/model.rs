//! Dynamixel model registry.
//!
//! Maps the model number stored in the control table to a model name, groups model names into
//! the [`ModelFamily`] that decides which scale factors apply, and exposes the per-model limits.

use crate::{Error, LookupError};

/// Motor product lines that use different conversion parameters.
///
/// Finer model names such as `MX-106` or `XL-320` only matter for [`max_torque`],
/// [`max_velocity`] and the XL-320 baud rate table; everything else resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// MX series (MX-12, MX-28, MX-64, MX-106).
    Mx,
    /// Seed Robotics SR series.
    Sr,
    /// EX series.
    Ex,
    /// X series (XM-430).
    Xm,
    /// Every other model (AX, RX, XL-320, ...).
    Generic,
}

impl ModelFamily {
    /// Resolves the family of a model name by prefix.
    ///
    /// Prefixes are checked in the order `MX`, `SR`, `EX`, `XM`; unmatched names fall back to
    /// [`ModelFamily::Generic`].
    ///
    /// ```rust
    /// use dynamixel_conversion::ModelFamily;
    ///
    /// assert_eq!(ModelFamily::from_model("MX-64"), ModelFamily::Mx);
    /// assert_eq!(ModelFamily::from_model("AX-12"), ModelFamily::Generic);
    /// ```
    pub fn from_model(model: &str) -> Self {
        if model.starts_with("MX") {
            ModelFamily::Mx
        } else if model.starts_with("SR") {
            ModelFamily::Sr
        } else if model.starts_with("EX") {
            ModelFamily::Ex
        } else if model.starts_with("XM") {
            ModelFamily::Xm
        } else {
            ModelFamily::Generic
        }
    }

    /// Returns the encoder range of the family.
    pub fn position_range(&self) -> PositionRange {
        match self {
            ModelFamily::Mx | ModelFamily::Sr | ModelFamily::Xm => PositionRange::new(4096, 360.0),
            ModelFamily::Ex => PositionRange::new(4096, 251.0),
            ModelFamily::Generic => PositionRange::new(1024, 300.0),
        }
    }
}

/// Number of encoder ticks covering `max_degrees` of travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRange {
    max_ticks: u32,
    max_degrees: f64,
}

impl PositionRange {
    const fn new(max_ticks: u32, max_degrees: f64) -> Self {
        // max_ticks - 1 is used as a divisor
        assert!(max_ticks >= 2);
        Self {
            max_ticks,
            max_degrees,
        }
    }

    /// Number of distinct positions the encoder reports.
    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    /// Angular travel covered by `max_ticks`, in degrees.
    pub fn max_degrees(&self) -> f64 {
        self.max_degrees
    }
}

/// Stall torque in N.m, keyed by model name.
const TORQUE_MAX: &[(&str, f64)] = &[
    ("MX-106", 8.4),
    ("MX-64", 6.0),
    ("MX-28", 2.5),
    ("MX-12", 1.2),
    ("AX-12", 1.2),
    ("AX-18", 1.8),
    ("RX-24", 2.6),
    ("RX-28", 2.5),
    ("RX-64", 4.0),
    ("XL-320", 0.39),
    ("SR-RH4D", 0.57),
    ("EX-106", 10.9),
    ("XM-430", 4.1),
];

/// No-load speed in degrees/s, keyed by model name.
const VELOCITY_MAX: &[(&str, f64)] = &[
    ("MX-106", 270.0),
    ("MX-64", 378.0),
    ("MX-28", 330.0),
    ("MX-12", 2820.0),
    ("AX-12", 354.0),
    ("AX-18", 582.0),
    ("RX-24", 756.0),
    ("RX-28", 402.0),
    ("RX-64", 294.0),
    ("SR-RH4D", 300.0),
    ("XM-430", 276.0),
];

/// Model numbers as stored in the first two bytes of the control table.
const MODELS: &[(u16, &str)] = &[
    (12, "AX-12"),
    (18, "AX-18"),
    (24, "RX-24"),
    (28, "RX-28"),
    (29, "MX-28"),
    (30, "MX-28"),
    (64, "RX-64"),
    (107, "EX-106"),
    (360, "MX-12"),
    (310, "MX-64"),
    (320, "MX-106"),
    (350, "XL-320"),
    (400, "SR-RH4D"),
    // virtual motor
    (401, "SR-RH4D"),
    (1020, "XM-430"),
];

/// Returns the stall torque of a model in N.m, if known.
pub fn max_torque(model: &str) -> Option<f64> {
    TORQUE_MAX
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, torque)| *torque)
}

/// Returns the no-load speed of a model in degrees/s, if known.
pub fn max_velocity(model: &str) -> Option<f64> {
    VELOCITY_MAX
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, velocity)| *velocity)
}

/// Looks up the model name for a model number read from the control table.
///
/// ```rust
/// assert_eq!(dynamixel_conversion::model_from_raw(29).unwrap(), "MX-28");
/// assert!(dynamixel_conversion::model_from_raw(999).is_err());
/// ```
pub fn model_from_raw(raw: u16) -> Result<&'static str, Error> {
    MODELS
        .iter()
        .find(|(id, _)| *id == raw)
        .map(|(_, name)| *name)
        .ok_or(LookupError::UnknownModelId(raw).into())
}

/// Returns the lowest model number registered for `model`.
pub fn model_to_raw(model: &str) -> Option<u16> {
    MODELS
        .iter()
        .filter(|(_, name)| *name == model)
        .map(|(id, _)| *id)
        .min()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn family_from_prefix() {
        assert_eq!(ModelFamily::from_model("MX-28"), ModelFamily::Mx);
        assert_eq!(ModelFamily::from_model("MX-106"), ModelFamily::Mx);
        assert_eq!(ModelFamily::from_model("SR-RH4D"), ModelFamily::Sr);
        assert_eq!(ModelFamily::from_model("EX-106"), ModelFamily::Ex);
        assert_eq!(ModelFamily::from_model("XM-430"), ModelFamily::Xm);
        assert_eq!(ModelFamily::from_model("AX-12"), ModelFamily::Generic);
        assert_eq!(ModelFamily::from_model("XL-320"), ModelFamily::Generic);
        assert_eq!(ModelFamily::from_model(""), ModelFamily::Generic);
        assert_eq!(ModelFamily::from_model("*"), ModelFamily::Generic);
    }

    #[test]
    fn position_ranges() {
        let mx = ModelFamily::Mx.position_range();
        assert_eq!((mx.max_ticks(), mx.max_degrees()), (4096, 360.0));
        let ex = ModelFamily::Ex.position_range();
        assert_eq!((ex.max_ticks(), ex.max_degrees()), (4096, 251.0));
        let generic = ModelFamily::Generic.position_range();
        assert_eq!((generic.max_ticks(), generic.max_degrees()), (1024, 300.0));
        assert_eq!(ModelFamily::Sr.position_range(), mx);
        assert_eq!(ModelFamily::Xm.position_range(), mx);
    }

    #[test]
    fn limits_use_full_model_name() {
        assert_eq!(max_torque("MX-106"), Some(8.4));
        assert_eq!(max_torque("XL-320"), Some(0.39));
        assert_eq!(max_torque("MX"), None);
        assert_eq!(max_velocity("MX-12"), Some(2820.0));
        // no velocity entry for these two
        assert_eq!(max_velocity("XL-320"), None);
        assert_eq!(max_velocity("EX-106"), None);
    }

    #[test]
    fn model_ids() {
        assert_eq!(model_from_raw(12).unwrap(), "AX-12");
        assert_eq!(model_from_raw(30).unwrap(), "MX-28");
        assert_eq!(model_from_raw(401).unwrap(), "SR-RH4D");
        assert_eq!(model_from_raw(1020).unwrap(), "XM-430");
        assert_eq!(
            model_from_raw(0),
            Err(Error::Lookup(LookupError::UnknownModelId(0)))
        );

        assert_eq!(model_to_raw("MX-28"), Some(29));
        assert_eq!(model_to_raw("SR-RH4D"), Some(400));
        assert_eq!(model_to_raw("XM-540"), None);
    }
}
