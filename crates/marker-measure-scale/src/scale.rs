use crate::InvalidScaleFactor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixels per physical unit for one image. Always finite and `> 0`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Returns `None` unless `pixels_per_unit` is finite and strictly positive.
    pub fn new(pixels_per_unit: f64) -> Option<Self> {
        (pixels_per_unit.is_finite() && pixels_per_unit > 0.0).then_some(Self(pixels_per_unit))
    }

    #[inline]
    pub fn pixels_per_unit(self) -> f64 {
        self.0
    }

    /// Convert a pixel length to physical units.
    #[inline]
    pub fn to_units(self, px: f64) -> f64 {
        px / self.0
    }
}

impl TryFrom<f64> for ScaleFactor {
    type Error = InvalidScaleFactor;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidScaleFactor(value))
    }
}

impl From<ScaleFactor> for f64 {
    fn from(s: ScaleFactor) -> Self {
        s.0
    }
}

impl fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} px/unit", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_and_non_finite() {
        for bad in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(ScaleFactor::new(bad).is_none(), "{bad} accepted");
        }
        assert!(ScaleFactor::new(f64::MIN_POSITIVE).is_some());
    }

    #[test]
    fn converts_pixels_to_units() {
        let s = ScaleFactor::new(100.0).expect("positive");
        assert_eq!(s.to_units(200.0), 2.0);
        assert_eq!(s.to_units(50.0), 0.5);
    }

    #[test]
    fn deserialization_enforces_positivity() {
        let s: ScaleFactor = serde_json::from_str("66.0").expect("valid");
        assert_eq!(s.pixels_per_unit(), 66.0);
        assert!(serde_json::from_str::<ScaleFactor>("0.0").is_err());
        assert!(serde_json::from_str::<ScaleFactor>("-3.5").is_err());
        assert_eq!(serde_json::to_string(&s).expect("serialize"), "66.0");
    }
}
