use crate::CalibrationParamsError;
use serde::{Deserialize, Serialize};

/// Marker family assumed when none is configured (6x6 bits, 250 symbols).
pub const DEFAULT_MARKER_DICTIONARY: &str = "DICT_6X6_250";

/// Which detected marker serves as the calibration reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSelection {
    /// First marker in detector-reported order.
    #[default]
    First,
    /// First marker (in detector order) carrying this id.
    Id(u32),
}

/// Scale calibration settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Real-world perimeter of the calibration marker, in output units.
    ///
    /// Default `4.5` (a marker with 1.125 in sides).
    pub known_perimeter: f64,
    /// Pixels per unit used when no usable marker is found.
    pub fallback_pixels_per_unit: f64,
    /// Marker family the external detector runs with.
    pub marker_dictionary: String,
    pub selection: MarkerSelection,
}

fn default_marker_dictionary() -> String {
    DEFAULT_MARKER_DICTIONARY.to_string()
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            known_perimeter: 4.5,
            fallback_pixels_per_unit: 66.0,
            marker_dictionary: default_marker_dictionary(),
            selection: MarkerSelection::First,
        }
    }
}

impl CalibrationParams {
    pub fn validate(&self) -> Result<(), CalibrationParamsError> {
        if !(self.known_perimeter.is_finite() && self.known_perimeter > 0.0) {
            return Err(CalibrationParamsError::KnownPerimeter(self.known_perimeter));
        }
        if !(self.fallback_pixels_per_unit.is_finite() && self.fallback_pixels_per_unit > 0.0) {
            return Err(CalibrationParamsError::FallbackScale(
                self.fallback_pixels_per_unit,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = CalibrationParams::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.marker_dictionary, "DICT_6X6_250");
    }

    #[test]
    fn rejects_bad_constants() {
        let p = CalibrationParams {
            known_perimeter: 0.0,
            ..CalibrationParams::default()
        };
        assert_eq!(p.validate(), Err(CalibrationParamsError::KnownPerimeter(0.0)));

        let p = CalibrationParams {
            fallback_pixels_per_unit: -66.0,
            ..CalibrationParams::default()
        };
        assert_eq!(
            p.validate(),
            Err(CalibrationParamsError::FallbackScale(-66.0))
        );
    }

    #[test]
    fn selection_json_forms() {
        let p: CalibrationParams = serde_json::from_str(
            r#"{"known_perimeter": 8.0, "fallback_pixels_per_unit": 40.0, "selection": {"id": 17}}"#,
        )
        .expect("parse");
        assert_eq!(p.selection, MarkerSelection::Id(17));
        assert_eq!(p.marker_dictionary, DEFAULT_MARKER_DICTIONARY);

        let s: MarkerSelection = serde_json::from_str(r#""first""#).expect("parse");
        assert_eq!(s, MarkerSelection::First);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let p: CalibrationParams =
            serde_json::from_str(r#"{"known_perimeter": 8.0}"#).expect("parse");
        assert_eq!(p.known_perimeter, 8.0);
        assert_eq!(p.fallback_pixels_per_unit, 66.0);
        assert_eq!(p.selection, MarkerSelection::First);
    }
}
