use crate::MeasureParamsError;
use marker_measure_core::CornerOrdering;
use serde::{Deserialize, Serialize};

/// Object measurement settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureParams {
    /// Contours enclosing less than this many px² are ignored.
    pub min_contour_area: f64,
    /// Corner role assignment used to attribute width and height.
    pub corner_ordering: CornerOrdering,
}

impl Default for MeasureParams {
    fn default() -> Self {
        Self {
            min_contour_area: 2000.0,
            corner_ordering: CornerOrdering::Geometric,
        }
    }
}

impl MeasureParams {
    pub fn validate(&self) -> Result<(), MeasureParamsError> {
        if !(self.min_contour_area.is_finite() && self.min_contour_area >= 0.0) {
            return Err(MeasureParamsError::MinContourArea(self.min_contour_area));
        }
        Ok(())
    }
}
