use marker_measure_core::{OrderedCorners, OrientedBox, Point2D};
use serde::{Deserialize, Serialize};

/// Measurement of one qualifying contour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Position of the source contour in the input sequence.
    pub index: usize,
    /// Physical width, `|top_right - top_left| / pixels_per_unit`.
    pub width: f64,
    /// Physical height, `|bottom_left - top_left| / pixels_per_unit`.
    pub height: f64,
    pub width_px: f64,
    pub height_px: f64,
    /// Enclosed contour area in px².
    pub area_px: f64,
    /// Area-weighted contour centroid in pixels.
    pub centroid: Point2D,
    pub bbox: OrientedBox,
    pub corners: OrderedCorners,
}
