//! Output of an external fiducial-marker detector.

use crate::{MarkerGeometryError, MarkerSelection};
use marker_measure_core::Point2D;
use serde::{Deserialize, Serialize};

/// One accepted marker as reported by the detector.
///
/// Corner order (clockwise or counter-clockwise) is whatever the detector
/// uses; it is treated as opaque and never reordered here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedMarker {
    pub id: u32,
    pub corners: Vec<Point2D>,
}

impl DetectedMarker {
    pub fn new(id: u32, corners: Vec<Point2D>) -> Self {
        Self { id, corners }
    }

    /// The four corners, or `InvalidMarkerGeometry` for any other count.
    pub fn quad(&self) -> Result<[Point2D; 4], MarkerGeometryError> {
        <[Point2D; 4]>::try_from(self.corners.as_slice()).map_err(|_| {
            MarkerGeometryError::InvalidMarkerGeometry {
                id: self.id,
                corners: self.corners.len(),
            }
        })
    }
}

/// All markers found in one image, in detector-reported order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerDetection {
    /// Marker family the detector was configured with, e.g. `DICT_6X6_250`.
    #[serde(default)]
    pub dictionary: Option<String>,
    #[serde(default)]
    pub markers: Vec<DetectedMarker>,
    /// Rejected candidate quads. Kept for reporting only.
    #[serde(default)]
    pub rejected: Vec<Vec<Point2D>>,
}

impl MarkerDetection {
    pub fn from_markers(markers: Vec<DetectedMarker>) -> Self {
        Self {
            markers,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Pick the calibration marker according to `selection`.
    ///
    /// Selection only depends on detector order, never on ids being sorted.
    pub fn select(&self, selection: MarkerSelection) -> Option<&DetectedMarker> {
        match selection {
            MarkerSelection::First => self.markers.first(),
            MarkerSelection::Id(id) => self.markers.iter().find(|m| m.id == id),
        }
    }
}
