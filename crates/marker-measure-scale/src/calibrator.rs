use crate::{
    CalibrationParams, CalibrationParamsError, DetectedMarker, MarkerDetection,
    MarkerGeometryError, ScaleFactor,
};
use log::{debug, info, warn};
use marker_measure_core::closed_perimeter;
use serde::{Deserialize, Serialize};

/// Why the fallback scale was used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FallbackReason {
    /// No marker (matching the selection policy) was detected.
    NoMarkerFound,
    /// The selected marker did not have exactly 4 corners.
    InvalidMarkerGeometry { id: u32, corners: usize },
    /// The selected marker's corners span no length.
    DegeneratePerimeter { id: u32 },
}

impl From<MarkerGeometryError> for FallbackReason {
    fn from(err: MarkerGeometryError) -> Self {
        match err {
            MarkerGeometryError::InvalidMarkerGeometry { id, corners } => {
                Self::InvalidMarkerGeometry { id, corners }
            }
            MarkerGeometryError::DegeneratePerimeter { id } => Self::DegeneratePerimeter { id },
        }
    }
}

/// Where the scale of a [`Calibration`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleSource {
    Marker { id: u32, perimeter_px: f64 },
    Fallback(FallbackReason),
}

/// Outcome of calibrating one image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub scale: ScaleFactor,
    pub source: ScaleSource,
}

impl Calibration {
    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ScaleSource::Fallback(_))
    }
}

/// Closed perimeter (px) of a 4-corner marker, wrap-around edge included.
pub fn marker_perimeter(marker: &DetectedMarker) -> Result<f64, MarkerGeometryError> {
    let quad = marker.quad()?;
    let perimeter = closed_perimeter(&quad);
    if !(perimeter.is_finite() && perimeter > 0.0) {
        return Err(MarkerGeometryError::DegeneratePerimeter { id: marker.id });
    }
    Ok(perimeter)
}

/// Turns marker detections into a pixels-per-unit scale.
#[derive(Clone, Debug)]
pub struct ScaleCalibrator {
    params: CalibrationParams,
    fallback: ScaleFactor,
}

impl ScaleCalibrator {
    pub fn new(params: CalibrationParams) -> Result<Self, CalibrationParamsError> {
        params.validate()?;
        let fallback = ScaleFactor::new(params.fallback_pixels_per_unit).ok_or(
            CalibrationParamsError::FallbackScale(params.fallback_pixels_per_unit),
        )?;
        Ok(Self { params, fallback })
    }

    pub fn params(&self) -> &CalibrationParams {
        &self.params
    }

    /// The scale returned whenever calibration cannot use a marker.
    pub fn fallback(&self) -> ScaleFactor {
        self.fallback
    }

    /// Compute the scale for one image.
    ///
    /// Never fails: every problem with the detections maps to the fallback
    /// scale and is reported through [`Calibration::source`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip_all, fields(markers = markers.len()))
    )]
    pub fn calibrate(&self, markers: &MarkerDetection) -> Calibration {
        if let Some(dict) = markers.dictionary.as_deref() {
            if dict != self.params.marker_dictionary {
                warn!(
                    "marker detections use dictionary {dict}, calibration expects {}",
                    self.params.marker_dictionary
                );
            }
        }
        if markers.len() > 1 {
            debug!(
                "{} markers detected, selecting one by {:?}",
                markers.len(),
                self.params.selection
            );
        }

        let Some(marker) = markers.select(self.params.selection) else {
            info!(
                "no calibration marker found; using fallback scale {}",
                self.fallback
            );
            return self.fallback_with(FallbackReason::NoMarkerFound);
        };

        let perimeter_px = match marker_perimeter(marker) {
            Ok(p) => p,
            Err(err) => {
                warn!("{err}; using fallback scale {}", self.fallback);
                return self.fallback_with(err.into());
            }
        };

        match ScaleFactor::new(perimeter_px / self.params.known_perimeter) {
            Some(scale) => {
                info!(
                    "calibrated from marker {}: perimeter {:.2} px -> {}",
                    marker.id, perimeter_px, scale
                );
                Calibration {
                    scale,
                    source: ScaleSource::Marker {
                        id: marker.id,
                        perimeter_px,
                    },
                }
            }
            None => {
                warn!(
                    "marker {} yields an unusable scale; using fallback scale {}",
                    marker.id, self.fallback
                );
                self.fallback_with(FallbackReason::DegeneratePerimeter { id: marker.id })
            }
        }
    }

    fn fallback_with(&self, reason: FallbackReason) -> Calibration {
        Calibration {
            scale: self.fallback,
            source: ScaleSource::Fallback(reason),
        }
    }
}
