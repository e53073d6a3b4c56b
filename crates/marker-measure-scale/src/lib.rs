//! Scale calibration from a detected fiducial marker.
//!
//! Marker *detection* happens elsewhere; this crate consumes its output
//! ([`MarkerDetection`]: ids plus corner sequences) and turns it into a single
//! strictly positive [`ScaleFactor`] (pixels per physical unit).
//!
//! Policy:
//! - one marker is selected deterministically ([`MarkerSelection`]),
//! - its closed corner perimeter in pixels is divided by the known physical
//!   perimeter ([`CalibrationParams::known_perimeter`]),
//! - no marker, a malformed marker (not exactly 4 corners) or a degenerate
//!   perimeter all fall back to [`CalibrationParams::fallback_pixels_per_unit`].
//!
//! ## Quickstart
//!
//! ```
//! use marker_measure_scale::{CalibrationParams, DetectedMarker, MarkerDetection, ScaleCalibrator};
//! use nalgebra::Point2;
//!
//! let calibrator = ScaleCalibrator::new(CalibrationParams::default()).unwrap();
//! let square = DetectedMarker::new(
//!     0,
//!     vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(100.0, 0.0),
//!         Point2::new(100.0, 100.0),
//!         Point2::new(0.0, 100.0),
//!     ],
//! );
//! let calibration = calibrator.calibrate(&MarkerDetection::from_markers(vec![square]));
//! assert!((calibration.scale.pixels_per_unit() - 400.0 / 4.5).abs() < 1e-9);
//! ```

mod calibrator;
mod detection;
mod error;
mod io;
mod params;
mod scale;

pub use calibrator::{marker_perimeter, Calibration, FallbackReason, ScaleCalibrator, ScaleSource};
pub use detection::{DetectedMarker, MarkerDetection};
pub use error::{CalibrationParamsError, InvalidScaleFactor, MarkerGeometryError};
pub use io::MarkerIoError;
pub use params::{CalibrationParams, MarkerSelection, DEFAULT_MARKER_DICTIONARY};
pub use scale::ScaleFactor;
