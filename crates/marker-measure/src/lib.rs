//! High-level facade crate for the `marker-measure-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry core, the scale calibrator and the object measurer,
//! - (feature `image`) adapters over `image`/`imageproc` for the stages that
//!   are delegated to an image-processing library: decoding, grayscale,
//!   blur, Canny edges, morphology and contour extraction,
//! - an end-to-end pipeline, a JSON config and report, and overlay rendering,
//! - (feature `cli`) the `marker-measure` command-line tool.
//!
//! Fiducial-marker detection is not performed here. Detections come from an
//! external detector, usually as a JSON file (see [`scale::MarkerDetection`]);
//! without them the calibrator falls back to a configured scale.
//!
//! ## Quickstart
//!
//! ```no_run
//! use marker_measure::pipeline::{load_image, measure_gray};
//! use marker_measure::{MarkerDetection, PipelineParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = load_image("desk.jpg")?.to_luma8();
//! let markers = MarkerDetection::load_json("desk_markers.json")?;
//! let run = measure_gray(&img, &markers, &PipelineParams::default())?;
//! for obj in &run.results {
//!     println!("{:.2} x {:.2}", obj.width, obj.height);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `marker_measure::core`: contours, moments, hull, oriented boxes, corner ordering.
//! - `marker_measure::scale`: marker detections and scale calibration.
//! - `marker_measure::objects`: per-contour measurement.
//! - `marker_measure::pipeline`: calibration + measurement over one image.
//! - `marker_measure::report`: JSON report and human-readable lines.

pub use marker_measure_core as core;
pub use marker_measure_objects as objects;
pub use marker_measure_scale as scale;

pub use marker_measure_core::{Contour, CornerOrdering, OrderedCorners, OrientedBox};
pub use marker_measure_objects::{MeasureParams, MeasurementResult, ObjectMeasurer};
pub use marker_measure_scale::{
    Calibration, CalibrationParams, DetectedMarker, MarkerDetection, ScaleCalibrator, ScaleFactor,
};

mod config;
pub mod pipeline;
pub mod report;

pub use config::{MeasureConfig, MeasureIoError, PipelineParams, PreprocessParams, PreprocessParamsError};

#[cfg(feature = "image")]
pub mod extract;
#[cfg(feature = "image")]
pub mod preprocess;
#[cfg(feature = "image")]
pub mod render;
