//! Object measurement from contours and a calibrated scale.
//!
//! For every contour, in input order:
//! 1. skip it when it has fewer than 3 points (warning) or encloses less than
//!    [`MeasureParams::min_contour_area`] px² (not an error),
//! 2. fit the minimum-area oriented bounding box,
//! 3. assign canonical corner roles ([`CornerOrdering`]),
//! 4. convert `|tr - tl|` and `|bl - tl|` to physical units,
//! 5. compute the area-weighted centroid (zero-area contours are skipped).
//!
//! Contours are independent; a bad contour never affects the others.
//!
//! ## Quickstart
//!
//! ```
//! use marker_measure_core::Contour;
//! use marker_measure_objects::{MeasureParams, ObjectMeasurer};
//! use marker_measure_scale::ScaleFactor;
//!
//! let scale = ScaleFactor::new(100.0).unwrap();
//! let measurer = ObjectMeasurer::new(MeasureParams::default(), scale).unwrap();
//! let contours = vec![Contour::from_xy(&[[0.0, 0.0], [0.0, 50.0], [200.0, 50.0], [200.0, 0.0]])];
//!
//! let results: Vec<_> = measurer.measure(&contours).collect();
//! assert_eq!(results.len(), 1);
//! assert!((results[0].width - 2.0).abs() < 1e-4);
//! assert!((results[0].height - 0.5).abs() < 1e-4);
//! ```

mod error;
mod measurer;
mod params;
mod result;

pub use error::{ContourError, MeasureParamsError};
pub use marker_measure_core::CornerOrdering;
pub use measurer::{MeasureStats, Measurements, ObjectMeasurer};
pub use params::MeasureParams;
pub use result::MeasurementResult;
