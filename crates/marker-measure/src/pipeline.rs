//! One measurement run: calibrate the scale, then measure every contour.

use crate::{PipelineParams, PreprocessParamsError};
use log::info;
use marker_measure_core::Contour;
use marker_measure_objects::{MeasureParamsError, MeasureStats, MeasurementResult, ObjectMeasurer};
use marker_measure_scale::{Calibration, CalibrationParamsError, MarkerDetection, ScaleCalibrator};
use serde::{Deserialize, Serialize};

#[cfg(feature = "image")]
use image::{DynamicImage, GrayImage, ImageReader};
#[cfg(feature = "image")]
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[cfg(feature = "image")]
    #[error("failed to load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Preprocess(#[from] PreprocessParamsError),
    #[error(transparent)]
    Calibration(#[from] CalibrationParamsError),
    #[error(transparent)]
    Measure(#[from] MeasureParamsError),
}

/// Everything one run produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasurementRun {
    pub calibration: Calibration,
    /// Contours handed to the measurer, before any filtering.
    pub num_contours: usize,
    /// Measured objects in contour order.
    pub results: Vec<MeasurementResult>,
    pub stats: MeasureStats,
}

/// Decode an image file. Failure here is fatal to a run.
#[cfg(feature = "image")]
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, PipelineError> {
    let path = path.as_ref();
    let wrap = |source: image::ImageError| PipelineError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(|e| wrap(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| wrap(image::ImageError::IoError(e)))?
        .decode()
        .map_err(wrap)
}

/// Calibrate from `markers` and measure already-extracted contours.
///
/// Parameters are validated before any work is done.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(contours = contours.len(), markers = markers.len()))
)]
pub fn measure_contours(
    contours: &[Contour],
    markers: &MarkerDetection,
    params: &PipelineParams,
) -> Result<MeasurementRun, PipelineError> {
    params.measure.validate()?;
    let calibrator = ScaleCalibrator::new(params.calibration.clone())?;

    let calibration = calibrator.calibrate(markers);
    let measurer = ObjectMeasurer::new(params.measure.clone(), calibration.scale)?;

    #[cfg(feature = "rayon")]
    let (results, stats) = measurer.measure_par(contours);
    #[cfg(not(feature = "rayon"))]
    let (results, stats) = {
        let mut it = measurer.measure(contours);
        let results: Vec<MeasurementResult> = it.by_ref().collect();
        (results, it.stats())
    };

    info!(
        "measured {} of {} contours at {}",
        stats.measured,
        contours.len(),
        calibration.scale
    );

    Ok(MeasurementRun {
        calibration,
        num_contours: contours.len(),
        results,
        stats,
    })
}

/// Full run on a grayscale image: edge map, external contours, calibration, measurement.
#[cfg(feature = "image")]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(w = gray.width(), h = gray.height()))
)]
pub fn measure_gray(
    gray: &GrayImage,
    markers: &MarkerDetection,
    params: &PipelineParams,
) -> Result<MeasurementRun, PipelineError> {
    params.preprocess.validate()?;
    params.measure.validate()?;
    params.calibration.validate()?;

    let edges = crate::preprocess::edge_map(gray, &params.preprocess);
    let contours = crate::extract::external_contours(&edges);
    measure_contours(&contours, markers, params)
}
