use marker_measure_objects::MeasureParams;
use marker_measure_scale::CalibrationParams;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum MeasureIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PreprocessParamsError {
    #[error("blur kernel size must be odd and >= 1, got {0}")]
    BlurKernelSize(u32),
    #[error("canny thresholds must satisfy 0 <= low <= high, got low {low}, high {high}")]
    CannyThresholds { low: f32, high: f32 },
}

/// Edge-map preparation before contour extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessParams {
    /// Gaussian kernel size in pixels (odd). `1` disables blurring.
    pub blur_kernel_size: u32,
    pub canny_low_threshold: f32,
    pub canny_high_threshold: f32,
    /// Number of 3x3 dilations, followed by as many erosions, that close
    /// small gaps in the edge map.
    pub morphology_iterations: u32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            blur_kernel_size: 7,
            canny_low_threshold: 50.0,
            canny_high_threshold: 100.0,
            morphology_iterations: 1,
        }
    }
}

impl PreprocessParams {
    pub fn validate(&self) -> Result<(), PreprocessParamsError> {
        if self.blur_kernel_size == 0 || self.blur_kernel_size % 2 == 0 {
            return Err(PreprocessParamsError::BlurKernelSize(self.blur_kernel_size));
        }
        let (low, high) = (self.canny_low_threshold, self.canny_high_threshold);
        if !(low.is_finite() && high.is_finite() && low >= 0.0 && low <= high) {
            return Err(PreprocessParamsError::CannyThresholds { low, high });
        }
        Ok(())
    }

    /// Gaussian sigma derived from the kernel size, or `None` when blurring is off.
    ///
    /// Uses `0.3 * ((k - 1) / 2 - 1) + 0.8`, the usual rule for picking sigma
    /// from an odd kernel size.
    pub fn blur_sigma(&self) -> Option<f32> {
        if self.blur_kernel_size <= 1 {
            return None;
        }
        let k = self.blur_kernel_size as f32;
        Some(0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8)
    }
}

/// All tunables of one measurement run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineParams {
    #[serde(default)]
    pub preprocess: PreprocessParams,
    #[serde(default)]
    pub calibration: CalibrationParams,
    #[serde(default)]
    pub measure: MeasureParams,
}

/// On-disk job description used by the `marker-measure` tool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    pub image_path: String,
    /// Marker detections from an external detector (JSON).
    #[serde(default)]
    pub markers_path: Option<String>,
    /// Where to write the JSON report.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to write the annotated image.
    #[serde(default)]
    pub annotated_path: Option<String>,
    /// Printed after every measurement.
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
    #[serde(flatten)]
    pub params: PipelineParams,
}

fn default_unit_label() -> String {
    "inch".to_string()
}

impl MeasureConfig {
    /// Default job for a single image.
    pub fn for_image(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            markers_path: None,
            output_path: None,
            annotated_path: None,
            unit_label: default_unit_label(),
            params: PipelineParams::default(),
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MeasureIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MeasureIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marker_measure_core::CornerOrdering;

    #[test]
    fn minimal_config_gets_defaults() {
        let cfg: MeasureConfig =
            serde_json::from_str(r#"{ "image_path": "desk.jpg" }"#).expect("parse");
        assert_eq!(cfg, MeasureConfig::for_image("desk.jpg"));
        assert_eq!(cfg.unit_label, "inch");
        assert_eq!(cfg.params.calibration.known_perimeter, 4.5);
        assert_eq!(cfg.params.calibration.fallback_pixels_per_unit, 66.0);
        assert_eq!(cfg.params.measure.min_contour_area, 2000.0);
        assert_eq!(cfg.params.preprocess.blur_kernel_size, 7);
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let cfg: MeasureConfig = serde_json::from_str(
            r#"{
                "image_path": "desk.jpg",
                "unit_label": "cm",
                "preprocess": { "blur_kernel_size": 5 },
                "measure": { "min_contour_area": 500.0, "corner_ordering": "coordinate_sum" }
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.unit_label, "cm");
        assert_eq!(cfg.params.preprocess.blur_kernel_size, 5);
        assert_eq!(cfg.params.preprocess.canny_high_threshold, 100.0);
        assert_eq!(cfg.params.measure.min_contour_area, 500.0);
        assert_eq!(cfg.params.measure.corner_ordering, CornerOrdering::CoordinateSum);
    }

    #[test]
    fn single_field_sections_keep_other_defaults() {
        let cfg: MeasureConfig = serde_json::from_str(
            r#"{
                "image_path": "desk.jpg",
                "calibration": { "known_perimeter": 8.0 },
                "measure": { "corner_ordering": "coordinate_sum" }
            }"#,
        )
        .expect("parse");
        assert_eq!(cfg.params.calibration.known_perimeter, 8.0);
        assert_eq!(cfg.params.calibration.fallback_pixels_per_unit, 66.0);
        assert_eq!(cfg.params.calibration.marker_dictionary, "DICT_6X6_250");
        assert_eq!(cfg.params.measure.min_contour_area, 2000.0);
        assert_eq!(cfg.params.measure.corner_ordering, CornerOrdering::CoordinateSum);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("job.json");
        let mut cfg = MeasureConfig::for_image("a.png");
        cfg.markers_path = Some("a_markers.json".into());
        cfg.params.calibration.known_perimeter = 20.0;
        cfg.write_json(&path).expect("write");
        assert_eq!(MeasureConfig::load_json(&path).expect("load"), cfg);
    }

    #[test]
    fn blur_sigma_follows_kernel_size() {
        let mut p = PreprocessParams::default();
        let sigma = p.blur_sigma().expect("sigma");
        assert!((sigma - 1.4).abs() < 1e-6);
        p.blur_kernel_size = 3;
        assert!((p.blur_sigma().expect("sigma") - 0.8).abs() < 1e-6);
        p.blur_kernel_size = 1;
        assert!(p.blur_sigma().is_none());
    }

    #[test]
    fn preprocess_validation() {
        assert!(PreprocessParams::default().validate().is_ok());
        let even = PreprocessParams {
            blur_kernel_size: 4,
            ..Default::default()
        };
        assert_eq!(even.validate(), Err(PreprocessParamsError::BlurKernelSize(4)));
        let swapped = PreprocessParams {
            canny_low_threshold: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            swapped.validate(),
            Err(PreprocessParamsError::CannyThresholds { .. })
        ));
    }
}
