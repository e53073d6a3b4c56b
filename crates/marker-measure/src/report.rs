//! Serializable run report and the human-readable per-object lines.

use crate::pipeline::MeasurementRun;
use crate::{MeasureConfig, MeasureIoError};
use marker_measure_objects::{MeasureStats, MeasurementResult};
use marker_measure_scale::Calibration;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasurementReport {
    pub image_path: String,
    #[serde(default)]
    pub markers_path: Option<String>,
    pub unit_label: String,
    pub calibration: Calibration,
    pub num_contours: usize,
    pub stats: MeasureStats,
    pub objects: Vec<MeasurementResult>,
}

impl MeasurementReport {
    pub fn new(config: &MeasureConfig, run: MeasurementRun) -> Self {
        Self {
            image_path: config.image_path.clone(),
            markers_path: config.markers_path.clone(),
            unit_label: config.unit_label.clone(),
            calibration: run.calibration,
            num_contours: run.num_contours,
            stats: run.stats,
            objects: run.results,
        }
    }

    /// One line per measured object, in contour order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.objects
            .iter()
            .map(|obj| format_object_line(obj, &self.unit_label))
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

/// `Object - Width: 2.00 inch, Height: 0.50 inch`
pub fn format_object_line(result: &MeasurementResult, unit_label: &str) -> String {
    format!(
        "Object - Width: {:.2} {unit_label}, Height: {:.2} {unit_label}",
        result.width, result.height
    )
}
