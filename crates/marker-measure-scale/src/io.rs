//! JSON exchange format for marker detections produced by an external detector.
//!
//! ```json
//! {
//!   "dictionary": "DICT_6X6_250",
//!   "markers": [{ "id": 23, "corners": [[412.0, 88.5], [498.2, 90.1], [496.7, 176.0], [410.3, 174.4]] }],
//!   "rejected": []
//! }
//! ```

use crate::MarkerDetection;
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum MarkerIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MarkerDetection {
    /// Load detections from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, MarkerIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write detections to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), MarkerIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
