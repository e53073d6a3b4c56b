/// Invalid calibration configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationParamsError {
    #[error("known marker perimeter must be finite and > 0 (got {0})")]
    KnownPerimeter(f64),
    #[error("fallback pixels-per-unit must be finite and > 0 (got {0})")]
    FallbackScale(f64),
}

/// A detected marker that cannot be used as a calibration reference.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerGeometryError {
    #[error("marker {id} has {corners} corners, expected 4")]
    InvalidMarkerGeometry { id: u32, corners: usize },
    #[error("marker {id} has a zero or non-finite perimeter")]
    DegeneratePerimeter { id: u32 },
}

/// A scale factor that is zero, negative or not finite.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
#[error("scale factor must be finite and > 0 (got {0})")]
pub struct InvalidScaleFactor(pub f64);
