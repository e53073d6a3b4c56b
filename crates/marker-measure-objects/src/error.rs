/// Invalid measurement configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MeasureParamsError {
    #[error("minimum contour area must be finite and >= 0 (got {0})")]
    MinContourArea(f64),
}

/// A contour that cannot be measured. The contour is skipped; others are not affected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContourError {
    #[error("contour {index} has {points} points, at least 3 are required")]
    MalformedContour { index: usize, points: usize },
    #[error("contour {index} has zero area, centroid is undefined")]
    DegenerateContour { index: usize },
}
