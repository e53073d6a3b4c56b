//! Edge-map preparation on top of `imageproc`.

use crate::PreprocessParams;
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::{dilate, erode};

/// Blur, Canny, then close gaps with `morphology_iterations` dilations and
/// the same number of erosions (3x3 square element).
///
/// The result is a binary image: edge pixels are `255`, everything else `0`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "debug", skip_all, fields(w = gray.width(), h = gray.height()))
)]
pub fn edge_map(gray: &GrayImage, params: &PreprocessParams) -> GrayImage {
    let blurred = match params.blur_sigma() {
        Some(sigma) => gaussian_blur_f32(gray, sigma),
        None => gray.clone(),
    };
    let mut edges = canny(
        &blurred,
        params.canny_low_threshold,
        params.canny_high_threshold,
    );
    for _ in 0..params.morphology_iterations {
        edges = dilate(&edges, Norm::LInf, 1);
    }
    for _ in 0..params.morphology_iterations {
        edges = erode(&edges, Norm::LInf, 1);
    }
    edges
}
