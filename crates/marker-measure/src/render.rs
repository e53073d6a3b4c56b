//! Overlay drawing for measured objects.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use marker_measure_objects::MeasurementResult;

pub const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const CENTROID_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
pub const CENTROID_RADIUS: i32 = 5;

/// Draw each object's oriented box outline and a filled dot at its centroid.
///
/// The outline follows the box's own traversal order; canonical corner roles
/// are not necessarily adjacent.
pub fn draw_measurements(canvas: &mut RgbImage, results: &[MeasurementResult]) {
    for obj in results {
        let corners = obj.bbox.corners;
        for (i, a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            draw_line_segment_mut(canvas, (a.x, a.y), (b.x, b.y), BOX_COLOR);
        }
        let c = obj.centroid;
        draw_filled_circle_mut(
            canvas,
            (c.x.round() as i32, c.y.round() as i32),
            CENTROID_RADIUS,
            CENTROID_COLOR,
        );
    }
}

/// RGB copy of `image` with the measurements drawn on top.
pub fn annotate(image: &DynamicImage, results: &[MeasurementResult]) -> RgbImage {
    let mut canvas = image.to_rgb8();
    draw_measurements(&mut canvas, results);
    canvas
}
