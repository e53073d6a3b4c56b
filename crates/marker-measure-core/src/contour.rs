use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A point in pixel space.
pub type Point2D = Point2<f32>;

/// Closed polygonal approximation of a detected boundary.
///
/// The last point connects back to the first; the closing edge is implicit
/// and must not be repeated in `points`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2D>,
}

impl Contour {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    /// Build a contour from `[x, y]` pairs.
    pub fn from_xy(xy: &[[f32; 2]]) -> Self {
        Self {
            points: xy.iter().map(|&[x, y]| Point2::new(x, y)).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed area in px² (absolute shoelace value).
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Length of the closed boundary in px.
    pub fn perimeter(&self) -> f64 {
        closed_perimeter(&self.points)
    }
}

impl From<Vec<Point2D>> for Contour {
    fn from(points: Vec<Point2D>) -> Self {
        Self::new(points)
    }
}

/// Signed shoelace area; positive for counter-clockwise order in a y-up frame.
///
/// Coordinates are shifted to the first vertex before accumulation to keep
/// the cross products small for contours far from the image origin.
pub fn signed_polygon_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let ox = points[0].x as f64;
    let oy = points[0].y as f64;

    let mut acc = 0.0_f64;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        let (ax, ay) = (a.x as f64 - ox, a.y as f64 - oy);
        let (bx, by) = (b.x as f64 - ox, b.y as f64 - oy);
        acc += ax * by - bx * ay;
    }
    0.5 * acc
}

/// Absolute enclosed area of a closed polygon (shoelace formula).
pub fn polygon_area(points: &[Point2D]) -> f64 {
    signed_polygon_area(points).abs()
}

/// Sum of Euclidean edge lengths, including the wrap-around edge.
pub fn closed_perimeter(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            let dx = b.x as f64 - a.x as f64;
            let dy = b.y as f64 - a.y as f64;
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rectangle_area_is_orientation_independent() {
        let cw = Contour::from_xy(&[[0.0, 0.0], [0.0, 50.0], [200.0, 50.0], [200.0, 0.0]]);
        let mut ccw = cw.clone();
        ccw.points.reverse();

        assert_relative_eq!(cw.area(), 10_000.0);
        assert_relative_eq!(ccw.area(), 10_000.0);
        assert_relative_eq!(signed_polygon_area(&cw.points), -signed_polygon_area(&ccw.points));
    }

    #[test]
    fn triangle_area_far_from_origin() {
        let tri = Contour::from_xy(&[[4000.0, 3000.0], [4050.0, 3000.0], [4000.0, 3020.0]]);
        assert_relative_eq!(tri.area(), 500.0, epsilon = 1e-6);
    }

    #[test]
    fn fewer_than_three_points_has_no_area() {
        let seg = Contour::from_xy(&[[0.0, 0.0], [10.0, 10.0]]);
        assert_eq!(seg.area(), 0.0);
    }

    #[test]
    fn perimeter_includes_closing_edge() {
        let square = Contour::from_xy(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);
        assert_relative_eq!(square.perimeter(), 400.0);

        let seg = Contour::from_xy(&[[0.0, 0.0], [3.0, 4.0]]);
        assert_relative_eq!(seg.perimeter(), 10.0);
    }

    #[test]
    fn contour_serializes_as_point_arrays() {
        let c = Contour::from_xy(&[[1.0, 2.0], [3.0, 4.0]]);
        let json = serde_json::to_string(&c).expect("serialize");
        assert_eq!(json, r#"{"points":[[1.0,2.0],[3.0,4.0]]}"#);
        let back: Contour = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, c);
    }
}
