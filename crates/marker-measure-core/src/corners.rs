//! Canonical `(top-left, top-right, bottom-right, bottom-left)` corner layout.

use crate::Point2D;
use serde::{Deserialize, Serialize};

/// Two corners whose `x + y` differ by less than this are treated as tied.
const SUM_TIE_EPS: f32 = 1e-3;

/// How the four corners of a bounding box are assigned canonical roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrdering {
    /// Clockwise on screen around the box center, starting at the corner
    /// with the smallest `x + y` (ties: smaller `y`). Valid at any rotation.
    #[default]
    Geometric,
    /// Ascending `x + y`, assigned in that order to top-left, top-right,
    /// bottom-right, bottom-left. Only meaningful for boxes close to
    /// axis-aligned; near 45° two corners tie or swap.
    CoordinateSum,
}

/// Box corners in canonical roles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderedCorners {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_right: Point2D,
    pub bottom_left: Point2D,
}

impl OrderedCorners {
    /// `|top_right - top_left|` in px.
    pub fn width_px(&self) -> f64 {
        distance(self.top_right, self.top_left)
    }

    /// `|bottom_left - top_left|` in px.
    pub fn height_px(&self) -> f64 {
        distance(self.bottom_left, self.top_left)
    }

    pub fn to_array(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    fn from_array([top_left, top_right, bottom_right, bottom_left]: [Point2D; 4]) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}

#[inline]
fn distance(a: Point2D, b: Point2D) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Assign canonical roles to the four corners of a box.
pub fn order_corners(corners: &[Point2D; 4], ordering: CornerOrdering) -> OrderedCorners {
    match ordering {
        CornerOrdering::Geometric => order_clockwise(corners),
        CornerOrdering::CoordinateSum => order_by_coordinate_sum(corners),
    }
}

fn order_by_coordinate_sum(corners: &[Point2D; 4]) -> OrderedCorners {
    let mut sorted = *corners;
    // stable: tied sums keep their input order
    sorted.sort_by(|a, b| (a.x + a.y).total_cmp(&(b.x + b.y)));
    OrderedCorners::from_array(sorted)
}

fn order_clockwise(corners: &[Point2D; 4]) -> OrderedCorners {
    let cx = corners.iter().map(|p| p.x as f64).sum::<f64>() / 4.0;
    let cy = corners.iter().map(|p| p.y as f64).sum::<f64>() / 4.0;

    // With y pointing down, increasing atan2 sweeps clockwise on screen.
    let mut by_angle = *corners;
    by_angle.sort_by(|a, b| {
        let ta = (a.y as f64 - cy).atan2(a.x as f64 - cx);
        let tb = (b.y as f64 - cy).atan2(b.x as f64 - cx);
        ta.total_cmp(&tb)
    });

    let start = (1..4).fold(0, |best, i| {
        let (p, q) = (by_angle[i], by_angle[best]);
        let (sp, sq) = (p.x + p.y, q.x + q.y);
        if sp < sq - SUM_TIE_EPS || ((sp - sq).abs() <= SUM_TIE_EPS && p.y < q.y) {
            i
        } else {
            best
        }
    });
    by_angle.rotate_left(start);
    OrderedCorners::from_array(by_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    fn pts(xy: [[f32; 2]; 4]) -> [Point2D; 4] {
        xy.map(|[x, y]| Point2::new(x, y))
    }

    #[test]
    fn geometric_ordering_axis_aligned() {
        let corners = pts([[200.0, 50.0], [0.0, 0.0], [0.0, 50.0], [200.0, 0.0]]);
        let o = order_corners(&corners, CornerOrdering::Geometric);
        assert_eq!(o.top_left, Point2::new(0.0, 0.0));
        assert_eq!(o.top_right, Point2::new(200.0, 0.0));
        assert_eq!(o.bottom_right, Point2::new(200.0, 50.0));
        assert_eq!(o.bottom_left, Point2::new(0.0, 50.0));
        assert_relative_eq!(o.width_px(), 200.0);
        assert_relative_eq!(o.height_px(), 50.0);
    }

    #[test]
    fn geometric_ordering_is_input_order_independent() {
        let base = [[10.0, 10.0], [110.0, 20.0], [105.0, 70.0], [5.0, 60.0]];
        let expected = order_corners(&pts(base), CornerOrdering::Geometric);
        for shift in 1..4 {
            let mut rotated = base;
            rotated.rotate_left(shift);
            let mut reversed = rotated;
            reversed.reverse();
            assert_eq!(order_corners(&pts(rotated), CornerOrdering::Geometric), expected);
            assert_eq!(order_corners(&pts(reversed), CornerOrdering::Geometric), expected);
        }
        assert_eq!(expected.top_left, Point2::new(10.0, 10.0));
        assert_eq!(expected.top_right, Point2::new(110.0, 20.0));
    }

    #[test]
    fn geometric_ordering_breaks_45_degree_tie_by_y() {
        let diamond = pts([[0.0, 50.0], [50.0, 100.0], [100.0, 50.0], [50.0, 0.0]]);
        let o = order_corners(&diamond, CornerOrdering::Geometric);
        assert_eq!(o.top_left, Point2::new(50.0, 0.0));
        assert_eq!(o.top_right, Point2::new(100.0, 50.0));
        assert_eq!(o.bottom_right, Point2::new(50.0, 100.0));
        assert_eq!(o.bottom_left, Point2::new(0.0, 50.0));
    }

    #[test]
    fn coordinate_sum_ordering_reproduces_heuristic() {
        // The third-smallest sum goes to bottom-right even when it is
        // geometrically the top-right corner.
        let corners = pts([[0.0, 0.0], [0.0, 50.0], [200.0, 50.0], [200.0, 0.0]]);
        let o = order_corners(&corners, CornerOrdering::CoordinateSum);
        assert_eq!(o.top_left, Point2::new(0.0, 0.0));
        assert_eq!(o.top_right, Point2::new(0.0, 50.0));
        assert_eq!(o.bottom_right, Point2::new(200.0, 0.0));
        assert_eq!(o.bottom_left, Point2::new(200.0, 50.0));
        assert_relative_eq!(o.width_px(), 50.0);
    }

    #[test]
    fn coordinate_sum_height_is_diagonal_for_tall_boxes() {
        let corners = pts([[10.0, 10.0], [60.0, 10.0], [60.0, 110.0], [10.0, 110.0]]);
        let g = order_corners(&corners, CornerOrdering::Geometric);
        let s = order_corners(&corners, CornerOrdering::CoordinateSum);
        assert_eq!(g.top_left, s.top_left);
        assert_eq!(g.top_right, s.top_right);
        assert_relative_eq!(s.width_px(), 50.0);
        assert_relative_eq!(g.height_px(), 100.0);
        assert_relative_eq!(s.height_px(), (50.0_f64 * 50.0 + 100.0 * 100.0).sqrt());
    }
}
