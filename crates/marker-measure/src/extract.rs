//! Outer-contour extraction from a binary edge map.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;
use marker_measure_core::{Contour, Point2D};

/// Outermost borders of all foreground regions, one contour per region.
///
/// Hole borders and borders nested inside another region are dropped.
/// Straight runs are collapsed to their end points.
#[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
pub fn external_contours(edges: &GrayImage) -> Vec<Contour> {
    let contours: Vec<Contour> = find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| collapse_straight_runs(&c.points))
        .collect();
    log::debug!("extracted {} external contours", contours.len());
    contours
}

/// Drop every vertex that sits in the middle of a straight run of a closed chain.
pub fn collapse_straight_runs(points: &[Point<i32>]) -> Contour {
    let n = points.len();
    let to_contour = |pts: &[Point<i32>]| {
        Contour::new(
            pts.iter()
                .map(|p| Point2D::new(p.x as f32, p.y as f32))
                .collect(),
        )
    };
    if n < 3 {
        return to_contour(points);
    }

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            let (ax, ay) = (cur.x - prev.x, cur.y - prev.y);
            let (bx, by) = (next.x - cur.x, next.y - cur.y);
            let cross = ax * by - ay * bx;
            let dot = ax * bx + ay * by;
            cross != 0 || dot <= 0
        })
        .map(|i| points[i])
        .collect();

    if kept.len() < 3 {
        to_contour(points)
    } else {
        to_contour(&kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
    use imageproc::rect::Rect;

    fn chain(xy: &[(i32, i32)]) -> Vec<Point<i32>> {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn square_chain_collapses_to_corners() {
        let mut xy = Vec::new();
        for x in 0..4 {
            xy.push((x, 0));
        }
        for y in 0..4 {
            xy.push((4, y));
        }
        for x in (1..=4).rev() {
            xy.push((x, 4));
        }
        for y in (1..=4).rev() {
            xy.push((0, y));
        }
        let c = collapse_straight_runs(&chain(&xy));
        assert_eq!(c.len(), 4);
        assert_eq!(c.area(), 16.0);
    }

    #[test]
    fn diagonal_runs_collapse_to_their_ends() {
        // Diamond traced with 8-connected diagonal steps.
        let mut xy = Vec::new();
        for k in 0..3 {
            xy.push((3 + k, k));
        }
        for k in 0..3 {
            xy.push((6 - k, 3 + k));
        }
        for k in 0..3 {
            xy.push((3 - k, 6 - k));
        }
        for k in 0..3 {
            xy.push((k, 3 - k));
        }
        let c = collapse_straight_runs(&chain(&xy));
        assert_eq!(
            c.points,
            vec![
                Point2D::new(3.0, 0.0),
                Point2D::new(6.0, 3.0),
                Point2D::new(3.0, 6.0),
                Point2D::new(0.0, 3.0),
            ]
        );
        assert_eq!(c.area(), 18.0);
    }

    #[test]
    fn tiny_chains_pass_through() {
        let c = collapse_straight_runs(&chain(&[(3, 3)]));
        assert_eq!(c.points, vec![Point2D::new(3.0, 3.0)]);
    }

    #[test]
    fn flat_line_chain_is_left_unchanged() {
        // Border of a one-pixel-wide horizontal line, traced out and back.
        let pts = chain(&[(0, 0), (1, 0), (2, 0), (3, 0), (2, 0), (1, 0)]);
        let c = collapse_straight_runs(&pts);
        assert_eq!(c.len(), 6);
        assert_eq!(c.area(), 0.0);
    }

    #[test]
    fn nested_regions_yield_only_the_outer_border() {
        let mut img = GrayImage::new(80, 80);
        draw_hollow_rect_mut(&mut img, Rect::at(10, 10).of_size(60, 60), Luma([255]));
        draw_filled_rect_mut(&mut img, Rect::at(30, 30).of_size(10, 10), Luma([255]));
        let contours = external_contours(&img);
        assert_eq!(contours.len(), 1);
        assert!((contours[0].area() - 59.0 * 59.0).abs() < 1e-6);
    }

    #[test]
    fn separate_regions_each_get_a_contour() {
        let mut img = GrayImage::new(100, 50);
        draw_filled_rect_mut(&mut img, Rect::at(5, 5).of_size(20, 20), Luma([255]));
        draw_filled_rect_mut(&mut img, Rect::at(50, 10).of_size(30, 15), Luma([255]));
        let contours = external_contours(&img);
        assert_eq!(contours.len(), 2);
        for c in &contours {
            assert_eq!(c.len(), 4);
        }
    }
}
