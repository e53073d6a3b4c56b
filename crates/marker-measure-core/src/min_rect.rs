//! Minimum-area oriented bounding rectangle.
//!
//! The optimal rectangle has one side collinear with a convex-hull edge, so
//! every hull edge is tried as the rectangle axis and the smallest area wins.
//! Hulls of contours are short, so the quadratic scan is fine.

use crate::{convex_hull, Point2D};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Oriented rectangle enclosing a point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub center: Point2D,
    /// Side length along the box axis `angle_deg`.
    pub width: f32,
    /// Side length perpendicular to the box axis.
    pub height: f32,
    /// Direction of the `width` side in degrees, image frame.
    pub angle_deg: f32,
    /// Corners in traversal order around the rectangle (not canonical).
    pub corners: [Point2D; 4],
}

impl OrientedBox {
    #[inline]
    pub fn area(&self) -> f64 {
        self.width as f64 * self.height as f64
    }
}

#[derive(Clone, Copy)]
struct Extent {
    axis: Vector2<f64>,
    min_u: f64,
    max_u: f64,
    min_v: f64,
    max_v: f64,
}

impl Extent {
    fn area(&self) -> f64 {
        (self.max_u - self.min_u) * (self.max_v - self.min_v)
    }
}

fn extent_along(hull: &[Point2<f64>], origin: Point2<f64>, axis: Vector2<f64>) -> Extent {
    let normal = Vector2::new(-axis.y, axis.x);
    let mut e = Extent {
        axis,
        min_u: f64::INFINITY,
        max_u: f64::NEG_INFINITY,
        min_v: f64::INFINITY,
        max_v: f64::NEG_INFINITY,
    };
    for p in hull {
        let d = p - origin;
        let u = d.dot(&axis);
        let v = d.dot(&normal);
        e.min_u = e.min_u.min(u);
        e.max_u = e.max_u.max(u);
        e.min_v = e.min_v.min(v);
        e.max_v = e.max_v.max(v);
    }
    e
}

/// Compute the minimum-area rectangle enclosing `points`.
///
/// Returns `None` for an empty input. Degenerate inputs (a single point or
/// collinear points) produce a zero-height box.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "trace", skip_all, fields(points = points.len()))
)]
pub fn min_area_rect(points: &[Point2D]) -> Option<OrientedBox> {
    let hull = convex_hull(points);
    let origin = *hull.first()?;

    let mut best: Option<Extent> = None;
    for i in 0..hull.len() {
        let edge = hull[(i + 1) % hull.len()] - hull[i];
        let len = edge.norm();
        if len <= f64::EPSILON {
            continue;
        }
        let e = extent_along(&hull, origin, edge / len);
        if best.is_none_or(|b| e.area() < b.area()) {
            best = Some(e);
        }
    }
    let best = best.unwrap_or_else(|| extent_along(&hull, origin, Vector2::x()));

    let normal = Vector2::new(-best.axis.y, best.axis.x);
    let at = |u: f64, v: f64| {
        let p = origin + best.axis * u + normal * v;
        Point2::new(p.x as f32, p.y as f32)
    };
    let corners = [
        at(best.min_u, best.min_v),
        at(best.max_u, best.min_v),
        at(best.max_u, best.max_v),
        at(best.min_u, best.max_v),
    ];

    Some(OrientedBox {
        center: at(
            0.5 * (best.min_u + best.max_u),
            0.5 * (best.min_v + best.max_v),
        ),
        width: (best.max_u - best.min_u) as f32,
        height: (best.max_v - best.min_v) as f32,
        angle_deg: best.axis.y.atan2(best.axis.x).to_degrees() as f32,
        corners,
    })
}
