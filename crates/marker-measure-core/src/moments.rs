//! First-order polygon moments via Green's theorem.

use crate::Point2D;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Below this |m00| (px²) the centroid is undefined.
const MIN_CENTROID_AREA: f64 = 1e-9;

/// Zeroth and first-order moments of a closed polygon.
///
/// Sign is normalized so that `m00 >= 0` regardless of vertex orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Area-weighted centroid `(m10 / m00, m01 / m00)`.
    ///
    /// Returns `None` for (numerically) zero-area polygons.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if !self.m00.is_finite() || self.m00.abs() < MIN_CENTROID_AREA {
            return None;
        }
        Some(Point2::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Compute polygon moments over the closed point sequence.
pub fn polygon_moments(points: &[Point2D]) -> Moments {
    let n = points.len();
    if n < 3 {
        return Moments::default();
    }

    // Accumulate relative to the first vertex, then shift back.
    let ox = points[0].x as f64;
    let oy = points[0].y as f64;

    let mut a00 = 0.0_f64;
    let mut a10 = 0.0_f64;
    let mut a01 = 0.0_f64;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        let (xi, yi) = (p.x as f64 - ox, p.y as f64 - oy);
        let (xj, yj) = (q.x as f64 - ox, q.y as f64 - oy);
        let cross = xi * yj - xj * yi;
        a00 += cross;
        a10 += cross * (xi + xj);
        a01 += cross * (yi + yj);
    }

    let mut m00 = a00 / 2.0;
    let mut m10 = a10 / 6.0;
    let mut m01 = a01 / 6.0;
    if m00 < 0.0 {
        m00 = -m00;
        m10 = -m10;
        m01 = -m01;
    }

    Moments {
        m00,
        m10: m10 + ox * m00,
        m01: m01 + oy * m00,
    }
}
