//! Core geometric types and utilities for marker-calibrated object measurement.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any image type, edge detector or fiducial-marker detector;
//! contours and marker corners arrive here as plain point sequences in
//! pixel space.
//!
//! Provided building blocks:
//! - [`Contour`] with shoelace area and closed perimeter,
//! - first-order [`Moments`] and the area-weighted centroid,
//! - [`convex_hull`] and the minimum-area [`OrientedBox`] ([`min_area_rect`]),
//! - canonical corner ordering ([`order_corners`], [`CornerOrdering`]),
//! - a minimal stderr logger ([`init_with_level`]).

mod contour;
mod corners;
mod hull;
mod logger;
mod min_rect;
mod moments;

pub use contour::{closed_perimeter, polygon_area, signed_polygon_area, Contour, Point2D};
pub use corners::{order_corners, CornerOrdering, OrderedCorners};
pub use hull::convex_hull;
pub use min_rect::{min_area_rect, OrientedBox};
pub use moments::{polygon_moments, Moments};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
