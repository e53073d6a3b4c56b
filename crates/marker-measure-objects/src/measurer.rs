use std::iter::Enumerate;
use std::slice;

use log::{debug, warn};
use marker_measure_core::{min_area_rect, order_corners, polygon_moments, Contour};
use marker_measure_scale::ScaleFactor;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{ContourError, MeasureParams, MeasureParamsError, MeasurementResult};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Per-run counters of what happened to each contour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureStats {
    pub measured: usize,
    pub below_min_area: usize,
    pub malformed: usize,
    pub degenerate: usize,
}

impl MeasureStats {
    /// Log skipped contours, update counters and keep only real results.
    fn absorb(
        &mut self,
        outcome: Result<Option<MeasurementResult>, ContourError>,
    ) -> Option<MeasurementResult> {
        match outcome {
            Ok(Some(result)) => {
                self.measured += 1;
                Some(result)
            }
            Ok(None) => {
                self.below_min_area += 1;
                None
            }
            Err(err) => {
                match err {
                    ContourError::MalformedContour { .. } => self.malformed += 1,
                    ContourError::DegenerateContour { .. } => self.degenerate += 1,
                }
                warn!("skipping contour: {err}");
                None
            }
        }
    }
}

/// Measures contours against a fixed scale.
#[derive(Clone, Debug)]
pub struct ObjectMeasurer {
    params: MeasureParams,
    scale: ScaleFactor,
}

impl ObjectMeasurer {
    pub fn new(params: MeasureParams, scale: ScaleFactor) -> Result<Self, MeasureParamsError> {
        params.validate()?;
        Ok(Self { params, scale })
    }

    pub fn params(&self) -> &MeasureParams {
        &self.params
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Measure a single contour.
    ///
    /// `Ok(None)` means the contour is below the area threshold.
    pub fn measure_contour(
        &self,
        index: usize,
        contour: &Contour,
    ) -> Result<Option<MeasurementResult>, ContourError> {
        let malformed = ContourError::MalformedContour {
            index,
            points: contour.len(),
        };
        if contour.len() < 3 {
            return Err(malformed);
        }

        let area_px = contour.area();
        if area_px < self.params.min_contour_area {
            debug!(
                "contour {index}: area {area_px:.1} px² below {:.1}",
                self.params.min_contour_area
            );
            return Ok(None);
        }

        let bbox = min_area_rect(&contour.points).ok_or(malformed)?;
        let corners = order_corners(&bbox.corners, self.params.corner_ordering);
        let width_px = corners.width_px();
        let height_px = corners.height_px();

        // Independent of the area filter: the shoelace area and m00 may
        // disagree for near-zero polygons, and min_contour_area may be 0.
        let centroid = polygon_moments(&contour.points)
            .centroid()
            .ok_or(ContourError::DegenerateContour { index })?;

        Ok(Some(MeasurementResult {
            index,
            width: self.scale.to_units(width_px),
            height: self.scale.to_units(height_px),
            width_px,
            height_px,
            area_px,
            centroid: Point2::new(centroid.x as f32, centroid.y as f32),
            bbox,
            corners,
        }))
    }

    /// Lazily measure `contours`, preserving input order among qualifying contours.
    pub fn measure<'a>(&'a self, contours: &'a [Contour]) -> Measurements<'a> {
        Measurements {
            measurer: self,
            contours: contours.iter().enumerate(),
            stats: MeasureStats::default(),
        }
    }

    /// Measure contours on the rayon pool. Output order matches [`Self::measure`].
    #[cfg(feature = "rayon")]
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "info", skip_all, fields(contours = contours.len()))
    )]
    pub fn measure_par(&self, contours: &[Contour]) -> (Vec<MeasurementResult>, MeasureStats) {
        let outcomes: Vec<_> = contours
            .par_iter()
            .enumerate()
            .map(|(index, contour)| self.measure_contour(index, contour))
            .collect();

        let mut stats = MeasureStats::default();
        let results = outcomes
            .into_iter()
            .filter_map(|outcome| stats.absorb(outcome))
            .collect();
        (results, stats)
    }
}

/// Lazy sequence of [`MeasurementResult`]s; skipped contours are logged.
pub struct Measurements<'a> {
    measurer: &'a ObjectMeasurer,
    contours: Enumerate<slice::Iter<'a, Contour>>,
    stats: MeasureStats,
}

impl Measurements<'_> {
    /// Counters for the contours consumed so far.
    pub fn stats(&self) -> MeasureStats {
        self.stats
    }
}

impl Iterator for Measurements<'_> {
    type Item = MeasurementResult;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, contour) in self.contours.by_ref() {
            let outcome = self.measurer.measure_contour(index, contour);
            if let Some(result) = self.stats.absorb(outcome) {
                return Some(result);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.contours.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use marker_measure_core::CornerOrdering;

    fn measurer(ppu: f64, min_area: f64) -> ObjectMeasurer {
        ObjectMeasurer::new(
            MeasureParams {
                min_contour_area: min_area,
                ..MeasureParams::default()
            },
            ScaleFactor::new(ppu).expect("positive"),
        )
        .expect("params")
    }

    #[test]
    fn rectangle_measures_width_and_height() {
        let m = measurer(100.0, 2000.0);
        let c = Contour::from_xy(&[[0.0, 0.0], [0.0, 50.0], [200.0, 50.0], [200.0, 0.0]]);
        let r = m.measure_contour(0, &c).expect("ok").expect("qualifies");
        assert_relative_eq!(r.width, 2.0, epsilon = 1e-4);
        assert_relative_eq!(r.height, 0.5, epsilon = 1e-4);
        assert_relative_eq!(r.area_px, 10_000.0);
        assert_relative_eq!(r.centroid.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(r.centroid.y, 25.0, epsilon = 1e-3);
    }

    #[test]
    fn two_point_contour_is_malformed() {
        let m = measurer(100.0, 0.0);
        let c = Contour::from_xy(&[[0.0, 0.0], [100.0, 100.0]]);
        assert_eq!(
            m.measure_contour(3, &c),
            Err(ContourError::MalformedContour {
                index: 3,
                points: 2
            })
        );
    }

    #[test]
    fn zero_area_contour_with_zero_threshold_is_degenerate() {
        let m = measurer(100.0, 0.0);
        let c = Contour::from_xy(&[[0.0, 0.0], [50.0, 50.0], [100.0, 100.0]]);
        assert_eq!(
            m.measure_contour(1, &c),
            Err(ContourError::DegenerateContour { index: 1 })
        );
    }

    #[test]
    fn area_exactly_at_threshold_qualifies() {
        let m = measurer(10.0, 10_000.0);
        let c = Contour::from_xy(&[[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]]);
        assert!(m.measure_contour(0, &c).expect("ok").is_some());

        let m = measurer(10.0, 10_000.5);
        assert!(m.measure_contour(0, &c).expect("ok").is_none());
    }

    #[test]
    fn coordinate_sum_ordering_is_selectable() {
        let m = ObjectMeasurer::new(
            MeasureParams {
                min_contour_area: 0.0,
                corner_ordering: CornerOrdering::CoordinateSum,
            },
            ScaleFactor::new(100.0).expect("positive"),
        )
        .expect("params");
        let c = Contour::from_xy(&[[0.0, 0.0], [0.0, 50.0], [200.0, 50.0], [200.0, 0.0]]);
        let r = m.measure_contour(0, &c).expect("ok").expect("qualifies");
        assert_relative_eq!(r.width, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = ObjectMeasurer::new(
            MeasureParams {
                min_contour_area: -1.0,
                ..MeasureParams::default()
            },
            ScaleFactor::new(1.0).expect("positive"),
        )
        .unwrap_err();
        assert_eq!(err, MeasureParamsError::MinContourArea(-1.0));
    }
}
