use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::{haversine_distance, interpolate, Coordinate};

/// Upper bound on the number of points [`smooth_path`] will produce.
pub const MAX_SMOOTHED_POINTS: usize = 1_000_000;

/// Summary metrics for a coordinate path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathInfo {
    /// Sum of great-circle segment lengths in metres.
    pub total_distance: f64,
    pub segment_count: usize,
    /// Zero when the path has no segments.
    pub average_segment_length: f64,
}

/// Densify `path` so that no gap is longer than `step_m` metres.
///
/// Each segment contributes `ceil(length / step_m)` points (at least one),
/// starting with its own first point; the final input point is appended once
/// at the very end. The first and last output points are the input's, bit for
/// bit.
///
/// Returns [`Error::SmoothingTooDense`] when the output would exceed
/// [`MAX_SMOOTHED_POINTS`].
pub fn smooth_path(path: &[Coordinate], step_m: f64) -> Result<Vec<Coordinate>> {
    if !step_m.is_finite() || step_m <= 0.0 {
        return Err(Error::InvalidStep { step: step_m });
    }
    let Some(&last) = path.last() else {
        return Ok(Vec::new());
    };
    if path.len() == 1 {
        return Ok(vec![last]);
    }

    // Counted in f64 so a tiny step cannot overflow before the check.
    let segment_steps: Vec<f64> = path
        .windows(2)
        .map(|pair| (haversine_distance(pair[0], pair[1]) / step_m).ceil().max(1.0))
        .collect();
    let points = segment_steps.iter().sum::<f64>() + 1.0;
    if points > MAX_SMOOTHED_POINTS as f64 {
        return Err(Error::SmoothingTooDense {
            step: step_m,
            points,
            limit: MAX_SMOOTHED_POINTS,
        });
    }

    let mut smoothed = Vec::with_capacity(points as usize);
    for (pair, &steps) in path.windows(2).zip(&segment_steps) {
        let (from, to) = (pair[0], pair[1]);
        let steps = steps as usize;
        for j in 0..steps {
            smoothed.push(interpolate(from, to, j as f64 / steps as f64));
        }
    }
    smoothed.push(last);

    Ok(smoothed)
}

/// Total length, segment count and mean segment length of `path`.
pub fn path_info(path: &[Coordinate]) -> PathInfo {
    let segment_count = path.len().saturating_sub(1);
    let total_distance: f64 = path
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum();
    let average_segment_length = if segment_count == 0 {
        0.0
    } else {
        total_distance / segment_count as f64
    };

    PathInfo {
        total_distance,
        segment_count,
        average_segment_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_point_segment_is_densified() {
        // Just over 120 m along the equator.
        let start = Coordinate::new(0.0, 0.0);
        let end = Coordinate::new(0.0, 0.00108);
        assert!((haversine_distance(start, end) - 120.0).abs() < 0.2);

        let smoothed = smooth_path(&[start, end], 5.0).unwrap();
        assert!(smoothed.len() >= 26, "got {} points", smoothed.len());
        assert_eq!(smoothed.first(), Some(&start));
        assert_eq!(smoothed.last(), Some(&end));

        let info = path_info(&smoothed);
        assert!(info.segment_count >= 25);
        let max_gap = smoothed
            .windows(2)
            .map(|pair| haversine_distance(pair[0], pair[1]))
            .fold(0.0_f64, f64::max);
        assert!(max_gap <= 5.0 + 1e-6);
    }

    #[test]
    fn interior_vertices_appear_once() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.0001);
        let c = Coordinate::new(0.0001, 0.0001);
        let smoothed = smooth_path(&[a, b, c], 100.0).unwrap();
        assert_eq!(smoothed, vec![a, b, c]);
    }

    #[test]
    fn repeated_points_do_not_vanish() {
        let a = Coordinate::new(1.0, 1.0);
        let smoothed = smooth_path(&[a, a], 5.0).unwrap();
        assert_eq!(smoothed, vec![a, a]);
    }

    #[test]
    fn short_inputs_pass_through() {
        assert!(smooth_path(&[], 5.0).unwrap().is_empty());
        let only = Coordinate::new(3.0, 4.0);
        assert_eq!(smooth_path(&[only], 5.0).unwrap(), vec![only]);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let path = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.001)];
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                smooth_path(&path, step),
                Err(Error::InvalidStep { .. })
            ));
        }
    }

    #[test]
    fn overly_dense_smoothing_is_rejected() {
        let path = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.00108)];
        for step in [1e-300, 1e-4] {
            match smooth_path(&path, step) {
                Err(Error::SmoothingTooDense { points, limit, .. }) => {
                    assert!(points > limit as f64);
                    assert_eq!(limit, MAX_SMOOTHED_POINTS);
                }
                other => panic!("expected SmoothingTooDense, got {other:?}"),
            }
        }

        // ~120 m at 1 mm stays under the limit.
        let dense = smooth_path(&path, 0.001).unwrap();
        assert!(dense.len() > 100_000 && dense.len() <= MAX_SMOOTHED_POINTS);
        assert_eq!(dense.last(), Some(&path[1]));
    }

    #[test]
    fn info_for_degenerate_paths() {
        assert_eq!(
            path_info(&[]),
            PathInfo {
                total_distance: 0.0,
                segment_count: 0,
                average_segment_length: 0.0
            }
        );
        let info = path_info(&[
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.001),
            Coordinate::new(0.0, 0.002),
        ]);
        assert_eq!(info.segment_count, 2);
        assert!((info.average_segment_length - info.total_distance / 2.0).abs() < 1e-9);
    }
}
