//! Smoothness: how little the stroke's heading jitters.

use crate::geometry::turning_angle;
use crate::types::Point;

/// `max(0, 1 - mean turning angle)` over the interior points.
///
/// Strokes with `min_points` points or fewer score 0. Repeated samples
/// are kept; their zero-length segments head along the positive x axis.
///
/// # Examples
///
/// ```
/// use ringmark_scoring::Point;
/// use ringmark_scoring::smoothness::smoothness;
///
/// let line: Vec<Point> = (0..30).map(|i| Point::new(f64::from(i), 0.0)).collect();
/// assert!((smoothness(&line, 20) - 1.0).abs() < 1e-12);
/// assert_eq!(smoothness(&line[..20], 20), 0.0);
/// ```
#[must_use]
pub fn smoothness(points: &[Point], min_points: usize) -> f64 {
    if points.len() <= min_points || points.len() < 3 {
        return 0.0;
    }
    let total: f64 = points
        .windows(3)
        .map(|w| turning_angle(w[0], w[1], w[2]))
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let mean = total / (points.len() - 2) as f64;
    (1.0 - mean).max(0.0)
}
