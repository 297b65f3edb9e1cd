//! Ring detection: angular coverage and radial consistency.
//!
//! The ring is expected around the center of the stroke's bounding box,
//! at a third of the box's shorter side. Points within the tolerance
//! band are "on ring"; the circle is split into equal angular buckets
//! and the ring score rewards how many buckets the on-ring points
//! reach, scaled down (never below half) by how far they stray from
//! the expected radius.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::config::RingConfig;
use crate::geometry::{Frame, guard, polar_angle};
use crate::types::Point;

/// Everything measured while looking for the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingAnalysis {
    /// Radius the ring is expected to have, in pixels.
    pub expected_radius: f64,
    /// Number of points inside the tolerance band.
    pub on_ring_points: usize,
    /// Number of angular buckets reached by an on-ring point.
    pub covered_buckets: usize,
    /// `covered_buckets / buckets`.
    pub coverage: f64,
    /// `1 - mean |distance - expected| / expected`, floored at 0.
    pub consistency: f64,
    /// Combined ring score in `[0, 1]`.
    pub score: f64,
    /// Whether the score reached the configured threshold.
    pub detected: bool,
}

/// Analyze `points` for a ring around the center of `frame`.
///
/// # Examples
///
/// ```
/// use ringmark_scoring::{Point, RingConfig};
/// use ringmark_scoring::geometry::Frame;
/// use ringmark_scoring::ring::analyze;
///
/// // Corners of a 30x30 box around a 10px circle sampled every 10 degrees.
/// let mut points: Vec<Point> = (0..36)
///     .map(|k| {
///         let a = f64::from(5 + 10 * k).to_radians();
///         Point::new(10.0 * a.cos(), 10.0 * a.sin())
///     })
///     .collect();
/// points.push(Point::new(-15.0, -15.0));
/// points.push(Point::new(15.0, 15.0));
///
/// let frame = Frame::from_points(&points).unwrap();
/// let ring = analyze(&points, &frame, &RingConfig::default());
/// assert_eq!(ring.covered_buckets, 36);
/// assert!(ring.detected);
/// ```
#[must_use]
pub fn analyze(points: &[Point], frame: &Frame, config: &RingConfig) -> RingAnalysis {
    let center = frame.center();
    let expected_radius = frame.width().min(frame.height()) / config.radius_divisor;
    let low = config.band_low * expected_radius;
    let high = config.band_high * expected_radius;

    let bucket_count = config.buckets.max(1);
    #[allow(clippy::cast_precision_loss)]
    let bucket_width = TAU / bucket_count as f64;
    let mut covered = BTreeSet::new();
    let mut on_ring_points = 0_usize;
    let mut total_deviation = 0.0;

    for &p in points {
        let distance = center.distance(p);
        if distance < low || distance > high {
            continue;
        }
        on_ring_points += 1;
        total_deviation += (distance - expected_radius).abs();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bucket = ((polar_angle(center, p) / bucket_width) as usize).min(bucket_count - 1);
        covered.insert(bucket);
    }

    let covered_buckets = covered.len();
    #[allow(clippy::cast_precision_loss)]
    let coverage = covered_buckets as f64 / bucket_count as f64;

    let consistency = if on_ring_points == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean_deviation = total_deviation / on_ring_points as f64;
        (1.0 - mean_deviation / guard(expected_radius)).max(0.0)
    };

    let score = (coverage * 0.5f64.mul_add(consistency, 0.5)).min(1.0);

    RingAnalysis {
        expected_radius,
        on_ring_points,
        covered_buckets,
        coverage,
        consistency,
        score,
        detected: score >= config.threshold,
    }
}
