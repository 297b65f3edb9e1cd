//! Arrow detection: straight runs plus sharp corners.
//!
//! Two cues are measured independently. Straight runs come from
//! stride-2 windows `(i-2, i, i+2)` whose chord is almost as long as
//! the path through the middle point; diagonal runs are the straight
//! windows whose heading is neither near-horizontal nor near-vertical.
//! Corners come from stride-1 turning angles. An arrow needs both cues;
//! a single cue only yields a weak score.

use serde::{Deserialize, Serialize};

use crate::config::ArrowConfig;
use crate::geometry::{EPSILON, turning_angle};
use crate::types::Point;

/// Everything measured while looking for the arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowAnalysis {
    /// Stride-2 windows with straightness above the threshold.
    pub straight_segments: usize,
    /// Straight windows heading diagonally.
    pub diagonal_segments: usize,
    /// Interior points whose turning angle exceeds the corner angle.
    pub sharp_corners: usize,
    /// `min(1, straight / (density * len))`.
    pub straight_score: f64,
    /// `min(1, diagonal / max(1, straight))`.
    pub diagonal_score: f64,
    /// `min(1, corners / corner_target)`.
    pub corner_score: f64,
    /// Combined arrow score in `[0, 1]`.
    pub score: f64,
    /// Whether the score reached the configured threshold.
    pub detected: bool,
}

/// Ratio of the direct distance `a -> c` to the path `a -> b -> c`.
///
/// 1.0 for collinear points in order, smaller as `b` bends away.
/// Coincident points give 0.
#[must_use]
pub fn straightness(a: Point, b: Point, c: Point) -> f64 {
    a.distance(c) / (a.distance(b) + b.distance(c) + EPSILON)
}

/// Whether the heading `from -> to` is diagonal-ish: its absolute angle
/// lies strictly between `min_degrees` and `max_degrees`.
#[must_use]
pub fn is_diagonal(from: Point, to: Point, min_degrees: f64, max_degrees: f64) -> bool {
    let heading = from.direction_to(to).abs().to_degrees();
    heading > min_degrees && heading < max_degrees
}

/// Analyze `points` for an arrow.
#[must_use]
pub fn analyze(points: &[Point], config: &ArrowConfig) -> ArrowAnalysis {
    let mut straight_segments = 0_usize;
    let mut diagonal_segments = 0_usize;
    for w in points.windows(5) {
        let (a, b, c) = (w[0], w[2], w[4]);
        if straightness(a, b, c) > config.straightness {
            straight_segments += 1;
            if is_diagonal(
                a,
                c,
                config.diagonal_min_degrees,
                config.diagonal_max_degrees,
            ) {
                diagonal_segments += 1;
            }
        }
    }

    let sharp_corners = points
        .windows(3)
        .map(|w| turning_angle(w[0], w[1], w[2]))
        .filter(|&t| t > config.corner_angle)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let (straight_score, diagonal_score, corner_score) = {
        let expected_straight = config.straight_density * points.len() as f64;
        (
            (straight_segments as f64 / expected_straight.max(EPSILON)).min(1.0),
            (diagonal_segments as f64 / straight_segments.max(1) as f64).min(1.0),
            (sharp_corners as f64 / config.corner_target).min(1.0),
        )
    };

    let score = if straight_score > config.cue_threshold && corner_score > config.cue_threshold {
        0.15f64.mul_add(
            diagonal_score,
            0.5f64.mul_add(straight_score, 0.35 * corner_score),
        )
    } else {
        config.single_cue_factor * straight_score.max(corner_score)
    };

    ArrowAnalysis {
        straight_segments,
        diagonal_segments,
        sharp_corners,
        straight_score,
        diagonal_score,
        corner_score,
        score,
        detected: score >= config.threshold,
    }
}
