//! Aggregation of the feature scores into the final 0-100 score.

use serde::{Deserialize, Serialize};

use crate::arrow::{self, ArrowAnalysis};
use crate::config::{ScoreLimits, ScoreWeights, ScoringConfig};
use crate::feedback::Feedback;
use crate::geometry::Frame;
use crate::proportion::{self, ProportionAnalysis};
use crate::ring::{self, RingAnalysis};
use crate::smoothness::smoothness;
use crate::types::{DisplayExtent, Evaluation, Point};

/// Every intermediate value behind one score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Bounding box of the stroke.
    pub frame: Frame,
    /// Ring measurements.
    pub ring: RingAnalysis,
    /// Arrow measurements.
    pub arrow: ArrowAnalysis,
    /// Joint presence of ring and arrow, in `[0, 1]`.
    pub completeness: f64,
    /// Size and aspect measurements.
    pub proportion: ProportionAnalysis,
    /// Heading smoothness, in `[0, 1]`.
    pub smoothness: f64,
    /// Weighted sum before caps and bonus, in points.
    pub weighted_total: f64,
    /// Total after caps and bonus, before clamping and rounding.
    pub total: f64,
    /// Final score.
    pub score: u8,
    /// Feedback earned by the score.
    pub feedback: Feedback,
}

impl ScoreBreakdown {
    /// The player-facing result.
    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        Evaluation::new(self.score, self.feedback)
    }
}

/// Completeness from the two feature scores.
///
/// With both features detected this is their sum over the divisor,
/// capped at 1. Otherwise only a fraction of the stronger one counts.
#[must_use]
pub fn completeness(ring: &RingAnalysis, arrow: &ArrowAnalysis, limits: &ScoreLimits) -> f64 {
    if ring.detected && arrow.detected {
        ((ring.score + arrow.score) / limits.completeness_divisor).min(1.0)
    } else {
        limits.partial_completeness_factor * ring.score.max(arrow.score)
    }
}

/// Weighted sum of the component scores, in points out of 100.
#[must_use]
pub fn weighted_total(
    weights: &ScoreWeights,
    completeness: f64,
    ring: f64,
    arrow: f64,
    proportion: f64,
    smoothness: f64,
) -> f64 {
    let sum = weights.completeness * completeness
        + weights.ring * ring
        + weights.arrow * arrow
        + weights.proportion * proportion
        + weights.smoothness * smoothness;
    100.0 * sum
}

/// Apply the single-feature caps, then the mastery bonus.
#[must_use]
pub fn apply_limits(
    total: f64,
    has_ring: bool,
    has_arrow: bool,
    completeness: f64,
    smoothness: f64,
    limits: &ScoreLimits,
) -> f64 {
    match (has_ring, has_arrow) {
        (true, false) => total.min(limits.ring_only_cap),
        (false, true) => total.min(limits.arrow_only_cap),
        (true, true)
            if completeness > limits.mastery_threshold
                && smoothness > limits.mastery_threshold =>
        {
            total + limits.mastery_bonus
        }
        _ => total,
    }
}

/// Clamp to `[0, 100]` and round half away from zero.
///
/// A non-finite total scores 0.
#[must_use]
pub fn finalize(total: f64) -> u8 {
    if !total.is_finite() {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = total.clamp(0.0, 100.0).round() as u8;
    score
}

/// Score a stroke and keep every intermediate value.
///
/// Returns `None` when the stroke is below the minimum length; the
/// caller reports that as [`Feedback::TooShort`].
#[must_use]
pub fn score_stroke(
    points: &[Point],
    display: DisplayExtent,
    config: &ScoringConfig,
) -> Option<ScoreBreakdown> {
    if points.len() < config.min_points {
        return None;
    }
    let frame = Frame::from_points(points)?;

    let ring = ring::analyze(points, &frame, &config.ring);
    let arrow = arrow::analyze(points, &config.arrow);
    let completeness = completeness(&ring, &arrow, &config.limits);
    let proportion = proportion::analyze(&frame, display, &config.proportion);
    let smoothness = smoothness(points, config.smoothness_min_points);

    let weighted_total = weighted_total(
        &config.weights,
        completeness,
        ring.score,
        arrow.score,
        proportion.score,
        smoothness,
    );
    // A frame with a non-finite edge carries no usable geometry.
    let total = if frame.is_finite() {
        apply_limits(
            weighted_total,
            ring.detected,
            arrow.detected,
            completeness,
            smoothness,
            &config.limits,
        )
    } else {
        0.0
    };
    let score = finalize(total);
    let feedback = Feedback::select(ring.detected, arrow.detected, score);

    tracing::debug!(
        points = points.len(),
        ring = ring.score,
        arrow = arrow.score,
        completeness,
        proportion = proportion.score,
        smoothness,
        weighted_total,
        score,
        "scored stroke"
    );

    Some(ScoreBreakdown {
        frame,
        ring,
        arrow,
        completeness,
        proportion,
        smoothness,
        weighted_total,
        total,
        score,
        feedback,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn limits() -> ScoreLimits {
        ScoreLimits::default()
    }

    #[test]
    fn ring_only_total_is_capped() {
        let t = apply_limits(58.0, true, false, 0.5, 0.9, &limits());
        assert!((t - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn arrow_only_total_is_capped() {
        let t = apply_limits(75.0, false, true, 0.5, 0.9, &limits());
        assert!((t - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn caps_do_not_raise_low_totals() {
        let t = apply_limits(20.0, true, false, 0.1, 0.0, &limits());
        assert!((t - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mastery_bonus_needs_completeness_and_smoothness() {
        let l = limits();
        assert!((apply_limits(90.0, true, true, 0.9, 0.8, &l) - 93.0).abs() < 1e-12);
        assert!((apply_limits(90.0, true, true, 0.7, 0.8, &l) - 90.0).abs() < 1e-12);
        assert!((apply_limits(90.0, true, true, 0.9, 0.7, &l) - 90.0).abs() < 1e-12);
        assert!((apply_limits(90.0, false, false, 0.9, 0.9, &l) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn finalize_clamps_rounds_and_rejects_nan() {
        assert_eq!(finalize(101.4), 100);
        assert_eq!(finalize(-3.0), 0);
        assert_eq!(finalize(49.5), 50);
        assert_eq!(finalize(49.49), 49);
        assert_eq!(finalize(f64::NAN), 0);
        assert_eq!(finalize(f64::INFINITY), 0);
    }

    #[test]
    fn weighted_total_of_perfect_components_is_one_hundred() {
        let t = weighted_total(&ScoreWeights::default(), 1.0, 1.0, 1.0, 1.0, 1.0);
        assert!((t - 100.0).abs() < 1e-9);
    }

    #[test]
    fn completeness_with_one_feature_is_halved() {
        let ring = RingAnalysis {
            expected_radius: 10.0,
            on_ring_points: 10,
            covered_buckets: 36,
            coverage: 1.0,
            consistency: 1.0,
            score: 0.8,
            detected: true,
        };
        let arrow = ArrowAnalysis {
            straight_segments: 0,
            diagonal_segments: 0,
            sharp_corners: 0,
            straight_score: 0.0,
            diagonal_score: 0.0,
            corner_score: 0.0,
            score: 0.1,
            detected: false,
        };
        assert!((completeness(&ring, &arrow, &limits()) - 0.4).abs() < 1e-12);

        let arrow = ArrowAnalysis {
            score: 0.8,
            detected: true,
            ..arrow
        };
        assert!((completeness(&ring, &arrow, &limits()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn short_stroke_is_not_scored() {
        let points = vec![Point::new(1.0, 1.0); 14];
        let display = DisplayExtent {
            width: 100.0,
            height: 100.0,
        };
        assert!(score_stroke(&points, display, &ScoringConfig::default()).is_none());
    }

    #[test]
    fn non_finite_coordinates_score_zero() {
        let display = DisplayExtent {
            width: 600.0,
            height: 600.0,
        };
        let nan: Vec<Point> = (0..20)
            .map(|k| Point::new(f64::NAN, 10.0 * f64::from(k)))
            .collect();
        let breakdown = score_stroke(&nan, display, &ScoringConfig::default()).unwrap();
        assert_eq!(breakdown.score, 0);
        assert_eq!(breakdown.feedback, Feedback::KeepTrying);

        let mut inf: Vec<Point> = (0..20)
            .map(|k| Point::new(10.0 * f64::from(k), 10.0 * f64::from(k)))
            .collect();
        inf[7] = Point::new(f64::INFINITY, 70.0);
        let breakdown = score_stroke(&inf, display, &ScoringConfig::default()).unwrap();
        assert_eq!(breakdown.score, 0);
    }
}
