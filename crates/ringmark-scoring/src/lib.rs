//! ringmark-scoring: score free-hand drawings of a ring-and-arrow logo
//! (sans-IO).
//!
//! A stroke is one continuous sequence of points captured between
//! pointer press and release. [`evaluate`] rates it 0-100 against the
//! logo using a handful of geometric heuristics:
//!
//! ring coverage -> arrow cues -> completeness -> proportion ->
//! smoothness -> weighted total -> caps and bonus.
//!
//! Everything here is pure computation over in-memory values. Pointer
//! capture, rendering and timing sources live in the host crates.

pub mod arrow;
pub mod config;
pub mod diagnostics;
pub mod feedback;
pub mod game;
pub mod geometry;
pub mod proportion;
pub mod recorder;
pub mod ring;
pub mod score;
pub mod session;
pub mod smoothness;
pub mod template;
pub mod types;

pub use config::{ArrowConfig, ProportionConfig, RingConfig, ScoreLimits, ScoreWeights, ScoringConfig};
pub use diagnostics::{Clock, EvaluationDiagnostics, evaluate_with_diagnostics};
pub use feedback::Feedback;
pub use game::{Command, DrawingGame};
pub use recorder::StrokeRecorder;
pub use score::ScoreBreakdown;
pub use session::Session;
pub use template::reference_logo;
pub use types::{DisplayExtent, Evaluation, Point, ScoringError, Stroke, StrokeRecord};

/// Score a completed stroke with the default configuration.
///
/// Strokes shorter than 15 points score 0 with a prompt to draw the
/// whole logo. Otherwise the score reflects how clearly a ring and a
/// diagonal arrow are present, how well the drawing fills `display`
/// and how smooth the line is. Drawings with only one of the two
/// features are capped (50 for a ring, 60 for an arrow).
///
/// Deterministic and total: the result is always within `0..=100`.
///
/// # Examples
///
/// ```
/// use ringmark_scoring::{DisplayExtent, Point, evaluate};
///
/// let display = DisplayExtent::new(600.0, 600.0).unwrap();
/// let dot = vec![Point::new(10.0, 10.0); 3];
/// let e = evaluate(&dot, display);
/// assert_eq!(e.score, 0);
/// assert_eq!(e.message, "Draw the complete logo!");
/// ```
#[must_use]
pub fn evaluate(points: &[Point], display: DisplayExtent) -> Evaluation {
    evaluate_with_config(points, display, &ScoringConfig::default())
}

/// Score a completed stroke with a custom configuration.
///
/// The configuration is used as-is; call [`ScoringConfig::validate`]
/// first when it comes from an untrusted source.
#[must_use]
pub fn evaluate_with_config(
    points: &[Point],
    display: DisplayExtent,
    config: &ScoringConfig,
) -> Evaluation {
    score::score_stroke(points, display, config).map_or_else(
        || Evaluation::new(0, Feedback::TooShort),
        |breakdown| breakdown.evaluation(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn display() -> DisplayExtent {
        DisplayExtent::new(600.0, 600.0).unwrap()
    }

    /// Points on a circle around `center`, `count` samples.
    fn arc(center: Point, radius: f64, start_deg: f64, step_deg: f64, count: u32) -> Vec<Point> {
        (0..count)
            .map(|k| {
                let a = step_deg.mul_add(f64::from(k), start_deg).to_radians();
                Point::new(
                    radius.mul_add(a.cos(), center.x),
                    radius.mul_add(a.sin(), center.y),
                )
            })
            .collect()
    }

    /// Three tight loops, an outward spiral and one wide loop: a ring
    /// whose bounding box is three radii across, with no straight runs.
    fn ring_only() -> Vec<Point> {
        let c = Point::new(300.0, 300.0);
        let mut points = Vec::new();
        for phase in [5.0, 15.0, 25.0] {
            points.extend(arc(c, 60.0, phase, 30.0, 12));
        }
        for (deg, r) in [(30.0_f64, 70.0_f64), (60.0, 80.0), (90.0, 90.0)] {
            let a = deg.to_radians();
            points.push(Point::new(r.mul_add(a.cos(), c.x), r.mul_add(a.sin(), c.y)));
        }
        points.extend(arc(c, 90.0, 120.0, 30.0, 12));
        points
    }

    /// Four diagonal legs of 80px sampled every 10px.
    fn zig_zag() -> Vec<Point> {
        let corners = [
            Point::new(200.0, 340.0),
            Point::new(280.0, 260.0),
            Point::new(360.0, 340.0),
            Point::new(440.0, 260.0),
            Point::new(520.0, 340.0),
        ];
        let mut points = vec![corners[0]];
        for pair in corners.windows(2) {
            for k in 1..=8 {
                let t = f64::from(k) / 8.0;
                points.push(Point::new(
                    (pair[1].x - pair[0].x).mul_add(t, pair[0].x),
                    (pair[1].y - pair[0].y).mul_add(t, pair[0].y),
                ));
            }
        }
        points
    }

    #[test]
    fn fewer_than_fifteen_points_is_too_short() {
        for n in [0, 1, 14] {
            let points = vec![Point::new(5.0, 5.0); n];
            let e = evaluate(&points, display());
            assert_eq!(e, Evaluation::new(0, Feedback::TooShort));
        }
    }

    #[test]
    fn fifteen_collinear_points_are_scored() {
        let points: Vec<Point> = (0..15)
            .map(|k| Point::new(10.0f64.mul_add(f64::from(k), 100.0), 200.0))
            .collect();
        let e = evaluate(&points, display());
        assert_eq!(e.score, 13);
        assert_eq!(e.message, "Keep trying! Make the ring and arrow.");
    }

    #[test]
    fn identical_points_stay_finite_and_low() {
        let points = vec![Point::new(120.0, 80.0); 20];
        let breakdown =
            score::score_stroke(&points, display(), &ScoringConfig::default()).unwrap();
        assert!(breakdown.total.is_finite());
        assert!(breakdown.score <= 5);
    }

    #[test]
    fn reference_logo_scores_high() {
        let logo = reference_logo(display());
        let breakdown =
            score::score_stroke(logo.points(), display(), &ScoringConfig::default()).unwrap();
        assert!(breakdown.ring.detected);
        assert!(breakdown.arrow.detected);
        assert_eq!(breakdown.arrow.sharp_corners, 3);
        assert!(breakdown.score >= 95, "score {}", breakdown.score);
        assert_eq!(breakdown.feedback, Feedback::Mastery);
    }

    #[test]
    fn circle_with_cornered_diagonal_scores_high() {
        // Full circle every 10 degrees, a diagonal across the 3R square
        // around it, then one 90 degree turn at the tip.
        let c = Point::new(300.0, 300.0);
        let mut points = arc(c, 60.0, 0.0, 10.0, 36);
        let (tail, tip) = (Point::new(210.0, 390.0), Point::new(390.0, 210.0));
        points.extend((0..19).map(|k| {
            let t = f64::from(k) / 18.0;
            Point::new(
                (tip.x - tail.x).mul_add(t, tail.x),
                (tip.y - tail.y).mul_add(t, tail.y),
            )
        }));
        let leg = 30.0 / std::f64::consts::SQRT_2;
        points.extend((1..5).map(|k| {
            let t = f64::from(k) / 4.0;
            Point::new(leg.mul_add(t, tip.x), leg.mul_add(t, tip.y))
        }));
        assert_eq!(points.len(), 59);

        let breakdown =
            score::score_stroke(&points, display(), &ScoringConfig::default()).unwrap();
        assert!((breakdown.proportion.size_ratio - 0.1).abs() < 0.01);
        assert!((breakdown.proportion.aspect_ratio - 1.0).abs() < 0.2);
        assert!(breakdown.ring.detected);
        assert!(breakdown.arrow.detected);
        assert!(breakdown.score >= 85, "score {}", breakdown.score);
    }

    #[test]
    fn ring_without_arrow_is_capped_at_fifty() {
        let points = ring_only();
        assert_eq!(points.len(), 51);
        let breakdown =
            score::score_stroke(&points, display(), &ScoringConfig::default()).unwrap();
        assert!(breakdown.ring.detected);
        assert!(!breakdown.arrow.detected);
        assert!(breakdown.weighted_total > 50.0);
        let e = breakdown.evaluation();
        assert_eq!(e.score, 50);
        assert_eq!(e.message, "Nice ring! Add a clear arrow.");
    }

    #[test]
    fn arrow_without_ring_stays_within_sixty() {
        let points = zig_zag();
        assert_eq!(points.len(), 33);
        let breakdown =
            score::score_stroke(&points, display(), &ScoringConfig::default()).unwrap();
        assert!(!breakdown.ring.detected);
        assert!(breakdown.arrow.detected);
        let e = breakdown.evaluation();
        assert!(e.score <= 60);
        assert_eq!(e.message, "Arrow spotted! Add a proper ring.");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let points = ring_only();
        assert_eq!(evaluate(&points, display()), evaluate(&points, display()));
    }

    #[test]
    fn scores_stay_in_range_for_odd_inputs() {
        let inputs = [
            ring_only(),
            zig_zag(),
            vec![Point::new(0.0, 0.0); 40],
            (0..50)
                .map(|k| Point::new(f64::from(k % 2) * 1e6, f64::from(k)))
                .collect(),
            (0..30)
                .map(|k| Point::new(f64::from(k), -f64::from(k) * 1e-9))
                .collect(),
        ];
        for points in &inputs {
            let e = evaluate(points, display());
            assert!(e.score <= 100);
            assert!(!e.message.is_empty());
        }
    }

    #[test]
    fn custom_config_changes_the_gate() {
        let config = ScoringConfig {
            min_points: 3,
            ..ScoringConfig::default()
        };
        let points = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 1.0)];
        let e = evaluate_with_config(&points, display(), &config);
        assert_ne!(e.message, "Draw the complete logo!");
    }
}
