//! Evaluation diagnostics: the full score breakdown plus timing.
//!
//! Intended for tuning the heuristics. The library never reads a clock
//! itself; callers pass a [`Clock`] so the same code runs natively
//! (`std::time::Instant`) and in the browser (`web-time`).
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::feedback::Feedback;
use crate::score::{ScoreBreakdown, score_stroke};
use crate::types::{DisplayExtent, Evaluation, Stroke};

/// Source of monotonic time for measuring evaluations.
pub trait Clock {
    /// Opaque timestamp.
    type Instant;

    /// Current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Diagnostics collected from a single evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDiagnostics {
    /// Number of points in the stroke.
    pub point_count: usize,
    /// Drawing surface the stroke was scored against.
    pub display: DisplayExtent,
    /// Intermediate values, `None` when the stroke was too short.
    pub breakdown: Option<ScoreBreakdown>,
    /// Wall-clock duration of the evaluation (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl EvaluationDiagnostics {
    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Evaluation Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Display: {}x{}  |  Points: {}",
            self.display.width, self.display.height, self.point_count,
        ));
        lines.push(format!("Duration: {:.3}ms", duration_ms(self.duration)));
        lines.push(String::new());

        let Some(b) = &self.breakdown else {
            lines.push(format!(
                "Too short to score (score 0): {}",
                Feedback::TooShort.message()
            ));
            return lines.join("\n");
        };

        lines.push(format!("{:<16} {:>8}  {}", "Component", "Score", "Details"));
        lines.push("-".repeat(72));
        lines.push(format!(
            "{:<16} {:>8.3}  r={:.1}px on-ring={} buckets={} consistency={:.3}{}",
            "Ring",
            b.ring.score,
            b.ring.expected_radius,
            b.ring.on_ring_points,
            b.ring.covered_buckets,
            b.ring.consistency,
            detected(b.ring.detected),
        ));
        lines.push(format!(
            "{:<16} {:>8.3}  straight={} diagonal={} corners={}{}",
            "Arrow",
            b.arrow.score,
            b.arrow.straight_segments,
            b.arrow.diagonal_segments,
            b.arrow.sharp_corners,
            detected(b.arrow.detected),
        ));
        lines.push(format!("{:<16} {:>8.3}", "Completeness", b.completeness));
        lines.push(format!(
            "{:<16} {:>8.3}  size={:.1}% aspect={:.2}",
            "Proportion",
            b.proportion.score,
            b.proportion.size_ratio * 100.0,
            b.proportion.aspect_ratio,
        ));
        lines.push(format!("{:<16} {:>8.3}", "Smoothness", b.smoothness));
        lines.push(String::new());
        lines.push(format!(
            "Weighted: {:.2}  |  After limits: {:.2}  |  Score: {}/100",
            b.weighted_total, b.total, b.score,
        ));
        lines.push(format!("Message: {}", b.feedback.message()));

        lines.join("\n")
    }

    /// The player-facing result.
    #[must_use]
    pub fn evaluation(&self) -> Evaluation {
        self.breakdown.as_ref().map_or_else(
            || Evaluation::new(0, Feedback::TooShort),
            ScoreBreakdown::evaluation,
        )
    }
}

const fn detected(yes: bool) -> &'static str {
    if yes { " (detected)" } else { "" }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Score `stroke` and collect diagnostics along the way.
#[must_use]
pub fn evaluate_with_diagnostics<C: Clock>(
    stroke: &Stroke,
    display: DisplayExtent,
    config: &ScoringConfig,
    clock: &C,
) -> (Evaluation, EvaluationDiagnostics) {
    let start = clock.now();
    let breakdown = score_stroke(stroke.points(), display, config);
    let duration = clock.elapsed(&start);

    let diagnostics = EvaluationDiagnostics {
        point_count: stroke.len(),
        display,
        breakdown,
        duration,
    };
    (diagnostics.evaluation(), diagnostics)
}
