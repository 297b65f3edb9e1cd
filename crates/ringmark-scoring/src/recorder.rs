//! Pointer sampling with a minimum interval between accepted points.

use std::time::Duration;

use crate::types::{Point, Stroke};

/// Builds a [`Stroke`] from pointer events, dropping moves that arrive
/// sooner than `min_interval` after the last accepted point.
///
/// Timestamps are offsets from any monotonic origin the host likes, as
/// long as it stays the same for the whole stroke.
#[derive(Debug, Clone)]
pub struct StrokeRecorder {
    min_interval: Duration,
    stroke: Stroke,
    last_accepted: Option<Duration>,
}

impl StrokeRecorder {
    /// Default throttle between accepted samples.
    pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(10);

    /// Create an idle recorder.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            stroke: Stroke::default(),
            last_accepted: None,
        }
    }

    /// Start a new stroke at `point`, discarding any previous one.
    pub fn begin(&mut self, point: Point, at: Duration) {
        self.stroke.clear();
        self.stroke.push(point);
        self.last_accepted = Some(at);
    }

    /// Offer a pointer move. Returns `true` if the point was recorded.
    ///
    /// Moves are ignored when no stroke is in progress.
    pub fn extend(&mut self, point: Point, at: Duration) -> bool {
        let Some(last) = self.last_accepted else {
            return false;
        };
        // A timestamp earlier than the last accepted one counts as zero elapsed.
        if at.saturating_sub(last) < self.min_interval {
            tracing::trace!(?at, ?last, "throttled pointer move");
            return false;
        }
        self.stroke.push(point);
        self.last_accepted = Some(at);
        true
    }

    /// Stop recording and return the stroke.
    ///
    /// The recorder is idle afterwards; [`points`](Self::points) is
    /// empty until the next [`begin`](Self::begin).
    pub fn finish(&mut self) -> Stroke {
        self.last_accepted = None;
        std::mem::take(&mut self.stroke)
    }

    /// Discard the current stroke and go idle.
    pub fn cancel(&mut self) {
        self.stroke.clear();
        self.last_accepted = None;
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.last_accepted.is_some()
    }

    /// Points recorded so far.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        self.stroke.points()
    }
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn moves_inside_the_interval_are_dropped() {
        let mut rec = StrokeRecorder::default();
        rec.begin(Point::new(0.0, 0.0), ms(100));
        assert!(!rec.extend(Point::new(1.0, 0.0), ms(105)));
        assert!(rec.extend(Point::new(2.0, 0.0), ms(110)));
        assert!(!rec.extend(Point::new(3.0, 0.0), ms(119)));
        assert!(rec.extend(Point::new(4.0, 0.0), ms(125)));
        let xs: Vec<f64> = rec.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn moves_without_a_stroke_are_ignored() {
        let mut rec = StrokeRecorder::default();
        assert!(!rec.extend(Point::new(1.0, 1.0), ms(1000)));
        assert!(rec.points().is_empty());
        assert!(!rec.is_recording());
    }

    #[test]
    fn begin_discards_previous_stroke() {
        let mut rec = StrokeRecorder::new(Duration::ZERO);
        rec.begin(Point::new(0.0, 0.0), ms(0));
        rec.extend(Point::new(1.0, 0.0), ms(1));
        rec.begin(Point::new(9.0, 9.0), ms(2));
        assert_eq!(rec.points(), &[Point::new(9.0, 9.0)]);
    }

    #[test]
    fn finish_returns_stroke_and_goes_idle() {
        let mut rec = StrokeRecorder::new(Duration::ZERO);
        rec.begin(Point::new(0.0, 0.0), ms(0));
        rec.extend(Point::new(1.0, 0.0), ms(0));
        let stroke = rec.finish();
        assert_eq!(stroke.len(), 2);
        assert!(!rec.is_recording());
        assert!(rec.points().is_empty());
        assert!(!rec.extend(Point::new(2.0, 0.0), ms(50)));
    }

    #[test]
    fn clock_going_backwards_is_throttled() {
        let mut rec = StrokeRecorder::default();
        rec.begin(Point::new(0.0, 0.0), ms(100));
        assert!(!rec.extend(Point::new(1.0, 0.0), ms(50)));
        assert_eq!(rec.points().len(), 1);
    }
}
