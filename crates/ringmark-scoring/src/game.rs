//! Interactive drawing state: press, drag, release, score.

use std::time::Duration;

use crate::config::ScoringConfig;
use crate::recorder::StrokeRecorder;
use crate::session::Session;
use crate::types::{DisplayExtent, Evaluation, Point, Stroke};

/// Keyboard commands understood by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Drop the stroke and result (`c`).
    Clear,
    /// Drop everything including the session (`r`).
    Reset,
    /// Show or hide the grid and guide (`g`).
    ToggleGuide,
}

impl Command {
    /// Map a key name to a command, case-insensitively.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "c" => Some(Self::Clear),
            "r" => Some(Self::Reset),
            "g" => Some(Self::ToggleGuide),
            _ => None,
        }
    }
}

/// One drawing surface's worth of state.
///
/// A stroke starts with [`press`](Self::press), grows with
/// [`drag`](Self::drag) and is scored on [`release`](Self::release).
/// The result stays on screen until the next press or a clear.
#[derive(Debug, Clone)]
pub struct DrawingGame {
    config: ScoringConfig,
    recorder: StrokeRecorder,
    stroke: Stroke,
    drawing: bool,
    result: Option<Evaluation>,
    session: Session,
    guide_enabled: bool,
}

impl DrawingGame {
    /// Create a game with the given scoring configuration and sampling
    /// interval.
    #[must_use]
    pub fn new(config: ScoringConfig, min_interval: Duration) -> Self {
        Self {
            config,
            recorder: StrokeRecorder::new(min_interval),
            stroke: Stroke::default(),
            drawing: false,
            result: None,
            session: Session::default(),
            guide_enabled: true,
        }
    }

    /// Pointer down: start a fresh stroke and hide the previous result.
    pub fn press(&mut self, point: Point, at: Duration) {
        self.drawing = true;
        self.result = None;
        self.stroke.clear();
        self.recorder.begin(point, at);
    }

    /// Pointer move. Returns `true` if the point was recorded.
    pub fn drag(&mut self, point: Point, at: Duration) -> bool {
        if !self.drawing || self.result.is_some() {
            return false;
        }
        self.recorder.extend(point, at)
    }

    /// Pointer up: score the stroke against `display`.
    ///
    /// Returns `None` when no stroke was in progress.
    pub fn release(&mut self, display: DisplayExtent) -> Option<&Evaluation> {
        if !self.drawing || self.result.is_some() {
            return None;
        }
        self.drawing = false;
        self.stroke = self.recorder.finish();
        let evaluation = crate::evaluate_with_config(self.stroke.points(), display, &self.config);
        self.session.record(evaluation.score);
        tracing::debug!(
            score = evaluation.score,
            attempts = self.session.attempts,
            best = self.session.best_score,
            "stroke released"
        );
        self.result = Some(evaluation);
        self.result.as_ref()
    }

    /// Drop the stroke and result. The session survives.
    pub fn clear(&mut self) {
        self.recorder.cancel();
        self.stroke.clear();
        self.result = None;
    }

    /// Back to the initial state: no stroke, zeroed session, guide on.
    pub fn reset(&mut self) {
        self.clear();
        self.session.reset();
        self.guide_enabled = true;
        self.drawing = false;
    }

    /// Flip the grid and guide on or off.
    pub const fn toggle_guide(&mut self) {
        self.guide_enabled = !self.guide_enabled;
    }

    /// Run a keyboard command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Clear => self.clear(),
            Command::Reset => self.reset(),
            Command::ToggleGuide => self.toggle_guide(),
        }
    }

    /// Whether the grid is shown.
    #[must_use]
    pub const fn grid_visible(&self) -> bool {
        self.guide_enabled
    }

    /// Whether the guide logo is shown: enabled and nothing drawn yet.
    #[must_use]
    pub fn guide_visible(&self) -> bool {
        self.guide_enabled && self.points().is_empty()
    }

    /// Points of the stroke in progress, or of the last finished one.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        if self.recorder.is_recording() {
            self.recorder.points()
        } else {
            self.stroke.points()
        }
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Result of the last released stroke, if still shown.
    #[must_use]
    pub const fn result(&self) -> Option<&Evaluation> {
        self.result.as_ref()
    }

    /// Session counters.
    #[must_use]
    pub const fn session(&self) -> Session {
        self.session
    }
}

impl Default for DrawingGame {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), StrokeRecorder::DEFAULT_MIN_INTERVAL)
    }
}
