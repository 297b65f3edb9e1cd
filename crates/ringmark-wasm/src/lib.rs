//! Browser bindings for ringmark.
//!
//! Exposes the scorer as plain functions taking a JSON array of
//! `{x, y}` points plus the canvas size, and a [`Game`] class that owns
//! the whole press/drag/release state so the page only forwards pointer
//! and keyboard events and paints the returned SVG.
//!
//! Timestamps arrive as `performance.now()` milliseconds. Parse failures
//! are logged to the browser console before being thrown as `Error`s.

use std::time::Duration;

use ringmark_export::{Scene, SvgMetadata, render_scene};
use ringmark_scoring::diagnostics::Clock;
use ringmark_scoring::{
    Command, DisplayExtent, DrawingGame, Point, ScoringConfig, ScoringError, Stroke,
};
use wasm_bindgen::prelude::*;

/// [`Clock`] backed by `performance.now()` via `web-time`.
struct WebClock;

impl Clock for WebClock {
    type Instant = web_time::Instant;

    fn now(&self) -> web_time::Instant {
        web_time::Instant::now()
    }

    fn elapsed(&self, since: &web_time::Instant) -> Duration {
        since.elapsed()
    }
}

/// Module entry point: route panics to the console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Score a stroke. Returns the JSON `{"score": .., "message": ..}`.
///
/// # Errors
///
/// Throws when `points_json` is not an array of finite points or the
/// size is not positive.
#[wasm_bindgen(js_name = evaluateStroke)]
pub fn evaluate_stroke(points_json: &str, width: f64, height: f64) -> Result<String, JsError> {
    evaluate_json(points_json, width, height).map_err(to_js_error)
}

/// Score a stroke and return the full JSON diagnostics.
///
/// # Errors
///
/// Same as [`evaluate_stroke`].
#[wasm_bindgen(js_name = diagnoseStroke)]
pub fn diagnose_stroke(points_json: &str, width: f64, height: f64) -> Result<String, JsError> {
    diagnose_json(points_json, width, height, &WebClock).map_err(to_js_error)
}

fn to_js_error(e: ScoringError) -> JsError {
    let msg = e.to_string();
    web_sys::console::error_1(&JsValue::from_str(&msg));
    JsError::new(&msg)
}

/// Parse a JSON array of points, rejecting non-finite coordinates.
fn parse_stroke(points_json: &str) -> Result<Stroke, ScoringError> {
    let points: Vec<Point> =
        serde_json::from_str(points_json).map_err(|e| ScoringError::Parse(e.to_string()))?;
    Stroke::try_new(points)
}

fn evaluate_json(points_json: &str, width: f64, height: f64) -> Result<String, ScoringError> {
    let display = DisplayExtent::new(width, height)?;
    let stroke = parse_stroke(points_json)?;
    let evaluation = ringmark_scoring::evaluate(stroke.points(), display);
    serde_json::to_string(&evaluation).map_err(|e| ScoringError::Parse(e.to_string()))
}

fn diagnose_json<C: Clock>(
    points_json: &str,
    width: f64,
    height: f64,
    clock: &C,
) -> Result<String, ScoringError> {
    let display = DisplayExtent::new(width, height)?;
    let stroke = parse_stroke(points_json)?;
    let (_, diagnostics) = ringmark_scoring::evaluate_with_diagnostics(
        &stroke,
        display,
        &ScoringConfig::default(),
        clock,
    );
    serde_json::to_string(&diagnostics).map_err(|e| ScoringError::Parse(e.to_string()))
}

/// `performance.now()` milliseconds as a `Duration`. Negative or
/// non-finite values map to zero.
fn duration_from_ms(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
}

/// One drawing canvas.
#[wasm_bindgen]
pub struct Game {
    inner: DrawingGame,
    display: DisplayExtent,
}

#[wasm_bindgen]
impl Game {
    /// Create a game for a canvas of the given CSS size.
    ///
    /// # Errors
    ///
    /// Throws when the size is not finite and positive.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<Self, JsError> {
        let display = DisplayExtent::new(width, height).map_err(to_js_error)?;
        Ok(Self {
            inner: DrawingGame::default(),
            display,
        })
    }

    /// Track a canvas resize.
    ///
    /// # Errors
    ///
    /// Throws when the size is not finite and positive; the previous
    /// size is kept.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsError> {
        self.display = DisplayExtent::new(width, height).map_err(to_js_error)?;
        Ok(())
    }

    /// Pointer down at `(x, y)`. Ignored for non-finite coordinates.
    pub fn press(&mut self, x: f64, y: f64, time_ms: f64) {
        let point = Point::new(x, y);
        if point.is_finite() {
            self.inner.press(point, duration_from_ms(time_ms));
        }
    }

    /// Pointer move. Returns `true` if the point was recorded; non-finite
    /// coordinates never are.
    pub fn drag(&mut self, x: f64, y: f64, time_ms: f64) -> bool {
        let point = Point::new(x, y);
        point.is_finite() && self.inner.drag(point, duration_from_ms(time_ms))
    }

    /// Pointer up. Returns the JSON result, or `undefined` when no
    /// stroke was in progress.
    pub fn release(&mut self) -> Option<String> {
        let evaluation = self.inner.release(self.display)?;
        serde_json::to_string(evaluation).ok()
    }

    /// Drop the stroke and result.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Drop everything including best score and attempts.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Show or hide the grid and guide.
    #[wasm_bindgen(js_name = toggleGuide)]
    pub fn toggle_guide(&mut self) {
        self.inner.toggle_guide();
    }

    /// Handle a `KeyboardEvent.key`. Returns `true` if it was a shortcut
    /// (`c` clear, `r` reset, `g` guide) so the page can prevent the
    /// default action.
    pub fn key(&mut self, key: &str) -> bool {
        Command::from_key(key).is_some_and(|command| {
            self.inner.apply(command);
            true
        })
    }

    /// Whether the guide logo is currently shown.
    #[wasm_bindgen(js_name = guideVisible)]
    #[must_use]
    pub fn guide_visible(&self) -> bool {
        self.inner.guide_visible()
    }

    /// Highest score this session.
    #[wasm_bindgen(js_name = bestScore)]
    #[must_use]
    pub fn best_score(&self) -> u8 {
        self.inner.session().best_score
    }

    /// Number of scored strokes this session.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.inner.session().attempts
    }

    /// Current stroke as a JSON array of points.
    #[wasm_bindgen(js_name = pointsJson)]
    #[must_use]
    pub fn points_json(&self) -> String {
        serde_json::to_string(self.inner.points()).unwrap_or_else(|_| "[]".to_string())
    }

    /// The visible scene as an SVG document.
    #[wasm_bindgen(js_name = renderSvg)]
    #[must_use]
    pub fn render_svg(&self) -> String {
        let scene = Scene::from_game(&self.inner, self.display);
        render_scene(&scene, &SvgMetadata::default())
    }
}
