//! Shared types for the ringmark scorer.

use serde::{Deserialize, Serialize};

use crate::feedback::Feedback;

/// A 2D point in display coordinates.
///
/// Coordinates are logical (CSS) pixels relative to the drawing
/// surface's top-left corner, not backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Direction of the vector from `self` to `other`, in radians
    /// within `[-π, π]`.
    #[must_use]
    pub fn direction_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One continuous stroke, from press to release, in temporal order.
///
/// Near-duplicate points from dense sampling are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke(Vec<Point>);

impl Stroke {
    /// Create a stroke from a vector of points without validation.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Create a stroke, rejecting points with non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::NonFinitePoint`] with the index of the
    /// first offending point.
    pub fn try_new(points: Vec<Point>) -> Result<Self, ScoringError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ScoringError::NonFinitePoint { index });
        }
        Ok(Self(points))
    }

    /// Returns `true` if the stroke has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the stroke.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Append a point to the end of the stroke.
    pub fn push(&mut self, point: Point) {
        self.0.push(point);
    }

    /// Remove every point, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the most recently appended point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Consumes the stroke and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

/// Logical size of the drawing surface at evaluation time.
///
/// Independent of any device-pixel-ratio scaling applied to the
/// backing store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayExtent {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl DisplayExtent {
    /// Create a display extent.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidDisplay`] unless both sides are
    /// finite and strictly positive.
    pub fn new(width: f64, height: f64) -> Result<Self, ScoringError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(ScoringError::InvalidDisplay { width, height })
        }
    }

    /// Surface area in square logical pixels.
    #[must_use]
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Center of the surface.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The outcome of scoring one completed stroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Quality score in `0..=100`.
    pub score: u8,
    /// Feedback text shown to the player.
    pub message: String,
}

impl Evaluation {
    /// Build an evaluation from a score and the feedback it earned.
    #[must_use]
    pub fn new(score: u8, feedback: Feedback) -> Self {
        Self {
            score: score.min(100),
            message: feedback.message().to_string(),
        }
    }
}

/// A stroke together with the surface it was drawn on.
///
/// This is the JSON interchange format shared by the CLI and the
/// browser bindings:
///
/// ```json
/// {"display": {"width": 600, "height": 400}, "points": [{"x": 1, "y": 2}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRecord {
    /// Drawing surface size.
    pub display: DisplayExtent,
    /// Captured points in stroke order.
    pub points: Vec<Point>,
}

impl StrokeRecord {
    /// Parse and validate a stroke record from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Parse`] for malformed JSON,
    /// [`ScoringError::InvalidDisplay`] for a non-positive extent and
    /// [`ScoringError::NonFinitePoint`] for non-finite coordinates.
    pub fn from_json(json: &str) -> Result<Self, ScoringError> {
        let record: Self =
            serde_json::from_str(json).map_err(|e| ScoringError::Parse(e.to_string()))?;
        DisplayExtent::new(record.display.width, record.display.height)?;
        let stroke = Stroke::try_new(record.points)?;
        Ok(Self {
            display: record.display,
            points: stroke.into_points(),
        })
    }

    /// Copy the points into a [`Stroke`].
    #[must_use]
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.points.clone())
    }
}

/// Errors raised at the boundaries of the scorer.
///
/// Scoring itself is total and never fails; these cover input
/// validation and configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
pub enum ScoringError {
    /// The drawing surface size is not finite and positive.
    #[error("invalid display extent {width}x{height}: both sides must be finite and positive")]
    InvalidDisplay {
        /// Offending width.
        width: f64,
        /// Offending height.
        height: f64,
    },

    /// A point had a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Index of the first offending point.
        index: usize,
    },

    /// Scoring configuration is invalid.
    #[error("invalid scoring configuration: {0}")]
    InvalidConfig(String),

    /// A stroke record could not be parsed.
    #[error("failed to parse stroke record: {0}")]
    Parse(String),
}
