//! Bounding frame and angle helpers shared by the feature detectors.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Smallest magnitude used as a denominator.
///
/// Degenerate strokes (a single repeated point, a perfectly horizontal
/// line) produce zero-width or zero-height boxes; dividing by this
/// instead keeps every ratio finite.
pub const EPSILON: f64 = 1e-6;

/// Replace a denominator below [`EPSILON`] with [`EPSILON`].
#[must_use]
pub const fn guard(denominator: f64) -> f64 {
    if denominator < EPSILON {
        EPSILON
    } else {
        denominator
    }
}

/// The stroke's axis-aligned bounding box, the local reference frame
/// for every heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Smallest x of any point.
    pub min_x: f64,
    /// Largest x of any point.
    pub max_x: f64,
    /// Smallest y of any point.
    pub min_y: f64,
    /// Largest y of any point.
    pub max_y: f64,
}

impl Frame {
    /// Compute the bounding box of `points`.
    ///
    /// Returns `None` for an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringmark_scoring::Point;
    /// use ringmark_scoring::geometry::Frame;
    ///
    /// let frame = Frame::from_points(&[Point::new(1.0, 5.0), Point::new(4.0, 1.0)]).unwrap();
    /// assert_eq!(frame.width(), 3.0);
    /// assert_eq!(frame.height(), 4.0);
    /// assert_eq!(frame.center(), Point::new(2.5, 3.0));
    /// ```
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |f, p| Self {
            min_x: f.min_x.min(p.x),
            max_x: f.max_x.max(p.x),
            min_y: f.min_y.min(p.y),
            max_y: f.max_y.max(p.y),
        }))
    }

    /// Horizontal extent of the drawing.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent of the drawing.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Area of the box.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether every edge is a finite coordinate.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
    }

    /// `width / height`, with the height guarded against zero.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / guard(self.height())
    }
}

/// Angle of `p` around `center`, normalized to `[0, 2π)`.
#[must_use]
pub fn polar_angle(center: Point, p: Point) -> f64 {
    let a = center.direction_to(p);
    let a = if a < 0.0 { a + TAU } else { a };
    // -0.0 + TAU rounds to exactly TAU for tiny negative angles.
    if a >= TAU { 0.0 } else { a }
}

/// Absolute change of direction at `b` when travelling `a -> b -> c`,
/// wrapped into `[0, π]`.
///
/// A zero-length segment has heading `atan2(0, 0) = 0`, so a repeated
/// sample reads as a turn toward the positive x axis and back.
#[must_use]
pub fn turning_angle(a: Point, b: Point, c: Point) -> f64 {
    let diff = (b.direction_to(c) - a.direction_to(b)).abs();
    if diff > PI { TAU - diff } else { diff }
}
