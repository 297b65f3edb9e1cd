//! The reference logo, used as the drawing guide and as a known-good
//! input.

use crate::types::{DisplayExtent, Point, Stroke};

/// Ring radius as a fraction of the shorter display side.
const RADIUS_FRACTION: f64 = 0.1;
/// Samples on the ring, every 10 degrees.
const RING_SAMPLES: u32 = 36;
/// Samples on the diagonal shaft, both ends included.
const SHAFT_SAMPLES: u32 = 25;
/// Samples on the arrowhead, including the shared tip.
const HEAD_SAMPLES: u32 = 6;

/// The canonical logo as one continuous stroke, centered in `display`.
///
/// A ring of radius `R = 0.1 * min(width, height)`, then a shaft from
/// the lower-left to the upper-right corner of the `3R` square around
/// it, then a short head turning back horizontally from the tip.
///
/// # Examples
///
/// ```
/// use ringmark_scoring::{DisplayExtent, evaluate, reference_logo};
///
/// let display = DisplayExtent::new(600.0, 600.0).unwrap();
/// let logo = reference_logo(display);
/// assert!(evaluate(logo.points(), display).score >= 85);
/// ```
#[must_use]
pub fn reference_logo(display: DisplayExtent) -> Stroke {
    let center = display.center();
    let radius = RADIUS_FRACTION * display.width.min(display.height);
    let half = 1.5 * radius;

    let mut points: Vec<Point> = (0..RING_SAMPLES)
        .map(|k| {
            let a = f64::from(5 + 10 * k).to_radians();
            Point::new(
                radius.mul_add(a.cos(), center.x),
                radius.mul_add(a.sin(), center.y),
            )
        })
        .collect();

    let tail = Point::new(center.x - half, center.y + half);
    let tip = Point::new(center.x + half, center.y - half);
    points.extend(segment(tail, tip, SHAFT_SAMPLES));

    let barb = Point::new(tip.x - 2.0 * radius / 3.0, tip.y);
    points.extend(segment(tip, barb, HEAD_SAMPLES).skip(1));

    Stroke::new(points)
}

/// `count` evenly spaced points from `from` to `to`, both included.
fn segment(from: Point, to: Point, count: u32) -> impl Iterator<Item = Point> {
    let steps = f64::from(count.saturating_sub(1).max(1));
    (0..count).map(move |k| {
        let t = f64::from(k) / steps;
        Point::new(
            (to.x - from.x).mul_add(t, from.x),
            (to.y - from.y).mul_add(t, from.y),
        )
    })
}
