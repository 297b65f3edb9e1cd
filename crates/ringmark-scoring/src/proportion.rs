//! Size and aspect-ratio scoring relative to the drawing surface.

use serde::{Deserialize, Serialize};

use crate::config::ProportionConfig;
use crate::geometry::{Frame, guard};
use crate::types::DisplayExtent;

/// Proportion measurements and the resulting multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionAnalysis {
    /// Drawing bounding-box area over surface area.
    pub size_ratio: f64,
    /// Drawing `width / height`.
    pub aspect_ratio: f64,
    /// Product of the applicable penalties, in `[0, 1]`.
    pub score: f64,
}

/// Score how well the drawing fills the surface.
///
/// Starts at 1 and applies independent multiplicative penalties: a
/// linear ramp for tiny drawings, a flat penalty for oversized ones and
/// a flat penalty for boxes that are far from square.
#[must_use]
pub fn analyze(frame: &Frame, display: DisplayExtent, config: &ProportionConfig) -> ProportionAnalysis {
    let size_ratio = frame.area() / guard(display.area());
    let aspect_ratio = frame.aspect_ratio();

    let mut score = 1.0;
    if size_ratio < config.min_size_ratio {
        score *= size_ratio / config.min_size_ratio;
    }
    if size_ratio > config.max_size_ratio {
        score *= config.oversize_penalty;
    }
    if aspect_ratio < config.min_aspect || aspect_ratio > config.max_aspect {
        score *= config.aspect_penalty;
    }

    ProportionAnalysis {
        size_ratio,
        aspect_ratio,
        score,
    }
}
