//! Tunable thresholds and weights for the scorer.
//!
//! [`ScoringConfig::default`] reproduces the canonical game constants.
//! Every section deserializes with `#[serde(default)]`, so a JSON
//! config only needs to name the values it changes.

use serde::{Deserialize, Serialize};

use crate::types::ScoringError;

/// Full scorer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Strokes shorter than this score zero without further analysis.
    pub min_points: usize,
    /// Ring (circle) detection.
    pub ring: RingConfig,
    /// Arrow (straight shaft + sharp corner) detection.
    pub arrow: ArrowConfig,
    /// Size and aspect penalties.
    pub proportion: ProportionConfig,
    /// Smoothness is only measured on strokes longer than this.
    pub smoothness_min_points: usize,
    /// Weights of the aggregate score.
    pub weights: ScoreWeights,
    /// Caps and bonus applied after weighting.
    pub limits: ScoreLimits,
}

impl ScoringConfig {
    /// Default for [`min_points`](Self::min_points).
    pub const DEFAULT_MIN_POINTS: usize = 15;
    /// Default for [`smoothness_min_points`](Self::smoothness_min_points).
    pub const DEFAULT_SMOOTHNESS_MIN_POINTS: usize = 20;

    /// Check every value for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidConfig`] naming the first
    /// offending field.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.min_points == 0 {
            return Err(invalid("min_points must be at least 1"));
        }
        self.ring.validate()?;
        self.arrow.validate()?;
        self.proportion.validate()?;
        self.weights.validate()?;
        self.limits.validate()
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_points: Self::DEFAULT_MIN_POINTS,
            ring: RingConfig::default(),
            arrow: ArrowConfig::default(),
            proportion: ProportionConfig::default(),
            smoothness_min_points: Self::DEFAULT_SMOOTHNESS_MIN_POINTS,
            weights: ScoreWeights::default(),
            limits: ScoreLimits::default(),
        }
    }
}

/// Ring detection parameters.
///
/// The expected radius is `min(width, height) / radius_divisor` of the
/// stroke's bounding box; a point lies on the ring when its distance
/// from the box center is within
/// `[band_low, band_high] * expected_radius`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Divisor applied to the shorter bounding-box side.
    pub radius_divisor: f64,
    /// Lower edge of the tolerance band, as a fraction of the radius.
    pub band_low: f64,
    /// Upper edge of the tolerance band, as a fraction of the radius.
    pub band_high: f64,
    /// Number of equal angular buckets around the full circle.
    pub buckets: usize,
    /// Minimum ring score for the ring to count as present.
    pub threshold: f64,
}

impl RingConfig {
    /// Default for [`radius_divisor`](Self::radius_divisor).
    pub const DEFAULT_RADIUS_DIVISOR: f64 = 3.0;
    /// Default for [`band_low`](Self::band_low).
    pub const DEFAULT_BAND_LOW: f64 = 0.75;
    /// Default for [`band_high`](Self::band_high).
    pub const DEFAULT_BAND_HIGH: f64 = 1.25;
    /// Default for [`buckets`](Self::buckets): 10 degrees each.
    pub const DEFAULT_BUCKETS: usize = 36;
    /// Default for [`threshold`](Self::threshold).
    pub const DEFAULT_THRESHOLD: f64 = 0.4;
    /// Largest accepted [`buckets`](Self::buckets): a tenth of a degree.
    pub const MAX_BUCKETS: usize = 3600;

    fn validate(&self) -> Result<(), ScoringError> {
        if !(self.radius_divisor.is_finite() && self.radius_divisor > 0.0) {
            return Err(invalid("ring.radius_divisor must be finite and positive"));
        }
        if !(self.band_low.is_finite() && self.band_high.is_finite()) {
            return Err(invalid("ring band edges must be finite"));
        }
        if self.band_low < 0.0 || self.band_low > self.band_high {
            return Err(invalid("ring band must satisfy 0 <= band_low <= band_high"));
        }
        if self.buckets == 0 || self.buckets > Self::MAX_BUCKETS {
            return Err(invalid(&format!(
                "ring.buckets must be between 1 and {}",
                Self::MAX_BUCKETS
            )));
        }
        check_unit("ring.threshold", self.threshold)
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius_divisor: Self::DEFAULT_RADIUS_DIVISOR,
            band_low: Self::DEFAULT_BAND_LOW,
            band_high: Self::DEFAULT_BAND_HIGH,
            buckets: Self::DEFAULT_BUCKETS,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Arrow detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    /// A stride-2 window is straight when its straightness exceeds this.
    pub straightness: f64,
    /// Straight windows needed per point for a full straight score.
    pub straight_density: f64,
    /// Lower bound (exclusive) of the diagonal direction band, degrees.
    pub diagonal_min_degrees: f64,
    /// Upper bound (exclusive) of the diagonal direction band, degrees.
    pub diagonal_max_degrees: f64,
    /// Turning angle, in radians, above which a point is a sharp corner.
    pub corner_angle: f64,
    /// Sharp corners needed for a full corner score.
    pub corner_target: f64,
    /// Both the straight and corner cues must exceed this for the
    /// combined arrow formula to apply.
    pub cue_threshold: f64,
    /// Score multiplier when only one cue is present.
    pub single_cue_factor: f64,
    /// Minimum arrow score for the arrow to count as present.
    pub threshold: f64,
}

impl ArrowConfig {
    /// Default for [`straightness`](Self::straightness).
    pub const DEFAULT_STRAIGHTNESS: f64 = 0.98;
    /// Default for [`straight_density`](Self::straight_density).
    pub const DEFAULT_STRAIGHT_DENSITY: f64 = 0.12;
    /// Default for [`diagonal_min_degrees`](Self::diagonal_min_degrees).
    pub const DEFAULT_DIAGONAL_MIN_DEGREES: f64 = 30.0;
    /// Default for [`diagonal_max_degrees`](Self::diagonal_max_degrees).
    pub const DEFAULT_DIAGONAL_MAX_DEGREES: f64 = 150.0;
    /// Default for [`corner_angle`](Self::corner_angle), about 51 degrees.
    pub const DEFAULT_CORNER_ANGLE: f64 = 0.9;
    /// Default for [`corner_target`](Self::corner_target).
    pub const DEFAULT_CORNER_TARGET: f64 = 3.0;
    /// Default for [`cue_threshold`](Self::cue_threshold).
    pub const DEFAULT_CUE_THRESHOLD: f64 = 0.2;
    /// Default for [`single_cue_factor`](Self::single_cue_factor).
    pub const DEFAULT_SINGLE_CUE_FACTOR: f64 = 0.3;
    /// Default for [`threshold`](Self::threshold).
    pub const DEFAULT_THRESHOLD: f64 = 0.35;

    fn validate(&self) -> Result<(), ScoringError> {
        check_unit("arrow.straightness", self.straightness)?;
        check_positive("arrow.straight_density", self.straight_density)?;
        check_positive("arrow.corner_target", self.corner_target)?;
        check_non_negative("arrow.corner_angle", self.corner_angle)?;
        if !(self.diagonal_min_degrees.is_finite() && self.diagonal_max_degrees.is_finite())
            || self.diagonal_min_degrees >= self.diagonal_max_degrees
        {
            return Err(invalid(
                "arrow diagonal band must be finite with min < max degrees",
            ));
        }
        check_unit("arrow.cue_threshold", self.cue_threshold)?;
        check_unit("arrow.single_cue_factor", self.single_cue_factor)?;
        check_unit("arrow.threshold", self.threshold)
    }
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            straightness: Self::DEFAULT_STRAIGHTNESS,
            straight_density: Self::DEFAULT_STRAIGHT_DENSITY,
            diagonal_min_degrees: Self::DEFAULT_DIAGONAL_MIN_DEGREES,
            diagonal_max_degrees: Self::DEFAULT_DIAGONAL_MAX_DEGREES,
            corner_angle: Self::DEFAULT_CORNER_ANGLE,
            corner_target: Self::DEFAULT_CORNER_TARGET,
            cue_threshold: Self::DEFAULT_CUE_THRESHOLD,
            single_cue_factor: Self::DEFAULT_SINGLE_CUE_FACTOR,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }
}

/// Size and aspect-ratio penalties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProportionConfig {
    /// Drawings covering less than this fraction of the surface are
    /// penalized linearly down to zero.
    pub min_size_ratio: f64,
    /// Drawings covering more than this fraction are penalized.
    pub max_size_ratio: f64,
    /// Multiplier for oversized drawings.
    pub oversize_penalty: f64,
    /// Lowest acceptable `width / height` of the bounding box.
    pub min_aspect: f64,
    /// Highest acceptable `width / height` of the bounding box.
    pub max_aspect: f64,
    /// Multiplier for drawings outside the aspect range.
    pub aspect_penalty: f64,
}

impl ProportionConfig {
    /// Default for [`min_size_ratio`](Self::min_size_ratio).
    pub const DEFAULT_MIN_SIZE_RATIO: f64 = 0.02;
    /// Default for [`max_size_ratio`](Self::max_size_ratio).
    pub const DEFAULT_MAX_SIZE_RATIO: f64 = 0.4;
    /// Default for [`oversize_penalty`](Self::oversize_penalty).
    pub const DEFAULT_OVERSIZE_PENALTY: f64 = 0.8;
    /// Default for [`min_aspect`](Self::min_aspect).
    pub const DEFAULT_MIN_ASPECT: f64 = 0.7;
    /// Default for [`max_aspect`](Self::max_aspect).
    pub const DEFAULT_MAX_ASPECT: f64 = 1.4;
    /// Default for [`aspect_penalty`](Self::aspect_penalty).
    pub const DEFAULT_ASPECT_PENALTY: f64 = 0.85;

    fn validate(&self) -> Result<(), ScoringError> {
        check_positive("proportion.min_size_ratio", self.min_size_ratio)?;
        check_positive("proportion.max_size_ratio", self.max_size_ratio)?;
        if self.min_size_ratio > self.max_size_ratio {
            return Err(invalid(
                "proportion.min_size_ratio must not exceed max_size_ratio",
            ));
        }
        check_unit("proportion.oversize_penalty", self.oversize_penalty)?;
        check_positive("proportion.min_aspect", self.min_aspect)?;
        check_positive("proportion.max_aspect", self.max_aspect)?;
        if self.min_aspect > self.max_aspect {
            return Err(invalid("proportion.min_aspect must not exceed max_aspect"));
        }
        check_unit("proportion.aspect_penalty", self.aspect_penalty)
    }
}

impl Default for ProportionConfig {
    fn default() -> Self {
        Self {
            min_size_ratio: Self::DEFAULT_MIN_SIZE_RATIO,
            max_size_ratio: Self::DEFAULT_MAX_SIZE_RATIO,
            oversize_penalty: Self::DEFAULT_OVERSIZE_PENALTY,
            min_aspect: Self::DEFAULT_MIN_ASPECT,
            max_aspect: Self::DEFAULT_MAX_ASPECT,
            aspect_penalty: Self::DEFAULT_ASPECT_PENALTY,
        }
    }
}

/// Weights of the sub-scores in the aggregate (before scaling to 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the joint-feature completeness score.
    pub completeness: f64,
    /// Weight of the ring score.
    pub ring: f64,
    /// Weight of the arrow score.
    pub arrow: f64,
    /// Weight of the proportion score.
    pub proportion: f64,
    /// Weight of the smoothness score.
    pub smoothness: f64,
}

impl ScoreWeights {
    /// Default completeness weight.
    pub const DEFAULT_COMPLETENESS: f64 = 0.5;
    /// Default ring weight.
    pub const DEFAULT_RING: f64 = 0.25;
    /// Default arrow weight.
    pub const DEFAULT_ARROW: f64 = 0.15;
    /// Default proportion weight.
    pub const DEFAULT_PROPORTION: f64 = 0.07;
    /// Default smoothness weight.
    pub const DEFAULT_SMOOTHNESS: f64 = 0.03;

    fn validate(&self) -> Result<(), ScoringError> {
        check_non_negative("weights.completeness", self.completeness)?;
        check_non_negative("weights.ring", self.ring)?;
        check_non_negative("weights.arrow", self.arrow)?;
        check_non_negative("weights.proportion", self.proportion)?;
        check_non_negative("weights.smoothness", self.smoothness)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            completeness: Self::DEFAULT_COMPLETENESS,
            ring: Self::DEFAULT_RING,
            arrow: Self::DEFAULT_ARROW,
            proportion: Self::DEFAULT_PROPORTION,
            smoothness: Self::DEFAULT_SMOOTHNESS,
        }
    }
}

/// Joint-feature completeness, caps for single-feature drawings and the
/// mastery bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreLimits {
    /// `(ring + arrow) / completeness_divisor` when both are present.
    pub completeness_divisor: f64,
    /// Factor applied to the stronger feature when only one is present.
    pub partial_completeness_factor: f64,
    /// Highest total for a ring without an arrow.
    pub ring_only_cap: f64,
    /// Highest total for an arrow without a ring.
    pub arrow_only_cap: f64,
    /// Points added for a complete, smooth drawing.
    pub mastery_bonus: f64,
    /// Completeness and smoothness must both exceed this for the bonus.
    pub mastery_threshold: f64,
}

impl ScoreLimits {
    /// Default for [`completeness_divisor`](Self::completeness_divisor).
    pub const DEFAULT_COMPLETENESS_DIVISOR: f64 = 1.6;
    /// Default for [`partial_completeness_factor`](Self::partial_completeness_factor).
    pub const DEFAULT_PARTIAL_COMPLETENESS_FACTOR: f64 = 0.5;
    /// Default for [`ring_only_cap`](Self::ring_only_cap).
    pub const DEFAULT_RING_ONLY_CAP: f64 = 50.0;
    /// Default for [`arrow_only_cap`](Self::arrow_only_cap).
    pub const DEFAULT_ARROW_ONLY_CAP: f64 = 60.0;
    /// Default for [`mastery_bonus`](Self::mastery_bonus).
    pub const DEFAULT_MASTERY_BONUS: f64 = 3.0;
    /// Default for [`mastery_threshold`](Self::mastery_threshold).
    pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.7;

    fn validate(&self) -> Result<(), ScoringError> {
        check_positive("limits.completeness_divisor", self.completeness_divisor)?;
        check_unit(
            "limits.partial_completeness_factor",
            self.partial_completeness_factor,
        )?;
        check_non_negative("limits.ring_only_cap", self.ring_only_cap)?;
        check_non_negative("limits.arrow_only_cap", self.arrow_only_cap)?;
        check_non_negative("limits.mastery_bonus", self.mastery_bonus)?;
        check_unit("limits.mastery_threshold", self.mastery_threshold)
    }
}

impl Default for ScoreLimits {
    fn default() -> Self {
        Self {
            completeness_divisor: Self::DEFAULT_COMPLETENESS_DIVISOR,
            partial_completeness_factor: Self::DEFAULT_PARTIAL_COMPLETENESS_FACTOR,
            ring_only_cap: Self::DEFAULT_RING_ONLY_CAP,
            arrow_only_cap: Self::DEFAULT_ARROW_ONLY_CAP,
            mastery_bonus: Self::DEFAULT_MASTERY_BONUS,
            mastery_threshold: Self::DEFAULT_MASTERY_THRESHOLD,
        }
    }
}

fn invalid(reason: &str) -> ScoringError {
    ScoringError::InvalidConfig(reason.to_string())
}

fn check_unit(name: &str, value: f64) -> Result<(), ScoringError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScoringError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

fn check_positive(name: &str, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScoringError::InvalidConfig(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ScoringError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScoringError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}
