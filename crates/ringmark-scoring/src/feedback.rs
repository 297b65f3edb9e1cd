//! Feedback messages shown with a score.

use serde::{Deserialize, Serialize};

/// The message a player sees after a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    /// Too few points to evaluate.
    TooShort,
    /// Ring present, arrow missing.
    RingOnly,
    /// Arrow present, ring missing.
    ArrowOnly,
    /// Both present, score 95 or higher.
    Mastery,
    /// Both present, score 85 or higher.
    Excellent,
    /// Both present, score 70 or higher.
    Great,
    /// Both present, score 55 or higher.
    Good,
    /// Both present but weak.
    GettingThere,
    /// Neither feature present.
    KeepTrying,
}

impl Feedback {
    /// Pick the feedback for a scored stroke.
    ///
    /// Missing-feature messages take priority over score tiers; score
    /// tiers only apply when both features are present.
    #[must_use]
    pub const fn select(has_ring: bool, has_arrow: bool, score: u8) -> Self {
        match (has_ring, has_arrow) {
            (true, false) => Self::RingOnly,
            (false, true) => Self::ArrowOnly,
            (true, true) => match score {
                95.. => Self::Mastery,
                85.. => Self::Excellent,
                70.. => Self::Great,
                55.. => Self::Good,
                _ => Self::GettingThere,
            },
            (false, false) => Self::KeepTrying,
        }
    }

    /// Text shown to the player.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Draw the complete logo!",
            Self::RingOnly => "Nice ring! Add a clear arrow.",
            Self::ArrowOnly => "Arrow spotted! Add a proper ring.",
            Self::Mastery => "Perfect! Master-level logo!",
            Self::Excellent => "Excellent! Nearly perfect logo!",
            Self::Great => "Great work! Very recognizable!",
            Self::Good => "Good job! Nice logo elements!",
            Self::GettingThere => "Getting there! Strengthen ring + arrow!",
            Self::KeepTrying => "Keep trying! Make the ring and arrow.",
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
