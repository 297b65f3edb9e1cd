//! Best score and attempt count across strokes.

use serde::{Deserialize, Serialize};

/// Counters for the current visit. Nothing is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Highest score seen so far.
    pub best_score: u8,
    /// Number of evaluated strokes, including too-short ones.
    pub attempts: u32,
}

impl Session {
    /// Count one attempt and keep the best score.
    pub fn record(&mut self, score: u8) {
        self.attempts = self.attempts.saturating_add(1);
        self.best_score = self.best_score.max(score);
    }

    /// Zero both counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
