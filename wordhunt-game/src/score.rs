//! Round scoring and the per-difficulty high-score table.

use serde::{Deserialize, Serialize};

use crate::constants::{
    HIGH_SCORE_CAPACITY, ROUND_BASE_POINTS, SPEED_BONUS_FAST_MS, SPEED_BONUS_FAST_POINTS,
    SPEED_BONUS_QUICK_MS, SPEED_BONUS_QUICK_POINTS, SPEED_BONUS_STEADY_MS,
    SPEED_BONUS_STEADY_POINTS,
};

/// Points for one found word: a flat base plus a speed bonus.
#[must_use]
pub const fn round_score(round_time_ms: u32) -> u32 {
    ROUND_BASE_POINTS + speed_bonus(round_time_ms)
}

const fn speed_bonus(round_time_ms: u32) -> u32 {
    if round_time_ms < SPEED_BONUS_FAST_MS {
        SPEED_BONUS_FAST_POINTS
    } else if round_time_ms < SPEED_BONUS_QUICK_MS {
        SPEED_BONUS_QUICK_POINTS
    } else if round_time_ms < SPEED_BONUS_STEADY_MS {
        SPEED_BONUS_STEADY_POINTS
    } else {
        0
    }
}

/// One saved high score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    /// Whole seconds for the full game.
    pub time: u32,
    /// Milliseconds since epoch when the score was set.
    pub date: i64,
}

/// Top scores for one difficulty, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    #[serde(default)]
    pub entries: Vec<HighScore>,
}

impl HighScores {
    /// Insert an entry, keeping descending score order and the table cap.
    pub fn insert(&mut self, entry: HighScore) {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_CAPACITY);
    }

    #[must_use]
    pub fn best(&self) -> Option<&HighScore> {
        self.entries.first()
    }

    /// Whether a prospective score would make the table.
    #[must_use]
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < HIGH_SCORE_CAPACITY
            || self.entries.last().is_some_and(|worst| score > worst.score)
    }
}
