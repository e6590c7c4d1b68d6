//! Mastery scoring: lifetime accuracy blended with a recency decay and a
//! cross-session consistency bonus.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CONSISTENCY_BONUS_CAP, CONSISTENCY_BONUS_PER_DAY, MASTERY_ALMOST_THERE_MIN,
    MASTERY_MASTERED_MIN, MASTERY_PRACTISING_MIN, MILLIS_PER_DAY, RECENCY_DECAY_DAYS,
    RECENCY_FLOOR, RECENCY_IDLE_DEFAULT_DAYS,
};
use crate::leitner;
use crate::record::WordRecord;

/// Compute the 0-100 mastery score for a word record at `now_ms`.
///
/// `accuracy * recency * consistency * 100`, where recency decays from 1.0
/// toward 0.5 over idle days and consistency rewards correct answers
/// spread across distinct calendar days. Pure in the record and the clock.
#[must_use]
pub fn calculate_mastery(record: &WordRecord, now_ms: i64) -> u8 {
    if record.attempts == 0 {
        return 0;
    }

    let accuracy = record.accuracy();

    let days_since_seen = if record.last_seen > 0 {
        (now_ms - record.last_seen) as f64 / MILLIS_PER_DAY as f64
    } else {
        RECENCY_IDLE_DEFAULT_DAYS
    };
    let recency = RECENCY_FLOOR + RECENCY_FLOOR * (-days_since_seen / RECENCY_DECAY_DAYS).exp();

    let correct_days = leitner::unique_correct_days(&record.sessions);
    let consistency =
        (1.0 + correct_days as f64 * CONSISTENCY_BONUS_PER_DAY).min(CONSISTENCY_BONUS_CAP);

    let score = (accuracy * recency * consistency * 100.0).round().min(100.0);
    score as u8
}

/// Mastery band, bounded below at 40 / 70 / 90.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MasteryBand {
    Learning,
    Practising,
    AlmostThere,
    Mastered,
}

impl MasteryBand {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= MASTERY_MASTERED_MIN {
            Self::Mastered
        } else if score >= MASTERY_ALMOST_THERE_MIN {
            Self::AlmostThere
        } else if score >= MASTERY_PRACTISING_MIN {
            Self::Practising
        } else {
            Self::Learning
        }
    }

    /// Label shown to the player.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Learning => "Learning",
            Self::Practising => "Practising",
            Self::AlmostThere => "Almost there",
            Self::Mastered => "Mastered",
        }
    }
}
