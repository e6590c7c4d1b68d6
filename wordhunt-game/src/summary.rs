//! Aggregate progress summary and the dashboard's derived views.

use serde::{Deserialize, Serialize};

use crate::constants::{STRUGGLING_ACCURACY_CUTOFF, STRUGGLING_WRONG_THRESHOLD};
use crate::mastery::MasteryBand;
use crate::record::WordRecord;

/// Global singleton persisted under `progress-summary`; lazily created
/// with zeroed defaults on first read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProgressSummary {
    #[serde(default)]
    pub total_sessions: u32,
    /// Words at Practising mastery or better, recomputed in full at every
    /// session end; counts (difficulty, word) pairs.
    #[serde(default)]
    pub total_words_learned: u32,
    /// Start timestamp of the most recent completed session.
    #[serde(default)]
    pub last_session: i64,
}

/// One catalog word with its record and derived mastery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordOverview {
    pub difficulty: String,
    pub mastery: u8,
    pub record: WordRecord,
}

/// The whole catalog partitioned by mastery status.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordsByStatus {
    pub mastered: Vec<WordOverview>,
    pub almost_there: Vec<WordOverview>,
    pub practising: Vec<WordOverview>,
    pub learning: Vec<WordOverview>,
    /// Never attempted, whatever the nominal mastery band says.
    pub unseen: Vec<WordOverview>,
}

impl WordsByStatus {
    pub(crate) fn insert(&mut self, overview: WordOverview) {
        if overview.record.attempts == 0 {
            self.unseen.push(overview);
            return;
        }
        match MasteryBand::from_score(overview.mastery) {
            MasteryBand::Mastered => self.mastered.push(overview),
            MasteryBand::AlmostThere => self.almost_there.push(overview),
            MasteryBand::Practising => self.practising.push(overview),
            MasteryBand::Learning => self.learning.push(overview),
        }
    }
}

/// Repeatedly missed and still below even odds.
#[must_use]
pub(crate) fn is_struggling(record: &WordRecord) -> bool {
    record.wrong_first > STRUGGLING_WRONG_THRESHOLD
        && record.accuracy() < STRUGGLING_ACCURACY_CUTOFF
}
