//! Play-session records: built in memory over a game, persisted exactly
//! once at completion.

use serde::{Deserialize, Serialize};

/// One answered word within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub word: String,
    pub correct: bool,
    /// Taps the player needed for this word.
    pub attempts: u32,
    pub ms: u32,
}

/// One complete playthrough from word selection to completion.
///
/// The start timestamp doubles as the session id. Immutable once
/// persisted by `end_session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Session {
    /// Milliseconds since epoch at `start_session`.
    pub date: i64,
    pub mode: String,
    pub difficulty: String,
    #[serde(default)]
    pub words_attempted: u32,
    #[serde(default)]
    pub words_correct: u32,
    /// Whole seconds, set at session end.
    #[serde(default)]
    pub total_time: u32,
    /// Game score, computed by the caller and set at session end.
    #[serde(default)]
    pub score: u32,
    /// Words encountered, in play order; may repeat across rounds.
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub results: Vec<SessionResult>,
}

impl Session {
    #[must_use]
    pub fn begin(mode: &str, difficulty: &str, now_ms: i64) -> Self {
        Self {
            date: now_ms,
            mode: mode.to_string(),
            difficulty: difficulty.to_string(),
            ..Self::default()
        }
    }

    /// Append one answered word. In-memory only; nothing is persisted
    /// until the session ends.
    pub fn add_result(&mut self, word: &str, correct: bool, attempts: u32, ms: u32) {
        self.words_attempted += 1;
        if correct {
            self.words_correct += 1;
        }
        self.words.push(word.to_string());
        self.results.push(SessionResult {
            word: word.to_string(),
            correct,
            attempts,
            ms,
        });
    }

    /// Fraction of session words answered correctly on the first tap.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.words_attempted == 0 {
            0.0
        } else {
            f64::from(self.words_correct) / f64::from(self.words_attempted)
        }
    }
}
