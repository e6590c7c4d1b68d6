//! Per-word tracking records and their answer-event transitions.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{ATTEMPT_LOG_CAPACITY, LATENCY_SMOOTHING_WEIGHT};
use crate::leitner::{self, LeitnerBox};

/// One answered round, as kept in the bounded attempt log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSample {
    /// Milliseconds since epoch.
    pub date: i64,
    pub correct: bool,
    /// Response latency for the round.
    pub ms: u32,
}

/// Lifetime tracking state for a single word or letter, keyed by its
/// lowercased text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WordRecord {
    pub word: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub wrong_first: u32,
    /// Consecutive corrects without a miss.
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub best_streak: u32,
    /// Milliseconds since epoch; 0 if never seen.
    #[serde(default)]
    pub last_seen: i64,
    #[serde(default)]
    pub last_correct: i64,
    #[serde(default)]
    pub leitner_box: LeitnerBox,
    /// Exponentially smoothed response latency; 0 until the first correct.
    #[serde(default)]
    pub avg_response_ms: u32,
    /// Most recent answer events, oldest dropped on overflow.
    #[serde(default)]
    pub sessions: SmallVec<[AttemptSample; ATTEMPT_LOG_CAPACITY]>,
}

impl WordRecord {
    #[must_use]
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_lowercase(),
            ..Self::default()
        }
    }

    /// Lifetime accuracy in `[0, 1]`; 0 when never attempted.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }

    /// Apply a correct first-tap answer: bump counters and streaks, fold
    /// the latency sample into the smoothed average, log the event, and
    /// run the box-promotion check.
    pub fn apply_correct(&mut self, now_ms: i64, response_ms: u32) {
        self.attempts += 1;
        self.correct += 1;
        self.streak += 1;
        if self.streak > self.best_streak {
            self.best_streak = self.streak;
        }
        self.last_seen = now_ms;
        self.last_correct = now_ms;
        self.avg_response_ms = smooth_latency(self.avg_response_ms, response_ms);
        self.push_sample(AttemptSample {
            date: now_ms,
            correct: true,
            ms: response_ms,
        });
        leitner::maybe_advance(self);
    }

    /// Apply a wrong answer: bump counters, zero the streak, log the
    /// event, and demote one box (floor box 1). The latency average is
    /// left untouched.
    pub fn apply_wrong(&mut self, now_ms: i64, response_ms: u32) {
        self.attempts += 1;
        self.wrong_first += 1;
        self.streak = 0;
        self.last_seen = now_ms;
        self.push_sample(AttemptSample {
            date: now_ms,
            correct: false,
            ms: response_ms,
        });
        self.leitner_box = self.leitner_box.demoted();
    }

    fn push_sample(&mut self, sample: AttemptSample) {
        self.sessions.push(sample);
        if self.sessions.len() > ATTEMPT_LOG_CAPACITY {
            self.sessions.remove(0);
        }
    }
}

fn smooth_latency(avg_ms: u32, sample_ms: u32) -> u32 {
    if avg_ms == 0 {
        return sample_ms;
    }
    let blended = f64::from(avg_ms) * (1.0 - LATENCY_SMOOTHING_WEIGHT)
        + f64::from(sample_ms) * LATENCY_SMOOTHING_WEIGHT;
    blended.round() as u32
}
