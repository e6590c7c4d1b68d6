//! Centralized tuning constants for the learning engine.
//!
//! These values define the deterministic math for mastery scoring, Leitner
//! scheduling, and adaptive selection. Keeping them together ensures that
//! balance can only be adjusted via code changes reviewed in version
//! control, rather than through external assets.

// Storage ------------------------------------------------------------------
pub(crate) const STORAGE_SCHEMA_VERSION: u32 = 1;
pub(crate) const SESSION_RETENTION_DAYS: i64 = 90;
pub(crate) const MILLIS_PER_DAY: i64 = 86_400_000;

// Attempt log --------------------------------------------------------------
pub(crate) const ATTEMPT_LOG_CAPACITY: usize = 10;
pub(crate) const LATENCY_SMOOTHING_WEIGHT: f64 = 0.3;

// Mastery score ------------------------------------------------------------
pub(crate) const MASTERY_PRACTISING_MIN: u8 = 40;
pub(crate) const MASTERY_ALMOST_THERE_MIN: u8 = 70;
pub(crate) const MASTERY_MASTERED_MIN: u8 = 90;

pub(crate) const RECENCY_FLOOR: f64 = 0.5;
pub(crate) const RECENCY_DECAY_DAYS: f64 = 7.0;
pub(crate) const RECENCY_IDLE_DEFAULT_DAYS: f64 = 14.0;
pub(crate) const CONSISTENCY_BONUS_PER_DAY: f64 = 0.1;
pub(crate) const CONSISTENCY_BONUS_CAP: f64 = 1.3;

// Leitner advancement ------------------------------------------------------
pub(crate) const PROMOTE_LEARNING_CORRECT: u32 = 2;
pub(crate) const PROMOTE_FAMILIAR_CORRECT: u32 = 4;
pub(crate) const PROMOTE_FAMILIAR_DAYS: usize = 2;
pub(crate) const PROMOTE_KNOWN_CORRECT: u32 = 6;
pub(crate) const PROMOTE_KNOWN_DAYS: usize = 3;

// Adaptive selection mix ---------------------------------------------------
pub(crate) const SELECT_MIX_NEW: f64 = 0.2;
pub(crate) const SELECT_MIX_LEARNING: f64 = 0.3;
pub(crate) const SELECT_MIX_FAMILIAR: f64 = 0.3;
pub(crate) const SELECT_MIX_KNOWN: f64 = 0.2;
pub(crate) const SELECT_NEW_MIN: usize = 1;

// Distractor counts (total buttons shown, target included) -----------------
pub(crate) const BUTTONS_LEARNING: usize = 4;
pub(crate) const BUTTONS_PRACTISING: usize = 6;
pub(crate) const BUTTONS_ALMOST_THERE: usize = 8;
pub(crate) const BUTTONS_MASTERED: usize = 10;

// Struggling-word cutoffs --------------------------------------------------
pub(crate) const STRUGGLING_WRONG_THRESHOLD: u32 = 3;
pub(crate) const STRUGGLING_ACCURACY_CUTOFF: f64 = 0.5;

// Round scoring ------------------------------------------------------------
pub(crate) const ROUND_BASE_POINTS: u32 = 100;
pub(crate) const SPEED_BONUS_FAST_MS: u32 = 2_000;
pub(crate) const SPEED_BONUS_FAST_POINTS: u32 = 100;
pub(crate) const SPEED_BONUS_QUICK_MS: u32 = 4_000;
pub(crate) const SPEED_BONUS_QUICK_POINTS: u32 = 50;
pub(crate) const SPEED_BONUS_STEADY_MS: u32 = 7_000;
pub(crate) const SPEED_BONUS_STEADY_POINTS: u32 = 25;
pub(crate) const HIGH_SCORE_CAPACITY: usize = 3;

/// Number of words a single game asks the player to find.
pub const WORDS_PER_GAME: usize = 10;
