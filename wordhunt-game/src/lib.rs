//! Word Hunt Learning Engine
//!
//! Platform-agnostic core logic for the Word Hunt early-reader matching
//! game: per-word progress tracking, Leitner-box spaced repetition,
//! mastery scoring, session logging, and adaptive word selection. This
//! crate provides the whole learning model without UI, audio, or
//! platform-specific dependencies.

pub mod constants;
pub mod engine;
pub mod leitner;
pub mod mastery;
pub mod record;
pub mod score;
pub mod select;
pub mod session;
pub mod settings;
pub mod storage;
pub mod summary;
pub mod words;

// Re-export commonly used types
pub use constants::WORDS_PER_GAME;
pub use engine::ProgressEngine;
pub use leitner::{LeitnerBox, is_due};
pub use mastery::{MasteryBand, calculate_mastery};
pub use record::{AttemptSample, WordRecord};
pub use score::{HighScore, HighScores, round_score};
pub use select::{PoolEntry, distractor_count, select_adaptive_with_rng};
pub use session::{Session, SessionResult};
pub use settings::Settings;
pub use storage::{LoadSource, Loaded, MemoryStorage};
pub use summary::{ProgressSummary, WordOverview, WordsByStatus};
pub use words::{CatalogError, WordCatalog, WordSet};

/// Trait for abstracting the key-value persistence medium.
/// Platform-specific implementations should provide this.
pub trait KeyValueStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written (for example, a
    /// quota-exceeded condition).
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;

    /// List every stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be enumerated.
    fn keys(&self) -> Result<Vec<String>, Self::Error>;
}

/// Wall-clock source, abstracted so scoring and scheduling stay
/// deterministic under test.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as i64)
    }
}
