//! Engine facade binding a storage backend, the word catalog, and a clock.
//!
//! Constructed once at startup and handed by reference to whatever needs
//! it; there is no ambient global state. Every read degrades to a typed
//! default (best-effort persistence), every write propagates the backend's
//! error to the caller.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::{MASTERY_PRACTISING_MIN, MILLIS_PER_DAY, SESSION_RETENTION_DAYS};
use crate::mastery::{self, MasteryBand};
use crate::record::WordRecord;
use crate::score::{HighScore, HighScores};
use crate::select::{self, PoolEntry};
use crate::session::Session;
use crate::settings::Settings;
use crate::storage::{self, LoadSource, Loaded};
use crate::summary::{self, ProgressSummary, WordOverview, WordsByStatus};
use crate::words::WordCatalog;
use crate::{Clock, KeyValueStorage, SystemClock};

/// The progress-tracking and adaptive-learning engine.
pub struct ProgressEngine<S, C = SystemClock>
where
    S: KeyValueStorage,
    C: Clock,
{
    storage: S,
    catalog: WordCatalog,
    clock: C,
}

impl<S: KeyValueStorage> ProgressEngine<S, SystemClock> {
    /// Create an engine on the system clock.
    pub const fn new(storage: S, catalog: WordCatalog) -> Self {
        Self::with_clock(storage, catalog, SystemClock)
    }
}

impl<S, C> ProgressEngine<S, C>
where
    S: KeyValueStorage,
    C: Clock,
{
    pub const fn with_clock(storage: S, catalog: WordCatalog, clock: C) -> Self {
        Self {
            storage,
            catalog,
            clock,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    // Per-word tracking -----------------------------------------------------

    /// Tracking data for a word, or a fresh record; absence is not an
    /// error. The tag tells a fresh record apart from one recovered after
    /// a corrupt read.
    #[must_use]
    pub fn word_record(&self, word: &str) -> Loaded<WordRecord> {
        self.read_record(word)
    }

    /// Record a correct first-tap answer and persist the updated record.
    ///
    /// # Errors
    ///
    /// Propagates a storage write failure; the returned in-memory update
    /// is applied regardless.
    pub fn record_correct(&self, word: &str, response_ms: u32) -> Result<WordRecord, S::Error> {
        let mut record = self.read_record(word).into_value();
        record.apply_correct(self.clock.now_ms(), response_ms);
        self.write(&storage::word_key(word), &record)?;
        Ok(record)
    }

    /// Record a wrong answer and persist the updated record.
    ///
    /// # Errors
    ///
    /// Propagates a storage write failure.
    pub fn record_wrong(&self, word: &str, response_ms: u32) -> Result<WordRecord, S::Error> {
        let mut record = self.read_record(word).into_value();
        record.apply_wrong(self.clock.now_ms(), response_ms);
        self.write(&storage::word_key(word), &record)?;
        Ok(record)
    }

    // Mastery ---------------------------------------------------------------

    #[must_use]
    pub fn mastery(&self, word: &str) -> u8 {
        mastery::calculate_mastery(&self.read_record(word).value, self.clock.now_ms())
    }

    #[must_use]
    pub fn mastery_band(&self, word: &str) -> MasteryBand {
        MasteryBand::from_score(self.mastery(word))
    }

    /// Total buttons to show for this word's next round.
    #[must_use]
    pub fn distractor_count(&self, word: &str) -> usize {
        select::distractor_count(self.mastery(word))
    }

    // Adaptive selection ----------------------------------------------------

    /// Pick the next session's words for a difficulty. Unknown
    /// difficulties select nothing.
    #[must_use]
    pub fn select_adaptive_words_with_rng<R>(
        &self,
        difficulty: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<String>
    where
        R: Rng + ?Sized,
    {
        let Some(pool) = self.catalog.get(difficulty) else {
            return Vec::new();
        };
        let upcoming_session = self.progress().total_sessions + 1;
        let entries: Vec<PoolEntry> = pool
            .iter()
            .map(|word| PoolEntry::of(word, &self.read_record(word).value))
            .collect();
        select::select_adaptive_with_rng(&entries, upcoming_session, count, rng)
    }

    /// Convenience wrapper seeding a reproducible RNG from the clock, so a
    /// session's selection can be replayed from its start timestamp.
    #[must_use]
    pub fn select_adaptive_words(&self, difficulty: &str, count: usize) -> Vec<String> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.clock.now_ms() as u64);
        self.select_adaptive_words_with_rng(difficulty, count, &mut rng)
    }

    // Session lifecycle -----------------------------------------------------

    /// Open an in-memory session; nothing is persisted until it ends.
    #[must_use]
    pub fn start_session(&self, mode: &str, difficulty: &str) -> Session {
        Session::begin(mode, difficulty, self.clock.now_ms())
    }

    /// Finalize and persist a session, refresh the progress summary, and
    /// prune expired session logs.
    ///
    /// # Errors
    ///
    /// Propagates the first storage failure; the session itself is
    /// persisted before the summary is touched.
    pub fn end_session(
        &self,
        mut session: Session,
        score: u32,
        total_time_seconds: f64,
    ) -> Result<Session, S::Error> {
        session.score = score;
        session.total_time = total_time_seconds.round() as u32;
        self.write(&storage::session_key(session.date), &session)?;
        self.update_progress_summary(&session)?;
        self.prune_old_sessions()?;
        Ok(session)
    }

    fn update_progress_summary(&self, session: &Session) -> Result<(), S::Error> {
        let mut progress = self.progress();
        progress.total_sessions += 1;
        progress.last_session = session.date;
        progress.total_words_learned = self.count_words_learned();
        log::debug!(
            "progress summary: {} sessions, {} words learned",
            progress.total_sessions,
            progress.total_words_learned
        );
        self.write(storage::PROGRESS_KEY, &progress)
    }

    /// Full recomputation over every configured pool; O(vocabulary).
    fn count_words_learned(&self) -> u32 {
        let now_ms = self.clock.now_ms();
        let mut learned = 0;
        for set in self.catalog.iter() {
            for word in &set.words {
                let record = self.read_record(word).into_value();
                if mastery::calculate_mastery(&record, now_ms) >= MASTERY_PRACTISING_MIN {
                    learned += 1;
                }
            }
        }
        learned
    }

    fn prune_old_sessions(&self) -> Result<(), S::Error> {
        let cutoff = self.clock.now_ms() - SESSION_RETENTION_DAYS * MILLIS_PER_DAY;
        let mut pruned = 0_u32;
        for key in self.storage.keys()? {
            if let Some(start_ms) = storage::session_start_from_key(&key)
                && start_ms < cutoff
            {
                self.storage.remove(&key)?;
                pruned += 1;
            }
        }
        if pruned > 0 {
            log::debug!("pruned {pruned} session logs past {SESSION_RETENTION_DAYS} days");
        }
        Ok(())
    }

    // Summary and dashboard -------------------------------------------------

    /// The global progress summary; zeroed defaults before any session
    /// has completed.
    #[must_use]
    pub fn progress(&self) -> ProgressSummary {
        self.read_or_default(storage::PROGRESS_KEY).into_value()
    }

    /// Every (difficulty, word) pair with its record and mastery, sorted
    /// by mastery ascending.
    #[must_use]
    pub fn all_word_data(&self) -> Vec<WordOverview> {
        let now_ms = self.clock.now_ms();
        let mut all = Vec::with_capacity(self.catalog.vocabulary_size());
        for set in self.catalog.iter() {
            for word in &set.words {
                let record = self.read_record(word).into_value();
                let mastery = mastery::calculate_mastery(&record, now_ms);
                all.push(WordOverview {
                    difficulty: set.id.clone(),
                    mastery,
                    record,
                });
            }
        }
        all.sort_by_key(|overview| overview.mastery);
        all
    }

    #[must_use]
    pub fn words_by_status(&self) -> WordsByStatus {
        let mut status = WordsByStatus::default();
        for overview in self.all_word_data() {
            status.insert(overview);
        }
        status
    }

    #[must_use]
    pub fn struggling_words(&self) -> Vec<WordOverview> {
        self.all_word_data()
            .into_iter()
            .filter(|overview| summary::is_struggling(&overview.record))
            .collect()
    }

    /// Pool-averaged mastery for a difficulty, for the progression map's
    /// star ratings.
    #[must_use]
    pub fn mode_mastery(&self, difficulty: &str) -> u8 {
        let Some(pool) = self.catalog.get(difficulty) else {
            return 0;
        };
        if pool.is_empty() {
            return 0;
        }
        let now_ms = self.clock.now_ms();
        let total: u32 = pool
            .iter()
            .map(|word| {
                u32::from(mastery::calculate_mastery(
                    &self.read_record(word).value,
                    now_ms,
                ))
            })
            .sum();
        (f64::from(total) / pool.len() as f64).round() as u8
    }

    /// Completed sessions, newest first. Unreadable entries are skipped.
    #[must_use]
    pub fn recent_sessions(&self, limit: usize) -> Vec<Session> {
        let mut sessions = self.stored_sessions();
        sessions.sort_by_key(|session| std::cmp::Reverse(session.date));
        sessions.truncate(limit);
        sessions
    }

    /// Sum of completed-session durations, in seconds.
    #[must_use]
    pub fn total_time_played(&self) -> u64 {
        self.stored_sessions()
            .iter()
            .map(|session| u64::from(session.total_time))
            .sum()
    }

    fn stored_sessions(&self) -> Vec<Session> {
        let Ok(keys) = self.storage.keys() else {
            return Vec::new();
        };
        keys.iter()
            .filter(|key| key.starts_with(storage::SESSION_KEY_PREFIX))
            .filter_map(|key| match self.storage.get(key) {
                Ok(Some(raw)) => storage::decode(&raw),
                _ => None,
            })
            .collect()
    }

    /// Delete every word record, every session, and the summary.
    /// Irreversible; high-score tables are left alone.
    ///
    /// # Errors
    ///
    /// Propagates the first storage failure.
    pub fn reset_all_progress(&self) -> Result<(), S::Error> {
        for key in self.storage.keys()? {
            if key.starts_with(storage::WORD_KEY_PREFIX)
                || key.starts_with(storage::SESSION_KEY_PREFIX)
                || key == storage::PROGRESS_KEY
            {
                self.storage.remove(&key)?;
            }
        }
        Ok(())
    }

    // Settings --------------------------------------------------------------

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.read_or_default(storage::SETTINGS_KEY).into_value()
    }

    /// # Errors
    ///
    /// Propagates a storage write failure.
    pub fn save_settings(&self, settings: &Settings) -> Result<(), S::Error> {
        self.write(storage::SETTINGS_KEY, settings)
    }

    /// Read-modify-write a single settings change.
    ///
    /// # Errors
    ///
    /// Propagates a storage write failure.
    pub fn update_settings(
        &self,
        update: impl FnOnce(&mut Settings),
    ) -> Result<Settings, S::Error> {
        let mut settings = self.settings();
        update(&mut settings);
        self.save_settings(&settings)?;
        Ok(settings)
    }

    // High scores -----------------------------------------------------------

    #[must_use]
    pub fn high_scores(&self, difficulty: &str) -> HighScores {
        self.read_or_default(&storage::scores_key(difficulty))
            .into_value()
    }

    /// Submit a finished game's score to the difficulty's table.
    ///
    /// # Errors
    ///
    /// Propagates a storage write failure.
    pub fn record_high_score(
        &self,
        difficulty: &str,
        score: u32,
        time_seconds: u32,
    ) -> Result<HighScores, S::Error> {
        let mut scores = self.high_scores(difficulty);
        scores.insert(HighScore {
            score,
            time: time_seconds,
            date: self.clock.now_ms(),
        });
        self.write(&storage::scores_key(difficulty), &scores)?;
        Ok(scores)
    }

    // Storage plumbing ------------------------------------------------------

    fn read_record(&self, word: &str) -> Loaded<WordRecord> {
        let loaded: Loaded<WordRecord> = self.read_or_default(&storage::word_key(word));
        match loaded.source {
            LoadSource::Stored => loaded,
            source => Loaded {
                value: WordRecord::new(word),
                source,
            },
        }
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Loaded<T> {
        match self.storage.get(key) {
            Ok(Some(raw)) => match storage::decode::<T>(&raw) {
                Some(value) => Loaded {
                    value,
                    source: LoadSource::Stored,
                },
                None => {
                    log::warn!("corrupt value under {key}; substituting default");
                    Loaded {
                        value: T::default(),
                        source: LoadSource::Recovered,
                    }
                }
            },
            Ok(None) => Loaded {
                value: T::default(),
                source: LoadSource::Fresh,
            },
            Err(error) => {
                log::warn!("storage read failed for {key} ({error}); substituting default");
                Loaded {
                    value: T::default(),
                    source: LoadSource::Recovered,
                }
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), S::Error> {
        self.storage.set(key, &storage::encode(value))
    }
}
