//! Word pool configuration: difficulty name to ordered word list.
//!
//! Supplied at startup and treated as read-only by the engine. The default
//! catalog ships embedded; callers with their own content use
//! [`WordCatalog::from_json`].

use std::collections::BTreeSet;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_WORDS_DATA: &str = include_str!("../assets/words.json");

/// One difficulty's ordered word pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WordSet {
    pub id: String,
    pub words: Vec<String>,
}

/// Every configured difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WordCatalog {
    pub sets: Vec<WordSet>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("word set {0:?} is empty")]
    EmptySet(String),
    #[error("duplicate word set id {0:?}")]
    DuplicateSet(String),
    #[error("word set {set:?} repeats {word:?}")]
    DuplicateWord { set: String, word: String },
}

impl WordCatalog {
    /// The pools shipped with the game.
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_WORDS_DATA).unwrap_or_default()
    }

    /// Parse and validate caller-supplied catalog JSON.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or the catalog fails
    /// validation.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let catalog: Self =
            serde_json::from_str(raw).context("failed to parse word catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every set has a unique id, is non-empty, and holds no
    /// case-insensitive duplicate words.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = BTreeSet::new();
        for set in &self.sets {
            if !ids.insert(set.id.clone()) {
                return Err(CatalogError::DuplicateSet(set.id.clone()));
            }
            if set.words.is_empty() {
                return Err(CatalogError::EmptySet(set.id.clone()));
            }
            let mut seen = BTreeSet::new();
            for word in &set.words {
                if !seen.insert(word.to_lowercase()) {
                    return Err(CatalogError::DuplicateWord {
                        set: set.id.clone(),
                        word: word.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The pool for a difficulty, if configured.
    #[must_use]
    pub fn get(&self, difficulty: &str) -> Option<&[String]> {
        self.sets
            .iter()
            .find(|set| set.id == difficulty)
            .map(|set| set.words.as_slice())
    }

    pub fn difficulties(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordSet> {
        self.sets.iter()
    }

    /// Total (difficulty, word) pairs across all pools.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.sets.iter().map(|set| set.words.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_catalog_loads_and_validates() {
        let catalog = WordCatalog::load_from_static();
        assert!(catalog.validate().is_ok());
        let ids: Vec<&str> = catalog.difficulties().collect();
        assert_eq!(
            ids,
            vec!["alphabet", "sound-match", "easy", "harder", "word-builder"]
        );
        assert_eq!(catalog.get("alphabet").map(<[String]>::len), Some(26));
        assert_eq!(catalog.get("easy").map(<[String]>::len), Some(20));
        assert_eq!(catalog.get("nope"), None);
    }

    #[test]
    fn from_json_rejects_empty_sets() {
        let err = WordCatalog::from_json(r#"{"sets":[{"id":"easy","words":[]}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn validate_rejects_case_insensitive_duplicates() {
        let catalog = WordCatalog {
            sets: vec![WordSet {
                id: "easy".to_string(),
                words: vec!["The".to_string(), "the".to_string()],
            }],
        };
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateWord {
                set: "easy".to_string(),
                word: "the".to_string(),
            })
        );
    }

    #[test]
    fn validate_rejects_repeated_set_ids() {
        let set = WordSet {
            id: "easy".to_string(),
            words: vec!["the".to_string()],
        };
        let catalog = WordCatalog {
            sets: vec![set.clone(), set],
        };
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateSet("easy".to_string()))
        );
    }

    #[test]
    fn vocabulary_counts_pairs_across_pools() {
        let catalog = WordCatalog::load_from_static();
        assert_eq!(catalog.vocabulary_size(), 26 + 26 + 20 + 25 + 30);
    }
}
