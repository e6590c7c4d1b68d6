//! Persisted user settings. Owned by the settings screen; the engine only
//! stores them and hands the last-played difficulty back to the caller.

use serde::{Deserialize, Serialize};

fn default_music_enabled() -> bool {
    true
}

fn default_last_difficulty() -> String {
    "alphabet".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_music_enabled")]
    pub music_enabled: bool,
    #[serde(default = "default_last_difficulty")]
    pub last_difficulty: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_enabled: default_music_enabled(),
            last_difficulty: default_last_difficulty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_first_difficulty() {
        let settings = Settings::default();
        assert!(settings.music_enabled);
        assert_eq!(settings.last_difficulty, "alphabet");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());

        let settings: Settings =
            serde_json::from_str(r#"{"last_difficulty":"easy"}"#).unwrap();
        assert!(settings.music_enabled);
        assert_eq!(settings.last_difficulty, "easy");
    }
}
