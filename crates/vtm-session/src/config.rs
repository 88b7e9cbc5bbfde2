//! Settings shared by every character in a store.

use serde::{Deserialize, Serialize};

/// Highest difficulty offered as a default.
pub const MAX_DEFAULT_DIFFICULTY: u32 = 5;

/// Roller settings, persisted alongside character data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetSettings {
    /// Write resource changes back to the store after each roll.
    pub auto_save: bool,
    /// Include individual die faces in roll reports.
    pub show_roll_details: bool,
    /// Difficulty used when a roll does not name one (1-5).
    pub default_difficulty: u32,
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            show_roll_details: true,
            default_difficulty: 2,
        }
    }
}

impl SheetSettings {
    /// Enable or disable saving after rolls.
    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }

    /// Show or hide die faces in reports.
    pub fn with_roll_details(mut self, show: bool) -> Self {
        self.show_roll_details = show;
        self
    }

    /// Set the default difficulty (clamped to 1-5).
    pub fn with_default_difficulty(mut self, difficulty: u32) -> Self {
        self.default_difficulty = difficulty.clamp(1, MAX_DEFAULT_DIFFICULTY);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let cfg = SheetSettings::default();
        assert!(cfg.auto_save);
        assert!(cfg.show_roll_details);
        assert_eq!(cfg.default_difficulty, 2);
    }

    #[test]
    fn builder_methods() {
        let cfg = SheetSettings::default()
            .with_auto_save(false)
            .with_roll_details(false)
            .with_default_difficulty(4);
        assert!(!cfg.auto_save);
        assert!(!cfg.show_roll_details);
        assert_eq!(cfg.default_difficulty, 4);
    }

    #[test]
    fn difficulty_clamped() {
        let cfg = SheetSettings::default().with_default_difficulty(0);
        assert_eq!(cfg.default_difficulty, 1);
        let cfg = SheetSettings::default().with_default_difficulty(9);
        assert_eq!(cfg.default_difficulty, 5);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: SheetSettings = serde_json::from_str(r#"{"autoSave": false}"#).unwrap();
        assert!(!cfg.auto_save);
        assert!(cfg.show_roll_details);
        assert_eq!(cfg.default_difficulty, 2);
    }
}
