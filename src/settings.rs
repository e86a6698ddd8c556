//! Game settings
//!
//! Loaded from an optional JSON file; anything missing falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_LIVES, DEFAULT_TIME_LIMIT};

/// Session rules and attract-mode tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Seconds on the clock at the start of each level
    pub time_limit: f32,
    /// Lives at the start of a game (and after every game over)
    pub starting_lives: u32,

    // === Attract mode ===
    /// Seed for the demo input generator
    pub demo_seed: u64,
    /// Ticks to run the headless demo for
    pub demo_ticks: u64,
    /// Per-tick probability of a jump press while on the ground (0.0 - 1.0)
    pub jump_chance: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            starting_lives: DEFAULT_LIVES,

            demo_seed: 0x5eed,
            demo_ticks: 60 * 60 * 5,
            jump_chance: 0.08,
        }
    }
}

impl Settings {
    /// Parse settings JSON, keeping defaults for absent fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values into usable ranges
    fn sanitized(mut self) -> Self {
        if self.time_limit.is_nan() || self.time_limit <= 0.0 {
            self.time_limit = DEFAULT_TIME_LIMIT;
        }
        self.starting_lives = self.starting_lives.max(1);
        self.jump_chance = self.jump_chance.clamp(0.0, 1.0);
        self
    }
}
