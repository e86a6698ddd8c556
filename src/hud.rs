//! HUD values and their display strings
//!
//! Text layout and font rendering belong to the frontend.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Snapshot of everything the HUD shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub coins: u32,
    pub world: u8,
    pub level: u8,
    /// Whole seconds left (truncated)
    pub time: u32,
    pub lives: u32,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            coins: state.coins_collected,
            world: state.world,
            level: state.level,
            time: state.timer.max(0.0) as u32,
            lives: state.player.lives,
        }
    }

    pub fn score_text(&self) -> String {
        format!("SCORE: {:06}", self.score)
    }

    pub fn coins_text(&self) -> String {
        format!("COINS: {:02}", self.coins)
    }

    pub fn world_text(&self) -> String {
        format!("WORLD {}-{}", self.world, self.level)
    }

    pub fn time_text(&self) -> String {
        format!("TIME: {}", self.time)
    }

    pub fn lives_text(&self) -> String {
        format!("LIVES: {}", self.lives)
    }
}
