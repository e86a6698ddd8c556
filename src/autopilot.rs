//! Attract-mode input
//!
//! Runs right and hops at random. Seeded, so a given seed always replays the
//! same session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickInput};

/// Seeded demo player
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    jump_chance: f64,
    /// Ticks left to keep holding jump
    hold_ticks: u32,
}

impl Autopilot {
    pub fn new(seed: u64, jump_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            jump_chance: jump_chance.clamp(0.0, 1.0),
            hold_ticks: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.demo_seed, settings.jump_chance)
    }

    /// Input for the next tick
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if state.phase != GamePhase::Playing {
            self.hold_ticks = 0;
            return TickInput::default();
        }

        let mut input = TickInput {
            right: true,
            ..Default::default()
        };

        if self.hold_ticks > 0 {
            self.hold_ticks -= 1;
            input.jump_held = true;
        } else if state.player.on_ground && self.rng.random_bool(self.jump_chance) {
            input.jump_pressed = true;
            input.jump_held = true;
            self.hold_ticks = self.rng.random_range(2..20);
        }

        input
    }
}
