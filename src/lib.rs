//! Brick Quest - an 8 worlds x 4 levels side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, physics, collisions, game state)
//! - `scene`: Draw list handed to the rendering collaborator
//! - `hud`: HUD values and display strings
//! - `platform`: Frontend abstraction and the fixed-rate session loop
//! - `autopilot`: Seeded attract-mode input
//! - `settings`: Tunable rules loaded from JSON

pub mod autopilot;
pub mod hud;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use autopilot::Autopilot;
pub use hud::Hud;
pub use platform::{Frontend, FrontendError, RunSummary, run};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Base layout grid unit
    pub const TILE_SIZE: f32 = 32.0;
    /// Every level is this many tiles wide
    pub const LEVEL_TILES: u32 = 30;

    pub const WORLD_COUNT: u8 = 8;
    pub const LEVELS_PER_WORLD: u8 = 4;

    /// Player spawn point (top-left corner)
    pub const PLAYER_SPAWN_X: f32 = 64.0;
    pub const PLAYER_SPAWN_Y: f32 = 496.0;
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;

    /// Per-tick physics (pixels/tick, pixels/tick²)
    pub const GRAVITY: f32 = 0.8;
    pub const MAX_FALL_SPEED: f32 = 20.0;
    pub const FRICTION: f32 = 0.4;
    pub const RUN_ACCEL: f32 = 0.5;
    pub const MAX_RUN_SPEED: f32 = 6.0;
    pub const JUMP_POWER: f32 = -15.0;
    /// Holding jump while rising faster than this adds `JUMP_HOLD_BOOST`
    pub const JUMP_HOLD_THRESHOLD: f32 = -5.0;
    pub const JUMP_HOLD_BOOST: f32 = 0.5;
    pub const STOMP_BOUNCE: f32 = -10.0;
    pub const ENEMY_WALK_SPEED: f32 = -2.0;

    pub const INVINCIBILITY_FRAMES: u32 = 120;

    pub const COIN_SIZE: f32 = 20.0;
    pub const FLAG_WIDTH: f32 = 50.0;
    pub const FLAG_HEIGHT: f32 = 200.0;

    /// Scoring
    pub const SCORE_COIN: u64 = 10;
    pub const SCORE_BRICK: u64 = 50;
    pub const SCORE_STOMP: u64 = 100;
    pub const SCORE_QUESTION: u64 = 100;
    pub const SCORE_ITEM: u64 = 1000;
    pub const TIME_BONUS_PER_SECOND: u64 = 10;
    pub const COINS_PER_LIFE: u32 = 100;

    /// Session defaults
    pub const DEFAULT_TIME_LIMIT: f32 = 400.0;
    pub const DEFAULT_LIVES: u32 = 3;

    /// Hold durations (ticks)
    pub const LEVEL_COMPLETE_HOLD_TICKS: u32 = 30;
    pub const GAME_OVER_HOLD_TICKS: u32 = 3 * TICK_HZ;
    pub const VICTORY_HOLD_TICKS: u32 = 5 * TICK_HZ;
}

/// Level width in pixels (same for every level)
#[inline]
pub fn level_width() -> f32 {
    consts::LEVEL_TILES as f32 * consts::TILE_SIZE
}
