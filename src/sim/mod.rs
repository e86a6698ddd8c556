//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No RNG; level layouts are functions of (world, level)
//! - Stable iteration order (generation order, entity IDs)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod level;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use entity::{
    Aabb, Coin, Enemy, EnemyKind, Facing, Flag, Item, ItemKind, Platform, PlatformKind, Player,
    PowerLevel,
};
pub use level::{Level, LevelError, generate};
pub use state::{DeathCause, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
