//! Fixed timestep simulation tick
//!
//! Order within a playing tick: input, integration, collisions, timer,
//! fall check, level-end clamp, camera.

use super::collision;
use super::state::{DeathCause, GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Window close / quit request
    pub quit: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
    pub left: bool,
    pub right: bool,
    /// Jump is being held
    pub jump_held: bool,
    /// Escape / cancel
    pub cancel: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::Finished {
        return;
    }

    // Quit is honored in every phase, holds included
    if input.quit || input.cancel {
        log::info!("Quit requested");
        state.phase = GamePhase::Finished;
        return;
    }

    match state.phase {
        GamePhase::Playing => play(state, input, dt),
        GamePhase::LevelComplete | GamePhase::GameOver | GamePhase::GameComplete => hold(state),
        GamePhase::Finished => {}
    }
}

/// Count down the current hold, then move on
fn hold(state: &mut GameState) {
    state.hold_ticks = state.hold_ticks.saturating_sub(1);
    if state.hold_ticks > 0 {
        return;
    }

    match state.phase {
        GamePhase::LevelComplete => state.advance_level(),
        GamePhase::GameOver => state.reset(),
        GamePhase::GameComplete => state.phase = GamePhase::Finished,
        GamePhase::Playing | GamePhase::Finished => {}
    }
}

fn play(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Input
    let player = &mut state.player;
    if input.jump_pressed {
        player.jump();
    }
    if input.left {
        player.move_left();
    }
    if input.right {
        player.move_right();
    }
    if input.jump_held {
        player.sustain_jump();
    }

    // Integration
    player.integrate();
    for enemy in state.enemies.iter_mut() {
        enemy.integrate();
    }

    // Collisions
    if let Some(cause) = collision::player_platforms(state) {
        state.kill_player(cause);
        return;
    }
    collision::enemy_platforms(state);
    if let Some(cause) = collision::player_enemies(state) {
        state.kill_player(cause);
        return;
    }
    collision::player_coins(state);
    collision::player_items(state);
    if collision::player_flag(state) {
        state.complete_level();
        state.camera.follow(&state.player.rect);
        return;
    }

    // Level clock
    state.level_elapsed += f64::from(dt);
    let limit = f64::from(state.time_limit);
    state.timer = (limit - state.level_elapsed).max(0.0) as f32;
    if state.level_elapsed >= limit {
        state.kill_player(DeathCause::Timeout);
        return;
    }

    if state.player.rect.top() > SCREEN_HEIGHT {
        state.kill_player(DeathCause::Fell);
        return;
    }

    // Cannot run past the end of the level
    if state.player.rect.pos.x > state.level_width {
        state.player.rect.pos.x = state.level_width;
    }

    state.camera.follow(&state.player.rect);
}
