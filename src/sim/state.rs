//! Game session state and progression
//!
//! One `GameState` owns the whole session: progression counters, the player
//! and every entity collection of the current level. Level loads replace the
//! collections wholesale.

use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::entity::{Coin, Enemy, Flag, Item, ItemKind, Platform, Player, PowerLevel};
use super::level::generate;
use crate::consts::*;
use crate::level_width;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Flag reached, celebratory hold before the next level
    LevelComplete,
    /// Out of lives, summary hold before a full restart
    GameOver,
    /// Last level of world 8 cleared, victory hold before exit
    GameComplete,
    /// Session ended (quit, cancel, or victory)
    Finished,
}

/// Why the player lost a life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Lava,
    Enemy,
    Timeout,
    Fell,
}

/// Things that happened during a tick, drained by the frontend loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CoinCollected,
    ExtraLife,
    EnemyStomped { id: u32 },
    BlockBumped { id: u32 },
    BrickBroken { id: u32 },
    ItemCollected { kind: ItemKind },
    PowerLost { power: PowerLevel },
    Died { cause: DeathCause, lives_left: u32 },
    LevelLoaded { world: u8, level: u8 },
    LevelCompleted { world: u8, level: u8, time_bonus: u64 },
    GameOver { score: u64 },
    GameRestarted,
    GameCompleted { score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current world (1..=8)
    pub world: u8,
    /// Current level within the world (1..=4)
    pub level: u8,
    pub score: u64,
    /// Always below 100; the 100th coin becomes a life
    pub coins_collected: u32,
    /// Seconds left on the level clock (display value, derived from `level_elapsed`)
    pub timer: f32,
    /// Seconds played in the current level; accumulated in f64 so the
    /// per-tick steps don't drift
    pub level_elapsed: f64,
    pub time_limit: f32,
    pub starting_lives: u32,
    /// Set on the first flag contact, cleared on level load
    pub level_completed: bool,
    pub phase: GamePhase,
    /// Ticks remaining in a LevelComplete/GameOver/GameComplete hold
    pub hold_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub items: Vec<Item>,
    pub flag: Flag,
    pub level_width: f32,
    pub camera: Camera,
    /// Events from the most recent tick; `tick` clears it on entry
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// New session at 1-1 with default rules
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    /// New session at 1-1 using the configured time limit and lives
    pub fn with_settings(settings: &Settings) -> Self {
        let width = level_width();
        let mut state = Self {
            world: 1,
            level: 1,
            score: 0,
            coins_collected: 0,
            timer: settings.time_limit,
            level_elapsed: 0.0,
            time_limit: settings.time_limit,
            starting_lives: settings.starting_lives,
            level_completed: false,
            phase: GamePhase::Playing,
            hold_ticks: 0,
            time_ticks: 0,
            player: Player::spawn(settings.starting_lives),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            items: Vec::new(),
            flag: Flag::new(0.0, 0.0),
            level_width: width,
            camera: Camera::new(SCREEN_WIDTH, SCREEN_HEIGHT, width),
            events: Vec::new(),
        };

        state.load_level();

        state
    }

    /// Regenerate the current level and respawn the player.
    ///
    /// Score, coins and lives carry over. A generator failure ends the session.
    pub fn load_level(&mut self) {
        let level = match generate(self.world, self.level) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Cannot load level: {}", e);
                self.phase = GamePhase::Finished;
                return;
            }
        };

        self.platforms = level.platforms;
        self.enemies = level.enemies;
        self.coins = level.coins;
        self.items = level.items;
        self.flag = level.flag;
        self.level_width = level.width;

        self.player = Player::spawn(self.player.lives);
        self.camera = Camera::new(SCREEN_WIDTH, SCREEN_HEIGHT, level.width);
        self.camera.follow(&self.player.rect);
        self.timer = self.time_limit;
        self.level_elapsed = 0.0;
        self.level_completed = false;
        self.phase = GamePhase::Playing;
        self.hold_ticks = 0;

        log::info!(
            "Loaded world {}-{} ({} platforms, {} enemies, {} coins)",
            self.world,
            self.level,
            self.platforms.len(),
            self.enemies.len(),
            self.coins.len()
        );
        self.events.push(GameEvent::LevelLoaded {
            world: self.world,
            level: self.level,
        });
    }

    /// Reinitialize the whole session in place (after game over)
    pub fn reset(&mut self) {
        self.world = 1;
        self.level = 1;
        self.score = 0;
        self.coins_collected = 0;
        self.time_ticks = 0;
        self.player.lives = self.starting_lives;
        self.load_level();
        self.events.push(GameEvent::GameRestarted);
        log::info!("Game restarted");
    }

    /// Count one coin, rolling 100 coins into a life
    pub fn collect_coin(&mut self) {
        self.score += SCORE_COIN;
        self.coins_collected += 1;
        self.events.push(GameEvent::CoinCollected);
        if self.coins_collected >= COINS_PER_LIFE {
            self.coins_collected = 0;
            self.player.lives += 1;
            self.events.push(GameEvent::ExtraLife);
            log::debug!("Extra life ({} lives)", self.player.lives);
        }
    }

    /// Lose a life, then either reload the level or end the game
    pub fn kill_player(&mut self, cause: DeathCause) {
        self.player.lives = self.player.lives.saturating_sub(1);
        let lives_left = self.player.lives;
        log::info!("Player died ({:?}), {} lives left", cause, lives_left);
        self.events.push(GameEvent::Died { cause, lives_left });

        if lives_left == 0 {
            self.phase = GamePhase::GameOver;
            self.hold_ticks = GAME_OVER_HOLD_TICKS;
            self.events.push(GameEvent::GameOver { score: self.score });
            log::info!("Game over, final score {}", self.score);
        } else {
            self.load_level();
        }
    }

    /// Award the time bonus and start the celebratory hold
    pub fn complete_level(&mut self) {
        if self.level_completed {
            return;
        }
        self.level_completed = true;

        let time_bonus = self.timer.max(0.0).floor() as u64 * TIME_BONUS_PER_SECOND;
        self.score += time_bonus;
        self.phase = GamePhase::LevelComplete;
        self.hold_ticks = LEVEL_COMPLETE_HOLD_TICKS;

        log::info!(
            "World {}-{} complete, time bonus {}",
            self.world,
            self.level,
            time_bonus
        );
        self.events.push(GameEvent::LevelCompleted {
            world: self.world,
            level: self.level,
            time_bonus,
        });
    }

    /// Move to the next level, or finish the game after 8-4
    pub fn advance_level(&mut self) {
        let (mut world, mut level) = (self.world, self.level + 1);
        if level > LEVELS_PER_WORLD {
            level = 1;
            world += 1;
        }

        if world > WORLD_COUNT {
            self.phase = GamePhase::GameComplete;
            self.hold_ticks = VICTORY_HOLD_TICKS;
            self.events.push(GameEvent::GameCompleted { score: self.score });
            log::info!("All worlds cleared, final score {}", self.score);
            return;
        }

        self.world = world;
        self.level = level;
        self.load_level();
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert_eq!((state.world, state.level), (1, 1));
        assert_eq!(state.player.lives, DEFAULT_LIVES);
        assert_eq!(state.score, 0);
        assert_eq!(state.timer, DEFAULT_TIME_LIMIT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.rect.pos.x, 64.0);
        assert_eq!(state.player.rect.pos.y, 496.0);
        assert!(!state.platforms.is_empty());
    }

    #[test]
    fn test_death_reloads_and_keeps_progress() {
        let mut state = GameState::new();
        state.score = 1234;
        state.coins_collected = 42;
        state.timer = 100.0;
        state.coins.clear();
        state.player.rect.pos.x = 500.0;

        state.kill_player(DeathCause::Fell);

        assert_eq!(state.player.lives, DEFAULT_LIVES - 1);
        assert_eq!(state.score, 1234);
        assert_eq!(state.coins_collected, 42);
        assert_eq!(state.timer, DEFAULT_TIME_LIMIT);
        assert!(!state.coins.is_empty());
        assert_eq!(state.player.rect.pos.x, PLAYER_SPAWN_X);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_goes_to_game_over() {
        let mut state = GameState::new();
        state.player.lives = 1;
        state.kill_player(DeathCause::Enemy);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.hold_ticks, GAME_OVER_HOLD_TICKS);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut state = GameState::new();
        state.world = 5;
        state.level = 3;
        state.score = 9999;
        state.coins_collected = 77;
        state.player.lives = 0;
        state.phase = GamePhase::GameOver;

        state.reset();

        assert_eq!((state.world, state.level), (1, 1));
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.player.lives, DEFAULT_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_complete_level_awards_once() {
        let mut state = GameState::new();
        state.score = 500;
        state.timer = 123.9;

        state.complete_level();
        assert_eq!(state.score, 500 + 1230);
        assert_eq!(state.phase, GamePhase::LevelComplete);

        state.complete_level();
        assert_eq!(state.score, 500 + 1230);
    }

    #[test]
    fn test_advance_wraps_worlds() {
        let mut state = GameState::new();
        state.level = 4;
        state.advance_level();
        assert_eq!((state.world, state.level), (2, 1));
        assert!(!state.level_completed);

        state.world = 8;
        state.level = 4;
        state.advance_level();
        assert_eq!(state.phase, GamePhase::GameComplete);
        assert_eq!((state.world, state.level), (8, 4));
    }

    proptest! {
        #[test]
        fn prop_coin_counter_bounded(batches in prop::collection::vec(0u32..40, 0..30)) {
            let mut state = GameState::new();
            let lives = state.player.lives;
            let mut total = 0u32;
            for batch in batches {
                for _ in 0..batch {
                    state.collect_coin();
                    prop_assert!(state.coins_collected < COINS_PER_LIFE);
                }
                total += batch;
            }
            prop_assert_eq!(state.player.lives, lives + total / COINS_PER_LIFE);
            prop_assert_eq!(state.coins_collected, total % COINS_PER_LIFE);
            prop_assert_eq!(state.score, u64::from(total) * SCORE_COIN);
        }
    }

    #[test]
    fn test_bad_indices_end_session() {
        let mut state = GameState::new();
        state.world = 12;
        state.load_level();
        assert_eq!(state.phase, GamePhase::Finished);
    }
}
