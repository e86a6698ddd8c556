//! Procedural level layouts
//!
//! Every (world, level) pair maps to one fixed layout. There is no RNG here:
//! all variation comes from the tile index (modulo rules, a sine height offset).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Coin, Enemy, EnemyKind, Flag, Item, Platform, PlatformKind};
use crate::consts::*;
use crate::level_width;

/// Everything a level load needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub world: u8,
    pub level: u8,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Never populated by the generator; question blocks pay out score instead
    pub items: Vec<Item>,
    pub flag: Flag,
    pub width: f32,
}

/// Rejected generator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    WorldOutOfRange(u8),
    LevelOutOfRange(u8),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::WorldOutOfRange(w) => {
                write!(f, "world {} out of range 1..={}", w, WORLD_COUNT)
            }
            LevelError::LevelOutOfRange(l) => {
                write!(f, "level {} out of range 1..={}", l, LEVELS_PER_WORLD)
            }
        }
    }
}

impl std::error::Error for LevelError {}

/// Pixel offset of tile `n`
#[inline]
fn tile(n: i32) -> f32 {
    n as f32 * TILE_SIZE
}

/// Y coordinate `n` tiles up from the bottom of the screen
#[inline]
fn rows_up(n: i32) -> f32 {
    SCREEN_HEIGHT - tile(n)
}

/// Collects entities and hands out sequential ids
struct LevelBuilder {
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
    next_id: u32,
}

impl LevelBuilder {
    fn new() -> Self {
        Self {
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn platform(&mut self, kind: PlatformKind, x: f32, y: f32, w: f32, h: f32) {
        let id = self.next_id();
        self.platforms.push(Platform::new(id, kind, x, y, w, h));
    }

    fn enemy(&mut self, kind: EnemyKind, x: f32, y: f32) {
        let id = self.next_id();
        self.enemies.push(Enemy::new(id, kind, x, y));
    }

    fn coin(&mut self, x: f32, y: f32) {
        let id = self.next_id();
        self.coins.push(Coin::new(id, x, y));
    }

    fn boss(&mut self) {
        self.enemy(EnemyKind::Bowser, level_width() - tile(5), rows_up(4));
    }
}

/// Build the layout for `world` (1..=8) and `level` (1..=4)
pub fn generate(world: u8, level: u8) -> Result<Level, LevelError> {
    if !(1..=WORLD_COUNT).contains(&world) {
        return Err(LevelError::WorldOutOfRange(world));
    }
    if !(1..=LEVELS_PER_WORLD).contains(&level) {
        return Err(LevelError::LevelOutOfRange(level));
    }

    let width = level_width();
    let width_tiles = LEVEL_TILES as i32;
    let mut b = LevelBuilder::new();

    // Ground everywhere except the 5-tile run-up to the flag
    for i in 0..width_tiles - 5 {
        b.platform(PlatformKind::Ground, tile(i), rows_up(2), TILE_SIZE, tile(2));
    }
    // Flag platform
    b.platform(
        PlatformKind::Ground,
        tile(width_tiles - 3),
        rows_up(2),
        tile(3),
        tile(2),
    );

    match world {
        1 => overworld(&mut b),
        2 => underground(&mut b, width_tiles),
        3 => sky(&mut b),
        4 => castle(&mut b, level),
        5 => water(&mut b),
        6 => ice(&mut b),
        7 => pipe_maze(&mut b),
        _ => final_world(&mut b, level),
    }

    Ok(Level {
        world,
        level,
        platforms: b.platforms,
        enemies: b.enemies,
        coins: b.coins,
        items: Vec::new(),
        flag: Flag::new(width - tile(2), rows_up(8)),
        width,
    })
}

/// World 1: pipes with piranhas, block rows, goombas
fn overworld(b: &mut LevelBuilder) {
    for i in (3..20).step_by(7) {
        b.platform(PlatformKind::Pipe, tile(i), rows_up(4), tile(2), tile(2));
        if i % 2 == 0 {
            b.enemy(EnemyKind::Piranha, tile(i) + TILE_SIZE / 2.0, rows_up(5));
        }
    }

    for i in (5..25).step_by(4) {
        let y = rows_up(5 + i % 3);
        let kind = if i % 2 == 0 {
            PlatformKind::Question
        } else {
            PlatformKind::Brick
        };
        b.platform(kind, tile(i), y, TILE_SIZE, TILE_SIZE);
        if i % 3 == 0 {
            b.coin(tile(i) + 6.0, y - TILE_SIZE);
        }
    }

    for i in (4..20).step_by(5) {
        b.enemy(EnemyKind::Goomba, tile(i), rows_up(3));
    }
}

/// World 2: brick ceiling, stepped brick ledges lined with coins, koopas
fn underground(b: &mut LevelBuilder, width_tiles: i32) {
    for i in 0..width_tiles {
        b.platform(PlatformKind::Brick, tile(i), 0.0, TILE_SIZE, tile(2));
    }

    for i in (3..20).step_by(3) {
        b.platform(
            PlatformKind::Brick,
            tile(i),
            rows_up(4 + i % 3),
            tile(3),
            TILE_SIZE,
        );
        for j in 0..3 {
            b.coin(tile(i + j) + 6.0, rows_up(5 + i % 3));
        }
    }

    for i in (5..20).step_by(6) {
        b.enemy(EnemyKind::Koopa, tile(i), rows_up(3));
    }
}

/// World 3: floating platforms on a sine wave, high koopas
fn sky(b: &mut LevelBuilder) {
    for i in (2..25).step_by(2) {
        // Truncates toward zero
        let offset = ((i as f32 * 0.5).sin() * 3.0) as i32;
        b.platform(
            PlatformKind::Brick,
            tile(i),
            rows_up(3 + offset),
            tile(2),
            TILE_SIZE,
        );
        if i % 4 == 0 {
            for j in 0..3 {
                b.coin(tile(i) + j as f32 * 20.0, rows_up(5 + offset));
            }
        }
    }

    for i in (4..20).step_by(8) {
        b.enemy(EnemyKind::Koopa, tile(i), rows_up(6));
    }
}

/// World 4: lava pits, castle ledges, boss on the last level
fn castle(b: &mut LevelBuilder, level: u8) {
    for i in (5..25).step_by(5) {
        b.platform(PlatformKind::Lava, tile(i), rows_up(1), tile(2), TILE_SIZE);
    }

    for i in (3..25).step_by(3) {
        b.platform(PlatformKind::Castle, tile(i), rows_up(4), tile(2), TILE_SIZE);
    }

    if level == LEVELS_PER_WORLD {
        b.boss();
    } else {
        for i in (4..20).step_by(4) {
            b.enemy(EnemyKind::Goomba, tile(i), rows_up(3));
        }
    }
}

/// World 5: low stepping platforms with a coin over each gap
fn water(b: &mut LevelBuilder) {
    for i in (2..25).step_by(3) {
        b.platform(PlatformKind::Brick, tile(i), rows_up(3), tile(3), TILE_SIZE);
        b.coin(tile(i) + TILE_SIZE, rows_up(4));
    }

    for i in (6..20).step_by(5) {
        b.enemy(EnemyKind::Koopa, tile(i), rows_up(4));
    }
}

/// World 6: wide brick slabs
fn ice(b: &mut LevelBuilder) {
    for i in (3..25).step_by(4) {
        b.platform(PlatformKind::Brick, tile(i), rows_up(4), tile(4), TILE_SIZE);
    }

    for i in (5..20).step_by(6) {
        b.enemy(EnemyKind::Koopa, tile(i), rows_up(3));
    }
}

/// World 7: dense pipes of height 2..=5, piranhas on every third
fn pipe_maze(b: &mut LevelBuilder) {
    for i in (2..25).step_by(2) {
        let height = 2 + i % 4;
        b.platform(
            PlatformKind::Pipe,
            tile(i),
            rows_up(height + 2),
            tile(2),
            tile(height),
        );
        if i % 3 == 0 {
            b.enemy(
                EnemyKind::Piranha,
                tile(i) + TILE_SIZE / 2.0,
                rows_up(height + 3),
            );
        }
    }
}

/// World 8: lava, castle ledges and question blocks mixed, goombas and koopas,
/// boss on the last level
fn final_world(b: &mut LevelBuilder, level: u8) {
    for i in 2..25 {
        if i % 5 == 0 {
            b.platform(PlatformKind::Lava, tile(i), rows_up(1), TILE_SIZE, TILE_SIZE);
        } else if i % 3 == 0 {
            b.platform(PlatformKind::Castle, tile(i), rows_up(5), tile(2), TILE_SIZE);
        } else if i % 2 == 0 {
            b.platform(PlatformKind::Question, tile(i), rows_up(4), TILE_SIZE, TILE_SIZE);
        }
    }

    for i in (3..20).step_by(3) {
        let kind = if i % 6 == 0 {
            EnemyKind::Koopa
        } else {
            EnemyKind::Goomba
        };
        b.enemy(kind, tile(i), rows_up(3));
    }

    if level == LEVELS_PER_WORLD {
        b.boss();
    }
}
