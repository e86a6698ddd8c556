//! Entity model
//!
//! Plain data for everything that lives in a level. Each kind owns its own
//! typed collection on `GameState`; nothing is shared between collections.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned bounding box (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Move so the top edge sits at `y`
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y;
    }

    /// Strict overlap test; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player upgrade tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PowerLevel {
    #[default]
    Small = 0,
    Big = 1,
    Fire = 2,
}

impl PowerLevel {
    /// Big or Fire: can break bricks and absorb one hit
    pub fn is_powered(self) -> bool {
        self != PowerLevel::Small
    }

    /// One tier down (Small stays Small)
    pub fn downgrade(self) -> Self {
        match self {
            PowerLevel::Fire => PowerLevel::Big,
            PowerLevel::Big | PowerLevel::Small => PowerLevel::Small,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Aabb,
    pub vel: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub lives: u32,
    /// Countdown during which enemy contact is ignored
    pub invincibility_frames: u32,
    pub power: PowerLevel,
}

impl Player {
    /// Fresh player at the spawn point, carrying over `lives`
    pub fn spawn(lives: u32) -> Self {
        Self {
            rect: Aabb::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            on_ground: false,
            lives,
            invincibility_frames: 0,
            power: PowerLevel::Small,
        }
    }

    /// Start a jump (only from the ground)
    pub fn jump(&mut self) {
        if self.on_ground {
            self.vel.y = JUMP_POWER;
            self.on_ground = false;
        }
    }

    /// Extend a jump while the button is held and the player is still rising fast
    pub fn sustain_jump(&mut self) {
        if self.vel.y < JUMP_HOLD_THRESHOLD {
            self.vel.y -= JUMP_HOLD_BOOST;
        }
    }

    pub fn move_left(&mut self) {
        self.vel.x = (self.vel.x - RUN_ACCEL).max(-MAX_RUN_SPEED);
        self.facing = Facing::Left;
    }

    pub fn move_right(&mut self) {
        self.vel.x = (self.vel.x + RUN_ACCEL).min(MAX_RUN_SPEED);
        self.facing = Facing::Right;
    }

    /// Gravity, friction, movement and invincibility countdown for one tick
    pub fn integrate(&mut self) {
        self.on_ground = false;

        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);

        // Friction never flips the direction of travel
        if self.vel.x > 0.0 {
            self.vel.x = (self.vel.x - FRICTION).max(0.0);
        } else if self.vel.x < 0.0 {
            self.vel.x = (self.vel.x + FRICTION).min(0.0);
        }

        self.rect.pos += self.vel;

        self.invincibility_frames = self.invincibility_frames.saturating_sub(1);
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goomba,
    Koopa,
    /// Sits in a pipe, never moves
    Piranha,
    /// Boss of the final castle levels
    Bowser,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Goomba => Vec2::new(24.0, 24.0),
            EnemyKind::Koopa | EnemyKind::Piranha => Vec2::new(24.0, 32.0),
            EnemyKind::Bowser => Vec2::new(48.0, 48.0),
        }
    }

    pub fn is_stationary(self) -> bool {
        self == EnemyKind::Piranha
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Aabb,
    pub vel: Vec2,
    pub on_ground: bool,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, x: f32, y: f32) -> Self {
        let size = kind.size();
        let vel = if kind.is_stationary() {
            Vec2::ZERO
        } else {
            Vec2::new(ENEMY_WALK_SPEED, 0.0)
        };
        Self {
            id,
            kind,
            rect: Aabb::new(x, y, size.x, size.y),
            vel,
            on_ground: false,
        }
    }

    /// Walk left and fall; piranhas stay put
    pub fn integrate(&mut self) {
        if self.kind.is_stationary() {
            return;
        }
        self.rect.pos.x += self.vel.x;
        self.vel.y = (self.vel.y + GRAVITY).min(MAX_FALL_SPEED);
        self.rect.pos.y += self.vel.y;
    }
}

/// Platform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Ground,
    Brick,
    Pipe,
    Castle,
    Lava,
    Question,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub kind: PlatformKind,
    pub rect: Aabb,
    /// Question blocks start loaded; flips to false once and stays there
    pub has_item: bool,
}

impl Platform {
    pub fn new(id: u32, kind: PlatformKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id,
            kind,
            rect: Aabb::new(x, y, w, h),
            has_item: kind == PlatformKind::Question,
        }
    }

    /// Bricks shatter when a powered player hits them from below
    pub fn breakable(&self) -> bool {
        self.kind == PlatformKind::Brick
    }

    pub fn is_lethal(&self) -> bool {
        self.kind == PlatformKind::Lava
    }

    /// Take the item out of a question block. Returns true only on the first call.
    pub fn take_item(&mut self) -> bool {
        std::mem::replace(&mut self.has_item, false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Aabb,
}

impl Coin {
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id,
            rect: Aabb::new(x, y, COIN_SIZE, COIN_SIZE),
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Mushroom,
    FireFlower,
}

impl ItemKind {
    /// Power level granted on pickup
    pub fn grants(self) -> PowerLevel {
        match self {
            ItemKind::Mushroom => PowerLevel::Big,
            ItemKind::FireFlower => PowerLevel::Fire,
        }
    }
}

/// A power-up lying in the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub rect: Aabb,
}

impl Item {
    pub fn new(id: u32, kind: ItemKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            rect: Aabb::new(x, y, TILE_SIZE, TILE_SIZE),
        }
    }
}

/// Level-end flagpole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub rect: Aabb,
}

impl Flag {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Aabb::new(x, y, FLAG_WIDTH, FLAG_HEIGHT),
        }
    }
}
