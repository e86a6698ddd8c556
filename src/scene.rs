//! Draw list for the rendering collaborator
//!
//! The core never touches pixels. Each frame it emits filled shapes in screen
//! space (camera already applied), a background color, HUD values and an
//! optional banner. The frontend turns that into actual drawing.

use glam::Vec2;

use crate::consts::*;
use crate::hud::Hud;
use crate::sim::{Aabb, Camera, EnemyKind, Facing, GamePhase, GameState, ItemKind, PlatformKind, PowerLevel};

/// RGB color
pub type Color = [u8; 3];

/// NES-style palette
pub mod palette {
    use super::Color;

    pub const SKY: Color = [92, 148, 252];
    pub const SKY_LIGHT: Color = [135, 206, 235];
    pub const CASTLE_BG: Color = [50, 50, 50];
    pub const BLACK: Color = [0, 0, 0];
    pub const WHITE: Color = [255, 255, 255];

    pub const GROUND: Color = [193, 97, 0];
    pub const BRICK: Color = [181, 49, 32];
    pub const PIPE: Color = [0, 168, 0];
    pub const CASTLE_GRAY: Color = [150, 150, 150];
    pub const LAVA_RED: Color = [252, 0, 0];
    pub const QUESTION: Color = [255, 200, 0];

    pub const COIN_YELLOW: Color = [252, 188, 60];
    pub const PLAYER_RED: Color = [255, 0, 0];
    pub const OVERALLS_BLUE: Color = [0, 0, 255];
    pub const GOOMBA: Color = [139, 69, 19];
    pub const KOOPA: Color = [0, 200, 0];
    pub const PIRANHA: Color = [0, 255, 0];
    pub const BOWSER: Color = [255, 0, 0];
    pub const MUSHROOM: Color = [230, 60, 40];
    pub const FIRE_FLOWER: Color = [255, 140, 0];
    pub const FLAGPOLE: Color = [100, 100, 100];
    pub const PENNANT: Color = [0, 255, 0];
}

/// What an entry depicts (for frontends that want sprites instead of shapes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawKind {
    Platform(PlatformKind),
    /// Question block that has already paid out
    UsedBlock,
    Enemy(EnemyKind),
    Coin,
    Item(ItemKind),
    Flagpole,
    Pennant,
    Player { facing: Facing, power: PowerLevel },
    Overalls,
}

/// Filled primitive in screen coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect { pos: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Polygon(Vec<Vec2>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub shape: Shape,
    pub color: Color,
}

/// Centered overlay text
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    LevelComplete,
    GameOver { score: u64 },
    Victory { score: u64 },
}

impl Banner {
    /// Lines of text, top to bottom
    pub fn lines(&self) -> Vec<String> {
        match self {
            Banner::LevelComplete => vec!["LEVEL COMPLETE!".to_string()],
            Banner::GameOver { score } => {
                vec!["GAME OVER".to_string(), format!("Final Score: {}", score)]
            }
            Banner::Victory { score } => vec![
                "CONGRATULATIONS!".to_string(),
                "YOU SAVED THE PRINCESS!".to_string(),
                format!("Final Score: {}", score),
            ],
        }
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub background: Color,
    pub commands: Vec<DrawCommand>,
    pub hud: Option<Hud>,
    pub banner: Option<Banner>,
}

/// Background color for a world
pub fn background_for(world: u8) -> Color {
    match world {
        2 => palette::BLACK,
        3 => palette::SKY_LIGHT,
        4 | 8 => palette::CASTLE_BG,
        _ => palette::SKY,
    }
}

fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Ground => palette::GROUND,
        PlatformKind::Brick => palette::BRICK,
        PlatformKind::Pipe => palette::PIPE,
        PlatformKind::Castle => palette::CASTLE_GRAY,
        PlatformKind::Lava => palette::LAVA_RED,
        PlatformKind::Question => palette::QUESTION,
    }
}

fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Goomba => palette::GOOMBA,
        EnemyKind::Koopa => palette::KOOPA,
        EnemyKind::Piranha => palette::PIRANHA,
        EnemyKind::Bowser => palette::BOWSER,
    }
}

fn item_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Mushroom => palette::MUSHROOM,
        ItemKind::FireFlower => palette::FIRE_FLOWER,
    }
}

/// Camera-space rectangle
fn rect(camera: &Camera, aabb: &Aabb) -> Shape {
    Shape::Rect {
        pos: camera.to_screen(aabb.pos),
        size: aabb.size,
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Frame {
    match state.phase {
        GamePhase::GameOver => {
            return Frame {
                background: palette::BLACK,
                commands: Vec::new(),
                hud: None,
                banner: Some(Banner::GameOver { score: state.score }),
            };
        }
        GamePhase::GameComplete => {
            return Frame {
                background: palette::BLACK,
                commands: Vec::new(),
                hud: None,
                banner: Some(Banner::Victory { score: state.score }),
            };
        }
        GamePhase::Finished => {
            return Frame {
                background: palette::BLACK,
                commands: Vec::new(),
                hud: None,
                banner: None,
            };
        }
        GamePhase::Playing | GamePhase::LevelComplete => {}
    }

    let camera = &state.camera;
    let mut commands = Vec::new();

    for platform in state.platforms.iter().filter(|p| camera.is_visible(&p.rect)) {
        let (kind, color) = if platform.kind == PlatformKind::Question && !platform.has_item {
            (DrawKind::UsedBlock, palette::CASTLE_GRAY)
        } else {
            (DrawKind::Platform(platform.kind), platform_color(platform.kind))
        };
        commands.push(DrawCommand {
            kind,
            shape: rect(camera, &platform.rect),
            color,
        });
    }

    for coin in state.coins.iter().filter(|c| camera.is_visible(&c.rect)) {
        commands.push(DrawCommand {
            kind: DrawKind::Coin,
            shape: Shape::Circle {
                center: camera.to_screen(coin.rect.center()),
                radius: coin.rect.size.x / 2.0,
            },
            color: palette::COIN_YELLOW,
        });
    }

    for item in state.items.iter().filter(|i| camera.is_visible(&i.rect)) {
        commands.push(DrawCommand {
            kind: DrawKind::Item(item.kind),
            shape: rect(camera, &item.rect),
            color: item_color(item.kind),
        });
    }

    for enemy in state.enemies.iter().filter(|e| camera.is_visible(&e.rect)) {
        commands.push(DrawCommand {
            kind: DrawKind::Enemy(enemy.kind),
            shape: rect(camera, &enemy.rect),
            color: enemy_color(enemy.kind),
        });
    }

    push_flag(&mut commands, camera, &state.flag.rect);

    // Blink while invincible
    let player = &state.player;
    if (player.invincibility_frames / 4) % 2 == 0 {
        commands.push(DrawCommand {
            kind: DrawKind::Player {
                facing: player.facing,
                power: player.power,
            },
            shape: rect(camera, &player.rect),
            color: palette::PLAYER_RED,
        });
        let half = player.rect.size.y / 2.0;
        commands.push(DrawCommand {
            kind: DrawKind::Overalls,
            shape: Shape::Rect {
                pos: camera.to_screen(player.rect.pos + Vec2::new(0.0, half)),
                size: Vec2::new(player.rect.size.x, half),
            },
            color: palette::OVERALLS_BLUE,
        });
    }

    let banner = (state.phase == GamePhase::LevelComplete).then_some(Banner::LevelComplete);

    Frame {
        background: background_for(state.world),
        commands,
        hud: Some(Hud::from_state(state)),
        banner,
    }
}

/// Pole plus triangular pennant
fn push_flag(commands: &mut Vec<DrawCommand>, camera: &Camera, flag: &Aabb) {
    let origin = camera.to_screen(flag.pos);
    commands.push(DrawCommand {
        kind: DrawKind::Flagpole,
        shape: Shape::Rect {
            pos: origin,
            size: Vec2::new(10.0, FLAG_HEIGHT),
        },
        color: palette::FLAGPOLE,
    });
    commands.push(DrawCommand {
        kind: DrawKind::Pennant,
        shape: Shape::Polygon(vec![
            origin + Vec2::new(10.0, 20.0),
            origin + Vec2::new(45.0, 35.0),
            origin + Vec2::new(10.0, 50.0),
        ]),
        color: palette::PENNANT,
    });
}
