//! Collision detection and response
//!
//! Single-pass AABB resolution, run in a fixed order each tick:
//! player×platforms, enemies×platforms, player×enemies, player×coins,
//! player×items, player×flag.
//!
//! Only vertical contact is resolved. A player overlapping a platform's side
//! is not pushed back.

use super::entity::Aabb;
use super::state::{DeathCause, GameEvent, GameState};
use crate::consts::*;

/// Land on, or bump into, every overlapping platform.
///
/// Lava kills immediately and skips the remaining platforms.
pub fn player_platforms(state: &mut GameState) -> Option<DeathCause> {
    let mut broken: Vec<u32> = Vec::new();

    for platform in state.platforms.iter_mut() {
        if !state.player.rect.overlaps(&platform.rect) {
            continue;
        }

        if platform.is_lethal() {
            return Some(DeathCause::Lava);
        }

        let player = &mut state.player;
        if player.vel.y > 0.0 {
            // Falling: land on top
            if player.rect.bottom() > platform.rect.top() {
                player.rect.set_bottom(platform.rect.top());
                player.vel.y = 0.0;
                player.on_ground = true;
            }
        } else if player.vel.y < 0.0 && player.rect.top() < platform.rect.bottom() {
            // Rising: head bump
            if platform.take_item() {
                state.score += SCORE_QUESTION;
                state.events.push(GameEvent::BlockBumped { id: platform.id });
            } else if platform.breakable() && player.power.is_powered() {
                broken.push(platform.id);
                state.score += SCORE_BRICK;
                state.events.push(GameEvent::BrickBroken { id: platform.id });
            }
            player.rect.set_top(platform.rect.bottom());
            player.vel.y = 0.0;
        }
    }

    if !broken.is_empty() {
        state.platforms.retain(|p| !broken.contains(&p.id));
    }

    None
}

/// Enemies only ever land; they ignore platform sides and ceilings
pub fn enemy_platforms(state: &mut GameState) {
    for enemy in state.enemies.iter_mut() {
        for platform in &state.platforms {
            if enemy.vel.y > 0.0 && enemy.rect.overlaps(&platform.rect) {
                enemy.rect.set_bottom(platform.rect.top());
                enemy.vel.y = 0.0;
                enemy.on_ground = true;
            }
        }
    }
}

/// Stomp or get hurt by each overlapping enemy.
///
/// Returns the death cause if an unpowered player is hit.
pub fn player_enemies(state: &mut GameState) -> Option<DeathCause> {
    if state.player.invincibility_frames > 0 {
        return None;
    }

    let player_rect = state.player.rect;
    let touching: Vec<(u32, Aabb)> = state
        .enemies
        .iter()
        .filter(|e| player_rect.overlaps(&e.rect))
        .map(|e| (e.id, e.rect))
        .collect();

    let mut stomped: Vec<u32> = Vec::new();
    let mut died = None;

    for (id, enemy_rect) in touching {
        let player = &mut state.player;
        if player.vel.y > 0.0 && player.rect.bottom() < enemy_rect.center().y {
            stomped.push(id);
            state.score += SCORE_STOMP;
            player.vel.y = STOMP_BOUNCE;
            state.events.push(GameEvent::EnemyStomped { id });
        } else if player.power.is_powered() {
            player.power = player.power.downgrade();
            player.invincibility_frames = INVINCIBILITY_FRAMES;
            state.events.push(GameEvent::PowerLost { power: player.power });
        } else {
            died = Some(DeathCause::Enemy);
            break;
        }
    }

    if !stomped.is_empty() {
        state.enemies.retain(|e| !stomped.contains(&e.id));
    }

    died
}

/// Pick up every overlapping coin; every 100th coin is an extra life
pub fn player_coins(state: &mut GameState) {
    let player_rect = state.player.rect;
    let before = state.coins.len();
    state.coins.retain(|c| !player_rect.overlaps(&c.rect));
    let picked = before - state.coins.len();

    for _ in 0..picked {
        state.collect_coin();
    }
}

/// Pick up every overlapping power-up
pub fn player_items(state: &mut GameState) {
    let player_rect = state.player.rect;
    let mut picked = Vec::new();
    state.items.retain(|item| {
        if player_rect.overlaps(&item.rect) {
            picked.push(item.kind);
            false
        } else {
            true
        }
    });

    for kind in picked {
        state.player.power = state.player.power.max(kind.grants());
        state.score += SCORE_ITEM;
        state.events.push(GameEvent::ItemCollected { kind });
    }
}

/// True on the first flag contact of a level
pub fn player_flag(state: &GameState) -> bool {
    !state.level_completed && state.player.rect.overlaps(&state.flag.rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Coin, Enemy, EnemyKind, Item, ItemKind, Platform, PlatformKind, PowerLevel};

    /// Playing state with nothing in the level
    fn empty_state() -> GameState {
        let mut state = GameState::new();
        state.platforms.clear();
        state.enemies.clear();
        state.coins.clear();
        state.items.clear();
        state.events.clear();
        state
    }

    /// Player just below a block, moving up into it
    fn bump_setup(kind: PlatformKind) -> GameState {
        let mut state = empty_state();
        state.platforms.push(Platform::new(500, kind, 60.0, 460.0, 32.0, 32.0));
        state.player.rect.pos.y = 490.0;
        state.player.vel.y = -8.0;
        state
    }

    #[test]
    fn test_landing_snaps_to_top() {
        let mut state = empty_state();
        state.platforms.push(Platform::new(500, PlatformKind::Ground, 0.0, 536.0, 200.0, 64.0));
        state.player.rect.pos.y = 510.0; // bottom at 542
        state.player.vel.y = 5.0;

        assert!(player_platforms(&mut state).is_none());
        assert_eq!(state.player.rect.bottom(), 536.0);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_lava_kills() {
        let mut state = empty_state();
        state.platforms.push(Platform::new(500, PlatformKind::Lava, 0.0, 520.0, 200.0, 32.0));
        state.player.rect.pos.y = 500.0;
        state.player.vel.y = 2.0;

        assert_eq!(player_platforms(&mut state), Some(DeathCause::Lava));
    }

    #[test]
    fn test_question_block_pays_once() {
        let mut state = bump_setup(PlatformKind::Question);
        player_platforms(&mut state);
        assert_eq!(state.score, SCORE_QUESTION);
        assert!(!state.platforms[0].has_item);
        assert_eq!(state.player.rect.top(), 492.0);
        assert_eq!(state.player.vel.y, 0.0);

        // Hit it again
        state.player.rect.pos.y = 490.0;
        state.player.vel.y = -8.0;
        player_platforms(&mut state);
        assert_eq!(state.score, SCORE_QUESTION);
        assert_eq!(state.platforms.len(), 1);
    }

    #[test]
    fn test_brick_needs_power() {
        let mut state = bump_setup(PlatformKind::Brick);
        player_platforms(&mut state);
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.score, 0);

        let mut state = bump_setup(PlatformKind::Brick);
        state.player.power = PowerLevel::Big;
        player_platforms(&mut state);
        assert!(state.platforms.is_empty());
        assert_eq!(state.score, SCORE_BRICK);
        assert_eq!(state.player.vel.y, 0.0);
    }

    #[test]
    fn test_enemy_lands_but_ignores_ceiling() {
        let mut state = empty_state();
        state.platforms.push(Platform::new(500, PlatformKind::Ground, 0.0, 536.0, 200.0, 64.0));
        let mut enemy = Enemy::new(600, EnemyKind::Goomba, 100.0, 520.0);
        enemy.vel.y = 3.0;
        state.enemies.push(enemy);
        let mut rising = Enemy::new(601, EnemyKind::Koopa, 150.0, 520.0);
        rising.vel.y = -3.0;
        state.enemies.push(rising);

        enemy_platforms(&mut state);
        assert_eq!(state.enemies[0].rect.bottom(), 536.0);
        assert!(state.enemies[0].on_ground);
        assert_eq!(state.enemies[1].rect.top(), 520.0);
        assert!(!state.enemies[1].on_ground);
    }

    #[test]
    fn test_stomp_any_kind() {
        for kind in [EnemyKind::Goomba, EnemyKind::Koopa, EnemyKind::Piranha, EnemyKind::Bowser] {
            let mut state = empty_state();
            state.enemies.push(Enemy::new(600, kind, 60.0, 500.0));
            state.player.rect.pos.y = 470.0; // bottom 502, above enemy center
            state.player.vel.y = 4.0;

            assert!(player_enemies(&mut state).is_none());
            assert!(state.enemies.is_empty(), "{:?} not stomped", kind);
            assert_eq!(state.player.vel.y, STOMP_BOUNCE);
            assert_eq!(state.score, SCORE_STOMP);

            // No double credit
            player_enemies(&mut state);
            assert_eq!(state.score, SCORE_STOMP);
        }
    }

    #[test]
    fn test_side_hit_kills_small_player() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(600, EnemyKind::Goomba, 70.0, 500.0));
        state.player.rect.pos.y = 496.0;
        state.player.vel.y = 0.0;

        assert_eq!(player_enemies(&mut state), Some(DeathCause::Enemy));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_hit_while_powered_downgrades() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(600, EnemyKind::Goomba, 70.0, 500.0));
        state.enemies.push(Enemy::new(601, EnemyKind::Goomba, 72.0, 500.0));
        state.player.power = PowerLevel::Fire;

        // Each overlapping goomba costs one level
        assert!(player_enemies(&mut state).is_none());
        assert_eq!(state.player.power, PowerLevel::Small);
        assert_eq!(state.player.invincibility_frames, INVINCIBILITY_FRAMES);
        assert_eq!(state.events.len(), 2);

        // Invincible: contact ignored entirely
        assert!(player_enemies(&mut state).is_none());
        assert_eq!(state.player.power, PowerLevel::Small);
    }

    #[test]
    fn test_second_hit_same_tick_kills_big_player() {
        let mut state = empty_state();
        state.enemies.push(Enemy::new(600, EnemyKind::Goomba, 70.0, 500.0));
        state.enemies.push(Enemy::new(601, EnemyKind::Goomba, 72.0, 500.0));
        state.player.power = PowerLevel::Big;

        assert_eq!(player_enemies(&mut state), Some(DeathCause::Enemy));
        assert_eq!(state.player.power, PowerLevel::Small);
    }

    #[test]
    fn test_coins_grant_life_at_hundred() {
        let mut state = empty_state();
        let lives = state.player.lives;
        for i in 0..99 {
            state.coins.push(Coin::new(1000 + i, 65.0, 500.0));
        }
        player_coins(&mut state);
        assert_eq!(state.coins_collected, 99);
        assert_eq!(state.player.lives, lives);
        assert_eq!(state.score, 99 * SCORE_COIN);

        state.coins.push(Coin::new(2000, 65.0, 500.0));
        player_coins(&mut state);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.player.lives, lives + 1);
    }

    #[test]
    fn test_item_raises_power() {
        let mut state = empty_state();
        state.items.push(Item::new(700, ItemKind::FireFlower, 60.0, 496.0));
        player_items(&mut state);
        assert!(state.items.is_empty());
        assert_eq!(state.player.power, PowerLevel::Fire);

        // A mushroom never lowers fire power
        state.items.push(Item::new(701, ItemKind::Mushroom, 60.0, 496.0));
        player_items(&mut state);
        assert_eq!(state.player.power, PowerLevel::Fire);
        assert_eq!(state.score, 2 * SCORE_ITEM);
    }

    #[test]
    fn test_flag_guarded() {
        let mut state = empty_state();
        state.player.rect.pos = state.flag.rect.pos;
        assert!(player_flag(&state));
        state.level_completed = true;
        assert!(!player_flag(&state));
    }
}
