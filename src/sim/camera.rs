//! Horizontal follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Aabb;

/// Viewport over a level; only `x` moves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub level_width: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32, level_width: f32) -> Self {
        Self {
            x: 0.0,
            width,
            height,
            level_width,
        }
    }

    /// Rightmost camera position
    pub fn max_x(&self) -> f32 {
        (self.level_width - self.width).max(0.0)
    }

    /// Center on the target, clamped to the level
    pub fn follow(&mut self, target: &Aabb) {
        let x = target.center().x - self.width / 2.0;
        self.x = x.clamp(0.0, self.max_x());
    }

    /// World position to screen position
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.x, world.y)
    }

    /// Whether any part of `rect` is inside the viewport
    pub fn is_visible(&self, rect: &Aabb) -> bool {
        rect.right() > self.x && rect.left() < self.x + self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_clamps_to_level() {
        let mut camera = Camera::new(800.0, 600.0, 960.0);

        camera.follow(&Aabb::new(50.0, 0.0, 24.0, 32.0));
        assert_eq!(camera.x, 0.0);

        camera.follow(&Aabb::new(500.0, 0.0, 24.0, 32.0));
        assert_eq!(camera.x, 112.0);

        camera.follow(&Aabb::new(950.0, 0.0, 24.0, 32.0));
        assert_eq!(camera.x, 160.0);
    }

    #[test]
    fn test_narrow_level_stays_at_origin() {
        let mut camera = Camera::new(800.0, 600.0, 640.0);
        camera.follow(&Aabb::new(600.0, 0.0, 24.0, 32.0));
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn test_to_screen_and_visibility() {
        let mut camera = Camera::new(800.0, 600.0, 960.0);
        camera.x = 100.0;
        assert_eq!(camera.to_screen(Vec2::new(150.0, 40.0)), Vec2::new(50.0, 40.0));
        assert!(!camera.is_visible(&Aabb::new(40.0, 0.0, 32.0, 32.0)));
        assert!(camera.is_visible(&Aabb::new(80.0, 0.0, 32.0, 32.0)));
    }
}
