//! Axis-aligned collision detection
//!
//! Both the actor and the obstacles are boxes; overlap uses open intervals so
//! boxes that merely touch do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Actor, GameState, Obstacle};
use crate::config::GameConfig;

/// Axis-aligned rectangle, `pos` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
    }
}

/// Actor bounds at its fixed horizontal offset
pub fn actor_rect(actor: &Actor, config: &GameConfig) -> Rect {
    Rect::new(config.actor_x, actor.y, config.actor_width, config.actor_height)
}

/// Obstacle bounds; obstacles stand on the floor
pub fn obstacle_rect(obstacle: &Obstacle, config: &GameConfig) -> Rect {
    Rect::new(
        obstacle.x,
        config.obstacle_y(),
        config.obstacle_width,
        config.obstacle_height,
    )
}

/// ID of the first obstacle (oldest first) touching the actor
pub fn first_collision(state: &GameState, config: &GameConfig) -> Option<u32> {
    let actor = actor_rect(&state.actor, config);
    state
        .obstacles
        .iter()
        .find(|o| actor.overlaps(&obstacle_rect(o, config)))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_basic() {
        let actor = Rect::new(50.0, 236.0, 64.0, 64.0);
        let obstacle = Rect::new(60.0, 236.0, 32.0, 64.0);
        assert!(actor.overlaps(&obstacle));
        assert!(obstacle.overlaps(&actor));
    }

    #[test]
    fn test_far_obstacle_misses() {
        let actor = Rect::new(50.0, 236.0, 64.0, 64.0);
        let obstacle = Rect::new(400.0, 236.0, 32.0, 64.0);
        assert!(!actor.overlaps(&obstacle));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let actor = Rect::new(50.0, 236.0, 64.0, 64.0);
        // Left edge exactly at the actor's right edge
        assert!(!actor.overlaps(&Rect::new(114.0, 236.0, 32.0, 64.0)));
        // Right edge exactly at the actor's left edge
        assert!(!actor.overlaps(&Rect::new(18.0, 236.0, 32.0, 64.0)));
        // Actor bottom exactly on the obstacle top
        let airborne = Rect::new(50.0, 172.0, 64.0, 64.0);
        assert!(!airborne.overlaps(&Rect::new(60.0, 236.0, 32.0, 64.0)));
        // One pixel lower does collide
        let lower = Rect::new(50.0, 173.0, 64.0, 64.0);
        assert!(lower.overlaps(&Rect::new(60.0, 236.0, 32.0, 64.0)));
    }

    #[test]
    fn test_jumping_clears_obstacle() {
        let config = GameConfig::default();
        let actor = Actor {
            y: config.ground_y() - 80.0,
            vel_y: 0.0,
        };
        let obstacle = Obstacle { id: 1, x: 60.0 };
        assert!(!actor_rect(&actor, &config).overlaps(&obstacle_rect(&obstacle, &config)));
    }

    #[test]
    fn test_first_collision_reports_oldest_hit() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        state.obstacles = vec![
            Obstacle { id: 3, x: 70.0 },
            Obstacle { id: 4, x: 80.0 },
            Obstacle { id: 5, x: 500.0 },
        ];
        assert_eq!(first_collision(&state, &config), Some(3));

        state.obstacles.remove(0);
        assert_eq!(first_collision(&state, &config), Some(4));

        state.obstacles.remove(0);
        assert_eq!(first_collision(&state, &config), None);
    }
}
