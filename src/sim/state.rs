//! Game state and core simulation types
//!
//! One authoritative, serializable state struct updated in place each tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::spawner::roll_gap;
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
}

impl GamePhase {
    /// Paused phases never tick
    pub fn is_paused(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// The player's character. Horizontal position is fixed by the config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top edge (y grows downward)
    pub y: f32,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
}

impl Actor {
    /// Actor at rest on the ground
    pub fn grounded(config: &GameConfig) -> Self {
        Self {
            y: config.ground_y(),
            vel_y: 0.0,
        }
    }

    /// Resting exactly on the ground
    #[inline]
    pub fn is_grounded(&self, config: &GameConfig) -> bool {
        self.y == config.ground_y()
    }
}

/// An obstacle scrolling right to left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
}

/// Complete game state (deterministic given config, seed and inputs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Ticks survived this run
    pub score: u64,
    /// Best score this session (seeded from storage)
    pub high_score: u64,
    /// Scroll speed (pixels/tick)
    pub speed: f32,
    /// Player character
    pub actor: Actor,
    /// Live obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    /// Spacing the newest obstacle must open up before the next spawn
    pub next_gap: f32,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Fresh state waiting for the first start
    pub fn new(config: &GameConfig, high_score: u64) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            high_score,
            speed: config.initial_speed,
            actor: Actor::grounded(config),
            obstacles: Vec::new(),
            next_gap: config.base_gap,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Push a new obstacle at the right edge of the playfield
    pub fn spawn_obstacle(&mut self, config: &GameConfig) -> u32 {
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            x: config.playfield_width,
        });
        id
    }

    /// Enter `Playing` with a clean run. The high score carries over.
    pub fn reset_run<R: Rng + ?Sized>(&mut self, config: &GameConfig, rng: &mut R) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.speed = config.initial_speed;
        self.actor = Actor::grounded(config);
        self.obstacles.clear();
        self.spawn_obstacle(config);
        self.next_gap = roll_gap(config, rng);
    }

    /// The newest obstacle, if any
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Score as shown in the HUD
    pub fn display_score(&self, config: &GameConfig) -> u64 {
        self.score / config.score_divisor
    }

    /// High score as shown in the HUD
    pub fn display_high_score(&self, config: &GameConfig) -> u64 {
        self.high_score / config.score_divisor
    }
}
