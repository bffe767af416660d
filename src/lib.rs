//! Dino Run - An endless runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacle scheduling, collisions, game state)
//! - `controller`: Frame-driven game loop and phase state machine
//! - `input`: Raw input events to jump commands
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `platform`: Browser/headless frame scheduling and DOM glue
//! - `config`: Data-driven game tuning

pub mod config;
pub mod controller;
pub mod error;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use controller::{FrameScheduler, GameController};
pub use error::{ConfigError, SchedulerError, StorageError};
pub use highscores::HighScore;
pub use input::{InputEvent, InputHandler};

/// Default game constants (mirrored by `GameConfig::default()`)
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 300.0;

    /// Actor defaults - fixed horizontal offset, only moves vertically
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_WIDTH: f32 = 64.0;
    pub const ACTOR_HEIGHT: f32 = 64.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 32.0;
    pub const OBSTACLE_HEIGHT: f32 = 64.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.65;
    /// Upward velocity applied on jump (pixels/tick, negative is up)
    pub const JUMP_FORCE: f32 = -12.0;

    /// Scroll speed at the start of a run (pixels/tick)
    pub const INITIAL_SPEED: f32 = 5.0;
    /// Speed added every `SPEED_INCREASE_INTERVAL` ticks
    pub const SPEED_INCREMENT: f32 = 0.5;
    pub const SPEED_INCREASE_INTERVAL: u64 = 500;

    /// Obstacle scheduling
    pub const MAX_OBSTACLES: usize = 3;
    pub const BASE_GAP: f32 = 200.0;
    pub const GAP_JITTER: f32 = 200.0;

    /// HUD shows score / SCORE_DIVISOR
    pub const SCORE_DIVISOR: u64 = 10;

    /// KeyboardEvent.code that triggers a jump
    pub const JUMP_CODE: &str = "Space";
    /// Storage keys
    pub const HIGH_SCORE_KEY: &str = "dinoHighScore";
    pub const CONFIG_KEY: &str = "dino_run_config";
}
