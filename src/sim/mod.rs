//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, fixed per-tick constants
//! - Injected RNG only
//! - Stable obstacle order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, actor_rect, first_collision, obstacle_rect};
pub use physics::{step_actor, try_jump};
pub use spawner::{SpawnReport, advance_obstacles, roll_gap};
pub use state::{Actor, GamePhase, GameState, Obstacle};
pub use tick::{GameEvent, TickInput, tick};
