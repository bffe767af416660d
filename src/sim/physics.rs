//! Vertical actor physics
//!
//! Fixed per-tick integration: velocity first, then position, clamped to the
//! ground so the actor can never tunnel through the floor.

use super::state::{Actor, GamePhase};
use crate::config::GameConfig;

/// Advance the actor by one tick
pub fn step_actor(actor: &mut Actor, config: &GameConfig) {
    let ground_y = config.ground_y();
    actor.vel_y += config.gravity;
    actor.y = (actor.y + actor.vel_y).min(ground_y);

    // Landed: stop accumulating velocity into the floor
    if actor.y >= ground_y {
        actor.y = ground_y;
        actor.vel_y = 0.0;
    }
}

/// Apply a jump if the actor is grounded and the game is running.
///
/// Returns whether the jump took effect. Mid-air and paused jumps are ignored.
pub fn try_jump(actor: &mut Actor, phase: GamePhase, config: &GameConfig) -> bool {
    if phase != GamePhase::Playing || !actor.is_grounded(config) {
        return false;
    }
    actor.vel_y = config.jump_force;
    true
}
