//! Obstacle scheduling
//!
//! Scrolls obstacles left, retires the ones that have left the playfield and
//! spawns new ones at the right edge with randomized but bounded spacing.

use rand::Rng;

use super::state::GameState;
use crate::config::GameConfig;

/// What happened to the obstacle queue during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnReport {
    /// IDs dropped off the left edge
    pub despawned: Vec<u32>,
    /// ID spawned at the right edge
    pub spawned: Option<u32>,
}

/// Roll the spacing required before the next spawn: `base_gap + U[0, gap_jitter)`
pub fn roll_gap<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> f32 {
    config.base_gap + rng.random::<f32>() * config.gap_jitter
}

/// Move, retire and spawn obstacles for one tick
pub fn advance_obstacles<R: Rng + ?Sized>(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut R,
) -> SpawnReport {
    let mut report = SpawnReport::default();
    let speed = state.speed;

    for obstacle in &mut state.obstacles {
        obstacle.x -= speed;
    }

    // Right edge fully past the left boundary
    let min_x = -config.obstacle_width;
    state.obstacles.retain(|o| {
        let live = o.x > min_x;
        if !live {
            report.despawned.push(o.id);
        }
        live
    });

    let should_spawn = state.obstacles.len() < config.max_obstacles
        && match state.newest_obstacle() {
            Some(newest) => newest.x < config.playfield_width - state.next_gap,
            // Never leave the playfield empty
            None => true,
        };

    if should_spawn {
        report.spawned = Some(state.spawn_obstacle(config));
        state.next_gap = roll_gap(config, rng);
    }

    report
}
