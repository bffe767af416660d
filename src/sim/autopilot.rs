//! Demo mode - the computer plays the game
//!
//! Jumps at the last tick that still carries the actor over the nearest
//! obstacle. Used by the native headless demo and for soak-testing the loop.

use super::physics::step_actor;
use super::state::{Actor, GameState};
use crate::config::GameConfig;

/// Ticks after a jump during which the actor clears an obstacle, as (first, last)
pub fn clearance_window(config: &GameConfig) -> Option<(u32, u32)> {
    let clear_y = config.obstacle_y() - config.actor_height;
    let mut actor = Actor {
        y: config.ground_y(),
        vel_y: config.jump_force,
    };

    let mut window: Option<(u32, u32)> = None;
    for j in 1..=10_000 {
        step_actor(&mut actor, config);
        if actor.y <= clear_y {
            window = Some(match window {
                Some((first, _)) => (first, j),
                None => (j, j),
            });
        }
        if actor.is_grounded(config) {
            break;
        }
    }
    window
}

/// Decide whether to jump this tick
pub fn should_jump(state: &GameState, config: &GameConfig) -> bool {
    if !state.actor.is_grounded(config) {
        return false;
    }
    let Some((_, last)) = clearance_window(config) else {
        // Jump can't clear an obstacle at all
        return false;
    };

    // Past this x the obstacle is still under the actor when it lands
    let latest_x = config.actor_x - config.obstacle_width + state.speed * (last + 1) as f32;

    state
        .obstacles
        .iter()
        .find(|o| o.x + config.obstacle_width > config.actor_x)
        .is_some_and(|o| o.x <= latest_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::sim::tick::{TickInput, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_clearance_window_defaults() {
        let config = GameConfig::default();
        // Actor bottom rises above the 64px obstacle from tick 7 to tick 29
        assert_eq!(clearance_window(&config), Some((7, 29)));
    }

    #[test]
    fn test_weak_jump_never_clears() {
        let config = GameConfig {
            jump_force: -2.0,
            ..Default::default()
        };
        assert_eq!(clearance_window(&config), None);
        let mut state = GameState::new(&config, 0);
        state.obstacles = vec![Obstacle { id: 1, x: 120.0 }];
        assert!(!should_jump(&state, &config));
    }

    #[test]
    fn test_waits_for_close_obstacle() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config, 0);
        state.obstacles = vec![Obstacle { id: 1, x: 700.0 }];
        assert!(!should_jump(&state, &config));
        state.obstacles[0].x = 165.0;
        assert!(should_jump(&state, &config));
    }

    #[test]
    fn test_survives_a_long_run() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut state = GameState::new(&config, 0);
        state.reset_run(&config, &mut rng);

        for _ in 0..3000 {
            let input = TickInput {
                jump: should_jump(&state, &config),
            };
            tick(&mut state, &input, &config, &mut rng);
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        // Clears a good number of obstacles before any crash
        assert!(state.score > 300, "crashed at score {}", state.score);
    }
}
