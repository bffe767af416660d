//! Per-frame simulation tick
//!
//! Core game loop step that advances the simulation deterministically.

use rand::Rng;

use super::collision::first_collision;
use super::physics::{step_actor, try_jump};
use super::spawner::advance_obstacles;
use super::state::{GamePhase, GameState};
use crate::config::GameConfig;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the last tick (space/click/tap)
    pub jump: bool,
}

/// A simulation event, drained by the controller for logging and game-over handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    ObstacleSpawned { id: u32 },
    ObstacleDespawned { id: u32 },
    SpeedIncreased { speed: f32 },
    Collision { obstacle_id: u32 },
}

/// Advance the game state by one tick
///
/// Does nothing unless the game is `Playing`. A collision ends the run on the
/// tick it happens and that tick is not scored.
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    input: &TickInput,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Stale or mid-air jumps are dropped, never queued
    if input.jump && try_jump(&mut state.actor, state.phase, config) {
        events.push(GameEvent::Jumped);
    }

    step_actor(&mut state.actor, config);

    let report = advance_obstacles(state, config, rng);
    events.extend(
        report
            .despawned
            .into_iter()
            .map(|id| GameEvent::ObstacleDespawned { id }),
    );
    if let Some(id) = report.spawned {
        events.push(GameEvent::ObstacleSpawned { id });
    }

    debug_assert!(
        state.actor.y <= config.ground_y(),
        "actor below ground: y={} ground={}",
        state.actor.y,
        config.ground_y()
    );
    debug_assert!(
        state.obstacles.len() <= config.max_obstacles,
        "too many obstacles: {}",
        state.obstacles.len()
    );

    if let Some(obstacle_id) = first_collision(state, config) {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Collision { obstacle_id });
        return events;
    }

    // Speed ratchet: fire whenever a multiple of the interval is crossed
    let interval = config.speed_increase_interval;
    let prev = state.score;
    state.score += 1;
    if prev / interval < state.score / interval {
        state.speed += config.speed_increment;
        events.push(GameEvent::SpeedIncreased { speed: state.speed });
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Actor, Obstacle};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn start(config: &GameConfig, seed: u64) -> (GameState, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut state = GameState::new(config, 0);
        state.reset_run(config, &mut rng);
        (state, rng)
    }

    #[test]
    fn test_paused_phases_do_not_tick() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&config, 0);
        let before = state.clone();

        let events = tick(&mut state, &TickInput { jump: true }, &config, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state, before);

        state.phase = GamePhase::GameOver;
        let before = state.clone();
        tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_scores_and_scrolls() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        let events = tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert!(events.is_empty());
        assert_eq!(state.score, 1);
        assert_eq!(state.obstacles[0].x, config.playfield_width - config.initial_speed);
    }

    #[test]
    fn test_collision_ends_game() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        state.score = 42;
        // Lands at x=55 after this tick's scroll, overlapping the actor at x=50
        state.obstacles = vec![Obstacle { id: 7, x: 60.0 }];

        let events = tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::Collision { obstacle_id: 7 }));
        // The fatal tick is not scored
        assert_eq!(state.score, 42);
    }

    #[test]
    fn test_distant_obstacle_is_harmless() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        state.obstacles = vec![Obstacle { id: 7, x: 400.0 }];
        tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_jump_applies_when_grounded() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        let events = tick(&mut state, &TickInput { jump: true }, &config, &mut rng);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert_eq!(state.actor.vel_y, config.jump_force + config.gravity);
        assert!(state.actor.y < config.ground_y());
    }

    #[test]
    fn test_airborne_jump_ignored() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        tick(&mut state, &TickInput { jump: true }, &config, &mut rng);
        let vel = state.actor.vel_y;

        let events = tick(&mut state, &TickInput { jump: true }, &config, &mut rng);
        assert!(!events.contains(&GameEvent::Jumped));
        assert_eq!(state.actor.vel_y, vel + config.gravity);
    }

    #[test]
    fn test_speed_up_on_interval() {
        let config = GameConfig::default();
        let (mut state, mut rng) = start(&config, 1);
        // Park the actor out of reach so nothing can end the run
        state.obstacles.clear();
        state.score = config.speed_increase_interval - 1;

        let events = tick(&mut state, &TickInput::default(), &config, &mut rng);
        assert_eq!(state.score, config.speed_increase_interval);
        assert_eq!(state.speed, config.initial_speed + config.speed_increment);
        assert!(events.contains(&GameEvent::SpeedIncreased { speed: state.speed }));
    }

    #[test]
    fn test_speed_up_not_repeated_within_interval() {
        let config = GameConfig {
            speed_increase_interval: 3,
            ..Default::default()
        };
        let (mut state, mut rng) = start(&config, 1);
        let mut speeds = Vec::new();
        for _ in 0..7 {
            // Keep the run alive regardless of spawns
            state.obstacles.retain(|o| o.x > 200.0);
            state.actor = Actor::grounded(&config);
            tick(&mut state, &TickInput::default(), &config, &mut rng);
            speeds.push(state.speed);
        }
        assert_eq!(speeds, vec![5.0, 5.0, 5.5, 5.5, 5.5, 6.0, 6.0]);
    }

    #[test]
    fn test_determinism() {
        // Two runs with the same seed and inputs produce identical state
        let config = GameConfig::default();
        let (mut a, mut rng_a) = start(&config, 99999);
        let (mut b, mut rng_b) = start(&config, 99999);

        for i in 0..400 {
            let input = TickInput { jump: i % 37 == 0 };
            tick(&mut a, &input, &config, &mut rng_a);
            tick(&mut b, &input, &config, &mut rng_b);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_run_invariants(
            seed in any::<u64>(),
            jumps in proptest::collection::vec(any::<bool>(), 1..600),
        ) {
            let config = GameConfig::default();
            let (mut state, mut rng) = start(&config, seed);
            let floor = config.ground_y();
            let ceiling = floor - config.max_jump_height();

            for jump in jumps {
                let prev_score = state.score;
                let prev_speed = state.speed;
                tick(&mut state, &TickInput { jump }, &config, &mut rng);

                prop_assert!(state.actor.y <= floor);
                prop_assert!(state.actor.y >= ceiling);
                prop_assert!(state.obstacles.len() <= config.max_obstacles);
                prop_assert!(state.score >= prev_score);
                prop_assert!(state.speed >= prev_speed);

                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
        }
    }
}
