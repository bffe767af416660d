//! Game loop controller
//!
//! Owns the single authoritative `GameState` and drives it from the host's
//! per-frame callback. At most one frame is ever pending; none is pending
//! outside `Playing`.

use rand::Rng;

use crate::config::GameConfig;
use crate::error::{ConfigError, SchedulerError};
use crate::highscores::HighScore;
use crate::input::{InputEvent, InputHandler};
use crate::persistence::KeyValueStore;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Host per-frame scheduling (requestAnimationFrame on web)
pub trait FrameScheduler {
    type Handle;

    /// Ask the host to call `GameController::on_frame` on the next frame
    fn request_tick(&mut self) -> Result<Self::Handle, SchedulerError>;

    /// Withdraw a pending request. Unknown or already-fired handles are ignored.
    fn cancel_tick(&mut self, handle: Self::Handle);
}

/// The game loop: phase state machine, tick driver and high score keeper
pub struct GameController<S, F, R>
where
    S: KeyValueStore,
    F: FrameScheduler,
    R: Rng,
{
    config: GameConfig,
    state: GameState,
    high_score: HighScore,
    input: InputHandler,
    store: S,
    scheduler: F,
    rng: R,
    pending: Option<F::Handle>,
}

impl<S, F, R> GameController<S, F, R>
where
    S: KeyValueStore,
    F: FrameScheduler,
    R: Rng,
{
    /// Validate the config and load the stored high score
    pub fn new(config: GameConfig, store: S, scheduler: F, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = HighScore::load(&store, &config.high_score_key);
        let state = GameState::new(&config, high_score.best());
        let input = InputHandler::new(config.jump_code.clone());
        Ok(Self {
            config,
            state,
            high_score,
            input,
            store,
            scheduler,
            rng,
            pending: None,
        })
    }

    /// Start a run from `NotStarted` or `GameOver`, or from a stopped or
    /// stalled `Playing` loop that has no frame pending
    pub fn start(&mut self) {
        if self.state.phase == GamePhase::Playing && self.pending.is_some() {
            log::warn!("Start ignored: run already in progress");
            return;
        }
        let from = self.state.phase;
        self.state.reset_run(&self.config, &mut self.rng);
        self.input.clear();
        log::info!("Run started (from {:?}), high score {}", from, self.state.high_score);
        self.schedule_next();
    }

    /// Start a new run after game over
    pub fn restart(&mut self) {
        self.start();
    }

    /// Record a raw input event; it takes effect on the next tick
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        self.input.handle(event)
    }

    /// Per-frame callback. Runs one tick if a frame was pending.
    pub fn on_frame(&mut self) -> &GameState {
        if self.pending.take().is_none() {
            log::debug!("Ignoring unscheduled frame");
            return &self.state;
        }
        if self.state.phase != GamePhase::Playing {
            return &self.state;
        }

        let input = TickInput {
            jump: self.input.take_jump(),
        };
        let events = tick(&mut self.state, &input, &self.config, &mut self.rng);

        for event in events {
            match event {
                GameEvent::Jumped => log::trace!("Jump at score {}", self.state.score),
                GameEvent::ObstacleSpawned { id } => log::debug!("Obstacle {} spawned", id),
                GameEvent::ObstacleDespawned { id } => log::trace!("Obstacle {} cleared", id),
                GameEvent::SpeedIncreased { speed } => {
                    log::debug!("Speed up to {:.1} at score {}", speed, self.state.score)
                }
                GameEvent::Collision { obstacle_id } => self.finish_run(obstacle_id),
            }
        }

        if self.state.phase == GamePhase::Playing {
            self.schedule_next();
        }
        &self.state
    }

    /// Cancel the pending frame, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_tick(handle);
            log::debug!("Frame loop stopped");
        }
    }

    fn finish_run(&mut self, obstacle_id: u32) {
        let score = self.state.score;
        log::info!("Game over: hit obstacle {} at score {}", obstacle_id, score);
        if self.high_score.submit(score, &mut self.store) {
            log::info!("New high score: {}", score);
        }
        self.state.high_score = self.high_score.best();
    }

    fn schedule_next(&mut self) {
        debug_assert!(self.pending.is_none(), "frame already pending");
        match self.scheduler.request_tick() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => log::error!("Game loop stalled: {}", e),
        }
    }

    /// Read-only view for the presentation layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn display_score(&self) -> u64 {
        self.state.display_score(&self.config)
    }

    pub fn display_high_score(&self) -> u64 {
        self.state.display_high_score(&self.config)
    }

    pub fn is_tick_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub(crate) fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S, F, R> Drop for GameController<S, F, R>
where
    S: KeyValueStore,
    F: FrameScheduler,
    R: Rng,
{
    fn drop(&mut self) {
        self.stop();
    }
}
