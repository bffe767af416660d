//! Headless frame scheduling for native runs and tests
//!
//! The "host" is whoever calls `pump_frame`: it fires the pending request, if
//! any, and runs the controller's frame callback.

use rand::Rng;

use crate::controller::{FrameScheduler, GameController};
use crate::error::SchedulerError;
use crate::persistence::KeyValueStore;

/// Scheduler that holds at most one request until it is fired by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Option<u64>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the pending request. Returns false if nothing was pending.
    pub fn fire(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total requests accepted
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn before firing
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_tick(&mut self) -> Result<u64, SchedulerError> {
        if self.pending.is_some() {
            return Err(SchedulerError("a frame is already pending".to_string()));
        }
        self.next_handle += 1;
        self.requested += 1;
        self.pending = Some(self.next_handle);
        Ok(self.next_handle)
    }

    fn cancel_tick(&mut self, handle: u64) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

impl<S, R> GameController<S, ManualScheduler, R>
where
    S: KeyValueStore,
    R: Rng,
{
    /// Run one frame if one was requested. Returns whether a frame ran.
    pub fn pump_frame(&mut self) -> bool {
        if !self.scheduler_mut().fire() {
            return false;
        }
        self.on_frame();
        true
    }

    /// Pump frames until the loop parks itself or `max_frames` is reached
    pub fn run_until_idle(&mut self, max_frames: u64) -> u64 {
        let mut frames = 0;
        while frames < max_frames && self.pump_frame() {
            frames += 1;
        }
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::persistence::MemoryStore;
    use crate::sim::GamePhase;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_single_pending_request() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_tick().unwrap();
        assert!(scheduler.request_tick().is_err());
        assert!(scheduler.fire());
        assert!(!scheduler.fire());

        let second = scheduler.request_tick().unwrap();
        assert_ne!(first, second);
        assert_eq!(scheduler.requested(), 2);
    }

    #[test]
    fn test_cancel_stale_handle_is_noop() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_tick().unwrap();
        scheduler.fire();
        let second = scheduler.request_tick().unwrap();

        scheduler.cancel_tick(first);
        assert!(scheduler.is_pending());
        scheduler.cancel_tick(second);
        scheduler.cancel_tick(second);
        assert!(!scheduler.is_pending());
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_run_until_idle_stops_at_game_over() {
        let mut game = GameController::new(
            GameConfig::default(),
            MemoryStore::new(),
            ManualScheduler::new(),
            Pcg32::seed_from_u64(5),
        )
        .unwrap();
        game.start();
        // Nobody jumps, so the first obstacle ends the run
        let frames = game.run_until_idle(10_000);
        assert!(frames < 10_000);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.high_score(), game.state().score);
        assert!(!game.scheduler().is_pending());
    }
}
