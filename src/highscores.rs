//! High score record
//!
//! A single integer persisted under one key. Read once at startup, written
//! only when a finished run beats it.

use crate::persistence::KeyValueStore;

/// Best score seen this session (or loaded from storage)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
    key: String,
}

impl HighScore {
    /// Load the stored record. Missing or malformed values count as 0.
    pub fn load(store: &dyn KeyValueStore, key: &str) -> Self {
        let best = match store.get_int(key) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                best
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        };
        Self {
            best,
            key: key.to_string(),
        }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a score would set a new record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Record a finished run's score. Returns true if it set a new record.
    ///
    /// A failed write is logged and the in-memory record still advances.
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match store.set_int(&self.key, score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("New high score {} not persisted: {}", score, e),
        }
        true
    }
}
