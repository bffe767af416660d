//! Game tuning
//!
//! All gameplay constants live in one immutable struct handed to the
//! controller at construction. Partial JSON overrides are supported; missing
//! fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Actor ===
    /// Fixed distance of the actor from the playfield's left edge
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Maximum live obstacles
    pub max_obstacles: usize,
    /// Minimum spacing between consecutive spawns
    pub base_gap: f32,
    /// Random extra spacing on top of `base_gap`
    pub gap_jitter: f32,

    // === Physics ===
    pub gravity: f32,
    pub jump_force: f32,

    // === Pacing ===
    pub initial_speed: f32,
    pub speed_increment: f32,
    pub speed_increase_interval: u64,

    // === Scoring / IO ===
    pub score_divisor: u64,
    pub jump_code: String,
    pub high_score_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            max_obstacles: MAX_OBSTACLES,
            base_gap: BASE_GAP,
            gap_jitter: GAP_JITTER,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            initial_speed: INITIAL_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_increase_interval: SPEED_INCREASE_INTERVAL,

            score_divisor: SCORE_DIVISOR,
            jump_code: JUMP_CODE.to_string(),
            high_score_key: HIGH_SCORE_KEY.to_string(),
        }
    }
}

impl GameConfig {
    /// Resting y-coordinate of the actor's top edge
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.playfield_height - self.actor_height
    }

    /// Top edge of every obstacle (they sit on the floor)
    #[inline]
    pub fn obstacle_y(&self) -> f32 {
        self.playfield_height - self.obstacle_height
    }

    /// Upper bound on how far above the ground a jump can carry the actor
    pub fn max_jump_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity)
    }

    /// Check every parameter the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value >= 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must not be negative",
                })
            }
        }

        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("actor_width", self.actor_width)?;
        positive("actor_height", self.actor_height)?;
        positive("obstacle_width", self.obstacle_width)?;
        positive("obstacle_height", self.obstacle_height)?;
        positive("gravity", self.gravity)?;
        positive("initial_speed", self.initial_speed)?;
        non_negative("actor_x", self.actor_x)?;
        non_negative("base_gap", self.base_gap)?;
        non_negative("gap_jitter", self.gap_jitter)?;
        non_negative("speed_increment", self.speed_increment)?;

        if !(self.jump_force < 0.0 && self.jump_force.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "jump_force",
                reason: "must be negative (up is -y)",
            });
        }
        if self.actor_height > self.playfield_height {
            return Err(ConfigError::Invalid {
                field: "actor_height",
                reason: "must fit inside the playfield",
            });
        }
        if self.obstacle_height > self.playfield_height {
            return Err(ConfigError::Invalid {
                field: "obstacle_height",
                reason: "must fit inside the playfield",
            });
        }
        if self.max_obstacles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_obstacles",
                reason: "must be at least 1",
            });
        }
        if self.speed_increase_interval == 0 {
            return Err(ConfigError::Invalid {
                field: "speed_increase_interval",
                reason: "must be at least 1",
            });
        }
        if self.score_divisor == 0 {
            return Err(ConfigError::Invalid {
                field: "score_divisor",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config override from storage, falling back to defaults
    pub fn load(store: &dyn crate::persistence::KeyValueStore) -> Self {
        match store.get_item(CONFIG_KEY) {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config override from storage");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring stored config: {}", e);
                    Self::default()
                }
            },
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }
}
