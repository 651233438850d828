//! Configuration for an Engine

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::types::{
    HARD_DROP_SETTLE_MS, INITIAL_FALL_INTERVAL_MS, LINES_PER_LEVEL, LINE_CLEAR_DELAY_MS,
    SPEED_DECAY,
};

/// Tunable engine parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gravity interval at level 1 (in milliseconds)
    pub initial_fall_interval_ms: f64,

    /// Multiplier applied to the fall interval on each level-up (0.0 - 1.0]
    pub speed_decay: f64,

    /// Lower bound for the fall interval (None = unbounded)
    pub min_fall_interval_ms: Option<f64>,

    /// Lines per level bracket
    pub lines_per_level: u32,

    /// Delay between marking cleared rows and removing them (in milliseconds)
    pub line_clear_delay_ms: u32,

    /// How long commands stay suppressed after a hard drop (in milliseconds)
    pub hard_drop_settle_ms: u32,

    /// Piece generator seed (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
            speed_decay: SPEED_DECAY,
            min_fall_interval_ms: None,
            lines_per_level: LINES_PER_LEVEL,
            line_clear_delay_ms: LINE_CLEAR_DELAY_MS,
            hard_drop_settle_ms: HARD_DROP_SETTLE_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the piece generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the level-1 fall interval in milliseconds
    pub fn with_initial_fall_interval_ms(mut self, interval_ms: f64) -> Self {
        self.initial_fall_interval_ms = interval_ms;
        self
    }

    /// Set the per-level speed decay
    pub fn with_speed_decay(mut self, decay: f64) -> Self {
        self.speed_decay = decay;
        self
    }

    /// Set a floor for the fall interval
    pub fn with_min_fall_interval_ms(mut self, floor_ms: Option<f64>) -> Self {
        self.min_fall_interval_ms = floor_ms;
        self
    }

    /// Set the number of lines per level
    pub fn with_lines_per_level(mut self, lines: u32) -> Self {
        self.lines_per_level = lines;
        self
    }

    /// Set the cleared-row removal delay
    pub fn with_line_clear_delay_ms(mut self, delay_ms: u32) -> Self {
        self.line_clear_delay_ms = delay_ms;
        self
    }

    /// Set the hard-drop suppression window
    pub fn with_hard_drop_settle_ms(mut self, delay_ms: u32) -> Self {
        self.hard_drop_settle_ms = delay_ms;
        self
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_fall_interval_ms.is_finite() && self.initial_fall_interval_ms > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "initial_fall_interval_ms must be positive, got {}",
                self.initial_fall_interval_ms
            )));
        }
        if !(self.speed_decay > 0.0 && self.speed_decay <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "speed_decay must be in (0, 1], got {}",
                self.speed_decay
            )));
        }
        if let Some(floor) = self.min_fall_interval_ms {
            if !(floor.is_finite() && floor > 0.0) {
                return Err(EngineError::InvalidConfig(format!(
                    "min_fall_interval_ms must be positive, got {}",
                    floor
                )));
            }
        }
        if self.lines_per_level == 0 {
            return Err(EngineError::InvalidConfig(
                "lines_per_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
