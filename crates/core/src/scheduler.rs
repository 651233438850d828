//! Scheduler module - drives gravity from outside the engine
//!
//! The engine only knows its current fall interval. A scheduler accumulates
//! elapsed time and issues one soft drop each time the interval is reached,
//! re-reading the interval afterwards because a lock may have raised the level.
//! It also forwards elapsed time so the engine's deferred effects can fire.

use crate::engine::Engine;

/// Fixed-step gravity driver
#[derive(Debug, Clone, Default)]
pub struct GravityScheduler {
    drop_timer_ms: f64,
}

impl GravityScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time accumulated toward the next soft drop
    pub fn pending_ms(&self) -> f64 {
        self.drop_timer_ms
    }

    /// Forget accumulated time (call after `start`)
    pub fn reset(&mut self) {
        self.drop_timer_ms = 0.0;
    }

    /// Advance by `elapsed_ms`. Returns true when a soft drop was issued.
    ///
    /// Deferred effects always advance. Gravity stands still before start,
    /// while paused and after game over; pausing discards the partial interval.
    pub fn advance(&mut self, engine: &mut Engine, elapsed_ms: u32) -> bool {
        engine.advance_time(elapsed_ms);

        if !engine.is_started() || engine.is_over() || engine.is_paused() {
            self.drop_timer_ms = 0.0;
            return false;
        }

        self.drop_timer_ms += f64::from(elapsed_ms);
        if self.drop_timer_ms < engine.fall_interval_ms() {
            return false;
        }

        self.drop_timer_ms = 0.0;
        engine.soft_drop()
    }
}
