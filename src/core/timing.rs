//! Fixed-interval step timers fed from variable frame deltas.
//!
//! The game loop runs at frame rate but the snake moves on a fixed cadence,
//! so each timer accumulates elapsed milliseconds and releases whole steps.
//! Cadence changes go through [`TickTimer::set_interval`], which cancels the
//! running interval outright; a switch can never release a stale step from
//! time accumulated under the old cadence.

/// Accumulator-driven repeating timer.
///
/// Feed frame deltas with [`TickTimer::feed`], then drain due steps one at a
/// time with [`TickTimer::consume_step`]. The interval is re-read on every
/// call, so an interval change takes effect mid-frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimer {
    interval_ms: u64,
    accumulated_ms: u64,
}

impl TickTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Add elapsed frame time to the accumulator.
    pub fn feed(&mut self, dt_ms: u64) {
        self.accumulated_ms += dt_ms;
    }

    /// Take one due step out of the accumulator, if a full interval has
    /// elapsed. Call in a loop to drain a large delta step by step.
    pub fn consume_step(&mut self) -> bool {
        if self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            true
        } else {
            false
        }
    }

    /// Switch cadence. Accumulated time is dropped, so the next step is due
    /// one full new interval from now.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
        self.accumulated_ms = 0;
    }

    /// Restart the current interval from zero accumulation.
    pub fn restart(&mut self) {
        self.accumulated_ms = 0;
    }
}
