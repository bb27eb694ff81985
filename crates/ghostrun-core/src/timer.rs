//! Tick-driven countdown timers.
//!
//! Every delay in the engine (cooldowns, windups, death presentation,
//! portal phases) is a [`Countdown`] owned by the actor it belongs to and
//! advanced exactly once per fixed tick by the phase that owns it. There are
//! no background tasks: cancelling a delay is just resetting the countdown.

use serde::{Deserialize, Serialize};

/// Remainders below this are treated as elapsed, so a duration of `d`
/// seconds finishes after `round(d / dt)` ticks despite float drift.
const EPSILON: f32 = 1e-4;

/// A countdown in seconds.
///
/// An idle countdown (never started, cancelled, or finished) reports
/// `is_running() == false`.
///
/// # Example
///
/// ```
/// use ghostrun_core::timer::Countdown;
///
/// let mut cooldown = Countdown::started(0.05);
/// assert!(!cooldown.tick(0.02));
/// assert!(!cooldown.tick(0.02));
/// assert!(cooldown.tick(0.02));
/// assert!(!cooldown.is_running());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// An idle countdown.
    #[must_use]
    pub const fn idle() -> Self {
        Self { remaining: 0.0 }
    }

    /// A countdown already running for `duration` seconds.
    #[must_use]
    pub fn started(duration: f32) -> Self {
        let mut countdown = Self::idle();
        countdown.start(duration);
        countdown
    }

    /// (Re)starts the countdown. Non-positive durations leave it idle.
    pub fn start(&mut self, duration: f32) {
        self.remaining = if duration > EPSILON { duration } else { 0.0 };
    }

    /// Stops the countdown without reporting completion.
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    /// Returns true while time remains.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Seconds left, zero when idle.
    #[must_use]
    pub const fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advances the countdown by `dt`.
    ///
    /// Returns true only on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= EPSILON {
            self.remaining = 0.0;
            true
        } else {
            false
        }
    }
}
