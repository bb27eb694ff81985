//! Per-tick player input and edge detection.
//!
//! Hosts hand the simulation an [`InputSnapshot`] of *held* state every tick.
//! The core derives "just pressed" edges itself with an [`InputTracker`], so
//! replaying recorded snapshots reproduces the same jumps and attacks.

use serde::{Deserialize, Serialize};

/// Axis values beyond this magnitude count as a full press.
pub const AXIS_THRESHOLD: f32 = 0.5;

/// Held input state for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Horizontal movement axis in `[-1, 1]`.
    pub move_x: f32,
    /// Jump button.
    pub jump: bool,
    /// Melee attack button.
    pub attack: bool,
    /// Toggles the escorted ally between walking and guarding.
    pub halt_toggle: bool,
    /// Context interaction (checkpoint markers).
    pub interact: bool,
    /// Ghost bomb ability.
    pub ability: bool,
}

impl InputSnapshot {
    /// Neutral input.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Holding the horizontal axis at `move_x`.
    #[must_use]
    pub fn moving(move_x: f32) -> Self {
        Self {
            move_x,
            ..Self::default()
        }
    }

    /// Quantised horizontal direction: `-1.0`, `0.0` or `1.0`.
    #[must_use]
    pub fn axis(&self) -> f32 {
        if self.move_x > AXIS_THRESHOLD {
            1.0
        } else if self.move_x < -AXIS_THRESHOLD {
            -1.0
        } else {
            0.0
        }
    }
}

/// Buttons that went from released to held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    /// Jump pressed this tick.
    pub jump: bool,
    /// Attack pressed this tick.
    pub attack: bool,
    /// Halt toggle pressed this tick.
    pub halt_toggle: bool,
    /// Interact pressed this tick.
    pub interact: bool,
    /// Ability pressed this tick.
    pub ability: bool,
}

/// Remembers the previous snapshot to derive [`InputEdges`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous: InputSnapshot,
}

impl InputTracker {
    /// Tracker that assumes every button starts released.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes this tick's snapshot and returns its press edges.
    pub fn update(&mut self, current: &InputSnapshot) -> InputEdges {
        let prev = self.previous;
        self.previous = *current;
        InputEdges {
            jump: current.jump && !prev.jump,
            attack: current.attack && !prev.attack,
            halt_toggle: current.halt_toggle && !prev.halt_toggle,
            interact: current.interact && !prev.interact,
            ability: current.ability && !prev.ability,
        }
    }
}
