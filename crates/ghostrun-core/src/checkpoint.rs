//! Checkpoint store and markers.
//!
//! The store holds the single respawn position shared by the player and the
//! ally. It only moves on explicit activation: a host call, or the player
//! reaching a [`CheckpointMarker`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The last activated checkpoint.
///
/// # Example
///
/// ```
/// use ghostrun_core::checkpoint::CheckpointStore;
/// use glam::Vec2;
///
/// let mut store = CheckpointStore::new();
/// assert_eq!(store.respawn_point(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
///
/// store.set_checkpoint(Vec2::new(10.0, 0.0));
/// assert_eq!(store.last_checkpoint(), Some(Vec2::new(10.0, 0.0)));
/// assert_eq!(store.respawn_point(Vec2::new(1.0, 1.0)), Vec2::new(10.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointStore {
    current: Option<Vec2>,
}

impl CheckpointStore {
    /// Empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// The last activated checkpoint, if any.
    #[must_use]
    pub const fn last_checkpoint(&self) -> Option<Vec2> {
        self.current
    }

    /// Moves the checkpoint.
    pub fn set_checkpoint(&mut self, position: Vec2) {
        self.current = Some(position);
    }

    /// Seeds the store if nothing has been activated yet.
    pub fn seed(&mut self, position: Vec2) {
        self.current.get_or_insert(position);
    }

    /// Where a respawning actor goes: the checkpoint, else its own fallback.
    #[must_use]
    pub fn respawn_point(&self, fallback: Vec2) -> Vec2 {
        self.current.unwrap_or(fallback)
    }
}

/// How a marker is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivationMode {
    /// Walking into it.
    #[default]
    Touch,
    /// Pressing interact while inside it.
    Interact,
}

/// A place in the level that becomes the checkpoint once reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMarker {
    /// Respawn position set on activation.
    pub position: Vec2,
    /// Trigger radius around `position`.
    pub radius: f32,
    /// Trigger mode.
    pub mode: ActivationMode,
    activated: bool,
}

impl CheckpointMarker {
    /// Inactive marker.
    #[must_use]
    pub const fn new(position: Vec2, radius: f32, mode: ActivationMode) -> Self {
        Self {
            position,
            radius,
            mode,
            activated: false,
        }
    }

    /// True once activated.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Activates the marker if the player at `player` qualifies. Returns
    /// true only on the activating call.
    pub fn try_activate(&mut self, player: Vec2, interact_pressed: bool) -> bool {
        if self.activated || player.distance(self.position) > self.radius {
            return false;
        }
        if self.mode == ActivationMode::Interact && !interact_pressed {
            return false;
        }
        self.activated = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_does_not_override_activation() {
        let mut store = CheckpointStore::new();
        store.set_checkpoint(Vec2::new(5.0, 0.0));
        store.seed(Vec2::ZERO);
        assert_eq!(store.last_checkpoint(), Some(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn touch_marker_activates_once() {
        let mut marker = CheckpointMarker::new(Vec2::new(3.0, 0.0), 1.0, ActivationMode::Touch);
        assert!(!marker.try_activate(Vec2::ZERO, false));
        assert!(marker.try_activate(Vec2::new(2.5, 0.0), false));
        assert!(!marker.try_activate(Vec2::new(2.5, 0.0), false));
        assert!(marker.is_activated());
    }

    #[test]
    fn interact_marker_needs_the_button() {
        let mut marker = CheckpointMarker::new(Vec2::ZERO, 1.0, ActivationMode::Interact);
        assert!(!marker.try_activate(Vec2::ZERO, false));
        assert!(marker.try_activate(Vec2::ZERO, true));
    }
}
