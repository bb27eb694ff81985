//! The shared context resolvers write into.
//!
//! The actor registry and the checkpoint store are the only state shared
//! between actors. Resolvers receive them together, along with the tick's
//! [`Frame`], as an explicit `&mut Scene` instead of reaching for globals.

use crate::checkpoint::{CheckpointMarker, CheckpointStore};
use crate::config::SimConfig;
use crate::output::{Frame, Output};
use crate::registry::ActorRegistry;

/// Mutable world state for one simulation.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Tuning.
    pub config: SimConfig,
    /// Every actor.
    pub actors: ActorRegistry,
    /// Shared respawn position.
    pub checkpoints: CheckpointStore,
    /// Checkpoint markers placed in the level.
    pub markers: Vec<CheckpointMarker>,
    /// Feedback produced during the current tick.
    pub frame: Frame,
}

impl Scene {
    /// Empty scene.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            actors: ActorRegistry::new(),
            checkpoints: CheckpointStore::new(),
            markers: Vec::new(),
            frame: Frame::default(),
        }
    }

    /// Records a feedback output in the current frame.
    pub fn record(&mut self, output: impl Into<Output>) {
        self.frame.record(&output.into());
    }
}
