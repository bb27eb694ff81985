//! Event resolver: copies feedback outputs into the tick's frame.
//!
//! It never mutates actors. The frame it fills is what the sinks receive at
//! the end of the tick.

use crate::output::{OutputEnvelope, OutputKind};
use crate::scene::Scene;

use super::Resolver;

/// Records cues, presentation hints and signals.
#[derive(Debug, Clone, Default)]
pub struct EventResolver;

impl EventResolver {
    /// Creates the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for EventResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Feedback]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], scene: &mut Scene) {
        for envelope in outputs {
            scene.frame.record(envelope.output());
        }
    }
}
