//! Resolvers apply sorted outputs to the scene during the Damage phase.
//!
//! Each resolver declares the [`OutputKind`]s it handles; the simulation
//! runs them in a fixed order (damage, spawn, event) and hands each one the
//! envelopes of its kinds, already sorted by `(source, sequence)`.

mod damage;
mod event;
mod spawn;

pub use damage::DamageResolver;
pub use event::EventResolver;
pub use spawn::SpawnResolver;

use crate::output::{OutputEnvelope, OutputKind};
use crate::scene::Scene;

/// Applies one category of outputs.
pub trait Resolver: Send + Sync {
    /// Output kinds this resolver consumes.
    fn handles(&self) -> &[OutputKind];

    /// Applies `outputs` (already filtered and sorted) to `scene`.
    fn resolve(&self, outputs: &[&OutputEnvelope], scene: &mut Scene);
}

/// The standard resolver chain in execution order.
#[must_use]
pub fn default_chain() -> Vec<Box<dyn Resolver>> {
    vec![
        Box::new(DamageResolver::new()),
        Box::new(SpawnResolver::new()),
        Box::new(EventResolver::new()),
    ]
}
