//! Spawn resolver: projectile creation and removal.

use tracing::trace;

use crate::output::{Output, OutputEnvelope, OutputKind};
use crate::scene::Scene;

use super::Resolver;

/// Spawns requested projectiles and removes despawned actors.
#[derive(Debug, Clone, Default)]
pub struct SpawnResolver;

impl SpawnResolver {
    /// Creates the resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Resolver for SpawnResolver {
    fn handles(&self) -> &[OutputKind] {
        &[OutputKind::Lifecycle]
    }

    fn resolve(&self, outputs: &[&OutputEnvelope], scene: &mut Scene) {
        for envelope in outputs {
            match envelope.output() {
                Output::Spawn(spec) => {
                    let spec = *spec;
                    let id = scene.actors.spawn_with(|id| spec.into_actor(id));
                    trace!(projectile = %id, kind = ?spec.kind, owner = %spec.owner, "projectile spawned");
                }
                Output::Despawn(id) => {
                    scene.actors.despawn(*id);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, ActorKind};
    use crate::combat::{ProjectileKind, ProjectileSpec};
    use crate::config::SimConfig;
    use crate::layers::Layers;
    use crate::output::OutputSource;
    use glam::Vec2;

    #[test]
    fn spawns_then_despawns() {
        let mut scene = Scene::new(SimConfig::default());
        let spec = ProjectileSpec::straight(
            ProjectileKind::Spike,
            ActorId::new(1),
            Vec2::ZERO,
            Vec2::Y,
            1,
            Layers::FRIENDLY,
            5.0,
        );
        let spawn = OutputEnvelope::new(Output::Spawn(spec), OutputSource::Scene, 0, 0);
        SpawnResolver::new().resolve(&[&spawn], &mut scene);

        let ids = scene.actors.ids_of_kind(ActorKind::Projectile(ProjectileKind::Spike));
        assert_eq!(ids.len(), 1);

        let despawn = OutputEnvelope::new(Output::Despawn(ids[0]), OutputSource::Scene, 0, 1);
        SpawnResolver::new().resolve(&[&despawn], &mut scene);
        assert!(scene.actors.is_empty());
    }
}
