//! Projectiles: simple actors with constant velocity (optionally under
//! gravity), a fixed lifetime, and a single hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId, ActorInner, Body, Facing, Transform};
use crate::layers::Layers;
use crate::terrain::TerrainProbe;
use crate::timer::Countdown;
use crate::world_view::WorldView;

/// Default projectile collision half extents.
pub const PROJECTILE_HALF_EXTENTS: Vec2 = Vec2::new(0.15, 0.15);

/// Projectile families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Ranged slime shot.
    SlimeShot,
    /// Cactus spike.
    Spike,
    /// Boss bullet.
    BossBullet,
    /// Boss bomb, arcs under gravity.
    BossBomb,
    /// Player ghost bomb.
    GhostBolt,
    /// Ally gunshot.
    EscortShot,
}

/// Everything needed to spawn a projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    /// Family.
    pub kind: ProjectileKind,
    /// Shooter; never hit by its own projectile.
    pub owner: ActorId,
    /// Spawn position.
    pub origin: Vec2,
    /// Initial velocity.
    pub velocity: Vec2,
    /// Damage on hit.
    pub damage: u32,
    /// Layers it can hit.
    pub targets: Layers,
    /// Seconds before it expires.
    pub lifetime: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Destroyed on terrain contact.
    pub stops_on_terrain: bool,
    /// Ends with an explosion cue.
    pub bursts: bool,
}

impl ProjectileSpec {
    /// A straight, gravity-free projectile.
    #[must_use]
    pub fn straight(
        kind: ProjectileKind,
        owner: ActorId,
        origin: Vec2,
        velocity: Vec2,
        damage: u32,
        targets: Layers,
        lifetime: f32,
    ) -> Self {
        Self {
            kind,
            owner,
            origin,
            velocity,
            damage,
            targets,
            lifetime,
            gravity: 0.0,
            stops_on_terrain: false,
            bursts: false,
        }
    }

    /// Builds the actor for registry id `id`.
    #[must_use]
    pub fn into_actor(self, id: ActorId) -> Actor {
        let facing = Facing::from_axis(self.velocity.x, Facing::Right);
        let mut actor = Actor::new(
            id,
            Transform::new(self.origin, PROJECTILE_HALF_EXTENTS).facing(facing),
            ActorInner::Projectile(ProjectileComponents {
                kind: self.kind,
                owner: self.owner,
                damage: self.damage,
                targets: self.targets,
                lifetime: Countdown::started(self.lifetime),
                gravity: self.gravity,
                stops_on_terrain: self.stops_on_terrain,
                bursts: self.bursts,
                spent: false,
            }),
        );
        actor.body.velocity = self.velocity;
        actor
    }
}

/// Projectile state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileComponents {
    /// Family.
    pub kind: ProjectileKind,
    /// Shooter.
    pub owner: ActorId,
    /// Damage on hit.
    pub damage: u32,
    /// Layers it can hit.
    pub targets: Layers,
    /// Time left.
    pub lifetime: Countdown,
    /// Downward acceleration.
    pub gravity: f32,
    /// Destroyed on terrain contact.
    pub stops_on_terrain: bool,
    /// Ends with an explosion cue.
    pub bursts: bool,
    /// Already hit or expired; awaiting removal.
    pub spent: bool,
}

/// Result of advancing a projectile one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    /// Still flying.
    Flying,
    /// Lifetime ran out.
    Expired,
    /// Hit terrain and stops there.
    HitTerrain,
    /// Overlapped a valid target.
    HitActor(ActorId),
}

impl ProjectileComponents {
    /// Moves the projectile and checks for hits.
    ///
    /// Actor hits take precedence over terrain hits in the same tick. A
    /// spent projectile never hits again.
    pub fn advance(
        &mut self,
        transform: &mut Transform,
        body: &mut Body,
        view: &WorldView,
        terrain: &dyn TerrainProbe,
        dt: f32,
    ) -> ProjectileStep {
        if self.spent {
            return ProjectileStep::Expired;
        }
        self.lifetime.tick(dt);
        if !self.lifetime.is_running() {
            self.spent = true;
            return ProjectileStep::Expired;
        }

        body.velocity.y -= self.gravity * dt;
        let delta = body.velocity * dt;
        let distance = delta.length();
        let mut hit_terrain = false;
        let terrain_hit = if self.stops_on_terrain && distance > 0.0 {
            terrain.probe(transform.position, delta, distance, Layers::GROUND)
        } else {
            None
        };
        match terrain_hit {
            Some(hit) => {
                transform.position = hit.point;
                hit_terrain = true;
            }
            None => transform.position += delta,
        }

        let owner = self.owner;
        let struck = view
            .overlap_box(&transform.bounds(), self.targets)
            .into_iter()
            .find(|id| *id != owner);

        if let Some(target) = struck {
            self.spent = true;
            ProjectileStep::HitActor(target)
        } else if hit_terrain {
            self.spent = true;
            ProjectileStep::HitTerrain
        } else {
            ProjectileStep::Flying
        }
    }
}
