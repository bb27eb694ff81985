//! Read-only world snapshot for a single phase.
//!
//! Each phase captures a [`WorldView`] before mutating anything. Actors then
//! read *other* actors only through the view, so the order in which actors
//! are updated inside a phase cannot change what they observe.
//!
//! Queries only return living actors. Removal is immediate in the registry,
//! and dead actors are filtered here, so a destroyed actor is never a target.
//!
//! # Example
//!
//! ```
//! use ghostrun_core::registry::ActorRegistry;
//! use ghostrun_core::world_view::WorldView;
//! use ghostrun_core::actor::{ActorInner, PlayerComponents, Transform};
//! use ghostrun_core::config::PlayerTuning;
//! use ghostrun_core::layers::Layers;
//! use glam::Vec2;
//!
//! let mut registry = ActorRegistry::new();
//! let tuning = PlayerTuning::default();
//! let player = registry.spawn(
//!     Transform::new(Vec2::new(3.0, 0.0), tuning.half_extents),
//!     ActorInner::Player(PlayerComponents::new(&tuning, Vec2::ZERO)),
//! );
//!
//! let view = WorldView::capture(&registry);
//! assert_eq!(view.query_radius(Vec2::ZERO, 5.0, Layers::PLAYER), vec![player]);
//! assert!(view.query_radius(Vec2::ZERO, 2.0, Layers::PLAYER).is_empty());
//! ```

use glam::Vec2;

use crate::actor::{ActorId, ActorKind, Facing};
use crate::layers::Layers;
use crate::registry::ActorRegistry;
use crate::terrain::Aabb;

/// What other actors may know about an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorSnapshot {
    /// Actor id.
    pub id: ActorId,
    /// Actor kind.
    pub kind: ActorKind,
    /// Occupied layers.
    pub layers: Layers,
    /// Centre position.
    pub position: Vec2,
    /// Collision box.
    pub bounds: Aabb,
    /// Facing.
    pub facing: Facing,
    /// Alive at capture time.
    pub alive: bool,
}

/// Immutable snapshot of every registered actor.
#[derive(Debug, Clone, Default)]
pub struct WorldView {
    actors: Vec<ActorSnapshot>,
}

impl WorldView {
    /// Captures the registry in ascending id order.
    #[must_use]
    pub fn capture(registry: &ActorRegistry) -> Self {
        let actors = registry
            .iter()
            .map(|actor| ActorSnapshot {
                id: actor.id(),
                kind: actor.kind(),
                layers: actor.layers(),
                position: actor.transform.position,
                bounds: actor.transform.bounds(),
                facing: actor.transform.facing,
                alive: actor.is_alive(),
            })
            .collect();
        Self { actors }
    }

    /// Number of captured actors, dead ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Snapshot of `id`, dead or alive.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&ActorSnapshot> {
        self.actors
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.actors[index])
    }

    /// Snapshot of `id` only if it is alive.
    #[must_use]
    pub fn living(&self, id: ActorId) -> Option<&ActorSnapshot> {
        self.get(id).filter(|snapshot| snapshot.alive)
    }

    /// The living player.
    #[must_use]
    pub fn player(&self) -> Option<&ActorSnapshot> {
        self.first_living(ActorKind::Player)
    }

    /// The living escorted ally.
    #[must_use]
    pub fn ally(&self) -> Option<&ActorSnapshot> {
        self.first_living(ActorKind::Ally)
    }

    fn first_living(&self, kind: ActorKind) -> Option<&ActorSnapshot> {
        self.actors
            .iter()
            .find(|snapshot| snapshot.kind == kind && snapshot.alive)
    }

    /// Living actors on any layer in `mask`, in id order.
    pub fn of_layer(&self, mask: Layers) -> impl Iterator<Item = &ActorSnapshot> {
        self.actors
            .iter()
            .filter(move |snapshot| snapshot.alive && snapshot.layers.intersects(mask))
    }

    /// Living actors on `mask` whose centre is within `radius` of `center`.
    #[must_use]
    pub fn query_radius(&self, center: Vec2, radius: f32, mask: Layers) -> Vec<ActorId> {
        let radius_sq = radius * radius;
        self.of_layer(mask)
            .filter(|snapshot| center.distance_squared(snapshot.position) <= radius_sq)
            .map(|snapshot| snapshot.id)
            .collect()
    }

    /// The living actor on `mask` closest to `center` and strictly inside
    /// `radius`. Ties go to the lower id.
    #[must_use]
    pub fn closest(&self, center: Vec2, radius: f32, mask: Layers) -> Option<&ActorSnapshot> {
        let radius_sq = radius * radius;
        self.of_layer(mask)
            .map(|snapshot| (snapshot, center.distance_squared(snapshot.position)))
            .filter(|(_, distance_sq)| *distance_sq < radius_sq)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(snapshot, _)| snapshot)
    }

    /// Living actors on `mask` whose box overlaps `area`.
    #[must_use]
    pub fn overlap_box(&self, area: &Aabb, mask: Layers) -> Vec<ActorId> {
        self.of_layer(mask)
            .filter(|snapshot| snapshot.bounds.overlaps(area))
            .map(|snapshot| snapshot.id)
            .collect()
    }

    /// Living actors on `mask` whose box touches the circle.
    #[must_use]
    pub fn overlap_circle(&self, center: Vec2, radius: f32, mask: Layers) -> Vec<ActorId> {
        self.of_layer(mask)
            .filter(|snapshot| snapshot.bounds.intersects_circle(center, radius))
            .map(|snapshot| snapshot.id)
            .collect()
    }

    /// First living actor on `mask` along a ray, with its distance.
    #[must_use]
    pub fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: Layers,
    ) -> Option<(ActorId, f32)> {
        let direction = direction.normalize_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }
        self.of_layer(mask)
            .filter_map(|snapshot| {
                snapshot
                    .bounds
                    .ray_distance(origin, direction, max_distance)
                    .map(|distance| (snapshot.id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
