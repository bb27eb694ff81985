//! Actor registry.
//!
//! The registry owns every live actor of a scene. It provides:
//! - Actor storage with deterministic iteration order (`BTreeMap`)
//! - Monotonic id allocation (ids are never reused)
//! - Immediate removal: a despawned actor vanishes from every later query
//! - Layer queries ("all living actors on layer L")
//!
//! # Example
//!
//! ```
//! use ghostrun_core::registry::ActorRegistry;
//! use ghostrun_core::actor::{ActorInner, EnemyComponents, Archetype, Transform};
//! use ghostrun_core::config::ArchetypeStats;
//! use ghostrun_core::layers::Layers;
//! use glam::Vec2;
//!
//! let mut registry = ActorRegistry::new();
//! let stats = ArchetypeStats::preset(Archetype::BlueSlime);
//! let id = registry.spawn(
//!     Transform::new(Vec2::ZERO, stats.half_extents),
//!     ActorInner::Enemy(EnemyComponents::new(Archetype::BlueSlime, stats)),
//! );
//!
//! assert_eq!(registry.of_layer(Layers::SLIME).count(), 1);
//! registry.despawn(id);
//! assert_eq!(registry.of_layer(Layers::SLIME).count(), 0);
//! ```

use std::collections::BTreeMap;

use crate::actor::{Actor, ActorId, ActorInner, ActorKind, Transform};
use crate::layers::Layers;

/// Container for all actors of a scene.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    actors: BTreeMap<ActorId, Actor>,
    next_id: u64,
}

impl ActorRegistry {
    /// Empty registry. The first id handed out is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actors: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Adds an actor and returns its id.
    pub fn spawn(&mut self, transform: Transform, inner: ActorInner) -> ActorId {
        let id = self.allocate_id();
        self.actors.insert(id, Actor::new(id, transform, inner));
        id
    }

    /// Adds an actor built by `build` from its freshly allocated id.
    pub fn spawn_with(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = self.allocate_id();
        self.actors.insert(id, build(id));
        id
    }

    fn allocate_id(&mut self) -> ActorId {
        let id = ActorId::new(self.next_id.max(1));
        self.next_id = id.as_u64() + 1;
        id
    }

    /// Removes an actor. Later lookups of `id` return `None`.
    pub fn despawn(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    /// Looks up an actor.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    /// Looks up an actor mutably.
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// True if `id` is registered.
    #[must_use]
    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(&id)
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// True if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// All ids in ascending order, detached from the registry borrow.
    #[must_use]
    pub fn ids(&self) -> Vec<ActorId> {
        self.actors.keys().copied().collect()
    }

    /// Actors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Mutable actors in ascending id order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.values_mut()
    }

    /// Living actors whose layers intersect `mask`.
    pub fn of_layer(&self, mask: Layers) -> impl Iterator<Item = &Actor> {
        self.actors
            .values()
            .filter(move |actor| actor.layers().intersects(mask) && actor.is_alive())
    }

    /// Ids of every actor of `kind`, dead or alive.
    #[must_use]
    pub fn ids_of_kind(&self, kind: ActorKind) -> Vec<ActorId> {
        self.actors
            .values()
            .filter(|actor| actor.kind() == kind)
            .map(Actor::id)
            .collect()
    }

    /// The player, if one is registered.
    #[must_use]
    pub fn player_id(&self) -> Option<ActorId> {
        self.first_of_kind(ActorKind::Player)
    }

    /// The escorted ally, if one is registered.
    #[must_use]
    pub fn ally_id(&self) -> Option<ActorId> {
        self.first_of_kind(ActorKind::Ally)
    }

    fn first_of_kind(&self, kind: ActorKind) -> Option<ActorId> {
        self.actors
            .values()
            .find(|actor| actor.kind() == kind)
            .map(Actor::id)
    }
}
