//! Actor types.
//!
//! Every simulated thing (player, escorted ally, enemy, boss, projectile) is
//! an [`Actor`]: shared spatial state ([`Transform`], [`Body`]) plus
//! role-specific components in [`ActorInner`]. Behaviour is not inherited:
//! each phase matches on the role and runs the capabilities that role
//! composes (locomotion, combat scheduling, targeting, health).
//!
//! # Example
//!
//! ```
//! use ghostrun_core::actor::{Actor, ActorId, ActorInner, ActorKind, Transform};
//! use ghostrun_core::actor::PlayerComponents;
//! use ghostrun_core::config::PlayerTuning;
//! use ghostrun_core::layers::Layers;
//! use glam::Vec2;
//!
//! let tuning = PlayerTuning::default();
//! let player = Actor::new(
//!     ActorId::new(1),
//!     Transform::new(Vec2::new(0.0, 1.0), tuning.half_extents),
//!     ActorInner::Player(PlayerComponents::new(&tuning, Vec2::new(0.0, 1.0))),
//! );
//!
//! assert_eq!(player.kind(), ActorKind::Player);
//! assert_eq!(player.layers(), Layers::PLAYER);
//! assert_eq!(player.health().map(|h| h.current()), Some(5));
//! ```

pub mod components;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::animation::AnimationTag;
use crate::combat::{Health, ProjectileComponents, ProjectileKind};
use crate::layers::Layers;

pub use components::{
    AllyComponents, Body, BossComponents, EnemyComponents, Facing, PlayerComponents, Transform,
};

// =============================================================================
// Identity
// =============================================================================

/// Unique identifier for an actor within a scene.
///
/// Ids are handed out monotonically and never reused, so a stale id simply
/// stops resolving once its actor is removed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ActorId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

/// Enemy archetypes. Behaviour comes from [`ArchetypeStats`](crate::config::ArchetypeStats).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Hopping melee slime.
    BlueSlime,
    /// Ranged slime firing aimed shots.
    RedSlime,
    /// Slime firing spikes left, right and up; hurts on touch.
    CactusSlime,
    /// Slime that blows itself up.
    BombSlime,
    /// Melee enemy with a spinning area attack.
    Scientist,
}

impl Archetype {
    /// Every archetype, in declaration order.
    pub const ALL: [Archetype; 5] = [
        Archetype::BlueSlime,
        Archetype::RedSlime,
        Archetype::CactusSlime,
        Archetype::BombSlime,
        Archetype::Scientist,
    ];

    /// Layers an enemy of this archetype occupies.
    #[must_use]
    pub const fn layers(self) -> Layers {
        match self {
            Self::Scientist => Layers::ENEMY,
            _ => Layers::ENEMY.union(Layers::SLIME),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BlueSlime => "BlueSlime",
            Self::RedSlime => "RedSlime",
            Self::CactusSlime => "CactusSlime",
            Self::BombSlime => "BombSlime",
            Self::Scientist => "Scientist",
        };
        f.write_str(name)
    }
}

/// Role classification of an actor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The input-driven player.
    Player,
    /// The escorted ally.
    Ally,
    /// An AI enemy.
    Enemy(Archetype),
    /// The boss.
    Boss,
    /// A projectile.
    Projectile(ProjectileKind),
}

impl ActorKind {
    /// Layers an actor of this kind occupies.
    #[must_use]
    pub const fn layers(self) -> Layers {
        match self {
            Self::Player => Layers::PLAYER,
            Self::Ally => Layers::ALLY,
            Self::Enemy(archetype) => archetype.layers(),
            Self::Boss => Layers::ENEMY,
            Self::Projectile(_) => Layers::PROJECTILE,
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Ally => write!(f, "Ally"),
            Self::Enemy(archetype) => write!(f, "{archetype}"),
            Self::Boss => write!(f, "Boss"),
            Self::Projectile(kind) => write!(f, "Projectile({kind:?})"),
        }
    }
}

// =============================================================================
// Actor
// =============================================================================

/// Role-specific component storage.
#[derive(Debug, Clone)]
pub enum ActorInner {
    /// Player components.
    Player(PlayerComponents),
    /// Escorted ally components.
    Ally(AllyComponents),
    /// Enemy components.
    Enemy(EnemyComponents),
    /// Boss components.
    Boss(BossComponents),
    /// Projectile components.
    Projectile(ProjectileComponents),
}

impl ActorInner {
    /// Kind implied by the stored components.
    #[must_use]
    pub fn kind(&self) -> ActorKind {
        match self {
            Self::Player(_) => ActorKind::Player,
            Self::Ally(_) => ActorKind::Ally,
            Self::Enemy(enemy) => ActorKind::Enemy(enemy.archetype),
            Self::Boss(_) => ActorKind::Boss,
            Self::Projectile(projectile) => ActorKind::Projectile(projectile.kind),
        }
    }
}

/// A simulated actor.
#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,
    kind: ActorKind,
    layers: Layers,
    /// Position, facing and extents.
    pub transform: Transform,
    /// Velocity and contact state.
    pub body: Body,
    /// Last animation tag sent to presentation.
    pub animation: Option<AnimationTag>,
    inner: ActorInner,
}

impl Actor {
    /// Creates an actor. Kind and layers follow from `inner`.
    #[must_use]
    pub fn new(id: ActorId, transform: Transform, inner: ActorInner) -> Self {
        let kind = inner.kind();
        Self {
            id,
            kind,
            layers: kind.layers(),
            transform,
            body: Body::default(),
            animation: None,
            inner,
        }
    }

    /// Actor id.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Actor kind.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Layers this actor occupies.
    #[must_use]
    pub const fn layers(&self) -> Layers {
        self.layers
    }

    /// Role components.
    #[must_use]
    pub const fn inner(&self) -> &ActorInner {
        &self.inner
    }

    /// Mutable role components.
    pub fn inner_mut(&mut self) -> &mut ActorInner {
        &mut self.inner
    }

    /// Splits the actor into independently borrowable parts.
    pub fn parts_mut(&mut self) -> (&mut Transform, &mut Body, &mut ActorInner) {
        (&mut self.transform, &mut self.body, &mut self.inner)
    }

    /// Player components, if this is the player.
    #[must_use]
    pub fn as_player(&self) -> Option<&PlayerComponents> {
        match &self.inner {
            ActorInner::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Mutable player components.
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerComponents> {
        match &mut self.inner {
            ActorInner::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Ally components, if this is the ally.
    #[must_use]
    pub fn as_ally(&self) -> Option<&AllyComponents> {
        match &self.inner {
            ActorInner::Ally(ally) => Some(ally),
            _ => None,
        }
    }

    /// Mutable ally components.
    pub fn as_ally_mut(&mut self) -> Option<&mut AllyComponents> {
        match &mut self.inner {
            ActorInner::Ally(ally) => Some(ally),
            _ => None,
        }
    }

    /// Enemy components, if this is an enemy.
    #[must_use]
    pub fn as_enemy(&self) -> Option<&EnemyComponents> {
        match &self.inner {
            ActorInner::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Mutable enemy components.
    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyComponents> {
        match &mut self.inner {
            ActorInner::Enemy(enemy) => Some(enemy),
            _ => None,
        }
    }

    /// Boss components, if this is the boss.
    #[must_use]
    pub fn as_boss(&self) -> Option<&BossComponents> {
        match &self.inner {
            ActorInner::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Mutable boss components.
    pub fn as_boss_mut(&mut self) -> Option<&mut BossComponents> {
        match &mut self.inner {
            ActorInner::Boss(boss) => Some(boss),
            _ => None,
        }
    }

    /// Projectile components, if this is a projectile.
    #[must_use]
    pub fn as_projectile(&self) -> Option<&ProjectileComponents> {
        match &self.inner {
            ActorInner::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// Mutable projectile components.
    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileComponents> {
        match &mut self.inner {
            ActorInner::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// Health, for every role except projectiles.
    #[must_use]
    pub fn health(&self) -> Option<&Health> {
        match &self.inner {
            ActorInner::Player(player) => Some(&player.health),
            ActorInner::Ally(ally) => Some(&ally.health),
            ActorInner::Enemy(enemy) => Some(&enemy.health),
            ActorInner::Boss(boss) => Some(&boss.health),
            ActorInner::Projectile(_) => None,
        }
    }

    /// Mutable health.
    pub fn health_mut(&mut self) -> Option<&mut Health> {
        match &mut self.inner {
            ActorInner::Player(player) => Some(&mut player.health),
            ActorInner::Ally(ally) => Some(&mut ally.health),
            ActorInner::Enemy(enemy) => Some(&mut enemy.health),
            ActorInner::Boss(boss) => Some(&mut boss.health),
            ActorInner::Projectile(_) => None,
        }
    }

    /// Alive actors take part in queries. Projectiles are alive until spent.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        match &self.inner {
            ActorInner::Projectile(projectile) => !projectile.spent,
            _ => self.health().is_some_and(Health::is_alive),
        }
    }
}
