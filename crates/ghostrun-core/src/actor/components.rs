//! Component structs stored on actors.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::Archetype;
use crate::ai::{AiState, BossState, EscortState};
use crate::combat::{CombatScheduler, Fate, Health};
use crate::config::{AllyTuning, ArchetypeStats, BossTuning, PlayerTuning};
use crate::terrain::Aabb;
use crate::timer::Countdown;

// =============================================================================
// Spatial
// =============================================================================

/// Horizontal facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Facing -x.
    Left,
    /// Facing +x.
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Unit vector in the facing direction.
    #[must_use]
    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// The opposite facing.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Facing for a horizontal axis value; zero keeps the current facing.
    #[must_use]
    pub fn from_axis(axis: f32, current: Self) -> Self {
        if axis > 0.0 {
            Self::Right
        } else if axis < 0.0 {
            Self::Left
        } else {
            current
        }
    }

    /// Facing from `from_x` toward `to_x`; equal x keeps the current facing.
    #[must_use]
    pub fn toward(from_x: f32, to_x: f32, current: Self) -> Self {
        Self::from_axis(to_x - from_x, current)
    }
}

/// Position (box centre), facing and collision extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Centre of the collision box.
    pub position: Vec2,
    /// Horizontal facing.
    pub facing: Facing,
    /// Collision half extents.
    pub half_extents: Vec2,
}

impl Transform {
    /// Transform at `position`, facing right.
    #[must_use]
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        Self {
            position,
            facing: Facing::Right,
            half_extents,
        }
    }

    /// Same transform with another facing.
    #[must_use]
    pub fn facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// World-space collision box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.half_extents)
    }

    /// Height of the bottom edge.
    #[must_use]
    pub fn feet(&self) -> f32 {
        self.position.y - self.half_extents.y
    }
}

/// Velocity and terrain contact state written by locomotion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Current velocity.
    pub velocity: Vec2,
    /// Standing on ground this tick.
    pub grounded: bool,
    /// Wall probe blocked this tick.
    pub touching_wall: bool,
    /// Sliding down a wall this tick.
    pub wall_sliding: bool,
    /// Set after a step climb until the foot probe clears again.
    pub step_latched: bool,
    /// While running, horizontal input does not override velocity.
    pub stagger: Countdown,
}

impl Body {
    /// Stops all motion and clears contact state.
    pub fn freeze(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Roles
// =============================================================================

/// Player-only state.
#[derive(Debug, Clone)]
pub struct PlayerComponents {
    /// Health.
    pub health: Health,
    /// Melee combo scheduler.
    pub combat: CombatScheduler,
    /// Ghost bomb cooldown.
    pub ghost_cooldown: Countdown,
    /// Footstep cue pacing.
    pub footstep: Countdown,
    /// Fallback respawn position.
    pub spawn_point: Vec2,
}

impl PlayerComponents {
    /// Fresh player state.
    #[must_use]
    pub fn new(tuning: &PlayerTuning, spawn_point: Vec2) -> Self {
        Self {
            health: Health::new(tuning.max_health, tuning.respawn_delay, Fate::Respawn),
            combat: CombatScheduler::new(),
            ghost_cooldown: Countdown::idle(),
            footstep: Countdown::idle(),
            spawn_point,
        }
    }
}

/// Escorted ally state.
#[derive(Debug, Clone)]
pub struct AllyComponents {
    /// Health.
    pub health: Health,
    /// Escort mode machine.
    pub escort: EscortState,
    /// Fallback respawn position.
    pub spawn_point: Vec2,
}

impl AllyComponents {
    /// Fresh ally state, escort not started.
    #[must_use]
    pub fn new(tuning: &AllyTuning, spawn_point: Vec2) -> Self {
        Self {
            health: Health::new(tuning.max_health, tuning.respawn_delay, Fate::Respawn),
            escort: EscortState::new(),
            spawn_point,
        }
    }
}

/// Enemy state.
#[derive(Debug, Clone)]
pub struct EnemyComponents {
    /// Archetype tag.
    pub archetype: Archetype,
    /// Archetype data driving every behaviour.
    pub stats: ArchetypeStats,
    /// Health.
    pub health: Health,
    /// AI state machine.
    pub ai: AiState,
    /// Gates attack starts.
    pub attack_cooldown: Countdown,
    /// Gates touch damage.
    pub contact_cooldown: Countdown,
}

impl EnemyComponents {
    /// Fresh enemy state.
    #[must_use]
    pub fn new(archetype: Archetype, stats: ArchetypeStats) -> Self {
        Self {
            archetype,
            health: Health::new(stats.max_health, stats.death_delay, Fate::Remove),
            stats,
            ai: AiState::Idle,
            attack_cooldown: Countdown::idle(),
            contact_cooldown: Countdown::idle(),
        }
    }

    /// True while a fused explosion is pending.
    #[must_use]
    pub fn is_exploding(&self) -> bool {
        matches!(self.stats.attack, crate::config::AttackKind::Explode { .. })
            && matches!(self.ai, AiState::Attacking(_))
    }
}

/// Boss state.
#[derive(Debug, Clone)]
pub struct BossComponents {
    /// Health.
    pub health: Health,
    /// Encounter state.
    pub state: BossState,
}

impl BossComponents {
    /// Fresh boss state at `home` with teleport `waypoints`.
    #[must_use]
    pub fn new(tuning: &BossTuning, home: Vec2, waypoints: Vec<Vec2>) -> Self {
        Self {
            health: Health::new(tuning.max_health, tuning.death_delay, Fate::Remove),
            state: BossState::new(tuning.clone(), home, waypoints),
        }
    }
}
