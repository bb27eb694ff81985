//! AI behaviour for enemies, the boss and the escorted ally.
//!
//! Every AI actor runs the same two hooks per tick:
//!
//! - **think** (Target Selection phase): picks a target, updates the state
//!   machine and returns a [`MoveIntent`](crate::locomotion::MoveIntent)
//! - **act** (Combat phase): advances windups and emits damage, projectile
//!   and feedback [`Output`](crate::output::Output)s
//!
//! Archetypes differ only in [`ArchetypeStats`](crate::config::ArchetypeStats)
//! data, never in code paths.

pub mod boss;
pub mod enemy;
pub mod escort;
pub mod targeting;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::timer::Countdown;

pub use boss::{BossState, TeleportStage};
pub use escort::{EscortMode, EscortState};
pub use targeting::{select_target, Candidate, TargetPriority};

/// Enemy state machine.
///
/// ```text
/// Idle ──target──▶ Chasing ──in range──▶ Attacking ──recovery──▶ Idle | Chasing
///   └──────────────────────────────────────┴──────────────────────▶ Dead
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AiState {
    /// No target; standing still.
    #[default]
    Idle,
    /// Moving toward a target.
    Chasing {
        /// Pursued actor.
        target: ActorId,
    },
    /// Running an attack cycle.
    Attacking(AttackPhase),
    /// Terminal.
    Dead,
}

impl AiState {
    /// Current target, if chasing or attacking.
    #[must_use]
    pub const fn target(&self) -> Option<ActorId> {
        match self {
            Self::Chasing { target } => Some(*target),
            Self::Attacking(phase) => Some(phase.target),
            Self::Idle | Self::Dead => None,
        }
    }
}

/// One attack cycle. Both timers start when the attack triggers: the
/// windup ends in delivery, the (longer) recovery ends the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackPhase {
    /// Target at trigger time.
    pub target: ActorId,
    /// Target position at trigger time, used if the target is gone.
    pub aim: Vec2,
    windup: Countdown,
    recovery: Countdown,
    delivered: bool,
}

impl AttackPhase {
    /// Starts a cycle against `target`.
    #[must_use]
    pub fn new(target: ActorId, aim: Vec2, windup: f32, recovery: f32) -> Self {
        Self {
            target,
            aim,
            windup: Countdown::started(windup),
            recovery: Countdown::started(recovery),
            delivered: false,
        }
    }

    /// True once the attack has been delivered.
    #[must_use]
    pub const fn delivered(&self) -> bool {
        self.delivered
    }

    /// Advances the windup. Returns true exactly once, when the attack
    /// should be delivered.
    pub fn tick_windup(&mut self, dt: f32) -> bool {
        self.windup.tick(dt);
        if self.delivered || self.windup.is_running() {
            return false;
        }
        self.delivered = true;
        true
    }

    /// Advances the recovery. Returns true when the cycle is over.
    pub fn tick_recovery(&mut self, dt: f32) -> bool {
        self.recovery.tick(dt);
        self.delivered && !self.recovery.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn delivers_once_then_recovers() {
        let mut phase = AttackPhase::new(ActorId::new(1), Vec2::ZERO, 0.25, 0.6);
        let mut deliveries = 0;
        let mut ticks = 0;
        loop {
            ticks += 1;
            if phase.tick_windup(DT) {
                deliveries += 1;
                assert_eq!(ticks, 15);
            }
            if phase.tick_recovery(DT) {
                break;
            }
        }
        assert_eq!(deliveries, 1);
        assert_eq!(ticks, 36);
    }

    #[test]
    fn zero_windup_delivers_immediately() {
        let mut phase = AttackPhase::new(ActorId::new(1), Vec2::ZERO, 0.0, 0.0);
        assert!(phase.tick_windup(DT));
        assert!(phase.tick_recovery(DT));
    }

    #[test]
    fn target_accessor() {
        let phase = AttackPhase::new(ActorId::new(3), Vec2::ZERO, 0.1, 0.2);
        assert_eq!(AiState::Attacking(phase).target(), Some(ActorId::new(3)));
        assert_eq!(AiState::Idle.target(), None);
    }
}
