//! Damage events.
//!
//! A [`DamageEvent`] is the only way one actor hurts another. Attacks emit
//! them during the Combat phase; the
//! [`DamageResolver`](crate::resolver::DamageResolver) applies them in the
//! Damage phase.

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

/// How the damage was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Melee strike or spin.
    Strike,
    /// Projectile hit.
    Projectile,
    /// Explosion.
    Explosion,
    /// Touching a hazardous enemy.
    Contact,
    /// Scene hazard queued by the host.
    Hazard,
}

/// Horizontal shove applied with the damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    /// `-1.0` or `1.0`.
    pub direction: f32,
    /// Horizontal speed imparted.
    pub force: f32,
}

impl Knockback {
    /// Knockback pushing a target at `target_x` away from `source_x`.
    #[must_use]
    pub fn away_from(source_x: f32, target_x: f32, force: f32) -> Self {
        let direction = if target_x < source_x { -1.0 } else { 1.0 };
        Self { direction, force }
    }
}

/// An immutable request to damage one actor.
///
/// # Example
///
/// ```
/// use ghostrun_core::actor::ActorId;
/// use ghostrun_core::combat::{DamageEvent, DamageKind, Knockback};
///
/// let event = DamageEvent::new(ActorId::new(3), 1, DamageKind::Strike)
///     .with_source(ActorId::new(1))
///     .with_knockback(Knockback::away_from(0.0, 2.0, 5.0));
///
/// assert_eq!(event.target(), ActorId::new(3));
/// assert_eq!(event.knockback().map(|k| k.direction), Some(1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageEvent {
    target: ActorId,
    amount: u32,
    kind: DamageKind,
    knockback: Option<Knockback>,
    source: Option<ActorId>,
}

impl DamageEvent {
    /// Damage without knockback or source.
    #[must_use]
    pub const fn new(target: ActorId, amount: u32, kind: DamageKind) -> Self {
        Self {
            target,
            amount,
            kind,
            knockback: None,
            source: None,
        }
    }

    /// Adds knockback.
    #[must_use]
    pub const fn with_knockback(mut self, knockback: Knockback) -> Self {
        self.knockback = Some(knockback);
        self
    }

    /// Records who dealt the damage.
    #[must_use]
    pub const fn with_source(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }

    /// Target actor.
    #[must_use]
    pub const fn target(&self) -> ActorId {
        self.target
    }

    /// Damage amount.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Delivery kind.
    #[must_use]
    pub const fn kind(&self) -> DamageKind {
        self.kind
    }

    /// Optional knockback.
    #[must_use]
    pub const fn knockback(&self) -> Option<Knockback> {
        self.knockback
    }

    /// Optional source actor.
    #[must_use]
    pub const fn source(&self) -> Option<ActorId> {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knockback_points_away_from_source() {
        assert_eq!(Knockback::away_from(5.0, 3.0, 1.0).direction, -1.0);
        assert_eq!(Knockback::away_from(5.0, 7.0, 1.0).direction, 1.0);
    }

    #[test]
    fn builder_keeps_fields() {
        let event = DamageEvent::new(ActorId::new(2), 3, DamageKind::Explosion)
            .with_source(ActorId::new(9));
        assert_eq!(event.amount(), 3);
        assert_eq!(event.kind(), DamageKind::Explosion);
        assert_eq!(event.source(), Some(ActorId::new(9)));
        assert!(event.knockback().is_none());
    }
}
