//! Health and the life-state machine.
//!
//! ```text
//! Alive --(health hits 0)--> Dead --(delay)--> Respawning --(respawn)--> Alive   [Fate::Respawn]
//! Alive --(health hits 0)--> Dead --(delay)--> Removed                           [Fate::Remove]
//! ```
//!
//! Damage outside `Alive` is ignored, and dying twice is a no-op, so a
//! second killing blow in the same tick never replays death effects.

use serde::{Deserialize, Serialize};

use crate::timer::Countdown;

/// What happens after the death presentation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fate {
    /// Return at the checkpoint (player, ally).
    Respawn,
    /// Leave the scene (enemies, boss).
    Remove,
}

/// Lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    /// Taking part in the simulation.
    Alive,
    /// Health reached zero; the death delay is running.
    Dead,
    /// Death delay elapsed; waiting to be placed at the checkpoint.
    Respawning,
    /// Death delay elapsed; the actor is gone.
    Removed,
}

/// Result of [`Health::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The actor was not alive or the amount was zero.
    Ignored,
    /// Health dropped but stayed above zero.
    Wounded {
        /// Health left.
        remaining: u32,
    },
    /// This hit took health to zero.
    Killed,
}

/// Result of [`Health::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeTick {
    /// Nothing to do.
    Unchanged,
    /// Place the actor at its checkpoint and call [`Health::respawn`].
    ReadyToRespawn,
    /// Remove the actor from the registry.
    ReadyToRemove,
}

/// Health pool with its life state.
///
/// `current` always stays within `[0, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    max: u32,
    life: LifeState,
    fate: Fate,
    death_delay: f32,
    death_timer: Countdown,
    hurt: Countdown,
}

impl Health {
    /// Full health.
    #[must_use]
    pub fn new(max: u32, death_delay: f32, fate: Fate) -> Self {
        Self {
            current: max,
            max,
            life: LifeState::Alive,
            fate,
            death_delay,
            death_timer: Countdown::idle(),
            hurt: Countdown::idle(),
        }
    }

    /// Current health.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum health.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Lifecycle stage.
    #[must_use]
    pub const fn life(&self) -> LifeState {
        self.life
    }

    /// What follows death.
    #[must_use]
    pub const fn fate(&self) -> Fate {
        self.fate
    }

    /// True while alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life == LifeState::Alive
    }

    /// True while the hurt presentation window runs.
    #[must_use]
    pub fn is_hurt(&self) -> bool {
        self.hurt.is_running()
    }

    /// Subtracts `amount`, clamping at zero, and dies on reaching zero.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.is_alive() || amount == 0 {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount).min(self.max);
        if self.current == 0 {
            self.die();
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded {
                remaining: self.current,
            }
        }
    }

    /// Starts the hurt presentation window.
    pub fn mark_hurt(&mut self, duration: f32) {
        if self.is_alive() {
            self.hurt.start(duration);
        }
    }

    /// Enters `Dead` and starts the death delay. Returns false if not alive.
    pub fn die(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.current = 0;
        self.life = LifeState::Dead;
        self.hurt.cancel();
        self.death_timer.start(self.death_delay);
        true
    }

    /// Advances the hurt window and the death delay.
    pub fn tick(&mut self, dt: f32) -> LifeTick {
        self.hurt.tick(dt);
        match self.life {
            LifeState::Alive | LifeState::Removed => LifeTick::Unchanged,
            LifeState::Respawning => LifeTick::ReadyToRespawn,
            LifeState::Dead => {
                self.death_timer.tick(dt);
                if self.death_timer.is_running() {
                    return LifeTick::Unchanged;
                }
                match self.fate {
                    Fate::Respawn => {
                        self.life = LifeState::Respawning;
                        LifeTick::ReadyToRespawn
                    }
                    Fate::Remove => {
                        self.life = LifeState::Removed;
                        LifeTick::ReadyToRemove
                    }
                }
            }
        }
    }

    /// Back to full health. Only valid from `Dead` or `Respawning` on a
    /// respawning actor; otherwise a no-op returning false.
    pub fn respawn(&mut self) -> bool {
        let waiting = matches!(self.life, LifeState::Dead | LifeState::Respawning);
        if !waiting || self.fate != Fate::Respawn {
            return false;
        }
        self.current = self.max;
        self.life = LifeState::Alive;
        self.death_timer.cancel();
        self.hurt.cancel();
        true
    }

    /// Refills a living actor to full health.
    pub fn restore(&mut self) {
        if self.is_alive() {
            self.current = self.max;
            self.hurt.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn damage_reduces_and_reports_remaining() {
        let mut health = Health::new(5, 1.0, Fate::Respawn);
        assert_eq!(health.take_damage(2), DamageOutcome::Wounded { remaining: 3 });
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn overkill_clamps_to_zero() {
        let mut health = Health::new(2, 0.4, Fate::Remove);
        assert_eq!(health.take_damage(10), DamageOutcome::Killed);
        assert_eq!(health.current(), 0);
        assert_eq!(health.life(), LifeState::Dead);
    }

    #[test]
    fn damage_while_dead_is_ignored() {
        let mut health = Health::new(1, 0.4, Fate::Remove);
        assert_eq!(health.take_damage(1), DamageOutcome::Killed);
        assert_eq!(health.take_damage(1), DamageOutcome::Ignored);
        assert_eq!(health.life(), LifeState::Dead);
    }

    #[test]
    fn die_is_idempotent() {
        let mut health = Health::new(3, 0.5, Fate::Respawn);
        assert!(health.die());
        assert!(!health.die());
    }

    #[test]
    fn zero_damage_is_ignored() {
        let mut health = Health::new(3, 0.5, Fate::Respawn);
        assert_eq!(health.take_damage(0), DamageOutcome::Ignored);
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn respawning_fate_waits_then_restores() {
        let mut health = Health::new(5, 1.0, Fate::Respawn);
        health.take_damage(5);
        let mut ticks = 0;
        loop {
            ticks += 1;
            if health.tick(DT) == LifeTick::ReadyToRespawn {
                break;
            }
        }
        assert_eq!(ticks, 60);
        assert_eq!(health.life(), LifeState::Respawning);
        assert!(health.respawn());
        assert_eq!(health.current(), 5);
        assert!(health.is_alive());
    }

    #[test]
    fn removal_fate_reports_once_then_stays_removed() {
        let mut health = Health::new(1, 0.0, Fate::Remove);
        health.die();
        assert_eq!(health.tick(DT), LifeTick::ReadyToRemove);
        assert_eq!(health.tick(DT), LifeTick::Unchanged);
        assert_eq!(health.life(), LifeState::Removed);
    }

    #[test]
    fn respawn_on_living_actor_is_noop() {
        let mut health = Health::new(5, 1.0, Fate::Respawn);
        health.take_damage(2);
        assert!(!health.respawn());
        assert_eq!(health.current(), 3);
    }

    #[test]
    fn removed_actors_never_respawn() {
        let mut health = Health::new(2, 0.0, Fate::Remove);
        health.die();
        health.tick(DT);
        assert!(!health.respawn());
    }

    #[test]
    fn hurt_window_expires() {
        let mut health = Health::new(5, 1.0, Fate::Respawn);
        health.mark_hurt(0.1);
        assert!(health.is_hurt());
        for _ in 0..6 {
            health.tick(DT);
        }
        assert!(!health.is_hurt());
    }

    #[test]
    fn restore_refills_only_living() {
        let mut health = Health::new(4, 1.0, Fate::Remove);
        health.take_damage(3);
        health.restore();
        assert_eq!(health.current(), 4);
        health.die();
        health.restore();
        assert_eq!(health.current(), 0);
    }
}
