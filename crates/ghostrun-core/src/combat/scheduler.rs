//! Player melee scheduling: cooldowns, combo counting and attack windows.
//!
//! # Timeline of one accepted attack
//!
//! ```text
//! request ──activation_delay──▶ Opened (one hitbox check) ──active_duration──▶ Closed
//!    └── cooldown (base, or overload on the combo's last hit) ─────────────────────▶
//! ```
//!
//! Requests during a cooldown or while a window is open are rejected, never
//! queued. The combo counter resets when `combo_window` passes without an
//! accepted attack, and after the overload hit.

use serde::{Deserialize, Serialize};

use crate::config::AttackTuning;
use crate::timer::Countdown;

/// Stage of an open attack window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowPhase {
    /// Waiting for the activation delay.
    Windup,
    /// Hitbox check done; window still counts as attacking.
    Active,
}

/// The single in-flight attack of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackWindow {
    /// Current stage.
    pub phase: WindowPhase,
    timer: Countdown,
}

/// Window transitions reported by [`CombatScheduler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The activation delay elapsed: run the hitbox check now.
    Opened,
    /// The window finished.
    Closed,
}

/// Outcome of an attack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackRequest {
    /// A window was opened.
    Accepted {
        /// This attack completed a combo and applied the overload cooldown.
        overload: bool,
        /// The window opened immediately (zero activation delay).
        immediate: bool,
    },
    /// The cooldown is still running.
    OnCooldown,
    /// A window is already open.
    Busy,
}

impl AttackRequest {
    /// True if the request opened a window.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Cooldown, combo and window state for one attacker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatScheduler {
    cooldown: Countdown,
    combo_count: u32,
    combo_decay: Countdown,
    window: Option<AttackWindow>,
}

impl CombatScheduler {
    /// Ready to attack, no combo in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attacks counted toward the current combo.
    #[must_use]
    pub const fn combo_count(&self) -> u32 {
        self.combo_count
    }

    /// Seconds until the next attack may start.
    #[must_use]
    pub const fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    /// The open window, if any.
    #[must_use]
    pub const fn window(&self) -> Option<&AttackWindow> {
        self.window.as_ref()
    }

    /// True while a window is open.
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.window.is_some()
    }

    /// Advances cooldown, combo decay and the open window by one tick.
    pub fn tick(&mut self, dt: f32, tuning: &AttackTuning) -> Option<WindowEvent> {
        self.cooldown.tick(dt);
        if self.combo_decay.tick(dt) {
            self.combo_count = 0;
        }

        let window = self.window.as_mut()?;
        window.timer.tick(dt);
        if window.timer.is_running() {
            return None;
        }
        match window.phase {
            WindowPhase::Windup => {
                window.phase = WindowPhase::Active;
                window.timer.start(tuning.active_duration);
                Some(WindowEvent::Opened)
            }
            WindowPhase::Active => {
                self.window = None;
                Some(WindowEvent::Closed)
            }
        }
    }

    /// Tries to start an attack.
    pub fn request(&mut self, tuning: &AttackTuning) -> AttackRequest {
        if self.window.is_some() {
            return AttackRequest::Busy;
        }
        if self.cooldown.is_running() {
            return AttackRequest::OnCooldown;
        }

        self.combo_count += 1;
        self.combo_decay.start(tuning.combo_window);
        let overload = self.combo_count >= tuning.overload_threshold;
        if overload {
            self.cooldown.start(tuning.overload_cooldown);
            self.combo_count = 0;
        } else {
            self.cooldown.start(tuning.base_cooldown);
        }

        let delay = Countdown::started(tuning.activation_delay);
        let immediate = !delay.is_running();
        self.window = Some(if immediate {
            AttackWindow {
                phase: WindowPhase::Active,
                timer: Countdown::started(tuning.active_duration),
            }
        } else {
            AttackWindow {
                phase: WindowPhase::Windup,
                timer: delay,
            }
        });

        AttackRequest::Accepted {
            overload,
            immediate,
        }
    }

    /// Drops the window, cooldown and combo (death, respawn).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn tick_until_ready(scheduler: &mut CombatScheduler, tuning: &AttackTuning) -> u32 {
        let mut ticks = 0;
        while scheduler.cooldown_remaining() > 0.0 || scheduler.is_attacking() {
            scheduler.tick(DT, tuning);
            ticks += 1;
        }
        ticks
    }

    mod cooldown_tests {
        use super::*;

        #[test]
        fn second_request_during_cooldown_is_rejected() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            assert!(scheduler.request(&tuning).is_accepted());
            for _ in 0..20 {
                scheduler.tick(DT, &tuning);
            }
            assert!(!scheduler.is_attacking());
            assert_eq!(scheduler.request(&tuning), AttackRequest::OnCooldown);
        }

        #[test]
        fn request_while_window_open_is_busy() {
            let tuning = AttackTuning {
                base_cooldown: 0.0,
                ..AttackTuning::default()
            };
            let mut scheduler = CombatScheduler::new();
            assert!(scheduler.request(&tuning).is_accepted());
            assert_eq!(scheduler.request(&tuning), AttackRequest::Busy);
        }

        #[test]
        fn base_cooldown_gates_for_thirty_ticks() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);
            assert_eq!(tick_until_ready(&mut scheduler, &tuning), 30);
        }
    }

    mod combo_tests {
        use super::*;

        #[test]
        fn fourth_attack_overloads_and_resets_counter() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();

            for expected in 1..=3 {
                let result = scheduler.request(&tuning);
                assert_eq!(
                    result,
                    AttackRequest::Accepted {
                        overload: false,
                        immediate: false
                    }
                );
                assert_eq!(scheduler.combo_count(), expected);
                assert!((scheduler.cooldown_remaining() - tuning.base_cooldown).abs() < 1e-6);
                tick_until_ready(&mut scheduler, &tuning);
            }

            let result = scheduler.request(&tuning);
            assert_eq!(
                result,
                AttackRequest::Accepted {
                    overload: true,
                    immediate: false
                }
            );
            assert_eq!(scheduler.combo_count(), 0);
            assert!((scheduler.cooldown_remaining() - tuning.overload_cooldown).abs() < 1e-6);
            assert_eq!(tick_until_ready(&mut scheduler, &tuning), 90);
        }

        #[test]
        fn combo_decays_after_window() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);
            assert_eq!(scheduler.combo_count(), 1);
            for _ in 0..240 {
                scheduler.tick(DT, &tuning);
            }
            assert_eq!(scheduler.combo_count(), 0);
        }

        #[test]
        fn combo_survives_inside_window() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);
            for _ in 0..200 {
                scheduler.tick(DT, &tuning);
            }
            assert_eq!(scheduler.combo_count(), 1);
        }
    }

    mod window_tests {
        use super::*;

        #[test]
        fn window_opens_once_then_closes() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);

            let mut opened = 0;
            let mut closed = 0;
            for _ in 0..60 {
                match scheduler.tick(DT, &tuning) {
                    Some(WindowEvent::Opened) => opened += 1,
                    Some(WindowEvent::Closed) => closed += 1,
                    None => {}
                }
            }
            assert_eq!(opened, 1);
            assert_eq!(closed, 1);
            assert!(!scheduler.is_attacking());
        }

        #[test]
        fn opening_happens_after_activation_delay() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);
            for _ in 0..5 {
                assert_eq!(scheduler.tick(DT, &tuning), None);
            }
            assert_eq!(scheduler.tick(DT, &tuning), Some(WindowEvent::Opened));
        }

        #[test]
        fn zero_delay_opens_immediately() {
            let tuning = AttackTuning {
                activation_delay: 0.0,
                ..AttackTuning::default()
            };
            let mut scheduler = CombatScheduler::new();
            assert_eq!(
                scheduler.request(&tuning),
                AttackRequest::Accepted {
                    overload: false,
                    immediate: true
                }
            );
            assert_eq!(scheduler.window().map(|w| w.phase), Some(WindowPhase::Active));
        }

        #[test]
        fn reset_clears_everything() {
            let tuning = AttackTuning::default();
            let mut scheduler = CombatScheduler::new();
            scheduler.request(&tuning);
            scheduler.reset();
            assert!(!scheduler.is_attacking());
            assert_eq!(scheduler.combo_count(), 0);
            assert!(scheduler.request(&tuning).is_accepted());
        }
    }
}
