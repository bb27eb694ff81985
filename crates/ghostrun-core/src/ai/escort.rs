//! The escorted ally.
//!
//! ```text
//! Waiting ──start──▶ Walking ──halt──▶ Drawing ──▶ Guarding
//!                       ▲                 │            │
//!                       └── Holstering ◀──┴────halt────┘
//! any ──stop──▶ Finished
//! ```
//!
//! While guarding, the ally shoots the closest enemy within gun range.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actor::{ActorId, AllyComponents, Facing, Transform};
use crate::combat::{ProjectileKind, ProjectileSpec};
use crate::config::AllyTuning;
use crate::layers::Layers;
use crate::locomotion::MoveIntent;
use crate::output::{Cue, Output, Presentation};
use crate::timer::Countdown;
use crate::world_view::WorldView;

/// Escort mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EscortMode {
    /// Escort not started.
    #[default]
    Waiting,
    /// Walking right.
    Walking,
    /// Drawing the gun before guarding.
    Drawing,
    /// Standing and shooting.
    Guarding,
    /// Putting the gun away before walking.
    Holstering,
    /// Escort over.
    Finished,
}

/// Escort state machine with its transition and fire timers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EscortState {
    mode: EscortMode,
    transition: Countdown,
    fire_cooldown: Countdown,
}

impl EscortState {
    /// Waiting for [`EscortState::start`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> EscortMode {
        self.mode
    }

    /// True between start and stop.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.mode, EscortMode::Waiting | EscortMode::Finished)
    }

    fn enter(&mut self, mode: EscortMode) -> Option<EscortMode> {
        if self.mode == mode {
            return None;
        }
        self.mode = mode;
        Some(mode)
    }

    /// Starts (or restarts) walking. Returns the new mode if it changed.
    pub fn start(&mut self) -> Option<EscortMode> {
        if self.is_active() {
            return None;
        }
        self.transition.cancel();
        self.enter(EscortMode::Walking)
    }

    /// Ends the escort.
    pub fn stop(&mut self) -> Option<EscortMode> {
        self.transition.cancel();
        self.fire_cooldown.cancel();
        self.enter(EscortMode::Finished)
    }

    /// Halt toggle: walking draws, drawing or guarding holsters.
    pub fn toggle_halt(&mut self, tuning: &AllyTuning) -> Option<EscortMode> {
        match self.mode {
            EscortMode::Walking => {
                self.transition.start(tuning.draw_duration);
                self.enter(EscortMode::Drawing)
            }
            EscortMode::Drawing | EscortMode::Guarding => {
                self.transition.start(tuning.holster_duration);
                self.enter(EscortMode::Holstering)
            }
            EscortMode::Waiting | EscortMode::Holstering | EscortMode::Finished => None,
        }
    }

    /// Advances draw/holster transitions.
    pub fn tick(&mut self, dt: f32) -> Option<EscortMode> {
        self.transition.tick(dt);
        self.fire_cooldown.tick(dt);
        if self.transition.is_running() {
            return None;
        }
        match self.mode {
            EscortMode::Drawing => self.enter(EscortMode::Guarding),
            EscortMode::Holstering => self.enter(EscortMode::Walking),
            _ => None,
        }
    }

    /// Back to walking after a respawn, if the escort was running.
    pub fn resume(&mut self) -> Option<EscortMode> {
        self.transition.cancel();
        self.fire_cooldown.cancel();
        if self.is_active() {
            self.enter(EscortMode::Walking)
        } else {
            None
        }
    }

    /// Movement for the current mode.
    #[must_use]
    pub fn intent(&self) -> MoveIntent {
        match self.mode {
            EscortMode::Walking => MoveIntent::walk(1.0),
            _ => MoveIntent::IDLE,
        }
    }

    fn ready_to_fire(&self) -> bool {
        self.mode == EscortMode::Guarding && !self.fire_cooldown.is_running()
    }
}

/// Emits the status presentation for a mode change.
pub fn announce(id: ActorId, change: Option<EscortMode>, out: &mut Vec<Output>) {
    if let Some(mode) = change {
        debug!(ally = %id, ?mode, "escort mode changed");
        out.push(Presentation::EscortStatus { actor: id, mode }.into());
    }
}

/// Target Selection phase: timers and the halt toggle.
pub fn think(
    id: ActorId,
    ally: &mut AllyComponents,
    halt_pressed: bool,
    tuning: &AllyTuning,
    dt: f32,
    out: &mut Vec<Output>,
) -> MoveIntent {
    if !ally.health.is_alive() {
        return MoveIntent::IDLE;
    }
    announce(id, ally.escort.tick(dt), out);
    if halt_pressed {
        announce(id, ally.escort.toggle_halt(tuning), out);
    }
    ally.escort.intent()
}

/// Combat phase: shoot the closest enemy while guarding.
pub fn act(
    id: ActorId,
    transform: &mut Transform,
    ally: &mut AllyComponents,
    view: &WorldView,
    tuning: &AllyTuning,
    out: &mut Vec<Output>,
) {
    if !ally.health.is_alive() || !ally.escort.ready_to_fire() {
        return;
    }
    let position = transform.position;
    let Some(target) = view.closest(position, tuning.gun_range, Layers::ENEMY) else {
        return;
    };
    transform.facing = Facing::toward(position.x, target.position.x, transform.facing);
    let direction = (target.position - position)
        .try_normalize()
        .unwrap_or_else(|| transform.facing.direction());

    let mut spec = ProjectileSpec::straight(
        ProjectileKind::EscortShot,
        id,
        position,
        direction * tuning.projectile_speed,
        tuning.projectile_damage,
        Layers::ENEMY,
        tuning.projectile_lifetime,
    );
    spec.stops_on_terrain = true;
    out.push(Output::Spawn(spec));
    out.push(Cue::Shot { actor: id }.into());
    ally.escort.fire_cooldown.start(tuning.fire_cooldown);
}
