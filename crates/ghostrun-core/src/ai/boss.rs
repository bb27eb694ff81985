//! Boss encounter: a timed attack loop and a damage-triggered teleport.
//!
//! # Attack loop
//!
//! Once engaged, an attack starts every `attack_interval` seconds regardless
//! of where the player is. Each attack winds up for `shot_windup`, then
//! fires an aimed bullet, except every `shots_before_bomb`-th shot which is a
//! lobbed bomb.
//!
//! # Teleport
//!
//! ```text
//! hit ──▶ Opening ──portal_open──▶ Transit ──teleport_delay──▶ (move) Closing ──portal_close──▶ resume
//! ```
//!
//! The boss cannot attack, and further hits cannot retrigger the teleport,
//! until the closing portal finishes. Damage still counts toward death.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::actor::{ActorId, Facing, Transform};
use crate::combat::{ProjectileKind, ProjectileSpec};
use crate::config::BossTuning;
use crate::layers::Layers;
use crate::output::{Cue, Output, PortalPhase, Presentation};
use crate::timer::Countdown;
use crate::world_view::WorldView;

/// Teleport sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeleportStage {
    /// Departure portal opening.
    Opening,
    /// Waiting before the jump.
    Transit,
    /// Arrival portal closing.
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Teleport {
    stage: TeleportStage,
    timer: Countdown,
}

/// Boss encounter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossState {
    tuning: BossTuning,
    engaged: bool,
    attack_loop: Countdown,
    windup: Option<Countdown>,
    shot_counter: u32,
    teleport: Option<Teleport>,
    waypoint: Option<usize>,
    home: Vec2,
    waypoints: Vec<Vec2>,
}

impl BossState {
    /// Idle boss at `home`.
    #[must_use]
    pub fn new(tuning: BossTuning, home: Vec2, waypoints: Vec<Vec2>) -> Self {
        Self {
            tuning,
            engaged: false,
            attack_loop: Countdown::idle(),
            windup: None,
            shot_counter: 0,
            teleport: None,
            waypoint: None,
            home,
            waypoints,
        }
    }

    /// Tuning.
    #[must_use]
    pub const fn tuning(&self) -> &BossTuning {
        &self.tuning
    }

    /// True once the attack loop has started.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// True while any teleport stage runs.
    #[must_use]
    pub const fn is_teleporting(&self) -> bool {
        self.teleport.is_some()
    }

    /// Current teleport stage.
    #[must_use]
    pub fn teleport_stage(&self) -> Option<TeleportStage> {
        self.teleport.map(|teleport| teleport.stage)
    }

    /// True while a shot is winding up.
    #[must_use]
    pub const fn is_winding_up(&self) -> bool {
        self.windup.is_some()
    }

    /// Shots since the last bomb.
    #[must_use]
    pub const fn shot_counter(&self) -> u32 {
        self.shot_counter
    }

    /// Index of the waypoint the boss stands on, if it has teleported.
    #[must_use]
    pub const fn waypoint(&self) -> Option<usize> {
        self.waypoint
    }

    /// Starting position.
    #[must_use]
    pub const fn home(&self) -> Vec2 {
        self.home
    }

    /// Starts the attack loop. Returns false if already engaged.
    pub fn engage(&mut self) -> bool {
        if self.engaged {
            return false;
        }
        self.engaged = true;
        self.attack_loop.cancel();
        true
    }

    /// Opens the departure portal and cancels any windup. Returns false if
    /// a teleport is already running.
    pub fn begin_teleport(&mut self) -> bool {
        if self.teleport.is_some() {
            return false;
        }
        self.windup = None;
        self.teleport = Some(Teleport {
            stage: TeleportStage::Opening,
            timer: Countdown::started(self.tuning.portal_open_duration),
        });
        true
    }

    /// Back to the pre-encounter state. The caller restores health and
    /// moves the boss to [`BossState::home`].
    pub fn reset(&mut self) {
        self.engaged = false;
        self.attack_loop.cancel();
        self.windup = None;
        self.shot_counter = 0;
        self.teleport = None;
        self.waypoint = None;
    }

    /// Stops everything on death.
    pub fn halt(&mut self) {
        self.engaged = false;
        self.windup = None;
        self.teleport = None;
    }

    fn pick_waypoint(&mut self, rng: &mut impl Rng) -> Option<Vec2> {
        let index = match (self.waypoints.len(), self.waypoint) {
            (0, _) => return None,
            (1, _) => 0,
            (count, None) => rng.gen_range(0..count),
            (count, Some(current)) => {
                let pick = rng.gen_range(0..count - 1);
                if pick >= current {
                    pick + 1
                } else {
                    pick
                }
            }
        };
        self.waypoint = Some(index);
        self.waypoints.get(index).copied()
    }

    /// Combat phase: teleport stages, then the attack loop.
    pub fn act(
        &mut self,
        id: ActorId,
        transform: &mut Transform,
        view: &WorldView,
        rng: &mut impl Rng,
        dt: f32,
        out: &mut Vec<Output>,
    ) {
        if let Some(teleport) = self.teleport {
            self.teleport = self.advance_teleport(teleport, id, transform, rng, dt, out);
            return;
        }
        if !self.engaged {
            return;
        }

        if let Some(player) = view.player() {
            transform.facing =
                Facing::toward(transform.position.x, player.position.x, transform.facing);
        }

        if self.attack_loop.is_running() {
            self.attack_loop.tick(dt);
        }
        if !self.attack_loop.is_running() {
            self.attack_loop.start(self.tuning.attack_interval);
            if self.windup.is_none() {
                self.windup = Some(Countdown::started(self.tuning.shot_windup));
                out.push(Cue::Attack { actor: id }.into());
            }
        }

        if let Some(windup) = self.windup.as_mut() {
            windup.tick(dt);
            if !windup.is_running() {
                self.windup = None;
                self.fire(id, transform, view, out);
            }
        }
    }

    fn advance_teleport(
        &mut self,
        mut teleport: Teleport,
        id: ActorId,
        transform: &mut Transform,
        rng: &mut impl Rng,
        dt: f32,
        out: &mut Vec<Output>,
    ) -> Option<Teleport> {
        teleport.timer.tick(dt);
        if teleport.timer.is_running() {
            return Some(teleport);
        }
        match teleport.stage {
            TeleportStage::Opening => Some(Teleport {
                stage: TeleportStage::Transit,
                timer: Countdown::started(self.tuning.teleport_delay),
            }),
            TeleportStage::Transit => {
                if let Some(destination) = self.pick_waypoint(rng) {
                    transform.position = destination;
                }
                debug!(boss = %id, waypoint = ?self.waypoint, "boss teleported");
                let position = transform.position;
                out.push(Cue::PortalClose { actor: id, position }.into());
                out.push(
                    Presentation::Portal {
                        actor: id,
                        phase: PortalPhase::Closing,
                        position,
                    }
                    .into(),
                );
                Some(Teleport {
                    stage: TeleportStage::Closing,
                    timer: Countdown::started(self.tuning.portal_close_duration),
                })
            }
            TeleportStage::Closing => None,
        }
    }

    fn fire(&mut self, id: ActorId, transform: &Transform, view: &WorldView, out: &mut Vec<Output>) {
        let Some(player) = view.player() else {
            trace!(boss = %id, "no player to shoot at");
            return;
        };
        let position = transform.position;
        let direction = (player.position - position)
            .try_normalize()
            .unwrap_or_else(|| transform.facing.direction());

        self.shot_counter += 1;
        if self.shot_counter >= self.tuning.shots_before_bomb {
            self.shot_counter = 0;
            let launch = Vec2::new(direction.x, 1.0).normalize() * self.tuning.bomb_speed;
            out.push(Output::Spawn(ProjectileSpec {
                kind: ProjectileKind::BossBomb,
                owner: id,
                origin: position,
                velocity: launch,
                damage: self.tuning.bomb_damage,
                targets: Layers::PLAYER,
                lifetime: self.tuning.bomb_lifetime,
                gravity: self.tuning.bomb_gravity,
                stops_on_terrain: true,
                bursts: true,
            }));
            out.push(Cue::BombLaunch { actor: id }.into());
        } else {
            let mut spec = ProjectileSpec::straight(
                ProjectileKind::BossBullet,
                id,
                position,
                direction * self.tuning.bullet_speed,
                self.tuning.bullet_damage,
                Layers::PLAYER,
                self.tuning.bullet_lifetime,
            );
            spec.stops_on_terrain = true;
            out.push(Output::Spawn(spec));
            out.push(Cue::Shot { actor: id }.into());
        }
    }
}
