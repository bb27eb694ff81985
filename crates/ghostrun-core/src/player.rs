//! Input-driven player behaviour.
//!
//! The player composes locomotion (through [`intent`]), the melee
//! [`CombatScheduler`](crate::combat::CombatScheduler), the ghost bomb
//! ability and footstep pacing. Damage goes out as outputs like everyone
//! else's.

use glam::Vec2;
use tracing::trace;

use crate::actor::{ActorId, Body, PlayerComponents, Transform};
use crate::animation::RUN_THRESHOLD;
use crate::combat::{
    AttackRequest, DamageEvent, DamageKind, Knockback, ProjectileKind, ProjectileSpec, WindowEvent,
};
use crate::config::PlayerTuning;
use crate::input::{InputEdges, InputSnapshot};
use crate::layers::Layers;
use crate::locomotion::MoveIntent;
use crate::output::{Cue, Output};
use crate::terrain::Aabb;
use crate::world_view::WorldView;

/// Target Selection phase: what the player wants to do this tick.
#[must_use]
pub fn intent(player: &PlayerComponents, input: &InputSnapshot, edges: &InputEdges) -> MoveIntent {
    if !player.health.is_alive() {
        return MoveIntent::IDLE;
    }
    MoveIntent::walk(input.axis()).with_jump(edges.jump)
}

/// Combat phase: attack windows, new attack requests, ghost bomb, footsteps.
#[allow(clippy::too_many_arguments)]
pub fn act(
    id: ActorId,
    transform: &Transform,
    body: &Body,
    player: &mut PlayerComponents,
    edges: &InputEdges,
    view: &WorldView,
    tuning: &PlayerTuning,
    dt: f32,
    out: &mut Vec<Output>,
) {
    if !player.health.is_alive() {
        return;
    }
    player.ghost_cooldown.tick(dt);

    if player.combat.tick(dt, &tuning.attack) == Some(WindowEvent::Opened) {
        strike(id, transform, view, tuning, out);
    }

    if edges.attack {
        match player.combat.request(&tuning.attack) {
            AttackRequest::Accepted {
                overload,
                immediate,
            } => {
                trace!(player = %id, overload, combo = player.combat.combo_count(), "attack accepted");
                out.push(Cue::Attack { actor: id }.into());
                if immediate {
                    strike(id, transform, view, tuning, out);
                }
            }
            rejected => trace!(player = %id, ?rejected, "attack request dropped"),
        }
    }

    if edges.ability {
        fire_ghost_bomb(id, transform, player, tuning, out);
    }

    if body.grounded && body.velocity.x.abs() > RUN_THRESHOLD {
        player.footstep.tick(dt);
        if !player.footstep.is_running() {
            out.push(Cue::Footstep { actor: id }.into());
            player.footstep.start(tuning.footstep_interval);
        }
    } else {
        player.footstep.cancel();
    }
}

/// The melee hitbox in front of the player, mirrored by facing.
#[must_use]
pub fn hitbox(transform: &Transform, tuning: &PlayerTuning) -> Aabb {
    let offset = Vec2::new(transform.facing.sign() * tuning.attack.hitbox_offset, 0.0);
    Aabb::from_center(transform.position + offset, tuning.attack.hitbox_half_extents)
}

/// One hitbox check: every overlapping enemy gets exactly one event.
fn strike(
    id: ActorId,
    transform: &Transform,
    view: &WorldView,
    tuning: &PlayerTuning,
    out: &mut Vec<Output>,
) {
    let area = hitbox(transform, tuning);
    let attack = &tuning.attack;
    for target in view.overlap_box(&area, Layers::ENEMY) {
        let target_x = view.get(target).map_or(transform.position.x, |s| s.position.x);
        let knockback = Knockback::away_from(transform.position.x, target_x, attack.knockback_force);
        out.push(
            DamageEvent::new(target, attack.damage, DamageKind::Strike)
                .with_source(id)
                .with_knockback(knockback)
                .into(),
        );
    }
}

fn fire_ghost_bomb(
    id: ActorId,
    transform: &Transform,
    player: &mut PlayerComponents,
    tuning: &PlayerTuning,
    out: &mut Vec<Output>,
) {
    if player.ghost_cooldown.is_running() {
        trace!(player = %id, remaining = player.ghost_cooldown.remaining(), "ghost bomb cooling down");
        return;
    }
    let bomb = &tuning.ghost_bomb;
    let direction = transform.facing.direction();
    let mut spec = ProjectileSpec::straight(
        ProjectileKind::GhostBolt,
        id,
        transform.position + direction * transform.half_extents.x,
        direction * bomb.speed,
        bomb.damage,
        Layers::ENEMY,
        bomb.lifetime,
    );
    spec.stops_on_terrain = true;
    spec.bursts = true;
    out.push(Output::Spawn(spec));
    out.push(Cue::Shot { actor: id }.into());
    player.ghost_cooldown.start(bomb.cooldown);
}
