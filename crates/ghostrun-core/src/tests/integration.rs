//! End-to-end scenarios through `Simulation::step`.

use glam::Vec2;

use crate::actor::Archetype;
use crate::ai::{AiState, EscortMode};
use crate::checkpoint::{ActivationMode, CheckpointMarker};
use crate::combat::{DamageEvent, DamageKind, LifeState};
use crate::input::InputSnapshot;
use crate::output::{Cue, Presentation, Signal};

use super::helpers::{
    ai_of, config_with_dummy, count_cues, count_signals, flat_sim, flat_sim_with, health_of,
    position_of, run, SLIME_Y, TALL_Y,
};

// =============================================================================
// Health, death and respawn
// =============================================================================

#[test]
fn player_respawns_at_checkpoint_with_full_health() {
    let mut sim = flat_sim(1);
    let player = sim.spawn_player(Vec2::new(0.0, TALL_Y));
    sim.activate_checkpoint(Vec2::new(10.0, 0.0));
    sim.queue_damage(DamageEvent::new(player, 5, DamageKind::Hazard));

    let mut respawned_at = None;
    for _ in 0..120 {
        let frame = sim.step(&InputSnapshot::idle());
        if frame
            .signals
            .iter()
            .any(|s| matches!(s, Signal::Respawned { actor, .. } if *actor == player))
        {
            respawned_at = Some(frame.tick);
            break;
        }
        let actor = sim.actor(player).unwrap();
        assert_eq!(actor.health().unwrap().current(), 0, "dead until respawn");
    }

    // Killed on tick 0, then sixty ticks of the one second death delay.
    assert_eq!(respawned_at, Some(59));
    assert_eq!(position_of(&sim, player), Vec2::new(10.0, 0.0));
    assert_eq!(health_of(&sim, player), Some(5));
}

#[test]
fn player_respawned_at_standing_height_can_walk() {
    let mut sim = flat_sim(1);
    let player = sim.spawn_player(Vec2::new(0.0, TALL_Y));
    sim.activate_checkpoint(Vec2::new(10.0, TALL_Y));
    sim.queue_damage(DamageEvent::new(player, 5, DamageKind::Hazard));

    let frames = run(&mut sim, InputSnapshot::idle(), 60);
    let respawn_ticks: Vec<u64> = frames
        .iter()
        .filter(|frame| {
            frame
                .signals
                .iter()
                .any(|s| matches!(s, Signal::Respawned { actor, .. } if *actor == player))
        })
        .map(|frame| frame.tick)
        .collect();
    assert_eq!(respawn_ticks, vec![59]);
    assert_eq!(position_of(&sim, player), Vec2::new(10.0, TALL_Y));

    run(&mut sim, InputSnapshot::moving(1.0), 30);
    let position = position_of(&sim, player);
    assert!(position.x > 12.0, "walked right from the checkpoint, x = {}", position.x);
    assert!((position.y - TALL_Y).abs() < 0.05, "stands on the floor, y = {}", position.y);
    assert!(sim.actor(player).unwrap().body.grounded);
}

#[test]
fn player_without_checkpoint_activation_respawns_at_spawn() {
    let mut sim = flat_sim(1);
    let player = sim.spawn_player(Vec2::new(3.0, TALL_Y));
    run(&mut sim, InputSnapshot::moving(1.0), 30);
    sim.queue_damage(DamageEvent::new(player, 99, DamageKind::Hazard));
    let frames = run(&mut sim, InputSnapshot::idle(), 70);

    assert_eq!(count_signals(&frames, |s| matches!(s, Signal::Respawned { .. })), 1);
    let position = position_of(&sim, player);
    assert!((position.x - 3.0).abs() < 1e-4);
}

#[test]
fn two_lethal_hits_in_one_tick_die_once() {
    let mut sim = flat_sim(1);
    let player = sim.spawn_player(Vec2::new(0.0, TALL_Y));
    sim.queue_damage(DamageEvent::new(player, 5, DamageKind::Hazard));
    sim.queue_damage(DamageEvent::new(player, 5, DamageKind::Hazard));
    let frames = run(&mut sim, InputSnapshot::idle(), 1);

    assert_eq!(count_signals(&frames, |s| matches!(s, Signal::PlayerDied { .. })), 1);
    assert_eq!(count_cues(&frames, |c| matches!(c, Cue::Death { .. })), 1);
    assert_eq!(count_cues(&frames, |c| matches!(c, Cue::Hit { .. })), 0);
    let life = sim.actor(player).unwrap().health().unwrap().life();
    assert_eq!(life, LifeState::Dead);
}

#[test]
fn dead_enemy_is_removed_after_delay() {
    let mut sim = flat_sim_with(config_with_dummy(Archetype::BlueSlime), 1);
    let slime = sim.spawn_enemy(Archetype::BlueSlime, Vec2::new(0.0, SLIME_Y));
    sim.queue_damage(DamageEvent::new(slime, 2, DamageKind::Hazard));
    let frames = run(&mut sim, InputSnapshot::idle(), 40);

    assert!(sim.actor(slime).is_none());
    assert_eq!(
        count_signals(&frames, |s| matches!(s, Signal::ActorRemoved { actor, .. } if *actor == slime)),
        1
    );
}

// =============================================================================
// Targeting and enemy attacks
// =============================================================================

#[test]
fn enemy_prefers_ally_over_closer_player() {
    let mut sim = flat_sim(1);
    let slime = sim.spawn_enemy(Archetype::BlueSlime, Vec2::new(0.0, SLIME_Y));
    let ally = sim.spawn_ally(Vec2::new(2.0, TALL_Y));
    sim.spawn_player(Vec2::new(-1.0, TALL_Y));

    sim.step(&InputSnapshot::idle());
    assert_eq!(ai_of(&sim, slime).target(), Some(ally));
    assert!(matches!(ai_of(&sim, slime), AiState::Chasing { .. }));
}

#[test]
fn bomb_slime_hits_each_target_once_then_dies() {
    let mut sim = flat_sim_with(config_with_dummy(Archetype::BlueSlime), 1);
    let bomb = sim.spawn_enemy(Archetype::BombSlime, Vec2::new(0.0, SLIME_Y));
    let bystander = sim.spawn_enemy(Archetype::BlueSlime, Vec2::new(-1.0, SLIME_Y));
    let player = sim.spawn_player(Vec2::new(1.0, TALL_Y));

    let frames = run(&mut sim, InputSnapshot::idle(), 90);

    assert_eq!(count_cues(&frames, |c| matches!(c, Cue::Explosion { .. })), 1);
    assert_eq!(
        count_cues(&frames, |c| matches!(c, Cue::Hit { target } if *target == player)),
        1
    );
    assert_eq!(health_of(&sim, player), Some(3));
    assert!(sim.actor(bystander).is_none(), "slime caught in the blast");
    assert!(sim.actor(bomb).is_none(), "bomb removed after its fuse");
}

#[test]
fn player_strike_damages_and_knocks_back() {
    let mut sim = flat_sim(1);
    sim.spawn_player(Vec2::new(0.0, TALL_Y));
    let slime = sim.spawn_enemy(Archetype::BlueSlime, Vec2::new(1.0, SLIME_Y));

    let press = InputSnapshot {
        attack: true,
        ..InputSnapshot::idle()
    };
    let mut frames = run(&mut sim, press, 1);
    frames.extend(run(&mut sim, InputSnapshot::idle(), 8));

    assert_eq!(health_of(&sim, slime), Some(1));
    let knocked = frames.iter().flat_map(|f| &f.presentations).any(|p| {
        matches!(p, Presentation::Knockback { actor, knockback } if *actor == slime && knockback.direction > 0.0)
    });
    assert!(knocked);
    assert!(position_of(&sim, slime).x > 1.0);
}

#[test]
fn held_attack_button_attacks_once() {
    let mut sim = flat_sim(1);
    let player = sim.spawn_player(Vec2::new(0.0, TALL_Y));
    let hold = InputSnapshot {
        attack: true,
        ..InputSnapshot::idle()
    };
    let frames = run(&mut sim, hold, 120);
    assert_eq!(
        count_cues(&frames, |c| matches!(c, Cue::Attack { actor } if *actor == player)),
        1
    );
}

// =============================================================================
// Boss
// =============================================================================

#[test]
fn boss_teleports_on_hit_and_resets_when_player_dies() {
    let mut sim = flat_sim(9);
    let player = sim.spawn_player(Vec2::new(0.0, TALL_Y));
    let home = Vec2::new(20.0, 3.0);
    let waypoints = vec![Vec2::new(25.0, 3.0), Vec2::new(30.0, 3.0)];
    let boss = sim.spawn_boss(home, waypoints.clone());

    assert!(sim.engage_boss(boss));
    sim.queue_damage(DamageEvent::new(boss, 1, DamageKind::Strike).with_source(player));
    let frames = run(&mut sim, InputSnapshot::idle(), 60);

    assert_eq!(count_cues(&frames, |c| matches!(c, Cue::PortalOpen { .. })), 1);
    assert_eq!(count_cues(&frames, |c| matches!(c, Cue::PortalClose { .. })), 1);
    let moved = position_of(&sim, boss);
    assert!(waypoints.contains(&moved), "boss at {moved:?}");
    let max = sim.config().boss.max_health;
    assert_eq!(health_of(&sim, boss), Some(max - 1));

    sim.queue_damage(DamageEvent::new(player, 99, DamageKind::Hazard));
    let frames = run(&mut sim, InputSnapshot::idle(), 1);

    assert_eq!(count_signals(&frames, |s| *s == Signal::BossReset { actor: boss }), 1);
    assert_eq!(position_of(&sim, boss), home);
    assert_eq!(health_of(&sim, boss), Some(max));
    let state = &sim.actor(boss).unwrap().as_boss().unwrap().state;
    assert!(!state.is_engaged());
    assert!(!state.is_teleporting());
    assert_eq!(state.shot_counter(), 0);
}

#[test]
fn boss_death_drops_reward() {
    let mut sim = flat_sim(3);
    let boss = sim.spawn_boss(Vec2::new(20.0, 3.0), vec![]);
    let max = sim.config().boss.max_health;
    sim.queue_damage(DamageEvent::new(boss, max, DamageKind::Hazard));
    let frames = run(&mut sim, InputSnapshot::idle(), 90);

    assert!(sim.actor(boss).is_none());
    assert_eq!(count_signals(&frames, |s| matches!(s, Signal::DropSpawned { .. })), 1);
}

// =============================================================================
// Escort and checkpoints
// =============================================================================

#[test]
fn halted_escort_guards_and_shoots() {
    let mut sim = flat_sim(1);
    let ally = sim.spawn_ally(Vec2::new(0.0, TALL_Y));
    let slime = sim.spawn_enemy(Archetype::RedSlime, Vec2::new(10.0, SLIME_Y));
    assert!(sim.start_escort());

    let halt = InputSnapshot {
        halt_toggle: true,
        ..InputSnapshot::idle()
    };
    let mut frames = run(&mut sim, halt, 1);
    frames.extend(run(&mut sim, InputSnapshot::idle(), 120));

    let modes: Vec<EscortMode> = frames
        .iter()
        .flat_map(|f| &f.presentations)
        .filter_map(|p| match p {
            Presentation::EscortStatus { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect();
    assert_eq!(modes, vec![EscortMode::Walking, EscortMode::Drawing, EscortMode::Guarding]);
    assert!(count_cues(&frames, |c| matches!(c, Cue::Shot { actor } if *actor == ally)) >= 2);
    assert!(health_of(&sim, slime).map_or(true, |hp| hp < 2));
    assert!((position_of(&sim, ally).x).abs() < 1e-3, "guarding ally stays put");
}

#[test]
fn walking_into_marker_moves_checkpoint_once() {
    let mut sim = flat_sim(1);
    sim.spawn_player(Vec2::new(0.0, TALL_Y));
    let marker = Vec2::new(5.0, TALL_Y);
    sim.add_checkpoint_marker(CheckpointMarker::new(marker, 1.0, ActivationMode::Touch));

    let frames = run(&mut sim, InputSnapshot::moving(1.0), 60);

    assert_eq!(sim.checkpoints().last_checkpoint(), Some(marker));
    assert!(sim.markers()[0].is_activated());
    assert_eq!(
        count_signals(&frames, |s| matches!(s, Signal::CheckpointActivated { .. })),
        1
    );
}

#[test]
fn interact_marker_needs_a_press() {
    let mut sim = flat_sim(1);
    let start = Vec2::new(0.0, TALL_Y);
    sim.spawn_player(start);
    sim.add_checkpoint_marker(CheckpointMarker::new(start, 1.0, ActivationMode::Interact));

    run(&mut sim, InputSnapshot::idle(), 5);
    assert!(!sim.markers()[0].is_activated());

    let press = InputSnapshot {
        interact: true,
        ..InputSnapshot::idle()
    };
    run(&mut sim, press, 1);
    assert!(sim.markers()[0].is_activated());
}
