//! Data-driven enemy behaviour.
//!
//! All five archetypes run this module; what they do on delivery comes from
//! [`AttackKind`].

use glam::Vec2;
use tracing::{debug, trace};

use super::targeting::{select_in_view, Candidate};
use super::{AiState, AttackPhase};
use crate::actor::{ActorId, ActorKind, EnemyComponents, Facing, Transform};
use crate::combat::{DamageEvent, DamageKind, ProjectileKind, ProjectileSpec};
use crate::config::{ArchetypeStats, AttackKind, FirePattern};
use crate::layers::Layers;
use crate::locomotion::MoveIntent;
use crate::output::{Cue, FlashColor, Output, Presentation, Signal};
use crate::world_view::WorldView;

/// Horizontal distances below this count as "arrived" while chasing.
pub const ARRIVE_DISTANCE: f32 = 0.05;

/// Target Selection phase: picks a target, faces it, and either starts an
/// attack or returns a chase intent.
pub fn think(
    id: ActorId,
    transform: &mut Transform,
    enemy: &mut EnemyComponents,
    view: &WorldView,
    dt: f32,
    out: &mut Vec<Output>,
) -> MoveIntent {
    if !enemy.health.is_alive() {
        enemy.ai = AiState::Dead;
        return MoveIntent::IDLE;
    }
    enemy.attack_cooldown.tick(dt);
    if matches!(enemy.ai, AiState::Attacking(_)) {
        return MoveIntent::IDLE;
    }

    let position = transform.position;
    let Some(target) = select_in_view(
        view,
        position,
        enemy.stats.detection_radius,
        enemy.stats.priority,
    ) else {
        enemy.ai = AiState::Idle;
        return MoveIntent::IDLE;
    };
    transform.facing = Facing::toward(position.x, target.position.x, transform.facing);

    if !enemy.attack_cooldown.is_running()
        && in_attack_range(&enemy.stats, transform, &target, view)
    {
        start_attack(id, enemy, &target, out);
        return MoveIntent::IDLE;
    }

    chase(enemy, position, target)
}

/// Combat phase: contact damage, attack delivery and the end of the cycle.
pub fn act(
    id: ActorId,
    transform: &Transform,
    enemy: &mut EnemyComponents,
    view: &WorldView,
    dt: f32,
    out: &mut Vec<Output>,
) {
    if !enemy.health.is_alive() {
        return;
    }
    contact_damage(id, transform, enemy, view, dt, out);

    let AiState::Attacking(phase) = &mut enemy.ai else {
        return;
    };
    if phase.tick_windup(dt) {
        deliver(id, transform, &enemy.stats, phase, view, out);
    }
    if !phase.tick_recovery(dt) {
        return;
    }

    if matches!(enemy.stats.attack, AttackKind::Explode { .. }) {
        if enemy.health.die() {
            debug!(enemy = %id, "bomb slime spent");
            out.push(
                Signal::ActorDied {
                    actor: id,
                    kind: ActorKind::Enemy(enemy.archetype),
                }
                .into(),
            );
        }
        enemy.ai = AiState::Dead;
        return;
    }

    enemy.ai = match select_in_view(
        view,
        transform.position,
        enemy.stats.detection_radius,
        enemy.stats.priority,
    ) {
        Some(target) if within_chase(&enemy.stats, transform.position, &target) => {
            AiState::Chasing { target: target.id }
        }
        _ => AiState::Idle,
    };
}

fn within_chase(stats: &ArchetypeStats, position: Vec2, target: &Candidate) -> bool {
    let chase_range = stats.chase_range.unwrap_or(stats.detection_radius);
    position.distance(target.position) <= chase_range
}

fn chase(enemy: &mut EnemyComponents, position: Vec2, target: Candidate) -> MoveIntent {
    if !within_chase(&enemy.stats, position, &target) {
        enemy.ai = AiState::Idle;
        return MoveIntent::IDLE;
    }
    enemy.ai = AiState::Chasing { target: target.id };
    let dx = target.position.x - position.x;
    let axis = if dx.abs() < ARRIVE_DISTANCE {
        0.0
    } else {
        dx.signum()
    };
    MoveIntent::walk(axis).with_jump(enemy.stats.hop_impulse.is_some())
}

fn in_attack_range(
    stats: &ArchetypeStats,
    transform: &Transform,
    target: &Candidate,
    view: &WorldView,
) -> bool {
    if let AttackKind::Melee {
        probe_offset,
        reach,
        ..
    } = stats.attack
    {
        let direction = transform.facing.direction();
        let origin = transform.position + direction * probe_offset;
        return view
            .raycast(origin, direction, reach, Layers::FRIENDLY)
            .is_some();
    }
    let distance = transform.position.distance(target.position);
    distance > stats.min_attack_range && distance <= stats.attack_range
}

fn start_attack(
    id: ActorId,
    enemy: &mut EnemyComponents,
    target: &Candidate,
    out: &mut Vec<Output>,
) {
    let stats = &enemy.stats;
    enemy.attack_cooldown.start(stats.attack_cooldown);
    enemy.ai = AiState::Attacking(AttackPhase::new(
        target.id,
        target.position,
        stats.windup,
        stats.recovery,
    ));
    trace!(enemy = %id, target = %target.id, "attack started");
    out.push(Cue::Attack { actor: id }.into());
    if matches!(stats.attack, AttackKind::Explode { .. }) {
        out.push(
            Presentation::DamageFlash {
                actor: id,
                color: FlashColor::Fuse,
                duration: stats.windup,
            }
            .into(),
        );
    }
}

fn contact_damage(
    id: ActorId,
    transform: &Transform,
    enemy: &mut EnemyComponents,
    view: &WorldView,
    dt: f32,
    out: &mut Vec<Output>,
) {
    let Some(contact) = enemy.stats.contact else {
        return;
    };
    enemy.contact_cooldown.tick(dt);
    if enemy.contact_cooldown.is_running() {
        return;
    }
    let touching = view.overlap_circle(transform.position, contact.radius, Layers::FRIENDLY);
    if touching.is_empty() {
        return;
    }
    for target in touching {
        out.push(
            DamageEvent::new(target, contact.damage, DamageKind::Contact)
                .with_source(id)
                .into(),
        );
    }
    enemy.contact_cooldown.start(contact.cooldown);
}

fn deliver(
    id: ActorId,
    transform: &Transform,
    stats: &ArchetypeStats,
    phase: &AttackPhase,
    view: &WorldView,
    out: &mut Vec<Output>,
) {
    let position = transform.position;
    match stats.attack {
        AttackKind::Melee {
            probe_offset,
            reach,
            damage,
        } => {
            let direction = transform.facing.direction();
            let origin = position + direction * probe_offset;
            if let Some((target, _)) = view.raycast(origin, direction, reach, Layers::FRIENDLY) {
                out.push(
                    DamageEvent::new(target, damage, DamageKind::Strike)
                        .with_source(id)
                        .into(),
                );
            }
        }
        AttackKind::Spin { radius, damage } => {
            for target in view.overlap_circle(position, radius, Layers::FRIENDLY) {
                out.push(
                    DamageEvent::new(target, damage, DamageKind::Strike)
                        .with_source(id)
                        .into(),
                );
            }
        }
        AttackKind::Shoot {
            pattern,
            speed,
            lifetime,
            damage,
            stops_on_terrain,
        } => {
            let (kind, directions) = match pattern {
                FirePattern::Aimed => {
                    let aim = view
                        .living(phase.target)
                        .map_or(phase.aim, |target| target.position);
                    let direction = (aim - position)
                        .try_normalize()
                        .unwrap_or_else(|| transform.facing.direction());
                    (ProjectileKind::SlimeShot, vec![direction])
                }
                FirePattern::Omni => (
                    ProjectileKind::Spike,
                    vec![Vec2::NEG_X, Vec2::X, Vec2::Y],
                ),
            };
            for direction in directions {
                let mut spec = ProjectileSpec::straight(
                    kind,
                    id,
                    position,
                    direction * speed,
                    damage,
                    Layers::FRIENDLY,
                    lifetime,
                );
                spec.stops_on_terrain = stops_on_terrain;
                out.push(Output::Spawn(spec));
            }
            out.push(Cue::Shot { actor: id }.into());
        }
        AttackKind::Explode { radius, damage } => {
            out.push(Cue::Explosion { position }.into());
            // The blast spares allies even when one was the chase target.
            for target in view.overlap_circle(position, radius, Layers::PLAYER | Layers::SLIME) {
                if target != id {
                    out.push(
                        DamageEvent::new(target, damage, DamageKind::Explosion)
                            .with_source(id)
                            .into(),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorInner, AllyComponents, Archetype, PlayerComponents};
    use crate::config::{AllyTuning, PlayerTuning};
    use crate::registry::ActorRegistry;

    const DT: f32 = 1.0 / 60.0;

    struct Arena {
        registry: ActorRegistry,
        player: ActorId,
    }

    fn arena(player_x: f32) -> Arena {
        let mut registry = ActorRegistry::new();
        let tuning = PlayerTuning::default();
        let player = registry.spawn(
            Transform::new(Vec2::new(player_x, 0.9), tuning.half_extents),
            ActorInner::Player(PlayerComponents::new(&tuning, Vec2::ZERO)),
        );
        Arena { registry, player }
    }

    fn add_enemy(arena: &mut Arena, archetype: Archetype, x: f32) -> ActorId {
        let stats = ArchetypeStats::preset(archetype);
        arena.registry.spawn(
            Transform::new(Vec2::new(x, 0.9), stats.half_extents),
            ActorInner::Enemy(EnemyComponents::new(archetype, stats)),
        )
    }

    /// Runs think then act for one enemy and returns its outputs.
    fn tick(arena: &mut Arena, id: ActorId) -> (MoveIntent, Vec<Output>) {
        let mut out = Vec::new();
        let view = WorldView::capture(&arena.registry);
        let actor = arena.registry.get_mut(id).unwrap();
        let (transform, _, inner) = actor.parts_mut();
        let ActorInner::Enemy(enemy) = inner else {
            panic!("not an enemy");
        };
        let intent = think(id, transform, enemy, &view, DT, &mut out);
        let view = WorldView::capture(&arena.registry);
        let actor = arena.registry.get_mut(id).unwrap();
        let (transform, _, inner) = actor.parts_mut();
        let ActorInner::Enemy(enemy) = inner else {
            panic!("not an enemy");
        };
        act(id, transform, enemy, &view, DT, &mut out);
        (intent, out)
    }

    fn damage_targets(outputs: &[Output]) -> Vec<ActorId> {
        outputs
            .iter()
            .filter_map(|output| match output {
                Output::Damage(event) => Some(event.target()),
                _ => None,
            })
            .collect()
    }

    fn ai(arena: &Arena, id: ActorId) -> AiState {
        arena.registry.get(id).unwrap().as_enemy().unwrap().ai
    }

    mod chase_tests {
        use super::*;

        #[test]
        fn idle_without_target() {
            let mut arena = arena(50.0);
            let slime = add_enemy(&mut arena, Archetype::BlueSlime, 0.0);
            let (intent, out) = tick(&mut arena, slime);
            assert_eq!(intent, MoveIntent::IDLE);
            assert!(out.is_empty());
            assert_eq!(ai(&arena, slime), AiState::Idle);
        }

        #[test]
        fn chases_and_faces_target() {
            let mut arena = arena(-4.0);
            let slime = add_enemy(&mut arena, Archetype::BlueSlime, 0.0);
            let (intent, _) = tick(&mut arena, slime);
            assert_eq!(intent.axis, -1.0);
            assert!(intent.jump, "blue slimes hop while chasing");
            assert_eq!(
                ai(&arena, slime),
                AiState::Chasing {
                    target: arena.player
                }
            );
            assert_eq!(
                arena.registry.get(slime).unwrap().transform.facing,
                Facing::Left
            );
        }

        #[test]
        fn prefers_ally_over_closer_player() {
            let mut arena = arena(1.0);
            let tuning = AllyTuning::default();
            let ally = arena.registry.spawn(
                Transform::new(Vec2::new(-3.0, 0.9), tuning.half_extents),
                ActorInner::Ally(AllyComponents::new(&tuning, Vec2::ZERO)),
            );
            let slime = add_enemy(&mut arena, Archetype::RedSlime, 5.0);
            let (_, _) = tick(&mut arena, slime);
            assert_eq!(ai(&arena, slime).target(), Some(ally));
        }
    }

    mod attack_tests {
        use super::*;

        #[test]
        fn melee_hits_once_per_cycle() {
            let mut arena = arena(1.5);
            let slime = add_enemy(&mut arena, Archetype::BlueSlime, 0.0);
            let mut hits = Vec::new();
            for _ in 0..36 {
                let (_, out) = tick(&mut arena, slime);
                hits.extend(damage_targets(&out));
            }
            assert_eq!(hits, vec![arena.player]);
        }

        #[test]
        fn cooldown_gates_the_next_attack() {
            let mut arena = arena(1.5);
            let slime = add_enemy(&mut arena, Archetype::BlueSlime, 0.0);
            let mut attack_cues = 0;
            for _ in 0..60 {
                let (_, out) = tick(&mut arena, slime);
                attack_cues += out
                    .iter()
                    .filter(|o| matches!(o, Output::Cue(Cue::Attack { .. })))
                    .count();
            }
            assert_eq!(attack_cues, 1, "1.0s cooldown allows one attack per 60 ticks");
        }

        #[test]
        fn ranged_spawns_aimed_projectile() {
            let mut arena = arena(4.0);
            let slime = add_enemy(&mut arena, Archetype::RedSlime, 0.0);
            let mut spawns = Vec::new();
            for _ in 0..20 {
                let (_, out) = tick(&mut arena, slime);
                spawns.extend(out.into_iter().filter_map(|o| match o {
                    Output::Spawn(spec) => Some(spec),
                    _ => None,
                }));
            }
            assert_eq!(spawns.len(), 1);
            assert_eq!(spawns[0].kind, ProjectileKind::SlimeShot);
            assert!(spawns[0].velocity.x > 0.0);
            assert!(spawns[0].stops_on_terrain);
        }

        #[test]
        fn cactus_fires_three_spikes_only_beyond_min_range() {
            let mut near = arena(3.0);
            let cactus = add_enemy(&mut near, Archetype::CactusSlime, 0.0);
            let (_, out) = tick(&mut near, cactus);
            assert!(!out.iter().any(|o| matches!(o, Output::Spawn(_))));

            let mut far = arena(10.0);
            let cactus = add_enemy(&mut far, Archetype::CactusSlime, 0.0);
            let (_, out) = tick(&mut far, cactus);
            let spikes = out.iter().filter(|o| matches!(o, Output::Spawn(_))).count();
            assert_eq!(spikes, 3);
            assert_eq!(ai(&far, cactus), AiState::Idle);
        }

        #[test]
        fn recovery_returns_to_chasing_a_target_still_in_range() {
            let mut arena = arena(4.0);
            let slime = add_enemy(&mut arena, Archetype::RedSlime, 0.0);
            tick(&mut arena, slime);
            assert!(matches!(ai(&arena, slime), AiState::Attacking(_)));

            let after_recovery = (0..120).find_map(|_| {
                tick(&mut arena, slime);
                let state = ai(&arena, slime);
                (!matches!(state, AiState::Attacking(_))).then_some(state)
            });
            assert_eq!(
                after_recovery,
                Some(AiState::Chasing {
                    target: arena.player
                })
            );
        }

        #[test]
        fn cactus_touch_damage_respects_cooldown() {
            let mut arena = arena(0.5);
            let cactus = add_enemy(&mut arena, Archetype::CactusSlime, 0.0);
            let mut touches = 0;
            for _ in 0..61 {
                let (_, out) = tick(&mut arena, cactus);
                touches += out
                    .iter()
                    .filter(|o| matches!(o, Output::Damage(e) if e.kind() == DamageKind::Contact))
                    .count();
            }
            assert_eq!(touches, 2);
        }

        #[test]
        fn spin_hits_everyone_around() {
            let mut arena = arena(1.0);
            let tuning = AllyTuning::default();
            let ally = arena.registry.spawn(
                Transform::new(Vec2::new(-1.0, 0.9), tuning.half_extents),
                ActorInner::Ally(AllyComponents::new(&tuning, Vec2::ZERO)),
            );
            let scientist = add_enemy(&mut arena, Archetype::Scientist, 0.0);
            let mut hits = Vec::new();
            for _ in 0..30 {
                let (_, out) = tick(&mut arena, scientist);
                hits.extend(damage_targets(&out));
            }
            hits.sort();
            assert_eq!(hits, vec![arena.player, ally]);
        }
    }

    mod explosion_tests {
        use super::*;

        #[test]
        fn bomb_hits_each_target_once_then_dies() {
            let mut arena = arena(1.0);
            let bomb = add_enemy(&mut arena, Archetype::BombSlime, 0.0);
            let neighbour = add_enemy(&mut arena, Archetype::BlueSlime, -1.0);

            let mut hits = Vec::new();
            let mut explosions = 0;
            for _ in 0..40 {
                let (_, out) = tick(&mut arena, bomb);
                hits.extend(damage_targets(&out));
                explosions += out
                    .iter()
                    .filter(|o| matches!(o, Output::Cue(Cue::Explosion { .. })))
                    .count();
            }
            hits.sort();
            assert_eq!(hits, vec![arena.player, neighbour]);
            assert_eq!(explosions, 1);
            assert_eq!(ai(&arena, bomb), AiState::Dead);
            assert!(!arena.registry.get(bomb).unwrap().is_alive());
        }

        #[test]
        fn fuse_flashes_at_trigger() {
            let mut arena = arena(1.0);
            let bomb = add_enemy(&mut arena, Archetype::BombSlime, 0.0);
            let (_, out) = tick(&mut arena, bomb);
            assert!(out.iter().any(|o| matches!(
                o,
                Output::Present(Presentation::DamageFlash {
                    color: FlashColor::Fuse,
                    ..
                })
            )));
        }
    }
}
