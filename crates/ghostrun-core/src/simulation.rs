//! The fixed-tick driver.
//!
//! Every [`Simulation::step`] runs the same phases in the same order:
//!
//! 1. **Input**: press edges from the snapshot
//! 2. **Think**: player intent, escort timers, enemy target selection
//! 3. **Locomotion**: ground-bound actors move
//! 4. **Combat**: attacks, projectiles, contact damage, the boss loop
//! 5. **Damage**: outputs are sorted and handed to the resolvers
//! 6. **Lifecycle**: death timers, respawn, removal, encounter reset,
//!    checkpoint markers
//! 7. **Animation**: one tag per actor; changes go to presentation
//! 8. **Flush**: the frame goes to the sinks
//!
//! Think and Combat each read a [`WorldView`] captured at the start of the
//! phase, so what one actor sees never depends on iteration order.
//!
//! # Determinism
//!
//! Actors are visited in id order, outputs are sorted by
//! `(source, sequence)` before resolution, and the only randomness (boss
//! waypoints) comes from a `ChaCha8Rng` seeded by the caller. The same seed
//! and inputs always produce the same state.
//!
//! # Example
//!
//! ```
//! use ghostrun_core::config::SimConfig;
//! use ghostrun_core::input::InputSnapshot;
//! use ghostrun_core::simulation::Simulation;
//! use ghostrun_core::terrain::BoxTerrain;
//! use glam::Vec2;
//!
//! let mut sim = Simulation::new(SimConfig::default(), BoxTerrain::flat(0.0), 42).unwrap();
//! let player = sim.spawn_player(Vec2::new(0.0, 0.9));
//!
//! for _ in 0..10 {
//!     sim.step(&InputSnapshot::moving(1.0));
//! }
//!
//! assert_eq!(sim.tick(), 10);
//! assert!(sim.actor(player).unwrap().transform.position.x > 0.0);
//! ```

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::actor::{
    Actor, ActorId, ActorInner, ActorKind, AllyComponents, Archetype, BossComponents,
    EnemyComponents, PlayerComponents, Transform,
};
use crate::ai::{enemy, escort, AiState};
use crate::animation::{self, AnimationInputs};
use crate::checkpoint::{CheckpointMarker, CheckpointStore};
use crate::combat::{DamageEvent, DamageKind, LifeTick, ProjectileComponents, ProjectileStep};
use crate::config::SimConfig;
use crate::error::ConfigResult;
use crate::input::{InputEdges, InputSnapshot, InputTracker};
use crate::locomotion::{self, LocomotionParams, MoveIntent};
use crate::output::{Cue, Frame, Output, OutputQueue, OutputSource, Presentation, Signal};
use crate::player;
use crate::registry::ActorRegistry;
use crate::resolver::{self, Resolver};
use crate::scene::Scene;
use crate::sink::{AudioSink, NullSink, PresentationSink};
use crate::terrain::TerrainProbe;
use crate::world_view::WorldView;

/// Terrain handed to the simulation.
pub type SharedTerrain = Box<dyn TerrainProbe + Send + Sync>;

// =============================================================================
// Simulation
// =============================================================================

/// Owns the scene and advances it one fixed tick at a time.
pub struct Simulation {
    scene: Scene,
    terrain: SharedTerrain,
    resolvers: Vec<Box<dyn Resolver>>,
    input: InputTracker,
    pending: Vec<(OutputSource, Output)>,
    rng: ChaCha8Rng,
    seed: u64,
    tick: u64,
    presentation: Box<dyn PresentationSink>,
    audio: Box<dyn AudioSink>,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("scene", &self.scene)
            .field("resolvers", &format!("[{} resolvers]", self.resolvers.len()))
            .field("pending", &self.pending.len())
            .field("seed", &self.seed)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

impl Simulation {
    /// Creates an empty simulation at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`](crate::error::ConfigError::Invalid)
    /// if `config` fails validation.
    pub fn new(
        config: SimConfig,
        terrain: impl TerrainProbe + Send + Sync + 'static,
        seed: u64,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            scene: Scene::new(config),
            terrain: Box::new(terrain),
            resolvers: resolver::default_chain(),
            input: InputTracker::new(),
            pending: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            tick: 0,
            presentation: Box::new(NullSink),
            audio: Box::new(NullSink),
        })
    }

    // -------------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------------

    /// Spawns the player. The first player position seeds the checkpoint.
    pub fn spawn_player(&mut self, position: Vec2) -> ActorId {
        let tuning = &self.scene.config.player;
        let id = self.scene.actors.spawn(
            Transform::new(position, tuning.half_extents),
            ActorInner::Player(PlayerComponents::new(tuning, position)),
        );
        self.scene.checkpoints.seed(position);
        debug!(player = %id, ?position, "player spawned");
        id
    }

    /// Spawns the escorted ally. The escort waits for [`Self::start_escort`].
    pub fn spawn_ally(&mut self, position: Vec2) -> ActorId {
        let tuning = &self.scene.config.ally;
        let id = self.scene.actors.spawn(
            Transform::new(position, tuning.half_extents),
            ActorInner::Ally(AllyComponents::new(tuning, position)),
        );
        debug!(ally = %id, ?position, "ally spawned");
        id
    }

    /// Spawns an enemy with its archetype's effective stats.
    pub fn spawn_enemy(&mut self, archetype: Archetype, position: Vec2) -> ActorId {
        let stats = self.scene.config.archetype(archetype);
        let id = self.scene.actors.spawn(
            Transform::new(position, stats.half_extents),
            ActorInner::Enemy(EnemyComponents::new(archetype, stats)),
        );
        debug!(enemy = %id, %archetype, ?position, "enemy spawned");
        id
    }

    /// Spawns the boss at `home` with its teleport waypoints.
    pub fn spawn_boss(&mut self, home: Vec2, waypoints: Vec<Vec2>) -> ActorId {
        let tuning = &self.scene.config.boss;
        let id = self.scene.actors.spawn(
            Transform::new(home, tuning.half_extents),
            ActorInner::Boss(BossComponents::new(tuning, home, waypoints)),
        );
        debug!(boss = %id, ?home, "boss spawned");
        id
    }

    /// Places a checkpoint marker in the level.
    pub fn add_checkpoint_marker(&mut self, marker: CheckpointMarker) {
        self.scene.markers.push(marker);
    }

    /// Moves the checkpoint explicitly.
    pub fn activate_checkpoint(&mut self, position: Vec2) {
        info!(?position, "checkpoint set by host");
        self.scene.checkpoints.set_checkpoint(position);
    }

    /// Starts the escort. Returns false without an ally or if already started.
    pub fn start_escort(&mut self) -> bool {
        self.change_escort(escort::EscortState::start)
    }

    /// Ends the escort for good.
    pub fn stop_escort(&mut self) -> bool {
        self.change_escort(escort::EscortState::stop)
    }

    fn change_escort(
        &mut self,
        change: impl FnOnce(&mut escort::EscortState) -> Option<escort::EscortMode>,
    ) -> bool {
        let Some(id) = self.scene.actors.ally_id() else {
            trace!("no ally to escort");
            return false;
        };
        let Some(ally) = self.scene.actors.get_mut(id).and_then(Actor::as_ally_mut) else {
            return false;
        };
        let mut out = Vec::new();
        let changed = change(&mut ally.escort);
        escort::announce(id, changed, &mut out);
        self.pending
            .extend(out.into_iter().map(|output| (OutputSource::Scene, output)));
        changed.is_some()
    }

    /// Starts the boss attack loop. Returns false if already engaged, dead,
    /// or not a boss.
    pub fn engage_boss(&mut self, id: ActorId) -> bool {
        let Some(boss) = self.scene.actors.get_mut(id).and_then(Actor::as_boss_mut) else {
            return false;
        };
        if !boss.health.is_alive() || !boss.state.engage() {
            return false;
        }
        info!(boss = %id, "boss engaged by host");
        self.pending
            .push((OutputSource::Scene, Signal::BossEngaged { actor: id }.into()));
        true
    }

    /// Delivers external damage (hazards) in the next Damage phase.
    /// Returns false, queueing nothing, if the target is not registered.
    pub fn queue_damage(&mut self, event: DamageEvent) -> bool {
        if !self.scene.actors.contains(event.target()) {
            trace!(target = %event.target(), "hazard damage for unknown actor dropped");
            return false;
        }
        self.pending.push((OutputSource::Scene, event.into()));
        true
    }

    /// Installs the presentation sink.
    pub fn set_presentation_sink(&mut self, sink: impl PresentationSink + 'static) {
        self.presentation = Box::new(sink);
    }

    /// Installs the audio/VFX sink.
    pub fn set_audio_sink(&mut self, sink: impl AudioSink + 'static) {
        self.audio = Box::new(sink);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Ticks completed so far.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Master seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.scene.config
    }

    /// Feedback from the last completed tick.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.scene.frame
    }

    /// Full scene state.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Every actor.
    #[must_use]
    pub fn actors(&self) -> &ActorRegistry {
        &self.scene.actors
    }

    /// One actor.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.scene.actors.get(id)
    }

    /// Mutable access for setup and tests. Gameplay changes belong in
    /// phases and resolvers.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.scene.actors.get_mut(id)
    }

    /// The shared checkpoint.
    #[must_use]
    pub fn checkpoints(&self) -> &CheckpointStore {
        &self.scene.checkpoints
    }

    /// Checkpoint markers and their activation state.
    #[must_use]
    pub fn markers(&self) -> &[CheckpointMarker] {
        &self.scene.markers
    }

    // -------------------------------------------------------------------------
    // Step
    // -------------------------------------------------------------------------

    /// Advances one tick and returns its frame.
    pub fn step(&mut self, input: &InputSnapshot) -> &Frame {
        let tick = self.tick;
        let dt = self.scene.config.dt;
        self.scene.frame = Frame::new(tick);

        let edges = self.input.update(input);
        let mut queue = OutputQueue::new(tick);
        for (source, output) in self.pending.drain(..) {
            queue.push(source, output);
        }

        let intents = think(&mut self.scene, input, &edges, dt, &mut queue);
        locomote(&mut self.scene, &*self.terrain, &intents, dt);
        combat(
            &mut self.scene,
            &*self.terrain,
            &mut self.rng,
            &edges,
            dt,
            &mut queue,
        );

        let outputs = queue.into_sorted();
        for resolver in &self.resolvers {
            let relevant: Vec<_> = outputs
                .iter()
                .filter(|envelope| resolver.handles().contains(&envelope.kind()))
                .collect();
            resolver.resolve(&relevant, &mut self.scene);
        }

        lifecycle(&mut self.scene, &edges, dt);
        animate(&mut self.scene);
        self.flush();

        self.tick += 1;
        &self.scene.frame
    }

    fn flush(&mut self) {
        let frame = &self.scene.frame;
        for hint in &frame.presentations {
            self.presentation.present(frame.tick, hint);
        }
        for cue in &frame.cues {
            self.audio.cue(frame.tick, cue);
        }
    }
}

// =============================================================================
// Phases
// =============================================================================

fn think(
    scene: &mut Scene,
    input: &InputSnapshot,
    edges: &InputEdges,
    dt: f32,
    queue: &mut OutputQueue,
) -> Vec<(ActorId, MoveIntent)> {
    let view = WorldView::capture(&scene.actors);
    let config = &scene.config;
    let mut intents = Vec::with_capacity(scene.actors.len());

    for actor in scene.actors.iter_mut() {
        let id = actor.id();
        let mut out = Vec::new();
        let (transform, _, inner) = actor.parts_mut();
        let intent = match inner {
            ActorInner::Player(components) => player::intent(components, input, edges),
            ActorInner::Ally(components) => {
                escort::think(id, components, edges.halt_toggle, &config.ally, dt, &mut out)
            }
            ActorInner::Enemy(components) => {
                enemy::think(id, transform, components, &view, dt, &mut out)
            }
            ActorInner::Boss(_) | ActorInner::Projectile(_) => continue,
        };
        queue.extend(OutputSource::Actor(id), out);
        intents.push((id, intent));
    }
    intents
}

fn locomote(
    scene: &mut Scene,
    terrain: &dyn TerrainProbe,
    intents: &[(ActorId, MoveIntent)],
    dt: f32,
) {
    let config = &scene.config;
    let player_params = LocomotionParams::player(config);
    let ally_params = LocomotionParams::ally(config);

    for &(id, intent) in intents {
        let Some(actor) = scene.actors.get_mut(id) else {
            continue;
        };
        if !actor.is_alive() {
            continue;
        }
        let (transform, body, inner) = actor.parts_mut();
        let report = match inner {
            ActorInner::Player(_) => {
                locomotion::step(transform, body, intent, &player_params, terrain, dt)
            }
            ActorInner::Ally(_) => {
                locomotion::step(transform, body, intent, &ally_params, terrain, dt)
            }
            ActorInner::Enemy(components) => {
                let params = LocomotionParams::enemy(&components.stats, config);
                locomotion::step(transform, body, intent, &params, terrain, dt)
            }
            ActorInner::Boss(_) | ActorInner::Projectile(_) => continue,
        };
        if report.climbed {
            trace!(actor = %id, "step climbed");
        }
    }
}

fn combat(
    scene: &mut Scene,
    terrain: &dyn TerrainProbe,
    rng: &mut ChaCha8Rng,
    edges: &InputEdges,
    dt: f32,
    queue: &mut OutputQueue,
) {
    let view = WorldView::capture(&scene.actors);
    let config = &scene.config;

    for actor in scene.actors.iter_mut() {
        let id = actor.id();
        let mut out = Vec::new();
        let (transform, body, inner) = actor.parts_mut();
        match inner {
            ActorInner::Player(components) => player::act(
                id,
                transform,
                body,
                components,
                edges,
                &view,
                &config.player,
                dt,
                &mut out,
            ),
            ActorInner::Ally(components) => {
                escort::act(id, transform, components, &view, &config.ally, &mut out);
            }
            ActorInner::Enemy(components) => {
                enemy::act(id, transform, components, &view, dt, &mut out);
            }
            ActorInner::Boss(components) => {
                if components.health.is_alive() {
                    components
                        .state
                        .act(id, transform, &view, rng, dt, &mut out);
                }
            }
            ActorInner::Projectile(components) => {
                let step = components.advance(transform, body, &view, terrain, dt);
                settle_projectile(id, components, transform.position, step, &mut out);
            }
        }
        queue.extend(OutputSource::Actor(id), out);
    }
}

fn settle_projectile(
    id: ActorId,
    projectile: &ProjectileComponents,
    position: Vec2,
    step: ProjectileStep,
    out: &mut Vec<Output>,
) {
    if let ProjectileStep::HitActor(target) = step {
        out.push(
            DamageEvent::new(target, projectile.damage, DamageKind::Projectile)
                .with_source(projectile.owner)
                .into(),
        );
    }
    if step == ProjectileStep::Flying {
        return;
    }
    if projectile.bursts {
        out.push(Cue::Explosion { position }.into());
    }
    out.push(Output::Despawn(id));
}

fn lifecycle(scene: &mut Scene, edges: &InputEdges, dt: f32) {
    let player_died = scene.frame.dead_players().next().is_some();

    for id in scene.actors.ids() {
        let Some(actor) = scene.actors.get_mut(id) else {
            continue;
        };
        match actor.health_mut().map(|health| health.tick(dt)) {
            Some(LifeTick::ReadyToRespawn) => respawn(scene, id),
            Some(LifeTick::ReadyToRemove) => remove(scene, id),
            _ => {}
        }
    }

    if player_died {
        reset_bosses(scene);
    }
    activate_markers(scene, edges);
}

fn respawn(scene: &mut Scene, id: ActorId) {
    let checkpoints = scene.checkpoints;
    let Some(actor) = scene.actors.get_mut(id) else {
        return;
    };
    let spawn_point = match actor.inner() {
        ActorInner::Player(player) => player.spawn_point,
        ActorInner::Ally(ally) => ally.spawn_point,
        _ => return,
    };
    if !actor.health_mut().is_some_and(|health| health.respawn()) {
        return;
    }
    let position = checkpoints.respawn_point(spawn_point);
    actor.transform.position = position;
    actor.body.freeze();

    let mut out = Vec::new();
    match actor.inner_mut() {
        ActorInner::Player(player) => {
            player.combat.reset();
            player.footstep.cancel();
        }
        ActorInner::Ally(ally) => escort::announce(id, ally.escort.resume(), &mut out),
        _ => {}
    }
    debug!(actor = %id, ?position, "respawned");
    scene.record(Cue::Respawn { actor: id });
    scene.record(Signal::Respawned { actor: id, position });
    for output in out {
        scene.record(output);
    }
}

fn remove(scene: &mut Scene, id: ActorId) {
    let Some(actor) = scene.actors.despawn(id) else {
        return;
    };
    let kind = actor.kind();
    let position = actor.transform.position;
    debug!(actor = %id, %kind, "removed");
    scene.record(Signal::ActorRemoved { actor: id, kind });
    if actor
        .as_boss()
        .is_some_and(|boss| boss.state.tuning().drops_reward)
    {
        debug!(?position, "boss reward dropped");
        scene.record(Signal::DropSpawned { position });
    }
}

fn reset_bosses(scene: &mut Scene) {
    for id in scene.actors.ids_of_kind(ActorKind::Boss) {
        let Some(actor) = scene.actors.get_mut(id) else {
            continue;
        };
        let (transform, body, inner) = actor.parts_mut();
        let ActorInner::Boss(boss) = inner else {
            continue;
        };
        if !boss.health.is_alive() {
            continue;
        }
        boss.health.restore();
        boss.state.reset();
        transform.position = boss.state.home();
        body.freeze();
        debug!(boss = %id, "encounter reset after player death");
        scene.record(Signal::BossReset { actor: id });
    }
}

fn activate_markers(scene: &mut Scene, edges: &InputEdges) {
    let Some(player) = scene
        .actors
        .player_id()
        .and_then(|id| scene.actors.get(id))
        .filter(|actor| actor.is_alive())
        .map(|actor| actor.transform.position)
    else {
        return;
    };
    let mut activated = Vec::new();
    for marker in &mut scene.markers {
        if marker.try_activate(player, edges.interact) {
            activated.push(marker.position);
        }
    }
    for position in activated {
        info!(?position, "checkpoint activated");
        scene.checkpoints.set_checkpoint(position);
        scene.record(Cue::CheckpointActivated { position });
        scene.record(Signal::CheckpointActivated { position });
    }
}

fn animate(scene: &mut Scene) {
    let Scene { actors, frame, .. } = scene;
    for actor in actors.iter_mut() {
        let attacking = match actor.inner() {
            ActorInner::Player(player) => player.combat.is_attacking(),
            ActorInner::Enemy(enemy) => matches!(enemy.ai, AiState::Attacking(_)),
            ActorInner::Boss(boss) => boss.state.is_winding_up(),
            ActorInner::Ally(_) => false,
            ActorInner::Projectile(_) => continue,
        };
        let inputs = AnimationInputs {
            alive: actor.is_alive(),
            attacking,
            hurt: actor.health().is_some_and(|health| health.is_hurt()),
            grounded: actor.body.grounded,
            wall_sliding: actor.body.wall_sliding,
            vertical_velocity: actor.body.velocity.y,
            horizontal_speed: actor.body.velocity.x.abs(),
            facing: actor.transform.facing,
            previous: actor.animation,
        };
        let tag = animation::resolve(&inputs);
        if actor.animation != Some(tag) {
            actor.animation = Some(tag);
            frame.record(&Presentation::Animation { actor: actor.id(), tag }.into());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimState;
    use crate::sink::RecordingSink;
    use crate::terrain::BoxTerrain;

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default(), BoxTerrain::flat(0.0), 7).unwrap()
    }

    mod setup_tests {
        use super::*;

        #[test]
        fn invalid_config_is_rejected() {
            let config = SimConfig::default().with_dt(0.0);
            assert!(Simulation::new(config, BoxTerrain::flat(0.0), 1).is_err());
        }

        #[test]
        fn first_player_seeds_checkpoint() {
            let mut sim = sim();
            sim.spawn_player(Vec2::new(2.0, 0.9));
            sim.spawn_player(Vec2::new(9.0, 0.9));
            assert_eq!(sim.checkpoints().last_checkpoint(), Some(Vec2::new(2.0, 0.9)));
        }

        #[test]
        fn host_calls_queue_scene_sourced_outputs() {
            let mut sim = sim();
            sim.spawn_ally(Vec2::new(0.0, 0.9));
            let boss = sim.spawn_boss(Vec2::new(10.0, 3.0), vec![Vec2::new(12.0, 3.0)]);
            assert!(sim.start_escort());
            assert!(sim.engage_boss(boss));
            assert!(sim.pending.len() >= 2);
            assert!(sim
                .pending
                .iter()
                .all(|(source, _)| *source == OutputSource::Scene));
        }

        #[test]
        fn hazard_damage_needs_a_registered_target() {
            let mut sim = sim();
            let player = sim.spawn_player(Vec2::new(0.0, 0.9));
            let stranger = ActorId::new(99);
            assert!(!sim.queue_damage(DamageEvent::new(stranger, 1, DamageKind::Hazard)));
            assert!(sim.pending.is_empty());
            assert!(sim.queue_damage(DamageEvent::new(player, 1, DamageKind::Hazard)));
            assert_eq!(sim.pending.len(), 1);
        }

        #[test]
        fn escort_needs_an_ally() {
            let mut sim = sim();
            assert!(!sim.start_escort());
            sim.spawn_ally(Vec2::new(0.0, 0.9));
            assert!(sim.start_escort());
            assert!(!sim.start_escort());
        }

        #[test]
        fn engage_boss_once() {
            let mut sim = sim();
            let boss = sim.spawn_boss(Vec2::new(5.0, 3.0), vec![]);
            assert!(sim.engage_boss(boss));
            assert!(!sim.engage_boss(boss));
            let frame = sim.step(&InputSnapshot::idle());
            assert!(frame.signals.contains(&Signal::BossEngaged { actor: boss }));
        }
    }

    mod step_tests {
        use super::*;

        #[test]
        fn tick_advances_and_frame_is_stamped() {
            let mut sim = sim();
            sim.step(&InputSnapshot::idle());
            let frame = sim.step(&InputSnapshot::idle());
            assert_eq!(frame.tick, 1);
            assert_eq!(sim.tick(), 2);
        }

        #[test]
        fn animation_changes_reach_the_sink() {
            let mut sim = sim();
            let recorder = RecordingSink::new();
            sim.set_presentation_sink(recorder.clone());
            let player = sim.spawn_player(Vec2::new(0.0, 0.9));

            sim.step(&InputSnapshot::idle());
            sim.step(&InputSnapshot::idle());
            let first = recorder.take_presentations();
            assert_eq!(first.len(), 1, "tag only sent when it changes");

            sim.step(&InputSnapshot::moving(1.0));
            let tag = sim.actor(player).unwrap().animation.unwrap();
            assert_eq!(tag.state, AnimState::Run);
        }

        #[test]
        fn queued_hazard_damage_lands_next_step() {
            let mut sim = sim();
            let player = sim.spawn_player(Vec2::new(0.0, 0.9));
            sim.queue_damage(DamageEvent::new(player, 2, DamageKind::Hazard));
            sim.step(&InputSnapshot::idle());
            let health = sim.actor(player).unwrap().health().unwrap().current();
            assert_eq!(health, 3);
        }
    }
}
