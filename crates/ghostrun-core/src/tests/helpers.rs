//! Test setup utilities shared by the crate-level suites.

use glam::Vec2;

use crate::actor::{ActorId, Archetype};
use crate::ai::AiState;
use crate::config::SimConfig;
use crate::input::InputSnapshot;
use crate::output::{Cue, Frame, Signal};
use crate::simulation::Simulation;
use crate::terrain::BoxTerrain;

/// Standing height of a player or ally centre on the flat floor.
pub const TALL_Y: f32 = 0.9;
/// Standing height of a slime centre on the flat floor.
pub const SLIME_Y: f32 = 0.35;

/// Installs a test-writer subscriber so `RUST_LOG`-style output shows up
/// in failing tests. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Simulation on a flat floor at height 0.
pub fn flat_sim(seed: u64) -> Simulation {
    flat_sim_with(SimConfig::default(), seed)
}

/// Simulation with a custom config on a flat floor at height 0.
pub fn flat_sim_with(config: SimConfig, seed: u64) -> Simulation {
    init_tracing();
    Simulation::new(config, BoxTerrain::flat(0.0), seed).expect("valid test config")
}

/// Runs `ticks` steps with the same input and returns every frame.
pub fn run(sim: &mut Simulation, input: InputSnapshot, ticks: usize) -> Vec<Frame> {
    (0..ticks).map(|_| sim.step(&input).clone()).collect()
}

/// Current health, or `None` once the actor is gone.
pub fn health_of(sim: &Simulation, id: ActorId) -> Option<u32> {
    sim.actor(id)
        .and_then(|actor| actor.health())
        .map(crate::combat::Health::current)
}

/// Current position. Panics if the actor is gone.
pub fn position_of(sim: &Simulation, id: ActorId) -> Vec2 {
    sim.actor(id).expect("actor exists").transform.position
}

/// Enemy AI state. Panics if `id` is not a live enemy.
pub fn ai_of(sim: &Simulation, id: ActorId) -> AiState {
    sim.actor(id)
        .and_then(|actor| actor.as_enemy())
        .expect("enemy exists")
        .ai
}

/// Counts cues matching `pred` across frames.
pub fn count_cues(frames: &[Frame], pred: impl Fn(&Cue) -> bool) -> usize {
    frames.iter().flat_map(|f| &f.cues).filter(|c| pred(c)).count()
}

/// Counts signals matching `pred` across frames.
pub fn count_signals(frames: &[Frame], pred: impl Fn(&Signal) -> bool) -> usize {
    frames.iter().flat_map(|f| &f.signals).filter(|s| pred(s)).count()
}

/// Config where one archetype never notices anyone.
pub fn config_with_dummy(archetype: Archetype) -> SimConfig {
    let mut stats = SimConfig::default().archetype(archetype);
    stats.detection_radius = 0.0;
    SimConfig::default().with_archetype(archetype, stats)
}
