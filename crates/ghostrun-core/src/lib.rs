//! # Ghostrun Core
//!
//! Actor state and combat engine for the Ghostrun 2D side-scroller.
//!
//! One engine drives every actor (player, escorted ally, five enemy
//! archetypes, boss, projectiles) through a deterministic fixed tick.
//! Actors are data plus composable capabilities, not a type per enemy.
//!
//! ## Architecture
//!
//! - **Actors**: [`actor::Actor`] holds shared spatial state and
//!   role components; archetypes differ only in [`config::ArchetypeStats`]
//! - **Capabilities**: [`locomotion`], [`combat`], [`ai::targeting`],
//!   [`animation`]
//! - **Outputs**: behaviour emits [`output::Output`]s; [`resolver`]s apply
//!   them in the Damage phase
//! - **Shared context**: [`scene::Scene`] bundles the [`registry`] and the
//!   [`checkpoint`] store
//! - **Driver**: [`simulation::Simulation`] runs the phases in order
//!
//! ## Usage
//!
//! ```
//! use ghostrun_core::actor::Archetype;
//! use ghostrun_core::config::SimConfig;
//! use ghostrun_core::input::InputSnapshot;
//! use ghostrun_core::simulation::Simulation;
//! use ghostrun_core::terrain::BoxTerrain;
//! use glam::Vec2;
//!
//! let mut sim = Simulation::new(SimConfig::default(), BoxTerrain::flat(0.0), 1).unwrap();
//! sim.spawn_player(Vec2::new(0.0, 0.9));
//! sim.spawn_enemy(Archetype::BlueSlime, Vec2::new(4.0, 0.35));
//!
//! let frame = sim.step(&InputSnapshot::idle());
//! assert_eq!(frame.tick, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actor;
pub mod ai;
pub mod animation;
pub mod checkpoint;
pub mod combat;
pub mod config;
pub mod error;
pub mod input;
pub mod layers;
pub mod locomotion;
pub mod output;
pub mod player;
pub mod registry;
pub mod resolver;
pub mod scene;
pub mod simulation;
pub mod sink;
pub mod terrain;
pub mod timer;
pub mod world_view;

pub use actor::{Actor, ActorId, ActorKind, Archetype};
pub use config::SimConfig;
pub use error::{ConfigError, ConfigResult};
pub use input::InputSnapshot;
pub use output::Frame;
pub use simulation::Simulation;

#[cfg(test)]
mod tests;
