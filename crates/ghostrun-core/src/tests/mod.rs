//! Crate-level test suites.
//!
//! - `determinism.rs`: same seed and inputs give the same scene
//! - `integration.rs`: end-to-end scenarios through the step phases
//! - `properties.rs`: proptest checks on the capability invariants
//! - `helpers.rs`: setup and frame-counting utilities

mod helpers;
mod integration;
