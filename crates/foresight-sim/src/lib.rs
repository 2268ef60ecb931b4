//! Host simulation for FORESIGHT.
//!
//! Owns a hecs world with one actor and the hazards an emitter throws at
//! it, runs systems at a fixed tick rate, refreshes the occupancy grid and
//! path on their own schedules, and produces a `SimSnapshot` every tick.

pub mod components;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use foresight_core as core;
pub use engine::SimulationEngine;
pub use systems::snapshot::SimSnapshot;

#[cfg(test)]
mod tests;
