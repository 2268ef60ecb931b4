//! Core types and definitions for FORESIGHT.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid coordinates, planner configuration, tuning constants and errors.
//! It has no dependency on the grid, the search or the host simulation.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::PlannerConfig;
pub use error::ConfigError;
pub use types::{GridCoords, SimTime, SpacetimePoint};
