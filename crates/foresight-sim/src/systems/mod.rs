//! ECS systems that operate on the host world each tick.
//!
//! Systems are plain functions over `&mut World`. State that outlives a
//! tick but is not an entity (spawn timer, grid, last path) is passed in.

pub mod actor;
pub mod emitter;
pub mod lifetime;
pub mod motion;
pub mod planner;
pub mod snapshot;
