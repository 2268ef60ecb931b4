//! Space-time occupancy grid for FORESIGHT.
//!
//! A dense (x, t, y) boolean grid anchored at a world position. Hazard
//! predictors are rasterized into it once per refresh cycle; the path
//! search then reads it.

pub mod grid;
pub mod layout;
mod raster;

pub use foresight_core as core;

pub use grid::OccupancyGrid;
pub use layout::{GridLayout, GridShape, RebuildDecision};
