//! Grid shape memoization and the derived cell geometry.
//!
//! `GridShape` is what the host asks for; `GridLayout` is everything
//! derived from it that rasterization and the search read on every cell.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use foresight_core::config::GridParams;
use foresight_core::types::{GridCoords, SpacetimePoint};

/// The parameters that decide the grid's shape and placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GridShape {
    /// Edge length of a spatial cell (meters).
    pub cell_size: f64,
    /// Cells from the anchor to the edge.
    pub radius: u32,
    /// Horizon covered by the time axis (seconds).
    pub duration: f64,
    /// Seconds per time slice.
    pub time_step: f64,
    /// World position of the grid centre.
    pub anchor: DVec2,
}

/// What a rebuild did with the existing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebuildDecision {
    /// Shape and anchor unchanged: storage kept, cells cleared.
    Reuse,
    /// Shape or anchor changed: storage and coordinate cache rebuilt.
    Reallocate,
}

impl GridShape {
    pub fn from_params(params: &GridParams, anchor: DVec2) -> Self {
        Self {
            cell_size: params.cell_size,
            radius: params.radius,
            duration: params.horizon_secs,
            time_step: params.time_step_secs,
            anchor,
        }
    }

    /// Compare against the shape the storage was last built for.
    pub fn decide(&self, previous: Option<&GridShape>) -> RebuildDecision {
        match previous {
            Some(previous) if previous == self => RebuildDecision::Reuse,
            _ => RebuildDecision::Reallocate,
        }
    }

    /// Spatial cells per side, or 0 when the cell size is unusable.
    pub fn side_length(&self) -> usize {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            2 * self.radius as usize + 1
        } else {
            0
        }
    }

    /// `round(duration / time_step)`, or 0 for a degenerate horizon.
    pub fn time_step_count(&self) -> usize {
        let steps = self.duration / self.time_step;
        if steps.is_finite() && steps > 0.0 {
            steps.round() as usize
        } else {
            0
        }
    }
}

/// Geometry derived from a [`GridShape`], with the per-cell centre cache.
#[derive(Debug, Clone, Default)]
pub struct GridLayout {
    pub(crate) shape: GridShape,
    pub(crate) side: usize,
    pub(crate) steps: usize,
    pub(crate) total_width: f64,
    /// World centre of cell (0, _, 0).
    pub(crate) origin: DVec2,
    /// World centre of every spatial cell, indexed `x * side + y`.
    pub(crate) centers: Vec<DVec2>,
}

impl GridLayout {
    pub fn new(shape: GridShape) -> Self {
        let side = shape.side_length();
        let steps = if side == 0 { 0 } else { shape.time_step_count() };
        let total_width = side as f64 * shape.cell_size;
        let origin = if side == 0 {
            shape.anchor
        } else {
            shape.anchor - DVec2::splat(total_width / 2.0) + DVec2::splat(shape.cell_size / 2.0)
        };

        let mut centers = Vec::with_capacity(side * side);
        for x in 0..side {
            for y in 0..side {
                centers.push(origin + DVec2::new(x as f64, y as f64) * shape.cell_size);
            }
        }

        Self {
            shape,
            side,
            steps,
            total_width,
            origin,
            centers,
        }
    }

    /// Number of cells in the flat buffer.
    pub fn cell_count(&self) -> usize {
        self.side * self.steps * self.side
    }

    /// Flat buffer index, `((x * steps) + t) * side + y`, or None out of bounds.
    pub fn index(&self, coords: GridCoords) -> Option<usize> {
        if !self.in_bounds(coords) {
            return None;
        }
        let (x, t, y) = (coords.x as usize, coords.t as usize, coords.y as usize);
        Some((x * self.steps + t) * self.side + y)
    }

    pub fn in_bounds(&self, coords: GridCoords) -> bool {
        in_extent(coords.x, self.side) && in_extent(coords.t, self.steps) && in_extent(coords.y, self.side)
    }

    /// World centre of the cell and the start time of its slice.
    ///
    /// Works for out-of-bounds coordinates too; the cache is only consulted
    /// for in-bounds cells.
    pub fn cell_to_world(&self, coords: GridCoords) -> SpacetimePoint {
        let position = if in_extent(coords.x, self.side) && in_extent(coords.y, self.side) {
            self.centers[coords.x as usize * self.side + coords.y as usize]
        } else {
            self.origin + DVec2::new(coords.x as f64, coords.y as f64) * self.shape.cell_size
        };
        SpacetimePoint::new(position, coords.t as f64 * self.shape.time_step)
    }

    /// Nearest cell to a world position and time. Not clamped.
    pub fn world_to_cell(&self, position: DVec2, time: f64) -> GridCoords {
        let local = (position - self.origin) / self.shape.cell_size;
        GridCoords::new(
            local.x.round() as i32,
            (time / self.shape.time_step).round() as i32,
            local.y.round() as i32,
        )
    }

    /// World-space rectangle covered by the spatial cells.
    pub fn world_bounds(&self) -> (DVec2, DVec2) {
        let half = DVec2::splat(self.total_width / 2.0);
        (self.shape.anchor - half, self.shape.anchor + half)
    }

    /// Half-size of one cell in the ground plane.
    pub fn half_extents(&self) -> DVec2 {
        DVec2::splat(self.shape.cell_size / 2.0)
    }
}

fn in_extent(value: i32, extent: usize) -> bool {
    value >= 0 && (value as usize) < extent
}
