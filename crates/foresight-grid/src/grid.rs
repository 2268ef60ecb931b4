//! OccupancyGrid: dense space-time blocked/free cells around an anchor.

use glam::DVec2;

use foresight_core::config::GridParams;
use foresight_core::types::{GridCoords, SpacetimePoint};

use crate::layout::{GridLayout, GridShape, RebuildDecision};

/// Dense (x, t, y) boolean grid of predicted hazard occupancy.
///
/// A cell is write-once-true within one refresh cycle: nothing but a
/// [`rebuild`](Self::rebuild) sets it back to free.
#[derive(Debug, Clone, Default)]
pub struct OccupancyGrid {
    pub(crate) layout: GridLayout,
    /// Shape the storage was last built for. None before the first rebuild.
    built: Option<GridShape>,
    pub(crate) cells: Vec<bool>,
    pub(crate) record_samples: bool,
    pub(crate) samples: Vec<SpacetimePoint>,
}

impl OccupancyGrid {
    /// Build a grid for `params` centred on `anchor`.
    pub fn new(params: &GridParams, anchor: DVec2) -> Self {
        let mut grid = Self::default();
        grid.rebuild_with(params, anchor);
        grid
    }

    /// Re-anchor and clear the grid for a new refresh cycle.
    ///
    /// Storage and the coordinate cache are only rebuilt when a shape
    /// parameter or the anchor differs from the previous call. Either way
    /// all cells end up free, so any path computed on the old contents is
    /// stale.
    pub fn rebuild(
        &mut self,
        cell_size: f64,
        radius: u32,
        duration: f64,
        time_step: f64,
        anchor: DVec2,
    ) -> RebuildDecision {
        let shape = GridShape {
            cell_size,
            radius,
            duration,
            time_step,
            anchor,
        };
        let decision = shape.decide(self.built.as_ref());
        match decision {
            RebuildDecision::Reuse => self.cells.fill(false),
            RebuildDecision::Reallocate => {
                self.layout = GridLayout::new(shape);
                self.cells = vec![false; self.layout.cell_count()];
                self.built = Some(shape);
                log::debug!(
                    "occupancy grid reallocated: {}x{}x{} cells, anchor ({:.2}, {:.2})",
                    self.layout.side,
                    self.layout.steps,
                    self.layout.side,
                    anchor.x,
                    anchor.y
                );
            }
        }
        self.samples.clear();
        decision
    }

    /// [`rebuild`](Self::rebuild) from a [`GridParams`] section.
    pub fn rebuild_with(&mut self, params: &GridParams, anchor: DVec2) -> RebuildDecision {
        self.rebuild(
            params.cell_size,
            params.radius,
            params.horizon_secs,
            params.time_step_secs,
            anchor,
        )
    }

    /// World centre and slice start time of a cell.
    pub fn cell_to_world(&self, coords: GridCoords) -> SpacetimePoint {
        self.layout.cell_to_world(coords)
    }

    /// Nearest cell to a world position at `time`. Callers check [`in_bounds`](Self::in_bounds).
    pub fn world_to_cell(&self, position: DVec2, time: f64) -> GridCoords {
        self.layout.world_to_cell(position, time)
    }

    pub fn in_bounds(&self, coords: GridCoords) -> bool {
        self.layout.in_bounds(coords)
    }

    /// True if the cell is in bounds and blocked.
    pub fn is_occupied(&self, coords: GridCoords) -> bool {
        self.layout.index(coords).is_some_and(|i| self.cells[i])
    }

    /// Block a cell directly. Returns true if it was newly blocked.
    pub fn mark_occupied(&mut self, coords: GridCoords) -> bool {
        match self.layout.index(coords) {
            Some(i) if !self.cells[i] => {
                self.cells[i] = true;
                true
            }
            _ => false,
        }
    }

    /// Every blocked cell, in buffer order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridCoords> + '_ {
        let (side, steps) = (self.layout.side, self.layout.steps);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &hit)| hit)
            .map(move |(i, _)| {
                let y = i % side;
                let t = (i / side) % steps;
                let x = i / (side * steps);
                GridCoords::new(x as i32, t as i32, y as i32)
            })
    }

    /// Blocked cells on one time slice. Empty for an out-of-range slice.
    pub fn slice(&self, t: i32) -> impl Iterator<Item = GridCoords> + '_ {
        self.occupied_cells().filter(move |c| c.t == t)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&hit| hit).count()
    }

    /// Raw cell buffer, indexed `((x * time_steps) + t) * side + y`.
    pub fn mask(&self) -> &[bool] {
        &self.cells
    }

    /// Keep every sampled hazard position until the next rebuild.
    pub fn set_record_samples(&mut self, record: bool) {
        self.record_samples = record;
        if !record {
            self.samples.clear();
        }
    }

    /// Hazard positions sampled since the last rebuild (if recording).
    pub fn samples(&self) -> &[SpacetimePoint] {
        &self.samples
    }

    pub fn shape(&self) -> &GridShape {
        &self.layout.shape
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn anchor(&self) -> DVec2 {
        self.layout.shape.anchor
    }

    pub fn cell_size(&self) -> f64 {
        self.layout.shape.cell_size
    }

    pub fn time_step(&self) -> f64 {
        self.layout.shape.time_step
    }

    pub fn duration(&self) -> f64 {
        self.layout.shape.duration
    }

    /// Spatial cells per side (`2 * radius + 1`).
    pub fn side_length(&self) -> usize {
        self.layout.side
    }

    pub fn time_step_count(&self) -> usize {
        self.layout.steps
    }

    /// World extent of one spatial axis (meters).
    pub fn world_width(&self) -> f64 {
        self.layout.total_width
    }

    /// Extent of the time axis (seconds).
    pub fn world_height(&self) -> f64 {
        self.layout.steps as f64 * self.layout.shape.time_step
    }

    /// True when the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
