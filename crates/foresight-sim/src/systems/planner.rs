//! Planner refresh: rebuild the occupancy grid and re-plan the actor's path.
//!
//! The grid and the path refresh on independent timers. Both fire on the
//! first tick so the actor has a plan immediately.

use std::f64::consts::SQRT_2;

use glam::DVec2;
use hecs::World;

use foresight_core::config::{NeighborModel, PlannerConfig, SearchConfig};
use foresight_core::constants::DT;
use foresight_core::types::GridCoords;
use foresight_grid::{OccupancyGrid, RebuildDecision};
use foresight_predict::Hazard;
use foresight_search::{find_path, SearchOutcome};

use crate::components::{Actor, HazardBody, WorldPosition};
use crate::world_setup::actor_position;

/// Grid, last path and refresh timers carried between ticks.
#[derive(Debug)]
pub struct PlannerState {
    pub grid: OccupancyGrid,
    pub path: Option<SearchOutcome>,
    pub last_rebuild: Option<RebuildDecision>,
    since_grid_refresh: f64,
    since_path_refresh: f64,
    hazards: Vec<Hazard>,
}

impl PlannerState {
    pub fn new(config: &PlannerConfig) -> Self {
        let mut grid = OccupancyGrid::new(&config.grid, config.actor.start);
        grid.set_record_samples(config.record_samples);
        Self {
            grid,
            path: None,
            last_rebuild: None,
            since_grid_refresh: config.grid_refresh_secs,
            since_path_refresh: config.path_refresh_secs,
            hazards: Vec::new(),
        }
    }
}

/// What the planner did this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub grid_rebuilt: bool,
    pub path_searched: bool,
}

/// Run whichever refreshes are due.
pub fn run(world: &mut World, config: &PlannerConfig, state: &mut PlannerState, now: f64) -> RefreshReport {
    let mut report = RefreshReport::default();
    let Some(actor_pos) = actor_position(world) else {
        return report;
    };

    state.since_grid_refresh += DT;
    state.since_path_refresh += DT;

    if state.since_grid_refresh >= config.grid_refresh_secs {
        state.since_grid_refresh -= config.grid_refresh_secs;
        refresh_grid(world, config, state, actor_pos, now);
        report.grid_rebuilt = true;
    }

    if state.since_path_refresh >= config.path_refresh_secs {
        state.since_path_refresh -= config.path_refresh_secs;
        let waypoint = refresh_path(config, state, actor_pos);
        for (_entity, actor) in world.query_mut::<&mut Actor>() {
            actor.waypoint = waypoint;
        }
        report.path_searched = true;
    }

    report
}

/// Re-anchor the grid on the actor and rasterize every live hazard,
/// inflated by the actor's radius.
fn refresh_grid(world: &World, config: &PlannerConfig, state: &mut PlannerState, anchor: DVec2, now: f64) {
    state.last_rebuild = Some(state.grid.rebuild_with(&config.grid, anchor));

    state.hazards.clear();
    for (_entity, (pos, body)) in world.query::<(&WorldPosition, &HazardBody)>().iter() {
        state
            .hazards
            .push(body.predict(pos.0, now).inflated(config.actor.radius));
    }

    let marked = state
        .grid
        .rasterize_all(&state.hazards, config.grid.sample_resolution);
    log::debug!(
        "grid refresh at t={now:.2}: {} hazards, {marked} cells blocked",
        state.hazards.len()
    );
}

/// Search from the actor's cell to the goal cell and pick the next waypoint.
fn refresh_path(config: &PlannerConfig, state: &mut PlannerState, actor: DVec2) -> Option<DVec2> {
    let grid = &state.grid;
    let Some(start) = clamp_into(grid, grid.world_to_cell(actor, 0.0)) else {
        state.path = None;
        return None;
    };
    let Some(target) = target_cell(grid, start, config.actor.goal, &config.search) else {
        state.path = None;
        return None;
    };

    state.path = find_path(grid, start, target, &config.search);
    match &state.path {
        Some(path) => {
            log::info!(
                "path {start} -> {target}: {} nodes, reached {}, {} iterations",
                path.chain_len(),
                path.reached_target,
                path.iterations
            );
            Some(waypoint(grid, path))
        }
        None => {
            log::info!("path {start} -> {target}: none");
            None
        }
    }
}

/// Cell nearest `goal`, clamped into the grid, on the earliest slice the
/// actor could reach it from `start` at full speed.
///
/// The slice is at least 1, so the path always says where to be after one
/// step, and at most the last slice.
pub fn target_cell(
    grid: &OccupancyGrid,
    start: GridCoords,
    goal: DVec2,
    search: &SearchConfig,
) -> Option<GridCoords> {
    let last = grid.time_step_count().checked_sub(1)? as i32;
    let cell = clamp_into(grid, grid.world_to_cell(goal, 0.0))?;

    let (dx, dy) = ((cell.x - start.x).abs() as f64, (cell.y - start.y).abs() as f64);
    let moves = match search.neighbors {
        NeighborModel::Cardinal => dx + dy,
        NeighborModel::Octile => dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy),
    };
    let per_slice = search.movement_speed * grid.time_step() / grid.cell_size();
    let slices = (moves / per_slice).ceil();
    let t = if slices.is_finite() {
        (slices as i32).clamp(1_i32.min(last), last)
    } else {
        last
    };
    Some(GridCoords::new(cell.x, t, cell.y))
}

/// Clamp coordinates onto the grid. None when the grid has no cells.
pub fn clamp_into(grid: &OccupancyGrid, coords: GridCoords) -> Option<GridCoords> {
    if grid.is_empty() {
        return None;
    }
    let side = grid.side_length() as i32 - 1;
    let last = grid.time_step_count() as i32 - 1;
    Some(GridCoords::new(
        coords.x.clamp(0, side),
        coords.t.clamp(0, last),
        coords.y.clamp(0, side),
    ))
}

/// World position of the first node on slice 1, or of the terminal node
/// when the path never leaves slice 0.
pub fn waypoint(grid: &OccupancyGrid, path: &SearchOutcome) -> DVec2 {
    let coords = path.to_coords();
    let next = coords
        .iter()
        .find(|c| c.t == 1)
        .copied()
        .unwrap_or(path.terminal().position);
    grid.cell_to_world(next).position
}
