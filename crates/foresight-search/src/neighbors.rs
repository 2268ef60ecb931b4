//! Legal successors of a search node.
//!
//! A successor is a spatial move within the current time slice or a single
//! step forward in time. It must be in bounds, free, not yet finalized, and
//! reachable at the actor's speed: the spatial distance covered inside one
//! slice may not exceed `movement_speed * time_step`.

use std::collections::HashMap;

use foresight_core::config::{NeighborModel, SearchConfig};
use foresight_core::types::GridCoords;
use foresight_grid::OccupancyGrid;

use crate::node::{NodeId, PathFindNode};

/// `(dx, dt, dy)` offsets for four-connected movement.
const CARDINAL: [(i32, i32, i32); 5] = [(1, 0, 0), (-1, 0, 0), (0, 0, 1), (0, 0, -1), (0, 1, 0)];

/// `(dx, dt, dy)` offsets for eight-connected movement.
const OCTILE: [(i32, i32, i32); 9] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 0, 1),
    (0, 0, -1),
    (1, 0, 1),
    (1, 0, -1),
    (-1, 0, 1),
    (-1, 0, -1),
    (0, 1, 0),
];

pub fn offsets(model: NeighborModel) -> &'static [(i32, i32, i32)] {
    match model {
        NeighborModel::Cardinal => &CARDINAL,
        NeighborModel::Octile => &OCTILE,
    }
}

/// A candidate successor and the slice distance it would carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Successor {
    pub position: GridCoords,
    pub distance_in_slice: f64,
}

/// Spatial cells covered in the current slice after moving by `(dx, dt, dy)`
/// from a node that has already covered `travelled`.
pub fn slice_distance(travelled: f64, dx: i32, dt: i32, dy: i32) -> f64 {
    let step = ((dx * dx + dy * dy) as f64).sqrt();
    if dt != 0 {
        step
    } else {
        travelled + step
    }
}

/// True if covering `distance` cells within one slice stays within the speed budget.
pub fn within_speed(distance: f64, cell_size: f64, time_step: f64, movement_speed: f64) -> bool {
    distance * cell_size / time_step <= movement_speed
}

/// Every legal successor of `node`.
pub fn successors<'a>(
    grid: &'a OccupancyGrid,
    node: &'a PathFindNode,
    config: &'a SearchConfig,
    closed: &'a HashMap<GridCoords, NodeId>,
) -> impl Iterator<Item = Successor> + 'a {
    let (cell_size, time_step) = (grid.cell_size(), grid.time_step());
    offsets(config.neighbors)
        .iter()
        .filter_map(move |&(dx, dt, dy)| {
            let position = node.position.offset(dx, dt, dy);
            if !grid.in_bounds(position)
                || grid.is_occupied(position)
                || closed.contains_key(&position)
            {
                return None;
            }
            let distance_in_slice = slice_distance(node.distance_in_slice, dx, dt, dy);
            within_speed(distance_in_slice, cell_size, time_step, config.movement_speed).then_some(
                Successor {
                    position,
                    distance_in_slice,
                },
            )
        })
}
