//! Search nodes and their arena handles.

use serde::{Deserialize, Serialize};

use foresight_core::types::GridCoords;

/// Index of a node in the search arena.
pub type NodeId = usize;

/// One visited space-time cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathFindNode {
    pub position: GridCoords,
    /// Predecessor on the best known route. None for the start node.
    pub parent: Option<NodeId>,
    /// Accumulated cost from the start.
    pub g: f64,
    /// Heuristic estimate to the target.
    pub h: f64,
    /// Frontier key derived from `g`, `h` and the position.
    pub priority: f64,
    /// Spatial cells travelled since entering the current time slice.
    pub distance_in_slice: f64,
}

impl PathFindNode {
    /// The start node: zero cost, zero distance in slice, no parent.
    pub fn start(position: GridCoords, h: f64, priority: f64) -> Self {
        Self {
            position,
            parent: None,
            g: 0.0,
            h,
            priority,
            distance_in_slice: 0.0,
        }
    }

    /// `g + h`.
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}
