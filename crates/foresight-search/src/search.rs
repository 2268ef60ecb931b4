//! Best-first search through the space-time occupancy grid.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use foresight_core::config::SearchConfig;
use foresight_core::types::GridCoords;
use foresight_grid::OccupancyGrid;

use crate::frontier::Frontier;
use crate::neighbors::successors;
use crate::node::{NodeId, PathFindNode};
use crate::policy::{metric_distance, PriorityPolicy};

/// Result of a search: the node arena and the chain's terminal node.
///
/// The chain runs from `terminal` back to the start through parent links.
/// When the target was not reached, `terminal` is the finalized node on the
/// target's time slice that came closest to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    nodes: Vec<PathFindNode>,
    terminal: NodeId,
    pub reached_target: bool,
    /// Nodes expanded before the search returned.
    pub iterations: usize,
}

impl SearchOutcome {
    pub fn terminal(&self) -> &PathFindNode {
        &self.nodes[self.terminal]
    }

    pub fn node(&self, id: NodeId) -> Option<&PathFindNode> {
        self.nodes.get(id)
    }

    /// Every node the search created, including ones off the chain.
    pub fn nodes(&self) -> &[PathFindNode] {
        &self.nodes
    }

    /// Walk the chain from the terminal node back to the start.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            nodes: &self.nodes,
            next: Some(self.terminal),
        }
    }

    /// Chain positions ordered start → terminal.
    pub fn to_coords(&self) -> Vec<GridCoords> {
        let mut coords: Vec<_> = self.iter().map(|n| n.position).collect();
        coords.reverse();
        coords
    }

    /// Number of nodes on the chain, never less than 1.
    pub fn chain_len(&self) -> usize {
        self.iter().count()
    }
}

/// Iterator over a chain, terminal first.
pub struct ChainIter<'a> {
    nodes: &'a [PathFindNode],
    next: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a PathFindNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.parent;
        Some(node)
    }
}

/// Search from `start` to `target` using the config's priority convention.
pub fn find_path(
    grid: &OccupancyGrid,
    start: GridCoords,
    target: GridCoords,
    config: &SearchConfig,
) -> Option<SearchOutcome> {
    find_path_with(grid, start, target, config, &config.priority)
}

/// Search from `start` to `target`, ordering the frontier with `policy`.
///
/// Returns `None` when the start is outside the grid, the iteration budget
/// is zero, or the search ends without reaching the target and without
/// finalizing any node on the target's time slice.
pub fn find_path_with<P: PriorityPolicy + ?Sized>(
    grid: &OccupancyGrid,
    start: GridCoords,
    target: GridCoords,
    config: &SearchConfig,
    policy: &P,
) -> Option<SearchOutcome> {
    if !grid.in_bounds(start) || config.max_iterations == 0 {
        return None;
    }

    let metric = config.metric;
    let mut nodes: Vec<PathFindNode> = Vec::new();
    let mut closed: HashMap<GridCoords, NodeId> = HashMap::new();
    let mut frontier = Frontier::new();
    let mut best: Option<NodeId> = None;

    let h = metric_distance(metric, &start, &target);
    nodes.push(PathFindNode::start(start, h, policy.priority(0.0, h, start)));
    frontier.push(start, 0, nodes[0].priority);

    let mut iterations = 0;
    while iterations < config.max_iterations {
        let Some(current) = frontier.pop() else {
            break;
        };
        iterations += 1;

        let node = nodes[current];
        closed.insert(node.position, current);

        if node.position == target {
            return Some(SearchOutcome {
                nodes,
                terminal: current,
                reached_target: true,
                iterations,
            });
        }

        if node.position.same_slice(&target) && best.map_or(true, |b| node.h < nodes[b].h) {
            best = Some(current);
        }

        for next in successors(grid, &node, config, &closed) {
            let g = node.g + metric_distance(metric, &node.position, &next.position);
            match frontier.get(&next.position) {
                Some(pending) => {
                    let existing = &mut nodes[pending];
                    if g < existing.g {
                        existing.g = g;
                        existing.parent = Some(current);
                        existing.distance_in_slice = next.distance_in_slice;
                        existing.priority = policy.priority(g, existing.h, next.position);
                        frontier.push(next.position, pending, existing.priority);
                    }
                }
                None => {
                    let h = metric_distance(metric, &next.position, &target);
                    let id = nodes.len();
                    nodes.push(PathFindNode {
                        position: next.position,
                        parent: Some(current),
                        g,
                        h,
                        priority: policy.priority(g, h, next.position),
                        distance_in_slice: next.distance_in_slice,
                    });
                    frontier.push(next.position, id, nodes[id].priority);
                }
            }
        }
    }

    log::debug!(
        "search {start} -> {target} stopped after {iterations} iterations ({} pending), fallback: {}",
        frontier.len(),
        best.map_or("none".to_string(), |b| nodes[b].position.to_string())
    );

    best.map(|terminal| SearchOutcome {
        nodes,
        terminal,
        reached_target: false,
        iterations,
    })
}
