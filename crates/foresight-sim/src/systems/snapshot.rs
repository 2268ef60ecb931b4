//! Snapshot system: a read-only, serializable view of the host world.

use glam::DVec2;
use hecs::World;
use serde::{Deserialize, Serialize};

use foresight_core::config::HazardKind;
use foresight_core::types::{GridCoords, SimTime};

use crate::components::{Actor, HazardBody, Lifetime, WorldPosition};
use crate::systems::planner::{PlannerState, RefreshReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub position: DVec2,
    pub waypoint: Option<DVec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub kind: HazardKind,
    pub position: DVec2,
    pub remaining_secs: f64,
}

/// State of the host after one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub actor: Option<ActorView>,
    pub hazards: Vec<HazardView>,
    /// Blocked cells in the current grid.
    pub occupied_cells: usize,
    /// Current path, start first. Empty when there is none.
    pub path: Vec<GridCoords>,
    pub reached_target: bool,
    pub grid_rebuilt: bool,
    pub path_searched: bool,
}

/// Build a snapshot from the current world and planner state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    planner: &PlannerState,
    report: RefreshReport,
) -> SimSnapshot {
    let actor = world
        .query::<(&Actor, &WorldPosition)>()
        .iter()
        .next()
        .map(|(_, (actor, pos))| ActorView {
            position: pos.0,
            waypoint: actor.waypoint,
        });

    let hazards = world
        .query::<(&HazardBody, &WorldPosition, &Lifetime)>()
        .iter()
        .map(|(_, (body, pos, lifetime))| HazardView {
            kind: body.kind(),
            position: pos.0,
            remaining_secs: lifetime.remaining_secs,
        })
        .collect();

    SimSnapshot {
        time: *time,
        actor,
        hazards,
        occupied_cells: planner.grid.occupied_count(),
        path: planner
            .path
            .as_ref()
            .map(|p| p.to_coords())
            .unwrap_or_default(),
        reached_target: planner.path.as_ref().is_some_and(|p| p.reached_target),
        grid_rebuilt: report.grid_rebuilt,
        path_searched: report.path_searched,
    }
}
