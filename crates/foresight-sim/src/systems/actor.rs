//! Actor movement toward its waypoint.

use hecs::World;

use foresight_core::constants::DT;

use crate::components::{Actor, WorldPosition};

/// Step each actor toward its waypoint without overshooting.
pub fn run(world: &mut World) {
    for (_entity, (pos, actor)) in world.query_mut::<(&mut WorldPosition, &Actor)>() {
        let Some(waypoint) = actor.waypoint else {
            continue;
        };
        let offset = waypoint - pos.0;
        let step = (actor.speed * DT).min(offset.length());
        pos.0 += offset.normalize_or_zero() * step;
    }
}
