//! Hazard motion.
//!
//! Linear hazards integrate their velocity; wave hazards evaluate their
//! closed form at the time since spawn; static hazards stay put.

use hecs::World;

use foresight_core::constants::DT;
use foresight_predict::Trajectory;

use crate::components::{HazardBody, HazardMotion, WorldPosition};

/// Move every hazard to where it is at `now`.
pub fn run(world: &mut World, now: f64) {
    for (_entity, (pos, body)) in world.query_mut::<(&mut WorldPosition, &HazardBody)>() {
        match body.motion {
            HazardMotion::Linear { direction, speed } => pos.0 += direction * speed * DT,
            HazardMotion::Wave(wave) => pos.0 = wave.position(now - body.spawned_at),
            HazardMotion::Static => {}
        }
    }
}
