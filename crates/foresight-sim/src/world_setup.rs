//! Entity spawn factories for the host world.

use glam::DVec2;
use hecs::{Entity, World};

use foresight_core::config::{ActorConfig, EmitterConfig, HazardKind};
use foresight_predict::WavePredictor;

use crate::components::*;

/// Spawn the actor at its configured start position.
pub fn spawn_actor(world: &mut World, actor: &ActorConfig, speed: f64) -> Entity {
    world.spawn((
        WorldPosition(actor.start),
        Actor {
            speed,
            radius: actor.radius,
            waypoint: None,
        },
    ))
}

/// Spawn one hazard at `position` aimed at `target`.
///
/// Speed, footprint, lifetime and wave shape come from the emitter config.
pub fn spawn_hazard(
    world: &mut World,
    kind: HazardKind,
    position: DVec2,
    target: DVec2,
    emitter: &EmitterConfig,
    now: f64,
) -> Entity {
    let motion = match kind {
        HazardKind::Linear => HazardMotion::Linear {
            direction: (target - position).normalize_or_zero(),
            speed: emitter.hazard_speed,
        },
        HazardKind::Wave => HazardMotion::Wave(WavePredictor::toward(
            position,
            target,
            emitter.wave_period_secs,
            emitter.wave_amplitude,
            emitter.wave_length,
            emitter.hazard_width / 2.0,
        )),
        HazardKind::Static => HazardMotion::Static,
    };

    world.spawn((
        WorldPosition(position),
        HazardBody {
            motion,
            bounding_box_width: emitter.hazard_width,
            spawned_at: now,
        },
        Lifetime {
            remaining_secs: emitter.hazard_lifetime_secs,
        },
    ))
}

/// Position of the first actor in the world, if any.
pub fn actor_position(world: &World) -> Option<DVec2> {
    world
        .query::<(&Actor, &WorldPosition)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| pos.0)
}
