//! Hazard emitter: bursts of hazards on a ring around the actor.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use foresight_core::config::EmitterConfig;
use foresight_core::constants::DT;

use crate::world_setup::spawn_hazard;

/// Time accumulated toward the next burst.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitterState {
    pub since_last_spawn: f64,
}

/// Advance the spawn timer and emit a burst when it runs over the interval.
/// Returns the number of hazards spawned.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &EmitterConfig,
    state: &mut EmitterState,
    center: DVec2,
    now: f64,
) -> usize {
    state.since_last_spawn += DT;
    if state.since_last_spawn <= config.spawn_interval_secs {
        return 0;
    }
    state.since_last_spawn -= config.spawn_interval_secs;
    spawn_burst(world, rng, config, center, now)
}

/// Spawn one burst evenly spaced on a ring of `spawn_radius` around
/// `center`, all aimed at `center`. Every hazard in a burst has the same kind.
pub fn spawn_burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &EmitterConfig,
    center: DVec2,
    now: f64,
) -> usize {
    if config.kinds.is_empty() || config.spawn_amount == 0 {
        return 0;
    }

    let count = if config.random_spawn_amount {
        (rng.gen::<f64>() * config.spawn_amount as f64).ceil() as usize
    } else {
        config.spawn_amount as usize
    };
    if count == 0 {
        return 0;
    }

    let kind = config.kinds[rng.gen_range(0..config.kinds.len())];
    let section = TAU / count as f64;
    let offset = TAU * rng.gen::<f64>();

    for i in 0..count {
        let angle = offset + section * i as f64;
        let position = center + DVec2::from_angle(angle) * config.spawn_radius;
        spawn_hazard(world, kind, position, center, config, now);
    }
    log::debug!("emitted {count} {kind:?} hazards at t={now:.2}");
    count
}
