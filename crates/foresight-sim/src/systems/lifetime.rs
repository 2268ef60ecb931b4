//! Lifetime countdown and despawn.

use hecs::{Entity, World};

use foresight_core::constants::DT;

use crate::components::Lifetime;

/// Count every lifetime down by one tick and despawn the expired.
/// Returns how many entities were removed.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, lifetime) in world.query_mut::<&mut Lifetime>() {
        lifetime.remaining_secs -= DT;
        if lifetime.remaining_secs <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
