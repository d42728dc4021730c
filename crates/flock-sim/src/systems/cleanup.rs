//! Cleanup system: compacts the live set once all checks of a tick have run.

use hecs::{Entity, World};

use flock_core::components::Agent;
use flock_core::enums::{DeathCause, LifeState};

/// Despawn every agent flagged for removal. Returns `(index, cause)` for
/// each removed agent, ordered by index. Uses a pre-allocated buffer to
/// avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> Vec<(usize, DeathCause)> {
    despawn_buffer.clear();

    let mut removed = Vec::new();
    for (entity, (agent, life)) in world.query_mut::<(&Agent, &LifeState)>() {
        if let LifeState::PendingRemoval(cause) = life {
            removed.push((agent.index, *cause));
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    removed.sort_by_key(|(index, _)| *index);
    removed
}
