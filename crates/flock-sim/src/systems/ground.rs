//! Ground scroll. Purely cosmetic: only the ground's height matters to the
//! simulation.

use hecs::World;

use flock_core::components::Ground;
use flock_core::tuning::Tuning;

/// Scroll both tiles left; a tile that has fully left the screen jumps
/// behind the other one.
pub fn run(world: &mut World, tuning: &Tuning) {
    for (_entity, ground) in world.query_mut::<&mut Ground>() {
        ground.x1 -= tuning.ground_velocity;
        ground.x2 -= tuning.ground_velocity;

        if ground.x1 + ground.width < 0.0 {
            ground.x1 = ground.x2 + ground.width;
        }
        if ground.x2 + ground.width < 0.0 {
            ground.x2 = ground.x1 + ground.width;
        }
    }
}
