//! Wing animation: cycles the agent frames and holds the wings level in a dive.

use hecs::World;

use flock_core::components::{Animation, Body};
use flock_core::enums::LifeState;
use flock_core::tuning::Tuning;

/// Frame for a given animation counter. Returns the frame and the counter
/// to store, which wraps to zero on the last tick of one up-down cycle.
pub fn frame_for(counter: u32, period: u32) -> (usize, u32) {
    match counter {
        c if c < period => (0, c),
        c if c < period * 2 => (1, c),
        c if c < period * 3 => (2, c),
        c if c < period * 4 => (1, c),
        _ => (0, 0),
    }
}

pub fn run(world: &mut World, tuning: &Tuning) {
    let period = tuning.animation_ticks;

    for (_entity, (body, animation, life)) in
        world.query_mut::<(&Body, &mut Animation, &LifeState)>()
    {
        if !life.is_alive() {
            continue;
        }

        let (frame, counter) = frame_for(animation.counter + 1, period);
        animation.frame = frame;
        animation.counter = counter;

        // Diving: wings level, and resume flapping mid-cycle once it pulls up.
        if body.tilt <= tuning.dive_tilt {
            animation.frame = 1;
            animation.counter = period * 2;
        }
    }
}
