//! Pixel-accurate agent/obstacle overlap test.
//!
//! Pure functions of the current geometry: the same inputs always give the
//! same answer, and nothing is mutated.

use glam::IVec2;

use flock_core::components::{Agent, Body, Obstacle};
use flock_core::enums::Barrier;
use flock_core::mask::SpriteSet;

/// Offsets of the top and bottom barrier origins relative to the agent's
/// mask origin, in whole pixels.
pub fn barrier_offsets(agent: &Agent, body: &Body, obstacle: &Obstacle) -> (IVec2, IVec2) {
    let dx = (obstacle.x - agent.x).round() as i32;
    let agent_y = body.y.round();
    let top = IVec2::new(dx, (obstacle.top - agent_y) as i32);
    let bottom = IVec2::new(dx, (obstacle.bottom - agent_y) as i32);
    (top, bottom)
}

/// Which barrier the agent's current frame touches, if any.
pub fn hit_barrier(
    agent: &Agent,
    body: &Body,
    frame: usize,
    obstacle: &Obstacle,
    sprites: &SpriteSet,
) -> Option<Barrier> {
    let agent_mask = sprites.agent_frame(frame);
    let (top, bottom) = barrier_offsets(agent, body, obstacle);

    if agent_mask.overlaps(sprites.barrier_top(), top) {
        Some(Barrier::Top)
    } else if agent_mask.overlaps(sprites.barrier_bottom(), bottom) {
        Some(Barrier::Bottom)
    } else {
        None
    }
}

pub fn collides(
    agent: &Agent,
    body: &Body,
    frame: usize,
    obstacle: &Obstacle,
    sprites: &SpriteSet,
) -> bool {
    hit_barrier(agent, body, frame, obstacle, sprites).is_some()
}
