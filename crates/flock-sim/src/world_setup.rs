//! Entity spawn factories for setting up an episode world.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use flock_core::components::*;
use flock_core::enums::LifeState;
use flock_core::tuning::Tuning;
use flock_core::types::GenomeId;

use crate::kinematics;

/// Spawn one agent per genome, indexed in order, plus the ground strip.
pub fn setup_episode(world: &mut World, tuning: &Tuning, genomes: &[GenomeId]) {
    for (index, &genome) in genomes.iter().enumerate() {
        spawn_agent(world, tuning, index, genome);
    }
    spawn_ground(world, tuning);
}

/// Spawn an agent at the start position, alive and at rest.
pub fn spawn_agent(
    world: &mut World,
    tuning: &Tuning,
    index: usize,
    genome: GenomeId,
) -> hecs::Entity {
    world.spawn((
        Agent {
            index,
            genome,
            x: tuning.agent_start_x,
        },
        kinematics::body_at(tuning.agent_start_y),
        Animation::default(),
        LifeState::Alive,
    ))
}

/// Spawn the two-tile ground strip.
pub fn spawn_ground(world: &mut World, tuning: &Tuning) -> hecs::Entity {
    world.spawn((Ground {
        y: tuning.ground_y,
        x1: 0.0,
        x2: tuning.ground_tile_width,
        width: tuning.ground_tile_width,
    },))
}

/// Build an obstacle at `x` with a freshly drawn gap height.
pub fn new_obstacle(
    rng: &mut ChaCha8Rng,
    tuning: &Tuning,
    barrier_height: f64,
    serial: u64,
    x: f64,
) -> Obstacle {
    let gap_center = rng.gen_range(tuning.gap_center_min..tuning.gap_center_max) as f64;
    obstacle_with_gap(tuning, barrier_height, serial, x, gap_center)
}

/// Build an obstacle with a known gap height.
pub fn obstacle_with_gap(
    tuning: &Tuning,
    barrier_height: f64,
    serial: u64,
    x: f64,
    gap_center: f64,
) -> Obstacle {
    Obstacle {
        serial,
        x,
        gap_center,
        top: gap_center - barrier_height,
        bottom: gap_center + tuning.gap_size,
        passed: false,
    }
}

pub fn spawn_obstacle(world: &mut World, obstacle: Obstacle) -> hecs::Entity {
    world.spawn((obstacle,))
}
