//! Obstacle lifecycle: scrolling, pass detection, rewards and retirement.

use hecs::{Entity, World};

use flock_core::components::{Agent, Obstacle};
use flock_core::enums::LifeState;
use flock_core::events::EpisodeEvent;
use flock_core::ledger::FitnessLedger;
use flock_core::tuning::Tuning;

use crate::systems::flight;

/// Active obstacles, oldest first.
pub fn active_obstacles(world: &World) -> Vec<(Entity, Obstacle)> {
    let mut obstacles: Vec<(Entity, Obstacle)> = world
        .query::<&Obstacle>()
        .iter()
        .map(|(entity, obstacle)| (entity, *obstacle))
        .collect();
    obstacles.sort_by_key(|(_, obstacle)| obstacle.serial);
    obstacles
}

/// Right-hand edge of an obstacle.
pub fn trailing_edge(obstacle: &Obstacle, barrier_width: f64) -> f64 {
    obstacle.x + barrier_width
}

/// The obstacle agents should be steering for: the oldest one, unless the
/// lead agent is already past it and a newer one exists.
pub fn reference_obstacle(world: &World, barrier_width: f64) -> Option<Obstacle> {
    let obstacles = active_obstacles(world);
    let first = obstacles.first().map(|(_, o)| *o)?;
    let lead = flight::lead_agent(world);

    match (lead, obstacles.get(1)) {
        (Some(lead), Some((_, second))) if lead.x > trailing_edge(&first, barrier_width) => {
            Some(*second)
        }
        _ => Some(first),
    }
}

/// Scroll every obstacle left by one tick.
pub fn advance(world: &mut World, tuning: &Tuning) {
    for (_entity, obstacle) in world.query_mut::<&mut Obstacle>() {
        obstacle.x -= tuning.obstacle_velocity;
    }
}

/// Mark obstacles the lead live agent has cleared. Returns their serials,
/// oldest first; each obstacle is reported at most once per episode.
pub fn detect_passes(world: &mut World, barrier_width: f64) -> Vec<u64> {
    let Some(lead) = flight::lead_agent(world) else {
        return Vec::new();
    };

    let mut passed = Vec::new();
    for (_entity, obstacle) in world.query_mut::<&mut Obstacle>() {
        if !obstacle.passed && trailing_edge(obstacle, barrier_width) < lead.x {
            obstacle.passed = true;
            passed.push(obstacle.serial);
        }
    }
    passed.sort_unstable();
    passed
}

/// Credit `bonus` to every agent still alive at this point of the tick.
pub fn reward_pass(world: &mut World, ledger: &mut FitnessLedger, bonus: f64) {
    for (_entity, (agent, life)) in world.query_mut::<(&Agent, &LifeState)>() {
        if life.is_alive() {
            ledger.credit(agent.index, bonus);
        }
    }
}

/// Despawn obstacles that have scrolled fully past the left edge.
pub fn retire(
    world: &mut World,
    barrier_width: f64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<EpisodeEvent>,
) {
    despawn_buffer.clear();

    for (entity, obstacle) in active_obstacles(world) {
        if trailing_edge(&obstacle, barrier_width) < 0.0 {
            log::debug!("retiring obstacle {}", obstacle.serial);
            events.push(EpisodeEvent::ObstacleRetired {
                obstacle: obstacle.serial,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
