//! Snapshot system: queries the ECS world and builds an `EpisodeSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use flock_core::components::*;
use flock_core::enums::{EpisodePhase, LifeState};
use flock_core::events::EpisodeEvent;
use flock_core::state::*;
use flock_core::types::SimTime;

/// Everything the snapshot needs that does not live in the world.
pub struct SnapshotContext {
    pub time: SimTime,
    pub phase: EpisodePhase,
    pub generation: u32,
    pub score: u32,
    pub barrier_width: f64,
}

/// Build a complete snapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    context: &SnapshotContext,
    events: Vec<EpisodeEvent>,
) -> EpisodeSnapshot {
    EpisodeSnapshot {
        time: context.time,
        phase: context.phase,
        generation: context.generation,
        score: context.score,
        agents: build_agents(world),
        obstacles: build_obstacles(world, context.barrier_width),
        ground: build_ground(world),
        events,
    }
}

/// Live agents, ordered by index.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Agent, &Body, &Animation, &LifeState)>()
        .iter()
        .filter(|(_, (_, _, _, life))| life.is_alive())
        .map(|(_, (agent, body, animation, _))| AgentView {
            index: agent.index,
            genome: agent.genome,
            x: agent.x,
            y: body.y,
            tilt: body.tilt,
            frame: animation.frame,
        })
        .collect();

    agents.sort_by_key(|a| a.index);
    agents
}

/// Active obstacles, oldest first.
fn build_obstacles(world: &World, barrier_width: f64) -> Vec<ObstacleView> {
    let mut obstacles: Vec<ObstacleView> = world
        .query::<&Obstacle>()
        .iter()
        .map(|(_, obstacle)| ObstacleView {
            serial: obstacle.serial,
            x: obstacle.x,
            width: barrier_width,
            gap_center: obstacle.gap_center,
            top: obstacle.top,
            bottom: obstacle.bottom,
            passed: obstacle.passed,
        })
        .collect();

    obstacles.sort_by_key(|o| o.serial);
    obstacles
}

fn build_ground(world: &World) -> GroundView {
    world
        .query::<&Ground>()
        .iter()
        .next()
        .map(|(_, ground)| GroundView {
            y: ground.y,
            x1: ground.x1,
            x2: ground.x2,
        })
        .unwrap_or_default()
}
