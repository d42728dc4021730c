//! Collision system: tests every live agent against every active obstacle.
//!
//! Hits are only flagged here. The agents stay in the world until cleanup,
//! so the scan never iterates a collection it is shrinking.

use hecs::World;

use flock_core::components::{Animation, Body};
use flock_core::enums::{DeathCause, LifeState};
use flock_core::events::EpisodeEvent;
use flock_core::ledger::FitnessLedger;
use flock_core::mask::SpriteSet;
use flock_core::tuning::Tuning;

use crate::collision;
use crate::systems::{flight, obstacles};

pub fn run(
    world: &mut World,
    sprites: &SpriteSet,
    ledger: &mut FitnessLedger,
    tuning: &Tuning,
    events: &mut Vec<EpisodeEvent>,
) {
    let obstacles = obstacles::active_obstacles(world);
    let agents: Vec<_> = flight::live_agents(world)
        .into_iter()
        .filter_map(|(entity, agent)| {
            let mut query = world.query_one::<(&Body, &Animation)>(entity).ok()?;
            let (body, animation) = query.get()?;
            Some((entity, agent, *body, animation.frame))
        })
        .collect();

    let mut hit = vec![false; agents.len()];
    for (_, obstacle) in &obstacles {
        for (slot, (_, agent, body, frame)) in agents.iter().enumerate() {
            if hit[slot] {
                continue;
            }
            if let Some(barrier) = collision::hit_barrier(agent, body, *frame, obstacle, sprites)
            {
                log::debug!(
                    "agent {} hit the {:?} barrier of obstacle {}",
                    agent.index,
                    barrier,
                    obstacle.serial
                );
                ledger.debit(agent.index, tuning.collision_penalty);
                events.push(EpisodeEvent::Collision {
                    agent: agent.index,
                    obstacle: obstacle.serial,
                    barrier,
                });
                hit[slot] = true;
            }
        }
    }

    for ((entity, ..), was_hit) in agents.iter().zip(hit) {
        if was_hit {
            if let Ok(mut life) = world.get::<&mut LifeState>(*entity) {
                *life = LifeState::PendingRemoval(DeathCause::Collision);
            }
        }
    }
}
