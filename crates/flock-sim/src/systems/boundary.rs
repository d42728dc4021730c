//! Boundary system: removes agents that touch the ground or leave the top
//! of the play area.

use hecs::World;

use flock_core::components::{Agent, Body, Ground};
use flock_core::enums::{DeathCause, LifeState};
use flock_core::events::EpisodeEvent;
use flock_core::ledger::FitnessLedger;
use flock_core::tuning::Tuning;

/// Height of the lower death line, taken from the ground entity.
pub fn ground_line(world: &World, tuning: &Tuning) -> f64 {
    world
        .query::<&Ground>()
        .iter()
        .next()
        .map(|(_, ground)| ground.y)
        .unwrap_or(tuning.ground_y)
}

/// True when an agent of `agent_height` at `y` is outside the play area.
/// The lower bound is inclusive.
pub fn out_of_bounds(y: f64, agent_height: f64, ground_y: f64) -> bool {
    y + agent_height >= ground_y || y < 0.0
}

/// Flag every still-alive agent that crossed a boundary. Agents already
/// flagged this tick are skipped, so no agent pays two penalties.
pub fn run(
    world: &mut World,
    agent_height: f64,
    ledger: &mut FitnessLedger,
    tuning: &Tuning,
    events: &mut Vec<EpisodeEvent>,
) {
    let ground_y = ground_line(world, tuning);

    let mut flagged = Vec::new();
    for (_entity, (agent, body, life)) in
        world.query_mut::<(&Agent, &Body, &mut LifeState)>()
    {
        if !life.is_alive() || !out_of_bounds(body.y, agent_height, ground_y) {
            continue;
        }
        *life = LifeState::PendingRemoval(DeathCause::OutOfBounds);
        flagged.push((agent.index, body.y));
    }

    flagged.sort_by_key(|(index, _)| *index);
    for (index, y) in flagged {
        log::debug!("agent {index} out of bounds at y={y:.1}");
        ledger.debit(index, tuning.boundary_penalty);
        events.push(EpisodeEvent::OutOfBounds { agent: index, y });
    }
}
