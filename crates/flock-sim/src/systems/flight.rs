//! Flight system: advances every live agent and asks its policy whether to jump.

use hecs::{Entity, World};

use flock_core::components::{Agent, Body};
use flock_core::enums::{DeathCause, LifeState};
use flock_core::events::EpisodeEvent;
use flock_core::ledger::FitnessLedger;
use flock_core::policy::{wants_jump, DecisionPolicy, Observation};
use flock_core::tuning::Tuning;

use crate::kinematics;

/// Live agents ordered by index. Agents already flagged for removal this
/// tick are excluded.
pub fn live_agents(world: &World) -> Vec<(Entity, Agent)> {
    let mut agents: Vec<(Entity, Agent)> = world
        .query::<(&Agent, &LifeState)>()
        .iter()
        .filter(|(_, (_, life))| life.is_alive())
        .map(|(entity, (agent, _))| (entity, *agent))
        .collect();
    agents.sort_by_key(|(_, agent)| agent.index);
    agents
}

/// The live agent with the lowest index.
pub fn lead_agent(world: &World) -> Option<Agent> {
    live_agents(world).into_iter().next().map(|(_, agent)| agent)
}

/// Advance, reward and query every live agent, in index order.
///
/// `gap_center` is the reference obstacle's gap height. A policy error
/// removes only that agent, with the collision penalty.
pub fn run<P: DecisionPolicy>(
    world: &mut World,
    policies: &mut [Option<P>],
    ledger: &mut FitnessLedger,
    tuning: &Tuning,
    gap_center: Option<f64>,
    events: &mut Vec<EpisodeEvent>,
) {
    for (entity, agent) in live_agents(world) {
        let Ok((body, life)) = world.query_one_mut::<(&mut Body, &mut LifeState)>(entity) else {
            continue;
        };

        kinematics::advance(body, tuning);
        ledger.credit(agent.index, tuning.survival_reward);

        let observation = Observation {
            y: body.y,
            gap_distance: gap_center.map_or(0.0, |gap| (body.y - gap).abs()),
            lookahead: tuning.lookahead,
        };

        let Some(policy) = policies.get_mut(agent.index).and_then(Option::as_mut) else {
            continue;
        };

        let decision = policy
            .decide(&observation)
            .and_then(|outputs| wants_jump(&outputs, tuning.jump_threshold));

        match decision {
            Ok(true) => {
                kinematics::apply_impulse(body, tuning);
                events.push(EpisodeEvent::Flap { agent: agent.index });
            }
            Ok(false) => {}
            Err(err) => {
                log::warn!(
                    "agent {} ({}) policy fault: {err}",
                    agent.index,
                    agent.genome
                );
                ledger.debit(agent.index, tuning.collision_penalty);
                *life = LifeState::PendingRemoval(DeathCause::PolicyFault);
                events.push(EpisodeEvent::PolicyFault {
                    agent: agent.index,
                    message: err.to_string(),
                });
            }
        }
    }
}
