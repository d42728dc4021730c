//! Episode engine.
//!
//! `Episode` owns the hecs ECS world, one decision policy per agent, the
//! fitness ledger and the seeded RNG. It runs all systems in a fixed order
//! each tick and produces `EpisodeSnapshot`s. Completely headless, enabling
//! deterministic testing.

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use flock_core::enums::EpisodePhase;
use flock_core::events::EpisodeEvent;
use flock_core::ledger::{EpisodeReport, FitnessLedger};
use flock_core::mask::SpriteSet;
use flock_core::policy::DecisionPolicy;
use flock_core::state::EpisodeSnapshot;
use flock_core::tuning::{ConfigError, Tuning};
use flock_core::types::{GenomeId, SimTime};

use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::world_setup;

/// Configuration for starting a new episode.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and policies = same episode.
    pub seed: u64,
    /// Trainer generation label, passed through to snapshots and the report.
    pub generation: u32,
    pub tuning: Tuning,
    pub sprites: SpriteSet,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            generation: 0,
            tuning: Tuning::default(),
            sprites: SpriteSet::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("invalid tuning: {0}")]
    Config(#[from] ConfigError),
    #[error("agent sprite height {agent_height} does not fit above ground_y {ground_y}")]
    AgentDoesNotFit { agent_height: f64, ground_y: f64 },
}

/// One episode (one generation) of the flock.
pub struct Episode<P: DecisionPolicy = Box<dyn DecisionPolicy>> {
    world: World,
    time: SimTime,
    phase: EpisodePhase,
    generation: u32,
    score: u32,
    tuning: Tuning,
    sprites: SpriteSet,
    rng: ChaCha8Rng,
    policies: Vec<Option<P>>,
    ledger: FitnessLedger,
    next_obstacle_serial: u64,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<EpisodeEvent>,
}

impl<P: DecisionPolicy> Episode<P> {
    /// Set up an episode with one agent per `(genome, policy)` pair, in
    /// order. An empty set gives an already terminated episode.
    pub fn new(config: SimConfig, agents: Vec<(GenomeId, P)>) -> Result<Self, EpisodeError> {
        config.tuning.validate()?;

        let agent_height = config.sprites.agent_height() as f64;
        if agent_height >= config.tuning.ground_y {
            return Err(EpisodeError::AgentDoesNotFit {
                agent_height,
                ground_y: config.tuning.ground_y,
            });
        }

        let (genomes, policies): (Vec<GenomeId>, Vec<P>) = agents.into_iter().unzip();

        let mut episode = Self {
            world: World::new(),
            time: SimTime::default(),
            phase: EpisodePhase::Running,
            generation: config.generation,
            score: 0,
            tuning: config.tuning,
            sprites: config.sprites,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            policies: policies.into_iter().map(Some).collect(),
            ledger: FitnessLedger::new(genomes.iter().copied()),
            next_obstacle_serial: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        };

        if genomes.is_empty() {
            log::info!("generation {}: no policies, episode over", episode.generation);
            episode.phase = EpisodePhase::Terminated;
            return Ok(episode);
        }

        world_setup::setup_episode(&mut episode.world, &episode.tuning, &genomes);
        let x = episode.tuning.initial_obstacle_x;
        episode.spawn_obstacle(x);

        log::info!(
            "generation {}: episode started with {} agents (seed {})",
            episode.generation,
            genomes.len(),
            config.seed
        );
        Ok(episode)
    }

    /// Advance the episode by one tick and return the resulting snapshot.
    /// A terminated episode is left untouched.
    pub fn tick(&mut self) -> EpisodeSnapshot {
        if self.phase == EpisodePhase::Running {
            self.time.advance(self.tuning.dt());
            self.run_systems();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.snapshot_context(), events)
    }

    /// Tick until termination or `max_ticks`, whichever comes first.
    pub fn run(&mut self, max_ticks: Option<u64>) -> EpisodeReport {
        self.run_with(max_ticks, |_| {})
    }

    /// Like [`Episode::run`], handing every snapshot to `observer`.
    pub fn run_with(
        &mut self,
        max_ticks: Option<u64>,
        mut observer: impl FnMut(&EpisodeSnapshot),
    ) -> EpisodeReport {
        let mut ticks = 0u64;
        while self.phase == EpisodePhase::Running && max_ticks.map_or(true, |max| ticks < max) {
            let snapshot = self.tick();
            observer(&snapshot);
            ticks += 1;
        }
        self.report()
    }

    /// Fitness results so far.
    pub fn report(&self) -> EpisodeReport {
        EpisodeReport {
            generation: self.generation,
            score: self.score,
            ticks: self.time.tick,
            entries: self.ledger.entries().to_vec(),
        }
    }

    pub fn into_report(self) -> EpisodeReport {
        self.report()
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn ledger(&self) -> &FitnessLedger {
        &self.ledger
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of agents still alive.
    pub fn alive(&self) -> usize {
        systems::flight::live_agents(&self.world).len()
    }

    /// Current snapshot without advancing.
    pub fn snapshot(&self) -> EpisodeSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.snapshot_context(), Vec::new())
    }

    /// Place agent `index` at height `y`, at rest.
    #[cfg(test)]
    pub fn set_agent_y(&mut self, index: usize, y: f64) {
        use flock_core::components::{Agent, Body};

        for (_entity, (agent, body)) in self.world.query_mut::<(&Agent, &mut Body)>() {
            if agent.index == index {
                *body = crate::kinematics::body_at(y);
            }
        }
    }

    /// Replace every obstacle with ones at the given `(x, gap_center)` pairs.
    #[cfg(test)]
    pub fn set_obstacles(&mut self, obstacles: &[(f64, f64)]) {
        use flock_core::components::Obstacle;

        let existing: Vec<hecs::Entity> = self
            .world
            .query::<&Obstacle>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in existing {
            let _ = self.world.despawn(entity);
        }
        self.events.clear();

        for &(x, gap_center) in obstacles {
            let obstacle = world_setup::obstacle_with_gap(
                &self.tuning,
                self.sprites.barrier_height() as f64,
                self.next_obstacle_serial,
                x,
                gap_center,
            );
            self.next_obstacle_serial += 1;
            world_setup::spawn_obstacle(&mut self.world, obstacle);
        }
    }

    fn barrier_width(&self) -> f64 {
        self.sprites.barrier_width() as f64
    }

    fn snapshot_context(&self) -> SnapshotContext {
        SnapshotContext {
            time: self.time,
            phase: self.phase,
            generation: self.generation,
            score: self.score,
            barrier_width: self.barrier_width(),
        }
    }

    fn spawn_obstacle(&mut self, x: f64) {
        let obstacle = world_setup::new_obstacle(
            &mut self.rng,
            &self.tuning,
            self.sprites.barrier_height() as f64,
            self.next_obstacle_serial,
            x,
        );
        self.next_obstacle_serial += 1;

        log::debug!(
            "spawned obstacle {} at x={} gap={}",
            obstacle.serial,
            obstacle.x,
            obstacle.gap_center
        );
        self.events.push(EpisodeEvent::ObstacleSpawned {
            obstacle: obstacle.serial,
            gap_center: obstacle.gap_center,
        });
        world_setup::spawn_obstacle(&mut self.world, obstacle);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let barrier_width = self.barrier_width();

        // 1. Reference obstacle for this tick's observations
        let gap_center = systems::obstacles::reference_obstacle(&self.world, barrier_width)
            .map(|obstacle| obstacle.gap_center);
        // 2. Flight: kinematics, survival reward, policy decisions
        systems::flight::run(
            &mut self.world,
            &mut self.policies,
            &mut self.ledger,
            &self.tuning,
            gap_center,
            &mut self.events,
        );
        // 3. Obstacle scroll
        systems::obstacles::advance(&mut self.world, &self.tuning);
        // 4. Collisions (mark only)
        systems::collisions::run(
            &mut self.world,
            &self.sprites,
            &mut self.ledger,
            &self.tuning,
            &mut self.events,
        );
        // 5-6. Passes: score, bonus, replacement obstacle
        let passed = systems::obstacles::detect_passes(&mut self.world, barrier_width);
        if !passed.is_empty() {
            self.score += 1;
            systems::obstacles::reward_pass(
                &mut self.world,
                &mut self.ledger,
                self.tuning.pass_bonus,
            );
            for obstacle in passed {
                self.events.push(EpisodeEvent::ObstaclePassed {
                    obstacle,
                    score: self.score,
                });
            }
            let x = self.tuning.spawn_x;
            self.spawn_obstacle(x);
        }
        // 7. Retire obstacles off the left edge
        systems::obstacles::retire(
            &mut self.world,
            barrier_width,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 8. Boundary deaths
        systems::boundary::run(
            &mut self.world,
            self.sprites.agent_height() as f64,
            &mut self.ledger,
            &self.tuning,
            &mut self.events,
        );
        // 9. Compact the live set
        let removed = systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        for (index, cause) in removed {
            self.ledger.record_death(index, cause, self.time.tick);
            if let Some(slot) = self.policies.get_mut(index) {
                *slot = None;
            }
        }
        // 10. Ground scroll
        systems::ground::run(&mut self.world, &self.tuning);
        // 11. Termination
        if systems::flight::live_agents(&self.world).is_empty() {
            self.phase = EpisodePhase::Terminated;
            self.events.push(EpisodeEvent::Terminated {
                tick: self.time.tick,
                score: self.score,
            });
            log::info!(
                "generation {}: episode over at tick {} with score {}",
                self.generation,
                self.time.tick,
                self.score
            );
        }
        // 12. Wing animation
        systems::animation::run(&mut self.world, &self.tuning);
    }
}
