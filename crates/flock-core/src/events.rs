//! Events emitted by the simulation for renderers, audio and trainers.

use serde::{Deserialize, Serialize};

use crate::enums::Barrier;

/// Something that happened during the last tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EpisodeEvent {
    /// An agent's policy fired a jump impulse.
    Flap { agent: usize },
    /// An agent hit a barrier.
    Collision {
        agent: usize,
        obstacle: u64,
        barrier: Barrier,
    },
    /// An agent touched the ground or left the top of the play area.
    OutOfBounds { agent: usize, y: f64 },
    /// An agent's policy failed; the agent was removed.
    PolicyFault { agent: usize, message: String },
    /// The lead agent cleared an obstacle.
    ObstaclePassed { obstacle: u64, score: u32 },
    ObstacleSpawned { obstacle: u64, gap_center: f64 },
    ObstacleRetired { obstacle: u64 },
    /// The last live agent was removed.
    Terminated { tick: u64, score: u32 },
}
