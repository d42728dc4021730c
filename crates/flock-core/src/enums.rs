//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Episode lifecycle. `Terminated` is absorbing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodePhase {
    #[default]
    Running,
    Terminated,
}

/// Why an agent left the live set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Overlapped a barrier.
    Collision,
    /// Touched the ground or flew above the play area.
    OutOfBounds,
    /// Its decision policy failed.
    PolicyFault,
}

/// Per-tick liveness marker. Agents are flagged during the scans and
/// despawned together once all checks of the tick have run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    PendingRemoval(DeathCause),
}

impl LifeState {
    pub fn is_alive(&self) -> bool {
        matches!(self, LifeState::Alive)
    }
}

/// Which barrier of an obstacle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Barrier {
    Top,
    Bottom,
}
