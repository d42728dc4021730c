//! Episode snapshot, the render-ready state emitted after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::EpisodePhase;
use crate::events::EpisodeEvent;
use crate::types::{GenomeId, SimTime};

/// Complete visible state after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSnapshot {
    pub time: SimTime,
    pub phase: EpisodePhase,
    /// Trainer metadata, passed through untouched.
    pub generation: u32,
    pub score: u32,
    /// Live agents, ordered by index.
    pub agents: Vec<AgentView>,
    /// Active obstacles, oldest first.
    pub obstacles: Vec<ObstacleView>,
    pub ground: GroundView,
    pub events: Vec<EpisodeEvent>,
}

impl EpisodeSnapshot {
    pub fn alive(&self) -> usize {
        self.agents.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub index: usize,
    pub genome: GenomeId,
    pub x: f64,
    pub y: f64,
    /// Degrees, positive is nose up.
    pub tilt: f64,
    /// Wing frame to draw.
    pub frame: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub serial: u64,
    pub x: f64,
    pub width: f64,
    pub gap_center: f64,
    /// Y of the top barrier's sprite origin.
    pub top: f64,
    /// Y of the bottom barrier's sprite origin.
    pub bottom: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundView {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
}
