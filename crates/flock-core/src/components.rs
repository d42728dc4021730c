//! ECS components for hecs entities.
//!
//! Components are plain data structs with no behaviour.
//! Game logic lives in the simulation systems, not here.

use serde::{Deserialize, Serialize};

use crate::types::GenomeId;

/// Identity of one controlled agent. Immutable for the episode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Agent {
    /// Stable index, equal to the agent's position in the policy list.
    pub index: usize,
    pub genome: GenomeId,
    /// Horizontal position, fixed for the whole episode.
    pub x: f64,
}

/// Vertical kinematic state of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub y: f64,
    /// Velocity set by the last impulse (negative is up).
    pub velocity: f64,
    /// Ticks elapsed since the last impulse (or since spawn).
    pub ticks_since_jump: u32,
    /// Height at which the last impulse was applied.
    pub jump_height: f64,
    /// Visual tilt in degrees, positive is nose up.
    pub tilt: f64,
}

/// Wing animation state. Cosmetic, but the collision engine tests
/// the opacity mask of the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    pub counter: u32,
    /// Index into the agent sprite frames.
    pub frame: usize,
}

/// A pair of barriers sharing one gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Creation order within the episode.
    pub serial: u64,
    /// Left edge of both barriers.
    pub x: f64,
    /// Gap reference height, the lower edge of the top barrier.
    /// Policies observe their distance to it.
    pub gap_center: f64,
    /// Y of the top barrier's sprite origin.
    pub top: f64,
    /// Y of the bottom barrier's sprite origin.
    pub bottom: f64,
    pub passed: bool,
}

/// Scrolling ground strip. Only `y` matters to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub width: f64,
}
