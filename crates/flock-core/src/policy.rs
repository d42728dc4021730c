//! The decision-policy capability consumed by the engine.
//!
//! A policy maps one observation to an output vector; only the first output
//! is inspected. Anything that can do that (lookup table, scripted
//! heuristic, evolved network) plugs in through [`DecisionPolicy`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by (or about) a policy. Isolated to its agent.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PolicyError {
    #[error("policy failed: {0}")]
    Failed(String),
    #[error("policy returned no outputs")]
    EmptyOutput,
    #[error("policy returned non-finite activation {0}")]
    NonFinite(f64),
}

/// What an agent sees each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// The agent's own height.
    pub y: f64,
    /// Vertical distance to the reference obstacle's gap height.
    pub gap_distance: f64,
    /// Fixed horizontal lookahead.
    pub lookahead: f64,
}

impl Observation {
    pub const LEN: usize = 3;

    pub fn to_array(&self) -> [f64; Self::LEN] {
        [self.y, self.gap_distance, self.lookahead]
    }
}

/// Observation in, activations out. Called once per live agent per tick.
///
/// Implementations must not reach back into simulation state; internal
/// scratch state (network activations, counters) is fine.
pub trait DecisionPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<Vec<f64>, PolicyError>;
}

impl<T: DecisionPolicy + ?Sized> DecisionPolicy for &mut T {
    fn decide(&mut self, observation: &Observation) -> Result<Vec<f64>, PolicyError> {
        (**self).decide(observation)
    }
}

impl<T: DecisionPolicy + ?Sized> DecisionPolicy for Box<T> {
    fn decide(&mut self, observation: &Observation) -> Result<Vec<f64>, PolicyError> {
        (**self).decide(observation)
    }
}

/// Read the jump decision out of a policy's outputs.
pub fn wants_jump(outputs: &[f64], threshold: f64) -> Result<bool, PolicyError> {
    let first = *outputs.first().ok_or(PolicyError::EmptyOutput)?;
    if !first.is_finite() {
        return Err(PolicyError::NonFinite(first));
    }
    Ok(first > threshold)
}

/// Always emits the same activation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantPolicy(pub f64);

impl DecisionPolicy for ConstantPolicy {
    fn decide(&mut self, _observation: &Observation) -> Result<Vec<f64>, PolicyError> {
        Ok(vec![self.0])
    }
}

/// Scripted heuristic: flap whenever the agent sinks below `target_y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPolicy {
    pub target_y: f64,
}

impl DecisionPolicy for HoverPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<Vec<f64>, PolicyError> {
        let activation = if observation.y > self.target_y { 1.0 } else { 0.0 };
        Ok(vec![activation])
    }
}

/// Single tanh neuron over the three observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearPolicy {
    pub weights: [f64; Observation::LEN],
    pub bias: f64,
}

impl DecisionPolicy for LinearPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<Vec<f64>, PolicyError> {
        let sum: f64 = self
            .weights
            .iter()
            .zip(observation.to_array())
            .map(|(w, x)| w * x)
            .sum();
        Ok(vec![(sum + self.bias).tanh()])
    }
}
