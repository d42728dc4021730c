//! Policy descriptions loaded from JSON.

use serde::{Deserialize, Serialize};

use flock_core::policy::{ConstantPolicy, DecisionPolicy, HoverPolicy, LinearPolicy, Observation};
use flock_core::types::GenomeId;

/// One built-in policy, e.g. `{"kind": "hover", "target_y": 250.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicySpec {
    Constant {
        activation: f64,
    },
    Hover {
        target_y: f64,
    },
    Linear {
        weights: [f64; Observation::LEN],
        bias: f64,
    },
}

impl PolicySpec {
    pub fn build(&self) -> Box<dyn DecisionPolicy> {
        match *self {
            PolicySpec::Constant { activation } => Box::new(ConstantPolicy(activation)),
            PolicySpec::Hover { target_y } => Box::new(HoverPolicy { target_y }),
            PolicySpec::Linear { weights, bias } => Box::new(LinearPolicy { weights, bias }),
        }
    }
}

/// Hover policies spread evenly over the band between `low` and `high`.
pub fn hover_flock(count: usize, low: f64, high: f64) -> Vec<PolicySpec> {
    let step = if count > 1 {
        (high - low) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count)
        .map(|i| PolicySpec::Hover {
            target_y: low + step * i as f64,
        })
        .collect()
}

/// Pair each spec with a genome id equal to its position.
pub fn instantiate(specs: &[PolicySpec]) -> Vec<(GenomeId, Box<dyn DecisionPolicy>)> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| (GenomeId(i as u64), spec.build()))
        .collect()
}
