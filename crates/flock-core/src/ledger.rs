//! Per-agent fitness accounting read by the external trainer.
//!
//! One entry per supplied policy, created at episode start and kept for the
//! whole episode, even after its agent has been removed.

use serde::{Deserialize, Serialize};

use crate::enums::DeathCause;
use crate::types::GenomeId;

/// When and why an agent left the live set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub cause: DeathCause,
    pub tick: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub index: usize,
    pub genome: GenomeId,
    pub fitness: f64,
    pub death: Option<DeathRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessLedger {
    entries: Vec<LedgerEntry>,
}

impl FitnessLedger {
    /// Open one zeroed entry per genome, indexed in the given order.
    pub fn new(genomes: impl IntoIterator<Item = GenomeId>) -> Self {
        let entries = genomes
            .into_iter()
            .enumerate()
            .map(|(index, genome)| LedgerEntry {
                index,
                genome,
                fitness: 0.0,
                death: None,
            })
            .collect();
        Self { entries }
    }

    pub fn credit(&mut self, index: usize, amount: f64) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.fitness += amount;
        }
    }

    pub fn debit(&mut self, index: usize, amount: f64) {
        self.credit(index, -amount);
    }

    /// Record the death once; later calls keep the first record.
    pub fn record_death(&mut self, index: usize, cause: DeathCause, tick: u64) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.death.get_or_insert(DeathRecord { cause, tick });
        }
    }

    pub fn fitness(&self, index: usize) -> Option<f64> {
        self.entries.get(index).map(|e| e.fitness)
    }

    pub fn by_genome(&self, genome: GenomeId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.genome == genome)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final result of an episode handed back to the trainer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub generation: u32,
    /// Obstacles passed.
    pub score: u32,
    /// Ticks simulated.
    pub ticks: u64,
    pub entries: Vec<LedgerEntry>,
}

impl EpisodeReport {
    /// Best entry by fitness (first one wins ties).
    pub fn best(&self) -> Option<&LedgerEntry> {
        self.entries.iter().fold(None, |best, e| match best {
            Some(b) if b.fitness >= e.fitness => Some(b),
            _ => Some(e),
        })
    }
}
