//! Core types and definitions for the FLOCK simulation.
//!
//! This crate defines the vocabulary shared by the engine and its callers:
//! components, tuning, opacity masks, the decision-policy capability, the
//! fitness ledger, snapshots and events. It has no ECS or runtime dependency.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod ledger;
pub mod mask;
pub mod policy;
pub mod state;
pub mod tuning;
pub mod types;

#[cfg(test)]
mod tests;
