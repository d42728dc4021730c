//! Headless simulation engine for a flock of policy-driven flappers.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces `EpisodeSnapshot`s and fitness reports for a trainer.

pub mod collision;
pub mod engine;
pub mod kinematics;
pub mod systems;
pub mod world_setup;

pub use engine::{Episode, EpisodeError, SimConfig};
pub use flock_core as core;
