//! ECS systems that operate on the episode world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They do not own state; the engine passes in the ledger, tuning and event
//! buffer they need and calls them in a fixed order.

pub mod animation;
pub mod boundary;
pub mod cleanup;
pub mod collisions;
pub mod flight;
pub mod ground;
pub mod obstacles;
pub mod snapshot;
