//! Simulation engine for Rampart.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the render/UI layer.

pub mod damage;
pub mod economy;
pub mod engine;
pub mod path;
pub mod power_ups;
pub mod projectile;
pub mod systems;
pub mod tower;
pub mod wave_composer;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use path::{PathError, PathModel};
pub use rampart_core as core;

#[cfg(test)]
mod tests;
