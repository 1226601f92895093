//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only).
//! State that outlives a tick lives in components or in the engine.

pub mod cleanup;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
pub mod wave_spawner;
