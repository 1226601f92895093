//! Rampart headless runner.
//!
//! Wires the simulation engine to a game-loop thread and a snapshot sink.

pub mod demo;
pub mod game_loop;
pub mod sink;
pub mod state;

pub use rampart_core as core;
