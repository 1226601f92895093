//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in map space (pixels, origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned footprint of a placed structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

/// Simulation clock: tick counter, elapsed time, speed multiplier and pause.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Current tick number (increments by 1 each unpaused tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds (after game speed scaling).
    pub elapsed_secs: f64,
    /// Multiplier applied to raw delta-time before any system sees it.
    pub game_speed: f64,
    /// While paused every subsystem receives a zero delta.
    pub paused: bool,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_non_negative(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        p.to_vec()
    }
}

impl Footprint {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether two footprints placed at the given top-left corners overlap.
    /// Touching edges do not count as overlap.
    pub fn overlaps(&self, at: Position, other: &Footprint, other_at: Position) -> bool {
        at.x < other_at.x + other.width
            && other_at.x < at.x + self.width
            && at.y < other_at.y + other.height
            && other_at.y < at.y + self.height
    }

    /// Centre point of the footprint placed at the given top-left corner.
    pub fn center_at(&self, at: Position) -> Position {
        Position::new(at.x + self.width / 2.0, at.y + self.height / 2.0)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self {
            tick: 0,
            elapsed_secs: 0.0,
            game_speed: 1.0,
            paused: false,
        }
    }
}

impl SimClock {
    /// Delta-time actually handed to the systems for a raw frame delta.
    pub fn effective_dt(&self, raw_dt: f64) -> f64 {
        if self.paused {
            0.0
        } else {
            (raw_dt * self.game_speed).max(0.0)
        }
    }

    /// Advance by one tick of the given effective delta.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }

    pub fn set_game_speed(&mut self, speed: f64) {
        self.game_speed = if speed.is_finite() {
            speed.clamp(0.0, crate::constants::MAX_GAME_SPEED)
        } else {
            1.0
        };
    }
}
