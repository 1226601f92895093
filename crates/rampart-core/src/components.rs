//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the simulation crate's
//! systems; the few helpers here only read or write their own fields.

use serde::{Deserialize, Serialize};

use crate::enums::{DamageType, EnemyKind};

/// Marks an entity as an enemy walking the path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable identity exposed to snapshots and tie-breaks.
    pub id: u32,
    pub kind: EnemyKind,
    /// Gold credited when this enemy is killed (never on leak).
    pub gold_value: u32,
}

/// Hit points. The enemy is dead once `current <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Movement speed along the path (pixels per second). Power-ups may change
/// it temporarily.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub current: f64,
}

/// How far along the path an enemy has walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProgress {
    /// Total distance travelled from the first waypoint.
    pub distance: f64,
    /// Index of the segment the enemy is on.
    pub segment: usize,
    /// Distance travelled within the current segment.
    pub offset: f64,
    /// Set once the enemy reaches the final waypoint.
    pub finished: bool,
}

/// Multiplicative damage modifiers keyed by incoming damage type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceProfile {
    pub physical: f64,
    pub magic: f64,
    pub explosive: f64,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

impl Default for ResistanceProfile {
    fn default() -> Self {
        Self {
            physical: 1.0,
            magic: 1.0,
            explosive: 1.0,
        }
    }
}

impl ResistanceProfile {
    pub fn multiplier(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magic => self.magic,
            DamageType::Explosive => self.explosive,
        }
    }

    pub fn set(&mut self, damage_type: DamageType, multiplier: f64) {
        match damage_type {
            DamageType::Physical => self.physical = multiplier,
            DamageType::Magic => self.magic = multiplier,
            DamageType::Explosive => self.explosive = multiplier,
        }
    }
}
