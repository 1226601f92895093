//! Player commands sent from the UI layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Rejections
//! come back as `GameEvent::ActionRejected`.

use serde::{Deserialize, Serialize};

use crate::enums::{PowerUpKind, TowerKind};
use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session ---
    /// Reset economy and world and enter the building phase.
    StartGame,
    /// Begin the next wave.
    StartWave,

    // --- Towers ---
    /// Place a tower with its footprint's top-left corner at `position`.
    PlaceTower { kind: TowerKind, position: Position },
    UpgradeTower { tower_id: u32 },
    SellTower { tower_id: u32 },
    /// Place a fresh copy of an existing tower at a new position.
    DuplicateTower { tower_id: u32, position: Position },

    // --- Power-ups ---
    ActivatePowerUp { kind: PowerUpKind },

    // --- Clock ---
    /// Set game speed (1.0 = normal, clamped to 0..=4).
    SetGameSpeed { speed: f64 },
    Pause,
    Resume,
}
