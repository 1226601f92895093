//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{DamageType, EnemyKind, PowerUpKind, TowerKind};
use crate::error::ActionError;
use crate::types::Position;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, total_enemies: u32 },
    WaveCleared { wave: u32, bonus: u32 },
    EnemySpawned { enemy_id: u32, kind: EnemyKind },
    /// Killed by damage; `gold` was credited.
    EnemyKilled { enemy_id: u32, kind: EnemyKind, gold: u32 },
    /// Reached the end of the path; one life was lost.
    EnemyLeaked { enemy_id: u32, kind: EnemyKind },
    ProjectileFired {
        projectile_id: u32,
        tower_id: u32,
        enemy_id: u32,
    },
    ProjectileImpact {
        projectile_id: u32,
        position: Position,
        damage_type: DamageType,
        /// Enemies damaged by this impact (primary target included).
        enemies_hit: u32,
    },
    TowerPlaced { tower_id: u32, kind: TowerKind },
    TowerUpgraded { tower_id: u32, level: u32 },
    TowerSold { tower_id: u32, refund: u32 },
    PowerUpActivated { kind: PowerUpKind, affected: u32 },
    PowerUpExpired { kind: PowerUpKind },
    ActionRejected { reason: ActionError },
    GameOver { victory: bool, wave: u32 },
}
