//! Error types shared by the configuration layer and the engine's action API.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::{EnemyKind, PowerUpKind, TowerKind};

/// Configuration could not be read or describes an impossible game.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("wave {wave} group {group}: spawn interval must be positive, got {interval}")]
    InvalidSpawnInterval {
        wave: usize,
        group: usize,
        interval: f64,
    },
    #[error("wave {wave} group {group}: initial delay must be non-negative, got {delay}")]
    InvalidInitialDelay { wave: usize, group: usize, delay: f64 },
    #[error("tower {kind:?}: {field} must be positive")]
    InvalidTowerStat {
        kind: TowerKind,
        field: &'static str,
    },
    #[error("tower {kind:?}: upgrade multiplier {field} must be positive")]
    InvalidUpgradeMultiplier {
        kind: TowerKind,
        field: &'static str,
    },
    #[error("enemy {kind:?}: {field} must be positive")]
    InvalidEnemyStat {
        kind: EnemyKind,
        field: &'static str,
    },
    #[error("power-up {kind:?}: {field} is out of range")]
    InvalidPowerUp {
        kind: PowerUpKind,
        field: &'static str,
    },
    #[error("max tower level must be at least 1")]
    InvalidMaxLevel,
    #[error("tick rate must be positive")]
    InvalidTickRate,
    #[error("starting lives must be at least 1")]
    InvalidStartingLives,
    #[error("total waves must be at least 1")]
    InvalidWavesTotal,
    #[error("projectile arrival distance must be finite and non-negative, got {0}")]
    InvalidArrivalDistance(f64),
}

/// An expected, non-exceptional rejection of a player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionError {
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("tower position must be non-negative")]
    InvalidPlacement,
    #[error("tower footprint overlaps an existing tower")]
    Overlap,
    #[error("no tower with id {0}")]
    UnknownTower(u32),
    #[error("tower is already at max level")]
    MaxLevel,
    #[error("power-up is on cooldown")]
    OnCooldown,
    #[error("power-up is already active")]
    AlreadyActive,
    #[error("power-up precondition not met")]
    PreconditionFailed,
    #[error("game is not running")]
    NotRunning,
    #[error("a wave is already in progress")]
    WaveInProgress,
}
