//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Categorical damage tag used to look up per-enemy resistance multipliers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DamageType {
    #[default]
    Physical,
    Magic,
    Explosive,
}

/// Tower archetype. Fixes damage type, projectile and upgrade curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fast single-target physical shooter.
    Arrow,
    /// Slow explosive shells with an area of effect.
    Cannon,
    /// Long-range magic bolts.
    Mage,
}

/// Enemy archetype. Fixes health, speed, bounty and resistances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Runner,
    Armored,
    Swarm,
}

/// Globally acting timed power-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Zeroes every live enemy's speed for a fixed duration.
    Freeze,
    /// Scales every live enemy's speed down for a fixed duration.
    Slow,
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet.
    #[default]
    Idle,
    /// Between waves: towers may be placed, next wave not yet started.
    Building,
    /// A wave is spawning or enemies are still alive.
    WaveActive,
    /// Final wave cleared.
    Victory,
    /// Lives exhausted.
    Defeat,
}

impl DamageType {
    pub const ALL: [DamageType; 3] = [DamageType::Physical, DamageType::Magic, DamageType::Explosive];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "physical" => Some(Self::Physical),
            "magic" => Some(Self::Magic),
            "explosive" => Some(Self::Explosive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Magic => "magic",
            Self::Explosive => "explosive",
        }
    }
}

impl TowerKind {
    pub const ALL: [TowerKind; 3] = [TowerKind::Arrow, TowerKind::Cannon, TowerKind::Mage];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrow" => Some(Self::Arrow),
            "cannon" => Some(Self::Cannon),
            "mage" => Some(Self::Mage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Cannon => "cannon",
            Self::Mage => "mage",
        }
    }

    /// Damage type dealt by every tower of this kind.
    pub fn damage_type(&self) -> DamageType {
        match self {
            Self::Arrow => DamageType::Physical,
            Self::Cannon => DamageType::Explosive,
            Self::Mage => DamageType::Magic,
        }
    }
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Grunt,
        EnemyKind::Runner,
        EnemyKind::Armored,
        EnemyKind::Swarm,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grunt" => Some(Self::Grunt),
            "runner" => Some(Self::Runner),
            "armored" => Some(Self::Armored),
            "swarm" => Some(Self::Swarm),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Runner => "runner",
            Self::Armored => "armored",
            Self::Swarm => "swarm",
        }
    }
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Freeze, PowerUpKind::Slow];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freeze" => Some(Self::Freeze),
            "slow" => Some(Self::Slow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freeze => "freeze",
            Self::Slow => "slow",
        }
    }
}

impl GamePhase {
    /// Whether the simulation systems run in this phase.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Building | Self::WaveActive)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}
