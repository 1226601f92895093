//! Game state snapshot: the complete visible state handed to the render/UI
//! layer after each tick. Read-only; the UI never writes back through it.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimClock};

/// Complete game state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub clock: SimClock,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub economy: EconomyView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub power_ups: Vec<PowerUpView>,
    /// Events raised since the previous snapshot.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// Current (or last started) wave, 0 before the first.
    pub number: u32,
    pub total_waves: u32,
    pub in_progress: bool,
    pub spawned: u32,
    pub total_enemies: u32,
    /// Seconds since the current wave started.
    pub elapsed_secs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub gold: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    pub speed: f64,
    /// Fraction of the path walked, 0..=1.
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u32,
    pub kind: TowerKind,
    pub level: u32,
    pub max_level: u32,
    /// Top-left corner of the footprint.
    pub position: Position,
    pub center: Position,
    pub damage: i32,
    pub damage_type: DamageType,
    pub range: f64,
    pub fire_period_secs: f64,
    /// Seconds until the tower may fire again (0 when ready).
    pub cooldown_remaining_secs: f64,
    pub sell_refund: u32,
    pub upgrade_cost: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub position: Position,
    pub damage_type: DamageType,
    pub aoe_radius: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub kind: PowerUpKind,
    pub cost: u32,
    pub active: bool,
    /// Seconds left on the active effect (0 when inactive).
    pub remaining_secs: f64,
    /// Waves until the cooldown lifts (0 when off cooldown).
    pub cooldown_waves_remaining: u32,
    /// Whether activation would currently succeed.
    pub usable: bool,
}
