//! Simulation constants and default tuning parameters.
//!
//! Everything here is a fallback for [`crate::config::GameConfig`]; the
//! engine itself only reads values through the config it was built with.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Upper bound for the game-speed multiplier.
pub const MAX_GAME_SPEED: f64 = 4.0;

/// Tolerance when comparing scheduled times against elapsed time.
pub const TIME_EPSILON: f64 = 1e-9;

// --- Economy ---

pub const STARTING_GOLD: u32 = 250;
pub const STARTING_LIVES: u32 = 20;
pub const WAVE_CLEAR_BONUS: u32 = 25;

/// Sell refund as a percentage of a tower's base cost.
/// Upgrade spending is never refunded.
pub const SELL_REFUND_PERCENT: u32 = 75;

// --- Towers ---

/// Highest tower level reachable by upgrading.
pub const MAX_TOWER_LEVEL: u32 = 2;

/// Default square tower footprint edge (pixels).
pub const TOWER_SIZE: f64 = 32.0;

pub const ARROW_COST: u32 = 50;
pub const ARROW_UPGRADE_COST: u32 = 40;
pub const ARROW_DAMAGE: i32 = 10;
pub const ARROW_RANGE: f64 = 120.0;
pub const ARROW_FIRE_PERIOD: f64 = 1.0;
pub const ARROW_PROJECTILE_SPEED: f64 = 400.0;

pub const CANNON_COST: u32 = 100;
pub const CANNON_UPGRADE_COST: u32 = 80;
pub const CANNON_DAMAGE: i32 = 20;
pub const CANNON_RANGE: f64 = 100.0;
pub const CANNON_FIRE_PERIOD: f64 = 2.0;
pub const CANNON_PROJECTILE_SPEED: f64 = 250.0;
pub const CANNON_AOE_RADIUS: f64 = 50.0;

pub const MAGE_COST: u32 = 80;
pub const MAGE_UPGRADE_COST: u32 = 60;
pub const MAGE_DAMAGE: i32 = 15;
pub const MAGE_RANGE: f64 = 150.0;
pub const MAGE_FIRE_PERIOD: f64 = 1.5;
pub const MAGE_PROJECTILE_SPEED: f64 = 320.0;

// --- Enemies ---

pub const GRUNT_HEALTH: i32 = 50;
pub const GRUNT_SPEED: f64 = 40.0;
pub const GRUNT_GOLD: u32 = 5;

pub const RUNNER_HEALTH: i32 = 30;
pub const RUNNER_SPEED: f64 = 80.0;
pub const RUNNER_GOLD: u32 = 4;

pub const ARMORED_HEALTH: i32 = 120;
pub const ARMORED_SPEED: f64 = 25.0;
pub const ARMORED_GOLD: u32 = 12;

pub const SWARM_HEALTH: i32 = 20;
pub const SWARM_SPEED: f64 = 60.0;
pub const SWARM_GOLD: u32 = 2;

/// Multiplier applied for damage types an enemy is weak to.
pub const WEAKNESS_MULTIPLIER: f64 = 1.5;
/// Multiplier applied for damage types an enemy resists.
pub const RESISTANCE_MULTIPLIER: f64 = 0.7;

// --- Projectiles ---

/// Distance at which a projectile counts as having arrived (pixels).
pub const PROJECTILE_ARRIVAL_DISTANCE: f64 = 4.0;

// --- Power-ups ---

pub const FREEZE_COST: u32 = 100;
pub const FREEZE_COOLDOWN_WAVES: u32 = 3;
pub const FREEZE_DURATION_SECS: f64 = 3.0;

pub const SLOW_COST: u32 = 60;
pub const SLOW_COOLDOWN_WAVES: u32 = 2;
pub const SLOW_DURATION_SECS: f64 = 5.0;
pub const SLOW_FACTOR: f64 = 0.5;

// --- Waves ---

/// Number of waves in a session when not configured otherwise.
pub const WAVES_TOTAL: u32 = 10;

/// Seed for the procedural wave composer.
pub const DEFAULT_SEED: u64 = 42;
