//! Configuration provider: every tunable numeric parameter of a session.
//!
//! A [`GameConfig`] is built once (defaults, a key-value parameter file, or
//! JSON), validated, and then handed to the engine by value. Nothing in the
//! simulation reads configuration from anywhere else.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::ResistanceProfile;
use crate::constants::*;
use crate::enums::{DamageType, EnemyKind, PowerUpKind, TowerKind};
use crate::error::ConfigError;
use crate::types::Footprint;

/// Complete parameter set for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub towers: TowerTable,
    pub enemies: EnemyTable,
    pub power_ups: PowerUpTable,
    /// Explicit wave definitions, wave 1 first. Waves past the end of this
    /// list are composed procedurally.
    pub waves: Vec<WaveDefinition>,
    /// Clearing this wave wins the game.
    pub waves_total: u32,
    pub max_tower_level: u32,
    pub projectile_arrival_distance: f64,
    pub tick_rate: u32,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_gold: u32,
    pub starting_lives: u32,
    /// Gold credited each time a wave is cleared.
    pub wave_clear_bonus: u32,
}

/// Per-level multipliers applied to a tower's base stats when it reaches
/// the next level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeStep {
    pub damage: f64,
    pub range: f64,
    pub fire_period: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerSpec {
    pub cost: u32,
    pub upgrade_cost: u32,
    pub damage: i32,
    pub range: f64,
    pub fire_period_secs: f64,
    pub projectile_speed: f64,
    /// Splash radius around the impact point; `None` for single-target towers.
    pub aoe_radius: Option<f64>,
    pub size: Footprint,
    /// `upgrades[0]` takes the tower from level 1 to 2, and so on. The last
    /// step repeats if the max level exceeds the table.
    pub upgrades: Vec<UpgradeStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub health: i32,
    pub speed: f64,
    pub gold_value: u32,
    pub resistances: ResistanceProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpSpec {
    pub cost: u32,
    /// Waves that must pass before the power-up can be used again.
    pub cooldown_waves: u32,
    pub duration_secs: f64,
    /// Speed multiplier while active (0 for a freeze).
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerTable {
    pub arrow: TowerSpec,
    pub cannon: TowerSpec,
    pub mage: TowerSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    pub grunt: EnemySpec,
    pub runner: EnemySpec,
    pub armored: EnemySpec,
    pub swarm: EnemySpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTable {
    pub freeze: PowerUpSpec,
    pub slow: PowerUpSpec,
}

/// One group of identical enemies inside a wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub enemy: EnemyKind,
    pub count: u32,
    /// Seconds between consecutive spawns of this group.
    pub interval_secs: f64,
    /// Seconds after wave start before the first spawn of this group.
    pub initial_delay_secs: f64,
}

/// A wave: groups that spawn independently and may overlap in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub groups: Vec<SpawnGroup>,
}

impl WaveDefinition {
    pub fn new(groups: Vec<SpawnGroup>) -> Self {
        Self { groups }
    }

    /// Total enemies across all groups.
    pub fn total_enemies(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }
}

impl SpawnGroup {
    pub fn new(enemy: EnemyKind, count: u32, interval_secs: f64, initial_delay_secs: f64) -> Self {
        Self {
            enemy,
            count,
            interval_secs,
            initial_delay_secs,
        }
    }
}

impl UpgradeStep {
    pub const IDENTITY: UpgradeStep = UpgradeStep {
        damage: 1.0,
        range: 1.0,
        fire_period: 1.0,
    };
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            economy: EconomyConfig::default(),
            towers: TowerTable::default(),
            enemies: EnemyTable::default(),
            power_ups: PowerUpTable::default(),
            waves: default_waves(),
            waves_total: WAVES_TOTAL,
            max_tower_level: MAX_TOWER_LEVEL,
            projectile_arrival_distance: PROJECTILE_ARRIVAL_DISTANCE,
            tick_rate: TICK_RATE,
            seed: DEFAULT_SEED,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_gold: STARTING_GOLD,
            starting_lives: STARTING_LIVES,
            wave_clear_bonus: WAVE_CLEAR_BONUS,
        }
    }
}

impl Default for TowerTable {
    fn default() -> Self {
        let size = Footprint::new(TOWER_SIZE, TOWER_SIZE);
        Self {
            // Upgrade keeps damage, reaches further and fires twice as often.
            arrow: TowerSpec {
                cost: ARROW_COST,
                upgrade_cost: ARROW_UPGRADE_COST,
                damage: ARROW_DAMAGE,
                range: ARROW_RANGE,
                fire_period_secs: ARROW_FIRE_PERIOD,
                projectile_speed: ARROW_PROJECTILE_SPEED,
                aoe_radius: None,
                size,
                upgrades: vec![UpgradeStep {
                    damage: 1.0,
                    range: 1.25,
                    fire_period: 0.5,
                }],
            },
            // Upgrade keeps cadence, hits harder and further.
            cannon: TowerSpec {
                cost: CANNON_COST,
                upgrade_cost: CANNON_UPGRADE_COST,
                damage: CANNON_DAMAGE,
                range: CANNON_RANGE,
                fire_period_secs: CANNON_FIRE_PERIOD,
                projectile_speed: CANNON_PROJECTILE_SPEED,
                aoe_radius: Some(CANNON_AOE_RADIUS),
                size,
                upgrades: vec![UpgradeStep {
                    damage: 1.5,
                    range: 1.2,
                    fire_period: 1.0,
                }],
            },
            mage: TowerSpec {
                cost: MAGE_COST,
                upgrade_cost: MAGE_UPGRADE_COST,
                damage: MAGE_DAMAGE,
                range: MAGE_RANGE,
                fire_period_secs: MAGE_FIRE_PERIOD,
                projectile_speed: MAGE_PROJECTILE_SPEED,
                aoe_radius: None,
                size,
                upgrades: vec![UpgradeStep {
                    damage: 1.3,
                    range: 1.1,
                    fire_period: 0.8,
                }],
            },
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            grunt: EnemySpec {
                health: GRUNT_HEALTH,
                speed: GRUNT_SPEED,
                gold_value: GRUNT_GOLD,
                resistances: ResistanceProfile::default(),
            },
            runner: EnemySpec {
                health: RUNNER_HEALTH,
                speed: RUNNER_SPEED,
                gold_value: RUNNER_GOLD,
                resistances: ResistanceProfile::default(),
            },
            armored: EnemySpec {
                health: ARMORED_HEALTH,
                speed: ARMORED_SPEED,
                gold_value: ARMORED_GOLD,
                resistances: ResistanceProfile {
                    physical: RESISTANCE_MULTIPLIER,
                    magic: WEAKNESS_MULTIPLIER,
                    explosive: 1.0,
                },
            },
            swarm: EnemySpec {
                health: SWARM_HEALTH,
                speed: SWARM_SPEED,
                gold_value: SWARM_GOLD,
                resistances: ResistanceProfile {
                    physical: 1.0,
                    magic: RESISTANCE_MULTIPLIER,
                    explosive: WEAKNESS_MULTIPLIER,
                },
            },
        }
    }
}

impl Default for PowerUpTable {
    fn default() -> Self {
        Self {
            freeze: PowerUpSpec {
                cost: FREEZE_COST,
                cooldown_waves: FREEZE_COOLDOWN_WAVES,
                duration_secs: FREEZE_DURATION_SECS,
                factor: 0.0,
            },
            slow: PowerUpSpec {
                cost: SLOW_COST,
                cooldown_waves: SLOW_COOLDOWN_WAVES,
                duration_secs: SLOW_DURATION_SECS,
                factor: SLOW_FACTOR,
            },
        }
    }
}

impl TowerTable {
    pub fn get(&self, kind: TowerKind) -> &TowerSpec {
        match kind {
            TowerKind::Arrow => &self.arrow,
            TowerKind::Cannon => &self.cannon,
            TowerKind::Mage => &self.mage,
        }
    }

    pub fn get_mut(&mut self, kind: TowerKind) -> &mut TowerSpec {
        match kind {
            TowerKind::Arrow => &mut self.arrow,
            TowerKind::Cannon => &mut self.cannon,
            TowerKind::Mage => &mut self.mage,
        }
    }
}

impl EnemyTable {
    pub fn get(&self, kind: EnemyKind) -> &EnemySpec {
        match kind {
            EnemyKind::Grunt => &self.grunt,
            EnemyKind::Runner => &self.runner,
            EnemyKind::Armored => &self.armored,
            EnemyKind::Swarm => &self.swarm,
        }
    }

    pub fn get_mut(&mut self, kind: EnemyKind) -> &mut EnemySpec {
        match kind {
            EnemyKind::Grunt => &mut self.grunt,
            EnemyKind::Runner => &mut self.runner,
            EnemyKind::Armored => &mut self.armored,
            EnemyKind::Swarm => &mut self.swarm,
        }
    }
}

impl PowerUpTable {
    pub fn get(&self, kind: PowerUpKind) -> &PowerUpSpec {
        match kind {
            PowerUpKind::Freeze => &self.freeze,
            PowerUpKind::Slow => &self.slow,
        }
    }

    pub fn get_mut(&mut self, kind: PowerUpKind) -> &mut PowerUpSpec {
        match kind {
            PowerUpKind::Freeze => &mut self.freeze,
            PowerUpKind::Slow => &mut self.slow,
        }
    }
}

/// The three hand-authored opening waves.
fn default_waves() -> Vec<WaveDefinition> {
    vec![
        WaveDefinition::new(vec![SpawnGroup::new(EnemyKind::Grunt, 8, 1.0, 0.0)]),
        WaveDefinition::new(vec![
            SpawnGroup::new(EnemyKind::Grunt, 6, 1.0, 0.0),
            SpawnGroup::new(EnemyKind::Runner, 4, 0.8, 3.0),
        ]),
        WaveDefinition::new(vec![
            SpawnGroup::new(EnemyKind::Armored, 3, 2.0, 0.0),
            SpawnGroup::new(EnemyKind::Swarm, 10, 0.4, 2.0),
        ]),
    ]
}

impl GameConfig {
    /// Seconds per fixed tick.
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Parse JSON, layering whatever it provides over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    /// Read a key-value parameter file from disk.
    pub fn load_key_values(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_key_values(&text))
    }

    /// Build a config from `key = value` lines layered over the defaults.
    ///
    /// Never fails: unknown keys and unusable values are logged and the
    /// default is kept.
    pub fn from_key_values(text: &str) -> Self {
        let mut config = Self::default();
        let mut waves: BTreeMap<u32, BTreeMap<u32, SpawnGroup>> = BTreeMap::new();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) else {
                tracing::warn!(line = line_no + 1, "ignoring parameter line without '='");
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim();

            let result = if let Some(rest) = key.strip_prefix("wave.") {
                parse_wave_group(rest, value).map(|(wave, group, spawn)| {
                    waves.entry(wave).or_default().insert(group, spawn);
                })
            } else {
                config.apply_key_value(&key, value)
            };

            if let Err(reason) = result {
                tracing::warn!(
                    line = line_no + 1,
                    key = %key,
                    value,
                    reason,
                    "keeping default for parameter"
                );
            }
        }

        if let Some(&last) = waves.keys().next_back() {
            config.waves = (1..=last)
                .map(|n| {
                    let groups: Vec<SpawnGroup> = waves
                        .get(&n)
                        .map(|g| g.values().copied().collect())
                        .unwrap_or_default();
                    if groups.is_empty() {
                        tracing::warn!(wave = n, "wave has no spawn groups");
                    }
                    WaveDefinition::new(groups)
                })
                .collect();
        }

        config
    }

    fn apply_key_value(&mut self, key: &str, value: &str) -> Result<(), &'static str> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["economy", "starting_gold"] => self.economy.starting_gold = parse_u32(value)?,
            ["economy", "starting_lives"] => self.economy.starting_lives = parse_positive_u32(value)?,
            ["economy", "wave_clear_bonus"] => self.economy.wave_clear_bonus = parse_u32(value)?,
            ["waves", "total"] => self.waves_total = parse_positive_u32(value)?,
            ["tower", "max_level"] => self.max_tower_level = parse_positive_u32(value)?,
            ["projectile", "arrival_distance"] => {
                self.projectile_arrival_distance = parse_positive_f64(value)?
            }
            ["tick_rate"] => self.tick_rate = parse_positive_u32(value)?,
            ["seed"] => self.seed = value.parse().map_err(|_| "not an integer")?,
            ["tower", kind, field] => {
                let kind = TowerKind::parse(kind).ok_or("unknown tower kind")?;
                apply_tower_field(self.towers.get_mut(kind), field, value)?;
            }
            ["tower", kind, "upgrade", level, field] => {
                let kind = TowerKind::parse(kind).ok_or("unknown tower kind")?;
                let level: usize = level.parse().map_err(|_| "upgrade level is not an integer")?;
                apply_upgrade_field(self.towers.get_mut(kind), level, field, value)?;
            }
            ["enemy", kind, field] => {
                let kind = EnemyKind::parse(kind).ok_or("unknown enemy kind")?;
                let spec = self.enemies.get_mut(kind);
                match *field {
                    "health" => spec.health = parse_positive_i32(value)?,
                    "speed" => spec.speed = parse_positive_f64(value)?,
                    "gold" | "gold_value" => spec.gold_value = parse_u32(value)?,
                    _ => return Err("unknown enemy field"),
                }
            }
            ["enemy", kind, "resist", damage] => {
                let kind = EnemyKind::parse(kind).ok_or("unknown enemy kind")?;
                let damage = DamageType::parse(damage).ok_or("unknown damage type")?;
                let multiplier = parse_non_negative_f64(value)?;
                self.enemies.get_mut(kind).resistances.set(damage, multiplier);
            }
            ["powerup", kind, field] => {
                let kind = PowerUpKind::parse(kind).ok_or("unknown power-up kind")?;
                let spec = self.power_ups.get_mut(kind);
                match *field {
                    "cost" => spec.cost = parse_u32(value)?,
                    "cooldown_waves" => spec.cooldown_waves = parse_u32(value)?,
                    "duration" | "duration_secs" => spec.duration_secs = parse_positive_f64(value)?,
                    "factor" => {
                        let factor = parse_non_negative_f64(value)?;
                        if factor > 1.0 {
                            return Err("factor must be within 0..=1");
                        }
                        spec.factor = factor;
                    }
                    _ => return Err("unknown power-up field"),
                }
            }
            _ => return Err("unknown parameter"),
        }
        Ok(())
    }

    /// Reject configurations that describe an impossible game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::InvalidTickRate);
        }
        if self.max_tower_level == 0 {
            return Err(ConfigError::InvalidMaxLevel);
        }
        if self.economy.starting_lives == 0 {
            return Err(ConfigError::InvalidStartingLives);
        }
        if self.waves_total == 0 {
            return Err(ConfigError::InvalidWavesTotal);
        }
        let arrival = self.projectile_arrival_distance;
        if !arrival.is_finite() || arrival < 0.0 {
            return Err(ConfigError::InvalidArrivalDistance(arrival));
        }

        for kind in TowerKind::ALL {
            let spec = self.towers.get(kind);
            let checks = [
                (spec.damage > 0, "damage"),
                (spec.range > 0.0, "range"),
                (spec.fire_period_secs > 0.0, "fire_period_secs"),
                (spec.projectile_speed > 0.0, "projectile_speed"),
                (spec.size.width > 0.0 && spec.size.height > 0.0, "size"),
                (spec.aoe_radius.map_or(true, |r| r > 0.0), "aoe_radius"),
            ];
            if let Some((_, field)) = checks.into_iter().find(|(ok, _)| !ok) {
                return Err(ConfigError::InvalidTowerStat { kind, field });
            }
            for step in &spec.upgrades {
                let steps = [
                    (step.damage > 0.0, "damage"),
                    (step.range > 0.0, "range"),
                    (step.fire_period > 0.0, "fire_period"),
                ];
                if let Some((_, field)) = steps.into_iter().find(|(ok, _)| !ok) {
                    return Err(ConfigError::InvalidUpgradeMultiplier { kind, field });
                }
            }
        }

        for kind in EnemyKind::ALL {
            let spec = self.enemies.get(kind);
            if spec.health <= 0 {
                return Err(ConfigError::InvalidEnemyStat {
                    kind,
                    field: "health",
                });
            }
            if spec.speed <= 0.0 {
                return Err(ConfigError::InvalidEnemyStat {
                    kind,
                    field: "speed",
                });
            }
        }

        for kind in PowerUpKind::ALL {
            let spec = self.power_ups.get(kind);
            if spec.duration_secs <= 0.0 {
                return Err(ConfigError::InvalidPowerUp {
                    kind,
                    field: "duration_secs",
                });
            }
            if !(0.0..=1.0).contains(&spec.factor) {
                return Err(ConfigError::InvalidPowerUp {
                    kind,
                    field: "factor",
                });
            }
        }

        for (wave, definition) in self.waves.iter().enumerate() {
            for (group, spawn) in definition.groups.iter().enumerate() {
                if spawn.interval_secs <= 0.0 || spawn.interval_secs.is_nan() {
                    return Err(ConfigError::InvalidSpawnInterval {
                        wave: wave + 1,
                        group,
                        interval: spawn.interval_secs,
                    });
                }
                if spawn.initial_delay_secs < 0.0 || spawn.initial_delay_secs.is_nan() {
                    return Err(ConfigError::InvalidInitialDelay {
                        wave: wave + 1,
                        group,
                        delay: spawn.initial_delay_secs,
                    });
                }
            }
        }

        Ok(())
    }
}

fn apply_tower_field(spec: &mut TowerSpec, field: &str, value: &str) -> Result<(), &'static str> {
    match field {
        "cost" => spec.cost = parse_u32(value)?,
        "upgrade_cost" => spec.upgrade_cost = parse_u32(value)?,
        "damage" => spec.damage = parse_positive_i32(value)?,
        "range" => spec.range = parse_positive_f64(value)?,
        "fire_period" | "fire_rate" => spec.fire_period_secs = parse_positive_f64(value)?,
        "projectile_speed" => spec.projectile_speed = parse_positive_f64(value)?,
        "aoe_radius" => {
            let radius = parse_non_negative_f64(value)?;
            spec.aoe_radius = (radius > 0.0).then_some(radius);
        }
        "width" => spec.size.width = parse_positive_f64(value)?,
        "height" => spec.size.height = parse_positive_f64(value)?,
        _ => return Err("unknown tower field"),
    }
    Ok(())
}

/// `level` is the level the step leads to, so level 2 is `upgrades[0]`.
fn apply_upgrade_field(
    spec: &mut TowerSpec,
    level: usize,
    field: &str,
    value: &str,
) -> Result<(), &'static str> {
    let index = level.checked_sub(2).ok_or("upgrade levels start at 2")?;
    if index > spec.upgrades.len() {
        return Err("upgrade levels must be defined in order");
    }
    if index == spec.upgrades.len() {
        spec.upgrades.push(UpgradeStep::IDENTITY);
    }
    let multiplier = parse_positive_f64(value)?;
    let step = &mut spec.upgrades[index];
    match field {
        "damage" => step.damage = multiplier,
        "range" => step.range = multiplier,
        "fire_period" | "fire_rate" => step.fire_period = multiplier,
        _ => return Err("unknown upgrade field"),
    }
    Ok(())
}

/// `wave.<n>.<g> = <enemy> <count> <interval> <delay>`; waves are 1-based,
/// groups 0-based.
fn parse_wave_group(rest: &str, value: &str) -> Result<(u32, u32, SpawnGroup), &'static str> {
    let (wave, group) = rest.split_once('.').ok_or("expected wave.<n>.<group>")?;
    let wave: u32 = wave.parse().map_err(|_| "wave number is not an integer")?;
    let group: u32 = group.parse().map_err(|_| "group index is not an integer")?;
    if wave == 0 {
        return Err("waves are numbered from 1");
    }

    let fields: Vec<&str> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let [enemy, count, interval, delay] = fields.as_slice() else {
        return Err("expected '<enemy> <count> <interval> <delay>'");
    };

    let enemy = EnemyKind::parse(enemy).ok_or("unknown enemy kind")?;
    let count = parse_u32(count)?;
    let interval = parse_positive_f64(interval).map_err(|_| "spawn interval must be positive")?;
    let delay = parse_non_negative_f64(delay)?;

    Ok((wave, group, SpawnGroup::new(enemy, count, interval, delay)))
}

fn parse_u32(value: &str) -> Result<u32, &'static str> {
    value.parse().map_err(|_| "not a non-negative integer")
}

fn parse_positive_u32(value: &str) -> Result<u32, &'static str> {
    match parse_u32(value)? {
        0 => Err("must be positive"),
        v => Ok(v),
    }
}

fn parse_positive_i32(value: &str) -> Result<i32, &'static str> {
    let v: i32 = value.parse().map_err(|_| "not an integer")?;
    if v > 0 {
        Ok(v)
    } else {
        Err("must be positive")
    }
}

fn parse_non_negative_f64(value: &str) -> Result<f64, &'static str> {
    let v: f64 = value.parse().map_err(|_| "not a number")?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err("must be a finite non-negative number")
    }
}

fn parse_positive_f64(value: &str) -> Result<f64, &'static str> {
    match parse_non_negative_f64(value)? {
        v if v > 0.0 => Ok(v),
        _ => Err("must be positive"),
    }
}

/// Deep-merge `overrides` into `base`; objects merge per key, everything
/// else replaces.
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
