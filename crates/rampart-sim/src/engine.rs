//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed order, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::components::Enemy;
use rampart_core::config::GameConfig;
use rampart_core::enums::{GamePhase, PowerUpKind, TowerKind};
use rampart_core::error::{ActionError, ConfigError};
use rampart_core::events::GameEvent;
use rampart_core::state::{GameStateSnapshot, PowerUpView, WaveView};
use rampart_core::types::{Footprint, Position, SimClock};

use crate::economy::Economy;
use crate::path::PathModel;
use crate::power_ups::{self, PowerUpManager};
use crate::systems;
use crate::systems::wave_spawner::SpawnScheduler;
use crate::tower::Tower;
use crate::wave_composer;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    config: GameConfig,
    path: PathModel,
    clock: SimClock,
    phase: GamePhase,
    rng: ChaCha8Rng,
    economy: Economy,
    power_ups: PowerUpManager,
    /// Spawn timeline of the wave in progress.
    scheduler: Option<SpawnScheduler>,
    /// Current (or last started) wave, 0 before the first.
    wave_number: u32,
    next_enemy_id: u32,
    next_tower_id: u32,
    next_projectile_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create an engine for one map. The configuration is validated first.
    pub fn new(config: GameConfig, path: PathModel) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            economy: Economy::new(&config.economy),
            config,
            path,
            clock: SimClock::default(),
            phase: GamePhase::default(),
            power_ups: PowerUpManager::new(),
            scheduler: None,
            wave_number: 0,
            next_enemy_id: 1,
            next_tower_id: 1,
            next_projectile_id: 1,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one fixed tick (`1 / tick_rate` seconds of raw time).
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.advance(self.config.tick_dt())
    }

    /// Advance by a raw frame delta. Game speed scales it; pausing or a
    /// finished game skips every system.
    pub fn advance(&mut self, raw_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase.is_running() {
            let dt = self.clock.effective_dt(raw_dt);
            if dt > 0.0 {
                self.run_systems(dt);
                self.clock.advance(dt);
            }
        }

        self.snapshot()
    }

    // --- Session ---

    /// Reset world and economy and enter the building phase.
    pub fn start_game(&mut self) {
        self.power_ups.reset(&mut self.world);
        self.world.clear();
        self.economy = Economy::new(&self.config.economy);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.clock = SimClock {
            game_speed: self.clock.game_speed,
            ..SimClock::default()
        };
        self.scheduler = None;
        self.wave_number = 0;
        self.next_enemy_id = 1;
        self.next_tower_id = 1;
        self.next_projectile_id = 1;
        self.phase = GamePhase::Building;
        tracing::info!(
            gold = self.economy.gold,
            lives = self.economy.lives,
            "game started"
        );
    }

    /// Begin the next wave. Returns its number.
    pub fn start_wave(&mut self) -> Result<u32, ActionError> {
        match self.phase {
            GamePhase::Building => {}
            GamePhase::WaveActive => return Err(ActionError::WaveInProgress),
            _ => return Err(ActionError::NotRunning),
        }

        let wave = self.wave_number + 1;
        let definition = self
            .config
            .waves
            .get(wave as usize - 1)
            .cloned()
            .unwrap_or_else(|| wave_composer::compose_wave(wave, &mut self.rng));
        let scheduler = SpawnScheduler::new(wave, &definition).unwrap_or_else(|err| {
            tracing::error!(wave, %err, "invalid wave definition, skipping its spawns");
            SpawnScheduler::default()
        });

        let total_enemies = scheduler.total();
        self.scheduler = Some(scheduler);
        self.wave_number = wave;
        self.phase = GamePhase::WaveActive;
        self.events.push(GameEvent::WaveStarted {
            wave,
            total_enemies,
        });
        tracing::info!(wave, total_enemies, "wave started");
        Ok(wave)
    }

    pub fn set_game_speed(&mut self, speed: f64) {
        self.clock.set_game_speed(speed);
    }

    pub fn pause(&mut self) {
        self.clock.paused = true;
    }

    pub fn resume(&mut self) {
        self.clock.paused = false;
    }

    // --- Towers ---

    /// Place a new tower with its footprint's top-left corner at `position`.
    pub fn place_tower(&mut self, kind: TowerKind, position: Position) -> Result<u32, ActionError> {
        self.ensure_running()?;
        let spec = self.config.towers.get(kind);
        if !position.is_non_negative() {
            return Err(ActionError::InvalidPlacement);
        }
        self.ensure_free(&spec.size, position)?;

        let id = self.next_tower_id;
        let tower = Tower::new(id, kind, position, spec, self.config.max_tower_level)?;
        self.economy.try_spend(spec.cost)?;
        self.next_tower_id += 1;
        world_setup::spawn_tower(&mut self.world, tower);

        self.events.push(GameEvent::TowerPlaced { tower_id: id, kind });
        tracing::debug!(tower = id, ?kind, x = position.x, y = position.y, "tower placed");
        Ok(id)
    }

    /// Upgrade a tower one level. Gold is charged only on success. Returns
    /// the new level.
    pub fn upgrade_tower(&mut self, tower_id: u32) -> Result<u32, ActionError> {
        self.ensure_running()?;
        let entity = self
            .find_tower(tower_id)
            .ok_or(ActionError::UnknownTower(tower_id))?;
        let mut tower = self
            .world
            .get::<&mut Tower>(entity)
            .map_err(|_| ActionError::UnknownTower(tower_id))?;

        let cost = tower.upgrade_cost().ok_or(ActionError::MaxLevel)?;
        if !self.economy.can_afford(cost) {
            return Err(ActionError::InsufficientGold {
                needed: cost,
                available: self.economy.gold,
            });
        }
        if !tower.upgrade() {
            return Err(ActionError::MaxLevel);
        }
        self.economy.try_spend(cost)?;

        let level = tower.level();
        drop(tower);
        self.events.push(GameEvent::TowerUpgraded { tower_id, level });
        tracing::debug!(tower = tower_id, level, cost, "tower upgraded");
        Ok(level)
    }

    /// Remove a tower and credit its refund. Projectiles it already fired
    /// keep flying. Returns the refund.
    pub fn sell_tower(&mut self, tower_id: u32) -> Result<u32, ActionError> {
        self.ensure_running()?;
        let entity = self
            .find_tower(tower_id)
            .ok_or(ActionError::UnknownTower(tower_id))?;
        let refund = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.sell_refund())
            .map_err(|_| ActionError::UnknownTower(tower_id))?;

        let _ = self.world.despawn(entity);
        self.economy.credit(refund);
        self.events.push(GameEvent::TowerSold { tower_id, refund });
        tracing::debug!(tower = tower_id, refund, "tower sold");
        Ok(refund)
    }

    /// Place a fresh level-1 copy of an existing tower at `position`,
    /// paying its base cost. Returns the new tower's id.
    pub fn duplicate_tower(&mut self, tower_id: u32, position: Position) -> Result<u32, ActionError> {
        self.ensure_running()?;
        let entity = self
            .find_tower(tower_id)
            .ok_or(ActionError::UnknownTower(tower_id))?;
        let id = self.next_tower_id;
        let copy = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.duplicate(id))
            .map_err(|_| ActionError::UnknownTower(tower_id))?
            .relocated(position)?;
        self.ensure_free(&copy.size(), position)?;
        self.economy.try_spend(copy.base_cost())?;

        let kind = copy.kind();
        self.next_tower_id += 1;
        world_setup::spawn_tower(&mut self.world, copy);
        self.events.push(GameEvent::TowerPlaced { tower_id: id, kind });
        tracing::debug!(tower = id, source = tower_id, "tower duplicated");
        Ok(id)
    }

    // --- Power-ups ---

    /// Activate a power-up. Returns how many enemies it affected.
    pub fn activate_power_up(&mut self, kind: PowerUpKind) -> Result<u32, ActionError> {
        self.ensure_running()?;
        let affected = self.power_ups.activate(
            kind,
            self.config.power_ups.get(kind),
            self.wave_number,
            &mut self.economy,
            &mut self.world,
        )? as u32;

        self.events
            .push(GameEvent::PowerUpActivated { kind, affected });
        tracing::info!(?kind, affected, wave = self.wave_number, "power-up activated");
        Ok(affected)
    }

    pub fn can_use_power_up(&self, kind: PowerUpKind) -> bool {
        self.phase.is_running()
            && self.power_ups.can_use(
                kind,
                self.config.power_ups.get(kind),
                self.wave_number,
                &self.economy,
                power_ups::live_enemy_count(&self.world),
            )
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn path(&self) -> &PathModel {
        &self.path
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn power_ups(&self) -> &PowerUpManager {
        &self.power_ups
    }

    pub fn wave_number(&self) -> u32 {
        self.wave_number
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// A copy of the tower with the given id.
    pub fn tower(&self, tower_id: u32) -> Option<Tower> {
        let entity = self.find_tower(tower_id)?;
        let tower = self.world.get::<&Tower>(entity).ok()?;
        Some((*tower).clone())
    }

    pub fn find_tower(&self, tower_id: u32) -> Option<Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.id() == tower_id)
            .map(|(entity, _)| entity)
    }

    /// Spawn an enemy part way along the path (for tests needing a precise
    /// layout).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: rampart_core::enums::EnemyKind, distance: f64) -> Entity {
        let id = self.next_enemy_id;
        self.next_enemy_id += 1;
        world_setup::spawn_enemy_at(
            &mut self.world,
            &self.path,
            id,
            kind,
            self.config.enemies.get(kind),
            distance,
        )
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn ensure_running(&self) -> Result<(), ActionError> {
        if self.phase.is_running() {
            Ok(())
        } else {
            Err(ActionError::NotRunning)
        }
    }

    /// Reject a footprint that overlaps any existing tower.
    fn ensure_free(&self, size: &Footprint, at: Position) -> Result<(), ActionError> {
        let overlapping = self
            .world
            .query::<&Tower>()
            .iter()
            .any(|(_, tower)| tower.overlaps(size, at));
        if overlapping {
            Err(ActionError::Overlap)
        } else {
            Ok(())
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Rejections become events.
    fn handle_command(&mut self, command: PlayerCommand) {
        let result = match command {
            PlayerCommand::StartGame => {
                self.start_game();
                Ok(())
            }
            PlayerCommand::StartWave => self.start_wave().map(drop),
            PlayerCommand::PlaceTower { kind, position } => {
                self.place_tower(kind, position).map(drop)
            }
            PlayerCommand::UpgradeTower { tower_id } => self.upgrade_tower(tower_id).map(drop),
            PlayerCommand::SellTower { tower_id } => self.sell_tower(tower_id).map(drop),
            PlayerCommand::DuplicateTower { tower_id, position } => {
                self.duplicate_tower(tower_id, position).map(drop)
            }
            PlayerCommand::ActivatePowerUp { kind } => self.activate_power_up(kind).map(drop),
            PlayerCommand::SetGameSpeed { speed } => {
                self.set_game_speed(speed);
                Ok(())
            }
            PlayerCommand::Pause => {
                self.pause();
                Ok(())
            }
            PlayerCommand::Resume => {
                self.resume();
                Ok(())
            }
        };

        if let Err(reason) = result {
            tracing::debug!(%reason, "action rejected");
            self.events.push(GameEvent::ActionRejected { reason });
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.clock.elapsed_secs + dt;

        // 1. Wave spawning
        if let Some(scheduler) = self.scheduler.as_mut() {
            systems::wave_spawner::run(
                &mut self.world,
                scheduler,
                &self.path,
                &self.config.enemies,
                &mut self.next_enemy_id,
                &mut self.events,
                dt,
            );
        }
        // 2. Movement along the path
        systems::movement::run(&mut self.world, &self.path, dt);
        // 3. Targeting and firing
        systems::targeting::run(
            &mut self.world,
            now,
            &mut self.next_projectile_id,
            &mut self.events,
        );
        // 4. Projectile flight and impact
        systems::projectiles::run(
            &mut self.world,
            self.config.projectile_arrival_distance,
            dt,
            &mut self.events,
        );
        // 5. Power-up effects
        for kind in self.power_ups.update(&mut self.world, dt) {
            self.events.push(GameEvent::PowerUpExpired { kind });
            tracing::debug!(?kind, "power-up expired");
        }
        // 6. Cleanup (killed, leaked, retired)
        systems::cleanup::run(
            &mut self.world,
            &mut self.economy,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 7. Wave and game progression
        self.check_progress();
    }

    fn check_progress(&mut self) {
        if self.economy.lives == 0 {
            self.phase = GamePhase::Defeat;
            self.scheduler = None;
            self.events.push(GameEvent::GameOver {
                victory: false,
                wave: self.wave_number,
            });
            tracing::info!(wave = self.wave_number, "defeat");
            return;
        }

        if self.phase != GamePhase::WaveActive {
            return;
        }
        let spawning_done = self
            .scheduler
            .as_ref()
            .map_or(true, SpawnScheduler::is_complete);
        let enemies_left = self.world.query::<&Enemy>().iter().next().is_some();
        if !spawning_done || enemies_left {
            return;
        }

        let bonus = self.config.economy.wave_clear_bonus;
        self.economy.credit(bonus);
        self.scheduler = None;
        self.events.push(GameEvent::WaveCleared {
            wave: self.wave_number,
            bonus,
        });
        tracing::info!(wave = self.wave_number, bonus, gold = self.economy.gold, "wave cleared");

        if self.wave_number >= self.config.waves_total {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::GameOver {
                victory: true,
                wave: self.wave_number,
            });
            tracing::info!(wave = self.wave_number, "victory");
        } else {
            self.phase = GamePhase::Building;
        }
    }

    fn wave_view(&self) -> WaveView {
        WaveView {
            number: self.wave_number,
            total_waves: self.config.waves_total,
            in_progress: self.phase == GamePhase::WaveActive,
            spawned: self.scheduler.as_ref().map_or(0, SpawnScheduler::spawned),
            total_enemies: self.scheduler.as_ref().map_or(0, SpawnScheduler::total),
            elapsed_secs: self
                .scheduler
                .as_ref()
                .map_or(0.0, SpawnScheduler::elapsed_secs),
        }
    }

    /// Build the snapshot, draining events raised since the last one.
    fn snapshot(&mut self) -> GameStateSnapshot {
        let live = power_ups::live_enemy_count(&self.world);
        let power_ups =
            self.power_ups
                .views(&self.config.power_ups, self.wave_number, &self.economy, live);
        let power_ups = if self.phase.is_running() {
            power_ups
        } else {
            power_ups
                .into_iter()
                .map(|view| PowerUpView {
                    usable: false,
                    ..view
                })
                .collect()
        };
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.path,
            &self.clock,
            self.phase,
            self.wave_view(),
            &self.economy,
            power_ups,
            events,
        )
    }
}
