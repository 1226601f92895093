//! Game loop thread: runs the simulation engine at the configured tick rate
//! and publishes snapshots.
//!
//! The engine moves into the thread and is owned by it. Commands arrive via
//! an `mpsc` channel; snapshots go to a [`SnapshotSink`] and are stored in
//! shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use rampart_core::commands::PlayerCommand;
use rampart_core::enums::GamePhase;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimulationEngine;

use crate::sink::SnapshotSink;
use crate::state::{GameLoopCommand, LoopHandle, LoopSummary};

/// How the loop paces and ends itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Sleep between ticks to hold the nominal tick rate. When false the
    /// loop runs as fast as it can.
    pub realtime: bool,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Start the next wave automatically whenever the game is building.
    pub auto_start_waves: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            realtime: true,
            max_ticks: None,
            auto_start_waves: false,
        }
    }
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    sink: impl SnapshotSink + 'static,
    options: LoopOptions,
) -> LoopHandle {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("rampart-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, sink, &shared, options))
        .expect("Failed to spawn game loop thread");

    LoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    }
}

/// The game loop. Runs until Shutdown, channel disconnect, the tick limit,
/// or the end of the game.
pub fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    mut sink: impl SnapshotSink,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    options: LoopOptions,
) -> LoopSummary {
    let tick = tick_duration(engine.config().tick_rate);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;
    tracing::debug!(?options, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Shutdown) => return summarize(&engine, ticks),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return summarize(&engine, ticks),
            }
        }
        if options.auto_start_waves && engine.phase() == GamePhase::Building {
            engine.queue_command(PlayerCommand::StartWave);
        }

        // 2. Advance one tick (engine handles pause and game speed)
        let snapshot = engine.tick();
        ticks += 1;

        // 3. Publish
        sink.publish(&snapshot);
        let game_over = snapshot.phase.is_over();

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if game_over || options.max_ticks.is_some_and(|max| ticks >= max) {
            return summarize(&engine, ticks);
        }

        // 5. Sleep until next tick
        if options.realtime {
            next_tick_time += tick;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

fn summarize(engine: &SimulationEngine, ticks: u64) -> LoopSummary {
    let economy = engine.economy();
    LoopSummary {
        ticks,
        phase: engine.phase(),
        wave: engine.wave_number(),
        gold: economy.gold,
        lives: economy.lives,
        enemies_killed: economy.enemies_killed,
        enemies_leaked: economy.enemies_leaked,
    }
}
