use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use rampart_app::demo;
use rampart_app::game_loop::{self, LoopOptions};
use rampart_app::sink::LogSink;
use rampart_core::config::GameConfig;
use rampart_sim::SimulationEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Rampart tower-defense runner", long_about = None)]
struct Cli {
    /// Key-value parameter file (`key = value` per line).
    params: Option<PathBuf>,
    /// Override the number of waves to win.
    #[arg(long)]
    waves: Option<u32>,
    /// Stop after this many ticks.
    #[arg(long)]
    ticks: Option<u64>,
    /// Override the RNG seed used for composed waves.
    #[arg(long)]
    seed: Option<u64>,
    /// Hold the nominal tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
}

fn load_config(cli: &Cli) -> Result<GameConfig, rampart_core::error::ConfigError> {
    let mut config = match &cli.params {
        Some(path) => GameConfig::load_key_values(path)?,
        None => GameConfig::default(),
    };
    if let Some(waves) = cli.waves {
        config.waves_total = waves.max(1);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "could not load parameters");
            return ExitCode::FAILURE;
        }
    };
    let path = match demo::demo_path() {
        Ok(path) => path,
        Err(err) => {
            error!(%err, "demo path is invalid");
            return ExitCode::FAILURE;
        }
    };
    let mut engine = match SimulationEngine::new(config, path) {
        Ok(engine) => engine,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    demo::queue_opening(&mut engine);

    info!(
        waves = engine.config().waves_total,
        seed = engine.config().seed,
        "starting headless run"
    );
    let handle = game_loop::spawn_game_loop(
        engine,
        LogSink,
        LoopOptions {
            realtime: cli.realtime,
            max_ticks: cli.ticks,
            auto_start_waves: true,
        },
    );

    match handle.join() {
        Some(summary) => {
            info!(
                ticks = summary.ticks,
                phase = ?summary.phase,
                wave = summary.wave,
                gold = summary.gold,
                lives = summary.lives,
                killed = summary.enemies_killed,
                leaked = summary.enemies_leaked,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        None => {
            error!("game loop thread panicked");
            ExitCode::FAILURE
        }
    }
}
