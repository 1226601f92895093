//! Snapshot sinks: where the game loop publishes each tick's state.
//!
//! A renderer or UI implements [`SnapshotSink`]; the headless runner uses
//! [`LogSink`].

use std::sync::mpsc;

use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;

/// Receives every snapshot the game loop produces, in tick order.
pub trait SnapshotSink: Send {
    fn publish(&mut self, snapshot: &GameStateSnapshot);
}

/// Logs wave and game-over events with a one-line economy summary.
#[derive(Debug, Default)]
pub struct LogSink;

impl SnapshotSink for LogSink {
    fn publish(&mut self, snapshot: &GameStateSnapshot) {
        for event in &snapshot.events {
            match event {
                GameEvent::WaveStarted {
                    wave,
                    total_enemies,
                } => {
                    tracing::info!(
                        wave,
                        enemies = total_enemies,
                        gold = snapshot.economy.gold,
                        lives = snapshot.economy.lives,
                        "wave {wave}/{} incoming",
                        snapshot.wave.total_waves
                    );
                }
                GameEvent::WaveCleared { wave, bonus } => {
                    tracing::info!(
                        wave,
                        bonus,
                        gold = snapshot.economy.gold,
                        lives = snapshot.economy.lives,
                        killed = snapshot.economy.enemies_killed,
                        leaked = snapshot.economy.enemies_leaked,
                        "wave {wave} cleared"
                    );
                }
                GameEvent::GameOver { victory, wave } => {
                    let outcome = if *victory { "victory" } else { "defeat" };
                    tracing::info!(wave, secs = snapshot.clock.elapsed_secs, "{outcome}");
                }
                GameEvent::ActionRejected { reason } => {
                    tracing::warn!(%reason, "command rejected");
                }
                _ => {}
            }
        }
    }
}

/// Forwards snapshots over a channel, e.g. to a render thread.
pub struct ChannelSink {
    tx: mpsc::Sender<GameStateSnapshot>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<GameStateSnapshot>) -> Self {
        Self { tx }
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&mut self, snapshot: &GameStateSnapshot) {
        // A dropped receiver just means nobody is watching any more.
        let _ = self.tx.send(snapshot.clone());
    }
}

/// Publishes to several sinks in order.
#[derive(Default)]
pub struct FanOut {
    sinks: Vec<Box<dyn SnapshotSink>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl SnapshotSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl SnapshotSink for FanOut {
    fn publish(&mut self, snapshot: &GameStateSnapshot) {
        for sink in &mut self.sinks {
            sink.publish(snapshot);
        }
    }
}
