//! Handle shared between the runner and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use rampart_core::commands::PlayerCommand;
use rampart_core::enums::GamePhase;
use rampart_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How a finished loop left the game.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopSummary {
    pub ticks: u64,
    pub phase: GamePhase,
    pub wave: u32,
    pub gold: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
}

/// Owner's side of a running game loop.
///
/// `mpsc::Sender` is the only way in; the latest snapshot is shared behind a
/// `Mutex` for synchronous polling.
pub struct LoopHandle {
    pub(crate) command_tx: mpsc::Sender<GameLoopCommand>,
    pub(crate) latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub(crate) thread: JoinHandle<LoopSummary>,
}

impl LoopHandle {
    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::Player(command))
            .is_ok()
    }

    pub fn latest_snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Option<LoopSummary> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to end on its own. `None` if the thread panicked.
    pub fn join(self) -> Option<LoopSummary> {
        self.thread.join().ok()
    }
}
