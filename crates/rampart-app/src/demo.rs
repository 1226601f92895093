//! Built-in demo map used by the headless runner.

use rampart_core::commands::PlayerCommand;
use rampart_core::enums::TowerKind;
use rampart_core::types::Position;
use rampart_sim::{PathError, PathModel, SimulationEngine};

/// Waypoints of the demo map: a switchback across an 800x600 field.
pub const DEMO_WAYPOINTS: [(f64, f64); 6] = [
    (0.0, 100.0),
    (600.0, 100.0),
    (600.0, 300.0),
    (100.0, 300.0),
    (100.0, 500.0),
    (800.0, 500.0),
];

pub fn demo_path() -> Result<PathModel, PathError> {
    PathModel::new(DEMO_WAYPOINTS.iter().map(|&(x, y)| Position::new(x, y)))
}

/// One tower of each kind between the first two legs of the path.
pub fn starter_defence() -> Vec<PlayerCommand> {
    [
        (TowerKind::Arrow, 300.0, 140.0),
        (TowerKind::Cannon, 560.0, 180.0),
        (TowerKind::Mage, 300.0, 240.0),
    ]
    .into_iter()
    .map(|(kind, x, y)| PlayerCommand::PlaceTower {
        kind,
        position: Position::new(x, y),
    })
    .collect()
}

/// Queue the game start and the starter defence so they land on the
/// engine's first tick, before any loop runs it.
pub fn queue_opening(engine: &mut SimulationEngine) {
    engine.queue_command(PlayerCommand::StartGame);
    engine.queue_commands(starter_defence());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::config::GameConfig;
    use rampart_core::enums::GamePhase;

    #[test]
    fn demo_path_is_valid() {
        let path = demo_path().unwrap();
        assert!((path.length() - 2200.0).abs() < 1e-9);
    }

    #[test]
    fn starter_defence_is_affordable_and_fits() {
        let mut engine = SimulationEngine::new(GameConfig::default(), demo_path().unwrap()).unwrap();
        engine.start_game();
        engine.queue_commands(starter_defence());
        let snapshot = engine.tick();
        assert_eq!(snapshot.towers.len(), 3);
        assert!(snapshot
            .events
            .iter()
            .all(|e| !matches!(e, rampart_core::events::GameEvent::ActionRejected { .. })));
    }

    #[test]
    fn opening_applies_on_first_tick() {
        let mut engine = SimulationEngine::new(GameConfig::default(), demo_path().unwrap()).unwrap();
        queue_opening(&mut engine);
        let snapshot = engine.tick();
        assert_eq!(snapshot.phase, GamePhase::Building);
        assert_eq!(snapshot.towers.len(), 3);
    }
}
