//! Wave spawning system: turns a wave definition into timed spawn events and
//! spawns the enemies they name.
//!
//! Group `g` emits its `k`-th enemy at `initial_delay + k * interval`
//! seconds after the wave starts. Groups run concurrently.

use hecs::World;

use rampart_core::config::{EnemyTable, SpawnGroup, WaveDefinition};
use rampart_core::constants::TIME_EPSILON;
use rampart_core::enums::EnemyKind;
use rampart_core::error::ConfigError;
use rampart_core::events::GameEvent;

use crate::path::PathModel;
use crate::world_setup;

/// One enemy due to appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    /// Scheduled time, seconds since the wave started.
    pub at_secs: f64,
    pub group: usize,
    pub enemy: EnemyKind,
}

#[derive(Debug, Clone)]
struct GroupCursor {
    group: SpawnGroup,
    emitted: u32,
}

impl GroupCursor {
    fn next_time(&self) -> Option<f64> {
        (self.emitted < self.group.count).then(|| {
            self.group.initial_delay_secs + f64::from(self.emitted) * self.group.interval_secs
        })
    }
}

/// Spawn timeline for one wave.
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    cursors: Vec<GroupCursor>,
    elapsed_secs: f64,
}

impl SpawnScheduler {
    /// Build the schedule for `wave` (1-based, used in errors). Rejects
    /// non-positive intervals and negative delays.
    pub fn new(wave: u32, definition: &WaveDefinition) -> Result<Self, ConfigError> {
        for (index, group) in definition.groups.iter().enumerate() {
            if group.interval_secs <= 0.0 || !group.interval_secs.is_finite() {
                return Err(ConfigError::InvalidSpawnInterval {
                    wave: wave as usize,
                    group: index,
                    interval: group.interval_secs,
                });
            }
            if group.initial_delay_secs < 0.0 || !group.initial_delay_secs.is_finite() {
                return Err(ConfigError::InvalidInitialDelay {
                    wave: wave as usize,
                    group: index,
                    delay: group.initial_delay_secs,
                });
            }
        }

        Ok(Self {
            cursors: definition
                .groups
                .iter()
                .map(|&group| GroupCursor { group, emitted: 0 })
                .collect(),
            elapsed_secs: 0.0,
        })
    }

    /// Advance the wave clock by `dt` and return every spawn now due, ordered
    /// by scheduled time and then by group.
    pub fn advance(&mut self, dt: f64) -> Vec<SpawnEvent> {
        self.elapsed_secs += dt.max(0.0);
        let now = self.elapsed_secs + TIME_EPSILON;

        let mut due = Vec::new();
        for (index, cursor) in self.cursors.iter_mut().enumerate() {
            while let Some(at_secs) = cursor.next_time() {
                if at_secs > now {
                    break;
                }
                due.push(SpawnEvent {
                    at_secs,
                    group: index,
                    enemy: cursor.group.enemy,
                });
                cursor.emitted += 1;
            }
        }

        due.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs).then(a.group.cmp(&b.group)));
        due
    }

    /// Every group has emitted its full count.
    pub fn is_complete(&self) -> bool {
        self.cursors.iter().all(|c| c.emitted >= c.group.count)
    }

    pub fn spawned(&self) -> u32 {
        self.cursors.iter().map(|c| c.emitted).sum()
    }

    pub fn total(&self) -> u32 {
        self.cursors.iter().map(|c| c.group.count).sum()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }
}

/// Advance the schedule and spawn due enemies at the start of the path.
pub fn run(
    world: &mut World,
    scheduler: &mut SpawnScheduler,
    path: &PathModel,
    enemies: &EnemyTable,
    next_enemy_id: &mut u32,
    events: &mut Vec<GameEvent>,
    dt: f64,
) {
    for spawn in scheduler.advance(dt) {
        let id = *next_enemy_id;
        *next_enemy_id += 1;
        world_setup::spawn_enemy(world, path, id, spawn.enemy, enemies.get(spawn.enemy));
        events.push(GameEvent::EnemySpawned {
            enemy_id: id,
            kind: spawn.enemy,
        });
    }
}
