//! Procedural wave composer for waves past the end of the configured list.
//!
//! Uses the engine's seeded ChaCha8 RNG, so the same seed composes the same
//! waves.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use rampart_core::config::{SpawnGroup, WaveDefinition};
use rampart_core::enums::EnemyKind;

const MAX_GROUPS: u32 = 4;

/// Enemy kinds that may appear from a given wave onward.
fn unlocked_kinds(wave: u32) -> Vec<EnemyKind> {
    let mut kinds = vec![EnemyKind::Grunt];
    if wave >= 2 {
        kinds.push(EnemyKind::Runner);
    }
    if wave >= 3 {
        kinds.push(EnemyKind::Swarm);
    }
    if wave >= 4 {
        kinds.push(EnemyKind::Armored);
    }
    kinds
}

/// Compose wave `wave` (1-based). Later waves get more groups and more
/// enemies per group.
pub fn compose_wave(wave: u32, rng: &mut ChaCha8Rng) -> WaveDefinition {
    let wave = wave.max(1);
    let kinds = unlocked_kinds(wave);
    let group_count = (1 + wave / 3).min(MAX_GROUPS);

    let groups = (0..group_count)
        .map(|index| {
            let enemy = kinds[rng.gen_range(0..kinds.len())];
            let base_count = match enemy {
                EnemyKind::Swarm => 8,
                EnemyKind::Armored => 2,
                _ => 4,
            };
            let count = base_count + wave * rng.gen_range(1..=2) / 2;
            // Tenths of a second keep the schedule readable in logs.
            let interval_secs = f64::from(rng.gen_range(4..=15_u32)) / 10.0;
            let initial_delay_secs = if index == 0 {
                0.0
            } else {
                f64::from(index) * f64::from(rng.gen_range(10..=40_u32)) / 10.0
            };
            SpawnGroup::new(enemy, count, interval_secs, initial_delay_secs)
        })
        .collect();

    WaveDefinition::new(groups)
}
