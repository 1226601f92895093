//! Cleanup system: settles dead and leaked enemies and removes retired
//! projectiles.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, PathProgress};
use rampart_core::events::GameEvent;

use crate::economy::Economy;
use crate::projectile::Projectile;

/// Despawn dead enemies (crediting their gold), leaked enemies (costing a
/// life each) and retired projectiles. Uses a pre-allocated buffer to avoid
/// per-tick allocation.
pub fn run(
    world: &mut World,
    economy: &mut Economy,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut settled: Vec<(Entity, Enemy, bool)> = Vec::new();
    for (entity, (enemy, health, progress)) in
        world.query_mut::<(&Enemy, &Health, &PathProgress)>()
    {
        if !health.is_alive() {
            settled.push((entity, *enemy, true));
        } else if progress.finished {
            settled.push((entity, *enemy, false));
        }
    }
    settled.sort_by_key(|(_, enemy, _)| enemy.id);

    for (entity, enemy, killed) in settled {
        if killed {
            economy.record_kill(enemy.gold_value);
            events.push(GameEvent::EnemyKilled {
                enemy_id: enemy.id,
                kind: enemy.kind,
                gold: enemy.gold_value,
            });
        } else {
            economy.record_leak();
            events.push(GameEvent::EnemyLeaked {
                enemy_id: enemy.id,
                kind: enemy.kind,
            });
        }
        despawn_buffer.push(entity);
    }

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.retired {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
