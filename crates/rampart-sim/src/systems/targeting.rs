//! Targeting and firing system.
//!
//! Each ready tower picks the live enemy in range that is furthest along the
//! path (lowest enemy id on ties) and fires a projectile at it. Range is
//! measured from the tower's center and is inclusive.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, PathProgress};
use rampart_core::events::GameEvent;
use rampart_core::types::Position;

use crate::projectile::Projectile;
use crate::tower::Tower;
use crate::world_setup;

/// A live enemy a tower could shoot at.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: Entity,
    pub enemy_id: u32,
    pub position: Position,
    /// Distance walked along the path.
    pub distance: f64,
}

/// Pick the target for a tower at `center` with the given range.
pub fn select_target(center: Position, range: f64, candidates: &[Candidate]) -> Option<Candidate> {
    let range_sq = range * range;
    candidates
        .iter()
        .filter(|c| {
            let dx = c.position.x - center.x;
            let dy = c.position.y - center.y;
            dx * dx + dy * dy <= range_sq
        })
        .min_by(|a, b| {
            b.distance
                .total_cmp(&a.distance)
                .then(a.enemy_id.cmp(&b.enemy_id))
        })
        .copied()
}

/// Live, still-walking enemies.
pub fn collect_candidates(world: &World) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = world
        .query::<(&Enemy, &Position, &Health, &PathProgress)>()
        .iter()
        .filter(|(_, (_, _, health, progress))| health.is_alive() && !progress.finished)
        .map(|(entity, (enemy, pos, _, progress))| Candidate {
            entity,
            enemy_id: enemy.id,
            position: *pos,
            distance: progress.distance,
        })
        .collect();
    candidates.sort_by_key(|c| c.enemy_id);
    candidates
}

/// Fire every ready tower that has a target. `now` is the game time at the
/// end of this tick.
pub fn run(world: &mut World, now: f64, next_projectile_id: &mut u32, events: &mut Vec<GameEvent>) {
    let candidates = collect_candidates(world);
    if candidates.is_empty() {
        return;
    }

    // Projectiles are spawned after the tower query releases the world.
    let mut shots: Vec<(Position, Projectile)> = Vec::new();
    let mut towers: Vec<(Entity, u32)> = world
        .query::<&Tower>()
        .iter()
        .map(|(entity, tower)| (entity, tower.id()))
        .collect();
    towers.sort_by_key(|&(_, id)| id);

    for (entity, _) in towers {
        let Ok(mut tower) = world.get::<&mut Tower>(entity) else {
            continue;
        };
        if !tower.ready_to_fire(now) {
            continue;
        }
        let stats = tower.stats();
        let Some(target) = select_target(tower.center(), stats.range, &candidates) else {
            continue;
        };

        tower.mark_fired(now);
        let id = *next_projectile_id;
        *next_projectile_id += 1;
        shots.push((
            tower.center(),
            Projectile {
                id,
                source_tower: tower.id(),
                target: Some(target.entity),
                target_enemy_id: target.enemy_id,
                last_known: target.position,
                damage: stats.damage,
                damage_type: tower.damage_type(),
                speed: tower.projectile_speed(),
                aoe_radius: tower.aoe_radius(),
                retired: false,
            },
        ));
    }

    for (origin, projectile) in shots {
        events.push(GameEvent::ProjectileFired {
            projectile_id: projectile.id,
            tower_id: projectile.source_tower,
            enemy_id: projectile.target_enemy_id,
        });
        world_setup::spawn_projectile(world, origin, projectile);
    }
}
