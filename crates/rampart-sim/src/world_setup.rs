//! Entity spawn factories for the simulation world.
//!
//! Creates enemy, tower and projectile entities with their component bundles.

use hecs::{Entity, World};

use rampart_core::components::*;
use rampart_core::config::EnemySpec;
use rampart_core::enums::EnemyKind;
use rampart_core::types::Position;

use crate::path::PathModel;
use crate::projectile::Projectile;
use crate::tower::Tower;

/// Spawn an enemy at the start of the path.
pub fn spawn_enemy(
    world: &mut World,
    path: &PathModel,
    id: u32,
    kind: EnemyKind,
    spec: &EnemySpec,
) -> Entity {
    spawn_enemy_at(world, path, id, kind, spec, 0.0)
}

/// Spawn an enemy part way along the path.
pub fn spawn_enemy_at(
    world: &mut World,
    path: &PathModel,
    id: u32,
    kind: EnemyKind,
    spec: &EnemySpec,
    distance: f64,
) -> Entity {
    let distance = distance.clamp(0.0, path.length());
    let (segment, offset) = path.locate(distance);
    world.spawn((
        Enemy {
            id,
            kind,
            gold_value: spec.gold_value,
        },
        Position::from(path.position_at(distance)),
        Health::new(spec.health),
        Speed {
            current: spec.speed,
        },
        PathProgress {
            distance,
            segment,
            offset,
            finished: false,
        },
        spec.resistances,
    ))
}

pub fn spawn_tower(world: &mut World, tower: Tower) -> Entity {
    world.spawn((tower,))
}

/// Spawn a projectile at the firing tower's center.
pub fn spawn_projectile(world: &mut World, origin: Position, projectile: Projectile) -> Entity {
    world.spawn((projectile, origin))
}
