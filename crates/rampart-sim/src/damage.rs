//! Damage model: resistance-scaled damage and area-of-effect hit sets.

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::{Enemy, Health, PathProgress, ResistanceProfile};
use rampart_core::enums::DamageType;
use rampart_core::types::Position;

/// Damage dealt to a target with the given resistances, rounded half-up and
/// never negative.
pub fn effective_damage(base: i32, damage_type: DamageType, resistances: &ResistanceProfile) -> i32 {
    let scaled = f64::from(base) * resistances.multiplier(damage_type);
    let rounded = (scaled + 0.5).trunc();
    if rounded <= 0.0 {
        0
    } else {
        rounded as i32
    }
}

/// Subtract damage from health. Returns true when this hit was the killing
/// blow.
pub fn apply_damage(health: &mut Health, amount: i32) -> bool {
    let was_alive = health.is_alive();
    health.current = health.current.saturating_sub(amount);
    was_alive && !health.is_alive()
}

/// One enemy hit by an impact, with damage already scaled by its resistances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub entity: Entity,
    pub enemy_id: u32,
    pub damage: i32,
}

/// Enemies damaged by an impact at `point`.
///
/// Single-target impacts hit only `primary` (when it is still live). Splash
/// impacts hit every live enemy within `aoe_radius` of `point`, edge
/// inclusive, with no falloff. Hits are ordered by enemy id.
pub fn resolve_hits(
    world: &World,
    primary: Option<Entity>,
    point: DVec2,
    base_damage: i32,
    damage_type: DamageType,
    aoe_radius: Option<f64>,
) -> Vec<Hit> {
    let mut hits = Vec::new();

    match aoe_radius {
        Some(radius) => {
            let radius_sq = radius * radius;
            let mut query =
                world.query::<(&Enemy, &Position, &Health, &PathProgress, &ResistanceProfile)>();
            for (entity, (enemy, pos, health, progress, resist)) in query.iter() {
                if !health.is_alive() || progress.finished {
                    continue;
                }
                if pos.to_vec().distance_squared(point) <= radius_sq {
                    hits.push(Hit {
                        entity,
                        enemy_id: enemy.id,
                        damage: effective_damage(base_damage, damage_type, resist),
                    });
                }
            }
        }
        None => {
            if let Some(entity) = primary {
                if let Ok(mut query) = world
                    .query_one::<(&Enemy, &Health, &PathProgress, &ResistanceProfile)>(entity)
                {
                    if let Some((enemy, health, progress, resist)) = query.get() {
                        if health.is_alive() && !progress.finished {
                            hits.push(Hit {
                                entity,
                                enemy_id: enemy.id,
                                damage: effective_damage(base_damage, damage_type, resist),
                            });
                        }
                    }
                }
            }
        }
    }

    hits.sort_by_key(|h| h.enemy_id);
    hits
}
