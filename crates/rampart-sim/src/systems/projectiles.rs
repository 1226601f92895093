//! Projectile flight and impact system.
//!
//! Projectiles home on their target's current position. On arrival they
//! deal damage (single target or splash) and retire. A projectile whose
//! target has died or leaked flies on to the last position it saw and
//! retires there without dealing damage.

use glam::DVec2;
use hecs::{Entity, World};

use rampart_core::components::{Health, PathProgress};
use rampart_core::events::GameEvent;
use rampart_core::types::Position;

use crate::damage;
use crate::projectile::Projectile;

/// Current position of a target that is still alive and walking.
fn live_target_position(world: &World, target: Entity) -> Option<Position> {
    let mut query = world
        .query_one::<(&Position, &Health, &PathProgress)>(target)
        .ok()?;
    let (pos, health, progress) = query.get()?;
    (health.is_alive() && !progress.finished).then_some(*pos)
}

pub fn run(world: &mut World, arrival_distance: f64, dt: f64, events: &mut Vec<GameEvent>) {
    let mut in_flight: Vec<(Entity, Projectile, Position)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.retired)
        .map(|(entity, (projectile, pos))| (entity, *projectile, *pos))
        .collect();
    in_flight.sort_by_key(|(_, projectile, _)| projectile.id);

    for (entity, mut projectile, mut pos) in in_flight {
        let live_target = projectile
            .target
            .and_then(|target| live_target_position(world, target));
        match live_target {
            Some(target_pos) => projectile.last_known = target_pos,
            None => projectile.target = None,
        }

        let here = pos.to_vec();
        let aim = projectile.last_known.to_vec();
        let step = projectile.speed * dt;
        let remaining = here.distance(aim);

        if remaining <= step.max(arrival_distance) {
            pos = projectile.last_known;
            projectile.retired = true;
            if projectile.target.is_some() {
                impact(world, &projectile, aim, events);
            }
        } else {
            let heading = (aim - here) / remaining;
            pos = Position::from(here + heading * step);
        }

        if let Ok(mut stored) = world.get::<&mut Projectile>(entity) {
            *stored = projectile;
        }
        if let Ok(mut stored) = world.get::<&mut Position>(entity) {
            *stored = pos;
        }
    }
}

/// Apply an arrived projectile's damage. Hits are computed first, then
/// written.
fn impact(world: &mut World, projectile: &Projectile, point: DVec2, events: &mut Vec<GameEvent>) {
    let hits = damage::resolve_hits(
        world,
        projectile.target,
        point,
        projectile.damage,
        projectile.damage_type,
        projectile.aoe_radius,
    );

    for hit in &hits {
        if let Ok(mut health) = world.get::<&mut Health>(hit.entity) {
            damage::apply_damage(&mut health, hit.damage);
        }
    }

    tracing::trace!(
        projectile = projectile.id,
        hits = hits.len(),
        "projectile impact"
    );
    events.push(GameEvent::ProjectileImpact {
        projectile_id: projectile.id,
        position: Position::from(point),
        damage_type: projectile.damage_type,
        enemies_hit: hits.len() as u32,
    });
}
