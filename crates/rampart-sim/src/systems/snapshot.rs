//! Snapshot system: queries the ECS world and builds a complete
//! `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rampart_core::components::*;
use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimClock};

use crate::economy::Economy;
use crate::path::PathModel;
use crate::projectile::Projectile;
use crate::tower::Tower;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    path: &PathModel,
    clock: &SimClock,
    phase: GamePhase,
    wave: WaveView,
    economy: &Economy,
    power_ups: Vec<PowerUpView>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        clock: *clock,
        phase,
        wave,
        economy: economy.view(),
        enemies: build_enemies(world, path),
        towers: build_towers(world, clock.elapsed_secs),
        projectiles: build_projectiles(world),
        power_ups,
        events,
    }
}

/// Live enemies, in id order.
fn build_enemies(world: &World, path: &PathModel) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Position, &Health, &Speed, &PathProgress)>()
        .iter()
        .filter(|(_, (_, _, health, _, _))| health.is_alive())
        .map(|(_, (enemy, pos, health, speed, progress))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            speed: speed.current,
            progress: path.fraction_at(progress.distance),
        })
        .collect();

    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_towers(world: &World, now: f64) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| tower.view(now))
        .collect();

    towers.sort_by_key(|t| t.id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (projectile, _))| !projectile.retired)
        .map(|(_, (projectile, pos))| projectile.view(*pos))
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
