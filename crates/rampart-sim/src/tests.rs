//! Tests for the simulation engine: spawning, targeting, damage, towers,
//! power-ups, economy and wave progression.

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rampart_core::commands::PlayerCommand;
use rampart_core::components::{Enemy, Health, PathProgress, Speed};
use rampart_core::config::{GameConfig, SpawnGroup, WaveDefinition};
use rampart_core::enums::*;
use rampart_core::error::{ActionError, ConfigError};
use rampart_core::events::GameEvent;
use rampart_core::types::Position;

use crate::damage;
use crate::engine::SimulationEngine;
use crate::path::PathModel;
use crate::projectile::Projectile;
use crate::tower::Tower;
use crate::wave_composer;
use crate::world_setup;

// ---- Helpers ----

/// Straight path along y = 100 from x = 0 to x = 1000.
fn straight_path() -> PathModel {
    PathModel::new([Position::new(0.0, 100.0), Position::new(1000.0, 100.0)]).unwrap()
}

fn engine_with(config: GameConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config, straight_path()).unwrap();
    engine.start_game();
    engine
}

fn engine() -> SimulationEngine {
    engine_with(GameConfig::default())
}

fn run_ticks(engine: &mut SimulationEngine, ticks: usize) -> Vec<GameEvent> {
    (0..ticks).flat_map(|_| engine.tick().events).collect()
}

fn set_speed(engine: &mut SimulationEngine, entity: Entity, speed: f64) {
    engine.world_mut().get::<&mut Speed>(entity).unwrap().current = speed;
}

fn speed_of(engine: &SimulationEngine, entity: Entity) -> f64 {
    engine.world().get::<&Speed>(entity).unwrap().current
}

fn kill(engine: &mut SimulationEngine, entity: Entity) {
    engine.world_mut().get::<&mut Health>(entity).unwrap().current = 0;
}

fn enemy_count(engine: &SimulationEngine) -> usize {
    engine.world().query::<&Enemy>().iter().count()
}

fn projectile_count(engine: &SimulationEngine) -> usize {
    engine.world().query::<&Projectile>().iter().count()
}

fn single_wave(group: SpawnGroup) -> Vec<WaveDefinition> {
    vec![WaveDefinition::new(vec![group])]
}

// ---- Determinism ----

fn scripted_session(seed: u64) -> Vec<String> {
    let config = GameConfig {
        seed,
        waves: Vec::new(),
        ..GameConfig::default()
    };
    let mut engine = engine_with(config);
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Arrow,
            position: Position::new(200.0, 40.0),
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            position: Position::new(400.0, 120.0),
        },
        PlayerCommand::StartWave,
    ]);
    (0..600)
        .map(|_| serde_json::to_string(&engine.tick()).unwrap())
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    let a = scripted_session(12345);
    let b = scripted_session(12345);
    for (tick, (snap_a, snap_b)) in a.iter().zip(&b).enumerate() {
        assert_eq!(snap_a, snap_b, "Snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_composed_waves_depend_on_seed() {
    let compose = |seed: u64| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (1..=10)
            .map(|wave| wave_composer::compose_wave(wave, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(compose(111), compose(111));
    assert_ne!(compose(111), compose(222), "Different seeds should compose different waves");
}

// ---- Configuration ----

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = GameConfig {
        waves: single_wave(SpawnGroup::new(EnemyKind::Grunt, 3, 0.0, 0.0)),
        ..GameConfig::default()
    };
    let result = SimulationEngine::new(config, straight_path());
    assert!(matches!(
        result,
        Err(ConfigError::InvalidSpawnInterval { .. })
    ));
}

#[test]
fn test_json_config_without_lives_rejected_at_construction() {
    let config =
        GameConfig::from_json(r#"{ "economy": { "starting_lives": 0 }, "waves_total": 0 }"#)
            .unwrap();
    let result = SimulationEngine::new(config, straight_path());
    assert!(
        matches!(result, Err(ConfigError::InvalidStartingLives)),
        "an engine with no lives would lose on its first tick"
    );
}

// ---- Spawn scheduling ----

#[test]
fn test_spawn_times_follow_schedule() {
    let config = GameConfig {
        waves: single_wave(SpawnGroup::new(EnemyKind::Grunt, 5, 1.5, 0.5)),
        ..GameConfig::default()
    };
    let dt = config.tick_dt();
    let mut engine = engine_with(config);
    engine.start_wave().unwrap();

    let mut spawn_times = Vec::new();
    for _ in 0..(8.0 / dt) as usize {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            if matches!(event, GameEvent::EnemySpawned { .. }) {
                spawn_times.push(snapshot.clock.elapsed_secs);
            }
        }
    }

    let expected = [0.5, 2.0, 3.5, 5.0, 6.5];
    assert_eq!(spawn_times.len(), expected.len());
    for (actual, expected) in spawn_times.iter().zip(expected) {
        assert!(
            *actual >= expected - 1e-6 && *actual < expected + dt,
            "spawned at {actual}, scheduled for {expected}"
        );
    }
}

#[test]
fn test_wave_view_tracks_spawn_progress() {
    let config = GameConfig {
        waves: single_wave(SpawnGroup::new(EnemyKind::Runner, 4, 1.0, 0.0)),
        ..GameConfig::default()
    };
    let mut engine = engine_with(config);
    engine.start_wave().unwrap();
    let snapshot = engine.tick();
    assert_eq!(snapshot.wave.number, 1);
    assert!(snapshot.wave.in_progress);
    assert_eq!(snapshot.wave.spawned, 1);
    assert_eq!(snapshot.wave.total_enemies, 4);
}

// ---- Targeting ----

#[test]
fn test_tower_targets_furthest_enemy() {
    let mut engine = engine();
    engine
        .place_tower(TowerKind::Arrow, Position::new(200.0, 40.0))
        .unwrap();
    // Tower center is (216, 56) with range 120.
    engine.spawn_test_enemy(EnemyKind::Grunt, 100.0); // id 1, out of range
    engine.spawn_test_enemy(EnemyKind::Grunt, 250.0); // id 2
    engine.spawn_test_enemy(EnemyKind::Grunt, 250.0); // id 3, tie with 2
    engine.spawn_test_enemy(EnemyKind::Grunt, 200.0); // id 4

    let events = run_ticks(&mut engine, 1);
    let fired: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ProjectileFired { enemy_id, .. } => Some(*enemy_id),
            _ => None,
        })
        .collect();
    assert_eq!(fired, vec![2]);
}

#[test]
fn test_targeting_is_repeatable() {
    let setup = || {
        let mut engine = engine();
        engine
            .place_tower(TowerKind::Mage, Position::new(300.0, 40.0))
            .unwrap();
        engine
            .place_tower(TowerKind::Arrow, Position::new(340.0, 120.0))
            .unwrap();
        for distance in [260.0, 300.0, 300.0, 340.0, 380.0] {
            engine.spawn_test_enemy(EnemyKind::Runner, distance);
        }
        engine
    };
    let mut a = setup();
    let mut b = setup();
    for _ in 0..90 {
        assert_eq!(a.tick().events, b.tick().events);
    }
}

#[test]
fn test_no_target_leaves_tower_ready() {
    let mut engine = engine();
    let id = engine
        .place_tower(TowerKind::Arrow, Position::new(600.0, 300.0))
        .unwrap();
    engine.spawn_test_enemy(EnemyKind::Grunt, 50.0);
    let events = run_ticks(&mut engine, 10);
    assert!(!events
        .iter()
        .any(|e| matches!(e, GameEvent::ProjectileFired { .. })));
    assert_eq!(engine.tower(id).unwrap().cooldown_remaining(0.0), 0.0);
}

// ---- Damage ----

#[test]
fn test_aoe_cutoff_is_inclusive_without_falloff() {
    let config = GameConfig::default();
    let path = straight_path();
    let mut world = World::new();
    let spawn = |world: &mut World, id: u32, kind: EnemyKind, x: f64| {
        let entity = world_setup::spawn_enemy(world, &path, id, kind, config.enemies.get(kind));
        *world.get::<&mut Position>(entity).unwrap() = Position::new(x, 100.0);
        entity
    };
    let primary = spawn(&mut world, 1, EnemyKind::Grunt, 200.0);
    spawn(&mut world, 2, EnemyKind::Grunt, 250.0); // exactly on the edge
    spawn(&mut world, 3, EnemyKind::Grunt, 250.01); // just outside
    spawn(&mut world, 4, EnemyKind::Grunt, 150.0); // edge, other side
    spawn(&mut world, 5, EnemyKind::Swarm, 230.0); // weak to explosives

    let hits = damage::resolve_hits(
        &world,
        Some(primary),
        DVec2::new(200.0, 100.0),
        20,
        DamageType::Explosive,
        Some(50.0),
    );
    let summary: Vec<(u32, i32)> = hits.iter().map(|h| (h.enemy_id, h.damage)).collect();
    assert_eq!(summary, vec![(1, 20), (2, 20), (4, 20), (5, 30)]);
}

#[test]
fn test_damage_type_asymmetry_against_armor() {
    let config = GameConfig::default();
    let armored = config.enemies.get(EnemyKind::Armored).resistances;
    let arrow = config.towers.get(TowerKind::Arrow).damage;
    let mage = config.towers.get(TowerKind::Mage).damage;

    let physical = damage::effective_damage(arrow, DamageType::Physical, &armored);
    let magic = damage::effective_damage(mage, DamageType::Magic, &armored);
    assert!(physical < arrow, "armor should resist physical damage");
    assert!(magic > mage, "armor should be weak to magic");
    assert_eq!(physical, 7);
    assert_eq!(magic, 23);
}

#[test]
fn test_projectile_deals_damage_on_arrival() {
    let mut engine = engine();
    engine
        .place_tower(TowerKind::Arrow, Position::new(200.0, 40.0))
        .unwrap();
    let target = engine.spawn_test_enemy(EnemyKind::Grunt, 210.0);

    let events = run_ticks(&mut engine, 15);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ProjectileImpact {
            enemies_hit: 1,
            ..
        }
    )));
    let health = engine.world().get::<&Health>(target).unwrap().current;
    assert!(health < 50 && health > 0, "grunt should be damaged, got {health}");
}

#[test]
fn test_projectile_with_dead_target_retires_without_damage() {
    let mut engine = engine();
    engine
        .place_tower(TowerKind::Arrow, Position::new(200.0, 40.0))
        .unwrap();
    let target = engine.spawn_test_enemy(EnemyKind::Grunt, 300.0);

    let first = engine.tick();
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ProjectileFired { enemy_id: 1, .. })));
    assert_eq!(projectile_count(&engine), 1);

    kill(&mut engine, target);
    let mut events = Vec::new();
    for _ in 0..30 {
        events.extend(engine.tick().events);
        if projectile_count(&engine) == 0 {
            break;
        }
    }
    assert_eq!(projectile_count(&engine), 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnemyKilled { enemy_id: 1, .. })));
    let impacts: Vec<&GameEvent> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::ProjectileImpact { projectile_id: 1, .. }))
        .collect();
    assert!(impacts.is_empty(), "orphaned projectile must not deal damage");
}

// ---- Towers ----

#[test]
fn test_failed_upgrade_at_max_level_changes_nothing() {
    let mut engine = engine();
    let id = engine
        .place_tower(TowerKind::Arrow, Position::new(100.0, 200.0))
        .unwrap();
    assert_eq!(engine.upgrade_tower(id), Ok(2));
    let gold = engine.economy().gold;
    let stats = engine.tower(id).unwrap().stats();

    assert_eq!(engine.upgrade_tower(id), Err(ActionError::MaxLevel));
    assert_eq!(engine.upgrade_tower(id), Err(ActionError::MaxLevel));
    let tower = engine.tower(id).unwrap();
    assert_eq!(engine.economy().gold, gold);
    assert_eq!(tower.level(), 2);
    assert_eq!(tower.stats(), stats);
    assert!(tower.rep_ok());
}

#[test]
fn test_upgrade_charged_only_when_affordable() {
    let mut config = GameConfig::default();
    config.economy.starting_gold = 60;
    let mut engine = engine_with(config);
    let id = engine
        .place_tower(TowerKind::Arrow, Position::new(100.0, 200.0))
        .unwrap();
    assert_eq!(
        engine.upgrade_tower(id),
        Err(ActionError::InsufficientGold {
            needed: 40,
            available: 10
        })
    );
    assert_eq!(engine.economy().gold, 10);
    assert_eq!(engine.tower(id).unwrap().level(), 1);
}

#[test]
fn test_sell_refund_floors_base_cost_at_any_level() {
    let mut config = GameConfig::default();
    config.towers.get_mut(TowerKind::Arrow).cost = 33;
    let mut engine = engine_with(config);
    let id = engine
        .place_tower(TowerKind::Arrow, Position::new(100.0, 200.0))
        .unwrap();
    engine.upgrade_tower(id).unwrap();
    let gold = engine.economy().gold;

    assert_eq!(engine.sell_tower(id), Ok(24));
    assert_eq!(engine.economy().gold, gold + 24);
    assert!(engine.tower(id).is_none());
    assert_eq!(engine.sell_tower(id), Err(ActionError::UnknownTower(id)));
}

#[test]
fn test_sold_tower_projectile_keeps_flying() {
    let mut engine = engine();
    let id = engine
        .place_tower(TowerKind::Arrow, Position::new(200.0, 40.0))
        .unwrap();
    let target = engine.spawn_test_enemy(EnemyKind::Grunt, 300.0);
    engine.tick();
    assert_eq!(projectile_count(&engine), 1);

    engine.sell_tower(id).unwrap();
    let events = run_ticks(&mut engine, 30);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ProjectileImpact { .. })));
    assert!(engine.world().get::<&Health>(target).unwrap().current < 50);
}

#[test]
fn test_duplicate_places_fresh_copy() {
    let mut engine = engine();
    let original = engine
        .place_tower(TowerKind::Mage, Position::new(100.0, 200.0))
        .unwrap();
    engine.upgrade_tower(original).unwrap();
    let gold = engine.economy().gold;

    let copy = engine
        .duplicate_tower(original, Position::new(200.0, 200.0))
        .unwrap();
    let copy = engine.tower(copy).unwrap();
    assert_eq!(copy.kind(), TowerKind::Mage);
    assert_eq!(copy.level(), 1);
    assert_eq!(copy.position(), Position::new(200.0, 200.0));
    assert_eq!(engine.economy().gold, gold - copy.base_cost());

    assert_eq!(
        engine.duplicate_tower(original, Position::new(110.0, 210.0)),
        Err(ActionError::Overlap)
    );
}

#[test]
fn test_placement_rejections_become_events() {
    let mut engine = engine();
    engine.queue_commands([
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            position: Position::new(100.0, 200.0),
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            position: Position::new(120.0, 210.0),
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Arrow,
            position: Position::new(-4.0, 10.0),
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            position: Position::new(300.0, 200.0),
        },
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            position: Position::new(500.0, 200.0),
        },
        PlayerCommand::UpgradeTower { tower_id: 99 },
    ]);
    let events = engine.tick().events;
    let rejections: Vec<ActionError> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::ActionRejected { reason } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejections,
        vec![
            ActionError::Overlap,
            ActionError::InvalidPlacement,
            ActionError::InsufficientGold {
                needed: 100,
                available: 50
            },
            ActionError::UnknownTower(99),
        ]
    );
    assert_eq!(engine.economy().gold, 50);
}

#[test]
fn test_actions_rejected_before_game_starts() {
    let mut engine = SimulationEngine::new(GameConfig::default(), straight_path()).unwrap();
    assert_eq!(engine.phase(), GamePhase::Idle);
    assert_eq!(
        engine.place_tower(TowerKind::Arrow, Position::new(0.0, 0.0)),
        Err(ActionError::NotRunning)
    );
    assert_eq!(engine.start_wave(), Err(ActionError::NotRunning));
}

#[test]
fn test_towers_keep_invariant_through_play() {
    let mut engine = engine();
    let a = engine
        .place_tower(TowerKind::Arrow, Position::new(200.0, 40.0))
        .unwrap();
    let b = engine
        .place_tower(TowerKind::Cannon, Position::new(260.0, 120.0))
        .unwrap();
    engine.upgrade_tower(a).unwrap();
    engine.duplicate_tower(b, Position::new(320.0, 120.0)).ok();
    engine.start_wave().unwrap();

    for _ in 0..300 {
        engine.tick();
        for (_, tower) in engine.world().query::<&Tower>().iter() {
            assert!(tower.rep_ok(), "tower {} broke its invariant", tower.id());
        }
    }
}

// ---- Power-ups ----

#[test]
fn test_freeze_restores_individual_speeds() {
    let mut engine = engine();
    let first = engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    let second = engine.spawn_test_enemy(EnemyKind::Grunt, 20.0);
    let third = engine.spawn_test_enemy(EnemyKind::Grunt, 30.0);
    set_speed(&mut engine, first, 2.0);
    set_speed(&mut engine, second, 3.0);
    set_speed(&mut engine, third, 4.0);

    assert_eq!(engine.activate_power_up(PowerUpKind::Freeze), Ok(3));
    assert_eq!(engine.economy().gold, 150);
    for entity in [first, second, third] {
        assert_eq!(speed_of(&engine, entity), 0.0);
    }

    engine.tick();
    kill(&mut engine, second);
    engine.tick();
    assert!(engine.world().get::<&Health>(second).is_err());

    let distance_before = engine.world().get::<&PathProgress>(first).unwrap().distance;
    assert_eq!(distance_before, 10.0, "frozen enemies must not move");

    let events = run_ticks(&mut engine, 100);
    assert!(events.contains(&GameEvent::PowerUpExpired {
        kind: PowerUpKind::Freeze
    }));
    assert_eq!(speed_of(&engine, first), 2.0);
    assert_eq!(speed_of(&engine, third), 4.0);
    assert!(!engine.power_ups().is_active(PowerUpKind::Freeze));
}

#[test]
fn test_slow_scales_and_restores_speed() {
    let mut engine = engine();
    let runner = engine.spawn_test_enemy(EnemyKind::Runner, 10.0);
    engine.activate_power_up(PowerUpKind::Slow).unwrap();
    assert_eq!(speed_of(&engine, runner), 40.0);

    run_ticks(&mut engine, 6 * 30);
    assert_eq!(speed_of(&engine, runner), 80.0);
}

#[test]
fn test_power_up_preconditions() {
    let mut engine = engine();
    assert_eq!(
        engine.activate_power_up(PowerUpKind::Freeze),
        Err(ActionError::PreconditionFailed),
        "freeze needs a live enemy"
    );
    assert_eq!(engine.economy().gold, 250);

    engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    assert!(engine.can_use_power_up(PowerUpKind::Freeze));
    engine.activate_power_up(PowerUpKind::Freeze).unwrap();
    assert_eq!(
        engine.activate_power_up(PowerUpKind::Freeze),
        Err(ActionError::AlreadyActive)
    );
    assert_eq!(
        engine.activate_power_up(PowerUpKind::Slow),
        Err(ActionError::PreconditionFailed),
        "speed effects must not overlap"
    );
    assert_eq!(engine.economy().gold, 150);
}

#[test]
fn test_power_up_cooldown_counts_waves() {
    let mut engine = engine();
    engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    engine.activate_power_up(PowerUpKind::Freeze).unwrap();
    run_ticks(&mut engine, 4 * 30);

    assert_eq!(
        engine.activate_power_up(PowerUpKind::Freeze),
        Err(ActionError::OnCooldown)
    );
    assert_eq!(engine.power_ups().cooldown_remaining(PowerUpKind::Freeze, 0), 3);
    assert_eq!(engine.power_ups().cooldown_remaining(PowerUpKind::Freeze, 3), 0);
}

#[test]
fn test_power_up_requires_gold() {
    let mut config = GameConfig::default();
    config.economy.starting_gold = 30;
    let mut engine = engine_with(config);
    engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    assert_eq!(
        engine.activate_power_up(PowerUpKind::Slow),
        Err(ActionError::InsufficientGold {
            needed: 60,
            available: 30
        })
    );
}

// ---- Economy ----

#[test]
fn test_kill_credits_gold() {
    let mut config = GameConfig::default();
    config.enemies.get_mut(EnemyKind::Grunt).gold_value = 10;
    let mut engine = engine_with(config);
    let grunt = engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    kill(&mut engine, grunt);

    let events = run_ticks(&mut engine, 1);
    assert_eq!(engine.economy().gold, 260);
    assert_eq!(engine.economy().enemies_killed, 1);
    assert_eq!(engine.economy().lives, 20);
    assert!(events.contains(&GameEvent::EnemyKilled {
        enemy_id: 1,
        kind: EnemyKind::Grunt,
        gold: 10
    }));
    assert_eq!(enemy_count(&engine), 0);
}

#[test]
fn test_leak_costs_a_life_and_no_gold() {
    let mut engine = engine();
    engine.spawn_test_enemy(EnemyKind::Grunt, 999.5);

    let events = run_ticks(&mut engine, 1);
    assert_eq!(engine.economy().lives, 19);
    assert_eq!(engine.economy().gold, 250);
    assert_eq!(engine.economy().enemies_leaked, 1);
    assert!(events.contains(&GameEvent::EnemyLeaked {
        enemy_id: 1,
        kind: EnemyKind::Grunt
    }));
    assert_eq!(enemy_count(&engine), 0);
}

// ---- Wave progression ----

#[test]
fn test_clearing_waves_leads_to_victory() {
    let config = GameConfig {
        waves: single_wave(SpawnGroup::new(EnemyKind::Grunt, 1, 1.0, 0.0)),
        waves_total: 2,
        ..GameConfig::default()
    };
    let mut engine = engine_with(config);
    assert_eq!(engine.start_wave(), Ok(1));
    assert_eq!(engine.start_wave(), Err(ActionError::WaveInProgress));

    engine.tick();
    let grunt = engine
        .world()
        .query::<&Enemy>()
        .iter()
        .map(|(entity, _)| entity)
        .next()
        .unwrap();
    kill(&mut engine, grunt);
    let events = engine.tick().events;
    assert!(events.contains(&GameEvent::WaveCleared { wave: 1, bonus: 25 }));
    assert_eq!(engine.phase(), GamePhase::Building);
    assert_eq!(engine.economy().gold, 250 + 5 + 25);

    // Wave 2 is past the configured list and gets composed.
    assert_eq!(engine.start_wave(), Ok(2));
    let mut events = Vec::new();
    for _ in 0..3_000 {
        let alive: Vec<Entity> = engine
            .world()
            .query::<&Enemy>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();
        for entity in alive {
            kill(&mut engine, entity);
        }
        events.extend(engine.tick().events);
        if engine.phase() == GamePhase::Victory {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::Victory);
    assert!(events.contains(&GameEvent::GameOver {
        victory: true,
        wave: 2
    }));
}

#[test]
fn test_losing_all_lives_is_defeat() {
    let mut config = GameConfig {
        waves: single_wave(SpawnGroup::new(EnemyKind::Runner, 2, 0.5, 0.0)),
        ..GameConfig::default()
    };
    config.economy.starting_lives = 1;
    let short_path =
        PathModel::new([Position::new(0.0, 0.0), Position::new(100.0, 0.0)]).unwrap();
    let mut engine = SimulationEngine::new(config, short_path).unwrap();
    engine.start_game();
    engine.start_wave().unwrap();

    let events = run_ticks(&mut engine, 90);
    assert_eq!(engine.phase(), GamePhase::Defeat);
    assert!(events.contains(&GameEvent::GameOver {
        victory: false,
        wave: 1
    }));

    let frozen = engine.clock();
    engine.tick();
    assert_eq!(engine.clock(), frozen, "a finished game must not advance");
    assert_eq!(engine.start_wave(), Err(ActionError::NotRunning));
}

#[test]
fn test_start_game_resets_session() {
    let mut engine = engine();
    engine
        .place_tower(TowerKind::Arrow, Position::new(100.0, 200.0))
        .unwrap();
    engine.spawn_test_enemy(EnemyKind::Grunt, 10.0);
    engine.start_wave().unwrap();
    run_ticks(&mut engine, 30);

    engine.queue_command(PlayerCommand::StartGame);
    let snapshot = engine.tick();
    assert_eq!(snapshot.phase, GamePhase::Building);
    assert_eq!(snapshot.wave.number, 0);
    assert_eq!(snapshot.economy.gold, 250);
    assert!(snapshot.towers.is_empty());
    assert!(snapshot.enemies.is_empty());
}

// ---- Clock ----

#[test]
fn test_pause_and_game_speed() {
    let mut engine = engine();
    let grunt = engine.spawn_test_enemy(EnemyKind::Grunt, 0.0);

    engine.queue_command(PlayerCommand::Pause);
    run_ticks(&mut engine, 30);
    assert_eq!(engine.clock().elapsed_secs, 0.0);
    assert_eq!(engine.world().get::<&PathProgress>(grunt).unwrap().distance, 0.0);

    engine.queue_commands([
        PlayerCommand::Resume,
        PlayerCommand::SetGameSpeed { speed: 2.0 },
    ]);
    run_ticks(&mut engine, 30);
    assert!((engine.clock().elapsed_secs - 2.0).abs() < 1e-9);
    let distance = engine.world().get::<&PathProgress>(grunt).unwrap().distance;
    assert!((distance - 80.0).abs() < 1e-6, "walked {distance}");
}

#[test]
fn test_variable_timestep() {
    let mut engine = engine();
    let grunt = engine.spawn_test_enemy(EnemyKind::Grunt, 0.0);
    engine.advance(0.25);
    engine.advance(0.75);
    let distance = engine.world().get::<&PathProgress>(grunt).unwrap().distance;
    assert!((distance - 40.0).abs() < 1e-9);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_lists_sorted_and_serializable() {
    let mut engine = engine();
    engine
        .place_tower(TowerKind::Cannon, Position::new(300.0, 40.0))
        .unwrap();
    engine
        .place_tower(TowerKind::Arrow, Position::new(100.0, 40.0))
        .unwrap();
    for distance in [320.0, 100.0, 250.0] {
        engine.spawn_test_enemy(EnemyKind::Swarm, distance);
    }
    let snapshot = engine.tick();

    let enemy_ids: Vec<u32> = snapshot.enemies.iter().map(|e| e.id).collect();
    assert_eq!(enemy_ids, vec![1, 2, 3]);
    let tower_ids: Vec<u32> = snapshot.towers.iter().map(|t| t.id).collect();
    assert_eq!(tower_ids, vec![1, 2]);
    assert_eq!(snapshot.power_ups.len(), PowerUpKind::ALL.len());
    assert!(snapshot.towers.iter().all(|t| t.upgrade_cost.is_some()));

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.len() < 100 * 1024, "snapshot is {} bytes", json.len());
}
