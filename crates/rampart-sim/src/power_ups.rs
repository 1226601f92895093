//! Power-up manager: per-kind cooldowns measured in waves, and the timed
//! effects currently altering enemies.
//!
//! Speed effects snapshot the speed of every enemy they touch at activation
//! and write those values back on expiry. Enemies that died in the meantime
//! are skipped. Only one speed effect may be active at a time, so snapshots
//! never stack on top of each other.

use std::collections::BTreeMap;

use hecs::{Entity, World};

use rampart_core::components::{Health, PathProgress, Speed};
use rampart_core::config::{PowerUpSpec, PowerUpTable};
use rampart_core::enums::PowerUpKind;
use rampart_core::error::ActionError;
use rampart_core::state::PowerUpView;

use crate::economy::Economy;

/// Speeds to restore once a speed effect ends.
pub type SpeedSnapshot = Vec<(Entity, f64)>;

#[derive(Debug, Clone)]
pub struct FreezeEffect {
    pub remaining_secs: f64,
    pub snapshot: SpeedSnapshot,
}

#[derive(Debug, Clone)]
pub struct SlowEffect {
    /// Fraction of normal speed kept while slowed.
    pub factor: f64,
    pub remaining_secs: f64,
    pub snapshot: SpeedSnapshot,
}

/// A running power-up effect.
#[derive(Debug, Clone)]
pub enum PowerUpEffect {
    Freeze(FreezeEffect),
    Slow(SlowEffect),
}

impl PowerUpEffect {
    /// Start an effect on every live enemy. `None` when nobody is affected.
    fn start(kind: PowerUpKind, spec: &PowerUpSpec, world: &mut World) -> Option<Self> {
        let factor = match kind {
            PowerUpKind::Freeze => 0.0,
            PowerUpKind::Slow => spec.factor,
        };
        let mut snapshot = Vec::new();
        for (entity, (speed, health, progress)) in
            world.query_mut::<(&mut Speed, &Health, &PathProgress)>()
        {
            if !health.is_alive() || progress.finished {
                continue;
            }
            snapshot.push((entity, speed.current));
            speed.current *= factor;
        }
        if snapshot.is_empty() {
            return None;
        }

        let remaining_secs = spec.duration_secs;
        Some(match kind {
            PowerUpKind::Freeze => PowerUpEffect::Freeze(FreezeEffect {
                remaining_secs,
                snapshot,
            }),
            PowerUpKind::Slow => PowerUpEffect::Slow(SlowEffect {
                factor,
                remaining_secs,
                snapshot,
            }),
        })
    }

    pub fn kind(&self) -> PowerUpKind {
        match self {
            PowerUpEffect::Freeze(_) => PowerUpKind::Freeze,
            PowerUpEffect::Slow(_) => PowerUpKind::Slow,
        }
    }

    pub fn remaining_secs(&self) -> f64 {
        match self {
            PowerUpEffect::Freeze(f) => f.remaining_secs,
            PowerUpEffect::Slow(s) => s.remaining_secs,
        }
    }

    pub fn affected(&self) -> usize {
        self.snapshot().len()
    }

    fn snapshot(&self) -> &SpeedSnapshot {
        match self {
            PowerUpEffect::Freeze(f) => &f.snapshot,
            PowerUpEffect::Slow(s) => &s.snapshot,
        }
    }

    /// Count the effect down. Returns false once it has expired, after
    /// restoring the snapshotted speeds.
    pub fn advance(&mut self, world: &mut World, dt: f64) -> bool {
        let remaining = match self {
            PowerUpEffect::Freeze(f) => &mut f.remaining_secs,
            PowerUpEffect::Slow(s) => &mut s.remaining_secs,
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return true;
        }
        self.restore(world);
        false
    }

    /// Write snapshotted speeds back to enemies that are still alive.
    pub fn restore(&self, world: &mut World) {
        for &(entity, speed) in self.snapshot() {
            let alive = world
                .get::<&Health>(entity)
                .map(|h| h.is_alive())
                .unwrap_or(false);
            if !alive {
                continue;
            }
            if let Ok(mut current) = world.get::<&mut Speed>(entity) {
                current.current = speed;
            }
        }
    }
}

/// Cooldowns and active effects for all power-up kinds.
#[derive(Debug, Clone, Default)]
pub struct PowerUpManager {
    /// Wave number from which each kind is usable again.
    cooldown_until: BTreeMap<PowerUpKind, u32>,
    active: Vec<PowerUpEffect>,
}

impl PowerUpManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every activation precondition without changing anything.
    pub fn check(
        &self,
        kind: PowerUpKind,
        spec: &PowerUpSpec,
        current_wave: u32,
        economy: &Economy,
        live_enemies: usize,
    ) -> Result<(), ActionError> {
        if self.is_active(kind) {
            return Err(ActionError::AlreadyActive);
        }
        if self.cooldown_remaining(kind, current_wave) > 0 {
            return Err(ActionError::OnCooldown);
        }
        if !economy.can_afford(spec.cost) {
            return Err(ActionError::InsufficientGold {
                needed: spec.cost,
                available: economy.gold,
            });
        }
        // Both kinds alter speed; they must not overlap.
        if !self.active.is_empty() || live_enemies == 0 {
            return Err(ActionError::PreconditionFailed);
        }
        Ok(())
    }

    pub fn can_use(
        &self,
        kind: PowerUpKind,
        spec: &PowerUpSpec,
        current_wave: u32,
        economy: &Economy,
        live_enemies: usize,
    ) -> bool {
        self.check(kind, spec, current_wave, economy, live_enemies)
            .is_ok()
    }

    /// Activate `kind`: charge its cost, start the effect and put it on
    /// cooldown. Returns how many enemies were affected.
    pub fn activate(
        &mut self,
        kind: PowerUpKind,
        spec: &PowerUpSpec,
        current_wave: u32,
        economy: &mut Economy,
        world: &mut World,
    ) -> Result<usize, ActionError> {
        let live = live_enemy_count(world);
        self.check(kind, spec, current_wave, economy, live)?;

        let effect =
            PowerUpEffect::start(kind, spec, world).ok_or(ActionError::PreconditionFailed)?;
        economy.try_spend(spec.cost)?;
        self.cooldown_until
            .insert(kind, current_wave.saturating_add(spec.cooldown_waves));
        let affected = effect.affected();
        self.active.push(effect);
        Ok(affected)
    }

    /// Count active effects down. Returns the kinds that expired this step.
    pub fn update(&mut self, world: &mut World, dt: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.active.retain_mut(|effect| {
            let still_active = effect.advance(world, dt);
            if !still_active {
                expired.push(effect.kind());
            }
            still_active
        });
        expired
    }

    /// End every effect immediately, restoring speeds, and clear cooldowns.
    pub fn reset(&mut self, world: &mut World) {
        for effect in self.active.drain(..) {
            effect.restore(world);
        }
        self.cooldown_until.clear();
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active.iter().any(|e| e.kind() == kind)
    }

    /// Waves left before `kind` may be used again.
    pub fn cooldown_remaining(&self, kind: PowerUpKind, current_wave: u32) -> u32 {
        self.cooldown_until
            .get(&kind)
            .map_or(0, |&until| until.saturating_sub(current_wave))
    }

    pub fn views(
        &self,
        table: &PowerUpTable,
        current_wave: u32,
        economy: &Economy,
        live_enemies: usize,
    ) -> Vec<PowerUpView> {
        PowerUpKind::ALL
            .iter()
            .map(|&kind| {
                let spec = table.get(kind);
                let effect = self.active.iter().find(|e| e.kind() == kind);
                PowerUpView {
                    kind,
                    cost: spec.cost,
                    active: effect.is_some(),
                    remaining_secs: effect.map_or(0.0, |e| e.remaining_secs()),
                    cooldown_waves_remaining: self.cooldown_remaining(kind, current_wave),
                    usable: self.can_use(kind, spec, current_wave, economy, live_enemies),
                }
            })
            .collect()
    }
}

/// Enemies that are alive and still walking.
pub fn live_enemy_count(world: &World) -> usize {
    world
        .query::<(&Health, &PathProgress)>()
        .iter()
        .filter(|(_, (health, progress))| health.is_alive() && !progress.finished)
        .count()
}
