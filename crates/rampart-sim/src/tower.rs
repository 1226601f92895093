//! Tower model: placement, level-indexed stats, sell refund and duplication.
//!
//! A `Tower` is stored as a hecs component. Its fields are private so the
//! representation invariant (checked by [`Tower::rep_ok`]) can only change
//! through the methods below.

use rampart_core::config::{TowerSpec, UpgradeStep};
use rampart_core::constants::{SELL_REFUND_PERCENT, TIME_EPSILON};
use rampart_core::enums::{DamageType, TowerKind};
use rampart_core::error::ActionError;
use rampart_core::state::TowerView;
use rampart_core::types::{Footprint, Position};

/// Combat stats at one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerStats {
    pub damage: i32,
    pub range: f64,
    pub fire_period_secs: f64,
}

#[derive(Debug, Clone)]
pub struct Tower {
    id: u32,
    kind: TowerKind,
    position: Position,
    size: Footprint,
    level: u32,
    max_level: u32,
    base_cost: u32,
    upgrade_cost: u32,
    base: TowerStats,
    current: TowerStats,
    upgrades: Vec<UpgradeStep>,
    projectile_speed: f64,
    aoe_radius: Option<f64>,
    /// Game time of the last shot, `None` until the first.
    last_fired: Option<f64>,
}

impl TowerStats {
    fn from_spec(spec: &TowerSpec) -> Self {
        Self {
            damage: spec.damage,
            range: spec.range,
            fire_period_secs: spec.fire_period_secs,
        }
    }

    fn is_valid(&self) -> bool {
        self.damage > 0
            && self.range.is_finite()
            && self.range > 0.0
            && self.fire_period_secs.is_finite()
            && self.fire_period_secs > 0.0
    }
}

impl Tower {
    /// Build a level-1 tower from its kind's spec. Fails when the position is
    /// negative or the spec would produce an invalid tower.
    pub fn new(
        id: u32,
        kind: TowerKind,
        position: Position,
        spec: &TowerSpec,
        max_level: u32,
    ) -> Result<Self, ActionError> {
        let base = TowerStats::from_spec(spec);
        let tower = Self {
            id,
            kind,
            position,
            size: spec.size,
            level: 1,
            max_level: max_level.max(1),
            base_cost: spec.cost,
            upgrade_cost: spec.upgrade_cost,
            base,
            current: base,
            upgrades: spec.upgrades.clone(),
            projectile_speed: spec.projectile_speed,
            aoe_radius: spec.aoe_radius,
            last_fired: None,
        };
        if !tower.rep_ok() {
            return Err(ActionError::InvalidPlacement);
        }
        Ok(tower)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> TowerKind {
        self.kind
    }

    pub fn damage_type(&self) -> DamageType {
        self.kind.damage_type()
    }

    /// Top-left corner of the footprint.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Footprint {
        self.size
    }

    /// Range and targeting are measured from here.
    pub fn center(&self) -> Position {
        self.size.center_at(self.position)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn base_cost(&self) -> u32 {
        self.base_cost
    }

    pub fn base_stats(&self) -> TowerStats {
        self.base
    }

    pub fn stats(&self) -> TowerStats {
        self.current
    }

    pub fn projectile_speed(&self) -> f64 {
        self.projectile_speed
    }

    pub fn aoe_radius(&self) -> Option<f64> {
        self.aoe_radius
    }

    /// Cost of the next upgrade, `None` at max level.
    pub fn upgrade_cost(&self) -> Option<u32> {
        (self.level < self.max_level).then_some(self.upgrade_cost)
    }

    pub fn overlaps(&self, size: &Footprint, at: Position) -> bool {
        self.size.overlaps(self.position, size, at)
    }

    /// Move up one level. Returns false, leaving the tower untouched, when
    /// already at max level.
    pub fn upgrade(&mut self) -> bool {
        if self.level >= self.max_level {
            return false;
        }
        self.level += 1;
        self.current = self.stats_at(self.level);
        debug_assert!(self.rep_ok());
        true
    }

    /// Gold returned when this tower is sold.
    pub fn sell_refund(&self) -> u32 {
        let refund = u64::from(self.base_cost) * u64::from(SELL_REFUND_PERCENT) / 100;
        refund as u32
    }

    /// A fresh level-1 copy: same kind, position, base cost, base stats and
    /// upgrade table, with a new id and no firing history.
    pub fn duplicate(&self, id: u32) -> Tower {
        let copy = Tower {
            id,
            kind: self.kind,
            position: self.position,
            size: self.size,
            level: 1,
            max_level: self.max_level,
            base_cost: self.base_cost,
            upgrade_cost: self.upgrade_cost,
            base: self.base,
            current: self.base,
            upgrades: self.upgrades.clone(),
            projectile_speed: self.projectile_speed,
            aoe_radius: self.aoe_radius,
            last_fired: None,
        };
        debug_assert!(copy.rep_ok());
        copy
    }

    /// Same tower placed elsewhere.
    pub fn relocated(mut self, position: Position) -> Result<Tower, ActionError> {
        self.position = position;
        if !self.rep_ok() {
            return Err(ActionError::InvalidPlacement);
        }
        Ok(self)
    }

    pub fn ready_to_fire(&self, now: f64) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now - last >= self.current.fire_period_secs - TIME_EPSILON,
        }
    }

    pub fn cooldown_remaining(&self, now: f64) -> f64 {
        match self.last_fired {
            None => 0.0,
            Some(last) => (self.current.fire_period_secs - (now - last)).max(0.0),
        }
    }

    pub fn mark_fired(&mut self, now: f64) {
        self.last_fired = Some(now);
    }

    /// Representation invariant: non-negative position, level within
    /// `1..=max_level`, positive stats, and current stats derived from base
    /// stats and level.
    pub fn rep_ok(&self) -> bool {
        self.position.is_non_negative()
            && self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.level >= 1
            && self.level <= self.max_level
            && self.base.is_valid()
            && self.current.is_valid()
            && self.current == self.stats_at(self.level)
            && self.projectile_speed > 0.0
            && self.aoe_radius.map_or(true, |r| r.is_finite() && r >= 0.0)
    }

    pub fn view(&self, now: f64) -> TowerView {
        TowerView {
            id: self.id,
            kind: self.kind,
            level: self.level,
            max_level: self.max_level,
            position: self.position,
            center: self.center(),
            damage: self.current.damage,
            damage_type: self.damage_type(),
            range: self.current.range,
            fire_period_secs: self.current.fire_period_secs,
            cooldown_remaining_secs: self.cooldown_remaining(now),
            sell_refund: self.sell_refund(),
            upgrade_cost: self.upgrade_cost(),
        }
    }

    /// Base stats scaled by the upgrade steps up to `level`. Levels past the
    /// end of the table repeat its last step.
    fn stats_at(&self, level: u32) -> TowerStats {
        let mut damage = 1.0;
        let mut range = 1.0;
        let mut period = 1.0;
        for step_index in 0..level.saturating_sub(1) as usize {
            let step = self
                .upgrades
                .get(step_index)
                .or_else(|| self.upgrades.last())
                .copied()
                .unwrap_or(UpgradeStep::IDENTITY);
            damage *= step.damage;
            range *= step.range;
            period *= step.fire_period;
        }
        TowerStats {
            damage: ((f64::from(self.base.damage) * damage).round() as i32).max(1),
            range: self.base.range * range,
            fire_period_secs: self.base.fire_period_secs * period,
        }
    }
}
