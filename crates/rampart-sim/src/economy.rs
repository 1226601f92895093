//! Gold and lives ledger. Stored in `SimulationEngine`, not as ECS entities.

use rampart_core::config::EconomyConfig;
use rampart_core::error::ActionError;
use rampart_core::state::EconomyView;

#[derive(Debug, Clone, Default)]
pub struct Economy {
    pub gold: u32,
    pub lives: u32,
    pub enemies_killed: u32,
    pub enemies_leaked: u32,
}

impl Economy {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            gold: config.starting_gold,
            lives: config.starting_lives,
            enemies_killed: 0,
            enemies_leaked: 0,
        }
    }

    pub fn credit(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Deduct `cost`, or leave gold untouched and report the shortfall.
    pub fn try_spend(&mut self, cost: u32) -> Result<(), ActionError> {
        if self.gold < cost {
            return Err(ActionError::InsufficientGold {
                needed: cost,
                available: self.gold,
            });
        }
        self.gold -= cost;
        Ok(())
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.gold >= cost
    }

    pub fn record_kill(&mut self, gold_value: u32) {
        self.enemies_killed += 1;
        self.credit(gold_value);
    }

    /// One life lost to a leaked enemy. Returns true once no lives remain.
    pub fn record_leak(&mut self) -> bool {
        self.enemies_leaked += 1;
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }

    pub fn view(&self) -> EconomyView {
        EconomyView {
            gold: self.gold,
            lives: self.lives,
            enemies_killed: self.enemies_killed,
            enemies_leaked: self.enemies_leaked,
        }
    }
}
