//! Projectile component. Lives in the sim crate because it holds a hecs
//! entity handle to its target.

use hecs::Entity;

use rampart_core::enums::DamageType;
use rampart_core::state::ProjectileView;
use rampart_core::types::Position;

/// An in-flight shot homing on its target.
///
/// The target handle is weak: once the enemy is gone the projectile flies on
/// to the last position it saw and retires there without dealing damage.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub id: u32,
    pub source_tower: u32,
    pub target: Option<Entity>,
    pub target_enemy_id: u32,
    /// Where the target was last seen alive.
    pub last_known: Position,
    pub damage: i32,
    pub damage_type: DamageType,
    /// Pixels per second.
    pub speed: f64,
    pub aoe_radius: Option<f64>,
    /// Set on arrival; cleanup despawns retired projectiles.
    pub retired: bool,
}

impl Projectile {
    pub fn view(&self, position: Position) -> ProjectileView {
        ProjectileView {
            id: self.id,
            position,
            damage_type: self.damage_type,
            aoe_radius: self.aoe_radius,
        }
    }
}
