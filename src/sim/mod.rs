//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `now_ms` timestamp per tick, never a wall-clock read
//! - Seeded RNG only
//! - Stable iteration order (player first, then bots in spawn order)
//! - No rendering or audio dependencies

pub mod bot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod weapon;
pub mod zone;

pub use collision::{HitTarget, advance_projectiles, find_target, resolve_projectiles};
pub use state::{
    Behavior, Color, Combatant, CombatantId, DamageIndicator, DamageOutcome, GameEvent, GamePhase,
    MatchOutcome, MatchState, Particle, Projectile, SafeZone, TerrainFeature, TerrainKind,
};
pub use tick::{TickInput, tick};
pub use weapon::{Weapon, WeaponInventory, can_fire, fire};
