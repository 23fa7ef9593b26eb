//! Weapons, the per-combatant inventory and projectile spawning

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Color, Combatant, Projectile};
use crate::consts::{PELLET_SPREAD, SHOTGUN_PELLETS};
use crate::{direction_or_default, rotate};

/// Immutable weapon stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Total damage per shot (split across pellets)
    pub damage: i32,
    /// Minimum interval between shots
    pub fire_rate_ms: u64,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_color: Color,
    /// Projectiles per shot; more than one means spread fire
    pub pellets: u32,
}

impl Weapon {
    pub fn pistol() -> Self {
        Self {
            name: "Pistol".into(),
            damage: 10,
            fire_rate_ms: 500,
            projectile_speed: 10.0,
            projectile_size: 3.0,
            projectile_color: Color::YELLOW,
            pellets: 1,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun".into(),
            damage: 15,
            fire_rate_ms: 1000,
            projectile_speed: 8.0,
            projectile_size: 4.0,
            projectile_color: Color::RED,
            pellets: SHOTGUN_PELLETS,
        }
    }

    pub fn sniper() -> Self {
        Self {
            name: "Sniper".into(),
            damage: 50,
            fire_rate_ms: 2000,
            projectile_speed: 15.0,
            projectile_size: 2.0,
            projectile_color: Color::BLUE,
            pellets: 1,
        }
    }

    pub fn machine_gun() -> Self {
        Self {
            name: "MachineGun".into(),
            damage: 5,
            fire_rate_ms: 100,
            projectile_speed: 12.0,
            projectile_size: 2.0,
            projectile_color: Color::GREEN,
            pellets: 1,
        }
    }

    /// Damage carried by each pellet (remainder dropped)
    #[inline]
    pub fn pellet_damage(&self) -> i32 {
        self.damage / self.pellets.max(1) as i32
    }
}

/// Ordered weapon catalog with a current selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponInventory {
    weapons: Vec<Weapon>,
    current: usize,
}

impl Default for WeaponInventory {
    fn default() -> Self {
        Self {
            weapons: vec![
                Weapon::pistol(),
                Weapon::shotgun(),
                Weapon::sniper(),
                Weapon::machine_gun(),
            ],
            current: 0,
        }
    }
}

impl WeaponInventory {
    /// Build from an ordered list; the first entry starts selected
    pub fn new(weapons: Vec<Weapon>) -> Option<Self> {
        if weapons.is_empty() {
            return None;
        }
        Some(Self {
            weapons,
            current: 0,
        })
    }

    pub fn current(&self) -> &Weapon {
        &self.weapons[self.current]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(|w| w.name.as_str())
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % self.weapons.len();
    }

    pub fn prev(&mut self) {
        self.current = (self.current + self.weapons.len() - 1) % self.weapons.len();
    }

    /// Select by name; unknown names leave the selection untouched
    pub fn switch_to(&mut self, name: &str) -> bool {
        match self.weapons.iter().position(|w| w.name == name) {
            Some(i) => {
                self.current = i;
                true
            }
            None => false,
        }
    }
}

/// Whether `shooter` may fire at `now_ms`
pub fn can_fire(shooter: &Combatant, now_ms: u64) -> bool {
    if !shooter.alive {
        return false;
    }
    match shooter.last_shot_ms {
        Some(last) => now_ms.saturating_sub(last) >= shooter.weapons.current().fire_rate_ms,
        None => true,
    }
}

/// Fire the shooter's current weapon toward `target`
///
/// Returns an empty list when the shooter is down or still cooling down.
/// Spread weapons jitter each pellet uniformly within `±PELLET_SPREAD`.
pub fn fire<R: Rng>(
    shooter: &mut Combatant,
    target: Vec2,
    now_ms: u64,
    rng: &mut R,
) -> Vec<Projectile> {
    if !can_fire(shooter, now_ms) {
        return Vec::new();
    }
    shooter.last_shot_ms = Some(now_ms);

    let weapon = shooter.weapons.current();
    let base_dir = direction_or_default(shooter.pos, target);
    let damage = weapon.pellet_damage();
    let spread = weapon.pellets > 1;

    (0..weapon.pellets.max(1))
        .map(|_| {
            let dir = if spread {
                rotate(base_dir, rng.random_range(-PELLET_SPREAD..=PELLET_SPREAD))
            } else {
                base_dir
            };
            Projectile {
                pos: shooter.pos,
                dir,
                speed: weapon.projectile_speed,
                damage,
                size: weapon.projectile_size,
                color: weapon.projectile_color,
                owner: shooter.id,
                enemy: shooter.is_agent(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_between;
    use crate::sim::state::{Behavior, CombatantId};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn shooter(behavior: Behavior) -> Combatant {
        Combatant::new(
            CombatantId(4),
            behavior,
            Vec2::new(400.0, 400.0),
            Color::RED,
        )
    }

    #[test]
    fn test_cooldown_blocks_second_shot() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = shooter(Behavior::Controlled);
        let target = Vec2::new(500.0, 400.0);

        assert_eq!(fire(&mut c, target, 1_000, &mut rng).len(), 1);
        assert!(fire(&mut c, target, 1_499, &mut rng).is_empty());
        assert_eq!(c.last_shot_ms, Some(1_000));
        assert_eq!(fire(&mut c, target, 1_500, &mut rng).len(), 1);
    }

    #[test]
    fn test_dead_shooter_cannot_fire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = shooter(Behavior::Controlled);
        c.apply_damage(1_000);
        assert!(fire(&mut c, Vec2::ZERO, 10_000, &mut rng).is_empty());
        assert_eq!(c.last_shot_ms, None);
    }

    #[test]
    fn test_projectile_carries_weapon_and_owner() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = shooter(Behavior::Autonomous);
        let shots = fire(&mut c, Vec2::new(400.0, 500.0), 0, &mut rng);
        let p = &shots[0];
        assert_eq!(p.owner, CombatantId(4));
        assert!(p.enemy);
        assert_eq!(p.damage, 10);
        assert_eq!(p.speed, 10.0);
        assert!((p.dir - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_zero_length_aim_uses_default_axis() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = shooter(Behavior::Controlled);
        let at = c.pos;
        let shots = fire(&mut c, at, 0, &mut rng);
        assert_eq!(shots[0].dir, Vec2::X);
    }

    #[test]
    fn test_shotgun_spreads_five_pellets() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut c = shooter(Behavior::Controlled);
        assert!(c.weapons.switch_to("Shotgun"));
        let target = Vec2::new(400.0, 100.0);
        let base = direction_or_default(c.pos, target);

        let shots = fire(&mut c, target, 0, &mut rng);
        assert_eq!(shots.len(), 5);
        for p in &shots {
            assert_eq!(p.damage, 3);
            assert!(angle_between(base, p.dir) <= PELLET_SPREAD + 1e-4);
            assert!((p.dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_pellet_damage_truncates() {
        let mut w = Weapon::shotgun();
        w.damage = 17;
        assert_eq!(w.pellet_damage(), 3);
    }

    #[test]
    fn test_inventory_cycles_in_order() {
        let mut inv = WeaponInventory::default();
        let names: Vec<_> = inv.names().map(String::from).collect();
        assert_eq!(names, ["Pistol", "Shotgun", "Sniper", "MachineGun"]);

        inv.prev();
        assert_eq!(inv.current().name, "MachineGun");
        inv.next();
        assert_eq!(inv.current().name, "Pistol");
        inv.next();
        assert_eq!(inv.current().name, "Shotgun");
    }

    #[test]
    fn test_empty_inventory_rejected() {
        assert!(WeaponInventory::new(Vec::new()).is_none());
        let solo = WeaponInventory::new(vec![Weapon::sniper()]).unwrap();
        assert_eq!(solo.current().name, "Sniper");
    }

    #[test]
    fn test_switch_to_unknown_is_noop() {
        let mut inv = WeaponInventory::default();
        inv.next();
        assert!(!inv.switch_to("Railgun"));
        assert_eq!(inv.current().name, "Shotgun");
        assert!(inv.switch_to("Sniper"));
        assert_eq!(inv.current().name, "Sniper");
    }
}
