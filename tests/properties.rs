//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use storm_arena::consts::{PELLET_SPREAD, SIM_DT_MS, STORM_DELAY_MS, ZONE_MIN_RADIUS};
use storm_arena::sim::{
    Behavior, Color, Combatant, CombatantId, GamePhase, MatchState, Projectile, TickInput, Weapon,
    WeaponInventory, fire, resolve_projectiles, tick,
};
use storm_arena::{angle_between, arena_max, arena_min};

fn ms(step: u64) -> u64 {
    (step as f64 * SIM_DT_MS).round() as u64
}

/// Drive a fresh match through the menus and countdown
fn start_playing(seed: u64, bots: usize) -> (MatchState, u64) {
    let mut state = MatchState::with_bot_count(seed, bots);
    let confirm = TickInput {
        confirm: true,
        ..TickInput::default()
    };
    let mut step = 0;
    tick(&mut state, &confirm, ms(step));
    step += 1;
    tick(&mut state, &confirm, ms(step));
    while state.phase == GamePhase::Countdown && step < 1_000 {
        step += 1;
        tick(&mut state, &TickInput::default(), ms(step));
    }
    (state, step)
}

fn all_combatants(state: &MatchState) -> impl Iterator<Item = &Combatant> {
    std::iter::once(&state.player).chain(state.bots.iter())
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (-1.0f32..=1.0, -1.0f32..=1.0, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(x, y, fire, next_weapon, autopilot)| TickInput {
            move_dir: Vec2::new(x, y),
            fire,
            next_weapon,
            autopilot,
            ..TickInput::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn health_and_alive_stay_consistent(
        seed in any::<u64>(),
        bots in 0usize..6,
        inputs in prop::collection::vec(input_strategy(), 1..300),
        early_storm in any::<bool>(),
    ) {
        let (mut state, mut step) = start_playing(seed, bots);
        prop_assert_eq!(state.phase, GamePhase::Playing);
        // Jumping the clock forward lets the storm act within the run
        let skew = if early_storm { STORM_DELAY_MS } else { 0 };

        let mut last_radius = state.zone.radius;
        for input in &inputs {
            step += 1;
            tick(&mut state, input, ms(step) + skew);

            for c in all_combatants(&state) {
                prop_assert!(c.health >= 0 && c.health <= c.max_health);
                prop_assert_eq!(c.alive, c.health > 0);
                if c.alive {
                    prop_assert!(c.pos.cmpge(arena_min()).all());
                    prop_assert!(c.pos.cmple(arena_max()).all());
                }
            }
            prop_assert!(state.zone.radius <= last_radius);
            prop_assert!(state.zone.radius >= ZONE_MIN_RADIUS);
            last_radius = state.zone.radius;

            if state.phase == GamePhase::GameOver {
                prop_assert!(state.outcome.is_some());
                prop_assert!(!state.player.alive || state.alive_bots() == 0);
            }
        }
    }

    #[test]
    fn damage_never_leaves_health_range(amounts in prop::collection::vec(0i32..80, 1..20)) {
        let mut c = Combatant::new(
            CombatantId(1),
            Behavior::Autonomous,
            Vec2::new(400.0, 400.0),
            Color::RED,
        );
        let mut eliminations = 0;
        for amount in amounts {
            let outcome = c.apply_damage(amount);
            prop_assert!(outcome.dealt >= 0 && outcome.dealt <= amount);
            if outcome.eliminated {
                eliminations += 1;
            }
            prop_assert!(c.health >= 0 && c.health <= c.max_health);
            prop_assert_eq!(c.alive, c.health > 0);
        }
        prop_assert!(eliminations <= 1);
    }

    #[test]
    fn out_of_bounds_projectiles_never_hit(
        x in -400.0f32..-1.0,
        y in 100.0f32..1100.0,
    ) {
        let mut state = MatchState::with_bot_count(5, 1);
        let pos = Vec2::new(x, y);
        state.bots[0].pos = pos;
        state.projectiles.push(Projectile {
            pos,
            dir: Vec2::X,
            speed: 10.0,
            damage: 50,
            size: 2.0,
            color: Color::BLUE,
            owner: state.player.id,
            enemy: false,
        });
        let mut events = Vec::new();

        resolve_projectiles(&mut state, 0, &mut events);

        prop_assert!(state.projectiles.is_empty());
        prop_assert_eq!(state.bots[0].health, state.bots[0].max_health);
        prop_assert!(events.is_empty());
    }

    #[test]
    fn cooldown_blocks_early_second_shot(weapon_idx in 0usize..4, frac in 0.0f64..1.0) {
        let mut shooter = Combatant::new(
            CombatantId(0),
            Behavior::Controlled,
            Vec2::new(500.0, 500.0),
            Color::BLUE,
        );
        for _ in 0..weapon_idx {
            shooter.weapons.next();
        }
        let rate = shooter.weapons.current().fire_rate_ms;
        let early = (rate as f64 * frac) as u64;
        let mut rng = Pcg32::seed_from_u64(1);
        let target = Vec2::new(600.0, 500.0);

        let first = fire(&mut shooter, target, 1_000, &mut rng);
        let second = fire(&mut shooter, target, 1_000 + early, &mut rng);
        let third = fire(&mut shooter, target, 1_000 + rate, &mut rng);

        prop_assert!(!first.is_empty());
        prop_assert!(second.is_empty());
        prop_assert!(!third.is_empty());
    }

    #[test]
    fn shotgun_pellets_stay_within_spread(
        seed in any::<u64>(),
        tx in 100.0f32..1500.0,
        ty in 100.0f32..1100.0,
    ) {
        let shotgun = WeaponInventory::new(vec![Weapon::shotgun()]);
        prop_assume!(shotgun.is_some());
        let mut shooter = Combatant::new(
            CombatantId(0),
            Behavior::Controlled,
            Vec2::new(800.0, 600.0),
            Color::BLUE,
        );
        if let Some(inv) = shotgun {
            shooter.weapons = inv;
        }
        let target = Vec2::new(tx, ty);
        prop_assume!(target.distance(shooter.pos) > 1.0);
        let base = (target - shooter.pos).normalize();
        let mut rng = Pcg32::seed_from_u64(seed);

        let pellets = fire(&mut shooter, target, 0, &mut rng);

        prop_assert_eq!(pellets.len(), 5);
        for p in &pellets {
            prop_assert!(angle_between(base, p.dir) <= PELLET_SPREAD + 1e-4);
            prop_assert!((p.dir.length() - 1.0).abs() < 1e-4);
        }
    }
}
