//! Fixed timestep simulation tick
//!
//! Drives the game flow (Start → WeaponSelect → Countdown → Playing →
//! GameOver) and, while Playing, runs the subsystems in a fixed order:
//! input, bots, projectile motion, hit resolution, storm, cosmetics,
//! win check.

use glam::Vec2;

use super::bot::{autopilot_player, update_bots};
use super::collision::{advance_projectiles, resolve_projectiles};
use super::state::{GameEvent, GamePhase, MatchOutcome, MatchState};
use super::weapon;
use super::zone::update_zone;
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired movement; longer than 1 is clamped to 1
    pub move_dir: Vec2,
    /// World point to shoot at; falls back to the movement direction
    pub aim: Option<Vec2>,
    pub fire: bool,
    pub next_weapon: bool,
    pub prev_weapon: bool,
    /// Select a weapon by catalog name
    pub select_weapon: Option<String>,
    /// Enter/click: advance menus
    pub confirm: bool,
    /// Play again after a match ends
    pub restart: bool,
    /// Demo mode - the bot rules play for the player
    pub autopilot: bool,
}

/// Advance the game by one tick at timestamp `now_ms`
///
/// `now_ms` is the only clock the simulation reads and must not go
/// backwards between calls.
pub fn tick(state: &mut MatchState, input: &TickInput, now_ms: u64) -> Vec<GameEvent> {
    let prev_now = state.now_ms;
    state.now_ms = now_ms;
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Start => {
            if input.confirm {
                state.reset();
                set_phase(state, GamePhase::WeaponSelect, &mut events);
            }
        }

        GamePhase::WeaponSelect => {
            handle_weapon_intents(state, input, false, &mut events);
            if input.confirm {
                log::info!("Weapon locked: {}", state.player.weapons.current().name);
                begin_countdown(state, now_ms, &mut events);
            }
        }

        GamePhase::Countdown => {
            handle_weapon_intents(state, input, true, &mut events);
            update_countdown(state, prev_now, now_ms, &mut events);
        }

        GamePhase::Playing => {
            handle_weapon_intents(state, input, true, &mut events);
            run_playing(state, input, now_ms, &mut events);
        }

        GamePhase::GameOver => {
            if input.restart {
                let chosen = state.player.weapons.current().name.clone();
                state.reset();
                state.player.weapons.switch_to(&chosen);
                begin_countdown(state, now_ms, &mut events);
            } else if input.confirm {
                set_phase(state, GamePhase::Start, &mut events);
            }
        }
    }

    state.camera.refocus(state.player.pos);
    events
}

fn set_phase(state: &mut MatchState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::info!("Phase {:?} -> {:?}", from, to);
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}

/// Whole seconds left on the countdown, rounded up
fn countdown_remaining(elapsed_ms: u64) -> u32 {
    (COUNTDOWN_MS.saturating_sub(elapsed_ms)).div_ceil(1000) as u32
}

fn begin_countdown(state: &mut MatchState, now_ms: u64, events: &mut Vec<GameEvent>) {
    state.countdown_started_ms = Some(now_ms);
    set_phase(state, GamePhase::Countdown, events);
    events.push(GameEvent::CountdownTick {
        remaining: countdown_remaining(0),
    });
}

fn update_countdown(
    state: &mut MatchState,
    prev_now: u64,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    let started = *state.countdown_started_ms.get_or_insert(now_ms);
    let elapsed = now_ms.saturating_sub(started);

    if elapsed >= COUNTDOWN_MS {
        state.play_started_ms = Some(now_ms);
        set_phase(state, GamePhase::Playing, events);
        return;
    }

    let before = countdown_remaining(prev_now.saturating_sub(started));
    let remaining = countdown_remaining(elapsed);
    if remaining != before {
        events.push(GameEvent::CountdownTick { remaining });
    }
}

/// Weapon cycling is only honoured on the selection screen
fn handle_weapon_intents(
    state: &mut MatchState,
    input: &TickInput,
    locked: bool,
    events: &mut Vec<GameEvent>,
) {
    let wants_switch = input.next_weapon || input.prev_weapon || input.select_weapon.is_some();
    if !wants_switch {
        return;
    }
    if locked {
        log::debug!("Weapon switch ignored in {:?}", state.phase);
        events.push(GameEvent::IntentRejected {
            reason: "weapon is locked for this match".into(),
        });
        return;
    }

    let inventory = &mut state.player.weapons;
    if input.next_weapon {
        inventory.next();
    }
    if input.prev_weapon {
        inventory.prev();
    }
    if let Some(name) = &input.select_weapon {
        if !inventory.switch_to(name) {
            log::debug!("Unknown weapon requested: {}", name);
            events.push(GameEvent::IntentRejected {
                reason: format!("unknown weapon '{}'", name),
            });
        }
    }
    events.push(GameEvent::WeaponSwitched {
        name: inventory.current().name.clone(),
    });
}

fn run_playing(
    state: &mut MatchState,
    input: &TickInput,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    state.time_ticks += 1;

    apply_player_input(state, input, now_ms, events);
    update_bots(state, now_ms, events);
    advance_projectiles(&mut state.projectiles);
    resolve_projectiles(state, now_ms, events);
    update_zone(state, now_ms, events);
    age_cosmetics(state);
    check_match_end(state, events);
}

fn apply_player_input(
    state: &mut MatchState,
    input: &TickInput,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    if !state.player.alive {
        return;
    }

    let (fire, target) = if input.autopilot {
        let aim = autopilot_player(state);
        (aim.is_some(), aim)
    } else {
        let dir = input.move_dir.clamp_length_max(1.0);
        state.player.move_by(dir * PLAYER_SPEED);
        // Without an aim point, shoot where we're heading (+x when still)
        let target = input
            .aim
            .unwrap_or(state.player.pos + dir.normalize_or_zero() * 100.0);
        (input.fire, Some(target))
    };

    if !fire {
        return;
    }
    let target = target.unwrap_or(state.player.pos);
    let shots = weapon::fire(&mut state.player, target, now_ms, &mut state.rng);
    if !shots.is_empty() {
        events.push(GameEvent::ShotFired {
            shooter: state.player.id,
            pellets: shots.len() as u32,
        });
        state.projectiles.extend(shots);
    }
}

/// Age particles and damage indicators, dropping the expired ones
fn age_cosmetics(state: &mut MatchState) {
    state.particles.retain_mut(|p| p.update());
    state.indicators.retain_mut(|d| d.update());
}

fn check_match_end(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    let player_down = !state.player.alive;
    let bots_down = state.alive_bots() == 0;

    let outcome = match (player_down, bots_down) {
        (true, true) => MatchOutcome::Draw,
        (true, false) => MatchOutcome::Defeat,
        (false, true) => MatchOutcome::Victory,
        (false, false) => return,
    };

    log::info!("Match ended: {:?} (score {})", outcome, state.score);
    state.outcome = Some(outcome);
    set_phase(state, GamePhase::GameOver, events);
    events.push(GameEvent::MatchEnded { outcome });
}
