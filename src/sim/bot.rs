//! Autonomous agent controller
//!
//! Purely reactive: chase the nearest combatant, keep a little personal
//! space, shoot when close enough. Bots only read the shared `Combatant`
//! record, so the same rules also drive the player in autopilot mode.

use glam::Vec2;
use rand::Rng;

use super::state::{Combatant, CombatantId, GameEvent, MatchState};
use super::weapon;
use crate::consts::*;

/// Nearest living combatant other than `seeker`
///
/// The player is checked first, then bots in spawn order; strict `<`
/// keeps the earliest candidate on ties.
pub fn select_target(state: &MatchState, seeker: CombatantId) -> Option<(CombatantId, Vec2, f32)> {
    let from = state.combatant(seeker)?.pos;
    std::iter::once(&state.player)
        .chain(state.bots.iter())
        .filter(|c| c.alive && c.id != seeker)
        .fold(None, |best: Option<(CombatantId, Vec2, f32)>, c| {
            let dist = from.distance(c.pos);
            match best {
                Some((_, _, d)) if d <= dist => best,
                _ => Some((c.id, c.pos, dist)),
            }
        })
}

/// Whether moving `mover` from `from` to `to` closes in on a living
/// combatant to under `BOT_SEPARATION`
///
/// Moves that keep or widen the gap to an already-crowded neighbour are
/// allowed.
fn crowds_anyone(state: &MatchState, mover: CombatantId, from: Vec2, to: Vec2) -> bool {
    std::iter::once(&state.player)
        .chain(state.bots.iter())
        .filter(|c| c.alive && c.id != mover)
        .any(|c| {
            let new_dist = c.pos.distance(to);
            new_dist < BOT_SEPARATION && new_dist < c.pos.distance(from)
        })
}

/// One step of pursuit toward `target`, or `None` if the step is cancelled
fn pursuit_step(
    state: &MatchState,
    mover: &Combatant,
    target: Vec2,
    dist: f32,
    speed: f32,
) -> Option<Vec2> {
    if dist <= BOT_CONTACT_RANGE {
        return None;
    }
    let step = crate::direction_or_default(mover.pos, target) * speed;
    if crowds_anyone(state, mover.id, mover.pos, mover.pos + step) {
        return None;
    }
    Some(step)
}

/// Run one decision pass for every living bot, in spawn order
pub fn update_bots(state: &mut MatchState, now_ms: u64, events: &mut Vec<GameEvent>) {
    for i in 0..state.bots.len() {
        if !state.bots[i].alive {
            continue;
        }
        let id = state.bots[i].id;
        let Some((_, target_pos, dist)) = select_target(state, id) else {
            continue;
        };

        if let Some(step) = pursuit_step(state, &state.bots[i], target_pos, dist, BOT_SPEED) {
            state.bots[i].move_by(step);
        }

        if dist <= BOT_ENGAGE_RANGE {
            let aim = target_pos
                + Vec2::new(
                    state.rng.random_range(-BOT_AIM_JITTER..=BOT_AIM_JITTER),
                    state.rng.random_range(-BOT_AIM_JITTER..=BOT_AIM_JITTER),
                );
            let shots = weapon::fire(&mut state.bots[i], aim, now_ms, &mut state.rng);
            if !shots.is_empty() {
                events.push(GameEvent::ShotFired {
                    shooter: id,
                    pellets: shots.len() as u32,
                });
                state.projectiles.extend(shots);
            }
        }
    }
}

/// Autopilot movement for the player: same chase rule, player speed
///
/// Returns the aim point when a target is in range.
pub fn autopilot_player(state: &mut MatchState) -> Option<Vec2> {
    let id = state.player.id;
    let (_, target_pos, dist) = select_target(state, id)?;
    if let Some(step) = pursuit_step(state, &state.player, target_pos, dist, PLAYER_SPEED) {
        state.player.move_by(step);
    }
    (dist <= BOT_ENGAGE_RANGE).then_some(target_pos)
}
