//! Projectile motion and hit resolution
//!
//! Projectiles are resolved in creation order, one target at most each.
//! The player is tested before the bots, and the bots in spawn order, so
//! simultaneous hits always land in the same sequence.

use glam::Vec2;

use super::state::{Combatant, DamageIndicator, GameEvent, MatchState, Projectile};
use crate::consts::{HIT_RADIUS, SCORE_PER_HIT, SCORE_PER_KILL};
use crate::in_playable_bounds;

/// What a projectile struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Player,
    /// Index into `MatchState::bots`
    Bot(usize),
}

/// Move every projectile one tick along its direction
pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for p in projectiles {
        p.advance();
    }
}

#[inline]
fn within_hit_radius(a: Vec2, b: Vec2) -> bool {
    a.distance_squared(b) < HIT_RADIUS * HIT_RADIUS
}

/// Living, not the shooter, and close enough
fn can_hit(p: &Projectile, c: &Combatant) -> bool {
    c.alive && c.id != p.owner && within_hit_radius(p.pos, c.pos)
}

/// First combatant the projectile overlaps, if any
///
/// The shooter is never a candidate, and neither is anyone already down.
pub fn find_target(state: &MatchState, p: &Projectile) -> Option<HitTarget> {
    if can_hit(p, &state.player) {
        return Some(HitTarget::Player);
    }
    state
        .bots
        .iter()
        .position(|b| can_hit(p, b))
        .map(HitTarget::Bot)
}

/// Resolve every live projectile against the combatants
///
/// Out-of-bounds projectiles are dropped first and never deal damage.
/// Survivors are compacted into a new list in their original order.
pub fn resolve_projectiles(state: &mut MatchState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for p in projectiles {
        if !in_playable_bounds(p.pos) {
            continue;
        }
        match find_target(state, &p) {
            Some(target) => apply_hit(state, target, &p, now_ms, events),
            None => survivors.push(p),
        }
    }

    state.projectiles = survivors;
}

fn apply_hit(
    state: &mut MatchState,
    target: HitTarget,
    p: &Projectile,
    now_ms: u64,
    events: &mut Vec<GameEvent>,
) {
    let from_player = p.owner == state.player.id;
    let victim = match target {
        HitTarget::Player => &mut state.player,
        HitTarget::Bot(i) => &mut state.bots[i],
    };

    let outcome = victim.apply_damage(p.damage);
    victim.hit_flash_ms = Some(now_ms);
    let (victim_id, victim_pos) = (victim.id, victim.pos);

    events.push(GameEvent::EntityHit {
        target: victim_id,
        shooter: Some(p.owner),
        damage: outcome.dealt,
    });

    if from_player {
        state.score += SCORE_PER_HIT;
        state.indicators.push(DamageIndicator::new(p.pos, outcome.dealt));
    }

    if outcome.eliminated {
        log::debug!("Combatant {:?} eliminated by {:?}", victim_id, p.owner);
        if from_player {
            state.score += SCORE_PER_KILL;
        }
        events.push(GameEvent::EntityEliminated {
            target: victim_id,
            shooter: Some(p.owner),
        });
        state.spawn_burst(victim_pos);
    }
}
