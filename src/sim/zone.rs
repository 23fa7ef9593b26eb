//! Storm controller
//!
//! The zone sits still for `STORM_DELAY_MS` of match time, then shrinks by a
//! fixed amount per tick down to its floor. Once triggered, every living
//! combatant outside the radius bleeds `ZONE_DAMAGE_PER_TICK` each tick.

use super::state::{GameEvent, MatchState, SafeZone};
use crate::consts::{STORM_DELAY_MS, ZONE_DAMAGE_PER_TICK, ZONE_SHRINK_PER_TICK};

/// Advance the storm by one tick
pub fn update_zone(state: &mut MatchState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let Some(started) = state.play_started_ms else {
        return;
    };

    if !state.zone.triggered {
        if now_ms.saturating_sub(started) < STORM_DELAY_MS {
            return;
        }
        state.zone.triggered = true;
        log::info!("Storm triggered (radius {:.0})", state.zone.radius);
        events.push(GameEvent::ZoneTriggered);
    }

    shrink(&mut state.zone);
    apply_storm_damage(state, now_ms, events);
}

fn shrink(zone: &mut SafeZone) {
    zone.radius = (zone.radius - ZONE_SHRINK_PER_TICK).max(zone.min_radius);
}

/// Storm hits carry no shooter
fn apply_storm_damage(state: &mut MatchState, now_ms: u64, events: &mut Vec<GameEvent>) {
    let zone = state.zone.clone();
    for c in std::iter::once(&mut state.player).chain(state.bots.iter_mut()) {
        if !c.alive || zone.contains(c.pos) {
            continue;
        }
        let outcome = c.apply_damage(ZONE_DAMAGE_PER_TICK);
        c.hit_flash_ms = Some(now_ms);
        events.push(GameEvent::EntityHit {
            target: c.id,
            shooter: None,
            damage: outcome.dealt,
        });
        if outcome.eliminated {
            log::debug!("Combatant {:?} lost to the storm", c.id);
            events.push(GameEvent::EntityEliminated {
                target: c.id,
                shooter: None,
            });
        }
    }
}
