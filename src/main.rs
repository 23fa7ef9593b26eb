//! Storm Arena headless runner
//!
//! Plays one full match on autopilot at the fixed tick rate and prints a
//! JSON summary. Usage: `storm-arena [settings.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use serde::Serialize;

use storm_arena::Settings;
use storm_arena::audio::{AudioManager, LogSink};
use storm_arena::consts::SIM_DT_MS;
use storm_arena::render::{Paint, RenderContext, Style, draw_match};
use storm_arena::sim::{GameEvent, GamePhase, MatchOutcome, MatchState, TickInput, tick};

/// Render context that only counts draw calls
#[derive(Debug, Default)]
struct CountingContext {
    draw_calls: u64,
}

impl RenderContext for CountingContext {
    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _paint: Paint, _style: Style) {
        self.draw_calls += 1;
    }

    fn draw_rect(&mut self, _min: Vec2, _size: Vec2, _paint: Paint, _style: Style) {
        self.draw_calls += 1;
    }

    fn draw_line(&mut self, _from: Vec2, _to: Vec2, _paint: Paint, _width: f32) {
        self.draw_calls += 1;
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    outcome: Option<MatchOutcome>,
    score: u64,
    ticks: u64,
    match_time_ms: u64,
    player_health: i32,
    bots_remaining: usize,
    players_remaining: usize,
    eliminations: usize,
    shots_fired: usize,
    zone_radius: f32,
    sounds_played: usize,
    draw_calls: u64,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Storm Arena (headless) seed={seed} bots={}",
        settings.bot_count
    );

    let mut state = MatchState::with_bot_count(seed, settings.bot_count);
    state.camera = settings.camera(state.player.pos);

    let mut audio = AudioManager::new(LogSink::default());
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut ctx = CountingContext::default();
    let mut eliminations = 0;
    let mut shots_fired = 0;
    let mut step: u64 = 0;

    while state.phase != GamePhase::GameOver && step < settings.max_ticks {
        // Start -> WeaponSelect -> Countdown, then hands off
        let input = TickInput {
            confirm: matches!(state.phase, GamePhase::Start | GamePhase::WeaponSelect),
            autopilot: true,
            ..TickInput::default()
        };
        let now_ms = (step as f64 * SIM_DT_MS).round() as u64;
        let events = tick(&mut state, &input, now_ms);

        for event in &events {
            match event {
                GameEvent::EntityEliminated { .. } => eliminations += 1,
                GameEvent::ShotFired { .. } => shots_fired += 1,
                _ => {}
            }
        }
        audio.play_events(&events);
        let frame = state.snapshot();
        draw_match(&frame, &mut ctx);
        step += 1;
    }

    if state.phase != GamePhase::GameOver {
        log::warn!("Stopped after {step} ticks without a result");
    }

    let summary = Summary {
        seed,
        outcome: state.outcome,
        score: state.score,
        ticks: state.time_ticks,
        match_time_ms: state
            .play_started_ms
            .map_or(0, |start| state.now_ms.saturating_sub(start)),
        player_health: state.player.health,
        bots_remaining: state.alive_bots(),
        players_remaining: state.players_remaining(),
        eliminations,
        shots_fired,
        zone_radius: state.zone.radius,
        sounds_played: audio.sink().played,
        draw_calls: ctx.draw_calls,
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}
