//! Audio routing
//!
//! The simulation never touches an audio device. It emits `GameEvent`s and
//! this module turns them into named sound effects for whatever backend
//! implements `AudioSink`.

use crate::sim::{GameEvent, MatchOutcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Any combatant fires
    Shoot,
    /// Projectile connects
    Hit,
    /// Combatant eliminated
    Death,
    /// One beep per countdown second
    CountdownBeep,
    /// Player won
    VictoryMusic,
    /// Player lost or drew
    GameOver,
}

impl SoundEffect {
    /// Asset name the backend should load
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
            SoundEffect::Death => "death",
            SoundEffect::CountdownBeep => "countdown_beep",
            SoundEffect::VictoryMusic => "victory_music",
            SoundEffect::GameOver => "game_over",
        }
    }

    /// Mix level relative to the other effects
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.3,
            SoundEffect::Hit => 0.4,
            SoundEffect::Death => 0.5,
            SoundEffect::CountdownBeep => 0.4,
            SoundEffect::VictoryMusic | SoundEffect::GameOver => 0.6,
        }
    }

    /// Effect for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shoot),
            // Storm bleed lands every tick and stays silent
            GameEvent::EntityHit { shooter: None, .. } => None,
            GameEvent::EntityHit { .. } => Some(SoundEffect::Hit),
            GameEvent::EntityEliminated { .. } => Some(SoundEffect::Death),
            GameEvent::CountdownTick { .. } => Some(SoundEffect::CountdownBeep),
            GameEvent::MatchEnded {
                outcome: MatchOutcome::Victory,
            } => Some(SoundEffect::VictoryMusic),
            GameEvent::MatchEnded { .. } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Something that can play a named effect at a volume in [0, 1]
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever a tick's events call for, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::trace!("sound {} @ {:.2}", effect.name(), volume);
    }
}
