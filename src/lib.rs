//! Storm Arena - A top-down arena shooter with a shrinking storm
//!
//! Core modules:
//! - `sim`: Deterministic simulation (combatants, weapons, bots, storm, game flow)
//! - `camera`: World-to-screen viewport transform
//! - `render`: Draw-call emission through a backend-provided `RenderContext`
//! - `audio`: Event-to-sound mapping through a backend-provided `AudioSink`
//! - `settings`: Runtime configuration loaded from JSON

pub mod audio;
pub mod camera;
pub mod render;
pub mod settings;
pub mod sim;

pub use camera::Camera;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation rate
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / SIM_HZ as f64;

    /// World dimensions (world units)
    pub const WORLD_WIDTH: f32 = 1600.0;
    pub const WORLD_HEIGHT: f32 = 1200.0;
    /// Band at the top of the world reserved for the HUD; nothing plays there
    pub const HUD_HEIGHT: f32 = 50.0;

    /// Default viewport size in screen pixels
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;
    /// Default camera zoom (screen pixels per world unit)
    pub const DEFAULT_ZOOM: f32 = 1.0;

    /// Combatant defaults
    pub const COMBATANT_RADIUS: f32 = 20.0;
    pub const MAX_HEALTH: i32 = 100;
    /// Player movement per tick
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Bot movement per tick
    pub const BOT_SPEED: f32 = 3.0;
    /// Projectile-to-combatant hit distance
    pub const HIT_RADIUS: f32 = 20.0;

    /// Bots stop closing in once the target is this near
    pub const BOT_CONTACT_RANGE: f32 = 50.0;
    /// Bots never step within this distance of another combatant
    pub const BOT_SEPARATION: f32 = 40.0;
    /// Bots open fire inside this distance
    pub const BOT_ENGAGE_RANGE: f32 = 300.0;
    /// Per-axis aim error for bot shots
    pub const BOT_AIM_JITTER: f32 = 20.0;
    /// Default number of bots per match
    pub const NUM_BOTS: usize = 3;

    /// Multi-pellet weapon spread
    pub const SHOTGUN_PELLETS: u32 = 5;
    pub const PELLET_SPREAD: f32 = PI / 8.0;

    /// Storm timing and strength
    pub const STORM_DELAY_MS: u64 = 20_000;
    pub const ZONE_SHRINK_PER_TICK: f32 = 0.5;
    pub const ZONE_MIN_RADIUS: f32 = 50.0;
    pub const ZONE_DAMAGE_PER_TICK: i32 = 1;

    /// Countdown before a match goes live
    pub const COUNTDOWN_MS: u64 = 3_000;

    /// Scoring
    pub const SCORE_PER_HIT: u64 = 10;
    pub const SCORE_PER_KILL: u64 = 50;

    /// Cosmetics
    pub const HIT_FLASH_MS: u64 = 100;
    pub const PARTICLES_PER_ELIMINATION: usize = 20;
    pub const MAX_PARTICLES: usize = 256;
    pub const PARTICLE_LIFETIME: f32 = 255.0;
    pub const PARTICLE_DECAY: f32 = 3.0;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const INDICATOR_LIFETIME_TICKS: u32 = 45;
    pub const TERRAIN_FEATURES: usize = 12;
}

/// Unit vector from `from` toward `to`, or +x when the points coincide
#[inline]
pub fn direction_or_default(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Clamp a point into an axis-aligned rectangle
#[inline]
pub fn clamp_to_rect(pos: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    pos.clamp(min, max)
}

/// Rotate a vector by `angle` radians (counter-clockwise)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// Unsigned angle between two non-zero vectors, in [0, π]
#[inline]
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    a.angle_to(b).abs()
}

/// Lower corner of the area combatants may occupy
#[inline]
pub fn arena_min() -> Vec2 {
    Vec2::new(
        consts::COMBATANT_RADIUS,
        consts::HUD_HEIGHT + consts::COMBATANT_RADIUS,
    )
}

/// Upper corner of the area combatants may occupy
#[inline]
pub fn arena_max() -> Vec2 {
    Vec2::new(
        consts::WORLD_WIDTH - consts::COMBATANT_RADIUS,
        consts::WORLD_HEIGHT - consts::COMBATANT_RADIUS,
    )
}

/// Center of the playable rectangle (world minus the HUD band)
#[inline]
pub fn arena_center() -> Vec2 {
    Vec2::new(
        consts::WORLD_WIDTH / 2.0,
        (consts::WORLD_HEIGHT + consts::HUD_HEIGHT) / 2.0,
    )
}

/// True while a point lies inside the playable rectangle
#[inline]
pub fn in_playable_bounds(pos: Vec2) -> bool {
    pos.x >= 0.0
        && pos.x <= consts::WORLD_WIDTH
        && pos.y >= consts::HUD_HEIGHT
        && pos.y <= consts::WORLD_HEIGHT
}
