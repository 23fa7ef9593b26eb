//! Match state and core simulation types
//!
//! Everything the tick mutates lives in `MatchState`. Rendering and audio
//! only ever see it read-only.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::weapon::WeaponInventory;
use crate::camera::Camera;
use crate::consts::*;
use crate::{arena_center, arena_max, arena_min};

/// RGB color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const BLUE: Color = Color(0, 100, 255);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const GRAY: Color = Color(128, 128, 128);
    pub const GOLD: Color = Color(255, 215, 0);
}

/// Player color
pub const PLAYER_COLOR: Color = Color::BLUE;

/// Bot colors, assigned in spawn order
pub const BOT_COLORS: [Color; 9] = [
    Color(255, 0, 0),
    Color(255, 0, 255),
    Color(255, 165, 0),
    Color(50, 255, 50),
    Color(0, 255, 255),
    Color(255, 192, 203),
    Color(0, 128, 128),
    Color(255, 128, 0),
    Color(128, 0, 255),
];

/// Elimination burst colors
pub const PARTICLE_COLORS: [Color; 5] = [
    Color(255, 223, 0),
    Color(255, 215, 0),
    Color(255, 255, 0),
    Color(255, 200, 0),
    Color(255, 255, 255),
];

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    Start,
    /// Player picks a weapon
    WeaponSelect,
    /// Fixed-length countdown before play
    Countdown,
    /// Active gameplay
    Playing,
    /// Match resolved
    GameOver,
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Victory,
    Defeat,
    Draw,
}

/// Stable identity of a combatant within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

/// Who drives a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Driven by `TickInput`
    Controlled,
    /// Driven by the bot controller
    Autonomous,
}

/// Result of applying damage to a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    /// Health actually removed (after clamping)
    pub dealt: i32,
    /// True only on the tick the combatant went from alive to eliminated
    pub eliminated: bool,
}

/// Anything that can deal and receive damage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub behavior: Behavior,
    pub pos: Vec2,
    pub color: Color,
    pub health: i32,
    pub max_health: i32,
    /// Flips to false once and stays there until the match is reset
    pub alive: bool,
    /// Timestamp (ms) of the last accepted shot, `None` if never fired
    pub last_shot_ms: Option<u64>,
    pub weapons: WeaponInventory,
    /// Timestamp (ms) of the last hit taken, for the white flash
    pub hit_flash_ms: Option<u64>,
}

impl Combatant {
    pub fn new(id: CombatantId, behavior: Behavior, pos: Vec2, color: Color) -> Self {
        Self {
            id,
            behavior,
            pos,
            color,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            alive: true,
            last_shot_ms: None,
            weapons: WeaponInventory::default(),
            hit_flash_ms: None,
        }
    }

    #[inline]
    pub fn is_agent(&self) -> bool {
        self.behavior == Behavior::Autonomous
    }

    /// Apply damage, clamping health to `[0, max_health]`
    ///
    /// Eliminated combatants ignore further damage.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::default();
        }
        let before = self.health;
        self.health = (self.health - amount).clamp(0, self.max_health);
        let eliminated = self.health <= 0;
        if eliminated {
            self.alive = false;
        }
        DamageOutcome {
            dealt: before - self.health,
            eliminated,
        }
    }

    /// Move by `delta`, staying inside the arena
    pub fn move_by(&mut self, delta: Vec2) {
        if !self.alive {
            return;
        }
        self.pos = crate::clamp_to_rect(self.pos + delta, arena_min(), arena_max());
    }

    /// Whether the hit flash is showing at `now_ms`
    pub fn is_flashing(&self, now_ms: u64) -> bool {
        self.hit_flash_ms
            .is_some_and(|t| now_ms.saturating_sub(t) < HIT_FLASH_MS)
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    /// Distance covered per tick
    pub speed: f32,
    pub damage: i32,
    pub size: f32,
    pub color: Color,
    /// Shooter; only used to skip self-hits
    pub owner: CombatantId,
    /// Fired by an autonomous agent
    pub enemy: bool,
}

impl Projectile {
    /// Advance one tick
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Counts down from `PARTICLE_LIFETIME`, doubles as alpha
    pub life: f32,
    pub size: f32,
}

impl Particle {
    /// Step one tick, returns false once expired
    pub fn update(&mut self) -> bool {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= PARTICLE_DECAY;
        self.life > 0.0
    }
}

/// Floating damage number
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageIndicator {
    pub pos: Vec2,
    pub amount: i32,
    pub ticks_left: u32,
}

impl DamageIndicator {
    pub fn new(pos: Vec2, amount: i32) -> Self {
        Self {
            pos,
            amount,
            ticks_left: INDICATOR_LIFETIME_TICKS,
        }
    }

    /// Drift upward one tick, returns false once expired
    pub fn update(&mut self) -> bool {
        self.pos.y -= 1.0;
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }

    /// Fade factor in [0, 1]
    pub fn alpha(&self) -> f32 {
        self.ticks_left as f32 / INDICATOR_LIFETIME_TICKS as f32
    }
}

/// Decorative terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Rock,
    Bush,
}

/// Decorative scenery; never blocks movement or projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainFeature {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: TerrainKind,
}

/// The shrinking safe zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeZone {
    pub center: Vec2,
    pub radius: f32,
    pub min_radius: f32,
    /// One-way: once true the zone shrinks and hurts
    pub triggered: bool,
}

impl Default for SafeZone {
    fn default() -> Self {
        Self {
            center: arena_center(),
            radius: (WORLD_WIDTH).min(WORLD_HEIGHT - HUD_HEIGHT) / 2.0,
            min_radius: ZONE_MIN_RADIUS,
            triggered: false,
        }
    }
}

impl SafeZone {
    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.distance(self.center) <= self.radius
    }
}

/// Events produced by a tick for the audio/UI layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// Whole-second countdown value changed
    CountdownTick { remaining: u32 },
    ShotFired { shooter: CombatantId, pellets: u32 },
    WeaponSwitched { name: String },
    EntityHit {
        target: CombatantId,
        shooter: Option<CombatantId>,
        damage: i32,
    },
    EntityEliminated {
        target: CombatantId,
        shooter: Option<CombatantId>,
    },
    ZoneTriggered,
    MatchEnded { outcome: MatchOutcome },
    /// Diagnostic for an input that could not be honoured
    IntentRejected { reason: String },
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Seed the current match was built from
    pub seed: u64,
    /// RNG shared by every random draw in the simulation
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub outcome: Option<MatchOutcome>,
    pub score: u64,
    /// Number of bots spawned on reset
    pub bot_count: usize,
    /// Simulation tick counter (Playing only)
    pub time_ticks: u64,
    /// Timestamp of the latest tick
    pub now_ms: u64,
    pub countdown_started_ms: Option<u64>,
    pub play_started_ms: Option<u64>,
    pub player: Combatant,
    /// Bots in spawn order; eliminated bots stay in place
    pub bots: Vec<Combatant>,
    /// Projectiles in creation order
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub indicators: Vec<DamageIndicator>,
    pub terrain: Vec<TerrainFeature>,
    pub zone: SafeZone,
    pub camera: Camera,
    next_id: u32,
}

impl MatchState {
    /// Create a fresh state on the title screen
    pub fn new(seed: u64) -> Self {
        Self::with_bot_count(seed, NUM_BOTS)
    }

    pub fn with_bot_count(seed: u64, bot_count: usize) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            outcome: None,
            score: 0,
            bot_count,
            time_ticks: 0,
            now_ms: 0,
            countdown_started_ms: None,
            play_started_ms: None,
            player: Combatant::new(
                CombatantId(0),
                Behavior::Controlled,
                arena_center(),
                PLAYER_COLOR,
            ),
            bots: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            indicators: Vec::new(),
            terrain: Vec::new(),
            zone: SafeZone::default(),
            camera: Camera::default(),
            next_id: 0,
        };
        state.reset();
        state
    }

    /// Allocate a new combatant ID
    pub fn next_entity_id(&mut self) -> CombatantId {
        let id = self.next_id;
        self.next_id += 1;
        CombatantId(id)
    }

    /// Throw away every entity and build a fresh match
    ///
    /// The phase and the RNG stream are left alone so consecutive matches
    /// differ while staying reproducible from the original seed.
    pub fn reset(&mut self) {
        self.next_id = 0;
        self.outcome = None;
        self.score = 0;
        self.time_ticks = 0;
        self.countdown_started_ms = None;
        self.play_started_ms = None;
        self.projectiles.clear();
        self.particles.clear();
        self.indicators.clear();
        self.zone = SafeZone::default();

        let id = self.next_entity_id();
        self.player = Combatant::new(id, Behavior::Controlled, arena_center(), PLAYER_COLOR);
        self.spawn_bots();
        self.scatter_terrain();
        self.camera = Camera::follow(self.player.pos, self.camera.viewport, self.camera.zoom);
    }

    /// Spawn bots around the arena edges (top, right, left, bottom)
    fn spawn_bots(&mut self) {
        self.bots.clear();
        let (min, max) = (arena_min(), arena_max());
        for i in 0..self.bot_count {
            let pos = match i % 4 {
                0 => Vec2::new(self.rng.random_range(min.x..=max.x), min.y),
                1 => Vec2::new(max.x, self.rng.random_range(min.y..=max.y)),
                2 => Vec2::new(min.x, self.rng.random_range(min.y..=max.y)),
                _ => Vec2::new(self.rng.random_range(min.x..=max.x), max.y),
            };
            let id = self.next_entity_id();
            let color = BOT_COLORS[i % BOT_COLORS.len()];
            self.bots.push(Combatant::new(id, Behavior::Autonomous, pos, color));
        }
    }

    fn scatter_terrain(&mut self) {
        self.terrain.clear();
        let (min, max) = (arena_min(), arena_max());
        for _ in 0..TERRAIN_FEATURES {
            let pos = Vec2::new(
                self.rng.random_range(min.x..=max.x),
                self.rng.random_range(min.y..=max.y),
            );
            let kind = if self.rng.random_bool(0.5) {
                TerrainKind::Rock
            } else {
                TerrainKind::Bush
            };
            let radius = self.rng.random_range(12.0..=30.0);
            self.terrain.push(TerrainFeature { pos, radius, kind });
        }
    }

    /// Spawn an elimination burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2) {
        for _ in 0..PARTICLES_PER_ELIMINATION {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(2.0..=6.0);
            let color = PARTICLE_COLORS[self.rng.random_range(0..PARTICLE_COLORS.len())];
            let size = self.rng.random_range(2..=4) as f32;
            self.particles.push(Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                life: PARTICLE_LIFETIME,
                size,
            });
        }
    }

    /// Look up a combatant (player or bot) by ID
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.bots.iter().find(|b| b.id == id)
    }

    pub fn alive_bots(&self) -> usize {
        self.bots.iter().filter(|b| b.alive).count()
    }

    /// Combatants still standing, player included
    pub fn players_remaining(&self) -> usize {
        self.alive_bots() + usize::from(self.player.alive)
    }

    /// Seconds until the storm starts, for display only
    pub fn storm_countdown_secs(&self) -> f32 {
        let elapsed = self
            .play_started_ms
            .map(|t| self.now_ms.saturating_sub(t))
            .unwrap_or(0);
        (STORM_DELAY_MS as f32 / 1000.0 - elapsed as f32 / 1000.0).max(0.0)
    }

    pub fn victory(&self) -> bool {
        self.outcome == Some(MatchOutcome::Victory)
    }

    /// Read-only copy for rendering
    pub fn snapshot(&self) -> MatchState {
        self.clone()
    }
}
