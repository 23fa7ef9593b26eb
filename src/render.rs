//! Draw-call emission
//!
//! The core knows nothing about a graphics backend. `draw_match` walks a
//! snapshot and issues screen-space primitives through a `RenderContext`
//! supplied by the caller, culling anything the camera can't see.

use glam::Vec2;

use crate::camera::Camera;
use crate::consts::{COMBATANT_RADIUS, HUD_HEIGHT, PARTICLE_LIFETIME};
use crate::sim::state::{Color, Combatant, MatchState, TerrainKind};

/// Fill or outline with a stroke width in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Fill,
    Stroke(f32),
}

/// RGB plus alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f32,
}

impl Paint {
    pub const fn solid(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn with_alpha(color: Color, alpha: f32) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Linear RGBA for GPU-style backends
    pub fn to_rgba(self) -> [f32; 4] {
        let Color(r, g, b) = self.color;
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            self.alpha,
        ]
    }
}

/// Drawing capability provided by the backend. All coordinates are screen pixels.
pub trait RenderContext {
    fn draw_circle(&mut self, center: Vec2, radius: f32, paint: Paint, style: Style);
    fn draw_rect(&mut self, min: Vec2, size: Vec2, paint: Paint, style: Style);
    fn draw_line(&mut self, from: Vec2, to: Vec2, paint: Paint, width: f32);
}

const HUD_BACKGROUND: Color = Color(30, 30, 40);
const ZONE_CALM: Color = Color(255, 255, 255);
const ZONE_STORM: Color = Color(180, 60, 220);
const ROCK_COLOR: Color = Color(105, 105, 105);
const BUSH_COLOR: Color = Color(34, 139, 34);
const HEALTH_BAR_BACK: Color = Color(60, 0, 0);
const HEALTH_BAR_WIDTH: f32 = 40.0;
const HEALTH_BAR_HEIGHT: f32 = 5.0;
const BOT_CORE_RADIUS: f32 = 5.0;
const INDICATOR_RADIUS: f32 = 4.0;

/// Issue every draw call for one frame of `state`
pub fn draw_match(state: &MatchState, ctx: &mut impl RenderContext) {
    let cam = &state.camera;

    draw_terrain(state, cam, ctx);
    draw_zone(state, cam, ctx);

    for p in &state.particles {
        if cam.is_visible(p.pos, p.size) {
            let alpha = p.life / PARTICLE_LIFETIME;
            ctx.draw_circle(
                cam.world_to_screen(p.pos),
                cam.scale_radius(p.size),
                Paint::with_alpha(p.color, alpha),
                Style::Fill,
            );
        }
    }

    for proj in &state.projectiles {
        if cam.is_visible(proj.pos, proj.size) {
            let tail = proj.pos - proj.dir * proj.speed;
            ctx.draw_line(
                cam.world_to_screen(tail),
                cam.world_to_screen(proj.pos),
                Paint::with_alpha(proj.color, 0.4),
                cam.scale_radius(proj.size),
            );
            ctx.draw_circle(
                cam.world_to_screen(proj.pos),
                cam.scale_radius(proj.size),
                Paint::solid(proj.color),
                Style::Fill,
            );
        }
    }

    for bot in state.bots.iter().filter(|b| b.alive) {
        draw_combatant(bot, state.now_ms, cam, ctx);
    }
    if state.player.alive {
        draw_combatant(&state.player, state.now_ms, cam, ctx);
    }

    for ind in &state.indicators {
        if cam.is_visible(ind.pos, INDICATOR_RADIUS) {
            ctx.draw_circle(
                cam.world_to_screen(ind.pos),
                cam.scale_radius(INDICATOR_RADIUS),
                Paint::with_alpha(Color::RED, ind.alpha()),
                Style::Fill,
            );
        }
    }

    // HUD band sits in screen space on top of everything
    ctx.draw_rect(
        Vec2::ZERO,
        Vec2::new(cam.viewport.x, HUD_HEIGHT),
        Paint::solid(HUD_BACKGROUND),
        Style::Fill,
    );
}

fn draw_terrain(state: &MatchState, cam: &Camera, ctx: &mut impl RenderContext) {
    for t in &state.terrain {
        if !cam.is_visible(t.pos, t.radius) {
            continue;
        }
        let color = match t.kind {
            TerrainKind::Rock => ROCK_COLOR,
            TerrainKind::Bush => BUSH_COLOR,
        };
        ctx.draw_circle(
            cam.world_to_screen(t.pos),
            cam.scale_radius(t.radius),
            Paint::with_alpha(color, 0.6),
            Style::Fill,
        );
    }
}

fn draw_zone(state: &MatchState, cam: &Camera, ctx: &mut impl RenderContext) {
    let zone = &state.zone;
    if !cam.is_visible(zone.center, zone.radius) {
        return;
    }
    let color = if zone.triggered {
        ZONE_STORM
    } else {
        ZONE_CALM
    };
    ctx.draw_circle(
        cam.world_to_screen(zone.center),
        cam.scale_radius(zone.radius),
        Paint::solid(color),
        Style::Stroke(2.0),
    );
}

fn draw_combatant(c: &Combatant, now_ms: u64, cam: &Camera, ctx: &mut impl RenderContext) {
    if !cam.is_visible(c.pos, COMBATANT_RADIUS) {
        return;
    }
    let center = cam.world_to_screen(c.pos);
    let body = if c.is_flashing(now_ms) {
        Color::WHITE
    } else {
        c.color
    };
    ctx.draw_circle(
        center,
        cam.scale_radius(COMBATANT_RADIUS),
        Paint::solid(body),
        Style::Fill,
    );
    if c.is_agent() {
        ctx.draw_circle(
            center,
            cam.scale_radius(BOT_CORE_RADIUS),
            Paint::solid(Color::WHITE),
            Style::Fill,
        );
    }

    // Health bar above the body
    let bar_size = Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT) * cam.zoom;
    let bar_min = center - Vec2::new(bar_size.x / 2.0, cam.scale_radius(COMBATANT_RADIUS + 10.0));
    let frac = c.health as f32 / c.max_health.max(1) as f32;
    ctx.draw_rect(
        bar_min,
        bar_size,
        Paint::solid(HEALTH_BAR_BACK),
        Style::Fill,
    );
    ctx.draw_rect(
        bar_min,
        Vec2::new(bar_size.x * frac, bar_size.y),
        Paint::solid(Color::GREEN),
        Style::Fill,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;

    #[derive(Default)]
    struct Recorder {
        circles: Vec<(Vec2, f32, Paint, Style)>,
        rects: usize,
        lines: usize,
    }

    impl RenderContext for Recorder {
        fn draw_circle(&mut self, center: Vec2, radius: f32, paint: Paint, style: Style) {
            self.circles.push((center, radius, paint, style));
        }
        fn draw_rect(&mut self, _min: Vec2, _size: Vec2, _paint: Paint, _style: Style) {
            self.rects += 1;
        }
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _paint: Paint, _width: f32) {
            self.lines += 1;
        }
    }

    fn bare_state() -> MatchState {
        let mut state = MatchState::with_bot_count(3, 0);
        state.terrain.clear();
        state
    }

    #[test]
    fn test_player_drawn_at_screen_center() {
        let state = bare_state();
        let mut rec = Recorder::default();
        draw_match(&state, &mut rec);

        let expected = state.camera.world_to_screen(state.player.pos);
        let body = state.player.color;
        assert!(
            rec.circles
                .iter()
                .filter(|(c, r, _, _)| *c == expected && *r == COMBATANT_RADIUS)
                .any(|(_, _, p, _)| p.color == body)
        );
    }

    #[test]
    fn test_flashing_combatant_is_white() {
        let mut state = bare_state();
        state.player.hit_flash_ms = Some(state.now_ms);
        let mut rec = Recorder::default();
        draw_match(&state, &mut rec);

        let expected = state.camera.world_to_screen(state.player.pos);
        let body = rec
            .circles
            .iter()
            .find(|(c, r, _, _)| *c == expected && *r == COMBATANT_RADIUS)
            .map(|(_, _, p, _)| p.color);
        assert_eq!(body, Some(Color::WHITE));
    }

    #[test]
    fn test_offscreen_entities_are_culled() {
        let mut state = bare_state();
        let owner = state.player.id;
        let visible = state.player.pos + Vec2::new(50.0, 0.0);
        let hidden = Vec2::new(5.0, 1190.0);
        let template = Projectile {
            pos: visible,
            dir: Vec2::X,
            speed: 10.0,
            damage: 10,
            size: 3.0,
            color: Color::YELLOW,
            owner,
            enemy: false,
        };
        state.projectiles.push(template.clone());
        state.projectiles.push(Projectile {
            pos: hidden,
            ..template
        });

        let mut rec = Recorder::default();
        draw_match(&state, &mut rec);

        let projectile_draws = rec
            .circles
            .iter()
            .filter(|(_, _, p, _)| p.color == Color::YELLOW)
            .count();
        assert_eq!(projectile_draws, 1);
    }

    #[test]
    fn test_dead_combatants_skipped() {
        let mut state = bare_state();
        state.player.alive = false;
        let mut rec = Recorder::default();
        draw_match(&state, &mut rec);
        // Zone outline only; HUD band is the sole rect
        assert_eq!(rec.circles.len(), 1);
        assert_eq!(rec.rects, 1);
        assert_eq!(rec.lines, 0);
    }

    #[test]
    fn test_paint_rgba() {
        let rgba = Paint::with_alpha(Color(255, 0, 51), 2.0).to_rgba();
        assert_eq!(rgba, [1.0, 0.0, 0.2, 1.0]);
    }
}
