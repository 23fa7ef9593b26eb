//! Viewport transform
//!
//! Centers the view on a focus point and clamps it so it never shows
//! anything past the world edges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ZOOM, VIEWPORT_HEIGHT, VIEWPORT_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the viewport's top-left corner
    pub offset: Vec2,
    /// Screen pixels per world unit
    pub zoom: f32,
    /// Viewport size in screen pixels
    pub viewport: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }
}

impl Camera {
    /// Camera centered on `focus`, clamped to the world
    pub fn follow(focus: Vec2, viewport: Vec2, zoom: f32) -> Self {
        let zoom = if zoom > 0.0 { zoom } else { DEFAULT_ZOOM };
        let view_world = viewport / zoom;
        let world = Vec2::new(WORLD_WIDTH, WORLD_HEIGHT);
        // A view larger than the world pins to the origin
        let max_offset = (world - view_world).max(Vec2::ZERO);
        let offset = (focus - view_world / 2.0).clamp(Vec2::ZERO, max_offset);
        Self {
            offset,
            zoom,
            viewport,
        }
    }

    /// `follow` with the default viewport and zoom
    pub fn follow_default(focus: Vec2) -> Self {
        Self::follow(
            focus,
            Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            DEFAULT_ZOOM,
        )
    }

    /// Re-center on a new focus keeping viewport and zoom
    pub fn refocus(&mut self, focus: Vec2) {
        *self = Self::follow(focus, self.viewport, self.zoom);
    }

    #[inline]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.offset) * self.zoom
    }

    #[inline]
    pub fn scale_radius(&self, r: f32) -> f32 {
        r * self.zoom
    }

    /// Whether a circle of world radius `r` at `point` touches the viewport
    pub fn is_visible(&self, point: Vec2, r: f32) -> bool {
        let s = self.world_to_screen(point);
        let r = self.scale_radius(r);
        s.x + r >= 0.0 && s.y + r >= 0.0 && s.x - r <= self.viewport.x && s.y - r <= self.viewport.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_lands_mid_screen() {
        let cam = Camera::follow_default(Vec2::new(800.0, 600.0));
        assert_eq!(cam.offset, Vec2::new(400.0, 300.0));
        assert_eq!(
            cam.world_to_screen(Vec2::new(800.0, 600.0)),
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_clamped_at_world_edges() {
        let cam = Camera::follow_default(Vec2::new(10.0, 10.0));
        assert_eq!(cam.offset, Vec2::ZERO);

        let cam = Camera::follow_default(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT));
        assert_eq!(
            cam.offset,
            Vec2::new(WORLD_WIDTH - 800.0, WORLD_HEIGHT - 600.0)
        );
    }

    #[test]
    fn test_zoom_scales_positions_and_radii() {
        let cam = Camera::follow(Vec2::new(800.0, 600.0), Vec2::new(800.0, 600.0), 2.0);
        assert_eq!(cam.offset, Vec2::new(600.0, 450.0));
        assert_eq!(
            cam.world_to_screen(Vec2::new(800.0, 600.0)),
            Vec2::new(400.0, 300.0)
        );
        assert_eq!(cam.scale_radius(20.0), 40.0);
    }

    #[test]
    fn test_oversized_view_pins_to_origin() {
        let cam = Camera::follow(Vec2::new(800.0, 600.0), Vec2::new(4000.0, 4000.0), 1.0);
        assert_eq!(cam.offset, Vec2::ZERO);
    }

    #[test]
    fn test_culling() {
        let cam = Camera::follow_default(Vec2::new(800.0, 600.0));
        assert!(cam.is_visible(Vec2::new(800.0, 600.0), 1.0));
        assert!(cam.is_visible(Vec2::new(390.0, 600.0), 20.0));
        assert!(!cam.is_visible(Vec2::new(100.0, 100.0), 20.0));
    }
}
