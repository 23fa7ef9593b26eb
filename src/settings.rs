//! Runtime settings
//!
//! Loaded from a JSON file. Every field has a default so partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::consts::{DEFAULT_ZOOM, NUM_BOTS, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Failure to read or parse a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Match seed; `None` picks one from the clock
    pub seed: Option<u64>,
    /// Bots per match
    pub bot_count: usize,

    // === View ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub zoom: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Safety cap on ticks for headless runs
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            bot_count: NUM_BOTS,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            zoom: DEFAULT_ZOOM,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Ten minutes of match time
            max_ticks: 60 * 60 * 10,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// `load`, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Camera centered on `focus` using the configured view
    pub fn camera(&self, focus: Vec2) -> Camera {
        Camera::follow(
            focus,
            Vec2::new(self.viewport_width, self.viewport_height),
            self.zoom,
        )
    }
}
