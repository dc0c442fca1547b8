//! Game settings
//!
//! Everything tunable about a run. In the browser an optional JSON object in
//! the canvas `data-config` attribute overrides the defaults.

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub width: f32,
    pub height: f32,

    // === Targets ===
    pub target_radius: f32,
    /// Extra gap between a spawned target and the canvas edge
    pub padding: f32,
    /// Live targets at once
    pub targets_limit: usize,
    /// Time-to-die of the first spawns, in ticks
    pub initial_time_to_die: f32,
    /// Lowest time-to-die the difficulty ramp reaches
    pub min_time_to_die: u32,
    /// Time-to-die removed from new spawns every tick
    pub difficulty_step: f32,

    // === Rules ===
    pub initial_lives: u32,
    /// Logic ticks per second
    pub fps: f64,
    /// Key that toggles pause/resume
    pub pause_key: String,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Presentation ===
    /// Image drawn over each target
    pub sprite_url: Option<String>,

    /// Fixed RNG seed (random per page load when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,

            target_radius: TARGET_RADIUS,
            padding: SPAWN_PADDING,
            targets_limit: TARGETS_LIMIT,
            initial_time_to_die: INITIAL_TIME_TO_DIE,
            min_time_to_die: MIN_TIME_TO_DIE,
            difficulty_step: DIFFICULTY_STEP,

            initial_lives: INITIAL_LIVES,
            fps: FPS,
            pause_key: PAUSE_KEY.to_string(),

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            sprite_url: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let settings: Settings = serde_json::from_str(json).context("invalid settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings describe a playable game
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("target_radius", self.target_radius),
            ("padding", self.padding),
            ("initial_time_to_die", self.initial_time_to_die),
            ("difficulty_step", self.difficulty_step),
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
        ] {
            ensure!(value.is_finite(), "{name} must be finite, got {value}");
        }
        ensure!(self.width > 0.0 && self.height > 0.0, "canvas must have a positive size");
        ensure!(self.target_radius > 0.0, "target_radius must be > 0");
        ensure!(self.padding >= 0.0, "padding must be >= 0");
        let inset = self.target_radius + self.padding;
        ensure!(
            Bounds::new(self.width, self.height).fits(inset),
            "canvas {}x{} too small for targets of radius {} with padding {}",
            self.width,
            self.height,
            self.target_radius,
            self.padding
        );
        ensure!(
            (1..=MAX_TARGETS_LIMIT).contains(&self.targets_limit),
            "targets_limit must be within 1..={MAX_TARGETS_LIMIT}"
        );
        ensure!(self.initial_lives >= 1, "initial_lives must be >= 1");
        ensure!(self.fps.is_finite() && self.fps > 0.0, "fps must be finite and > 0");
        // A subnormal rate overflows the frame interval
        ensure!((1000.0 / self.fps).is_finite(), "fps {} is too small", self.fps);
        ensure!(self.min_time_to_die >= 1, "min_time_to_die must be >= 1");
        ensure!(
            self.initial_time_to_die >= self.min_time_to_die as f32,
            "initial_time_to_die must be >= min_time_to_die"
        );
        ensure!(self.difficulty_step >= 0.0, "difficulty_step must be >= 0");
        ensure!(!self.pause_key.is_empty(), "pause_key must not be empty");
        ensure!(
            (0.0..=1.0).contains(&self.master_volume) && (0.0..=1.0).contains(&self.sfx_volume),
            "volumes must be within 0.0..=1.0"
        );
        Ok(())
    }

    /// Read overrides from the canvas `data-config` attribute (WASM only).
    /// Falls back to defaults on any problem.
    #[cfg(target_arch = "wasm32")]
    pub fn load(canvas: &web_sys::HtmlCanvasElement) -> Self {
        let Some(json) = canvas.get_attribute("data-config") else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from data-config");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring data-config: {e:#}");
                Self::default()
            }
        }
    }
}
