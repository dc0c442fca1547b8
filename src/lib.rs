//! Quickshot - a reflex target-shooting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, game state machine, frame gate)
//! - `renderer`: Canvas 2D drawing (wasm only)
//! - `ui`: HUD view model and DOM writer
//! - `audio`: Procedurally synthesized sound effects
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod autopilot;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scoreboard::Scoreboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 640.0;
    pub const CANVAS_HEIGHT: f32 = 480.0;

    /// Target defaults
    pub const TARGET_RADIUS: f32 = 24.0;
    /// Gap kept between a spawned target and the canvas edge
    pub const SPAWN_PADDING: f32 = 8.0;
    /// Live targets at once
    pub const TARGETS_LIMIT: usize = 1;
    /// Hard cap for `targets_limit` (keeps the game a single-screen toy)
    pub const MAX_TARGETS_LIMIT: usize = 8;

    /// Lives at the start of every run
    pub const INITIAL_LIVES: u32 = 3;

    /// Logic ticks per second (100ms per tick)
    pub const FPS: f64 = 10.0;

    /// Time-to-die for the first spawns, in ticks
    pub const INITIAL_TIME_TO_DIE: f32 = 30.0;
    /// Floor for time-to-die so the game never becomes unbeatable
    pub const MIN_TIME_TO_DIE: u32 = 8;
    /// Difficulty decay per tick (ticks of lifetime removed from new spawns)
    pub const DIFFICULTY_STEP: f32 = 0.05;

    /// Key that toggles pause/resume
    pub const PAUSE_KEY: &str = "p";
    /// Key that toggles sound
    pub const MUTE_KEY: &str = "m";
}
