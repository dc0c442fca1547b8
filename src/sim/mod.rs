//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick per call, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod controller;
pub mod driver;
pub mod manager;
pub mod target;

pub use controller::{ControllerConfig, TargetController, TickReport};
pub use driver::{FrameAction, LoopDriver};
pub use manager::{Command, GameEvent, GameManager, GameStatus};
pub use target::{Bounds, Lifecycle, Target};
