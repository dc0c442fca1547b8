//! Target controller
//!
//! Owns the live targets, the single-slot shot mailbox and the difficulty
//! ramp. One call to [`TargetController::tick`] is one logical game tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::target::{Bounds, Target};
use crate::consts::*;
use crate::settings::Settings;

/// Parameters the controller needs from the game settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub bounds: Bounds,
    pub target_radius: f32,
    pub padding: f32,
    pub targets_limit: usize,
    pub initial_time_to_die: f32,
    pub min_time_to_die: u32,
    pub difficulty_step: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            target_radius: TARGET_RADIUS,
            padding: SPAWN_PADDING,
            targets_limit: TARGETS_LIMIT,
            initial_time_to_die: INITIAL_TIME_TO_DIE,
            min_time_to_die: MIN_TIME_TO_DIE,
            difficulty_step: DIFFICULTY_STEP,
        }
    }
}

impl From<&Settings> for ControllerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            bounds: Bounds::new(settings.width, settings.height),
            target_radius: settings.target_radius,
            padding: settings.padding,
            targets_limit: settings.targets_limit,
            initial_time_to_die: settings.initial_time_to_die,
            min_time_to_die: settings.min_time_to_die,
            difficulty_step: settings.difficulty_step,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Targets killed by the pending shot
    pub hits: u32,
    /// Targets whose countdown reached zero this tick
    pub expired: u32,
    /// At most one miss per tick: a shot that hit nothing, or any expiry
    pub missed: bool,
}

/// Owns the live target set
#[derive(Debug, Clone)]
pub struct TargetController {
    config: ControllerConfig,
    targets: Vec<Target>,
    pending_shot: Option<Vec2>,
    /// Max time-to-die for new spawns, before flooring
    difficulty: f32,
    rng: Pcg32,
    next_id: u32,
}

impl TargetController {
    /// Create an empty controller; targets appear on the first tick
    pub fn new(config: ControllerConfig, seed: u64) -> Self {
        Self {
            config,
            targets: Vec::with_capacity(config.targets_limit),
            pending_shot: None,
            difficulty: config.initial_time_to_die.max(config.min_time_to_die as f32),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Live targets, in spawn order
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn pending_shot(&self) -> Option<Vec2> {
        self.pending_shot
    }

    /// Time-to-die the next spawn will get
    pub fn max_time_to_die(&self) -> u32 {
        (self.difficulty.floor() as u32).max(self.config.min_time_to_die)
    }

    /// Queue a shot for the next tick. Overwrites an unconsumed shot.
    pub fn record_shot(&mut self, point: Vec2) {
        if let Some(previous) = self.pending_shot.replace(point) {
            log::trace!("Shot at {previous} overwritten by {point}");
        }
    }

    /// Place a target at a fixed position (scripted spawns).
    ///
    /// Returns `None` if the live set is already full.
    pub fn place_target(&mut self, pos: Vec2, time_to_die: u32) -> Option<u32> {
        if self.targets.len() >= self.config.targets_limit {
            return None;
        }
        let id = self.next_target_id();
        self.targets
            .push(Target::new(id, pos, self.config.target_radius, time_to_die));
        Some(id)
    }

    /// Advance one tick
    pub fn tick(&mut self) -> TickReport {
        let shot = self.pending_shot;
        let mut report = TickReport::default();

        // Hit check comes before the countdown, so a target shot on its
        // last tick is a hit and never an expiry.
        for target in self.targets.iter_mut().filter(|t| t.is_alive()) {
            match shot {
                Some(point) if target.collides_with(point) => {
                    target.kill();
                    report.hits += 1;
                }
                _ => {
                    if target.tick() {
                        report.expired += 1;
                    }
                }
            }
        }

        report.missed = (shot.is_some() && report.hits == 0) || report.expired > 0;

        self.targets.retain(Target::is_alive);
        self.refill();
        self.pending_shot = None;
        self.difficulty =
            (self.difficulty - self.config.difficulty_step).max(self.config.min_time_to_die as f32);

        if report != TickReport::default() {
            log::trace!(
                "Tick: {} hit(s), {} expired, missed={}",
                report.hits,
                report.expired,
                report.missed
            );
        }
        report
    }

    fn refill(&mut self) {
        debug_assert!(
            self.targets.len() <= self.config.targets_limit,
            "live targets exceed limit before spawning"
        );
        let time_to_die = self.max_time_to_die();
        while self.targets.len() < self.config.targets_limit {
            let id = self.next_target_id();
            let target = Target::spawn_random(
                &mut self.rng,
                id,
                self.config.bounds,
                self.config.target_radius,
                self.config.padding,
                time_to_die,
            );
            log::trace!("Spawned target {} at {} (ttd {})", id, target.pos, time_to_die);
            self.targets.push(target);
        }
    }

    fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
