//! Target entity and its lifecycle

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Where a target is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Counting down, ticks left before it expires (always > 0)
    Alive(u32),
    /// Shot by the player
    Killed,
    /// Countdown reached zero unharmed
    Expired,
}

/// Play area in canvas pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether a circle inset by `inset` from every edge still has room to spawn
    pub fn fits(&self, inset: f32) -> bool {
        self.width - 2.0 * inset >= 0.0 && self.height - 2.0 * inset >= 0.0
    }
}

/// A target the player has to shoot before it expires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub life: Lifecycle,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, radius: f32, time_to_die: u32) -> Self {
        debug_assert!(radius > 0.0, "target radius must be positive");
        let life = if time_to_die > 0 {
            Lifecycle::Alive(time_to_die)
        } else {
            Lifecycle::Expired
        };
        Self {
            id,
            pos,
            radius,
            life,
        }
    }

    /// Spawn at a uniformly random position inside `bounds`, keeping
    /// `radius + padding` clear of every edge.
    pub fn spawn_random<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        bounds: Bounds,
        radius: f32,
        padding: f32,
        time_to_die: u32,
    ) -> Self {
        let inset = radius + padding;
        debug_assert!(bounds.fits(inset), "spawn area is empty");
        let x = sample_axis(rng, bounds.width, inset);
        let y = sample_axis(rng, bounds.height, inset);
        Self::new(id, Vec2::new(x, y), radius, time_to_die)
    }

    /// Count down one tick. Returns true if the target expired on this call.
    pub fn tick(&mut self) -> bool {
        match self.life {
            Lifecycle::Alive(0 | 1) => {
                self.life = Lifecycle::Expired;
                true
            }
            Lifecycle::Alive(n) => {
                self.life = Lifecycle::Alive(n - 1);
                false
            }
            Lifecycle::Killed | Lifecycle::Expired => false,
        }
    }

    /// Strict inside test: a point exactly on the rim does not count
    pub fn collides_with(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) < self.radius * self.radius
    }

    pub fn kill(&mut self) {
        self.life = Lifecycle::Killed;
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life, Lifecycle::Alive(_))
    }

    /// Ticks left before expiry (0 once dead)
    pub fn ticks_left(&self) -> u32 {
        match self.life {
            Lifecycle::Alive(n) => n,
            _ => 0,
        }
    }

    /// Remaining lifetime relative to `max_ticks`, clamped to 0..=1
    pub fn remaining_fraction(&self, max_ticks: u32) -> f32 {
        if max_ticks == 0 {
            return 0.0;
        }
        (self.ticks_left() as f32 / max_ticks as f32).clamp(0.0, 1.0)
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, extent: f32, inset: f32) -> f32 {
    let lo = inset;
    let hi = extent - inset;
    if hi <= lo {
        return extent / 2.0;
    }
    rng.random_range(lo..=hi)
}
