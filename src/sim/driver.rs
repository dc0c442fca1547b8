//! Fixed-interval loop gate
//!
//! The host calls [`LoopDriver::on_frame`] from its per-frame callback
//! (`requestAnimationFrame` in the browser). The driver decides whether the
//! callback should reschedule itself and whether one update+draw cycle runs.

/// Decision for a single frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAction {
    /// Request another frame callback
    pub reschedule: bool,
    /// Run exactly one update+draw cycle
    pub run_tick: bool,
}

#[derive(Debug, Clone)]
pub struct LoopDriver {
    interval_ms: f64,
    /// Timestamp the next interval is measured from
    reference_ms: Option<f64>,
}

impl LoopDriver {
    pub fn new(fps: f64) -> Self {
        debug_assert!(fps > 0.0, "fps must be positive");
        Self {
            interval_ms: 1000.0 / fps,
            reference_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Handle one frame callback at `now_ms`.
    ///
    /// At most one tick fires per callback; missed intervals are dropped,
    /// and the leftover fraction of an interval carries over to avoid drift.
    pub fn on_frame(&mut self, now_ms: f64, paused: bool) -> FrameAction {
        let reference = *self.reference_ms.get_or_insert(now_ms);
        let elapsed = now_ms - reference;
        let run_tick = elapsed > self.interval_ms;
        if run_tick {
            self.reference_ms = Some(now_ms - elapsed % self.interval_ms);
        }
        FrameAction {
            reschedule: !paused,
            run_tick,
        }
    }

    /// Re-arm after the loop stopped, so the time spent stopped is not counted
    pub fn resume(&mut self, now_ms: f64) {
        self.reference_ms = Some(now_ms);
    }
}
