//! Host-loop helper that turns wall-clock instants into capped frame deltas.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use std::time::Instant;

use tracing::info;

use crate::consts::DEFAULT_MAX_FRAME_DT;

/// Frame timer for the host render loop.
///
/// Each [`FrameClock::tick`] returns the seconds since the previous tick,
/// capped so a stalled host (backgrounded tab, debugger) does not feed the
/// simulation one enormous step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    cap: f64,
    last: Option<Instant>,
    paused: bool,
    killed: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(cap: f64) -> Self {
        Self { cap, last: None, paused: false, killed: false }
    }

    /// Seconds since the previous tick, at most the cap.
    ///
    /// The first tick after construction or [`FrameClock::resume`] returns
    /// `0.0`. Returns `None` while paused or after [`FrameClock::kill`].
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        if self.paused || self.killed {
            return None;
        }
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last = Some(now);
        Some(dt.min(self.cap))
    }

    /// Stop producing frames until resumed.
    pub fn pause(&mut self) {
        if !self.paused {
            info!("frame clock paused");
        }
        self.paused = true;
    }

    /// Produce frames again, measuring from `now` so the pause is not counted.
    pub fn resume(&mut self, now: Instant) {
        if self.killed {
            return;
        }
        if self.paused {
            info!("frame clock resumed");
        }
        self.paused = false;
        self.last = Some(now);
    }

    /// Stop for good. A killed clock never ticks again.
    pub fn kill(&mut self) {
        if !self.killed {
            info!("frame clock killed");
        }
        self.killed = true;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// Largest delta a tick will report, in seconds.
    #[must_use]
    pub fn cap(&self) -> f64 {
        self.cap
    }
}
