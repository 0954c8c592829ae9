//! Frame clock adapter
//!
//! Converts the host's irregular per-frame timestamps into normalized elapsed
//! time, and accumulates elapsed time into whole logical ticks for the grid
//! simulation. Neither type touches game state.

use crate::consts::{MAX_FRAME_DELTA_MS, NOMINAL_FRAME_MS};

/// Elapsed time derived from one frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    /// Milliseconds since the previous callback, clamped
    pub delta_ms: f64,
    /// `delta_ms` divided by the nominal 60 Hz frame duration
    pub step: f32,
}

/// Turns monotonically increasing host timestamps into frame deltas.
///
/// The first callback after construction or [`FrameClock::reset`] yields one
/// nominal frame, so a run never opens with a giant catch-up delta.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms` and return the elapsed delta.
    pub fn advance(&mut self, now_ms: f64) -> FrameDelta {
        let delta_ms = match self.last_ms {
            Some(last) if now_ms > last => (now_ms - last).min(MAX_FRAME_DELTA_MS),
            _ => NOMINAL_FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        FrameDelta {
            delta_ms,
            step: (delta_ms / NOMINAL_FRAME_MS) as f32,
        }
    }

    /// Forget the previous timestamp (after pause/resume or tab switches).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Accumulates elapsed milliseconds and emits whole logical ticks.
///
/// The fractional remainder always carries over; elapsed time is never
/// dropped or double-counted, even when the interval changes between frames.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval_ms: f64,
    acc_ms: f64,
}

impl TickTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            acc_ms: 0.0,
        }
    }

    /// Change the tick interval, keeping the accumulated remainder.
    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(1.0);
    }

    pub fn interval(&self) -> f64 {
        self.interval_ms
    }

    /// Add elapsed time, returning how many whole ticks it crossed.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        self.acc_ms += delta_ms;
        let mut ticks = 0;
        while self.acc_ms >= self.interval_ms {
            self.acc_ms -= self.interval_ms;
            ticks += 1;
        }
        ticks
    }

    /// Discard any accumulated remainder (on run reset).
    pub fn reset(&mut self) {
        self.acc_ms = 0.0;
    }
}
