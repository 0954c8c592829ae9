//! Timed effect system
//!
//! At most one effect is active; a new pickup replaces the current one and
//! its remaining duration is discarded. The tick interval is always derived
//! fresh from mode + score with the effect delta applied on top, so an
//! expiring effect restores whatever the current score implies - never a
//! cached pre-effect value.

use crate::consts::{INTERVAL_MAX_MS, INTERVAL_MIN_MS};
use crate::sim::GameEvent;

use super::state::{ActiveEffect, ModeConfig, PowerUpKind, SnakeGame};

/// Tick interval implied by mode and score alone.
///
/// Shrinks one step per scaling threshold crossed, clamped to the mode floor.
pub fn interval_for_score(cfg: &ModeConfig, score: u64) -> f64 {
    let steps = (score / cfg.scaling_step_points) as f64;
    (cfg.base_interval_ms - steps * cfg.scaling_step_ms).max(cfg.floor_interval_ms)
}

impl SnakeGame {
    /// Current tick interval: derived interval plus effect delta, clamped to
    /// the configured band.
    pub fn tick_interval(&self) -> f64 {
        let derived = interval_for_score(&self.mode.config(), self.score);
        let delta = self.effect.map_or(0.0, |e| e.kind.interval_delta_ms());
        (derived + delta).clamp(INTERVAL_MIN_MS, INTERVAL_MAX_MS)
    }

    /// Collision bypass flag consulted by the per-tick collision checks
    pub fn is_invincible(&self) -> bool {
        self.effect
            .is_some_and(|e| e.kind == PowerUpKind::Invincibility)
    }

    pub fn effect_score_multiplier(&self) -> f32 {
        self.effect.map_or(1.0, |e| e.kind.score_multiplier())
    }

    /// Pick up a power-up, superseding any active effect outright.
    pub(super) fn activate_power_up(&mut self, kind: PowerUpKind) {
        self.effect = Some(ActiveEffect {
            kind,
            remaining_ms: kind.duration_ms(),
        });
        self.power_up = None;
        self.records.stats.power_ups_collected += 1;
        self.events.push(GameEvent::PowerUpCollected);
    }

    /// Count the effect and the power-up TTL down by one frame's time.
    ///
    /// Only called while `Playing`, so pause freezes both; leaving the run
    /// discards them with the rest of the per-run state.
    pub(super) fn update_wall_clock(&mut self, delta_ms: f64) {
        if let Some(effect) = &mut self.effect {
            effect.remaining_ms -= delta_ms;
            if effect.remaining_ms <= 0.0 {
                self.effect = None;
            }
        }
        if let Some(power_up) = &mut self.power_up {
            power_up.expires_in_ms -= delta_ms;
            if power_up.expires_in_ms <= 0.0 {
                self.power_up = None;
            }
        }
    }
}
