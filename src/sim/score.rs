//! Combo-driven scoring
//!
//! Points accrue per consumption event with a saturating combo multiplier.
//! The combo counter itself lives in the game state; this module only knows
//! the math.

use crate::consts::{COMBO_CEILING, COMBO_STEP};

/// Multiplier for the given consecutive-consumption count.
///
/// Monotone non-decreasing in `combo`, capped at [`COMBO_CEILING`].
pub fn combo_multiplier(combo: u32) -> f32 {
    (1.0 + combo as f32 * COMBO_STEP).min(COMBO_CEILING)
}

/// Points awarded for one consumption event.
///
/// `floor(base × comboMultiplier × effectMultiplier)`, matching the render
/// shell's displayed math exactly.
pub fn consumption_points(base: u64, combo: u32, effect_multiplier: f32) -> u64 {
    (base as f32 * combo_multiplier(combo) * effect_multiplier).floor() as u64
}
