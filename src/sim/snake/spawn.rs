//! Procedural placement of consumables
//!
//! Uniform random sampling with a bounded retry budget. Exhaustion is a
//! recoverable condition: food placement is deferred to a later tick,
//! power-up placement is simply skipped.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{GRID_SIZE, POWER_UP_TTL_MS, SPAWN_RETRY_LIMIT};

use super::state::{Cell, PowerUp, PowerUpKind, SnakeGame};

/// Sample an in-bounds cell not rejected by `blocked`.
///
/// Returns `None` once the retry budget runs out (near-full grid).
pub fn free_cell(rng: &mut Pcg32, blocked: impl Fn(Cell) -> bool) -> Option<Cell> {
    for _ in 0..SPAWN_RETRY_LIMIT {
        let cell = Cell::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if !blocked(cell) {
            return Some(cell);
        }
    }
    None
}

impl SnakeGame {
    /// Place (or defer) the single food consumable.
    pub(super) fn spawn_food(&mut self) {
        let Self {
            rng,
            body,
            walls,
            power_up,
            ..
        } = self;
        let cell = free_cell(rng, |c| {
            body.contains(&c) || walls.contains(&c) || power_up.is_some_and(|p| p.cell == c)
        });
        self.food = cell;
        self.food_deferred = cell.is_none();
        if self.food_deferred {
            log::warn!("Food placement deferred: no free cell found");
        }
    }

    /// Maybe place a power-up. No-op while one exists or an effect is active.
    pub(super) fn try_spawn_power_up(&mut self) {
        if self.power_up.is_some() || self.effect.is_some() {
            return;
        }
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let Self {
            rng,
            body,
            walls,
            food,
            ..
        } = self;
        if let Some(cell) = free_cell(rng, |c| {
            body.contains(&c) || walls.contains(&c) || *food == Some(c)
        }) {
            self.power_up = Some(PowerUp {
                cell,
                kind,
                expires_in_ms: POWER_UP_TTL_MS,
            });
        }
    }
}
