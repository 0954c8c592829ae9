//! Grid simulation tick
//!
//! `advance` consumes frame time; `step` is one logical tick:
//! consume intent → move → collide → eat → spawn → score.

use rand::Rng;

use crate::consts::{FOOD_POINTS, POWER_UP_FOOD_CHANCE, POWER_UP_TICK_CHANCE};
use crate::sim::score::consumption_points;
use crate::sim::{GameEvent, Phase};

use super::state::{BoundaryPolicy, Cell, SnakeGame};

impl SnakeGame {
    /// Drive the simulation by one frame's elapsed time.
    ///
    /// Anything but `Playing` ignores the callback entirely, so a stale
    /// frame firing after teardown cannot mutate discarded state.
    pub fn advance(&mut self, delta_ms: f64) {
        if self.phase != Phase::Playing {
            return;
        }

        self.update_wall_clock(delta_ms);
        if self.food_deferred {
            self.spawn_food();
        }

        self.timer.set_interval(self.tick_interval());
        let ticks = self.timer.advance(delta_ms);
        for _ in 0..ticks {
            self.step();
            if self.phase != Phase::Playing {
                break;
            }
        }
    }

    /// Advance the actor by exactly one cell.
    pub(super) fn step(&mut self) {
        if let Some(dir) = self.pending.take() {
            self.heading = dir;
        }
        let (dx, dy) = self.heading.offset();
        let mut head = Cell::new(self.head().x + dx, self.head().y + dy);

        match self.mode.config().boundary {
            BoundaryPolicy::Wrap => head = head.wrapped(),
            BoundaryPolicy::Walls => {
                if !head.in_bounds() || self.walls.contains(&head) {
                    if self.is_invincible() {
                        // Pass through; wrapping keeps the actor in-field
                        head = head.wrapped();
                    } else {
                        self.end_run();
                        return;
                    }
                }
            }
        }

        if self.body[1..].contains(&head) && !self.is_invincible() {
            self.end_run();
            return;
        }

        self.body.insert(0, head);

        if self.food == Some(head) {
            let points =
                consumption_points(FOOD_POINTS, self.combo, self.effect_score_multiplier());
            self.score += points;
            self.combo += 1;
            self.records.stats.food_eaten += 1;
            self.events.push(GameEvent::Scored);
            self.spawn_food();
            if self.rng.random_bool(POWER_UP_FOOD_CHANCE) {
                self.try_spawn_power_up();
            }
        } else {
            self.body.pop();
            self.combo = 0;
        }

        if let Some(power_up) = self.power_up {
            if power_up.cell == head {
                self.activate_power_up(power_up.kind);
            }
        }

        if self.power_up.is_none() && self.rng.random_bool(POWER_UP_TICK_CHANCE) {
            self.try_spawn_power_up();
        }
    }

    /// Terminal transition: runs exactly once per run.
    fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        self.records.high_score = self.records.high_score.max(self.score);
        self.records.stats.games_played += 1;
        self.records.stats.total_score += self.score;
        self.events.push(GameEvent::Hit);
        log::info!("Snake run over: score {}", self.score);
    }
}
