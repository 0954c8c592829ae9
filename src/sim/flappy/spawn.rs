//! Obstacle wave spawning
//!
//! A new pipe pair is appended once the most recent one has scrolled past a
//! fixed threshold, with a randomized gap offset and a difficulty-dependent
//! gap size.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{FIELD_HEIGHT, PIPE_SPAWN_X, PIPE_WAVE_X};

use super::state::{DifficultyConfig, Pipe};

/// True when the field is ready for the next pair
pub fn wave_ready(pipes: &[Pipe]) -> bool {
    pipes.last().map_or(true, |p| p.x < PIPE_WAVE_X)
}

/// Build the next pair at the spawn column with a random gap offset
pub fn next_pipe(rng: &mut Pcg32, cfg: &DifficultyConfig) -> Pipe {
    let top_height = rng.random_range(100..400) as f32;
    Pipe {
        x: PIPE_SPAWN_X,
        top_height,
        bottom_height: FIELD_HEIGHT - top_height - cfg.pipe_gap,
        scored: false,
    }
}
