//! Grid simulation: snake on a 20×20 board
//!
//! Discrete-time: the actor advances one cell per logical tick, at a tick
//! interval derived from mode, score, and any active effect.

pub mod effect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{
    ActiveEffect, BoundaryPolicy, Cell, Direction, Mode, ModeConfig, PowerUp, PowerUpKind,
    SnakeGame,
};
