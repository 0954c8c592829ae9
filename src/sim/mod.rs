//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timing derived only from host timestamp deltas
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod clock;
pub mod flappy;
pub mod score;
pub mod snake;

use serde::{Deserialize, Serialize};

pub use clock::{FrameClock, FrameDelta, TickTimer};
pub use flappy::FlappyGame;
pub use snake::SnakeGame;

/// Run-level phase shared by both simulations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Fresh board, waiting for the player to start
    Idle,
    /// Active gameplay
    Playing,
    /// Simulation frozen, state preserved
    Paused,
    /// Run ended
    GameOver,
}

impl Phase {
    /// True while a run exists (playing or paused)
    pub fn in_run(self) -> bool {
        matches!(self, Phase::Playing | Phase::Paused)
    }
}

/// Events emitted by a simulation during one frame, drained by the host.
/// Audio and HUD feedback hang off these; they never feed back into the sim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The continuous actor received an impulse
    Flap,
    /// A consumable was eaten or a pipe was passed
    Scored,
    /// A power-up was picked up
    PowerUpCollected,
    /// Terminal collision - the run is over
    Hit,
}
