//! Continuous simulation: flappy side-scroller
//!
//! Continuous-time: the actor's vertical position integrates under gravity
//! each frame, scaled by the normalized step factor so the motion is
//! frame-rate independent.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use state::{Bird, Difficulty, DifficultyConfig, FlappyGame, Particle, ParticleKind, Pipe};
