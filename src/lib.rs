//! Pocket Arcade - a menu of small browser games
//!
//! Core modules:
//! - `sim`: Deterministic simulations (grid snake + flappy side-scroller)
//! - `records`: High score / aggregate stats persistence gateway
//! - `settings`: User preferences (sound, bird color)
//! - `audio`: Fire-and-forget procedural sound cues

pub mod audio;
pub mod records;
pub mod settings;
pub mod sim;

pub use records::{GameRecords, MemoryStore, RecordStore};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal frame duration the step factor normalizes against (60 Hz)
    pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta fed to a simulation (tab switches, GC hiccups)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Grid dimensions (cells per side)
    pub const GRID_SIZE: i32 = 20;
    /// Snake starting cell
    pub const SNAKE_START: (i32, i32) = (10, 10);
    /// Points per food consumed, before multipliers
    pub const FOOD_POINTS: u64 = 10;
    /// Combo multiplier growth per consecutive consumption
    pub const COMBO_STEP: f32 = 0.08;
    /// Combo multiplier hard ceiling
    pub const COMBO_CEILING: f32 = 2.0;

    /// Tick interval band - no effect or scaling may push outside it
    pub const INTERVAL_MIN_MS: f64 = 100.0;
    pub const INTERVAL_MAX_MS: f64 = 220.0;

    /// Unconsumed power-ups despawn after this long
    pub const POWER_UP_TTL_MS: f64 = 8000.0;
    /// Chance of a power-up spawning on each food consumption
    pub const POWER_UP_FOOD_CHANCE: f64 = 0.25;
    /// Chance of a power-up spawning on any other tick
    pub const POWER_UP_TICK_CHANCE: f64 = 0.015;
    /// Placement attempts before a spawn is deferred to a later tick
    pub const SPAWN_RETRY_LIMIT: u32 = 64;

    /// Continuous playfield dimensions
    pub const FIELD_WIDTH: f32 = 1000.0;
    pub const FIELD_HEIGHT: f32 = 700.0;
    /// Bird anchor column and collision radius
    pub const BIRD_X: f32 = 120.0;
    pub const BIRD_RADIUS: f32 = 18.0;
    pub const BIRD_START_Y: f32 = 300.0;
    /// Ceiling the bird is clamped against
    pub const CEILING_Y: f32 = 20.0;
    /// Ground plane - touching it ends the run
    pub const GROUND_Y: f32 = 680.0;

    /// Pipe geometry
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_SPAWN_X: f32 = 1000.0;
    /// A new pipe pair is appended once the newest has crossed this column
    pub const PIPE_WAVE_X: f32 = 600.0;
    /// Pipes are culled once fully off screen
    pub const PIPE_CULL_X: f32 = -100.0;
    /// A pipe counts as passed once it crosses this column
    pub const PIPE_SCORE_X: f32 = 110.0;
}
