//! Continuous game state and core types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::BIRD_START_Y;
use crate::records::{FlappyStats, GameRecords};
use crate::sim::{GameEvent, Phase};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Per-difficulty tuning, looked up once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyConfig {
    /// Horizontal obstacle speed per nominal frame
    pub pipe_speed: f32,
    /// Downward acceleration per nominal frame
    pub gravity: f32,
    /// Velocity set (not added) by an impulse; negative is up
    pub jump_strength: f32,
    /// Vertical opening between a pipe pair
    pub pipe_gap: f32,
}

impl Difficulty {
    pub fn config(self) -> DifficultyConfig {
        match self {
            Difficulty::Easy => DifficultyConfig {
                pipe_speed: 3.0,
                gravity: 0.4,
                jump_strength: -9.0,
                pipe_gap: 200.0,
            },
            Difficulty::Normal => DifficultyConfig {
                pipe_speed: 4.0,
                gravity: 0.5,
                jump_strength: -10.0,
                pipe_gap: 180.0,
            },
            Difficulty::Hard => DifficultyConfig {
                pipe_speed: 5.0,
                gravity: 0.6,
                jump_strength: -11.0,
                pipe_gap: 150.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// The actor: x is fixed, only the vertical state integrates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub y: f32,
    pub vy: f32,
}

/// One obstacle pair: a top rect and a bottom rect with a gap between
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    pub top_height: f32,
    pub bottom_height: f32,
    /// Set once the pair has been counted for score
    pub scored: bool,
}

/// What a particle was emitted for (render picks the color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Flap,
    Score,
    Burst,
}

/// A visual particle - never gameplay-affecting
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life in nominal frames
    pub life: f32,
    pub kind: ParticleKind,
}

/// Complete continuous game state. Public fields double as the snapshot.
#[derive(Debug)]
pub struct FlappyGame {
    pub difficulty: Difficulty,
    pub phase: Phase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    /// Visual only
    pub particles: Vec<Particle>,
    pub score: u64,
    /// Persisted records loaded at construction, written back on game over
    pub records: GameRecords<FlappyStats>,
    pub(super) rng: Pcg32,
    pub(super) seed: u64,
    pub(super) events: Vec<GameEvent>,
}

impl FlappyGame {
    /// Create a new game in `Idle`
    pub fn new(seed: u64, difficulty: Difficulty, records: GameRecords<FlappyStats>) -> Self {
        let mut game = Self {
            difficulty,
            phase: Phase::Idle,
            bird: Bird {
                y: BIRD_START_Y,
                vy: 0.0,
            },
            pipes: Vec::new(),
            particles: Vec::new(),
            score: 0,
            records,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            events: Vec::new(),
        };
        game.init_run();
        game
    }

    /// (Re)initialize all per-run entities
    pub(super) fn init_run(&mut self) {
        self.bird = Bird {
            y: BIRD_START_Y,
            vy: 0.0,
        };
        self.pipes.clear();
        self.particles.clear();
        self.score = 0;
    }

    /// Discard the run and return to `Idle` with a reseeded field
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = Phase::Idle;
        self.events.clear();
        self.init_run();
    }

    /// Begin a fresh run from `Idle` or `GameOver`
    pub fn start(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::GameOver) {
            self.init_run();
            self.phase = Phase::Playing;
            log::info!("Flappy run started ({})", self.difficulty.as_str());
        }
    }

    /// Impulse input. Sets the velocity outright (non-additive) while
    /// `Playing`; from `Idle` it is the designated way to start a run.
    pub fn flap(&mut self) {
        match self.phase {
            Phase::Idle => self.start(),
            Phase::Playing => {
                self.bird.vy = self.difficulty.config().jump_strength;
                self.events.push(GameEvent::Flap);
                self.spawn_flap_particles();
            }
            _ => {}
        }
    }

    /// Toggle between `Playing` and `Paused`; no-op elsewhere
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    /// Switch difficulty. Forces an implicit reset, even mid-run.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.difficulty {
            return;
        }
        self.difficulty = difficulty;
        let seed = self.seed;
        self.reset(seed);
    }

    /// Drain the events emitted since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::MemoryStore;

    fn game() -> FlappyGame {
        let store = MemoryStore::new();
        FlappyGame::new(9, Difficulty::Normal, GameRecords::flappy(&store))
    }

    #[test]
    fn new_game_is_idle_at_start_position() {
        let g = game();
        assert_eq!(g.phase, Phase::Idle);
        assert_eq!(g.bird, Bird { y: 300.0, vy: 0.0 });
        assert!(g.pipes.is_empty());
        assert_eq!(g.score, 0);
    }

    #[test]
    fn flap_from_idle_starts_the_run_without_impulse() {
        let mut g = game();
        g.flap();
        assert_eq!(g.phase, Phase::Playing);
        assert_eq!(g.bird.vy, 0.0);
    }

    #[test]
    fn flap_sets_velocity_non_additively() {
        let mut g = game();
        g.start();
        g.bird.vy = 7.5;
        g.flap();
        assert_eq!(g.bird.vy, -10.0);
        g.flap();
        assert_eq!(g.bird.vy, -10.0);
        assert!(g.take_events().contains(&GameEvent::Flap));
    }

    #[test]
    fn flap_is_ignored_when_paused_or_over() {
        let mut g = game();
        g.start();
        g.toggle_pause();
        g.bird.vy = 3.0;
        g.flap();
        assert_eq!(g.bird.vy, 3.0);
        g.phase = Phase::GameOver;
        g.flap();
        assert_eq!(g.bird.vy, 3.0);
    }

    #[test]
    fn difficulty_change_resets_the_run() {
        let mut g = game();
        g.start();
        g.score = 5;
        g.set_difficulty(Difficulty::Hard);
        assert_eq!(g.phase, Phase::Idle);
        assert_eq!(g.score, 0);
        assert_eq!(g.difficulty.config().pipe_gap, 150.0);
    }

    #[test]
    fn reset_twice_yields_identical_snapshot() {
        let mut g = game();
        g.start();
        g.bird.y = 123.0;
        g.reset(50);
        let bird = g.bird;
        g.reset(50);
        assert_eq!(g.bird, bird);
        assert_eq!(g.phase, Phase::Idle);
        assert!(g.pipes.is_empty());
    }
}
