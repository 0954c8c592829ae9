//! Grid game state and core types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{GRID_SIZE, SNAKE_START};
use crate::records::{GameRecords, SnakeStats};
use crate::sim::clock::TickTimer;
use crate::sim::{GameEvent, Phase};

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True if the cell lies inside the playfield
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }

    /// Wrap both coordinates into the playfield (toroidal modes)
    pub fn wrapped(self) -> Self {
        Self {
            x: self.x.rem_euclid(GRID_SIZE),
            y: self.y.rem_euclid(GRID_SIZE),
        }
    }
}

/// Actor heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Geometric opposite - an intent equal to this is a reversal
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// How the playfield boundary behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Coordinates wrap modulo the grid size; no boundary collisions
    Wrap,
    /// Border wall cells and out-of-bounds candidates end the run
    Walls,
}

/// Game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Border walls, game over on hit
    #[default]
    Walls,
    /// Wrap around edges, no walls
    Classic,
    /// Bounded like Walls, faster pace and quicker scaling
    Speedrun,
}

/// Per-mode tuning, looked up once instead of branching at call sites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    /// Tick interval with zero score and no effect
    pub base_interval_ms: f64,
    /// Score scaling never shrinks the interval below this
    pub floor_interval_ms: f64,
    /// Every this many points, the interval shrinks one step
    pub scaling_step_points: u64,
    /// Interval shrink per threshold crossed
    pub scaling_step_ms: f64,
    pub boundary: BoundaryPolicy,
}

impl Mode {
    pub fn config(self) -> ModeConfig {
        match self {
            Mode::Walls => ModeConfig {
                base_interval_ms: 160.0,
                floor_interval_ms: 130.0,
                scaling_step_points: 150,
                scaling_step_ms: 3.0,
                boundary: BoundaryPolicy::Walls,
            },
            Mode::Classic => ModeConfig {
                base_interval_ms: 160.0,
                floor_interval_ms: 130.0,
                scaling_step_points: 150,
                scaling_step_ms: 3.0,
                boundary: BoundaryPolicy::Wrap,
            },
            Mode::Speedrun => ModeConfig {
                base_interval_ms: 140.0,
                floor_interval_ms: 110.0,
                scaling_step_points: 100,
                scaling_step_ms: 3.0,
                boundary: BoundaryPolicy::Walls,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walls => "walls",
            Mode::Classic => "classic",
            Mode::Speedrun => "speedrun",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "walls" => Some(Mode::Walls),
            "classic" => Some(Mode::Classic),
            "speedrun" => Some(Mode::Speedrun),
            _ => None,
        }
    }
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    SlowDown,
    DoublePoints,
    Invincibility,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::SlowDown,
        PowerUpKind::DoublePoints,
        PowerUpKind::Invincibility,
    ];

    /// Effect duration once picked up
    pub fn duration_ms(self) -> f64 {
        match self {
            PowerUpKind::SpeedBoost | PowerUpKind::SlowDown => 5000.0,
            PowerUpKind::DoublePoints => 7000.0,
            PowerUpKind::Invincibility => 4000.0,
        }
    }

    /// Delta applied to the derived tick interval while active
    pub fn interval_delta_ms(self) -> f64 {
        match self {
            PowerUpKind::SpeedBoost => -20.0,
            PowerUpKind::SlowDown => 40.0,
            _ => 0.0,
        }
    }

    /// Score multiplier while active
    pub fn score_multiplier(self) -> f32 {
        match self {
            PowerUpKind::DoublePoints => 2.0,
            _ => 1.0,
        }
    }

    /// Display color for the render boundary
    pub fn color_hint(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "#f59e0b",
            PowerUpKind::SlowDown => "#8b5cf6",
            PowerUpKind::DoublePoints => "#10b981",
            PowerUpKind::Invincibility => "#3b82f6",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "Speed Boost",
            PowerUpKind::SlowDown => "Slow Down",
            PowerUpKind::DoublePoints => "Double Points",
            PowerUpKind::Invincibility => "Invincibility",
        }
    }
}

/// A spawned, not-yet-collected power-up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub cell: Cell,
    pub kind: PowerUpKind,
    /// Wall-clock budget before it despawns unconsumed
    pub expires_in_ms: f64,
}

/// The single active timed effect (a new pickup replaces it outright)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub remaining_ms: f64,
}

/// Complete grid game state. Public fields double as the render snapshot.
#[derive(Debug)]
pub struct SnakeGame {
    pub mode: Mode,
    pub phase: Phase,
    /// Actor cells, head first, no duplicates
    pub body: Vec<Cell>,
    pub heading: Direction,
    /// Border wall cells (empty in wrap modes)
    pub walls: Vec<Cell>,
    /// `None` only while a deferred placement waits for a free cell
    pub food: Option<Cell>,
    pub power_up: Option<PowerUp>,
    pub effect: Option<ActiveEffect>,
    pub score: u64,
    pub combo: u32,
    /// Persisted records loaded at construction, written back on game over
    pub records: GameRecords<SnakeStats>,
    /// Single-writer pending intent, consumed once per tick
    pub(super) pending: Option<Direction>,
    pub(super) timer: TickTimer,
    pub(super) rng: Pcg32,
    pub(super) seed: u64,
    /// Set when food placement was deferred by spawn exhaustion
    pub(super) food_deferred: bool,
    pub(super) events: Vec<GameEvent>,
}

/// Border wall ring for bounded modes
pub(super) fn border_walls() -> Vec<Cell> {
    let mut walls = Vec::with_capacity((GRID_SIZE as usize) * 4);
    for i in 0..GRID_SIZE {
        walls.push(Cell::new(i, 0));
        walls.push(Cell::new(i, GRID_SIZE - 1));
        walls.push(Cell::new(0, i));
        walls.push(Cell::new(GRID_SIZE - 1, i));
    }
    walls
}

impl SnakeGame {
    /// Create a new game in `Idle` with a fresh board
    pub fn new(seed: u64, mode: Mode, records: GameRecords<SnakeStats>) -> Self {
        let cfg = mode.config();
        let mut game = Self {
            mode,
            phase: Phase::Idle,
            body: Vec::new(),
            heading: Direction::Right,
            walls: Vec::new(),
            food: None,
            power_up: None,
            effect: None,
            score: 0,
            combo: 0,
            records,
            pending: None,
            timer: TickTimer::new(cfg.base_interval_ms),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            food_deferred: false,
            events: Vec::new(),
        };
        game.init_run();
        game
    }

    /// (Re)initialize all per-run entities
    pub(super) fn init_run(&mut self) {
        let cfg = self.mode.config();
        self.body = vec![Cell::new(SNAKE_START.0, SNAKE_START.1)];
        self.heading = Direction::Right;
        self.pending = None;
        self.walls = match cfg.boundary {
            BoundaryPolicy::Walls => border_walls(),
            BoundaryPolicy::Wrap => Vec::new(),
        };
        self.power_up = None;
        self.effect = None;
        self.score = 0;
        self.combo = 0;
        self.food_deferred = false;
        self.timer = TickTimer::new(cfg.base_interval_ms);
        self.spawn_food();
    }

    /// Discard the run and return to `Idle` with a reseeded board
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
            log::info!("Snake run started ({} mode)", self.mode.as_str());
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

    /// Switch modes. Forces an implicit reset, even mid-run.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        let seed = self.seed;
        self.reset(seed);
    }

    /// Buffer a heading intent for the next tick.
    ///
    /// Reversals and input outside `Playing` are silently dropped. Rapid
    /// presses between ticks only ever affect the single upcoming step.
    pub fn set_intent(&mut self, dir: Direction) {
        if self.phase != Phase::Playing {
            return;
        }
        if dir == self.heading.opposite() {
            return;
        }
        self.pending = Some(dir);
    }

    pub fn head(&self) -> Cell {
        self.body[0]
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

    fn game(mode: Mode) -> SnakeGame {
        let store = MemoryStore::new();
        SnakeGame::new(7, mode, GameRecords::snake(&store))
    }

    #[test]
    fn new_game_is_idle_with_single_segment() {
        let g = game(Mode::Walls);
        assert_eq!(g.phase, Phase::Idle);
        assert_eq!(g.body, vec![Cell::new(10, 10)]);
        assert_eq!(g.heading, Direction::Right);
        assert_eq!(g.score, 0);
    }

    #[test]
    fn walls_ring_the_border_in_bounded_modes() {
        let g = game(Mode::Walls);
        assert!(g.walls.contains(&Cell::new(0, 5)));
        assert!(g.walls.contains(&Cell::new(19, 5)));
        assert!(g.walls.contains(&Cell::new(5, 0)));
        assert!(g.walls.contains(&Cell::new(5, 19)));
        assert!(!g.walls.contains(&Cell::new(5, 5)));
    }

    #[test]
    fn classic_mode_has_no_walls() {
        let g = game(Mode::Classic);
        assert!(g.walls.is_empty());
    }

    #[test]
    fn reversal_intent_is_dropped() {
        let mut g = game(Mode::Walls);
        g.start();
        g.set_intent(Direction::Left);
        assert_eq!(g.pending, None);
        g.set_intent(Direction::Up);
        assert_eq!(g.pending, Some(Direction::Up));
    }

    #[test]
    fn intent_outside_playing_is_dropped() {
        let mut g = game(Mode::Walls);
        g.set_intent(Direction::Up);
        assert_eq!(g.pending, None);
        g.start();
        g.toggle_pause();
        g.set_intent(Direction::Up);
        assert_eq!(g.pending, None);
    }

    #[test]
    fn reset_twice_yields_identical_snapshot() {
        let mut g = game(Mode::Walls);
        g.start();
        g.reset(99);
        let (body, food, heading, score) = (g.body.clone(), g.food, g.heading, g.score);
        g.reset(99);
        assert_eq!(g.body, body);
        assert_eq!(g.food, food);
        assert_eq!(g.heading, heading);
        assert_eq!(g.score, score);
        assert_eq!(g.phase, Phase::Idle);
    }

    #[test]
    fn mode_change_resets_the_run() {
        let mut g = game(Mode::Walls);
        g.start();
        g.score = 50;
        g.set_mode(Mode::Classic);
        assert_eq!(g.phase, Phase::Idle);
        assert_eq!(g.score, 0);
        assert!(g.walls.is_empty());
    }

    #[test]
    fn wrapped_cell_stays_in_bounds() {
        assert_eq!(Cell::new(-1, 20).wrapped(), Cell::new(19, 0));
        assert_eq!(Cell::new(20, -1).wrapped(), Cell::new(0, 19));
        assert_eq!(Cell::new(5, 5).wrapped(), Cell::new(5, 5));
    }
}
