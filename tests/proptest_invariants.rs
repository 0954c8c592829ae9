//! Property-based invariant tests for the arcade simulations.
//!
//! Verifies:
//! 1.  Grid actor: every cell in bounds, no self-overlap (absent an
//!     invincibility bypass), under arbitrary input programs
//! 2.  Tick interval: always inside the configured [min, max] band
//! 3.  Score: monotone non-decreasing within a run
//! 4.  Terminal: advancing after GameOver mutates nothing
//! 5.  Reset: identical seeds yield identical initial snapshots
//! 6.  Continuous actor: never above the ceiling; pipe pairs always tile
//!     the field height; pipe scored flags never clear
//! 7.  Persistence: high score is monotone across save/load cycles

use std::collections::HashSet;

use pocket_arcade::consts::{CEILING_Y, FIELD_HEIGHT, INTERVAL_MAX_MS, INTERVAL_MIN_MS};
use pocket_arcade::records::{GameRecords, MemoryStore};
use pocket_arcade::sim::clock::FrameDelta;
use pocket_arcade::sim::flappy::Difficulty;
use pocket_arcade::sim::snake::{Direction, Mode};
use pocket_arcade::sim::{FlappyGame, Phase, SnakeGame};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum SnakeOp {
    Intent(Direction),
    Advance(u16),
    Pause,
    Start,
}

#[derive(Debug, Clone, Copy)]
enum FlappyOp {
    Flap,
    Advance(u16),
    Pause,
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Walls), Just(Mode::Classic), Just(Mode::Speedrun)]
}

fn arb_snake_op() -> impl Strategy<Value = SnakeOp> {
    prop_oneof![
        4 => arb_direction().prop_map(SnakeOp::Intent),
        8 => (1u16..100).prop_map(SnakeOp::Advance),
        1 => Just(SnakeOp::Pause),
        1 => Just(SnakeOp::Start),
    ]
}

fn arb_flappy_op() -> impl Strategy<Value = FlappyOp> {
    prop_oneof![
        4 => Just(FlappyOp::Flap),
        8 => (1u16..100).prop_map(FlappyOp::Advance),
        1 => Just(FlappyOp::Pause),
    ]
}

fn frame(delta_ms: u16) -> FrameDelta {
    FrameDelta {
        delta_ms: delta_ms as f64,
        step: (delta_ms as f64 / (1000.0 / 60.0)) as f32,
    }
}

// ── Grid simulation ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn grid_actor_stays_legal(
        seed in any::<u64>(),
        mode in arb_mode(),
        ops in prop::collection::vec(arb_snake_op(), 1..200),
    ) {
        let store = MemoryStore::new();
        let mut game = SnakeGame::new(seed, mode, GameRecords::snake(&store));
        game.start();

        // The invincibility bypass legitimately lets the body overlap;
        // the overlap can outlive the effect, so stop asserting uniqueness
        // for the rest of the run once a bypass was seen.
        let mut bypass_seen = false;
        let mut last_score = game.score;

        for op in ops {
            match op {
                SnakeOp::Intent(dir) => game.set_intent(dir),
                SnakeOp::Advance(ms) => game.advance(ms as f64),
                SnakeOp::Pause => game.toggle_pause(),
                SnakeOp::Start => {
                    game.start();
                    bypass_seen = false;
                    last_score = 0;
                }
            }
            if game.is_invincible() {
                bypass_seen = true;
            }

            for cell in &game.body {
                prop_assert!(cell.in_bounds(), "cell {cell:?} out of bounds");
            }
            if !bypass_seen {
                let mut seen = HashSet::new();
                for cell in &game.body {
                    prop_assert!(seen.insert(*cell), "duplicate cell {cell:?}");
                }
            }

            let interval = game.tick_interval();
            prop_assert!((INTERVAL_MIN_MS..=INTERVAL_MAX_MS).contains(&interval));

            prop_assert!(game.score >= last_score);
            last_score = game.score;
        }
    }

    #[test]
    fn grid_game_over_is_terminal(seed in any::<u64>(), extra in 1u16..2000) {
        let store = MemoryStore::new();
        let mut game = SnakeGame::new(seed, Mode::Walls, GameRecords::snake(&store));
        game.start();

        // Drive straight ahead until the run ends
        for _ in 0..2000 {
            if game.phase == Phase::GameOver {
                break;
            }
            game.advance(50.0);
        }
        prop_assume!(game.phase == Phase::GameOver);

        let body = game.body.clone();
        let score = game.score;
        let games_played = game.records.stats.games_played;

        game.advance(extra as f64);
        game.set_intent(Direction::Up);
        game.advance(extra as f64);

        prop_assert_eq!(&game.body, &body);
        prop_assert_eq!(game.score, score);
        prop_assert_eq!(game.phase, Phase::GameOver);
        prop_assert_eq!(game.records.stats.games_played, games_played);
    }

    #[test]
    fn grid_reset_is_idempotent(seed in any::<u64>(), mode in arb_mode()) {
        let store = MemoryStore::new();
        let mut game = SnakeGame::new(1, mode, GameRecords::snake(&store));
        game.start();
        game.advance(500.0);

        game.reset(seed);
        let first = (game.body.clone(), game.food, game.heading, game.walls.clone());
        game.reset(seed);
        let second = (game.body.clone(), game.food, game.heading, game.walls.clone());

        prop_assert_eq!(first, second);
        prop_assert_eq!(game.phase, Phase::Idle);
        prop_assert_eq!(game.score, 0);
    }
}

// ── Continuous simulation ─────────────────────────────────────────────

proptest! {
    #[test]
    fn continuous_actor_stays_legal(
        seed in any::<u64>(),
        ops in prop::collection::vec(arb_flappy_op(), 1..300),
    ) {
        let store = MemoryStore::new();
        let mut game = FlappyGame::new(seed, Difficulty::Normal, GameRecords::flappy(&store));
        game.start();
        let gap = Difficulty::Normal.config().pipe_gap;
        let mut last_score = 0u64;

        for op in ops {
            match op {
                FlappyOp::Flap => game.flap(),
                FlappyOp::Advance(ms) => game.advance(frame(ms)),
                FlappyOp::Pause => game.toggle_pause(),
            }

            prop_assert!(game.bird.y >= CEILING_Y);
            for pipe in &game.pipes {
                let total = pipe.top_height + gap + pipe.bottom_height;
                prop_assert!((total - FIELD_HEIGHT).abs() < 0.01);
            }
            prop_assert!(game.score >= last_score);
            last_score = game.score;
        }
    }

    #[test]
    fn continuous_game_over_is_terminal(seed in any::<u64>(), extra in 1u16..100) {
        let store = MemoryStore::new();
        let mut game = FlappyGame::new(seed, Difficulty::Normal, GameRecords::flappy(&store));
        game.start();

        // Never flapping guarantees a ground hit
        for _ in 0..2000 {
            if game.phase == Phase::GameOver {
                break;
            }
            game.advance(frame(17));
        }
        prop_assert_eq!(game.phase, Phase::GameOver);

        let bird = game.bird;
        let score = game.score;
        game.advance(frame(extra));
        game.flap();
        game.advance(frame(extra));

        prop_assert_eq!(game.bird, bird);
        prop_assert_eq!(game.score, score);
        prop_assert_eq!(game.phase, Phase::GameOver);
        prop_assert_eq!(game.records.stats.games_played, 1);
    }
}

// ── Persistence gateway ───────────────────────────────────────────────

proptest! {
    #[test]
    fn high_score_is_monotone_across_save_load(scores in prop::collection::vec(0u64..10_000, 1..12)) {
        let mut store = MemoryStore::new();
        let mut best = 0;
        for run_score in scores {
            let mut records = GameRecords::snake(&store);
            prop_assert_eq!(records.high_score, best);
            records.high_score = records.high_score.max(run_score);
            records.save(&mut store);
            best = best.max(run_score);
        }
    }
}
