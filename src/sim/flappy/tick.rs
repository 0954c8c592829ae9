//! Continuous simulation frame update
//!
//! All motion is scaled by the normalized step factor from the clock
//! adapter, so physics behaves identically at any display refresh rate.

use glam::Vec2;
use rand::Rng;

use crate::consts::{BIRD_X, CEILING_Y, PIPE_CULL_X, PIPE_SCORE_X};
use crate::sim::clock::FrameDelta;
use crate::sim::{GameEvent, Phase};

use super::collision;
use super::spawn;
use super::state::{FlappyGame, Particle, ParticleKind};

impl FlappyGame {
    /// Drive the simulation by one frame.
    ///
    /// Anything but `Playing` ignores the callback, so stale frames after
    /// teardown are no-ops.
    pub fn advance(&mut self, delta: FrameDelta) {
        if self.phase != Phase::Playing {
            return;
        }
        let step = delta.step;
        let cfg = self.difficulty.config();

        // Integrate: position moves under the old velocity, then gravity
        self.bird.y += self.bird.vy * step;
        self.bird.vy += cfg.gravity * step;
        if self.bird.y < CEILING_Y {
            self.bird.y = CEILING_Y;
            self.bird.vy = 0.0;
        }

        // Scroll hazards and cull the fully off-screen ones
        for pipe in &mut self.pipes {
            pipe.x -= cfg.pipe_speed * step;
        }
        self.pipes.retain(|p| p.x > PIPE_CULL_X);

        if spawn::wave_ready(&self.pipes) {
            let pipe = spawn::next_pipe(&mut self.rng, &cfg);
            self.pipes.push(pipe);
        }

        // One point per pipe, flagged so it can never double-count
        let mut passed = 0;
        for pipe in &mut self.pipes {
            if !pipe.scored && pipe.x < PIPE_SCORE_X {
                pipe.scored = true;
                passed += 1;
            }
        }
        for _ in 0..passed {
            self.score += 1;
            self.records.stats.pipes_passed += 1;
            self.events.push(GameEvent::Scored);
            self.spawn_score_particles();
        }

        for particle in &mut self.particles {
            particle.pos += particle.vel * step;
            particle.life -= step;
        }
        self.particles.retain(|p| p.life > 0.0);

        if collision::bird_collides(self.bird.y, &self.pipes) {
            self.spawn_hit_burst();
            self.end_run();
        }
    }

    /// Terminal transition: runs exactly once per run.
    fn end_run(&mut self) {
        self.phase = Phase::GameOver;
        self.records.high_score = self.records.high_score.max(self.score);
        self.records.stats.games_played += 1;
        self.records.stats.total_score += self.score;
        self.events.push(GameEvent::Hit);
        log::info!("Flappy run over: score {}", self.score);
    }

    pub(super) fn spawn_flap_particles(&mut self) {
        let y = self.bird.y;
        for _ in 0..8 {
            let r1: f32 = self.rng.random();
            let r2: f32 = self.rng.random();
            self.particles.push(Particle {
                pos: Vec2::new(BIRD_X, y + 15.0),
                vel: Vec2::new((r1 - 0.5) * 2.0, -(r2 * 3.0 + 1.0)),
                life: 20.0,
                kind: ParticleKind::Flap,
            });
        }
    }

    fn spawn_score_particles(&mut self) {
        for _ in 0..5 {
            let r1: f32 = self.rng.random();
            let r2: f32 = self.rng.random();
            self.particles.push(Particle {
                pos: Vec2::new(150.0, 100.0),
                vel: Vec2::new((r1 - 0.5) * 3.0, -(r2 * 2.0 + 1.0)),
                life: 30.0,
                kind: ParticleKind::Score,
            });
        }
    }

    fn spawn_hit_burst(&mut self) {
        let y = self.bird.y;
        for _ in 0..25 {
            let r1: f32 = self.rng.random();
            let r2: f32 = self.rng.random();
            self.particles.push(Particle {
                pos: Vec2::new(BIRD_X, y),
                vel: Vec2::new((r1 - 0.5) * 12.0, (r2 - 0.5) * 12.0),
                life: 50.0,
                kind: ParticleKind::Burst,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BIRD_RADIUS, FIELD_HEIGHT, GROUND_Y};
    use crate::records::{GameRecords, MemoryStore};
    use crate::sim::flappy::state::{Difficulty, Pipe};

    fn frame() -> FrameDelta {
        FrameDelta {
            delta_ms: 1000.0 / 60.0,
            step: 1.0,
        }
    }

    fn playing() -> FlappyGame {
        let store = MemoryStore::new();
        let mut g = FlappyGame::new(13, Difficulty::Normal, GameRecords::flappy(&store));
        g.start();
        g
    }

    #[test]
    fn impulse_then_integration_moves_up() {
        let mut g = playing();
        assert_eq!(g.bird.y, 300.0);
        g.flap();
        assert_eq!(g.bird.vy, -10.0);

        g.advance(frame());
        // y = 300 + (-10)×1, then gravity bends the velocity
        assert_eq!(g.bird.y, 290.0);
        assert_eq!(g.bird.vy, -9.5);

        let before = g.bird.y;
        g.advance(frame());
        assert!(g.bird.y < before);
    }

    #[test]
    fn gravity_pulls_down_without_input() {
        let mut g = playing();
        g.advance(frame());
        g.advance(frame());
        assert!(g.bird.vy > 0.0);
        assert!(g.bird.y > 300.0);
    }

    #[test]
    fn step_factor_scales_the_integration() {
        let mut g = playing();
        g.bird.vy = -10.0;
        g.advance(FrameDelta {
            delta_ms: 33.3,
            step: 2.0,
        });
        assert_eq!(g.bird.y, 280.0);
        assert_eq!(g.bird.vy, -9.0);
    }

    #[test]
    fn ceiling_clamps_and_zeroes_velocity() {
        let mut g = playing();
        g.bird.y = 22.0;
        g.bird.vy = -10.0;
        g.advance(frame());
        assert_eq!(g.bird.y, CEILING_Y);
        assert_eq!(g.bird.vy, 0.0);
    }

    #[test]
    fn first_frame_spawns_a_pipe() {
        let mut g = playing();
        g.advance(frame());
        assert_eq!(g.pipes.len(), 1);
        // Pipes scroll left at the configured speed
        let x = g.pipes[0].x;
        g.advance(frame());
        assert_eq!(g.pipes[0].x, x - 4.0);
    }

    #[test]
    fn pipe_scores_exactly_once() {
        let mut g = playing();
        g.pipes.push(Pipe {
            x: PIPE_SCORE_X + 1.0,
            top_height: 100.0,
            bottom_height: FIELD_HEIGHT - 100.0 - 400.0,
            scored: false,
        });
        g.bird.vy = -0.5; // keep it hovering near 300

        g.advance(frame());
        assert_eq!(g.score, 1);
        assert!(g.pipes[0].scored);
        assert_eq!(g.records.stats.pipes_passed, 1);
        assert!(g.take_events().contains(&GameEvent::Scored));

        g.bird.vy = -0.5;
        g.advance(frame());
        assert_eq!(g.score, 1);
    }

    #[test]
    fn ground_contact_ends_the_run_once() {
        let mut g = playing();
        g.bird.y = GROUND_Y - BIRD_RADIUS - 1.0;
        g.bird.vy = 5.0;
        g.advance(frame());
        assert_eq!(g.phase, Phase::GameOver);
        assert_eq!(g.records.stats.games_played, 1);
        assert!(g.take_events().contains(&GameEvent::Hit));
        assert!(g.particles.iter().any(|p| p.kind == ParticleKind::Burst));

        // Stale callbacks after the terminal transition are no-ops
        let y = g.bird.y;
        g.advance(frame());
        assert_eq!(g.bird.y, y);
        assert_eq!(g.records.stats.games_played, 1);
    }

    #[test]
    fn pipe_overlap_ends_the_run() {
        let mut g = playing();
        g.pipes.push(Pipe {
            x: BIRD_X,
            top_height: 400.0,
            bottom_height: FIELD_HEIGHT - 400.0 - 180.0,
            scored: true,
        });
        g.bird.y = 300.0; // upper edge at 282, inside the 400-tall top rect
        g.advance(frame());
        assert_eq!(g.phase, Phase::GameOver);
    }

    #[test]
    fn pause_freezes_position_and_score() {
        let mut g = playing();
        g.advance(frame());
        g.toggle_pause();
        let (bird, score, pipes) = (g.bird, g.score, g.pipes.clone());
        for _ in 0..300 {
            g.advance(frame());
        }
        assert_eq!(g.bird, bird);
        assert_eq!(g.score, score);
        assert_eq!(g.pipes, pipes);
    }

    #[test]
    fn high_score_persists_on_game_over() {
        let mut store = MemoryStore::new();
        let mut g = FlappyGame::new(13, Difficulty::Normal, GameRecords::flappy(&store));
        g.start();
        g.score = 7;
        g.bird.y = GROUND_Y; // on the plane
        g.advance(frame());
        assert_eq!(g.phase, Phase::GameOver);
        assert_eq!(g.records.high_score, 7);
        g.records.save(&mut store);

        let g2 = FlappyGame::new(14, Difficulty::Normal, GameRecords::flappy(&store));
        assert_eq!(g2.records.high_score, 7);
    }
}
