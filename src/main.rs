//! Pocket Arcade entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_shell {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlSelectElement};

    use pocket_arcade::audio::{AudioCue, AudioManager};
    use pocket_arcade::consts::*;
    use pocket_arcade::records::{GameRecords, LocalStore};
    use pocket_arcade::settings::Settings;
    use pocket_arcade::sim::flappy::{Difficulty, ParticleKind};
    use pocket_arcade::sim::snake::{Direction, Mode};
    use pocket_arcade::sim::{FlappyGame, FrameClock, GameEvent, Phase, SnakeGame};

    /// Canvas pixels per grid cell
    const CELL_PX: f64 = 20.0;
    /// Grid board offset so the 400px board sits centered on the canvas
    const GRID_ORIGIN: (f64, f64) = (300.0, 150.0);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum ActiveGame {
        Snake,
        Flappy,
    }

    /// Shell instance holding both games and all platform state
    struct Shell {
        active: ActiveGame,
        snake: SnakeGame,
        flappy: FlappyGame,
        clock: FrameClock,
        audio: AudioManager,
        settings: Settings,
        store: LocalStore,
        ctx: CanvasRenderingContext2d,
        // Track phases so records are persisted exactly once per game over
        last_snake_phase: Phase,
        last_flappy_phase: Phase,
    }

    fn now_seed() -> u64 {
        js_sys::Date::now() as u64
    }

    impl Shell {
        fn new(ctx: CanvasRenderingContext2d) -> Self {
            let store = LocalStore;
            let settings = Settings::load(&store);
            let snake = SnakeGame::new(now_seed(), Mode::default(), GameRecords::snake(&store));
            let flappy = FlappyGame::new(
                now_seed().wrapping_add(1),
                Difficulty::default(),
                GameRecords::flappy(&store),
            );
            let mut audio = AudioManager::new();
            audio.set_enabled(settings.sound_enabled);
            Self {
                active: ActiveGame::Snake,
                snake,
                flappy,
                clock: FrameClock::new(),
                audio,
                settings,
                store,
                ctx,
                last_snake_phase: Phase::Idle,
                last_flappy_phase: Phase::Idle,
            }
        }

        /// One frame: advance the active simulation, pump feedback, draw.
        fn frame(&mut self, now_ms: f64) {
            let delta = self.clock.advance(now_ms);
            match self.active {
                ActiveGame::Snake => self.snake.advance(delta.delta_ms),
                ActiveGame::Flappy => self.flappy.advance(delta),
            }
            self.pump_events();
            self.persist_on_game_over();
            self.render();
            self.update_hud();
        }

        /// Map simulation events to audio cues (fire-and-forget)
        fn pump_events(&mut self) {
            // Drain both games; the inactive one is frozen and stays silent
            let mut events = self.snake.take_events();
            events.append(&mut self.flappy.take_events());
            for event in events {
                let cue = match event {
                    GameEvent::Flap => AudioCue::Flap,
                    GameEvent::Scored | GameEvent::PowerUpCollected => AudioCue::Score,
                    GameEvent::Hit => AudioCue::Hit,
                };
                self.audio.play(cue);
            }
        }

        /// Write records back on each transition into GameOver
        fn persist_on_game_over(&mut self) {
            if self.snake.phase != self.last_snake_phase {
                if self.snake.phase == Phase::GameOver {
                    self.snake.records.save(&mut self.store);
                }
                self.last_snake_phase = self.snake.phase;
            }
            if self.flappy.phase != self.last_flappy_phase {
                if self.flappy.phase == Phase::GameOver {
                    self.flappy.records.save(&mut self.store);
                }
                self.last_flappy_phase = self.flappy.phase;
            }
        }

        fn toggle_sound(&mut self) {
            self.settings.sound_enabled = !self.settings.sound_enabled;
            self.audio.set_enabled(self.settings.sound_enabled);
            self.settings.save(&mut self.store);
        }

        fn set_bird_color(&mut self, color: &str) {
            self.settings.bird_color = color.to_string();
            self.settings.save(&mut self.store);
        }

        fn handle_key(&mut self, key: &str) {
            match (self.active, key) {
                (ActiveGame::Snake, "ArrowUp") => self.snake.set_intent(Direction::Up),
                (ActiveGame::Snake, "ArrowDown") => self.snake.set_intent(Direction::Down),
                (ActiveGame::Snake, "ArrowLeft") => self.snake.set_intent(Direction::Left),
                (ActiveGame::Snake, "ArrowRight") => self.snake.set_intent(Direction::Right),
                (ActiveGame::Snake, " ") => match self.snake.phase {
                    Phase::Idle | Phase::GameOver => self.snake.start(),
                    _ => self.snake.toggle_pause(),
                },
                (ActiveGame::Snake, "Escape") => self.snake.toggle_pause(),
                (ActiveGame::Snake, "r" | "R") => self.snake.reset(now_seed()),
                (ActiveGame::Flappy, " " | "ArrowUp") => self.flappy.flap(),
                (ActiveGame::Flappy, "Escape") => self.flappy.toggle_pause(),
                (ActiveGame::Flappy, "r" | "R") => self.flappy.reset(now_seed()),
                _ => {}
            }
        }

        fn pointer_pressed(&mut self) {
            match self.active {
                ActiveGame::Flappy => self.flappy.flap(),
                ActiveGame::Snake => {
                    if matches!(self.snake.phase, Phase::Idle | Phase::GameOver) {
                        self.snake.start();
                    }
                }
            }
        }

        fn auto_pause(&mut self) {
            if self.active == ActiveGame::Snake && self.snake.phase == Phase::Playing {
                self.snake.toggle_pause();
                log::info!("Auto-paused (focus lost)");
            }
            if self.active == ActiveGame::Flappy && self.flappy.phase == Phase::Playing {
                self.flappy.toggle_pause();
                log::info!("Auto-paused (focus lost)");
            }
        }

        // === Rendering ===

        fn render(&self) {
            self.ctx.set_fill_style_str("#0f172a");
            self.ctx
                .fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
            match self.active {
                ActiveGame::Snake => self.render_snake(),
                ActiveGame::Flappy => self.render_flappy(),
            }
        }

        fn grid_rect(&self, x: i32, y: i32) {
            self.ctx.fill_rect(
                GRID_ORIGIN.0 + x as f64 * CELL_PX + 1.0,
                GRID_ORIGIN.1 + y as f64 * CELL_PX + 1.0,
                CELL_PX - 2.0,
                CELL_PX - 2.0,
            );
        }

        fn render_snake(&self) {
            let game = &self.snake;

            // Board backdrop
            self.ctx.set_fill_style_str("#1e293b");
            self.ctx.fill_rect(
                GRID_ORIGIN.0,
                GRID_ORIGIN.1,
                GRID_SIZE as f64 * CELL_PX,
                GRID_SIZE as f64 * CELL_PX,
            );

            self.ctx.set_fill_style_str("#475569");
            for wall in &game.walls {
                self.grid_rect(wall.x, wall.y);
            }

            if let Some(food) = game.food {
                self.ctx.set_fill_style_str("#ef4444");
                self.grid_rect(food.x, food.y);
            }

            if let Some(power_up) = game.power_up {
                self.ctx.set_fill_style_str(power_up.kind.color_hint());
                self.grid_rect(power_up.cell.x, power_up.cell.y);
            }

            for (i, cell) in game.body.iter().enumerate() {
                if i == 0 {
                    self.ctx.set_fill_style_str("#4ade80");
                } else {
                    self.ctx.set_fill_style_str("#22c55e");
                }
                self.grid_rect(cell.x, cell.y);
            }
        }

        fn render_flappy(&self) {
            let game = &self.flappy;

            // Pipes with darker caps
            for pipe in &game.pipes {
                let x = pipe.x as f64;
                self.ctx.set_fill_style_str("#2ECC71");
                self.ctx
                    .fill_rect(x, 0.0, PIPE_WIDTH as f64, pipe.top_height as f64);
                self.ctx.fill_rect(
                    x,
                    (FIELD_HEIGHT - pipe.bottom_height) as f64,
                    PIPE_WIDTH as f64,
                    pipe.bottom_height as f64,
                );
                self.ctx.set_fill_style_str("#145A32");
                self.ctx.fill_rect(
                    x - 5.0,
                    pipe.top_height as f64 - 25.0,
                    PIPE_WIDTH as f64 + 10.0,
                    25.0,
                );
                self.ctx.fill_rect(
                    x - 5.0,
                    (FIELD_HEIGHT - pipe.bottom_height) as f64,
                    PIPE_WIDTH as f64 + 10.0,
                    25.0,
                );
            }

            for particle in &game.particles {
                let color = match particle.kind {
                    ParticleKind::Flap => "#FF8C00",
                    ParticleKind::Score => "#FFD700",
                    ParticleKind::Burst => self.settings.bird_color.as_str(),
                };
                self.ctx.set_fill_style_str(color);
                self.ctx.begin_path();
                let radius = (particle.life as f64 / 15.0).max(1.0);
                let _ = self.ctx.arc(
                    particle.pos.x as f64,
                    particle.pos.y as f64,
                    radius,
                    0.0,
                    TAU,
                );
                self.ctx.fill();
            }

            // Bird
            self.ctx.set_fill_style_str(&self.settings.bird_color);
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                BIRD_X as f64,
                game.bird.y as f64,
                BIRD_RADIUS as f64,
                0.0,
                TAU,
            );
            self.ctx.fill();

            // Ground band with grass lip
            self.ctx.set_fill_style_str("#8B4513");
            self.ctx.fill_rect(
                0.0,
                GROUND_Y as f64,
                FIELD_WIDTH as f64,
                (FIELD_HEIGHT - GROUND_Y) as f64,
            );
            self.ctx.set_fill_style_str("#2ECC71");
            self.ctx.fill_rect(0.0, GROUND_Y as f64, FIELD_WIDTH as f64, 5.0);

            // Big centered score
            self.ctx.set_fill_style_str("#FFD700");
            self.ctx.set_font("bold 64px Arial");
            self.ctx.set_text_align("center");
            let _ = self
                .ctx
                .fill_text(&game.score.to_string(), FIELD_WIDTH as f64 / 2.0, 120.0);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let (score, high_score, phase) = match self.active {
                ActiveGame::Snake => (
                    self.snake.score,
                    self.snake.records.high_score,
                    self.snake.phase,
                ),
                ActiveGame::Flappy => (
                    self.flappy.score,
                    self.flappy.records.high_score,
                    self.flappy.phase,
                ),
            };

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-high") {
                el.set_text_content(Some(&high_score.max(score).to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-combo") {
                if self.active == ActiveGame::Snake && self.snake.combo > 1 {
                    el.set_text_content(Some(&format!("Combo x{}", self.snake.combo)));
                } else {
                    el.set_text_content(Some(""));
                }
            }

            if let Some(el) = document.get_element_by_id("hud-effect") {
                let text = match (self.active, self.snake.effect) {
                    (ActiveGame::Snake, Some(effect)) => {
                        let secs = (effect.remaining_ms / 1000.0).ceil() as u64;
                        format!("{} {}s", effect.kind.as_str(), secs)
                    }
                    _ => String::new(),
                };
                el.set_text_content(Some(&text));
            }

            if let Some(el) = document.get_element_by_id("hud-status") {
                let text = match phase {
                    Phase::Idle => "Press SPACE or tap to play",
                    Phase::Paused => "Paused",
                    Phase::GameOver => "Game over - SPACE to restart",
                    Phase::Playing => "",
                };
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pocket Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let shell = Rc::new(RefCell::new(Shell::new(ctx)));

        setup_input_handlers(&canvas, shell.clone());
        setup_menu_controls(shell.clone());
        setup_auto_pause(shell.clone());

        request_animation_frame(shell);

        log::info!("Pocket Arcade running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, shell: Rc<RefCell<Shell>>) {
        // Keyboard
        {
            let shell = shell.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if matches!(
                    key.as_str(),
                    "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | " "
                ) {
                    event.prevent_default();
                }
                shell.borrow_mut().handle_key(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().pointer_pressed();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                shell.borrow_mut().pointer_pressed();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_menu_controls(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Game tabs
        if let Some(btn) = document.get_element_by_id("tab-snake") {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().active = ActiveGame::Snake;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        if let Some(btn) = document.get_element_by_id("tab-flappy") {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().active = ActiveGame::Flappy;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mode select (snake). Changing mid-run forces an implicit reset.
        if let Some(el) = document.get_element_by_id("snake-mode") {
            if let Ok(select) = el.dyn_into::<HtmlSelectElement>() {
                let shell = shell.clone();
                let select_clone = select.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    if let Some(mode) = Mode::from_str(&select_clone.value()) {
                        shell.borrow_mut().snake.set_mode(mode);
                    }
                });
                let _ = select
                    .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Difficulty select (flappy)
        if let Some(el) = document.get_element_by_id("flappy-difficulty") {
            if let Ok(select) = el.dyn_into::<HtmlSelectElement>() {
                let shell = shell.clone();
                let select_clone = select.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    if let Some(difficulty) = Difficulty::from_str(&select_clone.value()) {
                        shell.borrow_mut().flappy.set_difficulty(difficulty);
                    }
                });
                let _ = select
                    .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Bird color select
        if let Some(el) = document.get_element_by_id("bird-color") {
            if let Ok(select) = el.dyn_into::<HtmlSelectElement>() {
                let shell = shell.clone();
                let select_clone = select.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    shell.borrow_mut().set_bird_color(&select_clone.value());
                });
                let _ = select
                    .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Sound toggle
        if let Some(btn) = document.get_element_by_id("sound-toggle") {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().toggle_sound();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset button
        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut s = shell.borrow_mut();
                let seed = now_seed();
                match s.active {
                    ActiveGame::Snake => s.snake.reset(seed),
                    ActiveGame::Flappy => s.flappy.reset(seed),
                }
                log::info!("Game reset with seed: {seed}");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let shell = shell.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    shell.borrow_mut().auto_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                shell.borrow_mut().auto_pause();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(shell: Rc<RefCell<Shell>>, time: f64) {
        shell.borrow_mut().frame(time);
        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_shell::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pocket Arcade (native) starting...");
    log::info!("Native mode has no renderer - run with `trunk serve` for the web version");

    // Headless sanity pass over the grid simulation
    println!("\nRunning headless smoke simulation...");
    smoke_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_run() {
    use pocket_arcade::records::{GameRecords, MemoryStore};
    use pocket_arcade::sim::SnakeGame;
    use pocket_arcade::sim::snake::{Direction, Mode};

    let store = MemoryStore::new();
    let mut game = SnakeGame::new(42, Mode::Classic, GameRecords::snake(&store));
    game.start();

    // Zig-zag for ten simulated seconds at 60 Hz
    for frame in 0..600u32 {
        if frame % 30 == 0 {
            let dir = if (frame / 30) % 2 == 0 {
                Direction::Up
            } else {
                Direction::Right
            };
            game.set_intent(dir);
        }
        game.advance(1000.0 / 60.0);
    }

    println!(
        "✓ Smoke run complete: phase {:?}, score {}, length {}",
        game.phase,
        game.score,
        game.body.len()
    );
}
