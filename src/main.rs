//! Maze Dash entry point
//!
//! Handles platform-specific initialization and wires input, timer, audio,
//! and rendering around the game state machine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use maze_dash::audio::{AudioManager, SoundEffect};
    use maze_dash::consts::*;
    use maze_dash::renderer::vertex::Palette;
    use maze_dash::renderer::{RenderState, board_vertices};
    use maze_dash::settings::Settings;
    use maze_dash::sim::{
        Direction, GameEvent, GameState, GameStatus, attempt_move_dir, restart, second_tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        /// Interval handle for the 1 Hz countdown; Some exactly while the
        /// countdown is armed
        timer_handle: Option<i32>,
    }

    impl Game {
        fn new() -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume);
            audio.set_muted(settings.muted);
            Self {
                state: GameState::new(),
                render_state: None,
                audio,
                settings,
                timer_handle: None,
            }
        }

        fn palette(&self) -> &'static Palette {
            Palette::for_settings(self.settings.high_contrast)
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = board_vertices(&self.state, self.palette());
            let background = self.palette().background;
            if let Some(ref mut render_state) = self.render_state {
                render_state.background = background;
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Countdown, with a warning style for the final seconds
            if let Some(el) = document.get_element_by_id("hud-time") {
                if let Some(val) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                    val.set_text_content(Some(&self.state.time_left.to_string()));
                }
                let warn = self.state.status == GameStatus::Playing
                    && self.state.time_left <= TIME_WARN_SECS;
                let class = if warn { "hud-item warn" } else { "hud-item" };
                let _ = el.set_attribute("class", class);
            }

            // Level indicator (1-based)
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{}/5", self.state.level + 1)));
            }

            // Win/lose overlays
            if let Some(el) = document.get_element_by_id("win-overlay") {
                let class = if self.state.status == GameStatus::Won {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.get_element_by_id("lose-overlay") {
                let class = if self.state.status == GameStatus::Lost {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Restart control is offered only once the run is over
            if let Some(el) = document.get_element_by_id("restart-btn") {
                let class = if self.state.is_over() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    /// Cancel the countdown interval if one is armed
    fn clear_timer(game: &Rc<RefCell<Game>>) {
        let handle = game.borrow_mut().timer_handle.take();
        if let Some(handle) = handle {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
    }

    /// Arm a fresh 1 Hz countdown. Any previously armed interval is
    /// cancelled first, so at most one timer ever exists and a new level
    /// always starts with a full first second.
    fn arm_timer(game: &Rc<RefCell<Game>>) {
        clear_timer(game);

        let window = web_sys::window().unwrap();
        let game_for_tick = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            on_second_tick(&game_for_tick);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        ) {
            Ok(handle) => game.borrow_mut().timer_handle = Some(handle),
            Err(e) => log::error!("Failed to arm countdown timer: {:?}", e),
        }
        closure.forget();
    }

    /// One elapsed second of the countdown
    fn on_second_tick(game: &Rc<RefCell<Game>>) {
        let lost = {
            let mut g = game.borrow_mut();
            let was_playing = g.state.status == GameStatus::Playing;
            second_tick(&mut g.state);
            was_playing && g.state.status == GameStatus::Lost
        };
        if lost {
            clear_timer(game);
            let g = game.borrow();
            g.audio.play(SoundEffect::TimeUp);
            log::info!("Time's up on level {}", g.state.level + 1);
        }
    }

    /// One move attempt from keyboard or the on-screen pad
    fn handle_move(game: &Rc<RefCell<Game>>, dir: Direction) {
        let (events, level, status) = {
            let mut g = game.borrow_mut();
            let events = attempt_move_dir(&mut g.state, dir);
            (events, g.state.level, g.state.status)
        };

        // Signals fan out synchronously within the move-handling call
        {
            let g = game.borrow();
            for event in &events {
                let cue = match event {
                    GameEvent::Moved => SoundEffect::Step,
                    GameEvent::WallHit => SoundEffect::WallBump,
                    GameEvent::LevelCleared => SoundEffect::LevelClear,
                };
                g.audio.play(cue);
            }
        }

        if events.contains(&GameEvent::LevelCleared) {
            match status {
                GameStatus::Playing => {
                    // Advanced to the next maze: fresh clock, fresh timer
                    log::info!("Level cleared, now on level {}", level + 1);
                    arm_timer(game);
                }
                GameStatus::Won => {
                    clear_timer(game);
                    log::info!("All mazes cleared!");
                }
                GameStatus::Lost => {}
            }
        }
    }

    /// Full reset, from any status
    fn restart_game(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            restart(&mut g.state);
        }
        arm_timer(game);
        log::info!("Game restarted");
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Maze Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new()));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers and controls
        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        // Start the level clock and the render loop
        arm_timer(&game);
        request_animation_frame(game);

        log::info!("Maze Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            match event.key().as_str() {
                "ArrowUp" => handle_move(&game, Direction::Up),
                "ArrowDown" => handle_move(&game, Direction::Down),
                "ArrowLeft" => handle_move(&game, Direction::Left),
                "ArrowRight" => handle_move(&game, Direction::Right),
                "r" | "R" | "Enter" => {
                    if game.borrow().state.is_over() {
                        restart_game(&game);
                    }
                }
                _ => return,
            }
            event.prevent_default();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // On-screen d-pad
        for (id, dir) in [
            ("btn-up", Direction::Up),
            ("btn-down", Direction::Down),
            ("btn-left", Direction::Left),
            ("btn-right", Direction::Right),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    handle_move(&game, dir);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Restart (visible only once the run is over; guard anyway)
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                restart_game(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute toggle
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
                g.settings.save();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // High-contrast palette toggle
        if let Some(btn) = document.get_element_by_id("contrast-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.high_contrast = !g.settings.high_contrast;
                g.settings.save();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Maze Dash (native) starting...");
    log::info!("Native mode has no GUI - run with `trunk serve` for the web version");

    println!("\nRunning state machine smoke test...");
    smoke_test_maze0();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_maze0() {
    use maze_dash::sim::{GameEvent, GameState, attempt_move};

    let mut state = GameState::new();

    // Maze 0: east of the start is a wall, south is open
    let events = attempt_move(&mut state, 1, 0);
    assert_eq!(events, vec![GameEvent::WallHit]);
    let events = attempt_move(&mut state, 0, 1);
    assert_eq!(events, vec![GameEvent::Moved]);

    println!("✓ State machine smoke test passed!");
}
