//! Gannon's Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use gannons_quest::consts::*;
    use gannons_quest::platform::Keys;
    use gannons_quest::renderer::{DrawList, RenderState, paint_into};
    use gannons_quest::sim::scene::apply_density;
    use gannons_quest::sim::{GamePhase, GameState, restart, tick};
    use gannons_quest::{GameError, GameResult, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        frame: DrawList,
        settings: Settings,
        keys: Keys,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, bounds: Vec2, tuning: Tuning, settings: Settings) -> Self {
            let tuning = Tuning {
                density: settings.density(),
                ..tuning
            };
            let state = GameState::new(seed, bounds, tuning);
            let last_phase = state.phase;
            Self {
                state,
                render_state: None,
                frame: DrawList::new(),
                settings,
                keys: Keys::new(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.input().clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                self.keys.consume_one_shots();
            }
            if substeps == MAX_SUBSTEPS {
                // Too far behind; drop the backlog instead of fast-forwarding
                self.accumulator = self.accumulator.min(SIM_DT);
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.state.phase != self.last_phase {
                log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
                self.last_phase = self.state.phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            paint_into(&mut self.frame, &self.state, &self.settings);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&self.frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h, render_state.logical_size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Canvas size changed; `logical` in CSS pixels
        fn resize(&mut self, physical: (u32, u32), logical: Vec2) {
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(physical.0, physical.1, (logical.x, logical.y));
            }
            self.state.resize(logical);
        }

        /// Pause if a run is in progress (tab hidden, focus lost)
        fn auto_pause(&mut self, reason: &str) {
            if self.keys.focus_lost(self.state.phase) {
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn cycle_quality(&mut self) {
            let preset = self.settings.quality.cycle();
            self.settings.apply_preset(preset);
            self.settings.save();
            apply_density(&mut self.state, self.settings.density());
            log::info!("Quality: {}", preset.as_str());
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.query_selector("#hud-kills .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.kills.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                let class = if self.settings.show_fps {
                    "hud-item"
                } else {
                    "hud-item hidden"
                };
                let _ = el.set_attribute("class", class);
            }
            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            set_visible(document, "pause-menu", self.state.phase == GamePhase::Paused);

            let over = self.state.phase == GamePhase::GameOver;
            set_visible(document, "game-over", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-kills") {
                    el.set_text_content(Some(&self.state.kills.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-time") {
                    let secs = self.state.time_ticks as f32 * SIM_DT;
                    el.set_text_content(Some(&format!("{:.0}s", secs)));
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Size the canvas backing store to its CSS box. Returns (physical, logical).
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> ((u32, u32), Vec2) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        ((width, height), Vec2::new(client_w as f32, client_h as f32))
    }

    fn platform_err(what: &str) -> GameError {
        GameError::Platform(what.to_string())
    }

    pub async fn run() -> GameResult<()> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Gannon's Quest starting...");

        let window = web_sys::window().ok_or_else(|| platform_err("no window"))?;
        let document = window.document().ok_or_else(|| platform_err("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| platform_err("no #canvas element"))?
            .dyn_into()
            .map_err(|_| platform_err("#canvas is not a canvas"))?;

        let (physical, logical) = fit_canvas(&window, &canvas);

        let settings = Settings::load();
        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, logical, tuning, settings)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| GameError::Renderer(format!("create_surface failed: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| GameError::Renderer(format!("no adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, physical.0, physical.1, (logical.x, logical.y))
                .await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());
        setup_resize(&window, canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Gannon's Quest running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                match code.as_str() {
                    "KeyQ" if !event.repeat() => g.cycle_quality(),
                    "KeyF" if !event.repeat() => g.toggle_fps(),
                    _ => {
                        if g.keys.key_down(&code) {
                            // Keep arrows and space from scrolling the page
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (physical, logical) = fit_canvas(&window_clone, &canvas);
            game.borrow_mut().resize(physical, logical);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.request_pause(); // Toggle back to playing
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                restart(&mut g.state);
                g.accumulator = 0.0;
                g.keys.blur();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
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
                game.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("loading"))
        {
            el.set_text_content(Some(&format!("Failed to start: {e}")));
            let _ = el.set_attribute("class", "");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gannon's Quest (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| gannons_quest::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => gannons_quest::Tuning::default(),
    };

    headless::run(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run without a window: walks, hops and fires the ability for ten
/// simulated seconds, then logs what happened.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use gannons_quest::consts::SIM_DT;
    use gannons_quest::renderer::paint;
    use gannons_quest::sim::{GameState, TickInput, tick};
    use gannons_quest::{Settings, Tuning};
    use glam::Vec2;

    const SECONDS: u32 = 10;

    pub fn run(tuning: Tuning) {
        let mut state = GameState::new(1, Vec2::new(1280.0, 720.0), tuning);
        let ticks = (SECONDS as f32 / SIM_DT).round() as u32;

        for t in 0..ticks {
            tick(&mut state, &script(t), SIM_DT);
        }

        let frame = paint(&state, &Settings::default());
        log::info!(
            "After {}s: phase {:?}, health {}/{}, kills {}, {} projectiles in flight, {} draw commands",
            SECONDS,
            state.phase,
            state.player.health,
            state.player.max_health,
            state.kills,
            state.projectiles.len(),
            frame.len()
        );
    }

    /// Walk right for two seconds, wander the band, hop every second and
    /// fire the ability whenever it might be ready.
    fn script(t: u32) -> TickInput {
        let second = t / 120;
        TickInput {
            right: second < 2 || second % 3 == 0,
            left: second % 3 == 2,
            up: second % 4 == 1,
            down: second % 4 == 3,
            jump: t % 120 == 60,
            special: t % 240 == 0,
            ..TickInput::default()
        }
    }
}
