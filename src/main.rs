//! Skyhop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlSelectElement, KeyboardEvent, TouchEvent};

    use skyhop::audio::{AudioManager, SoundEffect};
    use skyhop::renderer::{CanvasSurface, Surface, TextAlign, draw_frame};
    use skyhop::sim::{GameEvent, Simulation, TickInput, character_color, tick};
    use skyhop::{Settings, Viewport};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        input: TickInput,
        surface: CanvasSurface,
        audio: AudioManager,
        settings: Settings,
        /// A frame callback is pending
        loop_running: bool,
        // FPS tracking
        last_time: f64,
        fps: f64,
    }

    impl Game {
        fn new(surface: CanvasSurface, settings: Settings, seed: u64) -> Self {
            let (width, height) = surface.fit_to_client();
            let sim = Simulation::new(settings.game_config(seed, 0), Viewport::new(width, height));

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                sim,
                input: TickInput::default(),
                surface,
                audio,
                settings,
                loop_running: false,
                last_time: 0.0,
                fps: 0.0,
            }
        }

        /// One animation frame: tick, draw, dispatch events
        fn frame(&mut self, time: f64) {
            if self.last_time > 0.0 {
                let dt = time - self.last_time;
                if dt > 0.0 {
                    self.fps = self.fps * 0.9 + (1000.0 / dt) * 0.1;
                }
            }
            self.last_time = time;

            tick(&mut self.sim, &self.input);
            // Clear one-shot inputs after processing
            self.input.primary = false;

            self.draw();

            for event in self.sim.drain_events() {
                self.handle_event(&event);
            }
        }

        fn draw(&mut self) {
            draw_frame(&mut self.surface, &self.sim, self.settings.render_options());
            if self.settings.show_fps {
                let pos = glam::Vec2::new(self.sim.viewport.width / 2.0, 30.0);
                self.surface.fill_text(
                    &format!("{:.0} fps", self.fps),
                    pos,
                    "14px monospace",
                    "#aaa",
                    TextAlign::Center,
                );
            }
        }

        fn handle_event(&self, event: &GameEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            match event {
                GameEvent::RunStarted => {
                    set_display(&document, "mainMenu", "none");
                    set_display(&document, "characterSelect", "none");
                    set_display(&document, "characterPreview", "none");
                }
                GameEvent::RunRestarted => {
                    set_display(&document, "gameOverMenu", "none");
                    set_display(&document, "characterSelect", "none");
                    set_display(&document, "characterPreview", "none");
                }
                GameEvent::GameOver { score, level, cause } => {
                    log::info!("Game over ({:?}) at level {}", cause, level);
                    if let Some(el) = document.get_element_by_id("finalScore") {
                        el.set_text_content(Some(&format!(
                            "Your score: {} (level {})",
                            score.floor() as u64,
                            level
                        )));
                    }
                    set_display(&document, "gameOverMenu", "flex");
                    if self.sim.features().character_select {
                        set_display(&document, "characterSelect", "inline-block");
                        set_display(&document, "characterPreview", "inline-block");
                    }
                }
                _ => {}
            }
        }

        /// Match the canvas to its layout size and tell the simulation
        fn resize(&mut self) {
            let (width, height) = self.surface.fit_to_client();
            self.sim.resize(Viewport::new(width, height));
            if !self.loop_running {
                self.draw();
            }
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(e) = el.style().set_property("display", display) {
            log::warn!("Failed to set display on #{}: {:?}", id, e);
        }
    }

    fn selected_character(document: &Document) -> usize {
        document
            .get_element_by_id("characterSelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.selected_index().max(0) as usize)
            .unwrap_or(0)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Skyhop starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#gameCanvas is not a canvas"))?;
        let surface = CanvasSurface::new(canvas)?;

        let settings = Settings::load();
        log::info!("Variant: {}", settings.variant.as_str());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(surface, settings, seed)));
        game.borrow_mut().draw();

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone())?;
        setup_touch_buttons(&document, game.clone())?;
        setup_menu_buttons(&document, game.clone())?;
        setup_character_preview(&document)?;
        setup_resize(game)?;

        log::info!("Skyhop ready");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => {
                        g.input.primary = true;
                        g.audio.resume();
                    }
                    "i" | "I" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    "m" | "M" => {
                        let muted = g.settings.toggle_muted();
                        g.audio.set_muted(muted);
                        g.settings.save();
                    }
                    _ => return,
                }
                event.prevent_default();
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("leftBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.left = true;
            });
            btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("rightBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().input.right = true;
            });
            btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("jumpBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.input.primary = true;
                g.audio.resume();
            });
            btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Releasing either direction button stops horizontal input
        for id in ["leftBtn", "rightBtn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    let mut g = game.borrow_mut();
                    g.input.left = false;
                    g.input.right = false;
                });
                btn.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
        }

        Ok(())
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let character = selected_character(&document);
                let seed = js_sys::Date::now() as u64;
                {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    let config = g.settings.game_config(seed, character);
                    g.sim = Simulation::new(config, g.sim.viewport);
                    g.input = TickInput {
                        autopilot: g.input.autopilot,
                        ..Default::default()
                    };
                    g.sim.start();
                    for event in g.sim.drain_events() {
                        g.handle_event(&event);
                    }
                }
                ensure_loop(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let character = selected_character(&document);
                let seed = js_sys::Date::now() as u64;
                {
                    let mut g = game.borrow_mut();
                    g.input.left = false;
                    g.input.right = false;
                    g.input.primary = false;
                    g.sim.restart_with_seed(seed, character);
                    for event in g.sim.drain_events() {
                        g.handle_event(&event);
                    }
                }
                log::info!("Game restarted with seed: {}", seed);
                ensure_loop(&game);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_character_preview(document: &Document) -> Result<(), JsValue> {
        let Some(select) = document
            .get_element_by_id("characterSelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        else {
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let color = character_color(selected_character(&document));
            if let Some(preview) = document
                .get_element_by_id("characterPreview")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = preview.style().set_property("background-color", color);
            }
        });
        select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Schedule frames again if the loop went idle
    fn ensure_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running {
                return;
            }
            g.loop_running = true;
            g.last_time = 0.0;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window for animation frame");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame(time);
            let active = g.sim.is_active();
            if !active {
                g.loop_running = false;
            }
            active
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().inspect_err(|e| log::error!("Startup failed: {:?}", e))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyhop::sim::{GameEvent, Simulation, TickInput, tick};
    use skyhop::{Settings, Variant, Viewport};

    /// Five minutes at 60 fps
    const MAX_TICKS: u64 = 60 * 60 * 5;

    env_logger::init();
    log::info!("Skyhop (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    // Usage: skyhop [arcade|classic] [seed]
    let mut args = std::env::args().skip(1);
    let mut settings = Settings::load();
    if let Some(arg) = args.next() {
        match Variant::from_str(&arg) {
            Some(variant) => settings.variant = variant,
            None => log::warn!("Unknown variant {:?}, using {}", arg, settings.variant.as_str()),
        }
    }
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);
    log::info!("Variant {} with seed {}", settings.variant.as_str(), seed);
    let mut sim = Simulation::new(settings.game_config(seed, 0), Viewport::default());
    sim.start();

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    while sim.is_active() && sim.run.time_ticks < MAX_TICKS {
        tick(&mut sim, &input);
        for event in sim.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("Reached level {}", level),
                GameEvent::InvulnerabilityActivated => log::debug!("Autopilot spent a power-up"),
                _ => {}
            }
        }
    }

    log::info!(
        "Autopilot run over after {} ticks: score {}, level {}, {:?}",
        sim.run.time_ticks,
        sim.run.display_score(),
        sim.run.level,
        sim.phase,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
