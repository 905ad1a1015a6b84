//! Upside Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use upside_flap::audio::AudioManager;
    use upside_flap::persistence::LocalStore;
    use upside_flap::platform;
    use upside_flap::renderer::{CanvasRenderer, RenderFrame, final_score_text, hud_text};
    use upside_flap::sim::{Game, GameEvent, GamePhase, PurchaseOutcome, TickInput};
    use upside_flap::{Settings, SkinCursor, Tuning};

    const DEFAULT_WIDTH: f32 = 400.0;
    const DEFAULT_HEIGHT: f32 = 600.0;

    /// Host state shared by the frame loop and input handlers
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        audio: AudioManager,
        document: Document,
        autopilot: bool,
        /// Press waiting for the next frame
        pending_jump: bool,
        shop: SkinCursor,
    }

    impl App {
        /// Start from the title screen, otherwise follow the one-button rule.
        /// Jumps are applied by the next tick.
        fn activate(&mut self) {
            self.audio.resume();
            match self.game.state().phase {
                GamePhase::Title => {
                    self.game.start_game();
                }
                GamePhase::Running => self.pending_jump = true,
                GamePhase::GameOver => self.game.press(),
            }
        }

        fn frame(&mut self) {
            let now_ms = platform::now_ms();
            self.game.tick(&TickInput {
                jump: std::mem::take(&mut self.pending_jump),
                autopilot: self.autopilot,
                now_ms,
            });
            self.game.advance_effects();

            let voice = self.game.state().current_skin.info().voice;
            for event in self.game.drain_events() {
                self.audio.handle(&event, voice);
                self.apply_event(&event);
            }

            self.renderer
                .draw(&RenderFrame::capture(&self.game, now_ms), now_ms);
            self.set_text("hud", &hud_text(&self.game.hud(now_ms)));
        }

        /// Screen changes driven by game events
        fn apply_event(&self, event: &GameEvent) {
            match event {
                GameEvent::GameStarted => {
                    self.set_hidden("title-screen", true);
                    self.set_hidden("game-over-screen", true);
                    self.set_hidden("hud", false);
                }
                GameEvent::GameOver {
                    score,
                    high_score,
                    new_high_score,
                    message,
                } => {
                    self.set_text("final-score", &final_score_text(*score, *high_score));
                    self.set_text("game-over-message", message);
                    self.set_hidden("new-high-score", !new_high_score);
                    self.set_hidden("game-over-screen", false);
                }
                GameEvent::SkinChanged { skin } => {
                    self.set_text("skin-name", skin.info().name);
                }
                GameEvent::SkullsChanged { skulls } => {
                    self.set_text("skull-count", &skulls.to_string());
                }
                GameEvent::SpeedChanged { speed } => {
                    self.set_text("game-speed", &format!("{:.0}", speed));
                }
                _ => {}
            }
        }

        /// Browse the shop; unlocked skins are equipped on the way past
        fn browse_skins(&mut self, delta: isize) {
            let skin = self.shop.step(delta);
            if self.game.state().is_skin_unlocked(skin) {
                self.game.select_skin(skin);
            } else {
                self.set_text(
                    "skin-name",
                    &format!("{} - {} skulls (B to buy)", skin.info().name, skin.cost()),
                );
            }
        }

        /// Buy the skin under the shop cursor
        fn buy_skin(&mut self) {
            let skin = self.shop.skin();
            match self.game.purchase_skin(skin) {
                PurchaseOutcome::InsufficientSkulls { cost, skulls } => {
                    log::info!("{} costs {} skulls (have {})", skin, cost, skulls);
                }
                outcome => log::info!("{}: {:?}", skin, outcome),
            }
        }

        fn toggle_mute(&mut self) {
            let mut settings = self.audio.settings().clone();
            settings.muted = !settings.muted;
            if settings.muted {
                self.audio.stop_music();
            }
            if let Err(e) = settings.save(&mut LocalStore::new()) {
                log::warn!("Failed to save settings: {}", e);
            }
            log::info!("Muted: {}", settings.muted);
            self.audio.set_settings(settings);
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Upside Flap starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fill the window
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(DEFAULT_WIDTH, |v| v as f32);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(DEFAULT_HEIGHT, |v| v as f32);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let renderer = CanvasRenderer::new(&canvas).ok_or("no 2d context")?;
        let settings = Settings::load(&LocalStore::new());
        let seed = platform::session_seed();
        let game = Game::new(
            seed,
            width,
            height,
            Tuning::default(),
            Box::new(LocalStore::new()),
        );
        log::info!("Game initialized with seed: {}", seed);

        let game_skin = game.state().current_skin;
        let app = App {
            game,
            renderer,
            audio: AudioManager::new(settings),
            document: document.clone(),
            autopilot: false,
            pending_jump: false,
            shop: SkinCursor::at(game_skin),
        };
        {
            let state = app.game.state();
            app.set_text("skin-name", state.current_skin.info().name);
            app.set_text("skull-count", &state.skulls.to_string());
            app.set_text("game-speed", &format!("{:.0}", state.game_speed));
        }
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let app = Rc::new(RefCell::new(app));
        setup_input_handlers(&window, &canvas, app.clone())?;
        request_animation_frame(app);

        log::info!("Upside Flap running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        // Pointer press - jump, or start from the title screen
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                app.borrow_mut().activate();
            });
            canvas.add_event_listener_with_callback(
                "pointerdown",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" | "Enter" => {
                        event.prevent_default();
                        a.activate();
                    }
                    "i" | "I" => {
                        a.autopilot = !a.autopilot;
                        log::info!("Autopilot: {}", a.autopilot);
                    }
                    "m" | "M" => a.toggle_mute(),
                    "+" | "=" => {
                        let speed = a.game.state().game_speed + 1.0;
                        a.game.set_game_speed(speed);
                    }
                    "-" | "_" => {
                        let speed = a.game.state().game_speed - 1.0;
                        a.game.set_game_speed(speed);
                    }
                    "ArrowRight" if !a.game.state().is_running() => a.browse_skins(1),
                    "ArrowLeft" if !a.game.state().is_running() => a.browse_skins(-1),
                    "b" | "B" if !a.game.state().is_running() => a.buy_skin(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use upside_flap::Tuning;
    use upside_flap::persistence::{MemoryStore, keys};
    use upside_flap::sim::{Game, GameEvent, TickInput};

    const DEMO_FRAMES: u64 = 60 * 60;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    env_logger::init();
    log::info!("Upside Flap (native) starting...");
    log::info!("Running a headless autopilot demo - use `trunk serve` for the web version");

    let mut game = Game::new(
        upside_flap::platform::session_seed(),
        400.0,
        600.0,
        Tuning::default(),
        Box::new(MemoryStore::new()),
    );
    game.start_game();

    let (mut jumps, mut shields, mut runs) = (0u32, 0u32, 1u32);
    let mut now_ms = 0.0;
    for _ in 0..DEMO_FRAMES {
        now_ms += FRAME_MS;
        game.tick(&TickInput {
            jump: false,
            autopilot: true,
            now_ms,
        });
        for event in game.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::ShieldEarned { .. } => shields += 1,
                GameEvent::GameOver { score, message, .. } => {
                    log::info!("Run {} ended at {}: \"{}\"", runs, score, message);
                    runs += 1;
                    game.start_game();
                }
                _ => {}
            }
        }
    }

    let state = game.state();
    log::info!(
        "Demo finished: score {}, best {}, {} skulls, {} jumps, {} shields earned, {} run(s)",
        state.score,
        state.high_score,
        state.skulls,
        jumps,
        shields,
        runs
    );
    log::info!(
        "Stored skulls: {}",
        game.manager().store().get(keys::SKULLS).unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
