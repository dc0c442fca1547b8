//! Quickshot entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use quickshot::audio::AudioManager;
    use quickshot::renderer::CanvasRenderer;
    use quickshot::settings::Settings;
    use quickshot::sim::{GameManager, LoopDriver};
    use quickshot::ui::{HudView, write_hud};

    /// Game instance holding all state
    struct Game {
        manager: GameManager,
        driver: LoopDriver,
        renderer: CanvasRenderer,
        audio: AudioManager,
        document: Document,
        /// A frame callback is pending
        loop_running: bool,
    }

    impl Game {
        fn update(&mut self) {
            self.manager.update();
            self.flush_events();
        }

        /// Route feedback events to audio
        fn flush_events(&mut self) {
            let events = self.manager.drain_events();
            self.audio.play_events(&events);
        }

        fn draw(&self) {
            self.renderer.draw(&self.manager);
            write_hud(&self.document, &HudView::from_manager(&self.manager));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Quickshot starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no #canvas element"))?
            .dyn_into()?;

        let settings = Settings::load(&canvas);
        canvas.set_width(settings.width as u32);
        canvas.set_height(settings.height as u32);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            manager: GameManager::new(&settings, seed),
            driver: LoopDriver::new(settings.fps),
            renderer: CanvasRenderer::new(canvas.clone(), settings.sprite_url.as_deref())?,
            audio: AudioManager::new(&settings),
            document: document.clone(),
            loop_running: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_start_button(&document, game.clone());

        game.borrow().draw();
        start_loop(game);

        log::info!("Quickshot running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Left click - shoot
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                // Map CSS pixels to canvas pixels
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                let sx = canvas_clone.width() as f64 / rect.width();
                let sy = canvas_clone.height() as f64 / rect.height();
                let x = (event.client_x() as f64 - rect.left()) * sx;
                let y = (event.client_y() as f64 - rect.top()) * sy;
                game.borrow_mut().manager.shoot(Vec2::new(x as f32, y as f32));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - pause/resume, mute
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = event.key();
                if game.borrow_mut().manager.handle_key(&key) {
                    event.prevent_default();
                    after_command(&game);
                } else if game.borrow_mut().audio.handle_key(&key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("start-button") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if game.borrow_mut().manager.start() {
                after_command(&game);
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Show a state change right away and restart the loop if play resumed
    fn after_command(game: &Rc<RefCell<Game>>) {
        let resume = {
            let mut g = game.borrow_mut();
            g.flush_events();
            g.draw();
            g.manager.status().is_playing() && !g.loop_running
        };
        if resume {
            start_loop(game.clone());
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running {
                return;
            }
            g.loop_running = true;
            g.driver.resume(now());
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window - game loop stopped");
            return;
        };
        let callback = Closure::once_into_js(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let reschedule = {
            let mut g = game.borrow_mut();
            let paused = g.manager.status().is_paused();
            let action = g.driver.on_frame(time, paused);
            if action.run_tick {
                g.update();
                g.draw();
            }
            if !action.reschedule {
                g.loop_running = false;
                log::debug!("Game loop stopped while paused");
            }
            action.reschedule
        };

        if reschedule {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use quickshot::Settings;
    use quickshot::autopilot::run_autopilot;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Quickshot (native) starting...");
    log::info!(
        "Native mode runs the headless autopilot - run with `trunk serve` for the web version"
    );

    let seed = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be an unsigned integer")?
        .unwrap_or(12345);

    let summary = run_autopilot(&Settings::default(), seed, 2_000, 0.05)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
