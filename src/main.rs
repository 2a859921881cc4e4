//! Egg Brawl entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use egg_brawl::Game;
    use egg_brawl::audio::WebAudio;
    use egg_brawl::persistence::LocalStorageBackend;
    use egg_brawl::platform::key_binding;
    use egg_brawl::renderer::CanvasRenderer;

    type WebGame = Game<LocalStorageBackend, WebAudio>;

    struct App {
        game: WebGame,
        renderer: Option<CanvasRenderer>,
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Egg Brawl starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let renderer = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| {
                fit_canvas(&window, &canvas);
                CanvasRenderer::new(&canvas)
            });
        if renderer.is_none() {
            log::warn!("No 2D canvas found, running without rendering");
        }

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(LocalStorageBackend::new(), WebAudio::new(), seed);
        game.start_run(false);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App { game, renderer }));

        setup_keyboard(app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app.clone());
        request_animation_frame(app);

        log::info!("Egg Brawl running!");
    }

    /// Keys that drive the session rather than the fighter
    fn handle_command(app: &mut App, key: &str) -> bool {
        let game = &mut app.game;
        match key {
            "Enter" if !game.world().run.running => game.start_run(false),
            "n" | "N" if !game.world().run.running => game.start_run(true),
            "m" | "M" => {
                game.toggle_mute();
            }
            "s" | "S" if game.world().run.lost => {
                let name = web_sys::window()
                    .and_then(|w| w.prompt_with_message("Name for the scoreboard").ok())
                    .flatten()
                    .unwrap_or_default();
                if let Some(rank) = game.submit_score(&name, js_sys::Date::now()) {
                    log::info!("Leaderboard rank: {}", rank);
                }
            }
            _ => return false,
        }
        true
    }

    fn setup_keyboard(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut app = app.borrow_mut();
                // Unlock audio on the first gesture
                app.game.audio().resume();
                if key_binding(&key).is_some() {
                    event.prevent_default();
                    if !event.repeat() {
                        app.game.input_mut().handle_key(&key, true);
                    }
                } else if !event.repeat() && handle_command(&mut app, &key) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input_mut().handle_key(&event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                app.borrow_mut().game.set_focused(!hidden);
                if hidden {
                    log::info!("Auto-paused (tab hidden)");
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
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.set_focused(false);
                log::info!("Auto-paused (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().game.set_focused(true);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keep the backing store matched to the CSS size
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    fn setup_resize(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(canvas) = window
            .document()
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return;
        };

        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            if let Some(renderer) = app.borrow_mut().renderer.as_mut() {
                renderer.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let App { game, renderer } = &mut *guard;
            game.frame(time);
            if let Some(renderer) = renderer {
                game.render(renderer);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Egg Brawl (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    demo::run(DEMO_SEED, DEMO_FRAMES);
}

#[cfg(not(target_arch = "wasm32"))]
const DEMO_SEED: u64 = 0x00e6_b4a1;

/// Ten minutes of 60 Hz frames
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 36_000;

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use egg_brawl::Game;
    use egg_brawl::audio::SilentAudio;
    use egg_brawl::consts::FRAME_MS;
    use egg_brawl::persistence::MemoryBackend;
    use egg_brawl::platform::Action;
    use egg_brawl::renderer::TextRenderer;

    /// Back off when the enemy gets closer than this (px between centers)
    const BACK_OFF_GAP: f32 = 110.0;

    /// Scripted session: harass the enemy and throw everything
    pub fn run(seed: u64, frames: u32) {
        let mut game = Game::new(MemoryBackend::new(), SilentAudio::default(), seed);
        let mut renderer = TextRenderer::new();
        game.start_run(false);

        for frame in 0..frames {
            steer(&mut game, frame);
            game.frame(frame as f64 * FRAME_MS as f64);

            if game.world().run.lost {
                break;
            }
            if frame % 600 == 0 {
                game.render(&mut renderer);
                log::info!("[frame {}] {}", frame, renderer.lines.join(" | "));
            }
        }

        let world = game.world();
        log::info!(
            "Demo finished: wave {}, eggs {}, score {}",
            world.run.wave_index + 1,
            world.currency.eggs(),
            world.score()
        );
        if let Some(rank) = game.submit_score("Autopilot", 0.0) {
            log::info!("Autopilot placed #{} on the board", rank);
        }
    }

    fn steer(game: &mut Game<MemoryBackend, SilentAudio>, frame: u32) {
        let world = game.world();
        let me = world.player.fighter.body.center();
        let them = world.enemy().map(|e| e.fighter.body.center());
        let winding_up = world.enemy().is_some_and(|e| e.is_winding_up());

        // Close in facing the enemy so throws land; retreat when crowded
        let (left, right) = match them {
            Some(them) => {
                let dx = them.x - me.x;
                let toward_right = dx > 0.0;
                if dx.abs() > BACK_OFF_GAP {
                    (!toward_right, toward_right)
                } else {
                    (toward_right, !toward_right)
                }
            }
            None => (false, false),
        };

        let input = game.input_mut();
        input.set(Action::MoveLeft, left);
        input.set(Action::MoveRight, right);
        input.set(Action::Jump, winding_up || frame % 90 == 0);
        input.set(Action::AttackShort, true);
        input.set(Action::AttackArc, frame % 2 == 0);
        input.set(Action::AttackArea, true);
    }
}
