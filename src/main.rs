//! Swarm Gunner entry point
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
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use swarm_gunner::audio::AudioManager;
    use swarm_gunner::platform::{Direction, FrameClock};
    use swarm_gunner::renderer::{CanvasRenderer, FrameView, Renderer};
    use swarm_gunner::{Canvas, Game, Tuning};

    /// Browser-side instance: the game plus its I/O collaborators
    struct App {
        game: Game,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        clock: FrameClock,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta_ms(time);
            self.game.frame(dt);

            let events = self.game.drain_events();
            self.audio.play_events(&events);

            if let Some(renderer) = self.renderer.as_mut() {
                renderer.render(&FrameView::of(&self.game.state));
            }
        }
    }

    /// Pointer position relative to the canvas' top-left corner
    fn canvas_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Swarm Gunner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas from the viewport, once
        let tuning = Tuning::default();
        let viewport_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(1200.0);
        let size = Canvas::from_viewport(viewport_width, &tuning);
        canvas.set_width(size.width as u32);
        canvas.set_height(size.height as u32);
        log::info!("Canvas {}x{}", size.width, size.height);

        let renderer = CanvasRenderer::new(&canvas);
        if renderer.is_none() {
            log::error!("Canvas 2D context unavailable - rendering disabled");
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(size, tuning, seed),
            renderer,
            audio: AudioManager::new(),
            clock: FrameClock::new(),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_touch_buttons(app.clone());
        setup_lifecycle_buttons(app.clone());
        request_animation_frame(app);

        log::info!("Swarm Gunner running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        // Mouse move - aim
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_pos(&canvas_clone, event.client_x(), event.client_y());
                app.borrow_mut().game.input.set_aim(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - start firing (left button)
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let pos = canvas_pos(&canvas_clone, event.client_x(), event.client_y());
                let mut a = app.borrow_mut();
                a.game.input.set_aim(pos);
                a.game.press_fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - stop firing
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    app.borrow_mut().game.release_fire();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - aim and fire
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    let mut a = app.borrow_mut();
                    a.game.input.set_aim(pos);
                    a.game.press_fire();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move - re-aim
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    app.borrow_mut().game.input.set_aim(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - stop firing
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().game.release_fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if a.game.input.key_down(&key) {
                    return;
                }
                match key.as_str() {
                    "p" | "P" | "Escape" => a.game.toggle_pause(),
                    "r" | "R" => {
                        a.game.restart();
                    }
                    "i" | "I" => {
                        let on = !a.game.autopilot();
                        a.game.set_autopilot(on);
                    }
                    "m" | "M" => {
                        let muted = !a.audio.is_muted();
                        a.audio.set_muted(muted);
                        log::info!("Muted: {}", muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - drop held keys and the trigger so nothing sticks
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.game.input.release_all();
                a.game.release_fire();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen direction pad for touch devices (`.up`, `.down`, `.left`, `.right`)
    fn setup_touch_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let buttons = [
            (".up", Direction::Up),
            (".down", Direction::Down),
            (".left", Direction::Left),
            (".right", Direction::Right),
        ];
        for (selector, dir) in buttons {
            let Some(btn) = document.query_selector(selector).ok().flatten() else {
                continue;
            };
            for (event_name, pressed) in [("touchstart", true), ("touchend", false)] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    app.borrow_mut().game.input.set_direction(dir, pressed);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_lifecycle_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.toggle_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if !app.borrow_mut().game.restart() {
                    log::info!("Restart ignored - run still in progress");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The frame callback keeps rescheduling in every mode so wall-clock
    /// timers (difficulty ramp, fire control) keep running; the simulation
    /// itself only steps while Running.
    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app.borrow_mut().frame(time);
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use swarm_gunner::consts::SIM_DT_MS;
    use swarm_gunner::renderer::{FrameView, HeadlessRenderer, Renderer};
    use swarm_gunner::sim::Mode;
    use swarm_gunner::{Canvas, Game, Tuning};

    env_logger::init();
    log::info!("Swarm Gunner (native) starting...");
    log::info!("Headless autopilot run - build for wasm32 to play in the browser");

    // Usage: swarm-gunner [tuning.json] [seconds]
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{} - using default tuning", e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seconds: f64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .filter(|s: &f64| *s > 0.0)
        .unwrap_or(120.0);
    let seed: u64 = std::env::var("SWARM_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random);

    // Reference playfield: 1200 wide at the tuned aspect ratio
    let canvas = Canvas::new(1200.0, (1200.0 * tuning.aspect_ratio).floor() as f32);
    let mut game = Game::new(canvas, tuning, seed);
    game.set_autopilot(true);

    let mut renderer = HeadlessRenderer::new(600);
    let frames = (seconds * 1000.0 / SIM_DT_MS).ceil() as u64;
    for _ in 0..frames {
        game.frame(SIM_DT_MS);
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
        renderer.render(&FrameView::of(&game.state));
        if game.mode() == Mode::GameOver {
            break;
        }
    }

    log::info!("Run ended after {} frames", renderer.frames());

    match serde_json::to_string_pretty(&game.summary()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
