//! Dino Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    use dino_run::persistence::LocalStorageStore;
    use dino_run::platform::web::{AnimationFrameScheduler, DomPresenter, EventListenerGuard};
    use dino_run::{GameConfig, GameController, InputEvent};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    type WebController = GameController<LocalStorageStore, AnimationFrameScheduler, Pcg32>;

    /// Game instance: controller plus the DOM it draws into
    struct WebGame {
        controller: WebController,
        presenter: DomPresenter,
    }

    impl WebGame {
        /// requestAnimationFrame callback
        fn frame(&mut self) {
            self.controller.on_frame();
            self.present();
        }

        fn restart(&mut self) {
            self.controller.restart();
            self.present();
        }

        fn present(&mut self) {
            self.presenter
                .present(self.controller.state(), self.controller.config());
        }
    }

    /// Everything registered with the browser. Dropping it unhooks all of it.
    struct App {
        _listeners: Vec<EventListenerGuard>,
        _game: Rc<RefCell<WebGame>>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dino Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let store = LocalStorageStore::new();
        let config = GameConfig::load(&store);
        let seed = js_sys::Date::now() as u64;

        let game = Rc::new_cyclic(|weak: &Weak<RefCell<WebGame>>| {
            let weak = weak.clone();
            let scheduler = AnimationFrameScheduler::new(window.clone(), move |_time: f64| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().frame();
                }
            });
            let controller = GameController::new(config, store, scheduler, Pcg32::seed_from_u64(seed))
                .expect("loaded config is validated");
            RefCell::new(WebGame {
                controller,
                presenter: DomPresenter::new(document.clone()),
            })
        });

        log::info!("Game initialized with seed: {}", seed);
        game.borrow_mut().present();

        let listeners = setup_input_handlers(&window, &document, &game);
        log::info!("Registered {} listeners", listeners.len());

        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                _listeners: listeners,
                _game: game,
            });
        });

        log::info!("Dino Run ready!");
    }

    /// Unhook every listener and cancel the pending frame
    pub fn teardown() {
        let app = APP.with(|app| app.borrow_mut().take());
        if app.is_some() {
            drop(app);
            log::info!("Dino Run torn down");
        }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: &Rc<RefCell<WebGame>>,
    ) -> Vec<EventListenerGuard> {
        let mut listeners = Vec::new();

        // Keyboard: jump key anywhere on the page
        {
            let game = Rc::downgrade(game);
            let guard = EventListenerGuard::attach(window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(game) = game.upgrade() else {
                    return;
                };
                let input = InputEvent::KeyDown { code: event.code() };
                if game.borrow_mut().controller.handle_input(&input) {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
            });
            match guard {
                Ok(guard) => listeners.push(guard),
                Err(e) => log::error!("Failed to register keydown: {:?}", e),
            }
        }

        // Pointer (mouse/touch/pen) on the playfield
        if let Some(playfield) = document.get_element_by_id("playfield") {
            let game = Rc::downgrade(game);
            let guard = EventListenerGuard::attach(&playfield, "pointerdown", move |_event| {
                if let Some(game) = game.upgrade() {
                    game.borrow_mut()
                        .controller
                        .handle_input(&InputEvent::PointerDown);
                }
            });
            match guard {
                Ok(guard) => listeners.push(guard),
                Err(e) => log::error!("Failed to register pointerdown: {:?}", e),
            }
        }

        // Start / restart button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = Rc::downgrade(game);
            let guard = EventListenerGuard::attach(&btn, "click", move |event| {
                // Don't let the click reach the playfield as a jump
                event.stop_propagation();
                if let Some(game) = game.upgrade() {
                    game.borrow_mut().restart();
                }
            });
            match guard {
                Ok(guard) => listeners.push(guard),
                Err(e) => log::error!("Failed to register start button: {:?}", e),
            }
        }

        listeners
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Release the game's browser resources (call on page hide/unmount)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_game::teardown();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use dino_run::persistence::MemoryStore;
    use dino_run::platform::ManualScheduler;
    use dino_run::sim::{GamePhase, autopilot};
    use dino_run::{GameConfig, GameController, InputEvent};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Frames per demo run before giving up on a crash
    const MAX_FRAMES: u64 = 20_000;
    const DEMO_RUNS: u32 = 3;

    env_logger::init();
    log::info!("Dino Run (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::from_path(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed.parse::<u64>().context("seed must be an unsigned integer")?,
        None => 12345,
    };

    let mut game = GameController::new(
        config,
        MemoryStore::new(),
        ManualScheduler::new(),
        Pcg32::seed_from_u64(seed),
    )?;
    let jump = InputEvent::KeyDown {
        code: game.config().jump_code.clone(),
    };

    for run in 1..=DEMO_RUNS {
        game.start();
        let mut frames = 0;
        while frames < MAX_FRAMES && game.is_tick_pending() {
            if autopilot::should_jump(game.state(), game.config()) {
                game.handle_input(&jump);
            }
            game.pump_frame();
            frames += 1;
        }

        if game.phase() == GamePhase::Playing {
            game.stop();
            println!(
                "Run {}: still alive after {} frames (score {}), stopping demo",
                run,
                frames,
                game.display_score()
            );
            break;
        }
        println!(
            "Run {}: score {} (speed {:.1}), high score {}",
            run,
            game.display_score(),
            game.state().speed,
            game.display_high_score()
        );
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
