//! Beat Mines entry point
//!
//! Handles platform-specific initialization and runs the game loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use beat_mines::{ConfigError, GameConfig};
    use beat_mines::audio::AudioManager;
    use beat_mines::command_for_key;
    use beat_mines::music::NoteTable;
    use beat_mines::render::{CanvasRenderer, HudCounters, canvas::update_hud};
    use beat_mines::sim::{GameEvent, GameState, Sequencer, SoundEvent};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sequencer: Sequencer,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, now_ms: f64) -> Result<Self, ConfigError> {
            let mut audio = AudioManager::new(NoteTable::new(config.note_table));
            audio.set_muted(config.muted);
            Ok(Self {
                sequencer: Sequencer::new(config.tempo, now_ms),
                state: GameState::new(config, seed)?,
                renderer: None,
                audio,
            })
        }

        fn play(&self, sounds: impl IntoIterator<Item = SoundEvent>) {
            let tempo = self.sequencer.tempo();
            for sound in sounds {
                self.audio.play(sound, tempo);
            }
        }

        /// Apply a key press; returns true if the key was a game command
        fn handle_key(&mut self, key: &str) -> bool {
            let command = match command_for_key(key) {
                Ok(command) => command,
                Err(e) => {
                    log::debug!("Ignored input: {}", e);
                    return false;
                }
            };

            self.audio.resume();
            let events = self.state.apply_command(0, command);
            self.play(events.into_iter().filter_map(|e| match e {
                GameEvent::Sound(sound) => Some(sound),
                _ => None,
            }));
            true
        }

        /// Sequencer loop body
        fn tick_sequencer(&mut self, time: f64) {
            if let Some(report) = self.sequencer.step(time, &mut self.state) {
                self.play(report.sounds);
            }
        }

        /// Render loop body
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state);
            }
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                update_hud(&document, HudCounters::from_state(&self.state));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Beat Mines starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let config = GameConfig::load();
        let seed = js_sys::Date::now() as u64;
        let now = window.performance().map(|p| p.now()).unwrap_or(0.0);
        let game = match Game::new(config, seed, now) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Invalid config: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        let canvas = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        match canvas.and_then(CanvasRenderer::new) {
            Some(renderer) => {
                let width = window.inner_width().ok().and_then(|w| w.as_f64());
                let height = window.inner_height().ok().and_then(|h| h.as_f64());
                if let (Some(w), Some(h)) = (width, height) {
                    renderer.resize(w as u32, h as u32);
                }
                game.borrow_mut().renderer = Some(renderer);
            }
            None => log::error!("No 2D canvas found - rendering disabled"),
        }

        setup_input_handlers(game.clone());

        // Two independent loops sharing the game through Rc<RefCell<_>>
        request_render_frame(game.clone());
        request_sequencer_frame(game);

        log::info!("Beat Mines running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().handle_key(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - show all mines while held
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.show_mines = true;
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - hide them again
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.show_mines = false;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_render_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game.borrow().render();
            request_render_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_sequencer_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().tick_sequencer(time);
            request_sequencer_frame(game);
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
    env_logger::init();
    log::info!("Beat Mines (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for web version");

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => beat_mines::GameConfig::default(),
    };

    headless_session(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<beat_mines::GameConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(beat_mines::GameConfig::from_json(&json)?)
}

/// Simulate a few laps at 60 fps with a player that steps right on every beat
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(config: beat_mines::GameConfig) {
    use beat_mines::sim::{Command, GameEvent, GameState, Sequencer};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const LAPS: usize = 3;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Game initialized with seed: {}", seed);

    let beats = config.beats;
    let mut sequencer = Sequencer::new(config.tempo, 0.0);
    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };

    let mut now = 0.0;
    let mut played = 0;
    while played < beats * LAPS {
        now += FRAME_MS;
        let Some(report) = sequencer.step(now, &mut state) else {
            continue;
        };
        played += 1;
        log::debug!("Beat {}: {:?}", report.beat, report.sounds);

        for event in state.apply_command(0, Command::Right) {
            if let GameEvent::LapCompleted { level, .. } = event {
                println!("Lap completed at {:.0} ms, level {}", now, level);
            }
        }
    }

    println!(
        "Level {}, sweeps since last lap {}, mines {}",
        state.level_count,
        state.sweep_count,
        state.mine_count()
    );
    match serde_json::to_string(&state.mines) {
        Ok(json) => println!("Mines: {}", json),
        Err(e) => log::error!("Failed to serialize mines: {}", e),
    }
}
