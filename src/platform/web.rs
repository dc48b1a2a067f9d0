//! Browser bridge
//!
//! JavaScript owns the canvas and the event listeners; it forwards raw
//! events here and calls `frame` from `requestAnimationFrame`, then draws the
//! returned vertices and labels.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use super::{FrameClock, InputState};
use crate::persistence::{LocalStorageGoldStore, Wallet};
use crate::renderer::{self, Vertex};
use crate::sim::{GamePhase, GameState, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {e}").into());
    }
    log::info!("Star Rogue starting...");
}

/// Game instance driven by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FrameClock,
    input: InputState,
    vertices: Vec<Vertex>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> WebGame {
        let seed = js_sys::Date::now() as u64;
        let wallet = Wallet::open(Box::new(LocalStorageGoldStore));
        let state = GameState::new(seed, width, height, Tuning::load(), wallet);
        log::info!("Game initialized with seed: {seed}");

        let vertices = renderer::build_frame(&state);
        Self {
            state,
            clock: FrameClock::new(),
            input: InputState::new(),
            vertices,
        }
    }

    /// Advance one animation frame (`now_ms` from `requestAnimationFrame`)
    pub fn frame(&mut self, now_ms: f64) {
        let input = self.input.take_tick_input();
        let dt = self.clock.delta(now_ms);
        tick(&mut self.state, &input, dt);

        // Resume must not see the paused interval as one huge frame
        if self.state.phase == GamePhase::Paused {
            self.clock.reset();
        }

        for event in self.state.drain_events() {
            log::debug!("{event:?}");
        }
        self.vertices = renderer::build_frame(&self.state);
    }

    pub fn key_down(&mut self, key: &str, repeat: bool) {
        self.input.key_down(key, repeat);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    /// Canvas-relative coordinates
    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.input.mouse_down(Vec2::new(x, y));
    }

    pub fn mouse_up(&mut self) {
        self.input.mouse_up();
    }

    /// Window lost focus: drop held keys and pause a running game
    pub fn blur(&mut self) {
        self.input.release_all();
        if self.state.phase == GamePhase::Running {
            self.state.toggle_pause();
            log::info!("Auto-paused (window blur)");
        }
        self.clock.reset();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Flattened `[x, y, r, g, b, a, ...]` triangle list
    pub fn vertices(&self) -> Vec<f32> {
        renderer::as_floats(&self.vertices).to_vec()
    }

    /// Text overlays as a JSON array
    pub fn labels(&self) -> String {
        let labels = renderer::build_labels(&self.state);
        serde_json::to_string(&labels).unwrap_or_else(|e| {
            log::warn!("Could not encode labels: {e}");
            "[]".to_string()
        })
    }

    pub fn gold(&self) -> f64 {
        self.state.gold() as f64
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }
}
