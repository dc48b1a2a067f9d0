//! Platform abstraction layer
//!
//! Host-facing glue that is independent of the browser:
//! - Frame timing (wall-clock deltas to tick seconds)
//! - Input aggregation (key/mouse events to per-tick input)
//!
//! The browser bridge itself lives in `web` (WASM only).

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::consts::{FALLBACK_FRAME_MS, MAX_FRAME_GAP_MS};
use crate::sim::TickInput;

/// Converts host timestamps (ms) into tick deltas (seconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame. The first frame after creation or a
    /// reset yields zero; gaps over `MAX_FRAME_GAP_MS` count as one normal frame.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0.0;
        };
        let mut gap = now_ms - last;
        if gap > MAX_FRAME_GAP_MS {
            gap = FALLBACK_FRAME_MS;
        }
        (gap.max(0.0) / 1000.0) as f32
    }

    /// Forget the time reference (after a pause or a hidden tab)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Accumulates raw input events between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    restart: bool,
    mouse_held: bool,
    /// Edge-triggered; cleared by `take_tick_input`
    fire_pressed: bool,
    click: Option<Vec2>,
    pause: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are matched case-insensitively. Auto-repeat never re-toggles pause.
    pub fn key_down(&mut self, key: &str, repeat: bool) {
        match key.to_ascii_lowercase().as_str() {
            "a" | "arrowleft" => self.left = true,
            "d" | "arrowright" => self.right = true,
            "r" => self.restart = true,
            "p" | "escape" if !repeat => self.pause = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        match key.to_ascii_lowercase().as_str() {
            "a" | "arrowleft" => self.left = false,
            "d" | "arrowright" => self.right = false,
            "r" => self.restart = false,
            _ => {}
        }
    }

    /// Button press at playfield coordinates: a click and a trigger pull
    pub fn mouse_down(&mut self, pos: Vec2) {
        self.mouse_held = true;
        self.fire_pressed = true;
        self.click = Some(pos);
    }

    pub fn mouse_up(&mut self) {
        self.mouse_held = false;
    }

    /// Drop held state, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.restart = false;
        self.mouse_held = false;
    }

    /// Snapshot for the next tick; one-shot events are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            move_left: self.left,
            move_right: self.right,
            fire_pressed: std::mem::take(&mut self.fire_pressed),
            fire_held: self.mouse_held,
            click: self.click.take(),
            pause: std::mem::take(&mut self.pause),
            restart: self.restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_delta_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert!((clock.delta(1016.0) - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_large_gap_clamped() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        assert!((clock.delta(5000.0) - 0.016).abs() < 1e-6);
        // Exactly at the limit is kept
        assert!((clock.delta(5100.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_reset_drops_reference() {
        let mut clock = FrameClock::new();
        clock.delta(0.0);
        clock.reset();
        assert_eq!(clock.delta(90.0), 0.0);
        assert!((clock.delta(100.0) - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = FrameClock::new();
        clock.delta(100.0);
        assert_eq!(clock.delta(50.0), 0.0);
    }

    #[test]
    fn test_click_consumed_once() {
        let mut input = InputState::new();
        input.mouse_down(Vec2::new(12.0, 34.0));

        let first = input.take_tick_input();
        assert_eq!(first.click, Some(Vec2::new(12.0, 34.0)));
        assert!(first.fire_pressed);
        assert!(first.fire_held);

        let second = input.take_tick_input();
        assert_eq!(second.click, None);
        assert!(!second.fire_pressed);
        assert!(second.fire_held);

        input.mouse_up();
        assert!(!input.take_tick_input().fire_held);
    }

    #[test]
    fn test_keys_held_until_release() {
        let mut input = InputState::new();
        input.key_down("A", false);
        assert!(input.take_tick_input().move_left);
        assert!(input.take_tick_input().move_left);
        input.key_up("a");
        assert!(!input.take_tick_input().move_left);

        input.key_down("ArrowRight", false);
        input.release_all();
        assert!(!input.take_tick_input().move_right);
    }

    #[test]
    fn test_pause_is_an_edge() {
        let mut input = InputState::new();
        input.key_down("p", false);
        input.key_down("p", true);
        assert!(input.take_tick_input().pause);
        assert!(!input.take_tick_input().pause);

        input.key_down("P", true);
        assert!(!input.take_tick_input().pause);
    }
}
