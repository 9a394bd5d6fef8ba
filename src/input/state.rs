//! Raw input bookkeeping
//!
//! Tracks keyboard and mouse state. Mouse-look reads the raw device
//! delta, which only accumulates while the pointer is captured; the
//! cursor position is kept separately for overlay hit-testing.

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Input state manager
#[derive(Debug)]
pub struct Input {
    /// Currently pressed keys
    pressed_keys: HashSet<KeyCode>,
    /// Keys that were just pressed this frame
    just_pressed_keys: HashSet<KeyCode>,
    /// Keys that were just released this frame
    just_released_keys: HashSet<KeyCode>,
    /// Currently pressed mouse buttons
    pressed_mouse_buttons: HashSet<MouseButton>,
    /// Mouse buttons just pressed this frame
    just_pressed_mouse_buttons: HashSet<MouseButton>,
    /// Cursor position in window pixels
    cursor_position: Vec2,
    /// Raw look delta accumulated this frame
    look_delta: Vec2,
}

impl Input {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            just_pressed_keys: HashSet::new(),
            just_released_keys: HashSet::new(),
            pressed_mouse_buttons: HashSet::new(),
            just_pressed_mouse_buttons: HashSet::new(),
            cursor_position: Vec2::ZERO,
            look_delta: Vec2::ZERO,
        }
    }

    /// Call after each frame to clear per-frame state
    pub fn update(&mut self) {
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
        self.just_pressed_mouse_buttons.clear();
        self.look_delta = Vec2::ZERO;
    }

    /// Process a keyboard event
    pub fn process_keyboard(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.pressed_keys.contains(&key_code) {
                    self.just_pressed_keys.insert(key_code);
                }
                self.pressed_keys.insert(key_code);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                self.just_released_keys.insert(key_code);
            }
        }
    }

    /// Process a mouse button event
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.pressed_mouse_buttons.contains(&button) {
                    self.just_pressed_mouse_buttons.insert(button);
                }
                self.pressed_mouse_buttons.insert(button);
            }
            ElementState::Released => {
                self.pressed_mouse_buttons.remove(&button);
            }
        }
    }

    /// Process a cursor move in window coordinates
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.cursor_position = position;
    }

    /// Process a raw mouse delta from a device event
    pub fn process_look_delta(&mut self, delta: Vec2) {
        self.look_delta += delta;
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a key was just released this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.just_released_keys.contains(&key)
    }

    /// Check if a mouse button is currently pressed
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_mouse_buttons.contains(&button)
    }

    /// Check if a mouse button was just pressed this frame
    pub fn is_mouse_button_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed_mouse_buttons.contains(&button)
    }

    /// Cursor position in window pixels
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Raw look delta accumulated this frame
    pub fn look_delta(&self) -> Vec2 {
        self.look_delta
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_only_fires_once() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(input.is_key_just_pressed(KeyCode::KeyW));
        assert!(input.is_key_pressed(KeyCode::KeyW));

        input.update();
        // Key repeat delivers Pressed again while already held
        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));
        assert!(input.is_key_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_release_clears_pressed() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        input.process_keyboard(KeyCode::ShiftLeft, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::ShiftLeft));
        assert!(input.is_key_just_released(KeyCode::ShiftLeft));
    }

    #[test]
    fn test_look_delta_accumulates_and_clears() {
        let mut input = Input::new();

        input.process_look_delta(Vec2::new(3.0, -1.0));
        input.process_look_delta(Vec2::new(1.0, 1.0));
        assert_eq!(input.look_delta(), Vec2::new(4.0, 0.0));

        input.update();
        assert_eq!(input.look_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_cursor_moves_do_not_feed_look_delta() {
        let mut input = Input::new();

        input.process_cursor_moved(Vec2::new(100.0, 200.0));
        assert_eq!(input.cursor_position(), Vec2::new(100.0, 200.0));
        assert_eq!(input.look_delta(), Vec2::ZERO);
    }
}
