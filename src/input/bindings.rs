//! Key Bindings for Walkthrough Actions
//!
//! This module decouples physical keys from logical actions. Movement code
//! asks "is `Action::MoveForward` down?" and never mentions `KeyW`.
//!
//! # Example
//!
//! ```ignore
//! let mut bindings = Bindings::with_defaults();
//!
//! // Rebind a key
//! bindings.bind(KeyCode::ArrowUp, Action::MoveForward);
//!
//! // Query actions based on pressed keys
//! if bindings.is_action_pressed(&input, Action::Run) {
//!     // ...
//! }
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use winit::keyboard::KeyCode;

use crate::input::Input;

// ============================================================================
// Actions
// ============================================================================

/// Logical actions available in the walkthrough.
///
/// These represent what the visitor wants to do, independent of which key
/// triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // -------------------------------------------------------------------------
    // Movement
    // -------------------------------------------------------------------------
    /// Move forward
    MoveForward,
    /// Move backward
    MoveBackward,
    /// Strafe left
    MoveLeft,
    /// Strafe right
    MoveRight,
    /// Hold to run instead of walk
    Run,

    // -------------------------------------------------------------------------
    // UI
    // -------------------------------------------------------------------------
    /// Show/hide the controls overlay
    ToggleOverlay,
    /// Dismiss the welcome screen
    Confirm,
    /// Release the pointer and pause mouse-look
    ReleasePointer,
}

// ============================================================================
// Bindings
// ============================================================================

/// Maps physical keys to logical actions.
///
/// Several keys may share one action (both Shift keys map to `Run`).
#[derive(Debug, Clone)]
pub struct Bindings {
    /// Key to action bindings
    key_bindings: FxHashMap<KeyCode, Action>,
    /// Reverse lookup: action to keys (rarely more than two per action)
    action_keys: FxHashMap<Action, SmallVec<[KeyCode; 2]>>,
}

impl Bindings {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_bindings: FxHashMap::default(),
            action_keys: FxHashMap::default(),
        }
    }

    /// Create the default WASD bindings.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut bindings = Self::new();

        // Movement (WASD)
        bindings.bind(KeyCode::KeyW, Action::MoveForward);
        bindings.bind(KeyCode::KeyS, Action::MoveBackward);
        bindings.bind(KeyCode::KeyA, Action::MoveLeft);
        bindings.bind(KeyCode::KeyD, Action::MoveRight);

        // Either Shift runs
        bindings.bind(KeyCode::ShiftLeft, Action::Run);
        bindings.bind(KeyCode::ShiftRight, Action::Run);

        // UI
        bindings.bind(KeyCode::KeyM, Action::ToggleOverlay);
        bindings.bind(KeyCode::Enter, Action::Confirm);
        bindings.bind(KeyCode::NumpadEnter, Action::Confirm);
        bindings.bind(KeyCode::Escape, Action::ReleasePointer);

        bindings
    }

    /// Bind a key to an action.
    ///
    /// If the key was previously bound, the old binding is replaced.
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        // Remove old binding for this key
        if let Some(old_action) = self.key_bindings.get(&key)
            && let Some(keys) = self.action_keys.get_mut(old_action)
        {
            keys.retain(|k| *k != key);
        }

        self.key_bindings.insert(key, action);
        self.action_keys.entry(action).or_default().push(key);
    }

    /// Unbind a key.
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.key_bindings.remove(&key)
            && let Some(keys) = self.action_keys.get_mut(&action)
        {
            keys.retain(|k| *k != key);
        }
    }

    /// Get the action for a key.
    #[must_use]
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.key_bindings.get(&key).copied()
    }

    /// Get all keys bound to an action.
    #[must_use]
    pub fn keys_for(&self, action: Action) -> &[KeyCode] {
        self.action_keys
            .get(&action)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether any key bound to the action is currently held.
    #[must_use]
    pub fn is_action_pressed(&self, input: &Input, action: Action) -> bool {
        self.keys_for(action)
            .iter()
            .any(|key| input.is_key_pressed(*key))
    }

    /// Check whether any key bound to the action was pressed this frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, input: &Input, action: Action) -> bool {
        self.keys_for(action)
            .iter()
            .any(|key| input.is_key_just_pressed(*key))
    }
}

impl Default for Bindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    #[test]
    fn test_default_bindings() {
        let bindings = Bindings::with_defaults();

        assert_eq!(bindings.action_for(KeyCode::KeyW), Some(Action::MoveForward));
        assert_eq!(bindings.action_for(KeyCode::KeyM), Some(Action::ToggleOverlay));
        assert_eq!(
            bindings.action_for(KeyCode::Escape),
            Some(Action::ReleasePointer)
        );
    }

    #[test]
    fn test_both_shifts_run() {
        let bindings = Bindings::with_defaults();

        let keys = bindings.keys_for(Action::Run);
        assert!(keys.contains(&KeyCode::ShiftLeft));
        assert!(keys.contains(&KeyCode::ShiftRight));
    }

    #[test]
    fn test_rebind_replaces_old_binding() {
        let mut bindings = Bindings::with_defaults();

        bindings.bind(KeyCode::KeyW, Action::Run);
        assert_eq!(bindings.action_for(KeyCode::KeyW), Some(Action::Run));
        assert!(!bindings.keys_for(Action::MoveForward).contains(&KeyCode::KeyW));
    }

    #[test]
    fn test_unbind() {
        let mut bindings = Bindings::with_defaults();

        bindings.unbind(KeyCode::KeyM);
        assert!(bindings.action_for(KeyCode::KeyM).is_none());
        assert!(bindings.keys_for(Action::ToggleOverlay).is_empty());
    }

    #[test]
    fn test_action_pressed_via_any_key() {
        let bindings = Bindings::with_defaults();
        let mut input = Input::new();

        assert!(!bindings.is_action_pressed(&input, Action::Run));
        input.process_keyboard(KeyCode::ShiftRight, ElementState::Pressed);
        assert!(bindings.is_action_pressed(&input, Action::Run));
    }
}
