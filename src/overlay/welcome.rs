//! Welcome screen shown before the walkthrough starts

use glam::Vec2;
use winit::event::MouseButton;

use crate::input::{Action, Bindings, Input};
use crate::overlay::rect::{Anchor, Rect};
use crate::renderer::{TextOverlay, UiRect};

const TITLE: &str = "Welcome to My Portfolio!";
const BUTTON_LABEL: &str = "Enter";

const TITLE_SIZE: f32 = 40.0;
const BUTTON_LABEL_SIZE: f32 = 22.0;

/// Full-screen welcome panel with an Enter button
///
/// Shown once at startup over a dimmed backdrop. Dismissing it (button
/// click or the confirm action) is the moment the pointer should be
/// captured; it never comes back for the rest of the session.
#[derive(Debug)]
pub struct WelcomeScreen {
    visible: bool,
    button: Rect,
}

impl WelcomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: true,
            button: Rect::new(0.0, 30.0, 160.0, 52.0).with_anchor(Anchor::Center),
        }
    }

    /// Whether the screen is still up
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Process input. Returns true on the frame the screen is dismissed.
    pub fn update(&mut self, input: &Input, bindings: &Bindings, screen: Vec2) -> bool {
        if !self.visible {
            return false;
        }

        let confirmed = bindings.is_action_just_pressed(input, Action::Confirm);
        let clicked = input.is_mouse_button_just_pressed(MouseButton::Left)
            && self.button.contains(input.cursor_position(), screen);

        if confirmed || clicked {
            self.visible = false;
            log::info!("Welcome screen dismissed");
            return true;
        }
        false
    }

    /// Push the dim backdrop, button, and text for this frame
    pub fn draw(&self, rects: &mut Vec<UiRect>, text: &mut TextOverlay, screen: (u32, u32)) {
        if !self.visible {
            return;
        }
        let parent = Vec2::new(screen.0 as f32, screen.1 as f32);

        rects.push(UiRect {
            position: [0.0, 0.0],
            size: [parent.x, parent.y],
            color: [0.0, 0.0, 0.0, 0.8],
        });

        let title_width = text.measure(TITLE, TITLE_SIZE);
        text.push_text(
            TITLE,
            (parent.x - title_width) * 0.5,
            parent.y * 0.5 - 110.0,
            TITLE_SIZE,
            [1.0, 1.0, 1.0, 1.0],
            screen,
        );

        let button_pos = self.button.absolute_position(parent);
        rects.push(UiRect {
            position: [button_pos.x, button_pos.y],
            size: [self.button.size.x, self.button.size.y],
            color: [0.94, 0.94, 0.94, 1.0],
        });

        let label_width = text.measure(BUTTON_LABEL, BUTTON_LABEL_SIZE);
        let label_height = text.line_height(BUTTON_LABEL_SIZE);
        text.push_text(
            BUTTON_LABEL,
            button_pos.x + (self.button.size.x - label_width) * 0.5,
            button_pos.y + (self.button.size.y - label_height) * 0.5,
            BUTTON_LABEL_SIZE,
            [0.1, 0.1, 0.1, 1.0],
            screen,
        );
    }
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_dismiss_with_enter() {
        let mut screen = WelcomeScreen::new();
        let mut input = Input::new();
        let bindings = Bindings::with_defaults();
        assert!(screen.visible());

        input.process_keyboard(KeyCode::Enter, ElementState::Pressed);
        assert!(screen.update(&input, &bindings, SCREEN));
        assert!(!screen.visible());
    }

    #[test]
    fn test_dismiss_with_button_click() {
        let mut screen = WelcomeScreen::new();
        let mut input = Input::new();
        let bindings = Bindings::with_defaults();

        // Button is centered, 30px below middle
        input.process_cursor_moved(Vec2::new(400.0, 330.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(screen.update(&input, &bindings, SCREEN));
        assert!(!screen.visible());
    }

    #[test]
    fn test_click_outside_button_ignored() {
        let mut screen = WelcomeScreen::new();
        let mut input = Input::new();
        let bindings = Bindings::with_defaults();

        input.process_cursor_moved(Vec2::new(10.0, 10.0));
        input.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert!(!screen.update(&input, &bindings, SCREEN));
        assert!(screen.visible());
    }

    #[test]
    fn test_never_reshown_after_dismissal() {
        let mut screen = WelcomeScreen::new();
        let mut input = Input::new();
        let bindings = Bindings::with_defaults();

        input.process_keyboard(KeyCode::Enter, ElementState::Pressed);
        assert!(screen.update(&input, &bindings, SCREEN));

        // A later confirm press reports no dismissal
        input.update();
        input.process_keyboard(KeyCode::Enter, ElementState::Pressed);
        assert!(!screen.update(&input, &bindings, SCREEN));
        assert!(!screen.visible());
    }
}
