//! In-world controls legend
//!
//! Two help panels and an optional key-diagram image, visible by default
//! and toggled with the overlay action. The instruction lines are built
//! from the live bindings so rebinding keys updates the text.

use crate::input::{Action, Bindings};
use crate::renderer::{TextOverlay, UiRect};
use winit::keyboard::KeyCode;

const WELCOME_LINE: &str = "Welcome to my portfolio!";

const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const TEXT_SIZE: f32 = 17.0;
const PADDING: f32 = 10.0;

/// Controls legend visibility state and draw-list building
#[derive(Debug)]
pub struct ControlsLegend {
    visible: bool,
}

impl ControlsLegend {
    #[must_use]
    pub fn new() -> Self {
        Self { visible: true }
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Flip visibility, returning the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Movement instruction, e.g. "Use WASD to move around..."
    #[must_use]
    pub fn movement_line(bindings: &Bindings) -> String {
        let cluster: String = [
            Action::MoveForward,
            Action::MoveLeft,
            Action::MoveBackward,
            Action::MoveRight,
        ]
        .iter()
        .filter_map(|action| bindings.keys_for(*action).first())
        .map(|key| key_label(*key))
        .collect();
        format!("Use {cluster} to move around and the mouse to look around.")
    }

    /// Pointer release instruction
    #[must_use]
    pub fn release_line(bindings: &Bindings) -> String {
        let key = bindings
            .keys_for(Action::ReleasePointer)
            .first()
            .map(|key| key_label(*key).to_lowercase())
            .unwrap_or_else(|| "escape".to_string());
        format!("Press {key} to leave the 3D environment.")
    }

    /// Overlay toggle instruction
    #[must_use]
    pub fn toggle_line(bindings: &Bindings) -> String {
        let key = bindings
            .keys_for(Action::ToggleOverlay)
            .first()
            .map(|key| key_label(*key))
            .unwrap_or("M");
        format!("Press '{key}' to show/hide the overlay.")
    }

    /// Pixel rectangle for the legend image: fits a quarter of the
    /// screen, anchored near the top-left, never upscaled
    #[must_use]
    pub fn image_rect(image_size: (u32, u32), screen: (u32, u32)) -> (f32, f32, f32, f32) {
        let (w, h) = (screen.0 as f32, screen.1 as f32);
        let (iw, ih) = (image_size.0 as f32, image_size.1 as f32);
        let scale = (w * 0.25 / iw).min(h * 0.25 / ih).min(1.0);
        (w * 0.10, h * 0.10, iw * scale, ih * scale)
    }

    /// Push the legend panels and text for this frame
    pub fn draw(
        &self,
        bindings: &Bindings,
        rects: &mut Vec<UiRect>,
        text: &mut TextOverlay,
        screen: (u32, u32),
    ) {
        if !self.visible {
            return;
        }
        let w = screen.0 as f32;

        let left_lines = [
            Self::movement_line(bindings),
            Self::release_line(bindings),
        ];
        draw_panel(&left_lines, w * 0.08, 16.0, rects, text, screen);

        let center_lines = [WELCOME_LINE.to_string(), Self::toggle_line(bindings)];
        let width = panel_width(&center_lines, text);
        draw_panel(&center_lines, (w - width) * 0.5, 40.0, rects, text, screen);
    }
}

impl Default for ControlsLegend {
    fn default() -> Self {
        Self::new()
    }
}

fn panel_width(lines: &[String], text: &TextOverlay) -> f32 {
    lines
        .iter()
        .map(|line| text.measure(line, TEXT_SIZE))
        .fold(0.0, f32::max)
        + PADDING * 2.0
}

fn draw_panel(
    lines: &[String],
    x: f32,
    y: f32,
    rects: &mut Vec<UiRect>,
    text: &mut TextOverlay,
    screen: (u32, u32),
) {
    let line_height = text.line_height(TEXT_SIZE);
    let width = panel_width(lines, text);
    let height = line_height * lines.len() as f32 + PADDING * 2.0;

    rects.push(UiRect {
        position: [x, y],
        size: [width, height],
        color: PANEL_COLOR,
    });

    for (i, line) in lines.iter().enumerate() {
        let line_width = text.measure(line, TEXT_SIZE);
        text.push_text(
            line,
            x + (width - line_width) * 0.5,
            y + PADDING + line_height * i as f32,
            TEXT_SIZE,
            TEXT_COLOR,
            screen,
        );
    }
}

/// Display name for a bindable key
fn key_label(key: KeyCode) -> &'static str {
    match key {
        KeyCode::KeyA => "A",
        KeyCode::KeyD => "D",
        KeyCode::KeyM => "M",
        KeyCode::KeyS => "S",
        KeyCode::KeyW => "W",
        KeyCode::Enter | KeyCode::NumpadEnter => "Enter",
        KeyCode::Escape => "Escape",
        KeyCode::ShiftLeft | KeyCode::ShiftRight => "Shift",
        KeyCode::Space => "Space",
        KeyCode::ArrowUp => "Up",
        KeyCode::ArrowDown => "Down",
        KeyCode::ArrowLeft => "Left",
        KeyCode::ArrowRight => "Right",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_by_default_and_toggles() {
        let mut legend = ControlsLegend::new();
        assert!(legend.visible());

        assert!(!legend.toggle());
        assert!(!legend.visible());
        assert!(legend.toggle());
        assert!(legend.visible());
    }

    #[test]
    fn test_default_instruction_lines() {
        let bindings = Bindings::with_defaults();

        assert_eq!(
            ControlsLegend::movement_line(&bindings),
            "Use WASD to move around and the mouse to look around."
        );
        assert_eq!(
            ControlsLegend::release_line(&bindings),
            "Press escape to leave the 3D environment."
        );
        assert_eq!(
            ControlsLegend::toggle_line(&bindings),
            "Press 'M' to show/hide the overlay."
        );
    }

    #[test]
    fn test_lines_follow_rebinding() {
        let mut bindings = Bindings::with_defaults();
        bindings.unbind(KeyCode::KeyW);
        bindings.bind(KeyCode::ArrowUp, Action::MoveForward);
        assert_eq!(
            ControlsLegend::movement_line(&bindings),
            "Use UpASD to move around and the mouse to look around."
        );

        // Extra keys for an action do not displace the first one
        bindings.bind(KeyCode::Space, Action::ToggleOverlay);
        assert_eq!(
            ControlsLegend::toggle_line(&bindings),
            "Press 'M' to show/hide the overlay."
        );
    }

    #[test]
    fn test_image_rect_fits_quarter_screen() {
        // A 2000x1000 image on an 800x600 screen caps at 25% width
        let (x, y, w, h) = ControlsLegend::image_rect((2000, 1000), (800, 600));
        assert_eq!(x, 80.0);
        assert_eq!(y, 60.0);
        assert!(w <= 200.0 + 0.01);
        assert!(h <= 150.0 + 0.01);
        // Aspect preserved
        assert!((w / h - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_image_rect_never_upscales() {
        let (_, _, w, h) = ControlsLegend::image_rect((50, 40), (1920, 1080));
        assert_eq!(w, 50.0);
        assert_eq!(h, 40.0);
    }
}
