//! Debug readouts: camera position strip and axis tip labels

use glam::{Vec2, Vec3};

use crate::renderer::{Camera, TextOverlay, UiRect, axis_tip_positions};

const PANEL_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.5];
const TEXT_SIZE: f32 = 16.0;
const PADDING_X: f32 = 10.0;
const PADDING_Y: f32 = 6.0;

/// Camera position readout drawn top-center
pub struct CameraReadout;

impl CameraReadout {
    /// Readout line with two decimals per component
    #[must_use]
    pub fn format_position(position: Vec3) -> String {
        format!(
            "x: {:.2}, y: {:.2}, z: {:.2}",
            position.x, position.y, position.z
        )
    }

    /// Push the readout panel and text for this frame
    pub fn draw(
        position: Vec3,
        rects: &mut Vec<UiRect>,
        text: &mut TextOverlay,
        screen: (u32, u32),
    ) {
        let line = Self::format_position(position);
        let width = text.measure(&line, TEXT_SIZE) + PADDING_X * 2.0;
        let height = text.line_height(TEXT_SIZE) + PADDING_Y * 2.0;
        let x = (screen.0 as f32 - width) * 0.5;

        rects.push(UiRect {
            position: [x, 6.0],
            size: [width, height],
            color: PANEL_COLOR,
        });
        text.push_text(
            &line,
            x + PADDING_X,
            6.0 + PADDING_Y,
            TEXT_SIZE,
            [1.0, 1.0, 1.0, 1.0],
            screen,
        );
    }
}

/// Draw "X"/"Y"/"Z" at the projected axis triad tips, colored like their
/// axes. Tips behind the camera are skipped.
pub fn draw_axis_labels(camera: &Camera, size: f32, text: &mut TextOverlay, screen: (u32, u32)) {
    const LABELS: [&str; 3] = ["X", "Y", "Z"];
    const COLORS: [[f32; 4]; 3] = [
        [1.0, 0.0, 0.0, 1.0],
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
    ];
    let viewport = Vec2::new(screen.0 as f32, screen.1 as f32);

    for (i, tip) in axis_tip_positions(size).into_iter().enumerate() {
        if let Some(px) = camera.world_to_screen(tip, viewport) {
            text.push_text(LABELS[i], px.x + 6.0, px.y - 10.0, 18.0, COLORS[i], screen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position_two_decimals() {
        let line = CameraReadout::format_position(Vec3::new(1.234, -0.5, 10.0));
        assert_eq!(line, "x: 1.23, y: -0.50, z: 10.00");
    }

    #[test]
    fn test_format_position_rounds() {
        let line = CameraReadout::format_position(Vec3::new(0.005, 0.0, -0.005));
        assert!(line.starts_with("x: 0.0"));
        assert!(line.contains("y: 0.00"));
    }
}
