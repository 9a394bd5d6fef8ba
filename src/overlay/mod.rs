//! 2D overlay layer
//!
//! Screen-space UI drawn over the 3D scene: the welcome screen, the
//! controls legend, and debug readouts. Overlay types own their state
//! and push `UiRect`s and text into per-frame draw lists.

mod legend;
mod readout;
mod rect;
mod welcome;

pub use legend::ControlsLegend;
pub use readout::{CameraReadout, draw_axis_labels};
pub use rect::{Anchor, Rect};
pub use welcome::WelcomeScreen;
