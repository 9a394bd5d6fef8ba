//! First-person walkthrough movement
//!
//! Key-state snapshots, the movement controller with head bob, and the
//! keep-out zone around scene furniture.

mod controls;
mod zone;

pub use controls::{HeadBob, MoveControls, MoveState};
pub use zone::NoGoZone;
