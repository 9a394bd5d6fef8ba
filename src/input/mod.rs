//! Input handling module
//!
//! Provides raw input state tracking and key-to-action bindings.

mod bindings;
mod state;

pub use bindings::{Action, Bindings};
pub use state::Input;
