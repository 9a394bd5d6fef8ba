//! Core engine module
//!
//! Contains the main Engine struct, frame timing, debug stats, and the
//! app event queue.

mod debug;
mod engine;
mod events;
mod time;

pub use debug::{DebugInfo, FrameStats};
pub use engine::{Engine, EngineConfig, EngineContext, Game};
pub use events::{EventQueue, GameEvent};
pub use time::Time;
