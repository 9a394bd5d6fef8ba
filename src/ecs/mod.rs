//! Entity Component System module
//!
//! Built on top of the hecs ECS library

mod components;
mod world;

pub use components::{Name, PhysicsBody, RenderMesh, Transform};
pub use world::World;
