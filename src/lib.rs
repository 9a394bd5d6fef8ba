//! A first-person 3D portfolio walkthrough
//!
//! This crate provides:
//! - 3D rendering with wgpu (lit meshes, sky, debug lines, overlay text)
//! - Entity Component System (ECS) architecture
//! - Physics simulation with rapier3d
//! - Input handling with winit, mapped through rebindable actions
//! - First-person movement with head bob and a keep-out zone

pub mod assets;
pub mod audio;
pub mod core;
pub mod ecs;
pub mod input;
pub mod overlay;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod walk;

// Re-exports for convenience
pub use glam;
pub use hecs;
pub use rapier3d;
pub use wgpu;
pub use winit;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::assets::{Model, ModelError, load_model};
    pub use crate::audio::Footsteps;
    pub use crate::core::{
        DebugInfo, Engine, EngineConfig, EngineContext, EventQueue, FrameStats, Game, GameEvent,
    };
    pub use crate::ecs::{Name, PhysicsBody, RenderMesh, Transform, World};
    pub use crate::input::{Action, Bindings, Input};
    pub use crate::overlay::{CameraReadout, ControlsLegend, WelcomeScreen, draw_axis_labels};
    pub use crate::physics::{ColliderHandle, Physics, RigidBodyHandle};
    pub use crate::renderer::{
        Camera, Light, LineSet, Material, Mesh, ModelBinding, RenderFrame, Renderer, TextOverlay,
        UiImage, UiRect, Vertex, axis_triad_vertices,
    };
    pub use crate::scene::SceneConfig;
    pub use crate::walk::{HeadBob, MoveControls, MoveState, NoGoZone};
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
    pub use winit::keyboard::KeyCode;
}
