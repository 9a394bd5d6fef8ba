//! Rendering module
//!
//! 3D rendering with wgpu: lit meshes, an equirectangular sky, debug
//! lines, and a screen-space overlay layer (rects and text).

mod camera;
mod context;
mod lines;
mod material;
mod mesh;
mod sky;
mod text;
mod texture;

pub use camera::Camera;
pub use context::{Light, ModelBinding, ModelUniform, RenderFrame, Renderer, UiImage, UiRect};
pub use lines::{LineSet, LineVertex, axis_tip_positions, axis_triad_vertices};
pub use material::{Material, MaterialUniform};
pub use mesh::{Mesh, Vertex};
pub use sky::Sky;
pub use text::{TextError, TextOverlay, TextVertex};
pub use texture::{Texture, TextureError};
