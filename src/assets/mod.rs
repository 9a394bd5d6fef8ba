//! Asset loading

mod gltf;

pub use self::gltf::{Model, ModelError, ModelPart, TextureData, load_model};
