//! glTF model loading
//!
//! Imports a `.glb`/`.gltf` file and flattens the scene into mesh parts
//! grouped by material. Node transforms are baked into the vertices, so
//! the renderer draws every part with the entity's transform alone.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};
use rustc_hash::FxHashMap;

use crate::renderer::{Mesh, Vertex};

/// Decoded RGBA8 texture data
#[derive(Debug, Clone)]
pub struct TextureData {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// One mesh along with the material it should be drawn with
#[derive(Debug)]
pub struct ModelPart {
    pub mesh: Mesh,
    /// Base color factor from the material
    pub base_color: [f32; 4],
    /// Base color texture, when the material carries one
    pub texture: Option<TextureData>,
}

/// A model flattened into per-material parts
#[derive(Debug)]
pub struct Model {
    pub parts: Vec<ModelPart>,
}

impl Model {
    /// Total vertex count across all parts
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.vertices.len()).sum()
    }
}

/// Load a glTF model from disk.
///
/// External buffers, embedded data URIs, and referenced images are all
/// resolved by the importer.
///
/// # Errors
///
/// Returns an error if the file cannot be imported or contains no
/// triangle geometry.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model, ModelError> {
    let path = path.as_ref();
    let (doc, buffers, images) =
        gltf::import(path).map_err(|e| ModelError::ImportError(e.to_string()))?;

    let mut builder = ModelBuilder {
        buffers: &buffers,
        images: &images,
        parts: Vec::new(),
        part_by_material: FxHashMap::default(),
    };

    if let Some(scene) = doc.default_scene().or_else(|| doc.scenes().next()) {
        for node in scene.nodes() {
            builder.visit_node(&node, Mat4::IDENTITY);
        }
    } else {
        // No scene graph; take every mesh as-is
        for mesh in doc.meshes() {
            builder.add_mesh(&mesh, Mat4::IDENTITY);
        }
    }

    builder.parts.retain(|p| !p.mesh.indices.is_empty());
    if builder.parts.is_empty() {
        return Err(ModelError::NoGeometry(path.display().to_string()));
    }

    let model = Model {
        parts: builder.parts,
    };
    log::info!(
        "loaded model {} (parts={}, vertices={})",
        path.display(),
        model.parts.len(),
        model.vertex_count()
    );
    Ok(model)
}

struct ModelBuilder<'a> {
    buffers: &'a [gltf::buffer::Data],
    images: &'a [gltf::image::Data],
    parts: Vec<ModelPart>,
    part_by_material: FxHashMap<Option<usize>, usize>,
}

impl ModelBuilder<'_> {
    fn visit_node(&mut self, node: &gltf::Node<'_>, parent: Mat4) {
        let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
        if let Some(mesh) = node.mesh() {
            self.add_mesh(&mesh, transform);
        }
        for child in node.children() {
            self.visit_node(&child, transform);
        }
    }

    fn add_mesh(&mut self, mesh: &gltf::Mesh<'_>, transform: Mat4) {
        let normal_matrix = Mat3::from_mat4(transform.inverse().transpose());
        let buffers = self.buffers;

        for prim in mesh.primitives() {
            if prim.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("skipping primitive with mode {:?}", prim.mode());
                continue;
            }

            let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<[f32; 3]> = positions.collect();
            let normals: Vec<[f32; 3]> = match reader.read_normals() {
                Some(iter) => iter.collect(),
                None => vec![[0.0, 1.0, 0.0]; positions.len()],
            };
            let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                Some(coords) => coords.into_f32().collect(),
                None => vec![[0.0, 0.0]; positions.len()],
            };

            let part_index = self.part_for_material(&prim.material());
            let part_mesh = &mut self.parts[part_index].mesh;
            let base = part_mesh.vertices.len() as u32;

            for (i, p) in positions.iter().enumerate() {
                let position = transform.transform_point3(Vec3::from(*p));
                let normal = normals
                    .get(i)
                    .map_or(Vec3::Y, |n| (normal_matrix * Vec3::from(*n)).normalize_or_zero());
                let uv = uvs.get(i).copied().unwrap_or([0.0, 0.0]);
                part_mesh
                    .vertices
                    .push(Vertex::new(position.into(), normal.into(), uv));
            }

            let indices: Vec<u32> = match reader.read_indices() {
                Some(read) => {
                    use gltf::mesh::util::ReadIndices;
                    match read {
                        ReadIndices::U8(it) => it.map(u32::from).collect(),
                        ReadIndices::U16(it) => it.map(u32::from).collect(),
                        ReadIndices::U32(it) => it.collect(),
                    }
                }
                None => (0..positions.len() as u32).collect(),
            };
            part_mesh.indices.extend(indices.into_iter().map(|i| base + i));
        }
    }

    /// Find or create the part collecting geometry for this material
    fn part_for_material(&mut self, material: &gltf::Material<'_>) -> usize {
        if let Some(&index) = self.part_by_material.get(&material.index()) {
            return index;
        }

        let pbr = material.pbr_metallic_roughness();
        let texture = pbr.base_color_texture().and_then(|info| {
            let image = self.images.get(info.texture().source().index())?;
            let pixels = to_rgba8(image)?;
            Some(TextureData {
                pixels,
                width: image.width,
                height: image.height,
            })
        });

        let index = self.parts.len();
        self.parts.push(ModelPart {
            mesh: Mesh::new(),
            base_color: pbr.base_color_factor(),
            texture,
        });
        self.part_by_material.insert(material.index(), index);
        index
    }
}

/// Expand a decoded glTF image to tightly packed RGBA8
fn to_rgba8(image: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;

    match image.format {
        Format::R8G8B8A8 => Some(image.pixels.clone()),
        Format::R8G8B8 => {
            let mut out = Vec::with_capacity(image.pixels.len() / 3 * 4);
            for px in image.pixels.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            Some(out)
        }
        Format::R8 => {
            let mut out = Vec::with_capacity(image.pixels.len() * 4);
            for &v in &image.pixels {
                out.extend_from_slice(&[v, v, v, 255]);
            }
            Some(out)
        }
        other => {
            log::warn!("unsupported texture format {other:?}, using base color only");
            None
        }
    }
}

/// Errors that can occur loading a model
#[derive(Debug, Clone)]
pub enum ModelError {
    /// The importer rejected the file
    ImportError(String),
    /// The file held no triangle geometry
    NoGeometry(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImportError(e) => write!(f, "Import error: {e}"),
            Self::NoGeometry(path) => write!(f, "No triangle geometry in {path}"),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // One triangle at the origin, translated +5 on X by its node.
    // The buffer data URI holds 3 positions (f32) and 3 u16 indices.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0, "translation": [5.0, 0.0, 0.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "indices": 1}]}],
        "accessors": [
            {"bufferView": 0, "byteOffset": 0, "componentType": 5126, "count": 3,
             "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]},
            {"bufferView": 1, "byteOffset": 0, "componentType": 5123, "count": 3,
             "type": "SCALAR"}
        ],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 36},
            {"buffer": 0, "byteOffset": 36, "byteLength": 6}
        ],
        "buffers": [{"byteLength": 42,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIA"}]
    }"#;

    #[test]
    fn test_node_translation_is_baked_into_vertices() {
        let path = std::env::temp_dir().join("showroom_triangle_test.gltf");
        fs::write(&path, TRIANGLE_GLTF).unwrap();

        let model = load_model(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(model.parts.len(), 1);
        let part = &model.parts[0];
        assert_eq!(part.mesh.vertices.len(), 3);
        assert_eq!(part.mesh.indices, vec![0, 1, 2]);
        assert_eq!(part.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(part.texture.is_none());

        let expected = [[5.0, 0.0, 0.0], [6.0, 0.0, 0.0], [5.0, 1.0, 0.0]];
        for (vertex, want) in part.mesh.vertices.iter().zip(expected) {
            for (a, b) in vertex.position.iter().zip(want) {
                assert!((a - b).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_garbage_file_is_an_import_error() {
        let path = std::env::temp_dir().join("showroom_garbage_test.gltf");
        fs::write(&path, "not a gltf document").unwrap();

        let err = load_model(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ModelError::ImportError(_)));
    }

    #[test]
    fn test_rgb_pixels_gain_opaque_alpha() {
        let image = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };

        let rgba = to_rgba8(&image).unwrap();
        assert_eq!(rgba, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    }
}
