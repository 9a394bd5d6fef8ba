//! Equirectangular sky background

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::texture::{Texture, TextureError};

/// Uniform buffer for the sky pass
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SkyUniform {
    view_proj: [[f32; 4]; 4],
}

/// Sky background drawn behind everything else
///
/// A unit cube is rendered around the camera at maximum depth and its
/// view direction is mapped onto an equirectangular texture. The view
/// matrix has its translation removed so the sky never parallaxes.
pub struct Sky {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
    pub(crate) bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    _texture: Texture,
}

impl Sky {
    /// Load a sky from an equirectangular image (HDR or LDR)
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or decoded
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, TextureError> {
        let texture = Texture::equirect_from_path(device, queue, path)?;

        let vertices = Self::cube_vertices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform = SkyUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sky Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sky Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        Ok(Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            bind_group,
            uniform_buffer,
            _texture: texture,
        })
    }

    /// Update the sky uniform, stripping camera translation
    pub fn update(&self, queue: &wgpu::Queue, view: Mat4, projection: Mat4) {
        let mut view = view;
        view.w_axis = glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let uniform = SkyUniform {
            view_proj: (projection * view).to_cols_array_2d(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Bind group layout for the sky pipeline
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sky Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    /// Vertex layout for the sky pipeline
    pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3],
        }
    }

    /// Unit cube with inward-facing winding, 36 vertices
    fn cube_vertices() -> [[f32; 3]; 36] {
        [
            // +X
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
            // -X
            [-1.0, -1.0, 1.0],
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            // +Y
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, 1.0, -1.0],
            // -Y
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0],
            [-1.0, -1.0, 1.0],
            // +Z
            [1.0, -1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
            // -Z
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, -1.0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cube_covers_all_directions() {
        let verts = Sky::cube_vertices();
        assert_eq!(verts.len(), 36);

        // Every axis direction must be covered by at least one face
        for axis in 0..3 {
            assert!(verts.iter().any(|v| v[axis] > 0.9));
            assert!(verts.iter().any(|v| v[axis] < -0.9));
        }
    }

    #[test]
    fn test_update_strips_translation() {
        let view = Mat4::look_at_rh(Vec3::new(5.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y);
        let mut stripped = view;
        stripped.w_axis = glam::Vec4::new(0.0, 0.0, 0.0, 1.0);

        // The rotation part is untouched
        assert_eq!(view.x_axis, stripped.x_axis);
        assert_eq!(view.y_axis, stripped.y_axis);
        assert_eq!(view.z_axis, stripped.z_axis);
        assert_eq!(stripped.w_axis.w, 1.0);
    }
}
