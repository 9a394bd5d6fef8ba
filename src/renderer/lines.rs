//! World-space debug line rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Vertex for line rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // color
    ];

    /// Vertex buffer layout for line rendering
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// An uploaded set of line segments
pub struct LineSet {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

impl LineSet {
    /// Upload line vertices, two per segment
    pub fn new(device: &wgpu::Device, vertices: &[LineVertex]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Line Vertex Buffer"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// Build the vertices of an origin axis triad: X red, Y green, Z blue
#[must_use]
pub fn axis_triad_vertices(size: f32) -> Vec<LineVertex> {
    let origin = [0.0, 0.0, 0.0];
    let red = [1.0, 0.0, 0.0];
    let green = [0.0, 1.0, 0.0];
    let blue = [0.0, 0.0, 1.0];

    vec![
        LineVertex::new(origin, red),
        LineVertex::new([size, 0.0, 0.0], red),
        LineVertex::new(origin, green),
        LineVertex::new([0.0, size, 0.0], green),
        LineVertex::new(origin, blue),
        LineVertex::new([0.0, 0.0, size], blue),
    ]
}

/// World positions of the triad axis tips, in X, Y, Z order
#[must_use]
pub fn axis_tip_positions(size: f32) -> [Vec3; 3] {
    [
        Vec3::new(size, 0.0, 0.0),
        Vec3::new(0.0, size, 0.0),
        Vec3::new(0.0, 0.0, size),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_triad_vertices() {
        let verts = axis_triad_vertices(1.0);
        assert_eq!(verts.len(), 6);

        // Each segment starts at the origin
        assert_eq!(verts[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[2].position, [0.0, 0.0, 0.0]);
        assert_eq!(verts[4].position, [0.0, 0.0, 0.0]);

        // X red, Y green, Z blue
        assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(verts[1].color, [1.0, 0.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, 1.0, 0.0]);
        assert_eq!(verts[3].color, [0.0, 1.0, 0.0]);
        assert_eq!(verts[5].position, [0.0, 0.0, 1.0]);
        assert_eq!(verts[5].color, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_axis_triad_scales() {
        let verts = axis_triad_vertices(2.5);
        assert_eq!(verts[1].position, [2.5, 0.0, 0.0]);
        assert_eq!(verts[3].position, [0.0, 2.5, 0.0]);
        assert_eq!(verts[5].position, [0.0, 0.0, 2.5]);
    }

    #[test]
    fn test_axis_tip_positions_match_triad() {
        let tips = axis_tip_positions(1.5);
        assert_eq!(tips[0], Vec3::new(1.5, 0.0, 0.0));
        assert_eq!(tips[1], Vec3::new(0.0, 1.5, 0.0));
        assert_eq!(tips[2], Vec3::new(0.0, 0.0, 1.5));
    }
}
