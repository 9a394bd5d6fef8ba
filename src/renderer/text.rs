//! Screen-space text rendering
//!
//! ASCII glyphs are rasterized once into an alpha atlas with `ab_glyph`,
//! then text is drawn as textured quads in NDC.

use std::fmt;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;
use wgpu::util::DeviceExt;

/// Pixel size glyphs are rasterized at. Text drawn at other sizes is
/// scaled from this bake.
const BAKE_PX: f32 = 48.0;
const ATLAS_SIZE: u32 = 512;
const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Errors that can occur during text setup
#[derive(Debug)]
pub enum TextError {
    /// Font file could not be read
    IoError(String),
    /// Font data could not be parsed
    FontError(String),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::IoError(e) => write!(f, "IO error: {e}"),
            TextError::FontError(e) => write!(f, "Font error: {e}"),
        }
    }
}

impl std::error::Error for TextError {}

/// Vertex for text rendering, already in NDC
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TextVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl TextVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // position
        1 => Float32x2, // uv
        2 => Float32x4, // color
    ];

    /// Vertex buffer layout for text rendering
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TextVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// One baked glyph in the atlas
#[derive(Debug, Clone, Copy)]
struct GlyphInfo {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    /// Offset of the glyph box from the pen position, at bake scale.
    /// Negative y is above the baseline.
    bounds_min: [f32; 2],
    /// Glyph box size in pixels at bake scale
    size: [f32; 2],
    advance: f32,
}

/// Text overlay with a baked glyph atlas and a growable vertex buffer
pub struct TextOverlay {
    font: FontArc,
    glyphs: FxHashMap<char, GlyphInfo>,
    ascent: f32,
    line_height: f32,
    bind_group: wgpu::BindGroup,
    _texture: wgpu::Texture,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    vertices: Vec<TextVertex>,
    vertex_count: u32,
}

impl TextOverlay {
    /// Load a font and bake the printable ASCII range into the atlas
    ///
    /// # Errors
    ///
    /// Returns an error if the font cannot be read or parsed
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        font_path: impl AsRef<std::path::Path>,
        layout: &wgpu::BindGroupLayout,
    ) -> Result<Self, TextError> {
        let bytes = std::fs::read(font_path.as_ref())
            .map_err(|e| TextError::IoError(format!("{}: {e}", font_path.as_ref().display())))?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| TextError::FontError(e.to_string()))?;

        let scale = PxScale::from(BAKE_PX);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let line_height = scaled.ascent() - scaled.descent() + scaled.line_gap();

        let mut atlas = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE) as usize];
        let mut glyphs = FxHashMap::default();

        // Shelf packing with 1px padding
        let mut cursor_x = 1u32;
        let mut cursor_y = 1u32;
        let mut row_h = 0u32;

        for c in ' '..='~' {
            let gid = font.glyph_id(c);
            let advance = scaled.h_advance(gid);

            let Some(outlined) = font.outline_glyph(gid.with_scale(scale)) else {
                // No outline (e.g. space): advance only
                glyphs.insert(
                    c,
                    GlyphInfo {
                        uv_min: [0.0, 0.0],
                        uv_max: [0.0, 0.0],
                        bounds_min: [0.0, 0.0],
                        size: [0.0, 0.0],
                        advance,
                    },
                );
                continue;
            };

            let bounds = outlined.px_bounds();
            let w = bounds.width().ceil() as u32;
            let h = bounds.height().ceil() as u32;

            if cursor_x + w + 1 > ATLAS_SIZE {
                cursor_x = 1;
                cursor_y += row_h + 1;
                row_h = 0;
            }
            if cursor_y + h + 1 > ATLAS_SIZE {
                log::warn!("Glyph atlas full, skipping {c:?}");
                continue;
            }

            let ox = cursor_x;
            let oy = cursor_y;
            outlined.draw(|x, y, v| {
                let px = ox + x;
                let py = oy + y;
                if px < ATLAS_SIZE && py < ATLAS_SIZE {
                    let idx = (py * ATLAS_SIZE + px) as usize;
                    let v = (v * 255.0) as u8;
                    atlas[idx] = atlas[idx].max(v);
                }
            });

            glyphs.insert(
                c,
                GlyphInfo {
                    uv_min: [
                        ox as f32 / ATLAS_SIZE as f32,
                        oy as f32 / ATLAS_SIZE as f32,
                    ],
                    uv_max: [
                        (ox + w) as f32 / ATLAS_SIZE as f32,
                        (oy + h) as f32 / ATLAS_SIZE as f32,
                    ],
                    bounds_min: [bounds.min.x, bounds.min.y],
                    size: [w as f32, h as f32],
                    advance,
                },
            );

            cursor_x += w + 1;
            row_h = row_h.max(h);
        }

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label: Some("Glyph Atlas"),
                size: wgpu::Extent3d {
                    width: ATLAS_SIZE,
                    height: ATLAS_SIZE,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &atlas,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Glyph Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Text Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Text Vertex Buffer"),
            size: (INITIAL_VERTEX_CAPACITY * std::mem::size_of::<TextVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("Baked glyph atlas ({} glyphs)", glyphs.len());

        Ok(Self {
            font,
            glyphs,
            ascent,
            line_height,
            bind_group,
            _texture: texture,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertices: Vec::new(),
            vertex_count: 0,
        })
    }

    /// Clear queued text. Call once per frame before pushing.
    pub fn begin(&mut self) {
        self.vertices.clear();
    }

    /// Queue a single line of text. `x`, `y` are the top-left corner in
    /// screen pixels, `size_px` the display height of the font.
    pub fn push_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        size_px: f32,
        color: [f32; 4],
        screen: (u32, u32),
    ) {
        let s = size_px / BAKE_PX;
        let scaled = self.font.as_scaled(PxScale::from(BAKE_PX));
        let baseline = y + self.ascent * s;
        let mut pen_x = x;
        let mut prev: Option<char> = None;

        for c in text.chars() {
            let Some(glyph) = self.glyphs.get(&c).copied() else {
                prev = None;
                continue;
            };

            if let Some(p) = prev {
                pen_x += scaled.kern(self.font.glyph_id(p), self.font.glyph_id(c)) * s;
            }

            if glyph.size[0] > 0.0 {
                let x0 = pen_x + glyph.bounds_min[0] * s;
                let y0 = baseline + glyph.bounds_min[1] * s;
                let x1 = x0 + glyph.size[0] * s;
                let y1 = y0 + glyph.size[1] * s;

                let p0 = ndc_from_px(x0, y0, screen);
                let p1 = ndc_from_px(x1, y1, screen);
                let [u0, v0] = glyph.uv_min;
                let [u1, v1] = glyph.uv_max;

                self.vertices.extend_from_slice(&[
                    TextVertex {
                        position: [p0[0], p0[1]],
                        uv: [u0, v0],
                        color,
                    },
                    TextVertex {
                        position: [p0[0], p1[1]],
                        uv: [u0, v1],
                        color,
                    },
                    TextVertex {
                        position: [p1[0], p1[1]],
                        uv: [u1, v1],
                        color,
                    },
                    TextVertex {
                        position: [p0[0], p0[1]],
                        uv: [u0, v0],
                        color,
                    },
                    TextVertex {
                        position: [p1[0], p1[1]],
                        uv: [u1, v1],
                        color,
                    },
                    TextVertex {
                        position: [p1[0], p0[1]],
                        uv: [u1, v0],
                        color,
                    },
                ]);
            }

            pen_x += glyph.advance * s;
            prev = Some(c);
        }
    }

    /// Width in pixels of a single line at the given display size
    #[must_use]
    pub fn measure(&self, text: &str, size_px: f32) -> f32 {
        let s = size_px / BAKE_PX;
        let scaled = self.font.as_scaled(PxScale::from(BAKE_PX));
        let mut width = 0.0;
        let mut prev: Option<char> = None;

        for c in text.chars() {
            let Some(glyph) = self.glyphs.get(&c) else {
                prev = None;
                continue;
            };
            if let Some(p) = prev {
                width += scaled.kern(self.font.glyph_id(p), self.font.glyph_id(c)) * s;
            }
            width += glyph.advance * s;
            prev = Some(c);
        }

        width
    }

    /// Line height in pixels at the given display size
    #[must_use]
    pub fn line_height(&self, size_px: f32) -> f32 {
        self.line_height * size_px / BAKE_PX
    }

    /// Upload queued vertices, growing the buffer as needed. Call after
    /// all `push_text` calls and before drawing.
    pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        self.vertex_count = self.vertices.len() as u32;
        if self.vertices.is_empty() {
            return;
        }

        if self.vertices.len() > self.vertex_capacity {
            self.vertex_capacity = self.vertices.len().next_power_of_two();
            self.vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Text Vertex Buffer"),
                size: (self.vertex_capacity * std::mem::size_of::<TextVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub(crate) fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub(crate) fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

/// Convert screen pixels to NDC, top-left origin
fn ndc_from_px(x: f32, y: f32, screen: (u32, u32)) -> [f32; 2] {
    [
        (x / screen.0 as f32) * 2.0 - 1.0,
        1.0 - (y / screen.1 as f32) * 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_from_px_corners() {
        let screen = (800, 600);
        assert_eq!(ndc_from_px(0.0, 0.0, screen), [-1.0, 1.0]);
        assert_eq!(ndc_from_px(800.0, 600.0, screen), [1.0, -1.0]);
        assert_eq!(ndc_from_px(400.0, 300.0, screen), [0.0, 0.0]);
    }

    #[test]
    fn test_ndc_y_points_down() {
        let screen = (800, 600);
        let top = ndc_from_px(0.0, 100.0, screen);
        let bottom = ndc_from_px(0.0, 500.0, screen);
        assert!(top[1] > bottom[1]);
    }
}
