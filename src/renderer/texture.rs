//! Texture loading and GPU management
//!
//! Provides texture loading from files and GPU upload for rendering.

use image::GenericImageView;
use std::path::Path;
use wgpu::util::DeviceExt;

/// A GPU texture with its view and sampler
#[derive(Debug)]
pub struct Texture {
    /// The GPU texture
    pub texture: wgpu::Texture,
    /// Texture view for binding
    pub view: wgpu::TextureView,
    /// Sampler for texture filtering
    pub sampler: wgpu::Sampler,
    /// Texture dimensions
    pub size: wgpu::Extent3d,
}

impl Texture {
    /// Load a texture from a file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        label: Option<&str>,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TextureError::IoError(e.to_string()))?;
        Self::from_bytes(device, queue, &bytes, label)
    }

    /// Load a texture from raw bytes (PNG, JPEG, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be decoded as an image
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: Option<&str>,
    ) -> Result<Self, TextureError> {
        let img =
            image::load_from_memory(bytes).map_err(|e| TextureError::DecodeError(e.to_string()))?;
        Self::from_image(device, queue, &img, label)
    }

    /// Create a texture from a `DynamicImage`
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Result<Self, TextureError> {
        let rgba = img.to_rgba8();
        let dimensions = img.dimensions();

        Self::from_rgba(device, queue, &rgba, dimensions, label)
    }

    /// Load an equirectangular sky image.
    ///
    /// HDR input (`.hdr`) is tone mapped down to LDR at load time; plain
    /// LDR images pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn equirect_from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
    ) -> Result<Self, TextureError> {
        let img =
            image::open(path.as_ref()).map_err(|e| TextureError::DecodeError(e.to_string()))?;

        let (rgba, dimensions) = match img {
            image::DynamicImage::ImageRgb32F(hdr) => {
                let dimensions = hdr.dimensions();
                (tone_map(hdr.as_raw(), 3), dimensions)
            }
            image::DynamicImage::ImageRgba32F(hdr) => {
                let dimensions = hdr.dimensions();
                (tone_map(hdr.as_raw(), 4), dimensions)
            }
            other => {
                let rgba = other.to_rgba8();
                let dimensions = rgba.dimensions();
                (rgba.into_raw(), dimensions)
            }
        };

        Self::from_rgba(device, queue, &rgba, dimensions, Some("sky_texture"))
    }

    /// Create a texture from raw RGBA data
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        dimensions: (u32, u32),
        label: Option<&str>,
    ) -> Result<Self, TextureError> {
        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label,
                size,
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            rgba,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texture_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
            size,
        })
    }

    /// Create a 1x1 white texture (useful as default/placeholder)
    #[must_use]
    pub fn white(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba(
            device,
            queue,
            &[255, 255, 255, 255],
            (1, 1),
            Some("white_texture"),
        )
        .expect("Failed to create white texture")
    }

    /// Get texture width
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Get texture height
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height
    }
}

/// Reinhard tone mapping plus gamma encode, to tightly packed RGBA8
fn tone_map(raw: &[f32], channels: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() / channels * 4);
    for px in raw.chunks_exact(channels) {
        for c in &px[..3] {
            let c = c.max(0.0);
            let mapped = (c / (1.0 + c)).powf(1.0 / 2.2);
            out.push((mapped * 255.0).round() as u8);
        }
        out.push(255);
    }
    out
}

/// Errors that can occur during texture loading
#[derive(Debug, Clone)]
pub enum TextureError {
    /// IO error reading file
    IoError(String),
    /// Error decoding image data
    DecodeError(String),
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DecodeError(e) => write!(f, "Decode error: {e}"),
        }
    }
}

impl std::error::Error for TextureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_map_compresses_highlights() {
        // 1.0 maps to half intensity before gamma, far values stay below 255
        let rgba = tone_map(&[0.0, 1.0, 100.0], 3);

        assert_eq!(rgba.len(), 4);
        assert_eq!(rgba[0], 0);
        assert_eq!(rgba[3], 255);
        assert!(rgba[1] > 150 && rgba[1] < 200);
        assert!(rgba[2] > rgba[1]);
        assert!(rgba[2] < 255);
    }

    #[test]
    fn test_tone_map_expands_rgb_to_rgba() {
        let rgba = tone_map(&[0.5; 6], 3);
        assert_eq!(rgba.len(), 8);
        assert_eq!(rgba[3], 255);
        assert_eq!(rgba[7], 255);
    }
}
