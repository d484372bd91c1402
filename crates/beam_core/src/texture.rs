//! Texture storage and sampling.
//!
//! A texture is a row-major grid of 8-bit RGB texels addressed by
//! normalized (u, v) coordinates with nearest (truncating) lookup and no
//! filtering. Hosts load textures from image files or build them in memory
//! and share them by `Arc`.

use std::path::Path;

use beam_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    /// Image decoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// A 2-D grid of 8-bit RGB texels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<[u8; 3]>,
}

impl Texture {
    /// Create a texture from row-major RGB texels.
    ///
    /// # Panics
    ///
    /// Panics if `texels.len()` does not equal `width * height`.
    pub fn from_texels(width: u32, height: u32, texels: Vec<[u8; 3]>) -> Self {
        assert_eq!(
            texels.len(),
            width as usize * height as usize,
            "texel count must match dimensions"
        );
        Self {
            width,
            height,
            texels,
        }
    }

    /// The empty texture; it holds no texels and must not be sampled.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            texels: Vec::new(),
        }
    }

    /// Load a texture from an image file, converting to 8-bit RGB.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let texels = rgb.pixels().map(|p| [p[0], p[1], p[2]]).collect();

        log::debug!("loaded texture {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// True when the texture holds no texels; shading skips empty textures.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Texture width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample the texel under (u, v), scaled to 0-1 per channel.
    ///
    /// Coordinates map to texel indices by truncation and clamp to the
    /// nearest edge, so out-of-range coordinates never index out of bounds.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        debug_assert!(!self.is_empty(), "sampled an empty texture");

        let x = ((u * self.width as f32) as i64).clamp(0, self.width as i64 - 1) as usize;
        let y = ((v * self.height as f32) as i64).clamp(0, self.height as i64 - 1) as usize;

        let [r, g, b] = self.texels[y * self.width as usize + x];
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }
}

impl Default for Texture {
    fn default() -> Self {
        Self::empty()
    }
}
