//! Texture storage and nearest-neighbor sampling.

use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::colors::pack_argb;
use crate::error::LoadError;

/// An immutable 2D texture in ARGB8888.
///
/// Row 0 is the top row of the image. Sampling is read-only, so one texture
/// can be shared by every worker of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pixels: Vec<u32>, // ARGB, row-major
    width: u32,
    height: u32,
}

impl Texture {
    /// Wrap an already-decoded pixel array.
    pub fn new(pixels: Vec<u32>, width: u32, height: u32) -> Result<Self, LoadError> {
        if pixels.len() != width as usize * height as usize {
            return Err(LoadError::InvalidTexture {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// A texture filled with one color.
    pub fn solid(width: u32, height: u32, color: u32) -> Self {
        Self {
            pixels: vec![color; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Decode a texture from an image file (PNG, JPG, etc.)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let texture = Self::from_rgba(&image::open(path)?.to_rgba8());
        info!(
            "loaded texture {} ({}x{})",
            path.display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Decode a texture from encoded image bytes.
    pub fn from_memory(bytes: &[u8]) -> Result<Self, LoadError> {
        Ok(Self::from_rgba(&image::load_from_memory(bytes)?.to_rgba8()))
    }

    /// Repack straight RGBA bytes into ARGB words.
    pub fn from_rgba(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                pack_argb(a, r, g, b)
            })
            .collect();
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Texel at integer coordinates, or 0 (fully transparent) when either
    /// coordinate falls outside the image.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.pixels[x as usize + y as usize * self.width as usize]
    }

    /// Nearest-neighbor lookup in pixel space.
    ///
    /// Coordinates are truncated toward zero, so `-0.5` still reads column 0
    /// while `width as f32` is already out of range.
    #[inline]
    pub fn sample_texel(&self, x: f32, y: f32) -> u32 {
        self.pixel(x as i32, y as i32)
    }

    /// Nearest-neighbor lookup by normalized coordinates. `(0, 0)` is the
    /// top-left texel; no wrapping is applied.
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        self.sample_texel(u * self.width as f32, v * self.height as f32)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}
