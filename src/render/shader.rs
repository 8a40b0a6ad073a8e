//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer owns coverage, depth and the alpha cutout; a shader only
//! turns barycentric weights into a packed ARGB color. Keeping the two
//! apart lets tests and benches drive the scan-converter with a constant
//! color while the pipeline uses [`TextureShader`].

use crate::math::vec2::Vec2;
use crate::texture::Texture;

/// Per-pixel color computation.
///
/// `lambda` holds the weights of vertex 0, 1 and 2. Inside a triangle they
/// are non-negative and sum to 1, so any per-vertex attribute interpolates
/// as `lambda[0] * a0 + lambda[1] * a1 + lambda[2] * a2`.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

/// Returns the same color for every pixel.
pub struct SolidShader {
    color: u32,
}

impl SolidShader {
    pub fn new(color: u32) -> Self {
        Self { color }
    }
}

impl PixelShader for SolidShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> u32 {
        self.color
    }
}

/// Nearest-neighbor texture lookup at the interpolated UV.
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3]) -> Self {
        Self { texture, uvs }
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let uv = Vec2::barycentric(&self.uvs, lambda);
        self.texture.sample(uv.x, uv.y)
    }
}
