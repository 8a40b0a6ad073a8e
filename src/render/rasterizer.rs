//! Barycentric triangle scan-conversion.
//!
//! # Algorithm Overview
//!
//! 1. Take the integer bounding box of the three screen vertices and
//!    intersect it with the frame buffer. Pixels cut away by the clamp are
//!    exactly the ones a per-pixel bounds check would reject, so the output
//!    is identical to testing every pixel of the unclamped box.
//! 2. Compute twice the signed area. Only triangles with a negative area
//!    (counter-clockwise in NDC, clockwise once y points down) are drawn;
//!    everything else, including zero-area triangles, is culled.
//! 3. For every pixel in the box compute the barycentric weights
//!
//! ```text
//! det   = (y1 - y2)(x0 - x2) + (x2 - x1)(y0 - y2)
//! alpha = ((y1 - y2)(px - x2) + (x2 - x1)(py - y2)) / det
//! beta  = ((y2 - y0)(px - x2) + (x0 - x2)(py - y2)) / det
//! gamma = 1 - alpha - beta
//! ```
//!
//!    A pixel is inside when all three are `>= 0`, so pixels on a shared
//!    edge belong to both triangles.
//! 4. Interpolate z, keep the pixel only if it is strictly greater than the
//!    stored depth, shade it, and drop it if the color's alpha byte is 0.
//!
//! Pixels are sampled at their integer corner, not their center.
//!
//! # Precision
//!
//! Screen coordinates come out of a saturating float-to-int cast, so a
//! vertex behind the camera can sit near `i32::MIN`/`i32::MAX`. The setup
//! and the coverage numerators are evaluated in `f64`, which cannot
//! overflow and is exact for any triangle spanning less than 2^26 pixels
//! on a side. The coverage sign test is done on the numerators before the
//! division so that edge pixels are classified exactly.

use crate::colors;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::render::shader::{PixelShader, TextureShader};
use crate::render::vertex::ScreenVertex;
use crate::texture::Texture;

/// Textured triangle rasterizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriangleRasterizer;

impl TriangleRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Rasterize one triangle with nearest-neighbor texturing.
    ///
    /// Returns the number of pixels written.
    #[inline]
    pub fn fill_triangle(&self, vertices: &[ScreenVertex; 3], texture: &Texture, buffer: &FrameBuffer) -> usize {
        let shader = TextureShader::new(
            texture,
            [
                Vec2::new(vertices[0].u, vertices[0].v),
                Vec2::new(vertices[1].u, vertices[1].v),
                Vec2::new(vertices[2].u, vertices[2].v),
            ],
        );
        rasterize_with_shader(vertices, buffer, &shader)
    }
}

/// Scan-convert a triangle, delegating color to `shader`.
///
/// Coverage, depth testing and the alpha cutout are handled here; the
/// shader is only invoked for pixels that passed the depth test.
pub fn rasterize_with_shader<S: PixelShader>(vertices: &[ScreenVertex; 3], buffer: &FrameBuffer, shader: &S) -> usize {
    let [v0, v1, v2] = vertices;

    // ─────────────────────────────────────────────────────────────────────
    // Bounding box, intersected with the buffer
    // ─────────────────────────────────────────────────────────────────────
    let min_x = v0.x.min(v1.x).min(v2.x).max(0);
    let min_y = v0.y.min(v1.y).min(v2.y).max(0);
    let max_x = v0.x.max(v1.x).max(v2.x).min(buffer.width() as i32 - 1);
    let max_y = v0.y.max(v1.y).max(v2.y).min(buffer.height() as i32 - 1);
    if min_x > max_x || min_y > max_y {
        return 0;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Winding / back-face test
    // ─────────────────────────────────────────────────────────────────────
    let (x0, y0) = (v0.x as f64, v0.y as f64);
    let (x1, y1) = (v1.x as f64, v1.y as f64);
    let (x2, y2) = (v2.x as f64, v2.y as f64);

    // Equal to `det` in the barycentric formulas.
    let area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);
    if area >= 0.0 {
        return 0;
    }
    let inv_det = 1.0 / area;

    // ─────────────────────────────────────────────────────────────────────
    // Per-pixel coverage, depth and shading
    // ─────────────────────────────────────────────────────────────────────
    let mut written = 0;
    for py in min_y..=max_y {
        let dy = py as f64 - y2;
        for px in min_x..=max_x {
            let dx = px as f64 - x2;

            // Numerators share the sign of `area` (negative) when inside.
            let alpha_num = (y1 - y2) * dx + (x2 - x1) * dy;
            let beta_num = (y2 - y0) * dx + (x0 - x2) * dy;
            let gamma_num = area - alpha_num - beta_num;
            if alpha_num > 0.0 || beta_num > 0.0 || gamma_num > 0.0 {
                continue;
            }

            let Some(index) = buffer.index_of(px, py) else {
                continue;
            };

            let alpha = (alpha_num * inv_det) as f32;
            let beta = (beta_num * inv_det) as f32;
            let gamma = 1.0 - alpha - beta;

            let z = alpha * v0.z + beta * v1.z + gamma * v2.z;
            if z.is_nan() || z <= buffer.depth_at(index) {
                continue;
            }

            let color = shader.shade([alpha, beta, gamma]);
            if colors::is_transparent(color) {
                continue;
            }

            buffer.store(index, z, color);
            written += 1;
        }
    }
    written
}
