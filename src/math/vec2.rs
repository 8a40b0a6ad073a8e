/// Texture coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the weighted sum `lambda[0] * c[0] + lambda[1] * c[1] + lambda[2] * c[2]`.
    ///
    /// With barycentric weights this is the attribute value at the pixel.
    #[inline]
    pub fn barycentric(corners: &[Vec2; 3], lambda: [f32; 3]) -> Self {
        Self::new(
            lambda[0] * corners[0].x + lambda[1] * corners[1].x + lambda[2] * corners[2].x,
            lambda[0] * corners[0].y + lambda[1] * corners[1].y + lambda[2] * corners[2].y,
        )
    }
}
