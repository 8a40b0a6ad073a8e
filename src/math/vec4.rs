//! Homogeneous coordinates for the vertex stage.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Returns the point `(x, y, z, 1)`; translations apply to it.
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Returns the direction `(x, y, z, 0)`; translations leave it alone.
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 0.0)
    }

    /// Returns `(x, y, z)`, dropping w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divide x, y and z by w, keeping w itself.
    ///
    /// No guard against `w == 0`: a vertex on the camera plane yields
    /// infinities, which the rasterizer's bounds checks then discard.
    #[inline]
    pub fn perspective_divide(self) -> Self {
        Self::new(self.x / self.w, self.y / self.w, self.z / self.w, self.w)
    }
}
