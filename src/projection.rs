//! Perspective projection parameters.
//!
//! [`Projection`] keeps the canonical parameters (FOV, aspect ratio,
//! near/far planes) and derives the reversed-Z projection matrix from them.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near plane distance (must be > 0)
    /// * `z_far` - Far plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Returns a projection with the vertical FOV given in degrees.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Returns a projection whose aspect ratio matches a `width x height`
    /// surface. A zero height is treated as 1.
    pub fn for_surface(fov_y_degrees: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::from_degrees(fov_y_degrees, width as f32 / height.max(1) as f32, z_near, z_far)
    }

    /// Returns the right-handed, reversed-Z projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_reversed_z(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}
