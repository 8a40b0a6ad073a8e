//! Orbiting demo camera.
//!
//! # Coordinate System
//!
//! Right-handed, matching the projection builders in [`crate::math::mat4`]:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z)
//!
//! The camera circles a target point at a fixed distance. Yaw advances with
//! wall-clock time, pitch stays fixed.

use std::time::Duration;

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    target: Vec3,
    distance: f32,
    pitch: f32, // radians, positive looks down on the target
    yaw: f32,   // radians around the world Y axis
    yaw_speed: f32, // radians per second
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // 2 units out, 25 degrees above the horizon, a full turn every 3.6s
        Self::new(Vec3::ZERO, 2.0, 25.0_f32.to_radians(), 100.0_f32.to_radians())
    }
}

impl OrbitCamera {
    pub fn new(target: Vec3, distance: f32, pitch: f32, yaw_speed: f32) -> Self {
        Self {
            target,
            distance,
            pitch,
            yaw: 0.0,
            yaw_speed,
        }
    }

    /// Set the yaw from total elapsed time since the orbit started.
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.yaw = (elapsed.as_secs_f32() * self.yaw_speed).rem_euclid(std::f32::consts::TAU);
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// World-to-view transform.
    ///
    /// Moves the target to the origin, spins the world by yaw then pitch,
    /// and pushes it `distance` units down -Z in front of the camera.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::translation(0.0, 0.0, -self.distance)
            * Mat4::rotation_x(self.pitch)
            * Mat4::rotation_y(self.yaw)
            * Mat4::translation(-self.target.x, -self.target.y, -self.target.z)
    }
}
