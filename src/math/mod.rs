//! Minimal linear algebra for the vertex stage.
//!
//! Column-vector convention throughout: `Mat4 * Vec4`, transforms chain
//! right-to-left.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
