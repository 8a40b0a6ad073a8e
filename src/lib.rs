//! A CPU texture-mapping rasterizer.
//!
//! Meshes are carried through model, view and projection, divided by w and
//! mapped to pixels, then scan-converted with barycentric coordinates into a
//! color/depth frame buffer. A frame's triangles are split into contiguous
//! ranges and rasterized concurrently on a fixed rayon pool. SDL2 is only
//! used to put the finished frame on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use texraster::prelude::*;
//!
//! let config = RenderConfig::default();
//! let model = Model::load("crate", "crate.obj", "crate.png")?;
//! let mut window = Window::new(&config.title, config.window_width, config.window_height)?;
//! let mut engine = Engine::new(&config)?;
//! engine.render_frame(&mut window, &model, &TransformSet::default())?;
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod window;

pub use config::RenderConfig;
pub use engine::Engine;
pub use error::{LoadError, RenderError};
pub use mesh::Mesh;
pub use model::Model;
pub use projection::Projection;
pub use texture::Texture;
pub use transform::TransformSet;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use texraster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::OrbitCamera;
    pub use crate::config::RenderConfig;
    pub use crate::engine::Engine;
    pub use crate::error::{LoadError, RenderError};
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::TransformSet;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{DisplaySurface, ExecutionMode, FrameBuffer};

    // Window
    pub use crate::window::{FpsCounter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        partition, rasterize_with_shader, Dispatcher, ExecutionMode, FrameBuffer, ScreenVertex,
        SolidShader, TriangleRasterizer,
    };
}
