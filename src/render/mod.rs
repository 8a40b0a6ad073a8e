//! The per-triangle pipeline: vertex stage, rasterizer, frame buffer and
//! the dispatcher that spreads a frame over the worker pool.

pub mod dispatch;
pub mod framebuffer;
pub mod rasterizer;
pub mod shader;
pub mod vertex;

pub use dispatch::{partition, Dispatcher, ExecutionMode};
pub use framebuffer::{DisplaySurface, FrameBuffer};
pub use rasterizer::{rasterize_with_shader, TriangleRasterizer};
pub use shader::{PixelShader, SolidShader, TextureShader};
pub use vertex::{transform_vertex, ScreenVertex};
