//! Error types.
//!
//! Only two things can go wrong in this crate: assets fail to load at
//! startup, or the surrounding machinery (worker pool, display, config)
//! fails to come up. The rasterization core itself never errors; out-of-range
//! writes, culled triangles and rejected pixels are ordinary control flow.

use thiserror::Error;

/// Failure to import a mesh or decode a texture.
///
/// These are fatal at startup: the caller reports them and exits, no partial
/// state is kept.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The OBJ importer rejected the file.
    #[error("failed to import mesh: {0}")]
    Obj(#[from] tobj::LoadError),

    /// The image decoder rejected the file.
    #[error("failed to decode texture: {0}")]
    Image(#[from] image::ImageError),

    /// Imported arrays violate the mesh invariants.
    #[error("invalid mesh '{name}': {reason}")]
    InvalidMesh { name: String, reason: String },

    /// Pixel array length does not match the stated dimensions.
    #[error("invalid texture: {width}x{height} does not match {len} pixels")]
    InvalidTexture { width: u32, height: u32, len: usize },
}

/// Failure outside the per-pixel pipeline.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The fixed worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// SDL reported an error; SDL hands these back as plain strings.
    #[error("display error: {0}")]
    Display(String),

    /// An environment override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        RenderError::Display(message)
    }
}
