//! Runtime settings for the demo and the engine.
//!
//! Defaults live in [`RenderConfig::default`]. A handful of environment
//! variables can override them, and the two asset paths come from the
//! command line.

use std::path::PathBuf;
use std::str::FromStr;

use crate::colors;
use crate::error::RenderError;
use crate::render::ExecutionMode;

pub const ENV_WORKERS: &str = "TEXRASTER_WORKERS";
pub const ENV_WIDTH: &str = "TEXRASTER_WIDTH";
pub const ENV_HEIGHT: &str = "TEXRASTER_HEIGHT";
pub const ENV_SEQUENTIAL: &str = "TEXRASTER_SEQUENTIAL";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub worker_count: usize,
    pub window_width: u32,
    pub window_height: u32,
    pub title: String,
    pub clear_color: u32,
    pub execution: ExecutionMode,
    pub mesh_path: Option<PathBuf>,
    pub texture_path: Option<PathBuf>,
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            worker_count: 12,
            window_width: 856,
            window_height: 480,
            title: "texraster".to_string(),
            clear_color: colors::BLACK,
            execution: ExecutionMode::Parallel,
            mesh_path: None,
            texture_path: None,
            fov_degrees: 70.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl RenderConfig {
    /// Defaults with the process environment applied on top.
    pub fn from_env() -> Result<Self, RenderError> {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source.
    ///
    /// Unset keys keep their current value; set but unparsable keys are an
    /// error rather than being ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, RenderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(workers) = parse_var(&lookup, ENV_WORKERS)? {
            self.worker_count = workers;
        }
        if let Some(width) = parse_var(&lookup, ENV_WIDTH)? {
            self.window_width = width;
        }
        if let Some(height) = parse_var(&lookup, ENV_HEIGHT)? {
            self.window_height = height;
        }
        if let Some(value) = lookup(ENV_SEQUENTIAL) {
            self.execution = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => ExecutionMode::Sequential,
                "0" | "false" | "no" | "off" | "" => ExecutionMode::Parallel,
                _ => {
                    return Err(RenderError::InvalidConfig {
                        key: ENV_SEQUENTIAL,
                        value,
                    })
                }
            };
        }
        Ok(self)
    }

    /// Take the mesh path and then the texture path from positional
    /// arguments. Missing arguments leave the current values alone.
    pub fn with_args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        if let Some(mesh) = args.next() {
            self.mesh_path = Some(PathBuf::from(mesh));
        }
        if let Some(texture) = args.next() {
            self.texture_path = Some(PathBuf::from(texture));
        }
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, RenderError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RenderError::InvalidConfig { key, value }),
    }
}
