//! Frame orchestration.
//!
//! The [`Engine`] owns the frame buffer and the worker pool and runs one
//! frame at a time: match the buffer to the display size, clear it, dispatch
//! every mesh of the model, then present.

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::model::Model;
use crate::render::{DisplaySurface, Dispatcher, ExecutionMode, FrameBuffer};
use crate::transform::TransformSet;

pub struct Engine {
    frame_buffer: FrameBuffer,
    dispatcher: Dispatcher,
    clear_color: u32,
}

impl Engine {
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        Ok(Self {
            frame_buffer: FrameBuffer::new(config.window_width, config.window_height),
            dispatcher: Dispatcher::new(config.worker_count, config.execution)?,
            clear_color: config.clear_color,
        })
    }

    /// Run a full frame against a display.
    ///
    /// Returns the number of pixels written by the rasterizer.
    pub fn render_frame<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
        model: &Model,
        transforms: &TransformSet,
    ) -> Result<usize, RenderError> {
        self.resize(surface.current_width(), surface.current_height());
        let written = self.render(model, transforms);
        self.frame_buffer.present(surface)?;
        Ok(written)
    }

    /// Clear the buffer and rasterize every mesh of `model`, without
    /// presenting.
    pub fn render(&mut self, model: &Model, transforms: &TransformSet) -> usize {
        self.frame_buffer.clear(self.clear_color);
        self.dispatcher
            .render_meshes(model.meshes(), model.texture(), transforms, &self.frame_buffer)
    }

    /// Recreate the frame buffer if the size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.frame_buffer.width(), self.frame_buffer.height()) {
            self.frame_buffer.recreate(width, height);
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn set_execution_mode(&mut self, mode: ExecutionMode) {
        self.dispatcher.set_mode(mode);
    }

    pub fn set_clear_color(&mut self, color: u32) {
        self.clear_color = color;
    }

    pub fn clear_color(&self) -> u32 {
        self.clear_color
    }
}
