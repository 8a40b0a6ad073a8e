use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::error::RenderError;
use crate::render::DisplaySurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Counts presented frames per wall-clock second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            window_start: start,
            frames: 0,
        }
    }

    /// Record a frame. Returns the frame count once a full second has passed.
    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        let fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(fps)
    }
}

/// SDL2 window with a streaming ARGB8888 texture the frame buffer is
/// copied into.
pub struct Window {
    // Declared first so it is dropped before the creator it borrows from.
    texture: Texture<'static>,
    texture_size: (u32, u32),
    texture_creator: Box<TextureCreator<WindowContext>>,
    canvas: Canvas<sdl2::video::Window>,
    event_pump: sdl2::EventPump,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, RenderError> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| RenderError::Display(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| RenderError::Display(e.to_string()))?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            texture,
            texture_size: (width, height),
            texture_creator,
            canvas,
            event_pump,
        })
    }

    fn create_texture(
        creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>, RenderError> {
        // SAFETY: the creator is boxed and owned by the same Window as the
        // texture, and the texture field is dropped first.
        let creator: &'static TextureCreator<WindowContext> = unsafe { &*(creator as *const _) };
        creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| RenderError::Display(e.to_string()))
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), RenderError> {
        self.canvas
            .window_mut()
            .set_title(title)
            .map_err(|e| RenderError::Display(e.to_string()))
    }
}

impl DisplaySurface for Window {
    fn current_width(&self) -> u32 {
        self.canvas.window().size().0
    }

    fn current_height(&self) -> u32 {
        self.canvas.window().size().1
    }

    fn blit(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        if self.texture_size != (width, height) {
            self.texture = Self::create_texture(&self.texture_creator, width, height)?;
            self.texture_size = (width, height);
        }

        // SAFETY: u32 has no padding and u8 has alignment 1, so the words
        // can be viewed as `4 * len` bytes for the lifetime of `pixels`.
        let bytes = unsafe { std::slice::from_raw_parts(pixels.as_ptr() as *const u8, pixels.len() * 4) };
        self.texture
            .update(None, bytes, (width * 4) as usize)
            .map_err(|e| RenderError::Display(e.to_string()))?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
