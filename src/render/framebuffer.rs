//! Color and depth storage for one frame.
//!
//! # Depth Buffer
//!
//! The depth buffer stores post-divide z and keeps the **largest** accepted
//! value per pixel. It is cleared to 0.0. With the reversed-Z projections in
//! [`crate::math::mat4`] (near = 1, far = 0) larger means closer, so the
//! nearest surface wins.
//!
//! # Sharing between workers
//!
//! Every worker of a frame writes into the same buffer through `&FrameBuffer`.
//! Cells are `AtomicU32` and all accesses use `Ordering::Relaxed`: each
//! individual load or store is tear-free, but the depth-test sequence
//! (load depth, compare, store depth, store color) is deliberately *not*
//! atomic as a whole. Two triangles from different workers that land on the
//! same pixel may interleave arbitrarily; when their depths differ the
//! nearer one usually wins, and when they tie the outcome is unspecified.
//! No locks are taken. For bit-exact results render with
//! [`ExecutionMode::Sequential`](super::ExecutionMode::Sequential).

use std::sync::atomic::{AtomicU32, Ordering};

use log::info;

use crate::colors;
use crate::error::RenderError;

/// Display-side collaborator that receives finished frames.
pub trait DisplaySurface {
    fn current_width(&self) -> u32;

    fn current_height(&self) -> u32;

    /// Copy a finished ARGB frame of `width * height` pixels to the screen.
    fn blit(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), RenderError>;
}

pub struct FrameBuffer {
    color: Vec<AtomicU32>,
    depth: Vec<AtomicU32>, // f32 bit patterns
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Allocate both arrays at `width * height`, cleared to black and depth 0.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color: (0..size).map(|_| AtomicU32::new(colors::BLACK)).collect(),
            depth: (0..size).map(|_| AtomicU32::new(0.0f32.to_bits())).collect(),
            width,
            height,
        }
    }

    /// Replace this buffer with a fresh allocation of the new size.
    pub fn recreate(&mut self, width: u32, height: u32) {
        info!(
            "recreating frame buffer {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.color.len()
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_empty()
    }

    /// Fill every color cell with `color` and every depth cell with 0.
    pub fn clear(&mut self, color: u32) {
        let zero = 0.0f32.to_bits();
        for cell in &mut self.color {
            *cell.get_mut() = color;
        }
        for cell in &mut self.depth {
            *cell.get_mut() = zero;
        }
    }

    /// Linear index of `(x, y)`, or `None` when the pixel is off-buffer.
    ///
    /// Each axis is checked on its own, so `x == width` does not wrap onto
    /// the next row and negative coordinates never alias a valid cell.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(x as usize + y as usize * self.width as usize)
    }

    /// Write a color without depth testing. Off-buffer writes are ignored.
    #[inline]
    pub fn write_pixel(&self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index_of(x, y) {
            self.color[index].store(color, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn depth_at(&self, index: usize) -> f32 {
        f32::from_bits(self.depth[index].load(Ordering::Relaxed))
    }

    #[inline]
    pub(crate) fn store(&self, index: usize, depth: f32, color: u32) {
        self.depth[index].store(depth.to_bits(), Ordering::Relaxed);
        self.color[index].store(color, Ordering::Relaxed);
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y)
            .map(|index| self.color[index].load(Ordering::Relaxed))
    }

    /// Get the stored depth at (x, y), or None if out of bounds.
    pub fn depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index_of(x, y).map(|index| self.depth_at(index))
    }

    /// Copy of the color array.
    pub fn snapshot(&self) -> Vec<u32> {
        self.color.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    /// Copy of the depth array.
    pub fn depth_snapshot(&self) -> Vec<f32> {
        self.depth
            .iter()
            .map(|d| f32::from_bits(d.load(Ordering::Relaxed)))
            .collect()
    }

    /// Borrow the color array as plain words.
    ///
    /// Requires `&mut self`, so no worker can be writing while the slice is
    /// alive.
    pub fn color_pixels(&mut self) -> &[u32] {
        // SAFETY: AtomicU32 has the same size, alignment and bit validity as
        // u32, and the exclusive borrow rules out concurrent atomic stores for
        // the lifetime of the returned slice.
        unsafe { std::slice::from_raw_parts(self.color.as_ptr() as *const u32, self.color.len()) }
    }

    /// Hand the finished frame to the display.
    pub fn present<S: DisplaySurface + ?Sized>(&mut self, surface: &mut S) -> Result<(), RenderError> {
        let (width, height) = (self.width, self.height);
        surface.blit(self.color_pixels(), width, height)
    }

    /// Grayscale view of the depth buffer for debugging.
    ///
    /// Depth is scaled by 255 and clamped, so reversed-Z output shows near
    /// surfaces bright and the cleared background black.
    pub fn depth_to_grayscale(&self) -> Vec<u32> {
        self.depth_snapshot()
            .into_iter()
            .map(|d| colors::gray((d * 255.0).clamp(0.0, 255.0) as u8))
            .collect()
    }
}
