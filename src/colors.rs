//! Packed ARGB8888 color helpers.
//!
//! Colors travel through the pipeline as `u32` in `0xAARRGGBB` layout, the
//! same layout SDL's `ARGB8888` streaming texture expects.

pub const BLACK: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Alpha channel (top 8 bits).
#[inline]
pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// A sample with zero alpha is a cutout: it must not reach the frame buffer.
#[inline]
pub const fn is_transparent(color: u32) -> bool {
    color >> 24 == 0
}

#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Opaque gray level, used by the depth visualization.
#[inline]
pub const fn gray(level: u8) -> u32 {
    pack_argb(0xFF, level, level, level)
}
