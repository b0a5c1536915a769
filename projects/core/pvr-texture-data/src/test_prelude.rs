//! Common test imports and utilities for the data crate's tests.
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

pub use alloc::{format, vec, vec::Vec};

pub use rstest::rstest;

pub use crate::codec::*;
pub use crate::data_format::*;
pub use crate::error::*;
pub use crate::layout::*;
pub use crate::vq::{VqBlock, VqCodebook};
pub use pvr_texture_common::color_8888::Color8888;
pub use pvr_texture_common::palette::Palette;
pub use pvr_texture_common::pixel_format::PixelFormat;

/// Row-major RGBA whose every pixel is exactly representable in `pixel_format`.
///
/// Pixels are produced by decoding a spread of packed values, so encoding them again is lossless.
pub fn representable_gradient(pixel_format: PixelFormat, width: u32, height: u32) -> Vec<u8> {
    let pixels = (width * height) as usize;
    let mut rgba = vec![0u8; pixels * 4];
    for x in 0..pixels {
        let packed = ((x as u32 * 7919) & 0xFFFF) as u16;
        pixel_format
            .decode_pixel(&packed.to_le_bytes(), 0)
            .write_rgba_slice(&mut rgba, x);
    }
    rgba
}

/// Row-major RGBA of `size x size` using only `colors`, picked by a fixed pattern.
pub fn patterned_image(size: u32, colors: &[Color8888]) -> Vec<u8> {
    let size = size as usize;
    let mut rgba = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            let color = colors[(x * 3 + y * 5) % colors.len()];
            color.write_rgba_slice(&mut rgba, y * size + x);
        }
    }
    rgba
}
