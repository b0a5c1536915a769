//! Row-major layout. Pixels are stored left to right, top to bottom, with no row padding.

use alloc::vec;
use alloc::vec::Vec;
use pvr_texture_common::color_8888::Color8888;
use pvr_texture_common::pixel_format::PixelFormat;

/// Decodes `pixels` raster pixels to RGBA. `source` must hold at least `byte_len(pixels)` bytes.
pub(crate) fn decode(source: &[u8], pixels: usize, pixel_format: PixelFormat) -> Vec<u8> {
    let mut rgba = vec![0u8; pixels * 4];
    for x in 0..pixels {
        pixel_format
            .decode_pixel(source, x)
            .write_rgba_slice(&mut rgba, x);
    }
    rgba
}

/// Encodes RGBA pixels to raster storage. `rgba.len()` must be a multiple of 4.
pub(crate) fn encode(rgba: &[u8], pixel_format: PixelFormat) -> Vec<u8> {
    let pixels = rgba.len() / 4;
    let mut dest = vec![0u8; pixel_format.byte_len(pixels)];
    for x in 0..pixels {
        pixel_format.encode_pixel(Color8888::from_rgba_slice(rgba, x), &mut dest, x);
    }
    dest
}
