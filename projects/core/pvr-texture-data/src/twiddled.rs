//! Square twiddled layout over [`twiddled_index`] addressing.

use alloc::vec;
use alloc::vec::Vec;
use pvr_texture_common::color_8888::Color8888;
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_common::twiddle::twiddled_index;

/// Decodes a twiddled `size x size` level to row-major RGBA.
pub(crate) fn decode(source: &[u8], size: usize, pixel_format: PixelFormat) -> Vec<u8> {
    let mut rgba = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            pixel_format
                .decode_pixel(source, twiddled_index(x, y, size))
                .write_rgba_slice(&mut rgba, y * size + x);
        }
    }
    rgba
}

/// Encodes row-major RGBA of a `size x size` level to twiddled storage.
pub(crate) fn encode(rgba: &[u8], size: usize, pixel_format: PixelFormat) -> Vec<u8> {
    let mut dest = vec![0u8; pixel_format.byte_len(size * size)];
    for y in 0..size {
        for x in 0..size {
            let color = Color8888::from_rgba_slice(rgba, y * size + x);
            pixel_format.encode_pixel(color, &mut dest, twiddled_index(x, y, size));
        }
    }
    dest
}
