//! Grayscale formats. A sample of `N` bits maps onto the full 0-255 ramp.

use crate::color_8888::Color8888;

/// Decodes an `bits`-wide intensity sample to an opaque gray.
#[inline]
pub fn decode(value: u32, bits: u32) -> Color8888 {
    let max = (1u32 << bits) - 1;
    let gray = (value.min(max) * 255 / max) as u8;
    Color8888::new(gray, gray, gray, 255)
}

/// Encodes the luma of `color` into an `bits`-wide sample, rounding to the nearest level.
#[inline]
pub fn encode(color: Color8888, bits: u32) -> u32 {
    let max = (1u32 << bits) - 1;
    (color.luminance() as u32 * max + 127) / 255
}
