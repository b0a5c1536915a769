//! Per-pixel conversion between packed [`PixelFormat`] storage and [`Color8888`].
//!
//! Pixels are addressed by pixel index rather than byte offset, so 4-bit formats address
//! nibbles: pixel `2n` is the low nibble of byte `n`, pixel `2n + 1` the high nibble.

pub mod argb1555;
pub mod argb4444;
pub mod intensity;
pub mod rgb565;
pub mod yuv422;

use crate::color_8888::Color8888;
use crate::pixel_format::PixelFormat;
use argb1555::Argb1555;
use argb4444::Argb4444;
use rgb565::Rgb565;

/// Reads a raw sample of `bits` (4, 8 or 16) bits for pixel `index`.
///
/// # Panics
///
/// If `source` is too short to contain the pixel.
#[inline]
pub fn read_sample(source: &[u8], index: usize, bits: u32) -> u32 {
    match bits {
        4 => {
            let byte = source[index / 2];
            if index % 2 == 0 {
                (byte & 0x0F) as u32
            } else {
                (byte >> 4) as u32
            }
        }
        8 => source[index] as u32,
        _ => u16::from_le_bytes([source[index * 2], source[index * 2 + 1]]) as u32,
    }
}

/// Writes a raw sample of `bits` (4, 8 or 16) bits for pixel `index`.
/// For 4-bit samples the other nibble of the byte is preserved.
#[inline]
pub fn write_sample(dest: &mut [u8], index: usize, bits: u32, value: u32) {
    match bits {
        4 => {
            let byte = &mut dest[index / 2];
            let nibble = (value & 0x0F) as u8;
            if index % 2 == 0 {
                *byte = (*byte & 0xF0) | nibble;
            } else {
                *byte = (*byte & 0x0F) | (nibble << 4);
            }
        }
        8 => dest[index] = value as u8,
        _ => dest[index * 2..index * 2 + 2].copy_from_slice(&(value as u16).to_le_bytes()),
    }
}

impl PixelFormat {
    /// Decodes pixel `index` of `source` to RGBA.
    ///
    /// Formats without [`PixelFormat::can_decode`] yield [`Color8888::TRANSPARENT`].
    #[inline]
    pub fn decode_pixel(self, source: &[u8], index: usize) -> Color8888 {
        match self {
            PixelFormat::Argb1555 => {
                Argb1555::from_raw(read_sample(source, index, 16) as u16).to_color_8888()
            }
            PixelFormat::Rgb565 => {
                Rgb565::from_raw(read_sample(source, index, 16) as u16).to_color_8888()
            }
            PixelFormat::Argb4444 => {
                Argb4444::from_raw(read_sample(source, index, 16) as u16).to_color_8888()
            }
            PixelFormat::Yuv422 => yuv422::decode_pixel(source, index),
            PixelFormat::Intensity4 => intensity::decode(read_sample(source, index, 4), 4),
            PixelFormat::Intensity8 => intensity::decode(read_sample(source, index, 8), 8),
            PixelFormat::Index4 | PixelFormat::Index8 => Color8888::TRANSPARENT,
        }
    }

    /// Encodes `color` into pixel `index` of `dest`.
    ///
    /// Formats without [`PixelFormat::can_encode`] leave `dest` untouched.
    #[inline]
    pub fn encode_pixel(self, color: Color8888, dest: &mut [u8], index: usize) {
        match self {
            PixelFormat::Argb1555 => write_sample(
                dest,
                index,
                16,
                Argb1555::from_color_8888(color).raw_value() as u32,
            ),
            PixelFormat::Rgb565 => write_sample(
                dest,
                index,
                16,
                Rgb565::from_rgb(color.r, color.g, color.b).raw_value() as u32,
            ),
            PixelFormat::Argb4444 => write_sample(
                dest,
                index,
                16,
                Argb4444::from_color_8888(color).raw_value() as u32,
            ),
            PixelFormat::Intensity4 => write_sample(dest, index, 4, intensity::encode(color, 4)),
            PixelFormat::Intensity8 => write_sample(dest, index, 8, intensity::encode(color, 8)),
            PixelFormat::Yuv422 | PixelFormat::Index4 | PixelFormat::Index8 => {}
        }
    }

    /// Reads the raw palette index of pixel `index`. Only meaningful for the index formats.
    #[inline]
    pub fn read_index(self, source: &[u8], index: usize) -> u8 {
        read_sample(source, index, self.bits_per_pixel()) as u8
    }

    /// Writes the raw palette index of pixel `index`. Only meaningful for the index formats.
    #[inline]
    pub fn write_index(self, dest: &mut [u8], index: usize, value: u8) {
        write_sample(dest, index, self.bits_per_pixel(), value as u32);
    }
}
