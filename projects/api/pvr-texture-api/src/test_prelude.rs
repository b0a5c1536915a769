//! Shared imports and fixtures for unit tests.

#![allow(unused_imports)]

pub use crate::container::*;
pub use crate::encoder::*;
pub use crate::error::*;
pub use crate::quantize::*;
pub use crate::{CompressionFormat, DecodedLevel, TextureDecoder};
pub use image::RgbaImage;
pub use pvr_texture_common::color_8888::Color8888;
pub use pvr_texture_common::palette::{Palette, PaletteError};
pub use pvr_texture_common::pixel_format::PixelFormat;
pub use pvr_texture_data::DataFormat;
pub use rstest::rstest;

pub const RED: Color8888 = Color8888::new(255, 0, 0, 255);
pub const GREEN: Color8888 = Color8888::new(0, 255, 0, 255);
pub const BLUE: Color8888 = Color8888::new(0, 0, 255, 255);

/// Builds an image from row-major colors.
pub fn image_from_colors(width: u32, height: u32, colors: &[Color8888]) -> RgbaImage {
    assert_eq!(colors.len(), (width * height) as usize);
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba(colors[(y * width + x) as usize].to_array())
    })
}

/// Opaque gradient over red and green, with blue varying along the diagonal.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 255 / width.max(2)) as u8,
            (y * 255 / height.max(2)) as u8,
            ((x + y) % 256) as u8,
            255,
        ])
    })
}
