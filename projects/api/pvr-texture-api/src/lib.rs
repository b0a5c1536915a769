#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod compression;
pub mod container;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod quantize;

pub use compression::CompressionFormat;
pub use decoder::{DecodedLevel, TextureDecoder};
pub use encoder::{EncoderStatus, TextureEncoder, TextureEncoderBuilder};
pub use error::{TextureError, TextureResult};
pub use quantize::{MedianCutQuantizer, Quantizer};

// Formats and palettes from the core crates.
pub use pvr_texture_common::color_8888::Color8888;
pub use pvr_texture_common::palette::Palette;
pub use pvr_texture_common::pixel_format::PixelFormat;
pub use pvr_texture_data::DataFormat;

#[cfg(test)]
pub mod test_prelude;
