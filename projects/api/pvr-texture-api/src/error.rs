//! Error types for the texture encoder and decoder.

use pvr_texture_common::palette::PaletteError;
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_data::DataCodecError;
use pvr_texture_rle::RleError;
use thiserror::Error;

/// Errors raised while configuring, encoding or decoding a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The pixel format code is not one of the known formats.
    #[error("Unknown pixel format code {0:#04X}")]
    UnknownPixelFormat(u8),

    /// The data format code is not one of the known formats.
    #[error("Unknown data format code {0:#04X}")]
    UnknownDataFormat(u8),

    /// RGBA cannot be converted into the requested pixel format.
    #[error("Pixel format {0:?} does not support encoding")]
    EncodeNotSupported(PixelFormat),

    /// The stored pixel format cannot be converted to RGBA.
    #[error("Pixel format {0:?} does not support decoding")]
    DecodeNotSupported(PixelFormat),

    /// Dimensions are not valid for the data format.
    #[error("Invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// The input does not start with a `GBIX` or `PVRT` chunk.
    #[error("Data is not a PVR texture")]
    NotATexture,

    /// A chunk header is truncated or inconsistent.
    #[error("Invalid texture header: {0}")]
    InvalidHeader(&'static str),

    /// The payload is shorter than the header implies.
    #[error("Texture payload too short: {required} bytes required, {actual} available")]
    PayloadTooShort { required: usize, actual: usize },

    /// The run-length stream declares a different length than the `PVRT` header.
    #[error("Compressed stream declares {declared} bytes, header declares {expected}")]
    CompressedLengthMismatch { declared: usize, expected: usize },

    /// The texture stores indices whose palette lives in a companion stream, and none was given.
    #[error("This texture requires an external palette to decode")]
    PaletteRequired,

    /// An external palette was requested from a format that does not use one.
    #[error("This data format does not use an external palette")]
    NoExternalPalette,

    #[error(transparent)]
    Palette(#[from] PaletteError),

    #[error(transparent)]
    Data(#[from] DataCodecError),

    #[error(transparent)]
    Compression(#[from] RleError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type TextureResult<T> = Result<T, TextureError>;
