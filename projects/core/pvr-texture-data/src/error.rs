use pvr_texture_common::pixel_format::PixelFormat;
use thiserror::Error;

/// Errors raised while converting texture levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DataCodecError {
    /// The source holds fewer bytes than the level requires.
    #[error("Level data too short: {required} bytes required, {actual} available")]
    InputTooShort { required: usize, actual: usize },

    /// The input to an encode does not match the level dimensions.
    #[error("Level input has {actual} elements, expected {expected}")]
    InputLengthMismatch { expected: usize, actual: usize },

    /// An indexed level was decoded without a palette.
    #[error("Indexed data requires a palette to decode")]
    MissingPalette,

    /// The pixel format cannot perform the requested conversion.
    #[error("Pixel format {0:?} does not support this conversion")]
    UnsupportedPixelFormat(PixelFormat),

    /// Dimensions are zero, or not an equal power of two where the layout needs it.
    #[error("Invalid level dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encode input does not match the layout (e.g. RGBA handed to an indexed format).
    #[error("Level input does not match the data layout")]
    LayoutMismatch,

    /// A palette index exceeds what the index format can store.
    #[error("Palette index {index} exceeds maximum {max}")]
    IndexOutOfRange { index: u8, max: u8 },
}

pub type DataCodecResult<T> = Result<T, DataCodecError>;
