//! Single level conversion for any [`DataFormat`].

use crate::data_format::{DataFormat, DataLayout};
use crate::error::{DataCodecError, DataCodecResult};
use crate::vq::{self, VqCodebook};
use crate::{indexed, raster, twiddled};
use alloc::vec::Vec;
use pvr_texture_common::palette::Palette;
use pvr_texture_common::pixel_format::PixelFormat;

/// Input for encoding a single level. Which variant applies depends on the [`DataLayout`].
#[derive(Debug, Clone, Copy)]
pub enum LevelSource<'a> {
    /// Row-major RGBA8888, for raster and twiddled layouts.
    Rgba(&'a [u8]),
    /// Row-major palette indices, one byte per pixel, for indexed layouts.
    Indices(&'a [u8]),
    /// Row-major RGBA8888 matched against a codebook, for VQ layouts.
    Vq {
        rgba: &'a [u8],
        codebook: &'a VqCodebook,
    },
}

/// Level palette passed to [`DataCodec::decode`].
#[derive(Debug, Clone, Copy)]
pub enum LevelPalette<'a> {
    /// Palette for indexed layouts.
    Colors(&'a Palette),
    /// Codebook for VQ layouts.
    Codebook(&'a VqCodebook),
}

/// Converts levels of one [`DataFormat`] stored with one [`PixelFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCodec {
    data_format: DataFormat,
    pixel_format: PixelFormat,
}

impl DataCodec {
    pub fn new(data_format: DataFormat, pixel_format: PixelFormat) -> Self {
        Self {
            data_format,
            pixel_format,
        }
    }

    #[inline]
    pub fn data_format(&self) -> DataFormat {
        self.data_format
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Stored size of a level of `width x height` pixels, in bytes.
    pub fn level_size(&self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self.data_format.layout() {
            DataLayout::Raster | DataLayout::Twiddled => self.pixel_format.byte_len(pixels),
            DataLayout::Indexed(index_format) => index_format.byte_len(pixels),
            DataLayout::Vq => {
                vq::grid_size(width as usize) * vq::grid_size(height as usize)
            }
        }
    }

    /// Stored size of the payload palette (or codebook), in bytes; zero when external or absent.
    pub fn internal_palette_size(&self, width: u32) -> usize {
        if !self.data_format.has_internal_palette() {
            return 0;
        }
        self.pixel_format
            .byte_len(self.data_format.palette_entries(width))
    }

    /// Stored size of the zeroed padding before the mipmap chain, in bytes.
    #[inline]
    pub fn head_padding_size(&self) -> usize {
        if !self.data_format.has_mipmaps() {
            return 0;
        }
        self.data_format.padding().units() * self.pixel_format.unit_size()
    }

    /// Checks the dimension rules of the data format.
    ///
    /// # Errors
    ///
    /// [`DataCodecError::InvalidDimensions`] for zero dimensions, or dimensions that are not
    /// an equal power of two when the layout requires it.
    pub fn validate_dimensions(&self, width: u32, height: u32) -> DataCodecResult<()> {
        let square = width == height && width.is_power_of_two();
        let needs_square = self.data_format.requires_square_power_of_two();
        if width == 0 || height == 0 || (needs_square && !square) {
            return Err(DataCodecError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Decodes one level from the start of `source` to row-major RGBA8888.
    ///
    /// # Errors
    ///
    /// - [`DataCodecError::MissingPalette`] for indexed or VQ layouts without `palette`.
    /// - [`DataCodecError::InputTooShort`] if `source` is shorter than [`Self::level_size`].
    /// - [`DataCodecError::UnsupportedPixelFormat`] if the pixel format cannot be decoded.
    pub fn decode(
        &self,
        source: &[u8],
        width: u32,
        height: u32,
        palette: Option<LevelPalette<'_>>,
    ) -> DataCodecResult<Vec<u8>> {
        self.validate_dimensions(width, height)?;
        let required = self.level_size(width, height);
        if source.len() < required {
            return Err(DataCodecError::InputTooShort {
                required,
                actual: source.len(),
            });
        }

        let size = width as usize;
        match (self.data_format.layout(), palette) {
            (DataLayout::Indexed(index_format), Some(LevelPalette::Colors(palette))) => {
                Ok(indexed::decode(source, size, index_format, palette))
            }
            (DataLayout::Vq, Some(LevelPalette::Codebook(codebook))) => {
                Ok(vq::decode(source, size, codebook))
            }
            (DataLayout::Indexed(_) | DataLayout::Vq, _) => Err(DataCodecError::MissingPalette),
            (layout, _) => {
                if !self.pixel_format.can_decode() {
                    return Err(DataCodecError::UnsupportedPixelFormat(self.pixel_format));
                }
                Ok(match layout {
                    DataLayout::Twiddled => twiddled::decode(source, size, self.pixel_format),
                    _ => raster::decode(
                        source,
                        width as usize * height as usize,
                        self.pixel_format,
                    ),
                })
            }
        }
    }

    /// Encodes one level.
    ///
    /// # Errors
    ///
    /// - [`DataCodecError::LayoutMismatch`] if `source` does not suit the layout.
    /// - [`DataCodecError::InputLengthMismatch`] if `source` does not cover `width x height`.
    /// - [`DataCodecError::UnsupportedPixelFormat`] if the pixel format cannot be encoded.
    /// - [`DataCodecError::IndexOutOfRange`] for indices the index format cannot hold.
    pub fn encode(
        &self,
        source: LevelSource<'_>,
        width: u32,
        height: u32,
    ) -> DataCodecResult<Vec<u8>> {
        self.validate_dimensions(width, height)?;
        let pixels = width as usize * height as usize;
        let size = width as usize;

        match (self.data_format.layout(), source) {
            (DataLayout::Indexed(index_format), LevelSource::Indices(indices)) => {
                check_len(pixels, indices.len())?;
                indexed::encode(indices, size, index_format)
            }
            (DataLayout::Vq, LevelSource::Vq { rgba, codebook }) => {
                check_len(pixels * 4, rgba.len())?;
                Ok(vq::encode(rgba, size, codebook))
            }
            (layout @ (DataLayout::Raster | DataLayout::Twiddled), LevelSource::Rgba(rgba)) => {
                check_len(pixels * 4, rgba.len())?;
                if !self.pixel_format.can_encode() {
                    return Err(DataCodecError::UnsupportedPixelFormat(self.pixel_format));
                }
                Ok(match layout {
                    DataLayout::Twiddled => twiddled::encode(rgba, size, self.pixel_format),
                    _ => raster::encode(rgba, self.pixel_format),
                })
            }
            _ => Err(DataCodecError::LayoutMismatch),
        }
    }
}

#[inline]
fn check_len(expected: usize, actual: usize) -> DataCodecResult<()> {
    if expected != actual {
        return Err(DataCodecError::InputLengthMismatch { expected, actual });
    }
    Ok(())
}
