//! Texture encoding.
//!
//! Configuration happens on [`TextureEncoderBuilder`]; every format and dimension problem is
//! reported by [`TextureEncoderBuilder::build`]. The resulting [`TextureEncoder`] encodes
//! lazily on first use and caches the result, so saving the texture and its palette separately
//! does not encode twice.

mod pipeline;

use crate::compression::CompressionFormat;
use crate::error::{TextureError, TextureResult};
use crate::quantize::{MedianCutQuantizer, Quantizer};
use image::RgbaImage;
use pipeline::{checked_payload_len, encode_texture, EncodedTexture};
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_data::DataFormat;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Validated encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EncoderConfig {
    pub pixel_format: PixelFormat,
    pub data_format: DataFormat,
    pub compression: CompressionFormat,
    pub global_index: Option<u32>,
    pub width: u32,
    pub height: u32,
}

/// Builder for [`TextureEncoder`].
///
/// # Examples
///
/// ```
/// use pvr_texture_api::{DataFormat, PixelFormat, TextureEncoderBuilder};
///
/// let image = image::RgbaImage::new(8, 8);
/// let mut encoder = TextureEncoderBuilder::new(PixelFormat::Rgb565, DataFormat::SquareTwiddled)
///     .global_index(3)
///     .build(image)
///     .unwrap();
///
/// let bytes = encoder.encode().unwrap();
/// assert_eq!(&bytes[0..4], b"GBIX");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureEncoderBuilder {
    pixel_format: PixelFormat,
    data_format: DataFormat,
    compression: CompressionFormat,
    global_index: Option<u32>,
}

impl TextureEncoderBuilder {
    pub fn new(pixel_format: PixelFormat, data_format: DataFormat) -> Self {
        Self {
            pixel_format,
            data_format,
            compression: CompressionFormat::None,
            global_index: None,
        }
    }

    /// Creates a builder from raw container codes.
    ///
    /// # Errors
    ///
    /// [`TextureError::UnknownPixelFormat`] / [`TextureError::UnknownDataFormat`] for codes
    /// outside the known sets.
    pub fn from_codes(pixel_format: u8, data_format: u8) -> TextureResult<Self> {
        let pixel = PixelFormat::from_code(pixel_format)
            .ok_or(TextureError::UnknownPixelFormat(pixel_format))?;
        let data =
            DataFormat::from_code(data_format).ok_or(TextureError::UnknownDataFormat(data_format))?;
        Ok(Self::new(pixel, data))
    }

    /// Sets the compression applied to the payload.
    pub fn compression(mut self, compression: CompressionFormat) -> Self {
        self.compression = compression;
        self
    }

    /// Writes a `GBIX` chunk with this global index.
    pub fn global_index(mut self, global_index: u32) -> Self {
        self.global_index = Some(global_index);
        self
    }

    fn config(&self, width: u32, height: u32) -> EncoderConfig {
        EncoderConfig {
            pixel_format: self.pixel_format,
            data_format: self.data_format,
            compression: self.compression,
            global_index: self.global_index,
            width,
            height,
        }
    }

    /// Validates the configuration against `image` using the default quantizer.
    ///
    /// # Errors
    ///
    /// See [`TextureEncoderBuilder::build_with_quantizer`].
    pub fn build(self, image: RgbaImage) -> TextureResult<TextureEncoder> {
        self.build_with_quantizer(image, MedianCutQuantizer)
    }

    /// Validates the configuration against `image`.
    ///
    /// # Errors
    ///
    /// - [`TextureError::EncodeNotSupported`] if the pixel format cannot be encoded.
    /// - [`TextureError::InvalidDimensions`] if the image is empty, larger than 65535 pixels on
    ///   a side, not an equal power of two where the data format requires it, or too large
    ///   for the container's 32-bit length fields.
    pub fn build_with_quantizer<Q: Quantizer>(
        self,
        image: RgbaImage,
        quantizer: Q,
    ) -> TextureResult<TextureEncoder<Q>> {
        let (width, height) = image.dimensions();

        if !self.pixel_format.can_encode() {
            return Err(TextureError::EncodeNotSupported(self.pixel_format));
        }
        if width == 0 || height == 0 || width > u16::MAX as u32 || height > u16::MAX as u32 {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                reason: "dimensions must be between 1 and 65535",
            });
        }
        if self.data_format.requires_square_power_of_two()
            && (width != height || !width.is_power_of_two())
        {
            return Err(TextureError::InvalidDimensions {
                width,
                height,
                reason: "this data format requires equal power of two dimensions",
            });
        }

        let config = self.config(width, height);
        checked_payload_len(&config)?;

        debug!(
            pixel_format = ?self.pixel_format,
            data_format = ?self.data_format,
            compression = ?self.compression,
            width,
            height,
            "Configured texture encoder"
        );

        Ok(TextureEncoder {
            config,
            source: image,
            quantizer,
            status: EncoderStatus::Configured,
            encoded: None,
        })
    }
}

/// Lifecycle of a [`TextureEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderStatus {
    /// Validated, nothing encoded yet.
    Configured,
    /// Encoded and cached.
    Encoded,
    /// Written out at least once.
    Saved,
}

/// A configured texture encoder. Created by [`TextureEncoderBuilder`].
#[derive(Debug)]
pub struct TextureEncoder<Q: Quantizer = MedianCutQuantizer> {
    config: EncoderConfig,
    source: RgbaImage,
    quantizer: Q,
    status: EncoderStatus,
    encoded: Option<EncodedTexture>,
}

impl<Q: Quantizer> TextureEncoder<Q> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.config.height
    }

    #[inline]
    pub fn pixel_format(&self) -> PixelFormat {
        self.config.pixel_format
    }

    #[inline]
    pub fn data_format(&self) -> DataFormat {
        self.config.data_format
    }

    #[inline]
    pub fn compression(&self) -> CompressionFormat {
        self.config.compression
    }

    #[inline]
    pub fn global_index(&self) -> Option<u32> {
        self.config.global_index
    }

    /// Whether [`TextureEncoder::save_palette`] has a palette to write.
    #[inline]
    pub fn needs_external_palette(&self) -> bool {
        self.config.data_format.needs_external_palette()
    }

    #[inline]
    pub fn status(&self) -> EncoderStatus {
        self.status
    }

    fn encoded(&mut self) -> TextureResult<&EncodedTexture> {
        let encoded = match self.encoded.take() {
            Some(encoded) => encoded,
            None => encode_texture(&self.config, &self.source, &self.quantizer)?,
        };
        if self.status == EncoderStatus::Configured {
            self.status = EncoderStatus::Encoded;
        }
        Ok(self.encoded.insert(encoded))
    }

    fn mark_saved(&mut self) {
        self.status = EncoderStatus::Saved;
    }

    /// Returns the container bytes, encoding on first call.
    ///
    /// # Errors
    ///
    /// Propagates failures of the data or palette codecs.
    pub fn encode(&mut self) -> TextureResult<&[u8]> {
        Ok(&self.encoded()?.container)
    }

    /// Returns the companion palette stream for formats that store their palette externally.
    ///
    /// # Errors
    ///
    /// [`TextureError::NoExternalPalette`] if the data format keeps its palette internally
    /// or has none.
    pub fn palette(&mut self) -> TextureResult<&[u8]> {
        if !self.needs_external_palette() {
            return Err(TextureError::NoExternalPalette);
        }
        self.encoded()?
            .external_palette
            .as_deref()
            .ok_or(TextureError::NoExternalPalette)
    }

    /// Writes the container to `writer`.
    pub fn save<W: Write>(&mut self, writer: &mut W) -> TextureResult<()> {
        writer.write_all(&self.encoded()?.container)?;
        self.mark_saved();
        Ok(())
    }

    /// Writes the companion palette stream to `writer`.
    pub fn save_palette<W: Write>(&mut self, writer: &mut W) -> TextureResult<()> {
        writer.write_all(self.palette()?)?;
        self.mark_saved();
        Ok(())
    }

    /// Writes the container to a file, replacing it if it exists.
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> TextureResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.save(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.as_ref().display(), "Saved texture");
        Ok(())
    }

    /// Writes the companion palette stream to a file, replacing it if it exists.
    pub fn save_palette_to_file<P: AsRef<Path>>(&mut self, path: P) -> TextureResult<()> {
        // Encode before creating the file so a failure leaves nothing behind.
        self.palette()?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.save_palette(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.as_ref().display(), "Saved palette");
        Ok(())
    }

    /// Consumes the encoder, returning the container bytes.
    pub fn into_bytes(mut self) -> TextureResult<Vec<u8>> {
        self.encoded()?;
        Ok(self.encoded.map(|encoded| encoded.container).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::{checked_payload_len, EncoderConfig};
    use crate::test_prelude::*;

    #[rstest]
    #[case(PixelFormat::Yuv422)]
    #[case(PixelFormat::Index4)]
    #[case(PixelFormat::Index8)]
    fn rejects_formats_without_encoding(#[case] pixel_format: PixelFormat) {
        let result = TextureEncoderBuilder::new(pixel_format, DataFormat::SquareTwiddled)
            .build(RgbaImage::new(8, 8));
        assert!(matches!(
            result,
            Err(TextureError::EncodeNotSupported(format)) if format == pixel_format
        ));
    }

    #[rstest]
    #[case(DataFormat::SquareTwiddled, 8, 4)]
    #[case(DataFormat::Vq, 12, 12)]
    #[case(DataFormat::Index4, 16, 8)]
    #[case(DataFormat::Rectangle, 0, 4)]
    fn rejects_invalid_dimensions(
        #[case] data_format: DataFormat,
        #[case] width: u32,
        #[case] height: u32,
    ) {
        let result = TextureEncoderBuilder::new(PixelFormat::Rgb565, data_format)
            .build(RgbaImage::new(width, height));
        assert!(matches!(result, Err(TextureError::InvalidDimensions { .. })));
    }

    #[test]
    fn rectangle_accepts_odd_dimensions() {
        let result = TextureEncoderBuilder::new(PixelFormat::Rgb565, DataFormat::Rectangle)
            .build(RgbaImage::new(3, 5));
        assert!(result.is_ok());
    }

    #[rstest]
    #[case(0x04, 0x01)]
    #[case(0x10, 0x01)]
    fn rejects_unknown_pixel_codes(#[case] pixel: u8, #[case] data: u8) {
        assert!(matches!(
            TextureEncoderBuilder::from_codes(pixel, data),
            Err(TextureError::UnknownPixelFormat(code)) if code == pixel
        ));
    }

    #[test]
    fn rejects_unknown_data_codes() {
        assert!(matches!(
            TextureEncoderBuilder::from_codes(0x01, 0x0A),
            Err(TextureError::UnknownDataFormat(0x0A))
        ));
    }

    #[test]
    fn encoding_is_cached_and_state_advances() {
        let mut encoder =
            TextureEncoderBuilder::new(PixelFormat::Argb4444, DataFormat::SquareTwiddled)
                .build(gradient_image(8, 8))
                .unwrap();
        assert_eq!(encoder.status(), EncoderStatus::Configured);

        let first = encoder.encode().unwrap().to_vec();
        assert_eq!(encoder.status(), EncoderStatus::Encoded);
        assert_eq!(encoder.encode().unwrap(), first.as_slice());

        let mut written = Vec::new();
        encoder.save(&mut written).unwrap();
        assert_eq!(encoder.status(), EncoderStatus::Saved);
        assert_eq!(written, first);
    }

    #[test]
    fn palette_only_for_external_formats() {
        let mut encoder =
            TextureEncoderBuilder::new(PixelFormat::Rgb565, DataFormat::Index4EmbeddedPalette)
                .build(gradient_image(8, 8))
                .unwrap();
        assert!(!encoder.needs_external_palette());
        assert!(matches!(encoder.palette(), Err(TextureError::NoExternalPalette)));
    }

    #[test]
    fn external_palette_has_full_entry_count() {
        let mut encoder = TextureEncoderBuilder::new(PixelFormat::Rgb565, DataFormat::Index8)
            .build(image_from_colors(2, 2, &[RED, GREEN, BLUE, RED]))
            .unwrap();
        assert_eq!(encoder.palette().unwrap().len(), 256 * 2);
    }

    #[test]
    fn into_bytes_matches_encode() {
        let builder = TextureEncoderBuilder::new(PixelFormat::Rgb565, DataFormat::Rectangle);
        let mut encoder = builder.build(gradient_image(5, 3)).unwrap();
        let encoded = encoder.encode().unwrap().to_vec();
        let bytes = builder.build(gradient_image(5, 3)).unwrap().into_bytes().unwrap();
        assert_eq!(bytes, encoded);
    }

    // 65535 x 32768 at 2 bytes per pixel is 4_294_901_760 bytes, leaving room for headers.
    #[rstest]
    #[case(32768, None, CompressionFormat::None, true)]
    #[case(32768, Some(1), CompressionFormat::Rle, true)]
    #[case(32769, None, CompressionFormat::None, false)]
    #[case(65535, None, CompressionFormat::None, false)]
    fn payload_must_fit_length_fields(
        #[case] height: u32,
        #[case] global_index: Option<u32>,
        #[case] compression: CompressionFormat,
        #[case] fits: bool,
    ) {
        let config = EncoderConfig {
            pixel_format: PixelFormat::Rgb565,
            data_format: DataFormat::Rectangle,
            compression,
            global_index,
            width: 65535,
            height,
        };
        match checked_payload_len(&config) {
            Ok(len) => {
                assert!(fits);
                assert_eq!(len as u64, 65535 * height as u64 * 2);
            }
            Err(error) => {
                assert!(!fits);
                assert!(matches!(error, TextureError::InvalidDimensions { .. }));
            }
        }
    }
}
