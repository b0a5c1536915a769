//! Texture decoding.
//!
//! A [`TextureDecoder`] parses and validates everything it can when it is created. Malformed
//! input does not produce an error at that point; instead [`TextureDecoder::load_success`]
//! returns `false` and every accessor returns a default, so many candidate files can be
//! probed cheaply.

use crate::compression::CompressionFormat;
use crate::container::{self, parse_container, ContainerInfo};
use crate::error::{TextureError, TextureResult};
use image::RgbaImage;
use pvr_texture_common::palette::{decode_palette, Palette};
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_data::data_format::DataLayout;
use pvr_texture_data::vq::VqCodebook;
use pvr_texture_data::{DataCodec, DataFormat, LevelPalette, LevelSpan, TextureLayout};
use pvr_texture_rle::RleError;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, trace};

/// One decoded level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLevel {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8888.
    pub rgba: Vec<u8>,
}

impl DecodedLevel {
    /// Converts into an [`RgbaImage`].
    pub fn into_image(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.rgba)
    }
}

/// Palette resolved for one decode call.
enum ResolvedPalette {
    Colors(Palette),
    Codebook(VqCodebook),
}

impl ResolvedPalette {
    fn as_level(&self) -> LevelPalette<'_> {
        match self {
            ResolvedPalette::Colors(palette) => LevelPalette::Colors(palette),
            ResolvedPalette::Codebook(codebook) => LevelPalette::Codebook(codebook),
        }
    }
}

/// Everything derived from a successfully parsed texture.
#[derive(Debug)]
struct LoadedTexture<'a> {
    info: ContainerInfo,
    codec: DataCodec,
    layout: TextureLayout,
    /// Uncompressed payload. Borrowed unless decompression was needed.
    payload: Cow<'a, [u8]>,
}

/// Decodes a texture container. Created with [`TextureDecoder::new`].
///
/// # Examples
///
/// ```
/// use pvr_texture_api::TextureDecoder;
///
/// let decoder = TextureDecoder::new(b"not a texture");
/// assert!(!decoder.load_success());
/// assert_eq!(decoder.width(), 0);
/// assert!(decoder.decode(None).unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct TextureDecoder<'a> {
    loaded: Result<LoadedTexture<'a>, TextureError>,
}

impl<'a> TextureDecoder<'a> {
    /// Parses `data`, borrowing it for the lifetime of the decoder.
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_cow(Cow::Borrowed(data))
    }

    fn from_cow(data: Cow<'a, [u8]>) -> Self {
        let loaded = load(data);
        match &loaded {
            Ok(texture) => debug!(
                width = texture.info.pvrt.width,
                height = texture.info.pvrt.height,
                pixel_format = ?texture.codec.pixel_format(),
                data_format = ?texture.codec.data_format(),
                compressed = texture.info.compressed,
                "Loaded texture"
            ),
            Err(error) => debug!(%error, "Failed to load texture"),
        }
        Self { loaded }
    }

    /// Cheap probe for a `GBIX` or `PVRT` magic, compressed or not.
    #[inline]
    pub fn is_texture(data: &[u8]) -> bool {
        container::is_texture(data)
    }

    /// Whether the headers and payload were valid.
    #[inline]
    pub fn load_success(&self) -> bool {
        self.loaded.is_ok()
    }

    /// Why loading failed, if it did.
    pub fn load_error(&self) -> Option<&TextureError> {
        self.loaded.as_ref().err()
    }

    #[inline]
    fn texture(&self) -> Option<&LoadedTexture<'a>> {
        self.loaded.as_ref().ok()
    }

    pub fn width(&self) -> u32 {
        self.texture().map_or(0, |texture| texture.info.pvrt.width as u32)
    }

    pub fn height(&self) -> u32 {
        self.texture().map_or(0, |texture| texture.info.pvrt.height as u32)
    }

    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.texture().map(|texture| texture.codec.pixel_format())
    }

    pub fn data_format(&self) -> Option<DataFormat> {
        self.texture().map(|texture| texture.codec.data_format())
    }

    pub fn compression_format(&self) -> CompressionFormat {
        match self.texture() {
            Some(texture) if texture.info.compressed => CompressionFormat::Rle,
            _ => CompressionFormat::None,
        }
    }

    pub fn global_index(&self) -> Option<u32> {
        self.texture().and_then(|texture| texture.info.global_index)
    }

    pub fn has_mipmaps(&self) -> bool {
        self.texture()
            .is_some_and(|texture| texture.codec.data_format().has_mipmaps())
    }

    /// Number of stored levels, main level included.
    pub fn mipmap_count(&self) -> usize {
        self.texture().map_or(0, |texture| texture.layout.levels().len())
    }

    /// Whether [`TextureDecoder::decode`] needs the companion palette stream.
    pub fn needs_external_palette(&self) -> bool {
        self.texture()
            .is_some_and(|texture| texture.codec.data_format().needs_external_palette())
    }

    /// Number of palette entries the format uses, zero for direct color formats.
    pub fn palette_entries(&self) -> usize {
        self.texture().map_or(0, |texture| {
            let data_format = texture.codec.data_format();
            match data_format.layout() {
                DataLayout::Indexed(_) | DataLayout::Vq => {
                    data_format.palette_entries(texture.info.pvrt.width as u32)
                }
                _ => 0,
            }
        })
    }

    /// Decodes the main level to row-major RGBA8888.
    ///
    /// `palette` is the companion palette stream, required only when
    /// [`TextureDecoder::needs_external_palette`] is true and ignored otherwise.
    ///
    /// Returns an empty buffer if loading failed.
    ///
    /// # Errors
    ///
    /// - [`TextureError::PaletteRequired`] if the format needs an external palette and none was
    ///   given.
    /// - [`TextureError::Palette`] if the palette stream is too short.
    pub fn decode(&self, palette: Option<&[u8]>) -> TextureResult<Vec<u8>> {
        let Some(texture) = self.texture() else {
            return Ok(Vec::new());
        };

        let resolved = texture.resolve_palette(palette)?;
        texture.decode_level(texture.layout.main_level(), resolved.as_ref())
    }

    /// Decodes every level, largest first.
    ///
    /// Returns an empty list if loading failed. Errors as [`TextureDecoder::decode`].
    pub fn decode_mipmaps(&self, palette: Option<&[u8]>) -> TextureResult<Vec<DecodedLevel>> {
        let Some(texture) = self.texture() else {
            return Ok(Vec::new());
        };

        let resolved = texture.resolve_palette(palette)?;
        texture
            .layout
            .levels()
            .iter()
            .map(|span| {
                Ok(DecodedLevel {
                    width: span.width,
                    height: span.height,
                    rgba: texture.decode_level(span, resolved.as_ref())?,
                })
            })
            .collect()
    }

    /// Decodes the main level into an [`RgbaImage`]. Empty if loading failed.
    pub fn to_image(&self, palette: Option<&[u8]>) -> TextureResult<RgbaImage> {
        let rgba = self.decode(palette)?;
        if rgba.is_empty() {
            return Ok(RgbaImage::default());
        }
        RgbaImage::from_raw(self.width(), self.height(), rgba)
            .ok_or(TextureError::InvalidHeader("decoded level does not match dimensions"))
    }
}

impl TextureDecoder<'static> {
    /// Parses an owned buffer.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self::from_cow(Cow::Owned(data))
    }

    /// Reads and parses a file. Read errors surface through [`TextureDecoder::load_error`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read(path.as_ref()) {
            Ok(data) => Self::from_vec(data),
            Err(error) => {
                debug!(
                    path = %path.as_ref().display(),
                    %error,
                    "Failed to read texture"
                );
                Self {
                    loaded: Err(error.into()),
                }
            }
        }
    }
}

impl LoadedTexture<'_> {
    fn width(&self) -> u32 {
        self.info.pvrt.width as u32
    }

    fn resolve_palette(&self, external: Option<&[u8]>) -> TextureResult<Option<ResolvedPalette>> {
        let data_format = self.codec.data_format();
        let pixel_format = self.codec.pixel_format();
        let entries = data_format.palette_entries(self.width());

        let palette = match data_format.layout() {
            DataLayout::Raster | DataLayout::Twiddled => return Ok(None),
            _ if data_format.needs_external_palette() => {
                let bytes = external.ok_or(TextureError::PaletteRequired)?;
                decode_palette(bytes, entries, pixel_format)?
            }
            _ => {
                let range = self.layout.palette_range().unwrap_or_default();
                decode_palette(&self.payload[range], entries, pixel_format)?
            }
        };

        Ok(Some(match data_format.layout() {
            DataLayout::Vq => ResolvedPalette::Codebook(VqCodebook::from_palette(&palette)),
            _ => ResolvedPalette::Colors(palette),
        }))
    }

    fn decode_level(
        &self,
        span: &LevelSpan,
        palette: Option<&ResolvedPalette>,
    ) -> TextureResult<Vec<u8>> {
        trace!(
            width = span.width,
            height = span.height,
            offset = span.offset,
            "Decoding level"
        );
        Ok(self.codec.decode(
            &self.payload[span.range()],
            span.width,
            span.height,
            palette.map(ResolvedPalette::as_level),
        )?)
    }
}

fn load(data: Cow<'_, [u8]>) -> TextureResult<LoadedTexture<'_>> {
    let info = parse_container(&data)?;
    let pixel_format = PixelFormat::from_code(info.pvrt.pixel_format)
        .ok_or(TextureError::UnknownPixelFormat(info.pvrt.pixel_format))?;
    let data_format = DataFormat::from_code(info.pvrt.data_format)
        .ok_or(TextureError::UnknownDataFormat(info.pvrt.data_format))?;
    if !pixel_format.can_decode() {
        return Err(TextureError::DecodeNotSupported(pixel_format));
    }

    let (width, height) = (info.pvrt.width as u32, info.pvrt.height as u32);
    let codec = DataCodec::new(data_format, pixel_format);
    codec
        .validate_dimensions(width, height)
        .map_err(|_| TextureError::InvalidDimensions {
            width,
            height,
            reason: "dimensions do not suit the data format",
        })?;
    let layout = TextureLayout::new(&codec, width, height);

    let payload = if info.compressed {
        let stream = &data[info.payload_offset..];
        let declared = pvr_texture_rle::decompressed_len(stream).ok_or(RleError::MissingHeader)?;
        let expected = info.pvrt.payload_len as usize;
        if declared != expected {
            return Err(TextureError::CompressedLengthMismatch { declared, expected });
        }
        Cow::Owned(CompressionFormat::Rle.decompress(stream, pixel_format)?)
    } else {
        match data {
            Cow::Borrowed(bytes) => Cow::Borrowed(&bytes[info.payload_offset..]),
            Cow::Owned(mut bytes) => {
                bytes.drain(..info.payload_offset);
                Cow::Owned(bytes)
            }
        }
    };

    if payload.len() < layout.payload_len() {
        return Err(TextureError::PayloadTooShort {
            required: layout.payload_len(),
            actual: payload.len(),
        });
    }

    Ok(LoadedTexture {
        info,
        codec,
        layout,
        payload,
    })
}
