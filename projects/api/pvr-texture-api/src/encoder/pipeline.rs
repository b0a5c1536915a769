//! Turns a source image into container bytes.

use super::EncoderConfig;
use crate::container::{headers_len, write_headers, PvrtHeader};
use crate::error::{TextureError, TextureResult};
use crate::quantize::Quantizer;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use pvr_texture_common::palette::{encode_palette, Palette};
use pvr_texture_data::data_format::DataLayout;
use pvr_texture_data::vq::{self, VqCodebook};
use pvr_texture_data::{DataCodec, LevelSource, LevelSpan, TextureLayout};
use tracing::{debug, trace};

#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

/// Output of a successful encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EncodedTexture {
    pub container: Vec<u8>,
    pub external_palette: Option<Vec<u8>>,
}

/// Level images, largest first. Level 0 borrows the source.
struct LevelImages<'a> {
    source: &'a RgbaImage,
    mipmaps: Vec<RgbaImage>,
}

impl<'a> LevelImages<'a> {
    fn new(source: &'a RgbaImage, layout: &TextureLayout) -> Self {
        let mipmaps = layout.levels()[1..]
            .iter()
            .map(|span| {
                imageops::resize(source, span.width, span.height, FilterType::Lanczos3)
            })
            .collect();
        Self { source, mipmaps }
    }

    fn get(&self, level: usize) -> &RgbaImage {
        match level {
            0 => self.source,
            _ => &self.mipmaps[level - 1],
        }
    }

    fn iter(&self) -> impl Iterator<Item = &RgbaImage> {
        core::iter::once(self.source).chain(self.mipmaps.iter())
    }
}

/// Per level encoder input, plus the palette bytes when the format has one.
enum Prepared {
    Rgba,
    Indexed {
        palette: Palette,
        indices: Vec<Vec<u8>>,
    },
    Vq {
        codebook: VqCodebook,
    },
}

fn prepare<Q: Quantizer>(
    config: &EncoderConfig,
    images: &LevelImages<'_>,
    quantizer: &Q,
) -> Prepared {
    let width = config.width;
    match config.data_format.layout() {
        DataLayout::Raster | DataLayout::Twiddled => Prepared::Rgba,
        DataLayout::Indexed(_) => {
            let max_colors = config.data_format.palette_entries(width);
            let main = images.get(0);
            let exact = quantizer.try_build_exact_palette(main, max_colors);
            let (palette, main_indices) = match exact {
                Some(palette) => {
                    debug!(colors = palette.len(), "Using exact palette");
                    let indices = quantizer.quantize_with_existing_palette(main, &palette);
                    (palette, indices)
                }
                None => {
                    debug!(max_colors, "Too many colors, quantizing");
                    quantizer.build_approximate_palette_and_quantize(main, max_colors)
                }
            };

            let mut indices = vec![main_indices];
            indices.extend(
                images
                    .iter()
                    .skip(1)
                    .map(|image| quantizer.quantize_with_existing_palette(image, &palette)),
            );
            Prepared::Indexed { palette, indices }
        }
        DataLayout::Vq => {
            let max_entries = config.data_format.codebook_entries(width);
            let blocks = images
                .iter()
                .flat_map(|image| vq::blocks(image.as_raw(), image.width() as usize));
            let codebook = VqCodebook::build(blocks, max_entries);
            debug!(entries = codebook.len(), max_entries, "Built VQ codebook");
            Prepared::Vq { codebook }
        }
    }
}

fn level_source<'a>(
    prepared: &'a Prepared,
    images: &'a LevelImages<'_>,
    level: usize,
) -> LevelSource<'a> {
    match prepared {
        Prepared::Rgba => LevelSource::Rgba(images.get(level).as_raw()),
        Prepared::Indexed { indices, .. } => LevelSource::Indices(&indices[level]),
        Prepared::Vq { codebook } => LevelSource::Vq {
            rgba: images.get(level).as_raw(),
            codebook,
        },
    }
}

fn encode_level(
    codec: &DataCodec,
    source: LevelSource<'_>,
    span: &LevelSpan,
) -> TextureResult<Vec<u8>> {
    trace!(width = span.width, height = span.height, "Encoding level");
    Ok(codec.encode(source, span.width, span.height)?)
}

#[cfg(feature = "multithreaded")]
fn encode_levels(
    codec: &DataCodec,
    sources: &[LevelSource<'_>],
    spans: &[LevelSpan],
) -> TextureResult<Vec<Vec<u8>>> {
    // Collecting into a Vec keeps level order regardless of completion order.
    sources
        .par_iter()
        .zip(spans.par_iter())
        .map(|(source, span)| encode_level(codec, *source, span))
        .collect()
}

#[cfg(not(feature = "multithreaded"))]
fn encode_levels(
    codec: &DataCodec,
    sources: &[LevelSource<'_>],
    spans: &[LevelSpan],
) -> TextureResult<Vec<Vec<u8>>> {
    sources
        .iter()
        .zip(spans)
        .map(|(source, span)| encode_level(codec, *source, span))
        .collect()
}

/// Uncompressed payload length of `config`, provided every container length field can hold it.
///
/// # Errors
///
/// [`TextureError::InvalidDimensions`] if the payload plus headers exceed [`u32::MAX`].
pub(crate) fn checked_payload_len(config: &EncoderConfig) -> TextureResult<u32> {
    let codec = DataCodec::new(config.data_format, config.pixel_format);
    let payload_len = TextureLayout::new(&codec, config.width, config.height).payload_len();
    let compressed = config.compression != crate::CompressionFormat::None;
    payload_len
        .checked_add(headers_len(config.global_index.is_some(), compressed))
        .and_then(|total| u32::try_from(total).ok())
        .and_then(|_| u32::try_from(payload_len).ok())
        .ok_or(TextureError::InvalidDimensions {
            width: config.width,
            height: config.height,
            reason: "encoded payload does not fit the 32-bit length fields",
        })
}

/// Runs the whole encode: levels, palette, payload assembly, compression and headers.
pub(crate) fn encode_texture<Q: Quantizer>(
    config: &EncoderConfig,
    source: &RgbaImage,
    quantizer: &Q,
) -> TextureResult<EncodedTexture> {
    let codec = DataCodec::new(config.data_format, config.pixel_format);
    let layout = TextureLayout::new(&codec, config.width, config.height);
    let images = LevelImages::new(source, &layout);
    let prepared = prepare(config, &images, quantizer);

    let palette_bytes = match &prepared {
        Prepared::Rgba => None,
        Prepared::Indexed { palette, .. } => {
            let entries = config.data_format.palette_entries(config.width);
            let palette = palette.clone().resized(entries);
            Some(encode_palette(&palette, config.pixel_format)?)
        }
        Prepared::Vq { codebook } => {
            let slots = config.data_format.palette_entries(config.width);
            let palette = codebook.to_palette(slots);
            Some(encode_palette(&palette, config.pixel_format)?)
        }
    };

    let sources: Vec<LevelSource<'_>> = (0..layout.levels().len())
        .map(|level| level_source(&prepared, &images, level))
        .collect();
    let levels = encode_levels(&codec, &sources, layout.levels())?;

    let mut payload = vec![0u8; layout.payload_len()];
    if let (Some(range), Some(bytes)) = (layout.palette_range(), palette_bytes.as_ref()) {
        payload[range].copy_from_slice(bytes);
    }
    for (span, level) in layout.levels().iter().zip(&levels) {
        payload[span.range()].copy_from_slice(level);
    }

    let header = PvrtHeader {
        pixel_format: config.pixel_format.code(),
        data_format: config.data_format.code(),
        width: config.width as u16,
        height: config.height as u16,
        payload_len: checked_payload_len(config)?,
    };
    let compressed = config.compression != crate::CompressionFormat::None;
    let mut container = write_headers(config.global_index, &header, compressed);
    let body = config.compression.compress(payload, config.pixel_format);
    container.extend_from_slice(&body);

    debug!(
        payload_len = header.payload_len,
        container_len = container.len(),
        levels = layout.levels().len(),
        "Encoded texture"
    );

    let external_palette = if config.data_format.needs_external_palette() {
        palette_bytes
    } else {
        None
    };

    Ok(EncodedTexture {
        container,
        external_palette,
    })
}
