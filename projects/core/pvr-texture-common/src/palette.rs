//! Color lookup tables and their serialized form.
//!
//! A palette is a list of [`Color8888`] entries. On disk each entry is stored with the
//! texture's pixel format, back to back; the entry count is implied by the data format,
//! so it is never written.

use crate::color_8888::Color8888;
use crate::pixel_format::PixelFormat;
use alloc::vec;
use alloc::vec::Vec;
use thiserror::Error;

/// Errors raised while serializing or deserializing a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The palette stream holds fewer bytes than the entry count requires.
    #[error("Palette data too short: {required} bytes required, {actual} available")]
    InsufficientData { required: usize, actual: usize },

    /// The pixel format cannot store colors.
    #[error("Pixel format {0:?} cannot store palette entries")]
    UnsupportedPixelFormat(PixelFormat),
}

/// An ordered list of palette colors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Color8888>,
}

impl Palette {
    pub fn new(colors: Vec<Color8888>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color8888] {
        &self.colors
    }

    /// Looks up an entry; indices past the end resolve to [`Color8888::TRANSPARENT`].
    #[inline]
    pub fn get(&self, index: usize) -> Color8888 {
        self.colors
            .get(index)
            .copied()
            .unwrap_or(Color8888::TRANSPARENT)
    }

    /// Pads with [`Color8888::TRANSPARENT`] (or truncates) to exactly `entries` colors.
    pub fn resized(mut self, entries: usize) -> Self {
        self.colors.resize(entries, Color8888::TRANSPARENT);
        self
    }

    /// Index of the entry closest to `color` by squared RGBA distance.
    /// Ties resolve to the lowest index.
    pub fn nearest_index(&self, color: Color8888) -> usize {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (x, entry) in self.colors.iter().enumerate() {
            let distance = entry.distance_squared(&color);
            if distance < best_distance {
                best = x;
                best_distance = distance;
                if distance == 0 {
                    break;
                }
            }
        }
        best
    }
}

/// Serializes every entry of `palette` using `pixel_format`.
///
/// # Errors
///
/// [`PaletteError::UnsupportedPixelFormat`] if `pixel_format` cannot encode colors.
pub fn encode_palette(
    palette: &Palette,
    pixel_format: PixelFormat,
) -> Result<Vec<u8>, PaletteError> {
    if !pixel_format.can_encode() {
        return Err(PaletteError::UnsupportedPixelFormat(pixel_format));
    }

    let mut bytes = vec![0u8; pixel_format.byte_len(palette.len())];
    for (x, color) in palette.colors().iter().enumerate() {
        pixel_format.encode_pixel(*color, &mut bytes, x);
    }
    Ok(bytes)
}

/// Deserializes `count` entries from the start of `source`.
///
/// # Errors
///
/// - [`PaletteError::UnsupportedPixelFormat`] if `pixel_format` cannot decode colors.
/// - [`PaletteError::InsufficientData`] if `source` is too short.
pub fn decode_palette(
    source: &[u8],
    count: usize,
    pixel_format: PixelFormat,
) -> Result<Palette, PaletteError> {
    if !pixel_format.can_decode() {
        return Err(PaletteError::UnsupportedPixelFormat(pixel_format));
    }

    let required = pixel_format.byte_len(count);
    if source.len() < required {
        return Err(PaletteError::InsufficientData {
            required,
            actual: source.len(),
        });
    }

    let colors = (0..count)
        .map(|x| pixel_format.decode_pixel(source, x))
        .collect();
    Ok(Palette::new(colors))
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    fn primaries() -> Palette {
        Palette::new(vec![
            Color8888::new(255, 0, 0, 255),
            Color8888::new(0, 255, 0, 255),
            Color8888::new(0, 0, 255, 255),
        ])
    }

    #[rstest]
    #[case(PixelFormat::Argb1555)]
    #[case(PixelFormat::Rgb565)]
    #[case(PixelFormat::Argb4444)]
    fn primaries_survive_serialization(#[case] format: PixelFormat) {
        let palette = primaries();
        let bytes = encode_palette(&palette, format).unwrap();
        assert_eq!(bytes.len(), 6);
        assert_eq!(decode_palette(&bytes, 3, format).unwrap(), palette);
    }

    #[test]
    fn short_stream_is_reported() {
        let result = decode_palette(&[0u8; 5], 3, PixelFormat::Rgb565);
        assert_eq!(
            result,
            Err(PaletteError::InsufficientData {
                required: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn index_formats_cannot_hold_palettes() {
        assert_eq!(
            encode_palette(&primaries(), PixelFormat::Index8),
            Err(PaletteError::UnsupportedPixelFormat(PixelFormat::Index8))
        );
    }

    #[test]
    fn out_of_range_lookup_is_transparent() {
        assert_eq!(primaries().get(200), Color8888::TRANSPARENT);
    }

    #[test]
    fn nearest_index_prefers_exact_match() {
        let palette = primaries();
        assert_eq!(palette.nearest_index(Color8888::new(0, 250, 10, 255)), 1);
        assert_eq!(palette.nearest_index(Color8888::new(0, 0, 255, 255)), 2);
    }

    #[test]
    fn resized_pads_with_transparent() {
        let palette = primaries().resized(16);
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.get(15), Color8888::TRANSPARENT);
    }
}
