//! Byte layout of a texture payload.
//!
//! ```text
//! [internal palette] [head padding] [mip n-1 (1x1)] ... [mip 1] [main level]
//! ```
//!
//! Mipmaps are stored smallest first and the main level always comes last. Only mipmapped
//! formats carry padding, and only formats with an internal palette carry a palette.

use crate::codec::DataCodec;
use alloc::vec::Vec;
use core::ops::Range;
use pvr_texture_common::mipmap::mipmap_sizes;

/// Position of one level within the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpan {
    pub width: u32,
    pub height: u32,
    pub offset: usize,
    pub len: usize,
}

impl LevelSpan {
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Offsets of every part of a payload, computed from the header alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureLayout {
    palette_len: usize,
    padding_len: usize,
    /// Largest first.
    levels: Vec<LevelSpan>,
    payload_len: usize,
}

impl TextureLayout {
    /// Computes the layout for a texture of `width x height`.
    ///
    /// Dimensions are expected to have passed [`DataCodec::validate_dimensions`].
    pub fn new(codec: &DataCodec, width: u32, height: u32) -> Self {
        let palette_len = codec.internal_palette_size(width);
        let padding_len = codec.head_padding_size();
        let mut offset = palette_len + padding_len;

        let sizes: Vec<(u32, u32)> = if codec.data_format().has_mipmaps() {
            mipmap_sizes(width).map(|size| (size, size)).collect()
        } else {
            alloc::vec![(width, height)]
        };

        // Walk smallest first to assign offsets, then flip to largest first.
        let mut levels: Vec<LevelSpan> = sizes
            .iter()
            .rev()
            .map(|&(width, height)| {
                let len = codec.level_size(width, height);
                let span = LevelSpan {
                    width,
                    height,
                    offset,
                    len,
                };
                offset += len;
                span
            })
            .collect();
        levels.reverse();

        Self {
            palette_len,
            padding_len,
            levels,
            payload_len: offset,
        }
    }

    /// Range of the internal palette, if the format stores one in the payload.
    pub fn palette_range(&self) -> Option<Range<usize>> {
        (self.palette_len > 0).then_some(0..self.palette_len)
    }

    #[inline]
    pub fn padding_range(&self) -> Range<usize> {
        self.palette_len..self.palette_len + self.padding_len
    }

    /// Every level, largest (main) first.
    #[inline]
    pub fn levels(&self) -> &[LevelSpan] {
        &self.levels
    }

    #[inline]
    pub fn main_level(&self) -> &LevelSpan {
        &self.levels[0]
    }

    /// Total payload size in bytes.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn plain_texture_is_a_single_level() {
        let codec = DataCodec::new(DataFormat::SquareTwiddled, PixelFormat::Rgb565);
        let layout = TextureLayout::new(&codec, 8, 8);
        assert_eq!(layout.palette_range(), None);
        assert_eq!(layout.levels().len(), 1);
        assert_eq!(layout.main_level().range(), 0..128);
        assert_eq!(layout.payload_len(), 128);
    }

    #[test]
    fn mipmaps_are_stored_smallest_first_after_padding() {
        let codec = DataCodec::new(DataFormat::SquareTwiddledMipmaps, PixelFormat::Rgb565);
        let layout = TextureLayout::new(&codec, 4, 4);
        assert_eq!(layout.padding_range(), 0..2);

        let spans: Vec<(u32, usize, usize)> = layout
            .levels()
            .iter()
            .map(|level| (level.width, level.offset, level.len))
            .collect();
        assert_eq!(spans, vec![(4, 12, 32), (2, 4, 8), (1, 2, 2)]);
        assert_eq!(layout.payload_len(), 44);
    }

    #[test]
    fn alternate_mipmaps_use_three_units_of_padding() {
        let codec = DataCodec::new(DataFormat::SquareTwiddledMipmapsAlt, PixelFormat::Argb4444);
        let layout = TextureLayout::new(&codec, 2, 2);
        assert_eq!(layout.padding_range(), 0..6);
        assert_eq!(layout.levels()[1].offset, 6);
    }

    #[test]
    fn vq_mipmaps_follow_the_codebook() {
        let codec = DataCodec::new(DataFormat::SmallVqMipmaps, PixelFormat::Rgb565);
        let layout = TextureLayout::new(&codec, 16, 16);
        assert_eq!(layout.palette_range(), Some(0..128));
        assert_eq!(layout.padding_range(), 128..128);

        // 1x1, 2x2 -> one index each, then 4, 16, 64.
        let lens: Vec<usize> = layout.levels().iter().rev().map(|l| l.len).collect();
        assert_eq!(lens, vec![1, 1, 4, 16, 64]);
        assert_eq!(layout.levels()[4].offset, 128);
        assert_eq!(layout.payload_len(), 128 + 86);
    }

    #[test]
    fn external_palette_is_not_in_payload() {
        let codec = DataCodec::new(DataFormat::Index8Mipmaps, PixelFormat::Argb1555);
        let layout = TextureLayout::new(&codec, 4, 4);
        assert_eq!(layout.palette_range(), None);
        assert_eq!(layout.payload_len(), 16 + 4 + 1);
    }
}
