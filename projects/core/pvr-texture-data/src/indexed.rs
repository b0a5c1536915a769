//! Palette indices in square twiddled order.

use crate::error::{DataCodecError, DataCodecResult};
use alloc::vec;
use alloc::vec::Vec;
use pvr_texture_common::palette::Palette;
use pvr_texture_common::pixel_format::PixelFormat;
use pvr_texture_common::twiddle::twiddled_index;

/// Resolves a twiddled `size x size` index level against `palette`.
pub(crate) fn decode(
    source: &[u8],
    size: usize,
    index_format: PixelFormat,
    palette: &Palette,
) -> Vec<u8> {
    let mut rgba = vec![0u8; size * size * 4];
    for y in 0..size {
        for x in 0..size {
            let index = index_format.read_index(source, twiddled_index(x, y, size));
            palette
                .get(index as usize)
                .write_rgba_slice(&mut rgba, y * size + x);
        }
    }
    rgba
}

/// Stores row-major `indices` (one byte each) of a `size x size` level in twiddled order.
pub(crate) fn encode(
    indices: &[u8],
    size: usize,
    index_format: PixelFormat,
) -> DataCodecResult<Vec<u8>> {
    let max = (index_format.palette_entries() - 1) as u8;
    let mut dest = vec![0u8; index_format.byte_len(size * size)];
    for y in 0..size {
        for x in 0..size {
            let index = indices[y * size + x];
            if index > max {
                return Err(DataCodecError::IndexOutOfRange { index, max });
            }
            index_format.write_index(&mut dest, twiddled_index(x, y, size), index);
        }
    }
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvr_texture_common::color_8888::Color8888;

    #[test]
    fn index4_rejects_wide_indices() {
        let indices = [0u8, 1, 2, 16];
        assert_eq!(
            encode(&indices, 2, PixelFormat::Index4),
            Err(DataCodecError::IndexOutOfRange { index: 16, max: 15 })
        );
    }

    #[test]
    fn index4_packs_twiddled_nibbles() {
        let indices = [1u8, 2, 3, 4];
        let stored = encode(&indices, 2, PixelFormat::Index4).unwrap();
        // Stored order (0,0) (0,1) (1,0) (1,1) = 1, 3, 2, 4
        assert_eq!(stored, vec![0x31, 0x42]);

        let palette = Palette::new(
            (0..16u8)
                .map(|v| Color8888::new(v, v, v, 255))
                .collect(),
        );
        let rgba = decode(&stored, 2, PixelFormat::Index4, &palette);
        assert_eq!(&rgba[0..4], &[1, 1, 1, 255]);
        assert_eq!(&rgba[4..8], &[2, 2, 2, 255]);
        assert_eq!(&rgba[8..12], &[3, 3, 3, 255]);
        assert_eq!(&rgba[12..16], &[4, 4, 4, 255]);
    }
}
