//! Vector quantized layout.
//!
//! A level of `size x size` pixels is stored as a twiddled grid of one byte codebook indices,
//! one per 2x2 block. A 1x1 level still stores a single index and uses the top-left slot.

pub mod codebook;

pub use codebook::{VqBlock, VqCodebook};

use alloc::vec;
use alloc::vec::Vec;
use pvr_texture_common::color_8888::Color8888;
use pvr_texture_common::twiddle::twiddled_index;

/// Edge length of the index grid for a `size x size` level.
#[inline]
pub const fn grid_size(size: usize) -> usize {
    if size < 2 {
        1
    } else {
        size / 2
    }
}

/// Slot of pixel `(dx, dy)` inside a codebook entry.
#[inline]
const fn slot(dx: usize, dy: usize) -> usize {
    (dx << 1) | dy
}

/// Reads the 2x2 block at grid cell `(gx, gy)` of a row-major RGBA level.
pub fn block_at(rgba: &[u8], size: usize, gx: usize, gy: usize) -> VqBlock {
    if size == 1 {
        return [Color8888::from_rgba_slice(rgba, 0); 4];
    }

    let mut block = [Color8888::TRANSPARENT; 4];
    for dx in 0..2 {
        for dy in 0..2 {
            let (x, y) = (gx * 2 + dx, gy * 2 + dy);
            block[slot(dx, dy)] = Color8888::from_rgba_slice(rgba, y * size + x);
        }
    }
    block
}

/// Every 2x2 block of a row-major RGBA level, in grid raster order.
pub fn blocks(rgba: &[u8], size: usize) -> impl Iterator<Item = VqBlock> + '_ {
    let grid = grid_size(size);
    (0..grid * grid).map(move |cell| block_at(rgba, size, cell % grid, cell / grid))
}

pub(crate) fn decode(source: &[u8], size: usize, codebook: &VqCodebook) -> Vec<u8> {
    let grid = grid_size(size);
    let mut rgba = vec![0u8; size * size * 4];
    for gy in 0..grid {
        for gx in 0..grid {
            let entry = codebook.entry(source[twiddled_index(gx, gy, grid)] as usize);
            if size == 1 {
                entry[0].write_rgba_slice(&mut rgba, 0);
                continue;
            }

            for dx in 0..2 {
                for dy in 0..2 {
                    let (x, y) = (gx * 2 + dx, gy * 2 + dy);
                    entry[slot(dx, dy)].write_rgba_slice(&mut rgba, y * size + x);
                }
            }
        }
    }
    rgba
}

pub(crate) fn encode(rgba: &[u8], size: usize, codebook: &VqCodebook) -> Vec<u8> {
    let grid = grid_size(size);
    let mut dest = vec![0u8; grid * grid];
    for gy in 0..grid {
        for gx in 0..grid {
            let block = block_at(rgba, size, gx, gy);
            dest[twiddled_index(gx, gy, grid)] = codebook.nearest(&block) as u8;
        }
    }
    dest
}
