//! Square twiddle addressing.
//!
//! A twiddled `size x size` surface is split into `b x b` blocks with `b = min(8, size)`.
//! Blocks are stored in row-major order; inside a block, pixels follow a Morton (Z-order)
//! curve where bit `2i` of the position is bit `i` of `y` and bit `2i + 1` is bit `i` of `x`.

/// Maximum edge length of a twiddle block.
pub const TWIDDLE_BLOCK_SIZE: usize = 8;

const fn build_morton_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut y = 0;
    while y < TWIDDLE_BLOCK_SIZE {
        let mut x = 0;
        while x < TWIDDLE_BLOCK_SIZE {
            let mut position = 0;
            let mut bit = 0;
            while bit < 3 {
                position |= ((y >> bit) & 1) << (2 * bit);
                position |= ((x >> bit) & 1) << (2 * bit + 1);
                bit += 1;
            }
            table[y * TWIDDLE_BLOCK_SIZE + x] = position as u8;
            x += 1;
        }
        y += 1;
    }
    table
}

/// Position inside an 8x8 block for local coordinate `(x, y)`, indexed by `y * 8 + x`.
///
/// Coordinates below a smaller block edge map into the first `edge * edge` positions, so the
/// same table serves 1x1, 2x2 and 4x4 blocks.
pub static MORTON_TABLE: [u8; 64] = build_morton_table();

/// Edge length of the twiddle blocks used for a surface of `size x size`.
#[inline]
pub const fn block_size(size: usize) -> usize {
    if size < TWIDDLE_BLOCK_SIZE {
        size
    } else {
        TWIDDLE_BLOCK_SIZE
    }
}

/// Storage position of pixel `(x, y)` in a twiddled `size x size` surface.
///
/// `size` must be a power of two and `x, y < size`.
#[inline]
pub fn twiddled_index(x: usize, y: usize, size: usize) -> usize {
    let block = block_size(size);
    let blocks_per_row = size / block;
    let block_index = (y / block) * blocks_per_row + (x / block);
    let local = MORTON_TABLE[(y % block) * TWIDDLE_BLOCK_SIZE + (x % block)] as usize;
    block_index * block * block + local
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;

    #[test]
    fn morton_table_is_a_bijection() {
        let mut seen = [false; 64];
        for &position in MORTON_TABLE.iter() {
            assert!(!seen[position as usize], "position {position} repeated");
            seen[position as usize] = true;
        }
        assert!(seen.iter().all(|&x| x));
    }

    #[test]
    fn y_occupies_the_low_bit() {
        // (0,1) is the second stored pixel, (1,0) the third.
        assert_eq!(MORTON_TABLE[8], 1);
        assert_eq!(MORTON_TABLE[1], 2);
        assert_eq!(MORTON_TABLE[9], 3);
        assert_eq!(MORTON_TABLE[63], 63);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(4)]
    #[case(8)]
    #[case(16)]
    #[case(64)]
    fn twiddled_index_is_a_bijection(#[case] size: usize) {
        let mut seen = vec![false; size * size];
        for y in 0..size {
            for x in 0..size {
                let position = twiddled_index(x, y, size);
                assert!(!seen[position]);
                seen[position] = true;
            }
        }
        assert!(seen.iter().all(|&x| x));
    }

    #[test]
    fn blocks_are_stored_row_major() {
        // Second block of a 16x16 surface starts at pixel (8, 0).
        assert_eq!(twiddled_index(8, 0, 16), 64);
        assert_eq!(twiddled_index(0, 8, 16), 128);
    }
}
