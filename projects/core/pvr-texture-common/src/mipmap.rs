//! Mipmap chain math for square power of two textures.

/// Number of levels in a full chain down to 1x1: `floor(log2(size)) + 1`.
///
/// # Examples
///
/// ```
/// use pvr_texture_common::mipmap::mipmap_count;
///
/// assert_eq!(mipmap_count(16), 5);
/// assert_eq!(mipmap_count(1), 1);
/// ```
#[inline]
pub const fn mipmap_count(size: u32) -> u32 {
    if size == 0 {
        0
    } else {
        size.ilog2() + 1
    }
}

/// Edge lengths of every level, largest first.
#[inline]
pub fn mipmap_sizes(size: u32) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator {
    (0..mipmap_count(size)).map(move |level| size >> level)
}
