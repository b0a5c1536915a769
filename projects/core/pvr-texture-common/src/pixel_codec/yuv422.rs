//! YUV 4:2:2. Two horizontally adjacent pixels share one chroma pair and are stored as
//! `U, Y0, V, Y1`. Conversion uses full range BT.601 coefficients in 8.8 fixed point.

use crate::color_8888::Color8888;

#[inline]
fn clamp(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Converts one luma sample with its shared chroma to an opaque color.
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> Color8888 {
    let y = y as i32;
    let u = u as i32 - 128;
    let v = v as i32 - 128;
    Color8888::new(
        clamp(y + ((359 * v) >> 8)),
        clamp(y - ((88 * u + 183 * v) >> 8)),
        clamp(y + ((454 * u) >> 8)),
        255,
    )
}

/// Decodes pixel `index`, reading the 4 byte group that holds it.
///
/// A trailing unpaired pixel only owns `U, Y0`; missing samples read as neutral 128.
#[inline]
pub fn decode_pixel(source: &[u8], index: usize) -> Color8888 {
    let group = (index / 2) * 4;
    let sample = |offset: usize| source.get(group + offset).copied().unwrap_or(128);
    let y = if index % 2 == 0 { sample(1) } else { sample(3) };
    yuv_to_rgb(y, sample(0), sample(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(128)]
    #[case(255)]
    fn neutral_chroma_is_gray(#[case] luma: u8) {
        assert_eq!(yuv_to_rgb(luma, 128, 128), Color8888::new(luma, luma, luma, 255));
    }

    #[test]
    fn pixels_in_a_pair_share_chroma() {
        let data = [128u8, 10, 128, 200];
        assert_eq!(decode_pixel(&data, 0), Color8888::new(10, 10, 10, 255));
        assert_eq!(decode_pixel(&data, 1), Color8888::new(200, 200, 200, 255));
    }

    #[test]
    fn trailing_unpaired_pixel_uses_neutral_chroma() {
        // 3 pixels occupy 6 bytes: one full group plus `U, Y0` of the last pixel.
        let data = [128u8, 10, 128, 200, 128, 90];
        assert_eq!(decode_pixel(&data, 2), Color8888::new(90, 90, 90, 255));

        // A 1x1 level holds only 2 bytes.
        assert_eq!(decode_pixel(&[128, 40], 0), Color8888::new(40, 40, 40, 255));
    }
}
