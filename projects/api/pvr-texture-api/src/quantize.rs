//! Color quantization for palette formats.
//!
//! The encoder only talks to the [`Quantizer`] trait. [`MedianCutQuantizer`] is the default:
//! it keeps the exact colors when they fit, and otherwise splits RGBA space at the median of
//! the widest channel until the palette is full.

use image::RgbaImage;
use pvr_texture_common::color_8888::Color8888;
use pvr_texture_common::palette::Palette;
use std::collections::{HashMap, HashSet};

/// Builds palettes and maps images onto them.
///
/// Index vectors are row-major, one byte per pixel.
pub trait Quantizer {
    /// Returns every distinct color in order of first appearance, or [`None`] if there are
    /// more than `max_colors`.
    fn try_build_exact_palette(&self, image: &RgbaImage, max_colors: usize) -> Option<Palette>;

    /// Builds a palette of at most `max_colors` entries and maps `image` onto it.
    fn build_approximate_palette_and_quantize(
        &self,
        image: &RgbaImage,
        max_colors: usize,
    ) -> (Palette, Vec<u8>);

    /// Maps every pixel of `image` to its nearest entry in `palette`.
    fn quantize_with_existing_palette(&self, image: &RgbaImage, palette: &Palette) -> Vec<u8>;
}

/// Median cut over RGBA, with nearest color matching by squared distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCutQuantizer;

fn pixels(image: &RgbaImage) -> impl Iterator<Item = Color8888> + '_ {
    image.pixels().map(|pixel| Color8888::from(pixel.0))
}

#[inline]
fn channel(color: &Color8888, axis: usize) -> u8 {
    match axis {
        0 => color.r,
        1 => color.g,
        2 => color.b,
        _ => color.a,
    }
}

/// Per channel `max - min` of a bucket.
fn bucket_ranges(bucket: &[Color8888]) -> [u8; 4] {
    let mut min = [u8::MAX; 4];
    let mut max = [u8::MIN; 4];
    for color in bucket {
        for axis in 0..4 {
            let value = channel(color, axis);
            min[axis] = min[axis].min(value);
            max[axis] = max[axis].max(value);
        }
    }
    core::array::from_fn(|axis| max[axis].saturating_sub(min[axis]))
}

fn bucket_volume(bucket: &[Color8888]) -> u64 {
    bucket_ranges(bucket)
        .iter()
        .map(|&range| range as u64 + 1)
        .product::<u64>()
        - 1
}

fn average_color(bucket: &[Color8888]) -> Color8888 {
    let count = bucket.len().max(1) as u64;
    let mut sums = [0u64; 4];
    for color in bucket {
        for (axis, sum) in sums.iter_mut().enumerate() {
            *sum += channel(color, axis) as u64;
        }
    }
    let [r, g, b, a] = sums.map(|sum| ((sum + count / 2) / count) as u8);
    Color8888::new(r, g, b, a)
}

fn median_cut(colors: Vec<Color8888>, max_colors: usize) -> Vec<Color8888> {
    if colors.is_empty() || max_colors == 0 {
        return Vec::new();
    }

    let mut buckets = vec![colors];
    while buckets.len() < max_colors {
        let Some((split, volume)) = buckets
            .iter()
            .enumerate()
            .map(|(x, bucket)| (x, bucket_volume(bucket)))
            .max_by_key(|&(_, volume)| volume)
        else {
            break;
        };

        // Every bucket holds a single color.
        if volume == 0 {
            break;
        }

        let mut bucket = buckets.swap_remove(split);
        let ranges = bucket_ranges(&bucket);
        let axis = (0..4).max_by_key(|&axis| (ranges[axis], 3 - axis)).unwrap_or(0);
        bucket.sort_by_key(|color| channel(color, axis));

        // Split at the median, moved off any run of equal values so both halves differ.
        let median = channel(&bucket[bucket.len() / 2], axis);
        let mut mid = bucket.partition_point(|color| channel(color, axis) < median);
        if mid == 0 {
            mid = bucket.partition_point(|color| channel(color, axis) <= median);
        }

        let right = bucket.split_off(mid);
        buckets.push(bucket);
        buckets.push(right);
    }

    buckets.iter().map(|bucket| average_color(bucket)).collect()
}

impl Quantizer for MedianCutQuantizer {
    fn try_build_exact_palette(&self, image: &RgbaImage, max_colors: usize) -> Option<Palette> {
        let mut seen: HashSet<Color8888> = HashSet::new();
        let mut colors = Vec::new();
        for color in pixels(image) {
            if seen.insert(color) {
                if colors.len() == max_colors {
                    return None;
                }
                colors.push(color);
            }
        }
        Some(Palette::new(colors))
    }

    fn build_approximate_palette_and_quantize(
        &self,
        image: &RgbaImage,
        max_colors: usize,
    ) -> (Palette, Vec<u8>) {
        let palette = Palette::new(median_cut(pixels(image).collect(), max_colors));
        let indices = self.quantize_with_existing_palette(image, &palette);
        (palette, indices)
    }

    fn quantize_with_existing_palette(&self, image: &RgbaImage, palette: &Palette) -> Vec<u8> {
        let mut cache: HashMap<Color8888, u8> = HashMap::new();
        pixels(image)
            .map(|color| {
                *cache
                    .entry(color)
                    .or_insert_with(|| palette.nearest_index(color) as u8)
            })
            .collect()
    }
}
