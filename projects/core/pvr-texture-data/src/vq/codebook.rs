//! Codebook construction for vector quantized textures.
//!
//! Every 2x2 block of every level is a 16 component vector. When the distinct blocks fit in
//! the codebook they are used as-is, in order of first appearance, which keeps the encoding
//! lossless. Otherwise a weighted k-means over the distinct blocks picks the entries; seeds
//! are spread evenly over the blocks sorted by brightness so the result is deterministic.

use crate::data_format::VQ_SLOTS_PER_ENTRY;
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use pvr_texture_common::color_8888::Color8888;
use pvr_texture_common::palette::Palette;

/// Colors of a 2x2 block in slot order: top-left, bottom-left, top-right, bottom-right.
pub type VqBlock = [Color8888; 4];

const MAX_ITERATIONS: usize = 8;

type Vector = [u8; 16];

#[inline]
fn to_vector(block: &VqBlock) -> Vector {
    let mut vector = [0u8; 16];
    for (x, color) in block.iter().enumerate() {
        vector[x * 4..x * 4 + 4].copy_from_slice(&color.to_array());
    }
    vector
}

#[inline]
fn to_block(vector: &Vector) -> VqBlock {
    core::array::from_fn(|x| {
        Color8888::new(
            vector[x * 4],
            vector[x * 4 + 1],
            vector[x * 4 + 2],
            vector[x * 4 + 3],
        )
    })
}

#[inline]
fn distance(a: &Vector, b: &Vector) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&a, &b)| {
            let d = a as i32 - b as i32;
            (d * d) as u32
        })
        .sum()
}

fn nearest(entries: &[Vector], vector: &Vector) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (x, entry) in entries.iter().enumerate() {
        let d = distance(entry, vector);
        if d < best_distance {
            best = x;
            best_distance = d;
            if d == 0 {
                break;
            }
        }
    }
    best
}

/// A set of 2x2 codebook entries shared by every level of a VQ texture.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VqCodebook {
    entries: Vec<Vector>,
}

impl VqCodebook {
    /// Builds a codebook of at most `max_entries` entries covering `blocks`.
    pub fn build<I>(blocks: I, max_entries: usize) -> Self
    where
        I: IntoIterator<Item = VqBlock>,
    {
        if max_entries == 0 {
            return Self::default();
        }

        // Distinct vectors in order of first appearance, with their occurrence counts.
        let mut lookup: BTreeMap<Vector, usize> = BTreeMap::new();
        let mut distinct: Vec<(Vector, u64)> = Vec::new();
        for block in blocks {
            let vector = to_vector(&block);
            match lookup.get(&vector) {
                Some(&x) => distinct[x].1 += 1,
                None => {
                    lookup.insert(vector, distinct.len());
                    distinct.push((vector, 1));
                }
            }
        }

        if distinct.len() <= max_entries {
            return Self {
                entries: distinct.into_iter().map(|(vector, _)| vector).collect(),
            };
        }

        Self {
            entries: k_means(&distinct, max_entries),
        }
    }

    /// Rebuilds a codebook from decoded slots, four per entry.
    pub fn from_palette(palette: &Palette) -> Self {
        let entries = palette
            .colors()
            .chunks_exact(VQ_SLOTS_PER_ENTRY)
            .map(|slots| to_vector(&[slots[0], slots[1], slots[2], slots[3]]))
            .collect();
        Self { entries }
    }

    /// Flattens to `slots` palette slots, padding unused entries with transparent black.
    pub fn to_palette(&self, slots: usize) -> Palette {
        let colors = self
            .entries
            .iter()
            .flat_map(|vector| to_block(vector))
            .collect();
        Palette::new(colors).resized(slots)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `index`; transparent black when out of range.
    #[inline]
    pub fn entry(&self, index: usize) -> VqBlock {
        self.entries
            .get(index)
            .map(to_block)
            .unwrap_or([Color8888::TRANSPARENT; 4])
    }

    /// Index of the entry closest to `block`.
    #[inline]
    pub fn nearest(&self, block: &VqBlock) -> usize {
        nearest(&self.entries, &to_vector(block))
    }
}

fn brightness(vector: &Vector) -> u32 {
    vector.iter().map(|&x| x as u32).sum()
}

fn k_means(points: &[(Vector, u64)], k: usize) -> Vec<Vector> {
    let mut sorted: Vec<&(Vector, u64)> = points.iter().collect();
    sorted.sort_by_key(|(vector, _)| brightness(vector));
    let mut centroids: Vec<Vector> = (0..k)
        .map(|x| sorted[x * sorted.len() / k].0)
        .collect();

    let mut assignments = vec![usize::MAX; points.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        let mut sums = vec![[0u64; 16]; k];
        let mut weights = vec![0u64; k];

        for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
            let (vector, weight) = point;
            let cluster = nearest(&centroids, vector);
            if *assignment != cluster {
                *assignment = cluster;
                changed = true;
            }
            for (sum, &component) in sums[cluster].iter_mut().zip(vector.iter()) {
                *sum += component as u64 * weight;
            }
            weights[cluster] += weight;
        }

        if !changed {
            break;
        }

        let updates = centroids.iter_mut().zip(sums.iter()).zip(weights.iter());
        for ((centroid, sum), &weight) in updates {
            // Empty clusters keep their previous centroid.
            if weight == 0 {
                continue;
            }
            for (component, &total) in centroid.iter_mut().zip(sum.iter()) {
                *component = ((total + weight / 2) / weight) as u8;
            }
        }
    }

    centroids
}
