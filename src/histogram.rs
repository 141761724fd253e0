use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use multiversion::multiversion;

use crate::{
    intensity::{IntensityMap, Shape2D},
    records::{self, Endian},
};

pub const HISTOGRAM_LENGTH: usize = 256;
pub const HISTOGRAM_FILE_NAME: &str = "hist.txt";

/// Centroid movement, in levels, under which k-means counts as settled.
const KMEANS_TOLERANCE: u64 = 2;
const KMEANS_MAX_ROUNDS: usize = 256;

/// Pixel count per intensity level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u32; HISTOGRAM_LENGTH],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            bins: [0; HISTOGRAM_LENGTH],
        }
    }
}

impl Histogram {
    pub fn from_intensity(map: &IntensityMap) -> Self {
        Self::from_intensity_with(map, HistogramStrategy::auto(map.shape()))
    }

    pub fn from_intensity_with(map: &IntensityMap, strategy: HistogramStrategy) -> Self {
        let bins = match strategy {
            HistogramStrategy::Seq => count_impl(map.as_ref()),
            HistogramStrategy::Par => count_par_impl(map.as_ref(), map.width() as usize),
        };
        Self { bins }
    }

    #[inline]
    pub fn bins(&self) -> &[u32; HISTOGRAM_LENGTH] {
        &self.bins
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&count| count as u64).sum()
    }

    /// Intensity level holding the most pixels, lowest level on ties.
    pub fn max_bin(&self) -> Option<(u8, u32)> {
        self.bins
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .fold(None, |best: Option<(u8, u32)>, (level, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((level as u8, count)),
            })
    }

    /// Gray level splitting the histogram into a dark and a light cluster.
    ///
    /// Two-means over the levels, each weighted by its pixel count. The
    /// centroids start at the darkest and lightest occupied levels and the
    /// threshold is their midpoint once neither moves by more than two
    /// levels. `None` for an empty histogram.
    pub fn kmeans_threshold(&self) -> Option<u8> {
        let occupied = || {
            self.bins
                .iter()
                .enumerate()
                .filter(|(_, count)| **count > 0)
                .map(|(level, _)| level as u64)
        };
        let mut centroids = [occupied().next()?, occupied().next_back()?];

        for round in 0..KMEANS_MAX_ROUNDS {
            let mut sums = [0u64; 2];
            let mut weights = [0u64; 2];
            for (level, &count) in self.bins.iter().enumerate() {
                let level = level as u64;
                // ties go to the dark cluster
                let nearest: usize = if level.abs_diff(centroids[1]) < level.abs_diff(centroids[0]) {
                    1
                } else {
                    0
                };
                sums[nearest] += level * count as u64;
                weights[nearest] += count as u64;
            }
            // an empty cluster keeps its centroid
            let next = [0usize, 1].map(|k| match weights[k] {
                0 => centroids[k],
                weight => sums[k] / weight,
            });
            let settled = next
                .iter()
                .zip(centroids.iter())
                .all(|(new, old)| new.abs_diff(*old) <= KMEANS_TOLERANCE);
            centroids = next;
            if settled {
                log::debug!("k-means settled after {} round(s) at {:?}", round + 1, centroids);
                break;
            }
        }
        Some(((centroids[0] + centroids[1]) / 2) as u8)
    }

    /// Bins as `i32` records, the plotter's default record type.
    ///
    /// Counts above `i32::MAX` saturate.
    pub fn to_records(&self) -> Vec<i32> {
        self.bins
            .iter()
            .map(|&count| i32::try_from(count).unwrap_or(i32::MAX))
            .collect()
    }

    pub fn write_records<W: Write>(&self, writer: &mut W, endian: Endian) -> crate::error::Result {
        records::write_records(writer, &self.to_records(), endian)
    }

    pub fn write_records_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        endian: Endian,
    ) -> crate::error::Result {
        let path = path.as_ref();
        let mut file = BufWriter::new(File::create(path)?);
        self.write_records(&mut file, endian)?;
        file.flush()?;
        log::debug!("wrote {} histogram bins to '{}'", HISTOGRAM_LENGTH, path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramStrategy {
    Seq,
    Par,
}

impl HistogramStrategy {
    pub fn auto(shape_hint: Shape2D) -> Self {
        let (width, height) = shape_hint;
        let count = width * height;

        if width < 450 || count < 202500 {
            return HistogramStrategy::Seq;
        }
        HistogramStrategy::Par
    }
}

#[multiversion(targets("x86_64+avx512f", "x86_64+avx2", "x86_64+sse2"))]
fn count_impl(in_buf: &[u8]) -> [u32; HISTOGRAM_LENGTH] {
    let mut bins = [0u32; HISTOGRAM_LENGTH];
    in_buf.iter().for_each(|&level| bins[level as usize] += 1);
    bins
}

/// Per-thread row folds merged into one bin array.
fn count_par_impl(in_buf: &[u8], width: usize) -> [u32; HISTOGRAM_LENGTH] {
    use rayon::prelude::*;

    if width == 0 {
        return [0; HISTOGRAM_LENGTH];
    }
    in_buf
        .par_chunks(width)
        .fold(
            || [0u32; HISTOGRAM_LENGTH],
            |mut bins, row| {
                row.iter().for_each(|&level| bins[level as usize] += 1);
                bins
            },
        )
        .reduce(
            || [0u32; HISTOGRAM_LENGTH],
            |mut acc, bins| {
                acc.iter_mut().zip(bins.iter()).for_each(|(a, b)| *a += b);
                acc
            },
        )
}
