//! Random background regions used as the true-negative universe.

use rand::Rng;
use serde::{Deserialize, Serialize};

use peakbench_core::models::{ChromSizes, Region, RegionSet};
use peakbench_ranges::IntervalRanges;

use crate::errors::{LabelError, LabelResult};

/// Half-open range `[min, max)` of sampled region lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct LengthRange {
    min: u32,
    max: u32,
}

impl LengthRange {
    pub fn new(min: u32, max: u32) -> LabelResult<Self> {
        if min == 0 || min >= max {
            return Err(LabelError::InvalidLengthRange { min, max });
        }
        Ok(LengthRange { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        LengthRange { min: 200, max: 400 }
    }
}

impl TryFrom<[u32; 2]> for LengthRange {
    type Error = LabelError;

    fn try_from(value: [u32; 2]) -> LabelResult<Self> {
        LengthRange::new(value[0], value[1])
    }
}

impl From<LengthRange> for [u32; 2] {
    fn from(value: LengthRange) -> Self {
        [value.min, value.max]
    }
}

///
/// Draw random regions on every chromosome of `chrom_sizes`.
///
/// Each chromosome receives `count / number of chromosomes` regions. A region
/// starts uniformly in `[0, length - max)` and has a length drawn uniformly from
/// `length_range`, so it always ends inside the chromosome. Every region gets a
/// placeholder score uniform in `[0, 1)`.
///
/// Chromosomes are visited in table order, so a seeded `rng` gives the same
/// regions on every run.
///
/// # Errors
/// [LabelError::InvalidChromosomeLength] if any chromosome is not longer than
/// the longest allowed region. Nothing is drawn in that case.
pub fn generate<R: Rng + ?Sized>(
    chrom_sizes: &ChromSizes,
    count: usize,
    length_range: LengthRange,
    rng: &mut R,
) -> LabelResult<RegionSet> {
    if chrom_sizes.is_empty() {
        return Err(LabelError::InvalidInput(
            "chromosome size table is empty".to_string(),
        ));
    }

    for (chr, length) in chrom_sizes.iter() {
        if length <= length_range.max {
            return Err(LabelError::InvalidChromosomeLength {
                chr: chr.to_string(),
                length,
                max_length: length_range.max,
            });
        }
    }

    let per_chrom = count / chrom_sizes.len();
    let mut regions: Vec<Region> = Vec::with_capacity(per_chrom * chrom_sizes.len());

    for (chr, length) in chrom_sizes.iter() {
        for _ in 0..per_chrom {
            let start = rng.random_range(0..length - length_range.max);
            let width = rng.random_range(length_range.min..length_range.max);
            regions.push(Region::scored(chr, start, start + width, rng.random::<f64>())?);
        }
    }

    log::debug!(
        "Sampled {} background regions over {} chromosomes",
        regions.len(),
        chrom_sizes.len()
    );

    Ok(RegionSet::from(regions))
}

/// Candidates that overlap none of the already labeled regions.
pub fn exclude_labeled(candidates: &RegionSet, labeled: &RegionSet) -> RegionSet {
    candidates.difference(labeled)
}
