//! Interval set algebra operations for genomic region sets.
//!
//! Every binary operation sorts its left operand, sort-merges its right
//! operand, and then sweeps each chromosome once with a monotone cursor:
//! `O(n log n + m log m)` overall.

use fxhash::FxHashMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use peakbench_core::models::{Region, RegionSet};

/// Interval set algebra operations on genomic region sets.
///
/// Whole-region operations (`intersect`, `difference`) return regions of
/// `self` untouched, name and score included. Overlap is strict: bookended
/// regions (`a.end == b.start`) do not overlap. Merging, on the other hand,
/// joins bookended regions.
pub trait IntervalRanges {
    /// Merge overlapping and adjacent intervals per chromosome.
    ///
    /// Sorts by `(chr, start, end)`, then sweeps to merge intervals where
    /// `next.start <= current.end`. The result carries no name or score.
    ///
    /// # Example
    /// ```text
    /// X: chr1 100–200, chr1 200–300, chr1 250–400, chr1 500–600
    /// sort_and_merge(X): chr1 100–400, chr1 500–600
    /// ```
    fn sort_and_merge(&self) -> RegionSet;

    /// Every region of `self` overlapping at least one region of `other`.
    fn intersect(&self, other: &RegionSet) -> RegionSet;

    /// Every region of `self` overlapping no region of `other`.
    fn difference(&self, other: &RegionSet) -> RegionSet;

    /// For each region of `self`, the pieces shared with `other`.
    ///
    /// # Example
    /// ```text
    /// A: chr1 150–250 (score 0.9)
    /// B: chr1 100–200
    /// intersect_clipped(A, B): chr1 150–200 (score 0.9)
    /// ```
    fn intersect_clipped(&self, other: &RegionSet) -> RegionSet;

    /// For each region of `self`, the pieces not covered by `other`.
    ///
    /// # Example
    /// ```text
    /// A: chr1 100–200
    /// B: chr1 120–140, chr1 160–180
    /// subtract(A, B): chr1 100–120, chr1 140–160, chr1 180–200
    /// ```
    fn subtract(&self, other: &RegionSet) -> RegionSet;

    /// Minimal non-overlapping cover of both sets.
    fn union(&self, other: &RegionSet) -> RegionSet;
}

/// Split a sorted region slice into per-chromosome blocks, in order.
fn chrom_blocks(regions: &[Region]) -> Vec<&[Region]> {
    let mut blocks = Vec::new();
    let mut block_start = 0;
    while block_start < regions.len() {
        let chr = &regions[block_start].chr;
        let mut block_end = block_start;
        while block_end < regions.len() && regions[block_end].chr == *chr {
            block_end += 1;
        }
        blocks.push(&regions[block_start..block_end]);
        block_start = block_end;
    }
    blocks
}

/// Sort `a`, merge `b`, and run `sweep` on every chromosome of `a` against
/// the merged `b` intervals of the same chromosome. Results are concatenated
/// in chromosome order, so the output does not depend on the `parallel`
/// feature.
fn sweep_chroms<F>(a: &RegionSet, b: &RegionSet, sweep: F) -> RegionSet
where
    F: Fn(&[Region], &[Region]) -> Vec<Region> + Send + Sync,
{
    let a = RegionSet::from(a.regions.clone()).sorted();
    let b = b.sort_and_merge();

    let b_by_chr: FxHashMap<&str, &[Region]> = chrom_blocks(&b.regions)
        .into_iter()
        .map(|block| (block[0].chr.as_str(), block))
        .collect();

    let blocks = chrom_blocks(&a.regions);
    let run = |block: &&[Region]| {
        let other = b_by_chr
            .get(block[0].chr.as_str())
            .copied()
            .unwrap_or_default();
        sweep(block, other)
    };

    #[cfg(feature = "parallel")]
    let per_chrom: Vec<Vec<Region>> = blocks.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let per_chrom: Vec<Vec<Region>> = blocks.iter().map(run).collect();

    RegionSet::from(per_chrom.into_iter().flatten().collect::<Vec<Region>>())
}

/// Keep the regions of `a` whose overlap status with `b` equals
/// `keep_overlapping`. `a` is sorted; `b` is merged (sorted, disjoint).
fn filter_by_overlap(a: &[Region], b: &[Region], keep_overlapping: bool) -> Vec<Region> {
    let mut kept = Vec::new();
    let mut b_idx = 0;

    for region in a {
        // a starts never decrease, so anything ending at or before this
        // start is behind every later region too
        while b_idx < b.len() && b[b_idx].end <= region.start {
            b_idx += 1;
        }
        let overlaps = b_idx < b.len() && b[b_idx].start < region.end;
        if overlaps == keep_overlapping {
            kept.push(region.clone());
        }
    }
    kept
}

fn piece(region: &Region, start: u32, end: u32) -> Region {
    Region {
        chr: region.chr.clone(),
        start,
        end,
        name: region.name.clone(),
        score: region.score,
        rest: region.rest.clone(),
    }
}

fn clip_to_overlaps(a: &[Region], b: &[Region]) -> Vec<Region> {
    let mut pieces = Vec::new();
    let mut b_idx = 0;

    for region in a {
        while b_idx < b.len() && b[b_idx].end <= region.start {
            b_idx += 1;
        }
        let mut j = b_idx;
        while j < b.len() && b[j].start < region.end {
            pieces.push(piece(
                region,
                region.start.max(b[j].start),
                region.end.min(b[j].end),
            ));
            j += 1;
        }
    }
    pieces
}

fn remove_overlaps(a: &[Region], b: &[Region]) -> Vec<Region> {
    let mut pieces = Vec::new();
    let mut b_idx = 0;

    for region in a {
        while b_idx < b.len() && b[b_idx].end <= region.start {
            b_idx += 1;
        }

        let mut pos = region.start;
        let mut j = b_idx;

        while j < b.len() && b[j].start < region.end && pos < region.end {
            if b[j].start > pos {
                // gap before this subtraction interval
                pieces.push(piece(region, pos, b[j].start));
            }
            pos = pos.max(b[j].end);
            j += 1;
        }

        if pos < region.end {
            pieces.push(piece(region, pos, region.end));
        }
    }
    pieces
}

impl IntervalRanges for RegionSet {
    fn sort_and_merge(&self) -> RegionSet {
        if self.regions.is_empty() {
            return RegionSet::from(Vec::<Region>::new());
        }

        let sorted = RegionSet::from(self.regions.clone()).sorted();
        let regions = &sorted.regions;

        let mut merged: Vec<Region> = Vec::new();
        let mut current = regions[0].coordinates();

        for r in &regions[1..] {
            if r.chr == current.chr && r.start <= current.end {
                // overlapping or adjacent
                current.end = current.end.max(r.end);
            } else {
                merged.push(current);
                current = r.coordinates();
            }
        }
        merged.push(current);

        RegionSet::from(merged)
    }

    fn intersect(&self, other: &RegionSet) -> RegionSet {
        sweep_chroms(self, other, |a, b| filter_by_overlap(a, b, true))
    }

    fn difference(&self, other: &RegionSet) -> RegionSet {
        sweep_chroms(self, other, |a, b| filter_by_overlap(a, b, false))
    }

    fn intersect_clipped(&self, other: &RegionSet) -> RegionSet {
        sweep_chroms(self, other, clip_to_overlaps)
    }

    fn subtract(&self, other: &RegionSet) -> RegionSet {
        sweep_chroms(self, other, remove_overlaps)
    }

    fn union(&self, other: &RegionSet) -> RegionSet {
        self.concat(other).sort_and_merge()
    }
}
