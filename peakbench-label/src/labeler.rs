use std::fmt::{self, Display};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use peakbench_core::models::{ChromSizes, LabelClass, LabeledDataset, LabeledRegion, Region, RegionSet};
use peakbench_ranges::IntervalRanges;

use crate::errors::{LabelError, LabelResult};
use crate::sampler::{self, LengthRange};

/// How a candidate overlapping the gold standard is turned into a true positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Whole regions: a candidate overlapping any gold region is a TP as is,
    /// a gold region overlapping any candidate is never an FN.
    #[default]
    Region,
    /// TPs are clipped to the overlapping part of the gold standard and FNs
    /// are the parts of gold regions left uncovered by candidates.
    Clipped,
}

impl Display for OverlapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlapMode::Region => write!(f, "region"),
            OverlapMode::Clipped => write!(f, "clipped"),
        }
    }
}

impl FromStr for OverlapMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "region" => Ok(OverlapMode::Region),
            "clipped" => Ok(OverlapMode::Clipped),
            other => Err(LabelError::Config(format!(
                "unknown overlap mode {:?}, expected \"region\" or \"clipped\"",
                other
            ))),
        }
    }
}

///
/// Labels candidate peaks against a gold standard.
///
/// Candidates overlapping the gold standard are true positives and keep
/// their own score, the rest are false positives. Gold regions missed by
/// every candidate are false negatives. True negatives are random
/// background regions that touch none of the above. FN and TN regions
/// carry no detector score, so they get a random one in `[0, 1)`.
///
#[derive(Debug, Clone)]
pub struct Labeler {
    pub chrom_sizes: ChromSizes,
    pub negative_count: usize,
    pub length_range: LengthRange,
    pub overlap_mode: OverlapMode,
}

impl Default for Labeler {
    fn default() -> Self {
        Labeler {
            chrom_sizes: ChromSizes::hg38_autosomes(),
            negative_count: 800_000,
            length_range: LengthRange::default(),
            overlap_mode: OverlapMode::default(),
        }
    }
}

impl Labeler {
    pub fn new(chrom_sizes: ChromSizes, negative_count: usize, length_range: LengthRange) -> Self {
        Labeler {
            chrom_sizes,
            negative_count,
            length_range,
            overlap_mode: OverlapMode::default(),
        }
    }

    pub fn with_overlap_mode(mut self, overlap_mode: OverlapMode) -> Self {
        self.overlap_mode = overlap_mode;
        self
    }

    ///
    /// Build the labeled dataset for one candidate set.
    ///
    /// All randomness comes from `rng`: FN scores are drawn first, then the
    /// background pool, then the TN scores.
    ///
    /// # Arguments
    /// - gold: trusted reference regions
    /// - candidates: detector peaks, every one with a finite score
    /// - rng: random source
    ///
    /// # Returns
    /// Every labeled region sorted by `(chr, start, end)`.
    pub fn label<R: Rng + ?Sized>(
        &self,
        gold: &RegionSet,
        candidates: &RegionSet,
        rng: &mut R,
    ) -> LabelResult<LabeledDataset> {
        for region in &candidates.regions {
            match region.score {
                Some(score) if score.is_finite() => {}
                Some(score) => {
                    return Err(LabelError::InvalidInput(format!(
                        "candidate {} has a non-finite score: {}",
                        region, score
                    )));
                }
                None => {
                    return Err(LabelError::InvalidInput(format!(
                        "candidate {} has no score",
                        region
                    )));
                }
            }
        }

        let (tp, fp, fn_) = match self.overlap_mode {
            OverlapMode::Region => (
                candidates.intersect(gold),
                candidates.difference(gold),
                gold.difference(candidates),
            ),
            OverlapMode::Clipped => (
                candidates.intersect_clipped(gold),
                candidates.difference(gold),
                gold.subtract(candidates),
            ),
        };

        let mut records: Vec<LabeledRegion> =
            Vec::with_capacity(tp.len() + fp.len() + fn_.len());
        records.extend(tp.regions.iter().map(|r| keep_score(r, LabelClass::TP)));
        records.extend(fp.regions.iter().map(|r| keep_score(r, LabelClass::FP)));
        records.extend(
            fn_.regions
                .iter()
                .map(|r| with_score(r, rng.random::<f64>(), LabelClass::FN)),
        );

        let labeled_so_far = tp.concat(&fp).concat(&fn_);
        let pool = sampler::generate(&self.chrom_sizes, self.negative_count, self.length_range, rng)?;
        let tn = sampler::exclude_labeled(&pool, &labeled_so_far);
        records.extend(
            tn.regions
                .iter()
                .map(|r| with_score(r, rng.random::<f64>(), LabelClass::TN)),
        );

        log::info!(
            "Labeled {} TP, {} FP, {} FN, {} TN ({} of {} background regions kept)",
            tp.len(),
            fp.len(),
            fn_.len(),
            tn.len(),
            tn.len(),
            pool.len()
        );

        Ok(LabeledDataset::from(records))
    }
}

fn keep_score(region: &Region, class: LabelClass) -> LabeledRegion {
    // candidates were checked for a score on entry
    let score = region.score.unwrap_or_default();
    LabeledRegion::new(region.clone(), score, class)
}

fn with_score(region: &Region, score: f64, class: LabelClass) -> LabeledRegion {
    let mut region = region.clone();
    region.score = Some(score);
    LabeledRegion::new(region, score, class)
}
