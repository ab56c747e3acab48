//! Sample support of merged regions.
//!
//! Given a merged (union) region set and the peak files of N samples, every
//! merged region is annotated with the samples that have at least one peak
//! overlapping it and the mean score of those peaks. Splitting by support
//! gives gold standards of increasing stringency, e.g. "regions present in
//! at least 3 samples".

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use peakbench_core::errors::RegionSetError;
use peakbench_core::models::{Region, RegionSet};

use crate::interval_ranges::IntervalRanges;

/// A merged region annotated with the samples supporting it.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportRegion {
    pub region: Region,
    /// Names of samples with at least one overlapping peak, sorted.
    pub samples: Vec<String>,
    score_sum: f64,
    n_scores: usize,
}

impl SupportRegion {
    fn new(region: Region) -> Self {
        SupportRegion {
            region,
            samples: Vec::new(),
            score_sum: 0.0,
            n_scores: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Mean score over every overlapping peak of every sample; 0 when unsupported.
    pub fn mean_score(&self) -> f64 {
        match self.n_scores {
            0 => 0.0,
            n => self.score_sum / n as f64,
        }
    }

    /// `chr, start, end, samples, mean_score`
    pub fn as_string(&self) -> String {
        let samples = match self.samples.is_empty() {
            true => ".".to_string(),
            false => self.samples.join(","),
        };
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.region.chr,
            self.region.start,
            self.region.end,
            samples,
            self.mean_score()
        )
    }
}

///
/// Annotate every region of `merged` with its sample support.
///
/// `merged` is sorted and merged first, so its regions are disjoint. Each
/// sample contributes at most once to a region's sample list, but every one of
/// its overlapping peaks contributes to the mean score. Sample peaks without a
/// score are rejected.
///
/// # Arguments
/// - merged: the union of all sample peaks
/// - samples: `(sample name, peaks)` pairs
pub fn sample_support(
    merged: &RegionSet,
    samples: &[(String, RegionSet)],
) -> Result<Vec<SupportRegion>, RegionSetError> {
    let merged = merged.sort_and_merge();
    let mut support: Vec<SupportRegion> = merged
        .regions
        .iter()
        .cloned()
        .map(SupportRegion::new)
        .collect();

    let mut ordered: Vec<&(String, RegionSet)> = samples.iter().collect();
    ordered.sort_by(|a, b| a.0.cmp(&b.0));

    for (name, peaks) in ordered {
        let mut hit = vec![false; support.len()];
        for peak in &peaks.regions {
            let score = peak.score.ok_or_else(|| {
                RegionSetError::InvalidInput(format!(
                    "peak {} of sample {} has no score",
                    peak, name
                ))
            })?;

            // merged regions are disjoint and sorted, so ends increase with starts
            let first = merged
                .regions
                .partition_point(|m| m.chr < peak.chr || (m.chr == peak.chr && m.end <= peak.start));
            for (idx, m) in merged.regions.iter().enumerate().skip(first) {
                if m.chr != peak.chr || m.start >= peak.end {
                    break;
                }
                support[idx].score_sum += score;
                support[idx].n_scores += 1;
                hit[idx] = true;
            }
        }
        for (idx, was_hit) in hit.into_iter().enumerate() {
            if was_hit {
                support[idx].samples.push(name.clone());
            }
        }
    }

    Ok(support)
}

///
/// Write one BED file per support level: `regions_present_in_{k}_samples_or_more.bed`
/// holds every region supported by at least `k` samples, for `k` in
/// `1..=max support`. Returns the written paths in increasing `k`.
///
pub fn split_by_support<P: AsRef<Path>>(
    support: &[SupportRegion],
    output_dir: P,
) -> std::io::Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let max_count = support.iter().map(|s| s.count()).max().unwrap_or(0);
    let mut written = Vec::with_capacity(max_count);

    for k in 1..=max_count {
        let path = output_dir.join(format!("regions_present_in_{}_samples_or_more.bed", k));
        let mut file = BufWriter::new(File::create(&path)?);
        for s in support.iter().filter(|s| s.count() >= k) {
            writeln!(file, "{}", s.as_string())?;
        }
        file.flush()?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
