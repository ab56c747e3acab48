//! Peak preparation before labeling.

use std::cmp::Ordering;

use regex::Regex;

use peakbench_core::models::{Region, RegionSet};

use crate::errors::{LabelError, LabelResult};

fn chrom_number(chr: &str) -> Option<u32> {
    chr.strip_prefix("chr").and_then(|n| n.parse::<u32>().ok())
}

///
/// Keep the `top_n` highest scoring peaks on numbered chromosomes.
///
/// Peaks on `chrX`, `chrY`, `chrM` and unplaced contigs are dropped first.
/// Peaks with equal scores keep their input order when the cut is made. The
/// result is ordered by chromosome number (`chr2` before `chr10`) and then
/// by descending width.
///
/// # Errors
/// [LabelError::InvalidInput] if a kept peak has no score or a NaN score.
pub fn select_top_peaks(set: &RegionSet, top_n: usize) -> LabelResult<RegionSet> {
    let numbered = Regex::new(r"^chr\d+$").map_err(|e| LabelError::Config(e.to_string()))?;

    let mut peaks: Vec<(f64, &Region)> = Vec::new();
    for region in set.regions.iter().filter(|r| numbered.is_match(&r.chr)) {
        match region.score {
            Some(score) if !score.is_nan() => peaks.push((score, region)),
            _ => {
                return Err(LabelError::InvalidInput(format!(
                    "peak {} has no usable score in the 5th column",
                    region
                )));
            }
        }
    }

    let dropped = set.len() - peaks.len();
    if dropped > 0 {
        log::debug!("Dropped {} peaks outside numbered chromosomes", dropped);
    }

    peaks.sort_by(|a, b| b.0.total_cmp(&a.0));
    peaks.truncate(top_n);

    let mut selected: Vec<Region> = peaks.into_iter().map(|(_, r)| r.clone()).collect();
    selected.sort_by(|a, b| match chrom_number(&a.chr).cmp(&chrom_number(&b.chr)) {
        Ordering::Equal => b.width().cmp(&a.width()),
        other => other,
    });

    Ok(RegionSet::from(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn peak(chr: &str, start: u32, end: u32, score: f64) -> Region {
        Region::scored(chr, start, end, score).unwrap()
    }

    fn coords(rs: &RegionSet) -> Vec<(String, u32, u32)> {
        rs.regions
            .iter()
            .map(|r| (r.chr.clone(), r.start, r.end))
            .collect()
    }

    #[rstest]
    fn test_select_top_peaks() {
        let set = RegionSet::from(vec![
            peak("chr10", 0, 100, 5.0),
            peak("chrX", 0, 100, 9.0),
            peak("chr2", 0, 50, 7.0),
            peak("chr2", 100, 300, 6.0),
            peak("chr1_KI270706v1_random", 0, 100, 8.0),
            peak("chr1", 0, 10, 1.0),
        ]);
        let selected = select_top_peaks(&set, 3).unwrap();
        assert_eq!(
            coords(&selected),
            vec![
                ("chr2".to_string(), 100, 300),
                ("chr2".to_string(), 0, 50),
                ("chr10".to_string(), 0, 100),
            ]
        );
    }

    #[rstest]
    fn test_ties_keep_input_order() {
        let set = RegionSet::from(vec![
            peak("chr1", 0, 10, 1.0),
            peak("chr1", 20, 40, 1.0),
            peak("chr1", 50, 80, 1.0),
        ]);
        let selected = select_top_peaks(&set, 2).unwrap();
        assert_eq!(
            coords(&selected),
            vec![("chr1".to_string(), 20, 40), ("chr1".to_string(), 0, 10)]
        );
    }

    #[rstest]
    fn test_top_n_larger_than_set() {
        let set = RegionSet::from(vec![peak("chr3", 0, 10, 1.0)]);
        assert_eq!(select_top_peaks(&set, 100).unwrap().len(), 1);
    }

    #[rstest]
    fn test_unscored_peak_is_an_error() {
        let set = RegionSet::from(vec![Region::new("chr1", 0, 10).unwrap()]);
        assert!(matches!(
            select_top_peaks(&set, 1),
            Err(LabelError::InvalidInput(_))
        ));
    }

    #[rstest]
    fn test_unscored_peak_on_dropped_chromosome_is_ignored() {
        let set = RegionSet::from(vec![
            Region::new("chrY", 0, 10).unwrap(),
            peak("chr1", 0, 10, 2.0),
        ]);
        assert_eq!(select_top_peaks(&set, 5).unwrap().len(), 1);
    }
}
