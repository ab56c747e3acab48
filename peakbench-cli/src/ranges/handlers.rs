use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use peakbench_core::models::RegionSet;
use peakbench_core::utils::bed_files_in;
use peakbench_ranges::IntervalRanges;

use crate::utils::{load_regions, required_path, write_regions};

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let rs = load_regions(&input)?;
    let merged = rs.sort_and_merge();
    log::info!("Merged {} regions into {}", rs.len(), merged.len());
    write_regions(&merged, matches.get_one::<PathBuf>("output"))
}

pub fn run_merge_all(matches: &ArgMatches) -> Result<()> {
    let input_dir = required_path(matches, "input-dir")?;
    let output = required_path(matches, "output")?;

    let files = bed_files_in(&input_dir)?;
    if files.is_empty() {
        anyhow::bail!("No BED files found in {}", input_dir.display());
    }

    let mut all = RegionSet::default();
    for path in &files {
        let rs = load_regions(path)?;
        all.regions.extend(rs.regions);
    }

    let merged = all.sort_and_merge();
    log::info!(
        "Merged {} regions from {} files into {}",
        all.len(),
        files.len(),
        merged.len()
    );
    write_regions(&merged, Some(&output))
}
