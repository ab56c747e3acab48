use anyhow::{Context, Result};
use clap::ArgMatches;
use rayon::prelude::*;

use peakbench_core::models::RegionSet;
use peakbench_core::utils::{bed_files_in, unique_bed_stems};
use peakbench_ranges::{sample_support, split_by_support};

use crate::utils::{load_regions, required_path};

pub fn run_support(matches: &ArgMatches) -> Result<()> {
    let merged_path = required_path(matches, "merged")?;
    let samples_dir = required_path(matches, "samples-dir")?;
    let output_dir = required_path(matches, "output-dir")?;

    let merged = load_regions(&merged_path)?;
    let files = bed_files_in(&samples_dir)?;
    if files.is_empty() {
        anyhow::bail!("No BED files found in {}", samples_dir.display());
    }

    let names = unique_bed_stems(&files)?;

    let samples: Vec<(String, RegionSet)> = files
        .par_iter()
        .zip(names.into_par_iter())
        .map(|(path, name)| -> Result<(String, RegionSet)> { Ok((name, load_regions(path)?)) })
        .collect::<Result<Vec<_>>>()?;

    let support = sample_support(&merged, &samples)
        .with_context(|| format!("Failed to compute sample support from {}", samples_dir.display()))?;
    let written = split_by_support(&support, &output_dir)
        .with_context(|| format!("Failed to write output to {}", output_dir.display()))?;

    log::info!(
        "{} merged regions across {} samples; wrote {} files to {}",
        support.len(),
        samples.len(),
        written.len(),
        output_dir.display()
    );
    Ok(())
}
