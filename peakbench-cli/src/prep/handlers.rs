use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use peakbench_core::utils::{bed_files_in, unique_bed_stems};
use peakbench_label::select_top_peaks;

use crate::utils::{load_regions, progress_bar, required_path};

fn select_file(input: &Path, output: &Path, top_n: usize) -> Result<()> {
    let peaks = load_regions(input)?;
    let selected = select_top_peaks(&peaks, top_n)
        .with_context(|| format!("Failed to select peaks from {}", input.display()))?;
    selected
        .to_bed(output)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;
    log::debug!(
        "Kept {} of {} peaks from {}",
        selected.len(),
        peaks.len(),
        input.display()
    );
    Ok(())
}

pub fn run_select(matches: &ArgMatches) -> Result<()> {
    let input_dir = required_path(matches, "input-dir")?;
    let output_dir = required_path(matches, "output-dir")?;
    let top_n = *matches
        .get_one::<usize>("top-n")
        .context("--top-n is required")?;

    let files = bed_files_in(&input_dir)?;
    let stems = unique_bed_stems(&files)?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let pb = progress_bar(files.len(), "files selected");
    let mut failures = 0;
    for (input, stem) in files.iter().zip(&stems) {
        // gzipped input is written back uncompressed
        let output = output_dir.join(format!("{}.bed", stem));
        if let Err(e) = select_file(input, &output, top_n) {
            log::error!("Skipping {}: {:#}", input.display(), e);
            failures += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    log::info!(
        "Selected top {} peaks for {} of {} files into {}",
        top_n,
        files.len() - failures,
        files.len(),
        output_dir.display()
    );
    Ok(())
}
