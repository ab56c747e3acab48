use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use rayon::prelude::*;

use peakbench_core::models::RegionSet;
use peakbench_core::utils::{bed_files_in, unique_bed_stems};
use peakbench_label::{LabelConfig, Labeler, LengthRange, OverlapMode};

use crate::utils::{load_regions, progress_bar, required_path};

/// Config file values overridden by any flag given on the command line.
pub fn resolve_config(matches: &ArgMatches) -> Result<LabelConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => LabelConfig::try_from(path.as_path())
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => LabelConfig::default(),
    };

    if let Some(n) = matches.get_one::<usize>("negatives") {
        config.negative_count = *n;
    }

    let min = matches
        .get_one::<u32>("min-length")
        .copied()
        .unwrap_or(config.length_range.min());
    let max = matches
        .get_one::<u32>("max-length")
        .copied()
        .unwrap_or(config.length_range.max());
    config.length_range = LengthRange::new(min, max)?;

    if let Some(mode) = matches.get_one::<String>("mode") {
        config.overlap_mode = mode.parse::<OverlapMode>()?;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(path) = matches.get_one::<PathBuf>("chrom-sizes") {
        config.chrom_sizes = Some(path.clone());
    }

    log::debug!("Labeling config: {:?}", config);
    Ok(config)
}

fn label_file(
    labeler: &Labeler,
    config: &LabelConfig,
    gold: &RegionSet,
    peaks: &Path,
    output: &Path,
    rng_offset: u64,
) -> Result<()> {
    let candidates = load_regions(peaks)?;
    let dataset = labeler
        .label(gold, &candidates, &mut config.rng(rng_offset))
        .with_context(|| format!("Failed to label {}", peaks.display()))?;
    dataset
        .to_tsv(output)
        .with_context(|| format!("Failed to write output to {}", output.display()))?;
    log::info!("Labeled {} regions written to {}", dataset.len(), output.display());
    Ok(())
}

pub fn run_label(matches: &ArgMatches) -> Result<()> {
    let gold_path = required_path(matches, "gold-standard")?;
    let peaks = required_path(matches, "peaks")?;
    let output = required_path(matches, "output")?;

    let config = resolve_config(matches)?;
    let labeler = config.build_labeler()?;
    let gold = load_regions(&gold_path)?;

    label_file(&labeler, &config, &gold, &peaks, &output, 0)
}

pub fn run_label_batch(matches: &ArgMatches) -> Result<()> {
    let gold_path = required_path(matches, "gold-standard")?;
    let peaks_dir = required_path(matches, "peaks-dir")?;
    let output_dir = required_path(matches, "output-dir")?;

    let config = resolve_config(matches)?;
    let labeler = config.build_labeler()?;
    let gold = load_regions(&gold_path)?;

    let files = bed_files_in(&peaks_dir)?;
    if files.is_empty() {
        anyhow::bail!("No BED files found in {}", peaks_dir.display());
    }
    let stems = unique_bed_stems(&files)?;
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let pb = progress_bar(files.len(), "files labeled");
    let failures: usize = files
        .par_iter()
        .zip(stems.par_iter())
        .enumerate()
        .map(|(idx, (peaks, stem))| {
            let output = output_dir.join(format!("{}_labeled.tsv", stem));
            let result = label_file(&labeler, &config, &gold, peaks, &output, idx as u64);
            pb.inc(1);
            match result {
                Ok(()) => 0,
                Err(e) => {
                    log::error!("Skipping {}: {:#}", peaks.display(), e);
                    1
                }
            }
        })
        .sum();
    pb.finish_and_clear();

    log::info!(
        "Labeled {} of {} files into {}",
        files.len() - failures,
        files.len(),
        output_dir.display()
    );
    Ok(())
}
