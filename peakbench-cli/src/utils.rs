use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};

use peakbench_core::models::RegionSet;

/// Value of an argument clap already enforces as required.
pub fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    matches
        .get_one::<PathBuf>(id)
        .cloned()
        .with_context(|| format!("--{} is required", id))
}

pub fn load_regions(path: &Path) -> Result<RegionSet> {
    RegionSet::try_from(path).with_context(|| format!("Failed to load BED file {}", path.display()))
}

/// Write to `output`, or to stdout when no path is given.
pub fn write_regions(rs: &RegionSet, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(p) => {
            rs.to_bed(p)
                .with_context(|| format!("Failed to write output to {}", p.display()))?;
            log::info!("Output written to {}", p.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            rs.write_bed(&mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

pub fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb
}
