use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub const LABEL_CMD: &str = "label";
pub const LABEL_BATCH_CMD: &str = "label-batch";

fn labeling_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("gold-standard")
            .long("gold-standard")
            .short('g')
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Gold standard BED file"),
    )
    .arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML file with labeling settings; flags below override it"),
    )
    .arg(
        Arg::new("chrom-sizes")
            .long("chrom-sizes")
            .value_parser(value_parser!(PathBuf))
            .help("chrom.sizes file bounding the true negatives (default: hg38 chr1-chr22)"),
    )
    .arg(
        Arg::new("negatives")
            .long("negatives")
            .short('n')
            .value_parser(value_parser!(usize))
            .help("Number of background regions sampled for true negatives (default: 800000)"),
    )
    .arg(
        Arg::new("min-length")
            .long("min-length")
            .value_parser(value_parser!(u32))
            .help("Shortest sampled background region (default: 200)"),
    )
    .arg(
        Arg::new("max-length")
            .long("max-length")
            .value_parser(value_parser!(u32))
            .help("Sampled background regions are shorter than this (default: 400)"),
    )
    .arg(
        Arg::new("mode")
            .long("mode")
            .value_parser(["region", "clipped"])
            .help("Overlap mode: whole regions or clipped to the overlap (default: region)"),
    )
    .arg(
        Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .help("Random seed for reproducible true negatives and synthetic scores"),
    )
}

pub fn create_label_cli() -> Command {
    labeling_args(
        Command::new(LABEL_CMD)
            .about("Label a peak file against a gold standard as TP/FP/FN/TN.")
            .arg(
                Arg::new("peaks")
                    .long("peaks")
                    .short('p')
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Scored peak BED file (score in the 5th column)"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Labeled TSV output"),
            ),
    )
}

pub fn create_label_batch_cli() -> Command {
    labeling_args(
        Command::new(LABEL_BATCH_CMD)
            .about("Label every BED file of a folder against one gold standard.")
            .arg(
                Arg::new("peaks-dir")
                    .long("peaks-dir")
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Folder of scored peak BED files"),
            )
            .arg(
                Arg::new("output-dir")
                    .long("output-dir")
                    .short('o')
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Folder for the labeled TSV files"),
            ),
    )
}
