use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub const SUPPORT_CMD: &str = "support";

pub fn create_support_cli() -> Command {
    Command::new(SUPPORT_CMD)
        .about("Count the samples supporting each merged region and split regions by support level.")
        .arg(
            Arg::new("merged")
                .long("merged")
                .short('m')
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Merged BED file, e.g. from `merge-all`"),
        )
        .arg(
            Arg::new("samples-dir")
                .long("samples-dir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Folder of scored peak BED files, one per sample"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .short('o')
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Folder for the regions_present_in_{k}_samples_or_more.bed files"),
        )
}
