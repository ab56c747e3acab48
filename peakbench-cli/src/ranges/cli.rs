use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub const MERGE_CMD: &str = "merge";
pub const MERGE_ALL_CMD: &str = "merge-all";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .about("Sort a BED file and merge overlapping and adjacent intervals.")
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Input BED file"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("Output BED file (default: stdout)"),
        )
}

pub fn create_merge_all_cli() -> Command {
    Command::new(MERGE_ALL_CMD)
        .about("Concatenate every BED file of a folder and merge the result into one union.")
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Folder of BED files"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Output BED file"),
        )
}
