use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub const SELECT_CMD: &str = "select";

pub fn create_select_cli() -> Command {
    Command::new(SELECT_CMD)
        .about("Keep the top scoring peaks on numbered chromosomes for every BED file of a folder.")
        .arg(
            Arg::new("input-dir")
                .long("input-dir")
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
                .help("Folder for the selected peaks; file names are kept"),
        )
        .arg(
            Arg::new("top-n")
                .long("top-n")
                .short('n')
                .required(true)
                .value_parser(value_parser!(usize))
                .help("Number of peaks to keep per file"),
        )
}
