use std::path::PathBuf;

use clap::{Arg, Command, value_parser};

pub const ROC_CMD: &str = "roc";
pub const PR_CMD: &str = "pr";
pub const EVALUATE_CMD: &str = "evaluate";

fn input_arg() -> Arg {
    Arg::new("input")
        .long("input")
        .short('i')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Labeled TSV produced by `label`")
}

fn output_arg(help: &'static str) -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .required(false)
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

pub fn create_roc_cli() -> Command {
    Command::new(ROC_CMD)
        .about("Compute the ROC curve and print its AUC.")
        .arg(input_arg())
        .arg(output_arg("Write the curve as `threshold, fpr, tpr` TSV"))
}

pub fn create_pr_cli() -> Command {
    Command::new(PR_CMD)
        .about("Compute the precision-recall curve and print the optimal F1 threshold.")
        .arg(input_arg())
        .arg(output_arg("Write the curve as `threshold, recall, precision` TSV"))
}

pub fn create_evaluate_cli() -> Command {
    Command::new(EVALUATE_CMD)
        .about("Compute ROC AUC and the optimal F1 threshold as a JSON report.")
        .arg(input_arg())
        .arg(output_arg("JSON report path (default: stdout)"))
}
