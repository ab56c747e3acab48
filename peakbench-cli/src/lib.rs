pub mod evaluate;
pub mod label;
pub mod prep;
pub mod ranges;
pub mod support;
pub mod utils;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::Level;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "peakbench";
}

pub fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Benchmark peak calls against a gold standard: label regions as TP/FP/FN/TN and compute ROC and precision-recall metrics.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log debug messages"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors"),
        )
        .subcommand(label::cli::create_label_cli())
        .subcommand(label::cli::create_label_batch_cli())
        .subcommand(evaluate::cli::create_roc_cli())
        .subcommand(evaluate::cli::create_pr_cli())
        .subcommand(evaluate::cli::create_evaluate_cli())
        .subcommand(ranges::cli::create_merge_cli())
        .subcommand(ranges::cli::create_merge_all_cli())
        .subcommand(prep::cli::create_select_cli())
        .subcommand(support::cli::create_support_cli())
}

pub fn log_level(matches: &ArgMatches) -> Level {
    if matches.get_flag("verbose") {
        Level::Debug
    } else if matches.get_flag("quiet") {
        Level::Warn
    } else {
        Level::Info
    }
}

pub fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // LABELING
        //
        Some((label::cli::LABEL_CMD, matches)) => label::handlers::run_label(matches),
        Some((label::cli::LABEL_BATCH_CMD, matches)) => {
            label::handlers::run_label_batch(matches)
        }

        //
        // METRICS
        //
        Some((evaluate::cli::ROC_CMD, matches)) => evaluate::handlers::run_roc(matches),
        Some((evaluate::cli::PR_CMD, matches)) => evaluate::handlers::run_pr(matches),
        Some((evaluate::cli::EVALUATE_CMD, matches)) => evaluate::handlers::run_evaluate(matches),

        //
        // GOLD STANDARD CONSTRUCTION
        //
        Some((ranges::cli::MERGE_CMD, matches)) => ranges::handlers::run_merge(matches),
        Some((ranges::cli::MERGE_ALL_CMD, matches)) => ranges::handlers::run_merge_all(matches),
        Some((prep::cli::SELECT_CMD, matches)) => prep::handlers::run_select(matches),
        Some((support::cli::SUPPORT_CMD, matches)) => support::handlers::run_support(matches),

        _ => unreachable!("Subcommand not found"),
    }
}
