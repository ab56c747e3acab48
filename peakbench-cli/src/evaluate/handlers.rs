use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use peakbench_core::models::LabeledDataset;
use peakbench_metrics::{BinaryScores, evaluate, optimal_threshold, precision_recall_curve, roc_curve};

use crate::utils::required_path;

pub fn load_scores(path: &Path) -> Result<BinaryScores> {
    let dataset = LabeledDataset::try_from(path)
        .with_context(|| format!("Failed to load labeled file {}", path.display()))?;
    let counts = dataset.class_counts();
    log::debug!(
        "{}: {} TP, {} FP, {} FN, {} TN",
        path.display(),
        counts.tp,
        counts.fp,
        counts.fn_,
        counts.tn
    );
    BinaryScores::try_from(&dataset)
        .with_context(|| format!("Can't compute metrics for {}", path.display()))
}

pub fn run_roc(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let data = load_scores(&input)?;

    let curve = roc_curve(&data);
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        curve
            .to_tsv(output)
            .with_context(|| format!("Failed to write output to {}", output.display()))?;
        log::info!("ROC curve written to {}", output.display());
    }

    println!("{}", curve.auc);
    Ok(())
}

pub fn run_pr(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let data = load_scores(&input)?;

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        precision_recall_curve(&data)
            .to_tsv(output)
            .with_context(|| format!("Failed to write output to {}", output.display()))?;
        log::info!("Precision-recall curve written to {}", output.display());
    }

    let best = optimal_threshold(&data);
    println!("f1\tthreshold\tprecision\trecall");
    println!(
        "{}\t{}\t{}\t{}",
        best.f1, best.threshold, best.precision, best.recall
    );
    Ok(())
}

pub fn run_evaluate(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let data = load_scores(&input)?;
    let report = evaluate(&data);

    match matches.get_one::<PathBuf>("output") {
        Some(output) => {
            report
                .to_json(output)
                .with_context(|| format!("Failed to write output to {}", output.display()))?;
            log::info!("Report written to {}", output.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
