use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::curves::roc_auc;
use crate::scores::BinaryScores;
use crate::threshold::optimal_threshold;

///
/// Summary of one benchmark: ROC AUC and the optimal F1 operating point.
///
/// A `threshold` of `-inf` (every region predicted positive) is written as
/// `null` in JSON.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub n_positive: usize,
    pub n_negative: usize,
    pub roc_auc: f64,
    pub f1: f64,
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
}

pub fn evaluate(data: &BinaryScores) -> EvaluationReport {
    let auc = roc_auc(data);
    let best = optimal_threshold(data);

    log::info!(
        "AUC {:.4}, best F1 {:.4} at threshold {} (precision {:.4}, recall {:.4})",
        auc,
        best.f1,
        best.threshold,
        best.precision,
        best.recall
    );

    EvaluationReport {
        n_positive: data.n_positive(),
        n_negative: data.n_negative(),
        roc_auc: auc,
        f1: best.f1,
        threshold: best.threshold,
        precision: best.precision,
        recall: best.recall,
    }
}

impl EvaluationReport {
    pub fn to_json<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut file, self)?;
        writeln!(file)?;
        file.flush()
    }
}
