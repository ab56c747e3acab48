//! ROC and precision-recall curves.
//!
//! Both curves are built from the same threshold sweep: the distinct scores
//! in descending order, followed by `-inf`. At threshold `t` a record is
//! predicted positive when `score > t`, so the first point predicts nothing
//! and the last one predicts everything.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::scores::BinaryScores;

/// Confusion counts of the `score > threshold` predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdCounts {
    pub threshold: f64,
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tn: usize,
}

impl ThresholdCounts {
    pub fn tpr(&self) -> f64 {
        self.tp as f64 / (self.tp + self.fn_) as f64
    }

    pub fn fpr(&self) -> f64 {
        self.fp as f64 / (self.fp + self.tn) as f64
    }

    /// 1.0 when nothing is predicted positive.
    pub fn precision(&self) -> f64 {
        match self.tp + self.fp {
            0 => 1.0,
            predicted => self.tp as f64 / predicted as f64,
        }
    }

    pub fn recall(&self) -> f64 {
        self.tpr()
    }
}

///
/// Counts for every threshold of the sweep, in descending threshold order.
///
pub fn threshold_counts(data: &BinaryScores) -> Vec<ThresholdCounts> {
    let scores = data.scores();
    let labels = data.labels();
    let (n_pos, n_neg) = (data.n_positive(), data.n_negative());

    let order = data.descending_order();
    let mut sweep = Vec::new();
    let (mut tp, mut fp) = (0, 0);

    let mut i = 0;
    while i < order.len() {
        let threshold = scores[order[i]];
        sweep.push(ThresholdCounts {
            threshold,
            tp,
            fp,
            fn_: n_pos - tp,
            tn: n_neg - fp,
        });
        // everything tied at this score turns positive once the threshold drops below it
        while i < order.len() && scores[order[i]] == threshold {
            match labels[order[i]] {
                true => tp += 1,
                false => fp += 1,
            }
            i += 1;
        }
    }
    sweep.push(ThresholdCounts {
        threshold: f64::NEG_INFINITY,
        tp,
        fp,
        fn_: n_pos - tp,
        tn: n_neg - fp,
    });

    sweep
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub fpr: f64,
    pub tpr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RocCurve {
    /// From `(0, 0)` to `(1, 1)`, non-decreasing in both rates.
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrPoint {
    pub threshold: f64,
    pub recall: f64,
    pub precision: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrCurve {
    /// In descending threshold order, starting at recall 0.
    pub points: Vec<PrPoint>,
}

/// Trapezoidal area under `(x, y)` points sorted by `x`.
fn trapezoid(points: impl Iterator<Item = (f64, f64)>) -> f64 {
    let mut area = 0.0;
    let mut prev: Option<(f64, f64)> = None;
    for (x, y) in points {
        if let Some((x_prev, y_prev)) = prev {
            area += (x - x_prev) * (y + y_prev) / 2.0;
        }
        prev = Some((x, y));
    }
    area
}

pub fn roc_curve(data: &BinaryScores) -> RocCurve {
    let points: Vec<RocPoint> = threshold_counts(data)
        .iter()
        .map(|c| RocPoint {
            threshold: c.threshold,
            fpr: c.fpr(),
            tpr: c.tpr(),
        })
        .collect();
    let auc = trapezoid(points.iter().map(|p| (p.fpr, p.tpr)));

    log::debug!("ROC curve with {} points, AUC {:.4}", points.len(), auc);

    RocCurve { points, auc }
}

pub fn roc_auc(data: &BinaryScores) -> f64 {
    roc_curve(data).auc
}

pub fn precision_recall_curve(data: &BinaryScores) -> PrCurve {
    let points = threshold_counts(data)
        .iter()
        .map(|c| PrPoint {
            threshold: c.threshold,
            recall: c.recall(),
            precision: c.precision(),
        })
        .collect();
    PrCurve { points }
}

impl RocCurve {
    /// Write `threshold, fpr, tpr` rows under a header line.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "threshold\tfpr\ttpr")?;
        for p in &self.points {
            writeln!(writer, "{}\t{}\t{}", p.threshold, p.fpr, p.tpr)?;
        }
        Ok(())
    }

    pub fn to_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut file)?;
        file.flush()
    }
}

impl PrCurve {
    /// Write `threshold, recall, precision` rows under a header line.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "threshold\trecall\tprecision")?;
        for p in &self.points {
            writeln!(writer, "{}\t{}\t{}", p.threshold, p.recall, p.precision)?;
        }
        Ok(())
    }

    pub fn to_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut file)?;
        file.flush()
    }
}
