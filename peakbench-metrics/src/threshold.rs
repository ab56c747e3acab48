use serde::Serialize;

use crate::curves::{ThresholdCounts, threshold_counts};
use crate::scores::BinaryScores;

/// Smoothing term keeping F1 defined when precision and recall are both zero.
pub const EPSILON: f64 = 1e-7;

/// `2PR / (P + R + EPSILON)`
pub fn f1_from_precision_recall(precision: f64, recall: f64) -> f64 {
    2.0 * precision * recall / (precision + recall + EPSILON)
}

fn f1_from_counts(counts: &ThresholdCounts) -> f64 {
    f1_from_precision_recall(counts.precision(), counts.recall())
}

/// The F1-maximizing point of the precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalThreshold {
    pub f1: f64,
    pub threshold: f64,
    pub precision: f64,
    pub recall: f64,
}

///
/// F1 of the `score > threshold` predictions.
///
pub fn f1_score(data: &BinaryScores, threshold: f64) -> f64 {
    let (mut tp, mut fp) = (0, 0);
    for (score, label) in data.scores().iter().zip(data.labels()) {
        if *score > threshold {
            match label {
                true => tp += 1,
                false => fp += 1,
            }
        }
    }
    f1_from_counts(&ThresholdCounts {
        threshold,
        tp,
        fp,
        fn_: data.n_positive() - tp,
        tn: data.n_negative() - fp,
    })
}

///
/// Scan the precision-recall curve for the highest F1.
///
/// Points are visited from the highest threshold down and only a strictly
/// better F1 replaces the current best, so ties go to the higher threshold.
/// `f1_score(data, best.threshold)` gives back exactly `best.f1`.
///
pub fn optimal_threshold(data: &BinaryScores) -> OptimalThreshold {
    let mut best: Option<OptimalThreshold> = None;
    for counts in threshold_counts(data) {
        let f1 = f1_from_counts(&counts);
        if best.is_none_or(|b| f1 > b.f1) {
            best = Some(OptimalThreshold {
                f1,
                threshold: counts.threshold,
                precision: counts.precision(),
                recall: counts.recall(),
            });
        }
    }

    // the sweep always holds at least the final -inf point
    best.unwrap_or(OptimalThreshold {
        f1: 0.0,
        threshold: f64::NEG_INFINITY,
        precision: 0.0,
        recall: 0.0,
    })
}
