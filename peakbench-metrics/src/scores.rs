use peakbench_core::models::LabeledDataset;

use crate::errors::{MetricsError, MetricsResult};

///
/// Scores and binary labels of a labeled dataset, checked once so that every
/// metric can assume finite scores, labels in `{0, 1}` and both classes present.
///
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryScores {
    scores: Vec<f64>,
    labels: Vec<bool>,
    n_positive: usize,
}

impl BinaryScores {
    ///
    /// # Errors
    /// - [MetricsError::InvalidInput] on a length mismatch, a label other than
    ///   0 or 1, or a NaN/infinite score. The message names the first bad index.
    /// - [MetricsError::DegenerateLabelSet] if either class is missing.
    pub fn new(scores: Vec<f64>, labels: Vec<u8>) -> MetricsResult<Self> {
        if scores.len() != labels.len() {
            return Err(MetricsError::InvalidInput(format!(
                "{} scores but {} labels",
                scores.len(),
                labels.len()
            )));
        }

        if let Some(idx) = scores.iter().position(|s| !s.is_finite()) {
            return Err(MetricsError::InvalidInput(format!(
                "score at index {} is not a finite number: {}",
                idx, scores[idx]
            )));
        }

        let mut binary = Vec::with_capacity(labels.len());
        for (idx, label) in labels.iter().enumerate() {
            match label {
                0 => binary.push(false),
                1 => binary.push(true),
                other => {
                    return Err(MetricsError::InvalidInput(format!(
                        "label at index {} must be 0 or 1, found {}",
                        idx, other
                    )));
                }
            }
        }

        let n_positive = binary.iter().filter(|l| **l).count();
        let n_negative = binary.len() - n_positive;
        if n_positive == 0 || n_negative == 0 {
            return Err(MetricsError::DegenerateLabelSet {
                positives: n_positive,
                negatives: n_negative,
            });
        }

        Ok(BinaryScores {
            scores,
            labels: binary,
            n_positive,
        })
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn n_positive(&self) -> usize {
        self.n_positive
    }

    pub fn n_negative(&self) -> usize {
        self.labels.len() - self.n_positive
    }

    /// Record indices ordered by descending score; ties keep input order.
    pub(crate) fn descending_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));
        order
    }
}

impl TryFrom<&LabeledDataset> for BinaryScores {
    type Error = MetricsError;

    fn try_from(value: &LabeledDataset) -> MetricsResult<Self> {
        // report the offending region rather than a bare index
        if let Some(bad) = value.records.iter().find(|r| !r.score.is_finite()) {
            return Err(MetricsError::InvalidInput(format!(
                "region {} has a non-finite score: {}",
                bad.region, bad.score
            )));
        }
        BinaryScores::new(value.scores(), value.labels())
    }
}
