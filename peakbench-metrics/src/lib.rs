//! Binary classification metrics over labeled regions.
//!
//! Every metric takes a [BinaryScores], which guarantees finite scores and
//! both classes present. A threshold `t` always predicts `score > t`.
//!
//! # Example
//!
//! ```
//! use peakbench_metrics::{BinaryScores, evaluate};
//!
//! let data = BinaryScores::new(vec![0.9, 0.8, 0.7, 0.6], vec![1, 0, 1, 0]).unwrap();
//! let report = evaluate(&data);
//!
//! assert_eq!(report.roc_auc, 0.75);
//! assert_eq!(report.threshold, 0.6);
//! ```

pub mod curves;
pub mod errors;
pub mod report;
pub mod scores;
pub mod threshold;

// re-exports
pub use curves::{PrCurve, RocCurve, precision_recall_curve, roc_auc, roc_curve};
pub use errors::MetricsError;
pub use report::{EvaluationReport, evaluate};
pub use scores::BinaryScores;
pub use threshold::{EPSILON, OptimalThreshold, f1_score, optimal_threshold};
