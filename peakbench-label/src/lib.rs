//! Benchmark labeling of candidate peaks.
//!
//! Candidates are compared with a gold standard and every region ends up in
//! exactly one class: true positive (candidate overlapping the gold standard),
//! false positive (candidate overlapping nothing), false negative (gold region
//! missed by every candidate) or true negative (random background region away
//! from all of the above).
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use peakbench_core::models::{ChromSizes, Region, RegionSet};
//! use peakbench_label::{Labeler, LengthRange};
//!
//! let gold = RegionSet::from(vec![Region::new("chr1", 100, 200).unwrap()]);
//! let peaks = RegionSet::from(vec![Region::scored("chr1", 150, 250, 0.9).unwrap()]);
//!
//! let labeler = Labeler::new(
//!     ChromSizes::from_pairs([("chr1", 10_000)]),
//!     50,
//!     LengthRange::new(100, 200).unwrap(),
//! );
//! let dataset = labeler.label(&gold, &peaks, &mut StdRng::seed_from_u64(42)).unwrap();
//! assert_eq!(dataset.class_counts().tp, 1);
//! ```

pub mod config;
pub mod errors;
pub mod labeler;
pub mod prep;
pub mod sampler;

// re-exports
pub use config::LabelConfig;
pub use errors::LabelError;
pub use labeler::{Labeler, OverlapMode};
pub use prep::select_top_peaks;
pub use sampler::LengthRange;
