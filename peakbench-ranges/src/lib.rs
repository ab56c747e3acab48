//! Interval set algebra for benchmarking region sets.
//!
//! All operations use 0-based half-open coordinates (BED convention), are
//! strand-unaware, and sort their inputs internally, so callers never have
//! to guarantee sorted operands.
//!
//! # Example
//!
//! ```
//! use peakbench_core::models::{Region, RegionSet};
//! use peakbench_ranges::IntervalRanges;
//!
//! let peaks = RegionSet::from(vec![
//!     Region::scored("chr1", 150, 250, 0.9).unwrap(),
//!     Region::scored("chr1", 500, 600, 0.3).unwrap(),
//! ]);
//! let gold = RegionSet::from(vec![Region::new("chr1", 100, 200).unwrap()]);
//!
//! assert_eq!(peaks.intersect(&gold).len(), 1);
//! assert_eq!(peaks.difference(&gold).regions[0].start, 500);
//! ```

pub mod interval_ranges;
pub mod support;

// re-exports
pub use interval_ranges::IntervalRanges;
pub use support::{SupportRegion, sample_support, split_by_support};
