//! Core data model for benchmarking peak calls against a gold standard.
//!
//! - [models::Region] / [models::RegionSet]: half-open BED intervals with an
//!   optional peak name and detector score.
//! - [models::LabeledRegion] / [models::LabeledDataset]: regions tagged
//!   TP/FP/FN/TN, read and written as headerless TSV.
//! - [models::ChromSizes]: ordered chromosome length table.

pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;
