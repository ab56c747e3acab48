pub mod chrom_sizes;
pub mod labeled;
pub mod region;
pub mod region_set;

// re-export for cleaner imports
pub use self::chrom_sizes::ChromSizes;
pub use self::labeled::{ClassCounts, LabelClass, LabeledDataset, LabeledRegion};
pub use self::region::Region;
pub use self::region_set::RegionSet;
