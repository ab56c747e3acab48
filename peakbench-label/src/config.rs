use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use peakbench_core::models::ChromSizes;

use crate::errors::{LabelError, LabelResult};
use crate::labeler::{Labeler, OverlapMode};
use crate::sampler::LengthRange;

///
/// Settings of a labeling run, usually read from a TOML file:
///
/// ```toml
/// negative_count = 800000
/// length_range = [200, 400]
/// overlap_mode = "region"
/// seed = 42
/// chrom_sizes = "hg38.chrom.sizes"
/// ```
///
/// Every key is optional.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Size of the background pool the true negatives are drawn from.
    pub negative_count: usize,
    pub length_range: LengthRange,
    pub overlap_mode: OverlapMode,
    /// Fixed seed for a reproducible run. Without one the RNG is seeded
    /// from the operating system.
    pub seed: Option<u64>,
    /// `chrom.sizes` file bounding the background regions. Defaults to the
    /// hg38 autosomes.
    pub chrom_sizes: Option<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        LabelConfig {
            negative_count: 800_000,
            length_range: LengthRange::default(),
            overlap_mode: OverlapMode::default(),
            seed: None,
            chrom_sizes: None,
        }
    }
}

impl TryFrom<&Path> for LabelConfig {
    type Error = LabelError;

    fn try_from(path: &Path) -> LabelResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl LabelConfig {
    pub fn to_toml(&self) -> LabelResult<String> {
        toml::to_string(self).map_err(|e| LabelError::Config(e.to_string()))
    }

    /// Chromosome sizes from `chrom_sizes`, or the hg38 autosomes when unset.
    pub fn load_chrom_sizes(&self) -> LabelResult<ChromSizes> {
        match &self.chrom_sizes {
            Some(path) => Ok(ChromSizes::from_file(path)?),
            None => Ok(ChromSizes::hg38_autosomes()),
        }
    }

    pub fn build_labeler(&self) -> LabelResult<Labeler> {
        let labeler = Labeler::new(self.load_chrom_sizes()?, self.negative_count, self.length_range)
            .with_overlap_mode(self.overlap_mode);
        Ok(labeler)
    }

    /// RNG for one run; `offset` separates the streams of a batch run.
    pub fn rng(&self, offset: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
            None => StdRng::from_os_rng(),
        }
    }
}
