use peakbench_core::errors::RegionSetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error(
        "Invalid chromosome length: {chr} has length {length}, but sampled regions can be up to {max_length} bp long"
    )]
    InvalidChromosomeLength {
        chr: String,
        length: u32,
        max_length: u32,
    },

    #[error("Invalid length range [{min}, {max}): expected 0 < min < max")]
    InvalidLengthRange { min: u32, max: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    RegionSet(#[from] RegionSetError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type LabelResult<T> = std::result::Result<T, LabelError>;
