use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error(
        "Both classes are required: found {positives} positive and {negatives} negative records"
    )]
    DegenerateLabelSet { positives: usize, negatives: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type MetricsResult<T> = std::result::Result<T, MetricsError>;
