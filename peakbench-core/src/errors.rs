use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error(
        "Invalid interval {chr}:{start}-{end}{}: end must be greater than start",
        line_suffix(.line)
    )]
    InvalidInterval {
        chr: String,
        start: u32,
        end: u32,
        line: Option<usize>,
    },

    #[error("Error parsing region at line {line}: {message}")]
    RegionParseError { line: usize, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Error parsing chrom sizes at line {line}: {message}")]
    ChromSizesParseError { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map_or(String::new(), |l| format!(" (line {})", l))
}

impl RegionSetError {
    /// Attach the line number of the offending record to an interval error.
    pub(crate) fn at_line(self, line_number: usize) -> Self {
        match self {
            RegionSetError::InvalidInterval {
                chr, start, end, ..
            } => RegionSetError::InvalidInterval {
                chr,
                start,
                end,
                line: Some(line_number),
            },
            other => other,
        }
    }
}
