use std::cmp::Ordering;
use std::fmt::{self, Display};

use crate::errors::RegionSetError;

///
/// Region struct, representation of one half-open `[start, end)` interval
/// in a BED-like file, with the optional peak name and detector score
/// carried in the 4th and 5th columns. Any further columns (narrowPeak
/// signal, p-value, summit...) are kept verbatim in `rest`.
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub name: Option<String>,
    pub score: Option<f64>,
    pub rest: Option<String>,
}

impl Region {
    ///
    /// Create a bare interval. Fails with [RegionSetError::InvalidInterval]
    /// unless `end > start`.
    ///
    pub fn new(chr: &str, start: u32, end: u32) -> Result<Self, RegionSetError> {
        if end <= start {
            return Err(RegionSetError::InvalidInterval {
                chr: chr.to_string(),
                start,
                end,
                line: None,
            });
        }
        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            name: None,
            score: None,
            rest: None,
        })
    }

    ///
    /// Create a scored interval (a detector peak).
    ///
    pub fn scored(chr: &str, start: u32, end: u32, score: f64) -> Result<Self, RegionSetError> {
        let mut region = Region::new(chr, start, end)?;
        region.score = Some(score);
        Ok(region)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    ///
    /// Get length of the region
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Strict overlap on the same chromosome. Bookended regions
    /// (`self.end == other.start`) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chr == other.chr && self.start < other.end && self.end > other.start
    }

    /// Canonical `(chr, start, end)` ordering used for every sorted output.
    #[inline]
    pub fn coord_cmp(&self, other: &Region) -> Ordering {
        self.chr
            .cmp(&other.chr)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }

    /// Same coordinates, no metadata.
    pub fn coordinates(&self) -> Region {
        Region {
            chr: self.chr.clone(),
            start: self.start,
            end: self.end,
            name: None,
            score: None,
            rest: None,
        }
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        let mut line = format!("{}\t{}\t{}", self.chr, self.start, self.end);
        match (&self.name, self.score, &self.rest) {
            (None, None, None) => {}
            (Some(name), None, None) => line.push_str(&format!("\t{}", name)),
            (name, score, rest) => {
                let name = name.as_deref().unwrap_or(".");
                let score = score.map_or(".".to_string(), |s| s.to_string());
                line.push_str(&format!("\t{}\t{}", name, score));
                if let Some(rest) = rest {
                    line.push_str(&format!("\t{}", rest));
                }
            }
        }
        line
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chr, self.start, self.end)
    }
}
