use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::consts::HG38_AUTOSOMES;
use crate::errors::RegionSetError;
use crate::utils::get_dynamic_reader;

///
/// Chromosome name to length table. Entry order is kept as given so that
/// anything iterating it (e.g. negative sampling) is reproducible.
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChromSizes {
    entries: Vec<(String, u32)>,
}

impl ChromSizes {
    /// Build from `(name, length)` pairs; a repeated name keeps its last length.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, u32)> = Vec::new();
        for (name, len) in pairs {
            let name = name.into();
            match entries.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = len,
                None => entries.push((name, len)),
            }
        }
        ChromSizes { entries }
    }

    /// The hg38 autosomes, chr1 through chr22.
    pub fn hg38_autosomes() -> Self {
        ChromSizes::from_pairs(HG38_AUTOSOMES.iter().map(|(n, l)| (*n, *l)))
    }

    ///
    /// Read a `chrom.sizes` file: whitespace separated `name length`
    /// per line. Blank lines and `#` comments are skipped.
    ///
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<Self, RegionSetError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RegionSetError::FileReadError(path.display().to_string()));
        }
        let reader = get_dynamic_reader(path)?;

        let mut pairs: Vec<(String, u32)> = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut fields = trimmed.split_whitespace();
            let name = fields.next().unwrap_or_default();
            let length = fields
                .next()
                .ok_or_else(|| RegionSetError::ChromSizesParseError {
                    line: idx + 1,
                    message: format!("missing length for chromosome {:?}", name),
                })?
                .parse::<u32>()
                .map_err(|e| RegionSetError::ChromSizesParseError {
                    line: idx + 1,
                    message: format!("can't parse length for chromosome {:?}: {}", name, e),
                })?;
            pairs.push((name.to_string(), length));
        }

        Ok(ChromSizes::from_pairs(pairs))
    }

    pub fn get(&self, chr: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == chr)
            .map(|(_, len)| *len)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, len)| (name.as_str(), *len))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, u32>> for ChromSizes {
    /// Hash maps carry no order, so entries are sorted by name.
    fn from(value: HashMap<String, u32>) -> Self {
        let mut pairs: Vec<(String, u32)> = value.into_iter().collect();
        pairs.sort();
        ChromSizes { entries: pairs }
    }
}
