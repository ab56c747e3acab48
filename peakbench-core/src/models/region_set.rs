use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::RegionSetError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

///
/// RegionSet struct, the representation of an interval file such as a
/// gold standard or a peak file.
///
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    pub regions: Vec<Region>,
    pub header: Option<String>,
    pub path: Option<PathBuf>,
}

pub struct RegionSetIterator<'a> {
    region_set: &'a RegionSet,
    index: usize,
}

///
/// Parse one BED record: `chr, start, end[, name[, score[, rest...]]]`.
/// Columns past the 5th are kept unparsed in [Region::rest].
///
pub fn parse_bed_line(line: &str, line_number: usize) -> Result<Region, RegionSetError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 3 {
        return Err(RegionSetError::RegionParseError {
            line: line_number,
            message: format!("expected at least 3 columns, found {}", parts.len()),
        });
    }

    let start = parts[1]
        .trim()
        .parse::<u32>()
        .map_err(|_| RegionSetError::RegionParseError {
            line: line_number,
            message: format!("can't parse start position: {:?}", parts[1]),
        })?;
    let end = parts[2]
        .trim()
        .parse::<u32>()
        .map_err(|_| RegionSetError::RegionParseError {
            line: line_number,
            message: format!("can't parse end position: {:?}", parts[2]),
        })?;

    let mut region = Region::new(parts[0], start, end).map_err(|e| e.at_line(line_number))?;

    region.name = parts
        .get(3)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string);

    region.score = match parts.get(4).map(|s| s.trim()) {
        None | Some("") | Some(".") => None,
        Some(raw) => Some(raw.parse::<f64>().map_err(|_| {
            RegionSetError::RegionParseError {
                line: line_number,
                message: format!("can't parse score: {:?}", raw),
            }
        })?),
    };

    region.rest = Some(parts.get(5..).unwrap_or_default().join("\t")).filter(|s| !s.is_empty());

    Ok(region)
}

impl TryFrom<&Path> for RegionSet {
    type Error = RegionSetError;

    ///
    /// Create a new [RegionSet] from a bed file (optionally gzipped).
    /// Any malformed record aborts the read.
    fn try_from(value: &Path) -> Result<Self, RegionSetError> {
        if !value.is_file() {
            return Err(RegionSetError::FileReadError(value.display().to_string()));
        }
        let reader = get_dynamic_reader(value)?;

        let mut regions: Vec<Region> = Vec::new();
        let mut header: String = String::new();
        let mut first_line: bool = true;

        for (idx, line) in reader.lines().enumerate() {
            let string_line = line?;
            let line_number = idx + 1;

            if string_line.trim().is_empty() {
                continue;
            }

            if string_line.starts_with("browser")
                | string_line.starts_with("track")
                | string_line.starts_with('#')
            {
                header.push_str(&string_line);
                continue;
            }

            // column headers like `chr start end` without a leading #
            if first_line {
                first_line = false;
                let mut parts = string_line.split('\t');
                let is_header = match parts.nth(1) {
                    Some(start) => start.trim().parse::<u32>().is_err(),
                    None => false,
                };
                if is_header {
                    header.push_str(&string_line);
                    continue;
                }
            }

            regions.push(parse_bed_line(&string_line, line_number)?);
        }

        if regions.is_empty() {
            log::warn!("0 regions found in file: {}", value.display());
        }

        Ok(RegionSet {
            regions,
            header: match header.is_empty() {
                true => None,
                false => Some(header),
            },
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: String) -> Result<Self, RegionSetError> {
        RegionSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for RegionSet {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self, RegionSetError> {
        RegionSet::try_from(value.as_path())
    }
}

impl From<Vec<Region>> for RegionSet {
    fn from(regions: Vec<Region>) -> Self {
        RegionSet {
            regions,
            header: None,
            path: None,
        }
    }
}

impl<'a> Iterator for RegionSetIterator<'a> {
    type Item = &'a Region;

    fn next(&mut self) -> Option<Self::Item> {
        let region = self.region_set.regions.get(self.index)?;
        self.index += 1;
        Some(region)
    }
}

impl<'a> IntoIterator for &'a RegionSet {
    type Item = &'a Region;
    type IntoIter = RegionSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        RegionSetIterator {
            region_set: self,
            index: 0,
        }
    }
}

impl RegionSet {
    ///
    /// Save a regionset to disk as bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn to_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        if path.exists() {
            log::debug!("Overwriting existing file: {}", path.display());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(File::create(path)?);
        self.write_bed(&mut file)?;
        file.flush()
    }

    /// Write every region as one BED line.
    pub fn write_bed<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for region in &self.regions {
            writeln!(writer, "{}", region.as_string())?;
        }
        Ok(())
    }

    ///
    /// Sort regions by `(chr, start, end)`.
    /// Sorting is happening inside the object,
    /// where original order will be overwritten
    ///
    pub fn sort(&mut self) {
        self.regions.sort_by(|a, b| a.coord_cmp(b));
    }

    /// Consume and return the set sorted by `(chr, start, end)`.
    pub fn sorted(mut self) -> Self {
        self.sort();
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.regions
            .windows(2)
            .all(|w| w[0].coord_cmp(&w[1]).is_le())
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    ///
    /// Iterate through regions located on specific Chromosome in RegionSet
    ///
    pub fn iter_chr_regions<'a>(&'a self, chr: &'a str) -> impl Iterator<Item = &'a Region> {
        self.regions.iter().filter(move |r| r.chr == chr)
    }

    /// Concatenate two sets without sorting or merging.
    pub fn concat(&self, other: &RegionSet) -> RegionSet {
        let mut regions = self.regions.clone();
        regions.extend(other.regions.iter().cloned());
        RegionSet::from(regions)
    }
}

impl Display for RegionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionSet with {} regions.", self.len())
    }
}
