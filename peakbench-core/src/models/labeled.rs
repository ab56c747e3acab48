use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::consts::MISSING_NAME;
use crate::errors::RegionSetError;
use crate::models::Region;
use crate::utils::get_dynamic_reader;

/// Outcome of comparing one region against the gold standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::upper_case_acronyms)]
pub enum LabelClass {
    TP,
    FP,
    FN,
    TN,
}

impl LabelClass {
    /// Binary ground-truth label: 1 for TP/FN, 0 for FP/TN.
    pub fn label(&self) -> u8 {
        match self {
            LabelClass::TP | LabelClass::FN => 1,
            LabelClass::FP | LabelClass::TN => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelClass::TP => "TP",
            LabelClass::FP => "FP",
            LabelClass::FN => "FN",
            LabelClass::TN => "TN",
        }
    }
}

impl Display for LabelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LabelClass {
    type Err = RegionSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TP" => Ok(LabelClass::TP),
            "FP" => Ok(LabelClass::FP),
            "FN" => Ok(LabelClass::FN),
            "TN" => Ok(LabelClass::TN),
            other => Err(RegionSetError::InvalidInput(format!(
                "unknown label class: {:?}",
                other
            ))),
        }
    }
}

///
/// A region with its benchmark outcome and the score used for ranking.
///
/// The binary label is derived from the class, so a region can never carry
/// a label that disagrees with its class.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledRegion {
    pub region: Region,
    pub score: f64,
    pub class: LabelClass,
}

impl LabeledRegion {
    pub fn new(region: Region, score: f64, class: LabelClass) -> Self {
        LabeledRegion {
            region,
            score,
            class,
        }
    }

    pub fn label(&self) -> u8 {
        self.class.label()
    }

    /// `chr, start, end, peak_name, score, label, label_class`
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.region.chr,
            self.region.start,
            self.region.end,
            self.region.name.as_deref().unwrap_or(MISSING_NAME),
            self.score,
            self.label(),
            self.class
        )
    }
}

/// Number of regions per label class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassCounts {
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tn: usize,
}

impl ClassCounts {
    pub fn positives(&self) -> usize {
        self.tp + self.fn_
    }

    pub fn negatives(&self) -> usize {
        self.fp + self.tn
    }
}

///
/// The output of one labeling run, kept sorted by `(chr, start, end)`.
///
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    pub records: Vec<LabeledRegion>,
    pub path: Option<PathBuf>,
}

impl From<Vec<LabeledRegion>> for LabeledDataset {
    fn from(mut records: Vec<LabeledRegion>) -> Self {
        // stable, so coordinate ties keep their insertion order
        records.sort_by(|a, b| a.region.coord_cmp(&b.region));
        LabeledDataset {
            records,
            path: None,
        }
    }
}

fn parse_labeled_line(line: &str, line_number: usize) -> Result<LabeledRegion, RegionSetError> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != 7 {
        return Err(RegionSetError::InvalidInput(format!(
            "line {}: expected 7 columns (chr, start, end, peak, score, label, label_class), found {}",
            line_number,
            parts.len()
        )));
    }

    let parse_coord = |raw: &str, what: &str| {
        raw.trim().parse::<u32>().map_err(|_| RegionSetError::RegionParseError {
            line: line_number,
            message: format!("can't parse {} position: {:?}", what, raw),
        })
    };
    let start = parse_coord(parts[1], "start")?;
    let end = parse_coord(parts[2], "end")?;
    let mut region = Region::new(parts[0], start, end).map_err(|e| e.at_line(line_number))?;
    region.name = Some(parts[3].trim())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string);

    let score = parts[4].trim().parse::<f64>().map_err(|_| {
        RegionSetError::InvalidInput(format!(
            "line {}: missing or unparsable score {:?}",
            line_number, parts[4]
        ))
    })?;
    let label = parts[5].trim().parse::<u8>().map_err(|_| {
        RegionSetError::InvalidInput(format!(
            "line {}: missing or unparsable label {:?}",
            line_number, parts[5]
        ))
    })?;
    let class = parts[6]
        .trim()
        .parse::<LabelClass>()
        .map_err(|e| RegionSetError::InvalidInput(format!("line {}: {}", line_number, e)))?;

    if class.label() != label {
        return Err(RegionSetError::InvalidInput(format!(
            "line {}: label {} contradicts class {}",
            line_number, label, class
        )));
    }

    region.score = Some(score);
    Ok(LabeledRegion::new(region, score, class))
}

impl TryFrom<&Path> for LabeledDataset {
    type Error = RegionSetError;

    ///
    /// Read a labeled dataset written by [LabeledDataset::to_tsv].
    ///
    /// Scores are parsed as-is (`nan` included); rejecting non-finite
    /// scores is left to the metric computation.
    fn try_from(value: &Path) -> Result<Self, RegionSetError> {
        if !value.is_file() {
            return Err(RegionSetError::FileReadError(value.display().to_string()));
        }
        let reader = get_dynamic_reader(value)?;

        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_labeled_line(&line, idx + 1)?);
        }

        Ok(LabeledDataset {
            records,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for LabeledDataset {
    type Error = RegionSetError;

    fn try_from(value: &str) -> Result<Self, RegionSetError> {
        LabeledDataset::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for LabeledDataset {
    type Error = RegionSetError;

    fn try_from(value: PathBuf) -> Result<Self, RegionSetError> {
        LabeledDataset::try_from(value.as_path())
    }
}

impl LabeledDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn class_counts(&self) -> ClassCounts {
        let mut counts = ClassCounts::default();
        for record in &self.records {
            match record.class {
                LabelClass::TP => counts.tp += 1,
                LabelClass::FP => counts.fp += 1,
                LabelClass::FN => counts.fn_ += 1,
                LabelClass::TN => counts.tn += 1,
            }
        }
        counts
    }

    pub fn iter_class(&self, class: LabelClass) -> impl Iterator<Item = &LabeledRegion> {
        self.records.iter().filter(move |r| r.class == class)
    }

    pub fn scores(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.score).collect()
    }

    pub fn labels(&self) -> Vec<u8> {
        self.records.iter().map(|r| r.label()).collect()
    }

    /// Write the records as headerless tab-separated lines.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for record in &self.records {
            writeln!(writer, "{}", record.as_string())?;
        }
        Ok(())
    }

    pub fn to_tsv<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut file)?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/labeled")
            .join(file_name)
    }

    fn record(chr: &str, start: u32, end: u32, score: f64, class: LabelClass) -> LabeledRegion {
        LabeledRegion::new(Region::new(chr, start, end).unwrap(), score, class)
    }

    #[rstest]
    #[case(LabelClass::TP, 1)]
    #[case(LabelClass::FN, 1)]
    #[case(LabelClass::FP, 0)]
    #[case(LabelClass::TN, 0)]
    fn test_label_follows_class(#[case] class: LabelClass, #[case] label: u8) {
        assert_eq!(class.label(), label);
        assert_eq!(class.as_str().parse::<LabelClass>().unwrap(), class);
    }

    #[rstest]
    fn test_dataset_is_sorted_on_creation() {
        let ds = LabeledDataset::from(vec![
            record("chr2", 5, 10, 0.1, LabelClass::TN),
            record("chr1", 50, 60, 0.9, LabelClass::TP),
            record("chr1", 10, 20, 0.4, LabelClass::FN),
        ]);
        let starts: Vec<u32> = ds.records.iter().map(|r| r.region.start).collect();
        assert_eq!(starts, vec![10, 50, 5]);
    }

    #[rstest]
    fn test_class_counts() {
        let ds = LabeledDataset::from(vec![
            record("chr1", 1, 2, 0.1, LabelClass::TP),
            record("chr1", 3, 4, 0.1, LabelClass::TP),
            record("chr1", 5, 6, 0.1, LabelClass::FN),
            record("chr1", 7, 8, 0.1, LabelClass::TN),
        ]);
        let counts = ds.class_counts();
        assert_eq!(counts.tp, 2);
        assert_eq!(counts.fn_, 1);
        assert_eq!(counts.fp, 0);
        assert_eq!(counts.tn, 1);
        assert_eq!(counts.positives(), 3);
        assert_eq!(counts.negatives(), 1);
    }

    #[rstest]
    fn test_write_uses_dot_for_missing_name() {
        let ds = LabeledDataset::from(vec![record("chr1", 100, 200, 0.25, LabelClass::FN)]);
        let mut buffer = Vec::new();
        ds.write_tsv(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chr1\t100\t200\t.\t0.25\t1\tFN\n"
        );
    }

    #[rstest]
    fn test_read_labeled_file() {
        let ds = LabeledDataset::try_from(get_test_path("labeled.tsv")).unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(ds.records[0].region.name.as_deref(), Some("peak_1"));
        assert_eq!(ds.class_counts().tn, 2);
    }

    #[rstest]
    fn test_round_trip_through_file() {
        let ds = LabeledDataset::try_from(get_test_path("labeled.tsv")).unwrap();
        let tempdir = tempfile::tempdir().unwrap();
        let out = tempdir.path().join("out.tsv");
        ds.to_tsv(&out).unwrap();
        let again = LabeledDataset::try_from(out.as_path()).unwrap();
        assert_eq!(again.records, ds.records);
    }

    #[rstest]
    #[case("bad_label.tsv")]
    #[case("missing_column.tsv")]
    #[case("unknown_class.tsv")]
    fn test_inconsistent_records_are_invalid_input(#[case] file: &str) {
        let result = LabeledDataset::try_from(get_test_path(file));
        assert!(matches!(result, Err(RegionSetError::InvalidInput(_))));
    }

    #[rstest]
    fn test_nan_score_is_read() {
        let ds = LabeledDataset::try_from(get_test_path("nan_score.tsv")).unwrap();
        assert!(ds.records.iter().any(|r| r.score.is_nan()));
    }
}
