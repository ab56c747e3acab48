use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use glob::glob;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> std::io::Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// List the `.bed` and `.bed.gz` files directly inside a folder, sorted by path.
///
pub fn bed_files_in<P: AsRef<Path>>(folder: P) -> Result<Vec<PathBuf>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        anyhow::bail!("Not a directory: {}", folder.display());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for ext in ["bed", "bed.gz"] {
        let pattern = folder.join(format!("*.{}", ext));
        let pattern = pattern
            .to_str()
            .with_context(|| format!("Path is not valid UTF-8: {:?}", pattern))?;
        for entry in glob(pattern)? {
            files.push(entry.with_context(|| format!("Error reading file entry in {}", folder.display()))?);
        }
    }
    files.sort();
    files.dedup();

    Ok(files)
}

///
/// File name with a trailing `.bed.gz`, `.bed` or `.gz` removed:
/// `s.rep1.narrowPeak.bed.gz` -> `s.rep1.narrowPeak`.
///
pub fn bed_stem(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = [".bed.gz", ".bed", ".gz"]
        .iter()
        .find_map(|suffix| file_name.strip_suffix(*suffix).filter(|stem| !stem.is_empty()))
        .map(str::to_string);
    stem.unwrap_or(file_name)
}

///
/// [bed_stem] of every file, in input order. Fails naming both files when
/// two of them share a stem, since outputs and sample names derive from it.
///
pub fn unique_bed_stems(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::with_capacity(files.len());
    let mut stems = Vec::with_capacity(files.len());
    for file in files {
        let stem = bed_stem(file);
        if let Some(previous) = seen.insert(stem.clone(), file) {
            anyhow::bail!(
                "{} and {} both resolve to the name {:?}",
                previous.display(),
                file.display(),
                stem
            );
        }
        stems.push(stem);
    }
    Ok(stems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::BufRead;

    #[rstest]
    #[case("data/sample.bed", "sample")]
    #[case("sample.narrowPeak.bed.gz", "sample.narrowPeak")]
    #[case("s.rep1.bed", "s.rep1")]
    #[case("peaks.gz", "peaks")]
    #[case("/tmp/no_ext", "no_ext")]
    #[case(".bed", ".bed")]
    fn test_bed_stem(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(bed_stem(Path::new(path)), expected);
    }

    #[rstest]
    fn test_unique_bed_stems() {
        let files = vec![PathBuf::from("d/s.rep1.bed"), PathBuf::from("d/s.rep2.bed.gz")];
        assert_eq!(unique_bed_stems(&files).unwrap(), vec!["s.rep1", "s.rep2"]);
    }

    #[rstest]
    fn test_clashing_bed_stems() {
        let files = vec![PathBuf::from("d/a.bed"), PathBuf::from("d/a.bed.gz")];
        let message = unique_bed_stems(&files).unwrap_err().to_string();
        assert!(message.contains("d/a.bed") && message.contains("d/a.bed.gz"));
    }

    #[rstest]
    fn test_bed_files_in_folder() {
        let tempdir = tempfile::tempdir().unwrap();
        for name in ["b.bed", "a.bed", "c.bed.gz", "notes.txt"] {
            std::fs::write(tempdir.path().join(name), "").unwrap();
        }
        let files = bed_files_in(tempdir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.bed", "b.bed", "c.bed.gz"]);
    }

    #[rstest]
    fn test_bed_files_in_missing_folder() {
        assert!(bed_files_in("/definitely/not/here").is_err());
    }

    #[rstest]
    fn test_dynamic_reader_reads_gzip() {
        let path = std::env::current_dir()
            .unwrap()
            .join("../tests/data/regionset/peaks.bed.gz");
        let reader = get_dynamic_reader(&path).unwrap();
        assert_eq!(reader.lines().count(), 3);
    }
}
