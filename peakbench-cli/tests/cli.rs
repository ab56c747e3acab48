use std::path::{Path, PathBuf};

use log::Level;
use pretty_assertions::assert_eq;
use rstest::*;

use peakbench_cli::{build_parser, log_level, run};
use peakbench_core::models::{LabelClass, LabeledDataset, RegionSet};

fn data_path(sub: &str, file_name: &str) -> PathBuf {
    std::env::current_dir()
        .unwrap()
        .join("../tests/data")
        .join(sub)
        .join(file_name)
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn run_args(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["peakbench"];
    argv.extend_from_slice(args);
    let matches = build_parser().try_get_matches_from(argv)?;
    run(&matches)
}

#[fixture]
fn chrom_sizes() -> (tempfile::TempDir, PathBuf) {
    let tempdir = tempfile::tempdir().unwrap();
    let path = tempdir.path().join("test.chrom.sizes");
    std::fs::write(&path, "chr1\t100000\nchr2\t100000\nchr3\t100000\n").unwrap();
    (tempdir, path)
}

#[rstest]
fn test_label(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let output = tempdir.path().join("out").join("labeled.tsv");

    run_args(&[
        "label",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks",
        &path_str(&data_path("regionset", "peaks.bed")),
        "--output",
        &path_str(&output),
        "--chrom-sizes",
        &path_str(&sizes),
        "--negatives",
        "30",
        "--seed",
        "1",
    ])
    .unwrap();

    let dataset = LabeledDataset::try_from(output.as_path()).unwrap();
    let counts = dataset.class_counts();
    assert_eq!((counts.tp, counts.fp, counts.fn_), (2, 3, 2));
    assert!(counts.tn > 0);
}

#[rstest]
fn test_label_is_reproducible_with_seed(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let outputs: Vec<PathBuf> = ["a.tsv", "b.tsv"]
        .iter()
        .map(|name| tempdir.path().join(name))
        .collect();

    for output in &outputs {
        run_args(&[
            "label",
            "-g",
            &path_str(&data_path("regionset", "gold.bed")),
            "-p",
            &path_str(&data_path("regionset", "peaks.bed")),
            "-o",
            &path_str(output),
            "--chrom-sizes",
            &path_str(&sizes),
            "-n",
            "60",
            "--seed",
            "42",
        ])
        .unwrap();
    }

    let a = std::fs::read_to_string(&outputs[0]).unwrap();
    let b = std::fs::read_to_string(&outputs[1]).unwrap();
    assert_eq!(a, b);
}

#[rstest]
fn test_label_clipped_mode_from_config(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let config = tempdir.path().join("label.toml");
    std::fs::write(
        &config,
        "negative_count = 0\noverlap_mode = \"clipped\"\nseed = 5\n",
    )
    .unwrap();
    let output = tempdir.path().join("labeled.tsv");

    run_args(&[
        "label",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks",
        &path_str(&data_path("regionset", "peaks.bed")),
        "--output",
        &path_str(&output),
        "--config",
        &path_str(&config),
        "--chrom-sizes",
        &path_str(&sizes),
    ])
    .unwrap();

    let dataset = LabeledDataset::try_from(output.as_path()).unwrap();
    let tp: Vec<(u32, u32)> = dataset
        .iter_class(LabelClass::TP)
        .map(|r| (r.region.start, r.region.end))
        .collect();
    assert_eq!(tp, vec![(150, 200), (650, 700)]);
    assert_eq!(dataset.class_counts().tn, 0);
}

#[rstest]
fn test_label_rejects_bad_length_range() {
    let tempdir = tempfile::tempdir().unwrap();
    let result = run_args(&[
        "label",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks",
        &path_str(&data_path("regionset", "peaks.bed")),
        "--output",
        &path_str(&tempdir.path().join("labeled.tsv")),
        "--min-length",
        "500",
        "--max-length",
        "100",
    ]);
    assert!(result.is_err());
}

#[rstest]
fn test_label_batch_skips_failures(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let peaks_dir = tempdir.path().join("peaks");
    std::fs::create_dir_all(&peaks_dir).unwrap();
    std::fs::copy(data_path("regionset", "peaks.bed"), peaks_dir.join("good.bed")).unwrap();
    std::fs::copy(data_path("regionset", "malformed.bed"), peaks_dir.join("bad.bed")).unwrap();
    let output_dir = tempdir.path().join("labeled");

    run_args(&[
        "label-batch",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks-dir",
        &path_str(&peaks_dir),
        "--output-dir",
        &path_str(&output_dir),
        "--chrom-sizes",
        &path_str(&sizes),
        "--negatives",
        "30",
        "--seed",
        "7",
    ])
    .unwrap();

    assert!(output_dir.join("good_labeled.tsv").is_file());
    assert!(!output_dir.join("bad_labeled.tsv").exists());
}

#[rstest]
fn test_label_batch_keeps_multi_dot_names_apart(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let peaks_dir = tempdir.path().join("peaks");
    std::fs::create_dir_all(&peaks_dir).unwrap();
    std::fs::write(peaks_dir.join("s.rep1.bed"), "chr1\t150\t250\tp1\t0.9\n").unwrap();
    std::fs::write(
        peaks_dir.join("s.rep2.bed"),
        "chr1\t150\t250\tp1\t0.9\nchr2\t650\t800\tp2\t0.7\n",
    )
    .unwrap();
    let output_dir = tempdir.path().join("labeled");

    run_args(&[
        "label-batch",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks-dir",
        &path_str(&peaks_dir),
        "--output-dir",
        &path_str(&output_dir),
        "--chrom-sizes",
        &path_str(&sizes),
        "--negatives",
        "0",
        "--seed",
        "1",
    ])
    .unwrap();

    let rep1 = LabeledDataset::try_from(output_dir.join("s.rep1_labeled.tsv")).unwrap();
    let rep2 = LabeledDataset::try_from(output_dir.join("s.rep2_labeled.tsv")).unwrap();
    assert_eq!(rep1.class_counts().tp, 1);
    assert_eq!(rep2.class_counts().tp, 2);
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 2);
}

#[rstest]
fn test_label_batch_refuses_clashing_names(chrom_sizes: (tempfile::TempDir, PathBuf)) {
    let (tempdir, sizes) = chrom_sizes;
    let peaks_dir = tempdir.path().join("peaks");
    std::fs::create_dir_all(&peaks_dir).unwrap();
    std::fs::copy(data_path("regionset", "peaks.bed"), peaks_dir.join("a.bed")).unwrap();
    std::fs::copy(data_path("regionset", "peaks.bed.gz"), peaks_dir.join("a.bed.gz")).unwrap();
    let output_dir = tempdir.path().join("labeled");

    let result = run_args(&[
        "label-batch",
        "--gold-standard",
        &path_str(&data_path("regionset", "gold.bed")),
        "--peaks-dir",
        &path_str(&peaks_dir),
        "--output-dir",
        &path_str(&output_dir),
        "--chrom-sizes",
        &path_str(&sizes),
    ]);

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("a.bed.gz"), "{}", message);
    assert!(!output_dir.exists());
}

#[rstest]
fn test_roc_writes_curve() {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("roc.tsv");
    run_args(&[
        "roc",
        "--input",
        &path_str(&data_path("labeled", "labeled.tsv")),
        "--output",
        &path_str(&output),
    ])
    .unwrap();

    let curve = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = curve.lines().collect();
    assert_eq!(lines[0], "threshold\tfpr\ttpr");
    // six distinct scores plus the final -inf threshold
    assert_eq!(lines.len(), 8);
}

#[rstest]
fn test_pr_writes_curve() {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("pr.tsv");
    run_args(&[
        "pr",
        "--input",
        &path_str(&data_path("labeled", "labeled.tsv")),
        "--output",
        &path_str(&output),
    ])
    .unwrap();
    assert!(output.is_file());
}

#[rstest]
fn test_evaluate_report() {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("report.json");
    run_args(&[
        "evaluate",
        "--input",
        &path_str(&data_path("labeled", "labeled.tsv")),
        "--output",
        &path_str(&output),
    ])
    .unwrap();

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(report["roc_auc"], 1.0);
    assert_eq!(report["threshold"], 0.3);
    assert_eq!(report["n_positive"], 3);
    assert_eq!(report["n_negative"], 3);
}

#[rstest]
#[case("single_class.tsv")]
#[case("nan_score.tsv")]
#[case("bad_label.tsv")]
fn test_metrics_refuse_invalid_input(#[case] file_name: &str) {
    let result = run_args(&[
        "evaluate",
        "--input",
        &path_str(&data_path("labeled", file_name)),
    ]);
    assert!(result.is_err());
}

#[rstest]
fn test_merge_all_then_support() {
    let tempdir = tempfile::tempdir().unwrap();
    let samples_dir = tempdir.path().join("samples");
    std::fs::create_dir_all(&samples_dir).unwrap();
    std::fs::write(
        samples_dir.join("sampleA.bed"),
        "chr1\t100\t200\tp1\t2.0\nchr1\t220\t260\tp2\t6.0\n",
    )
    .unwrap();
    std::fs::write(
        samples_dir.join("sampleB.bed"),
        "chr1\t150\t250\tp1\t4.0\nchr2\t10\t20\tp2\t1.0\n",
    )
    .unwrap();

    let merged = tempdir.path().join("merged.bed");
    run_args(&[
        "merge-all",
        "--input-dir",
        &path_str(&samples_dir),
        "--output",
        &path_str(&merged),
    ])
    .unwrap();
    let merged_rs = RegionSet::try_from(merged.as_path()).unwrap();
    assert_eq!(merged_rs.len(), 2);

    let gold_dir = tempdir.path().join("gold");
    run_args(&[
        "support",
        "--merged",
        &path_str(&merged),
        "--samples-dir",
        &path_str(&samples_dir),
        "--output-dir",
        &path_str(&gold_dir),
    ])
    .unwrap();

    let strict = RegionSet::try_from(
        gold_dir
            .join("regions_present_in_2_samples_or_more.bed")
            .as_path(),
    )
    .unwrap();
    assert_eq!(strict.len(), 1);
    assert_eq!(strict.regions[0].name.as_deref(), Some("sampleA,sampleB"));
    assert!(gold_dir.join("regions_present_in_1_samples_or_more.bed").is_file());
}

#[rstest]
fn test_support_names_samples_by_full_stem() {
    let tempdir = tempfile::tempdir().unwrap();
    let samples_dir = tempdir.path().join("samples");
    std::fs::create_dir_all(&samples_dir).unwrap();
    std::fs::write(samples_dir.join("s.rep1.bed"), "chr1\t100\t200\tp1\t2.0\n").unwrap();
    std::fs::write(samples_dir.join("s.rep2.bed"), "chr1\t150\t250\tp1\t4.0\n").unwrap();
    let merged = tempdir.path().join("merged.bed");
    std::fs::write(&merged, "chr1\t100\t250\n").unwrap();
    let gold_dir = tempdir.path().join("gold");

    run_args(&[
        "support",
        "--merged",
        &path_str(&merged),
        "--samples-dir",
        &path_str(&samples_dir),
        "--output-dir",
        &path_str(&gold_dir),
    ])
    .unwrap();

    let strict = RegionSet::try_from(
        gold_dir
            .join("regions_present_in_2_samples_or_more.bed")
            .as_path(),
    )
    .unwrap();
    assert_eq!(strict.regions[0].name.as_deref(), Some("s.rep1,s.rep2"));
}

#[rstest]
fn test_merge_to_file() {
    let tempdir = tempfile::tempdir().unwrap();
    let output = tempdir.path().join("merged.bed");
    run_args(&[
        "merge",
        "--input",
        &path_str(&data_path("regionset", "peaks.bed")),
        "--output",
        &path_str(&output),
    ])
    .unwrap();
    let merged = RegionSet::try_from(output.as_path()).unwrap();
    assert_eq!(merged.len(), 5);
    assert!(merged.regions.iter().all(|r| r.score.is_none()));
}

#[rstest]
fn test_select() {
    let tempdir = tempfile::tempdir().unwrap();
    let input_dir = tempdir.path().join("raw");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::write(
        input_dir.join("s1.bed"),
        "chrX\t0\t100\tx\t9\nchr10\t0\t100\ta\t5\nchr2\t0\t50\tb\t7\nchr2\t100\t300\tc\t6\n",
    )
    .unwrap();
    std::fs::copy(
        data_path("regionset", "peaks.bed.gz"),
        input_dir.join("s2.bed.gz"),
    )
    .unwrap();
    let output_dir = tempdir.path().join("selected");

    run_args(&[
        "select",
        "--input-dir",
        &path_str(&input_dir),
        "--output-dir",
        &path_str(&output_dir),
        "--top-n",
        "2",
    ])
    .unwrap();

    let s1 = RegionSet::try_from(output_dir.join("s1.bed").as_path()).unwrap();
    let names: Vec<&str> = s1.regions.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["c", "b"]);
    assert_eq!(
        RegionSet::try_from(output_dir.join("s2.bed").as_path())
            .unwrap()
            .len(),
        2
    );
}

#[rstest]
fn test_select_keeps_extra_columns() {
    let tempdir = tempfile::tempdir().unwrap();
    let input_dir = tempdir.path().join("raw");
    std::fs::create_dir_all(&input_dir).unwrap();
    std::fs::copy(
        data_path("regionset", "peaks.narrowPeak.bed"),
        input_dir.join("s.narrowPeak.bed"),
    )
    .unwrap();
    let output_dir = tempdir.path().join("selected");

    run_args(&[
        "select",
        "--input-dir",
        &path_str(&input_dir),
        "--output-dir",
        &path_str(&output_dir),
        "--top-n",
        "2",
    ])
    .unwrap();

    let selected = std::fs::read_to_string(output_dir.join("s.narrowPeak.bed")).unwrap();
    let lines: Vec<&str> = selected.lines().collect();
    assert_eq!(
        lines,
        vec![
            "chr1\t100\t400\tpeak_1\t820\t.\t12.5\t-1\t4.2\t150",
            "chr1\t900\t1000\tpeak_3\t505\t.\t8.8\t-1\t3.1\t45",
        ]
    );
}

#[rstest]
#[case(&["peakbench", "--verbose", "roc", "--input", "x"], Level::Debug)]
#[case(&["peakbench", "roc", "-q", "--input", "x"], Level::Warn)]
#[case(&["peakbench", "roc", "--input", "x"], Level::Info)]
fn test_log_level(#[case] argv: &[&str], #[case] expected: Level) {
    let matches = build_parser().try_get_matches_from(argv).unwrap();
    assert_eq!(log_level(&matches), expected);
}

#[rstest]
fn test_verbose_and_quiet_conflict() {
    let result =
        build_parser().try_get_matches_from(["peakbench", "-v", "-q", "roc", "--input", "x"]);
    assert!(result.is_err());
}
