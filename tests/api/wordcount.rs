//! tests/api/wordcount.rs
use crate::helpers::{
    hidden_display, stable_report, temp_dir, test_data_dir, test_settings, write_source,
};
use claims::{assert_err, assert_none, assert_ok};
use wordcount::report::{COLUMN_HEADER, RULE};
use wordcount::wordcount::WordCount;

async fn run_to_string(source: &std::path::Path, chunks: usize) -> String {
    let destination = temp_dir().join("report.txt");
    let job = WordCount::new(source, &destination, chunks, test_settings());
    let summary = assert_ok!(job.run(hidden_display()).await);
    assert_none!(summary.report_error);
    std::fs::read_to_string(&destination).expect("Failed to read report")
}

#[tokio::test]
async fn the_two_line_example_is_reported_in_order() {
    let source = write_source("a b\nb c\n");
    let report = run_to_string(&source, 1).await;

    let lines: Vec<&str> = report.lines().collect();
    assert!(lines[0].starts_with("Max Processors: "));
    assert!(lines[1].starts_with("Duration(1): "));
    assert!(lines[1].ends_with(" ms"));
    assert_eq!(
        &lines[2..],
        &[COLUMN_HEADER, RULE, "        a 1", "        b 2", "        c 1", RULE]
    );
    assert!(!report.ends_with('\n'));
}

#[tokio::test]
async fn an_empty_source_reports_only_headers() {
    let source = write_source("");
    let report = run_to_string(&source, 3).await;

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(&lines[2..], &[COLUMN_HEADER, RULE, RULE]);
}

#[tokio::test]
async fn reports_are_identical_across_runs() {
    let mut source = test_data_dir();
    source.push("small_test.txt");

    let first = run_to_string(&source, 5).await;
    let second = run_to_string(&source, 5).await;
    assert_eq!(stable_report(&first), stable_report(&second));
}

#[tokio::test]
async fn chunk_count_does_not_change_the_word_list() {
    let mut source = test_data_dir();
    source.push("small_test.txt");

    let single = stable_report(&run_to_string(&source, 1).await);
    for chunks in [2, 4, 9, 100] {
        let report = stable_report(&run_to_string(&source, chunks).await);
        let body = |r: &str| r.lines().skip(1).map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(body(&report), body(&single), "chunks = {chunks}");
    }
}

#[tokio::test]
async fn fixture_counts_are_known() {
    let mut source = test_data_dir();
    source.push("small_test.txt");
    let job = WordCount::new(&source, temp_dir().join("out.txt"), 6, test_settings());

    let result = assert_ok!(job.count(hidden_display()).await);
    assert_eq!(result.table.total(), 336);
    assert_eq!(result.table.len(), 31);
    assert_eq!(result.table.get("the"), Some(32));
    assert_eq!(result.table.get("The"), Some(16));
    assert_eq!(result.table.get("alpha"), Some(24));
}

#[tokio::test]
async fn more_chunks_than_lines_still_count_everything() {
    let source = write_source("x y\nx\n");
    let job = WordCount::new(&source, temp_dir().join("out.txt"), 50, test_settings());

    let result = assert_ok!(job.count(hidden_display()).await);
    assert_eq!(result.chunks.len(), 50);
    assert!(result.chunks.iter().filter(|c| c.is_empty()).count() >= 48);
    assert_eq!(result.table.get("x"), Some(2));
    assert_eq!(result.table.get("y"), Some(1));
    assert!(result.partial_chunks.is_empty());
}

#[tokio::test]
async fn a_missing_source_is_an_error() {
    let source = temp_dir().join("nope.txt");
    let job = WordCount::new(&source, temp_dir().join("out.txt"), 2, test_settings());
    assert_err!(job.run(hidden_display()).await);
}
