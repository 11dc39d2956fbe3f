use std::fs;
use std::path::{Path, PathBuf};

use rstest::rstest;
use sqlmcs_cli::batch::{BatchError, read_queries, run_batch};
use sqlmcs_common::Config;
use tempfile::TempDir;

const SUBQUERY_PAIR: &str = "SELECT u.id, u.name, u.email FROM users u WHERE u.status = 'active' AND u.age > 25;\n\
                             SELECT u.name FROM users u WHERE u.status = 'active';\n";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn reads_two_queries() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "pair.sql", SUBQUERY_PAIR);
    let [left, right] = read_queries(&path).unwrap();
    assert!(left.starts_with("SELECT u.id"));
    assert_eq!(right, "SELECT u.name FROM users u WHERE u.status = 'active'");
}

#[rstest]
#[case("SELECT a FROM t", 1)]
#[case("SELECT a FROM t; SELECT b FROM t; SELECT c FROM t", 3)]
#[case(" ;; ", 0)]
fn wrong_query_count_is_reported(#[case] contents: &str, #[case] expected: usize) {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "bad.sql", contents);
    match read_queries(&path) {
        Err(BatchError::QueryCount { found, .. }) => assert_eq!(found, expected),
        other => panic!("expected a query count error, got {other:?}"),
    }
}

#[test]
fn bad_files_are_skipped_and_the_batch_continues() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let files = vec![
        dir.path().join("missing.sql"),
        write(&dir, "one_query.sql", "SELECT a FROM t;"),
        write(&dir, "broken.sql", "SELECT a FROM t; SELECT FROM;"),
        write(&dir, "subquery.sql", SUBQUERY_PAIR),
    ];

    let outcomes = run_batch(&files, &Config::default(), Some(out.path()));
    assert_eq!(outcomes.len(), 4);

    assert!(matches!(outcomes[0].result, Err(BatchError::Io { .. })));
    assert!(matches!(outcomes[1].result, Err(BatchError::QueryCount { found: 1, .. })));
    assert!(matches!(outcomes[2].result, Err(BatchError::Query { index: 2, .. })));

    let report = outcomes[3].result.as_ref().unwrap();
    assert_eq!(report.comparison.mcs_len(), 4);
    assert_eq!(report.comparison.similarity, 100.0);

    let dot_path = out.path().join("subquery.mcs.dot");
    assert_eq!(report.visualization.as_deref(), Some(dot_path.as_path()));
    let dot = fs::read_to_string(&dot_path).unwrap();
    assert!(dot.starts_with("digraph \"MCS - subquery.sql\""));

    let printed = outcomes[3].to_string();
    assert!(printed.contains("Equivalence level: 100.00%"));
    assert!(printed.contains("found an MCS with 4 nodes"));
    assert!(outcomes[1].to_string().contains("Error:"));
}

#[test]
fn no_visualization_without_a_directory_or_overlap() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write(&dir, "same.sql", SUBQUERY_PAIR),
        write(&dir, "disjoint.sql", "SELECT a.x FROM alpha a; SELECT b.y FROM beta b"),
    ];

    let outcomes = run_batch(&files, &Config::default(), None);
    assert!(outcomes.iter().all(|o| o.result.as_ref().unwrap().visualization.is_none()));

    let out = TempDir::new().unwrap();
    let outcomes = run_batch(&files[1..], &Config::default(), Some(out.path()));
    let report = outcomes[0].result.as_ref().unwrap();
    assert_eq!(report.comparison.similarity, 0.0);
    assert!(report.visualization.is_none());
    assert!(outcomes[0].to_string().contains("Equivalence level: 0.00%"));
    assert!(!Path::new(&out.path().join("disjoint.mcs.dot")).exists());
}

#[test]
fn failed_visualization_keeps_the_comparison() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "subquery.sql", SUBQUERY_PAIR);
    // A plain file where the output directory should be.
    let not_a_dir = write(&dir, "occupied", "");

    let outcomes = run_batch(&[path], &Config::default(), Some(not_a_dir.as_path()));
    let report = outcomes[0].result.as_ref().unwrap();
    assert_eq!(report.comparison.mcs_len(), 4);
    assert_eq!(report.comparison.similarity, 100.0);
    assert!(report.visualization.is_none());
    assert!(outcomes[0].to_string().contains("Equivalence level: 100.00%"));
}

#[test]
fn parallel_batches_keep_input_order() {
    let dir = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..8)
        .map(|i| {
            let contents = if i % 2 == 0 {
                SUBQUERY_PAIR.to_string()
            } else {
                format!("SELECT t.c{i} FROM t{i} t; SELECT x FROM other")
            };
            write(&dir, &format!("case{i}.sql"), &contents)
        })
        .collect();

    let config = Config::builder().parallel(true).build();
    let outcomes = run_batch(&files, &config, None);

    let paths: Vec<_> = outcomes.iter().map(|o| o.path.clone()).collect();
    assert_eq!(paths, files);
    for (i, outcome) in outcomes.iter().enumerate() {
        let similarity = outcome.result.as_ref().unwrap().comparison.similarity;
        assert_eq!(similarity, if i % 2 == 0 { 100.0 } else { 0.0 });
    }
}
