//! CLI command tests: exercise the command functions directly on fixture
//! and temp files.

use std::io::Write;
use std::path::PathBuf;
use tally::cli::{commands, AnalyzeOptions, OutputFormat};
use tempfile::TempDir;

fn options() -> AnalyzeOptions {
    AnalyzeOptions {
        filter_column: None,
        filter_value: None,
        sort_column: None,
        date_column: None,
        columns: None,
        format: OutputFormat::Table,
        verbose: false,
    }
}

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// ANALYZE COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_analyze_basic() {
    let result = commands::analyze(PathBuf::from("test-data/sales.csv"), options());
    assert!(result.is_ok(), "Analyze should succeed on valid file");
}

#[test]
fn test_analyze_verbose() {
    let mut opts = options();
    opts.verbose = true;
    let result = commands::analyze(PathBuf::from("test-data/sales.csv"), opts);
    assert!(result.is_ok(), "Analyze verbose should succeed");
}

#[test]
fn test_analyze_nonexistent_file() {
    let result = commands::analyze(PathBuf::from("nonexistent.csv"), options());
    assert!(result.is_err(), "Analyze should fail on nonexistent file");
}

#[test]
fn test_analyze_with_filter_and_dates() {
    let mut opts = options();
    opts.filter_column = Some("region".to_string());
    opts.filter_value = Some("east".to_string());
    opts.date_column = Some("date".to_string());
    opts.columns = Some(vec!["amount".to_string(), "qty".to_string()]);

    let result = commands::analyze(PathBuf::from("test-data/sales.csv"), opts);
    assert!(result.is_ok());
}

#[test]
fn test_analyze_unknown_filter_column_fails() {
    let mut opts = options();
    opts.filter_column = Some("ghost".to_string());
    opts.filter_value = Some("x".to_string());

    let result = commands::analyze(PathBuf::from("test-data/sales.csv"), opts);
    assert!(result.is_err(), "Unknown filter column should be an error");
}

#[test]
fn test_analyze_empty_flags_disable_features() {
    // Empty strings come from blank form fields / empty shell vars and
    // must behave like the flag was not given at all.
    let mut opts = options();
    opts.filter_column = Some(String::new());
    opts.filter_value = Some(String::new());
    opts.sort_column = Some(String::new());
    opts.date_column = Some(String::new());

    let result = commands::analyze(PathBuf::from("test-data/sales.csv"), opts);
    assert!(result.is_ok());
}

#[test]
fn test_analyze_json_format() {
    let mut opts = options();
    opts.format = OutputFormat::Json;
    opts.columns = Some(vec!["amount".to_string()]);

    let result = commands::analyze(PathBuf::from("test-data/amounts.csv"), opts);
    assert!(result.is_ok());
}

#[test]
fn test_analyze_all_text_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "text.csv", "name,city\nAlice,NYC\nBob,LA\n");

    let result = commands::analyze(path, options());
    assert!(result.is_ok(), "No numeric columns is a warning, not an error");
}

#[test]
fn test_analyze_empty_data_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "empty.csv", "a,b,c\n");

    let result = commands::analyze(path, options());
    assert!(result.is_ok());
}

// ═══════════════════════════════════════════════════════════════════════════
// COLUMNS COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_columns_basic() {
    let result = commands::columns(PathBuf::from("test-data/sales.csv"));
    assert!(result.is_ok());
}

#[test]
fn test_columns_nonexistent() {
    let result = commands::columns(PathBuf::from("nonexistent.csv"));
    assert!(result.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// HISTOGRAM COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_histogram_basic() {
    let result = commands::histogram(
        PathBuf::from("test-data/amounts.csv"),
        Some(vec!["id".to_string()]),
        10,
    );
    assert!(result.is_ok());
}

#[test]
fn test_histogram_mixed_column_is_skipped() {
    // "amount" holds an "x", which disqualifies the whole column; the
    // command still succeeds and reports the warning.
    let result = commands::histogram(
        PathBuf::from("test-data/amounts.csv"),
        Some(vec!["amount".to_string()]),
        10,
    );
    assert!(result.is_ok());
}

#[test]
fn test_histogram_zero_bins_rejected() {
    let result = commands::histogram(PathBuf::from("test-data/amounts.csv"), None, 0);
    assert!(result.is_err());
}

#[test]
fn test_histogram_nonexistent_file() {
    let result = commands::histogram(PathBuf::from("nonexistent.csv"), None, 10);
    assert!(result.is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// WATCH COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_watch_nonexistent_file_fails_fast() {
    let result = commands::watch(PathBuf::from("nonexistent.csv"), options());
    assert!(result.is_err(), "Watch should refuse a missing file");
}
