//! The tabular analysis pipeline: filter → sort → numeric detection →
//! per-column statistics → date range.
//!
//! Stages run in that exact order over the full in-memory row set. Filter
//! and sort failures are hard errors because every later stage consumes
//! their output; the statistics and date stages are independent of each
//! other and fail soft, reporting through [`Warning`] records instead.

use crate::core::stats;
use crate::error::{TallyError, TallyResult};
use crate::types::{AnalysisConfig, AnalysisReport, ColumnSummary, DateRange, Table, Warning};
use chrono::NaiveDate;
use tracing::debug;

/// The only accepted date pattern. Other formats are rejected, not
/// auto-detected.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Run one analysis pass over `table` with the given configuration.
///
/// Returns every partial result that could be computed plus the warnings
/// describing what was skipped. Errors only on filter/sort column lookups,
/// whose output all later stages share.
pub fn analyze(table: &Table, config: &AnalysisConfig) -> TallyResult<AnalysisReport> {
    let mut warnings = Vec::new();

    let rows = select_rows(table, config)?;

    let summaries = summarize_columns(table, &rows, config, &mut warnings);
    let date_range = match config.date_column.as_deref() {
        Some(column) => date_range(table, &rows, column, &mut warnings),
        None => None,
    };

    Ok(AnalysisReport {
        summaries,
        date_range,
        warnings,
    })
}

/// The filter→sort front half of the pipeline: the surviving rows, in
/// final order. Later stages (and row 0 numeric detection) consume this
/// view, so the stage order here is load-bearing.
pub fn select_rows<'a>(
    table: &'a Table,
    config: &AnalysisConfig,
) -> TallyResult<Vec<&'a Vec<String>>> {
    // Filter: active only when both column and value are configured.
    // Exact string equality, no trimming or case folding.
    let mut rows: Vec<&Vec<String>> = table.rows.iter().collect();
    if let Some((column, value)) = config.filter() {
        let idx = table
            .find_column(column)
            .ok_or_else(|| TallyError::ColumnNotFound(column.to_string()))?;
        rows.retain(|row| row[idx] == value);
        debug!(column, value, surviving = rows.len(), "filtered rows");
    }

    // Stable sort on the string value. Lexicographic by contract, so a
    // numeric-looking column orders as "10" < "2" < "9".
    if let Some(column) = config.sort_column.as_deref() {
        let idx = table
            .find_column(column)
            .ok_or_else(|| TallyError::ColumnNotFound(column.to_string()))?;
        rows.sort_by(|a, b| a[idx].cmp(&b[idx]));
    }

    Ok(rows)
}

/// Resolve the selected column names to header indices, in header order.
///
/// First match wins for duplicate header names. Selected names absent from
/// the header are reported and skipped.
fn selected_indices(
    table: &Table,
    config: &AnalysisConfig,
    warnings: &mut Vec<Warning>,
) -> Vec<usize> {
    let mut indices = Vec::new();
    for name in &config.columns {
        match table.find_column(name) {
            Some(idx) if !indices.contains(&idx) => indices.push(idx),
            Some(_) => {}
            None => warnings.push(Warning::SelectedColumnMissing {
                column: name.clone(),
            }),
        }
    }
    indices.sort_unstable();
    indices
}

/// A column is numeric iff the FIRST surviving row's value parses as a
/// float. One sample, not a majority vote: if row 0 holds text, the column
/// is excluded even when every other row is numeric.
fn numeric_indices(rows: &[&Vec<String>], selected: &[usize]) -> Vec<usize> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    selected
        .iter()
        .copied()
        .filter(|&idx| first[idx].parse::<f64>().is_ok())
        .collect()
}

fn summarize_columns(
    table: &Table,
    rows: &[&Vec<String>],
    config: &AnalysisConfig,
    warnings: &mut Vec<Warning>,
) -> Vec<ColumnSummary> {
    let selected = selected_indices(table, config, warnings);
    let numeric = numeric_indices(rows, &selected);

    if numeric.is_empty() {
        warnings.push(Warning::NoNumericColumns);
        return Vec::new();
    }

    let mut summaries = Vec::new();
    for idx in numeric {
        let column = &table.header[idx];

        let mut values = Vec::with_capacity(rows.len());
        for row in rows {
            match row[idx].parse::<f64>() {
                Ok(v) => values.push(v),
                Err(_) => warnings.push(Warning::NonNumericValue {
                    column: column.clone(),
                    value: row[idx].clone(),
                }),
            }
        }

        if values.is_empty() {
            warnings.push(Warning::NoNumericData {
                column: column.clone(),
            });
            continue;
        }

        // Sample standard deviation needs at least two values; a
        // single-value column is excluded rather than crashing the run.
        let Some(std_dev) = stats::sample_std_dev(&values) else {
            warnings.push(Warning::SingleValue {
                column: column.clone(),
            });
            continue;
        };

        summaries.push(ColumnSummary {
            column: column.clone(),
            count: values.len(),
            mean: stats::mean(&values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            median: stats::median(&values),
            mode: stats::mode(&values),
            std_dev,
        });
    }

    debug!(columns = summaries.len(), "computed column summaries");
    summaries
}

/// Oldest/newest date over the surviving rows, or `None` with warnings.
fn date_range(
    table: &Table,
    rows: &[&Vec<String>],
    column: &str,
    warnings: &mut Vec<Warning>,
) -> Option<DateRange> {
    let Some(idx) = table.find_column(column) else {
        warnings.push(Warning::DateColumnMissing {
            column: column.to_string(),
        });
        return None;
    };

    let mut dates: Vec<NaiveDate> = Vec::new();
    for row in rows {
        let field = row[idx].as_str();
        if field.is_empty() {
            warnings.push(Warning::MissingDate {
                column: column.to_string(),
            });
            continue;
        }
        match NaiveDate::parse_from_str(field, DATE_FORMAT) {
            Ok(date) => dates.push(date),
            Err(_) => warnings.push(Warning::InvalidDate {
                column: column.to_string(),
                value: field.to_string(),
            }),
        }
    }

    if dates.is_empty() {
        warnings.push(Warning::NoValidDates {
            column: column.to_string(),
        });
        return None;
    }

    Some(DateRange {
        column: column.to_string(),
        oldest: *dates.iter().min().unwrap_or(&dates[0]),
        newest: *dates.iter().max().unwrap_or(&dates[0]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_table;

    fn config(columns: &[&str]) -> AnalysisConfig {
        AnalysisConfig::new(columns.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_filter_exact_match_only() {
        let table = parse_table("region,amount\neast,1\nwest,2\nEast,3\neast ,4").unwrap();
        let cfg = config(&["amount"]).with_filter("region", "east");
        let report = analyze(&table, &cfg).unwrap();

        assert_eq!(report.summaries.len(), 0); // single surviving numeric row
        let sums: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::SingleValue { .. }))
            .collect();
        assert_eq!(sums.len(), 1);
    }

    #[test]
    fn test_filter_unknown_column_is_hard_error() {
        let table = parse_table("a,b\n1,2").unwrap();
        let cfg = config(&["a"]).with_filter("nope", "x");
        let err = analyze(&table, &cfg).unwrap_err();
        assert!(matches!(err, TallyError::ColumnNotFound(ref c) if c == "nope"));
    }

    #[test]
    fn test_detection_samples_post_sort_first_row() {
        // After the lexicographic sort the first row is the one keyed
        // "10", whose v field is text, so v is excluded entirely.
        let table = parse_table("k,v\n9,7\n2,5\n10,abc").unwrap();
        let cfg = config(&["v"]).with_sort("k");
        let report = analyze(&table, &cfg).unwrap();

        assert!(report.summaries.is_empty());
        assert!(report.warnings.contains(&Warning::NoNumericColumns));
    }

    #[test]
    fn test_missing_date_column_only_warns() {
        let table = parse_table("k,v\n1,2").unwrap();
        let cfg = config(&["v"]).with_date_column("missing");
        let report = analyze(&table, &cfg).unwrap();

        assert_eq!(report.summaries.len(), 0); // single row, std dev undefined
        assert!(report.warnings.contains(&Warning::DateColumnMissing {
            column: "missing".into()
        }));
    }

    #[test]
    fn test_empty_table_reports_no_numeric_columns() {
        let table = parse_table("a,b").unwrap();
        let report = analyze(&table, &config(&["a", "b"])).unwrap();
        assert!(report.warnings.contains(&Warning::NoNumericColumns));
    }

    #[test]
    fn test_date_stage_runs_when_no_numeric_columns() {
        let table = parse_table("name,when\nbob,2024-01-01").unwrap();
        let cfg = config(&["name"]).with_date_column("when");
        let report = analyze(&table, &cfg).unwrap();

        assert!(report.warnings.contains(&Warning::NoNumericColumns));
        let range = report.date_range.unwrap();
        assert_eq!(range.oldest, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }
}
