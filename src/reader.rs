//! CSV loading: file on disk → in-memory [`Table`].
//!
//! The table is re-read on every invocation; nothing is cached across runs.

use crate::error::TallyResult;
use crate::types::Table;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a CSV file into a [`Table`]. First record is the header.
///
/// Input is decoded as UTF-8 with a lossy fallback, so a stray non-UTF-8
/// byte degrades to a replacement character instead of failing the load.
pub fn read_table(path: &Path) -> TallyResult<Table> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let table = parse_table(&content)?;
    debug!(
        path = %path.display(),
        columns = table.header.len(),
        rows = table.row_count(),
        "loaded CSV"
    );
    Ok(table)
}

/// Parse CSV content. Comma-delimited, standard quoting rules.
///
/// Records are padded or truncated to the header length so positional
/// access is always in bounds downstream.
pub fn parse_table(content: &str) -> TallyResult<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let width = header.len();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(Table::new(header, rows))
}
