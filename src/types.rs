use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

//==============================================================================
// Input Model
//==============================================================================

/// An in-memory CSV table: one header row plus data rows.
///
/// Rows are positionally aligned to the header. Duplicate header names are
/// kept as-is; lookups resolve to the first matching position.
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    /// Index of the first header column with this name.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Analysis configuration, decoupled from any presentation layer.
///
/// Empty strings are normalized to `None` at the CLI boundary, so a set
/// field is always non-empty here. Filtering only activates when both the
/// filter column and the filter value are present.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub filter_column: Option<String>,
    pub filter_value: Option<String>,
    pub sort_column: Option<String>,
    pub date_column: Option<String>,
    /// Column names selected for numeric analysis, iterated in header order.
    pub columns: Vec<String>,
}

impl AnalysisConfig {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_column = Some(column.into());
        self.filter_value = Some(value.into());
        self
    }

    pub fn with_sort(mut self, column: impl Into<String>) -> Self {
        self.sort_column = Some(column.into());
        self
    }

    pub fn with_date_column(mut self, column: impl Into<String>) -> Self {
        self.date_column = Some(column.into());
        self
    }

    /// Filtering requires both a column and a value.
    pub fn filter(&self) -> Option<(&str, &str)> {
        match (self.filter_column.as_deref(), self.filter_value.as_deref()) {
            (Some(c), Some(v)) => Some((c, v)),
            _ => None,
        }
    }
}

//==============================================================================
// Output Model
//==============================================================================

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Count of values that parsed as numbers and entered the statistics.
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// `None` when no unique most-frequent value exists ("No mode").
    pub mode: Option<f64>,
    /// Sample standard deviation (Bessel-corrected).
    pub std_dev: f64,
}

/// Oldest and newest date found in the configured date column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub column: String,
    pub oldest: NaiveDate,
    pub newest: NaiveDate,
}

/// Everything one analysis run produced.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub summaries: Vec<ColumnSummary>,
    pub date_range: Option<DateRange>,
    pub warnings: Vec<Warning>,
}

impl AnalysisReport {
    pub fn has_results(&self) -> bool {
        !self.summaries.is_empty() || self.date_range.is_some()
    }
}

//==============================================================================
// Warnings
//==============================================================================

/// Recoverable diagnostics collected during a run.
///
/// Every skipped row, skipped column, and aborted stage is reported here
/// rather than printed, so any front end can render them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A value failed to parse as a number; the row was excluded from that
    /// column's statistics.
    NonNumericValue { column: String, value: String },
    /// A numeric column had zero parseable values left.
    NoNumericData { column: String },
    /// A single parsed value: sample standard deviation is undefined.
    SingleValue { column: String },
    /// No selected column classified as numeric.
    NoNumericColumns,
    /// A selected column name is absent from the header.
    SelectedColumnMissing { column: String },
    /// Empty date field; row skipped.
    MissingDate { column: String },
    /// Date did not match YYYY-MM-DD or is not a real calendar date.
    InvalidDate { column: String, value: String },
    /// The date column produced zero parseable dates.
    NoValidDates { column: String },
    /// The configured date column is absent; date analysis skipped.
    DateColumnMissing { column: String },
    /// Histogram input column has values that do not all parse as numbers.
    NotPlottable { column: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NonNumericValue { column, value } => write!(
                f,
                "Non-numerical value '{value}' in column '{column}', row skipped"
            ),
            Warning::NoNumericData { column } => write!(
                f,
                "Column '{column}' contains no numerical data after error handling"
            ),
            Warning::SingleValue { column } => write!(
                f,
                "Column '{column}' has a single numeric value, standard deviation undefined"
            ),
            Warning::NoNumericColumns => write!(f, "No numerical columns found"),
            Warning::SelectedColumnMissing { column } => {
                write!(f, "Selected column '{column}' not found, skipped")
            }
            Warning::MissingDate { column } => {
                write!(f, "Missing date in column '{column}', row skipped")
            }
            Warning::InvalidDate { column, value } => write!(
                f,
                "Invalid date format '{value}' in column '{column}', row skipped"
            ),
            Warning::NoValidDates { column } => {
                write!(f, "No valid dates for analysis in column '{column}'")
            }
            Warning::DateColumnMissing { column } => {
                write!(f, "Column '{column}' not found, date analysis skipped")
            }
            Warning::NotPlottable { column } => write!(
                f,
                "Column '{column}' contains non-numerical data and cannot be plotted"
            ),
        }
    }
}
