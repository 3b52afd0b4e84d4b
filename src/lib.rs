//! Tally - CSV column profiler
//!
//! This library loads a CSV file into an in-memory table and runs a
//! filter → sort → aggregate pipeline over it: per-column summary
//! statistics (mean, min, max, median, mode, sample standard deviation),
//! an oldest/newest range for a date column, and histogram binning.
//!
//! # Features
//!
//! - Row filtering by exact column value and stable lexicographic sorting
//! - First-row numeric column detection, per-row skip warnings
//! - Structured, typed warnings instead of printed diagnostics
//! - Fixed YYYY-MM-DD date contract with real calendar validation
//! - Equal-width histogram binning
//!
//! # Example
//!
//! ```no_run
//! use tally::core::analyze;
//! use tally::reader::read_table;
//! use tally::types::AnalysisConfig;
//! use std::path::Path;
//!
//! let table = read_table(Path::new("sales.csv"))?;
//! let config = AnalysisConfig::new(vec!["amount".into()]).with_date_column("date");
//! let report = analyze(&table, &config)?;
//!
//! for summary in &report.summaries {
//!     println!("{}: mean {}", summary.column, summary.mean);
//! }
//! for warning in &report.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! # Ok::<(), tally::error::TallyError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod reader;
pub mod types;

// Re-export commonly used types
pub use error::{TallyError, TallyResult};
pub use types::{AnalysisConfig, AnalysisReport, ColumnSummary, DateRange, Table, Warning};
