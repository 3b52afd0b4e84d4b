//! CLI command handlers

pub mod commands;

pub use commands::{analyze, columns, histogram, watch, AnalyzeOptions, OutputFormat};
