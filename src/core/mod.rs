//! Core analysis engine: the filter→sort→aggregate pipeline plus numeric
//! kernels and histogram binning.

pub mod histogram;
pub mod pipeline;
pub mod stats;

pub use histogram::{Histogram, HistogramBin};
pub use pipeline::{analyze, select_rows, DATE_FORMAT};
