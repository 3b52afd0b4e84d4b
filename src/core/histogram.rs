//! Equal-width histogram binning for numeric columns.
//!
//! Unlike the statistics pipeline, the histogram path is strict: a column
//! qualifies only when every row's value parses as a number, and the full
//! unfiltered table is used.

use crate::types::{Table, Warning};

pub const DEFAULT_BINS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub values: usize,
    pub bins: Vec<HistogramBin>,
}

/// Bin `values` into `bin_count` equal-width bins spanning [min, max].
/// The last bin is right-inclusive. A constant column collapses to a
/// single bin holding every value.
pub fn build(column: &str, values: &[f64], bin_count: usize) -> Option<Histogram> {
    if values.is_empty() || bin_count == 0 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return Some(Histogram {
            column: column.to_string(),
            values: values.len(),
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &v in values {
        let slot = (((v - min) / width) as usize).min(bin_count - 1);
        counts[slot] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count,
        })
        .collect();

    Some(Histogram {
        column: column.to_string(),
        values: values.len(),
        bins,
    })
}

/// Build one histogram per selected column over the whole table.
///
/// A column whose values do not all parse as numbers cannot be plotted
/// and is skipped with a warning.
pub fn build_for_table(
    table: &Table,
    columns: &[String],
    bin_count: usize,
    warnings: &mut Vec<Warning>,
) -> Vec<Histogram> {
    let mut histograms = Vec::new();

    for name in columns {
        let Some(idx) = table.find_column(name) else {
            warnings.push(Warning::SelectedColumnMissing {
                column: name.clone(),
            });
            continue;
        };

        let parsed: Result<Vec<f64>, _> = table
            .rows
            .iter()
            .map(|row| row[idx].parse::<f64>())
            .collect();

        match parsed {
            Ok(values) if !values.is_empty() => {
                if let Some(histogram) = build(name, &values, bin_count) {
                    histograms.push(histogram);
                }
            }
            _ => warnings.push(Warning::NotPlottable {
                column: name.clone(),
            }),
        }
    }

    histograms
}
