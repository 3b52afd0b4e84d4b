//! Numeric kernels for column statistics.
//!
//! All functions take the parsed values of one column. Callers guarantee
//! non-empty input for `mean` and `median`; `mode` and `sample_std_dev`
//! express their undefined cases as `None`.

use std::collections::HashMap;

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle element, or the average of the two middle elements.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// The unique most-frequent value, or `None` when the maximum frequency is
/// shared by more than one value ("No mode").
pub fn mode(values: &[f64]) -> Option<f64> {
    let mut counts: HashMap<u64, (f64, usize)> = HashMap::new();
    for &v in values {
        counts.entry(v.to_bits()).or_insert((v, 0)).1 += 1;
    }

    let max_count = counts.values().map(|&(_, n)| n).max()?;
    let mut at_max = counts.values().filter(|&&(_, n)| n == max_count);

    match (at_max.next(), at_max.next()) {
        (Some(&(value, _)), None) => Some(value),
        _ => None,
    }
}

/// Sample standard deviation (Bessel-corrected, divides by N−1).
///
/// Undefined for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}
