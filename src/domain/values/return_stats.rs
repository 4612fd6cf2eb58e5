//! Distribution summary of daily returns.
//!
//! Produces the numbers behind a "distribution of daily returns" chart:
//! mean, sample standard deviation and extrema of one return column, plus a
//! fixed-width histogram where each bin also carries the count a normal
//! distribution with the same mean and deviation would put there
//! (`pdf(midpoint) × n × bin_width`).

use crate::domain::entities::price_series::ReturnSeries;
use crate::domain::error::DomainError;
use crate::domain::values::return_kind::ReturnKind;
use serde::Serialize;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStats {
    pub kind: ReturnKind,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// Normal-curve expectation for this bin.
    pub expected: f64,
}

/// Values of `kind`, limited to the trailing `window` rows when given.
pub fn select_returns(returns: &ReturnSeries, kind: ReturnKind, window: Option<usize>) -> Vec<f64> {
    let all = match kind {
        ReturnKind::Simple => returns.simple_returns(),
        ReturnKind::Log => returns.log_returns(),
    };
    match window {
        Some(w) if w < all.len() => all[all.len() - w..].to_vec(),
        _ => all,
    }
}

/// Summary statistics of one return column.
///
/// # Returns
/// `InsufficientData` when the selection is empty.
pub fn summarize(
    returns: &ReturnSeries,
    kind: ReturnKind,
    window: Option<usize>,
) -> Result<ReturnStats, DomainError> {
    let values = select_returns(returns, kind, window);
    if values.is_empty() {
        return Err(DomainError::InsufficientData { rows: returns.len() });
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std_dev = sample_std_dev(&values, mean);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(ReturnStats {
        kind,
        count: n,
        mean,
        std_dev,
        min,
        max,
    })
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Equal-width histogram over `[min, max]` of `values`.
///
/// The maximum lands in the last bin. Identical values, or a range too wide
/// to represent, collapse into a single bin. Empty input or `nbins == 0`
/// gives no bins.
pub fn histogram(values: &[f64], nbins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || nbins == 0 {
        return vec![];
    }

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std_dev = sample_std_dev(values, mean);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let width = (max - min) / nbins as f64;
    if max <= min || !width.is_finite() {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: n,
            expected: n as f64,
        }];
    }

    let mut counts = vec![0usize; nbins];
    for v in values {
        let idx = (((v - min) / width) as usize).min(nbins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lower = min + i as f64 * width;
            let upper = if i == nbins - 1 { max } else { lower + width };
            let mid = (lower + upper) / 2.0;
            HistogramBin {
                lower,
                upper,
                count,
                expected: normal_pdf(mid, mean, std_dev) * n as f64 * width,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::price_series::{PriceBar, ReturnRow};
    use chrono::NaiveDate;

    fn returns(simple: &[f64]) -> ReturnSeries {
        let rows = simple
            .iter()
            .enumerate()
            .map(|(i, r)| ReturnRow {
                bar: PriceBar::from_close(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                    100.0,
                ),
                simple_return: *r,
                log_return: (1.0 + r).ln(),
            })
            .collect();
        ReturnSeries {
            ticker: "T".into(),
            rows,
        }
    }

    #[test]
    fn test_summary_matches_hand_computation() {
        let s = summarize(&returns(&[0.01, 0.03, -0.01, 0.05]), ReturnKind::Simple, None).unwrap();
        assert_eq!(s.count, 4);
        assert!((s.mean - 0.02).abs() < 1e-12);
        // deviations: -0.01, 0.01, -0.03, 0.03 -> ss = 0.002, / 3
        assert!((s.std_dev - (0.002_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.min, -0.01);
        assert_eq!(s.max, 0.05);
    }

    #[test]
    fn test_window_keeps_trailing_rows() {
        let s = summarize(&returns(&[0.5, 0.5, 0.01, 0.03]), ReturnKind::Simple, Some(2)).unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_window_larger_than_series() {
        let s = summarize(&returns(&[0.01, 0.02]), ReturnKind::Log, Some(100)).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.kind, ReturnKind::Log);
    }

    #[test]
    fn test_single_value_has_zero_deviation() {
        let s = summarize(&returns(&[0.04]), ReturnKind::Simple, None).unwrap();
        assert_eq!(s.std_dev, 0.0);
    }

    #[test]
    fn test_empty_summary_is_insufficient() {
        let err = summarize(&returns(&[]), ReturnKind::Simple, None).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientData { .. }));
    }

    #[test]
    fn test_histogram_counts_sum_to_n() {
        let values = vec![-0.02, -0.01, 0.0, 0.0, 0.01, 0.015, 0.02, 0.03];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].lower, -0.02);
        assert_eq!(bins[4].upper, 0.03);
        assert!(bins[4].count >= 1);
        assert!(bins.iter().all(|b| b.expected >= 0.0));
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[0.1, 0.2], 0).is_empty());
        let flat = histogram(&[0.01, 0.01, 0.01], 10);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].count, 3);
    }

    #[test]
    fn test_overflowing_range_is_one_bin() {
        let bins = histogram(&[f64::MAX, -f64::MAX], 4);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
        assert_eq!(bins[0].lower, -f64::MAX);
        assert_eq!(bins[0].upper, f64::MAX);
        assert!(bins.iter().all(|b| !b.lower.is_nan() && !b.expected.is_nan()));
    }
}
