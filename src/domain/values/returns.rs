use crate::domain::entities::price_series::{PriceSeries, ReturnRow, ReturnSeries};
use crate::domain::error::DomainError;

/// Daily simple and log returns from closing prices.
///
/// Bars are sorted by date first. The earliest bar has no predecessor and is
/// dropped, so `n` bars produce `n - 1` rows. Every close must be positive
/// and finite; the check runs before any logarithm is taken.
pub fn compute_returns(series: &PriceSeries) -> Result<ReturnSeries, DomainError> {
    if series.bars.len() < 2 {
        return Err(DomainError::InsufficientData {
            rows: series.bars.len(),
        });
    }

    let mut bars = series.bars.clone();
    bars.sort_by_key(|b| b.date);

    if let Some(bad) = bars.iter().find(|b| !(b.close.is_finite() && b.close > 0.0)) {
        return Err(DomainError::InvalidPrice {
            date: bad.date,
            close: bad.close,
        });
    }

    let rows = bars
        .windows(2)
        .map(|pair| {
            let ratio = pair[1].close / pair[0].close;
            ReturnRow {
                bar: pair[1].clone(),
                simple_return: ratio - 1.0,
                log_return: ratio.ln(),
            }
        })
        .collect();

    Ok(ReturnSeries {
        ticker: series.ticker.clone(),
        rows,
    })
}
