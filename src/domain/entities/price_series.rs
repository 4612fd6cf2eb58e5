use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Bar with every price set to `close`; handy when only closes matter.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// A price bar with the returns earned since the previous bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnRow {
    #[serde(flatten)]
    pub bar: PriceBar,
    pub simple_return: f64,
    pub log_return: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnSeries {
    pub ticker: String,
    pub rows: Vec<ReturnRow>,
}

impl ReturnSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn simple_returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.simple_return).collect()
    }

    pub fn log_returns(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.log_return).collect()
    }
}
