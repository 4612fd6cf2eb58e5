use crate::domain::entities::fundamentals::Fundamentals;
use crate::domain::entities::price_series::{PriceSeries, ReturnSeries};
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::lookback::Lookback;
use crate::domain::values::return_kind::ReturnKind;
use crate::domain::values::return_stats::{histogram, select_returns, summarize, HistogramBin, ReturnStats};
use crate::domain::values::returns::compute_returns;
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_BINS: usize = 30;

/// What to compute for a selected asset.
#[derive(Debug, Clone)]
pub struct DetailRequest {
    pub lookback: Lookback,
    pub kind: ReturnKind,
    pub window: Option<usize>,
    pub bins: usize,
}

impl Default for DetailRequest {
    fn default() -> Self {
        Self {
            lookback: Lookback::default(),
            kind: ReturnKind::Simple,
            window: None,
            bins: DEFAULT_BINS,
        }
    }
}

/// Everything shown for one selected ticker. Any part may be missing; `notes`
/// says why.
#[derive(Debug, Clone, Serialize)]
pub struct AssetDetail {
    pub ticker: String,
    pub fundamentals: Option<Fundamentals>,
    pub history: Option<PriceSeries>,
    pub returns: Option<ReturnSeries>,
    pub stats: Option<ReturnStats>,
    pub histogram: Vec<HistogramBin>,
    pub notes: Vec<String>,
}

impl AssetDetail {
    /// True when there is enough data to draw the returns chart.
    pub fn has_chart(&self) -> bool {
        self.stats.is_some()
    }
}

pub struct AssetDetailUseCase {
    market: Arc<dyn MarketDataProvider>,
}

impl AssetDetailUseCase {
    pub fn new(market: Arc<dyn MarketDataProvider>) -> Self {
        Self { market }
    }

    pub async fn fundamentals(&self, ticker: &str) -> Option<Fundamentals> {
        match self.market.fetch_fundamentals(ticker).await {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(ticker, provider = self.market.name(), error = %e, "fundamentals fetch failed");
                None
            }
        }
    }

    pub async fn history(&self, ticker: &str, lookback: Lookback) -> Option<PriceSeries> {
        match self.market.fetch_history(ticker, lookback).await {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(ticker, provider = self.market.name(), error = %e, "history fetch failed");
                None
            }
        }
    }

    /// Never fails: missing or unusable data becomes a `None` field and a note.
    pub async fn execute(&self, ticker: &str, req: &DetailRequest) -> AssetDetail {
        let ticker = ticker.trim().to_uppercase();
        let (fundamentals, history) = tokio::join!(
            self.market.fetch_fundamentals(&ticker),
            self.market.fetch_history(&ticker, req.lookback),
        );

        let mut notes = Vec::new();

        let fundamentals = match fundamentals {
            Ok(Some(f)) => Some(f),
            Ok(None) => {
                notes.push(format!("No fundamentals found for {ticker}"));
                None
            }
            Err(e) => {
                tracing::warn!(ticker = %ticker, error = %e, "fundamentals fetch failed");
                notes.push(format!("Fundamentals unavailable: {e}"));
                None
            }
        };

        let history = match history {
            Ok(Some(h)) if !h.is_empty() => Some(h),
            Ok(_) => {
                notes.push(format!("No price history found for {ticker}"));
                None
            }
            Err(e) => {
                tracing::warn!(ticker = %ticker, error = %e, "history fetch failed");
                notes.push(format!("Price history unavailable: {e}"));
                None
            }
        };

        let returns = history.as_ref().and_then(|h| match compute_returns(h) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::info!(ticker = %ticker, error = %e, "no returns chart");
                notes.push(format!("No returns chart: {e}"));
                None
            }
        });

        let (stats, bins) = match &returns {
            Some(r) => match summarize(r, req.kind, req.window) {
                Ok(s) => {
                    let values = select_returns(r, req.kind, req.window);
                    (Some(s), histogram(&values, req.bins))
                }
                Err(e) => {
                    notes.push(format!("No return statistics: {e}"));
                    (None, vec![])
                }
            },
            None => (None, vec![]),
        };

        AssetDetail {
            ticker,
            fundamentals,
            history,
            returns,
            stats,
            histogram: bins,
            notes,
        }
    }
}
