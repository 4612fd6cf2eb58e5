//! Market-data port: price history and company fundamentals per ticker.

use crate::domain::entities::fundamentals::Fundamentals;
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::error::DomainError;
use crate::domain::values::lookback::Lookback;
use async_trait::async_trait;

/// External source of historical prices and fundamentals.
///
/// Implementations own their own timeout and retry policy. `Ok(None)` means
/// the provider has nothing for this ticker; `Err` is reserved for transport
/// or payload failures.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider name for logging (e.g., "yahoo_finance").
    fn name(&self) -> &str;

    async fn fetch_history(
        &self,
        ticker: &str,
        lookback: Lookback,
    ) -> Result<Option<PriceSeries>, DomainError>;

    async fn fetch_fundamentals(&self, ticker: &str) -> Result<Option<Fundamentals>, DomainError>;
}
