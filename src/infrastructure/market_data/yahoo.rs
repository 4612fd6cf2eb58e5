use crate::domain::entities::fundamentals::Fundamentals;
use crate::domain::entities::price_series::{PriceBar, PriceSeries};
use crate::domain::error::DomainError;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::lookback::Lookback;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::{StatusCode, Url};
use std::time::Duration;

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";

/// Yahoo Finance market data: v8 chart API for daily history, v10
/// quote-summary for fundamentals. Transport errors, 429 and 5xx responses
/// are retried with linear backoff; 404 means "no such ticker".
pub struct YahooMarketData {
    client: reqwest::Client,
    retries: u32,
    backoff: Duration,
}

impl YahooMarketData {
    pub fn new(timeout: Duration, retries: u32) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            retries,
            backoff: Duration::from_millis(500),
        }
    }

    /// GET `url`, returning the body, or `None` on 404.
    async fn get_text(&self, url: &str) -> Result<Option<String>, DomainError> {
        let mut attempt = 0u32;
        loop {
            let outcome = self.client.get(url).send().await;
            let retryable = match outcome {
                Ok(resp) => {
                    let status = resp.status();
                    if status == StatusCode::NOT_FOUND {
                        return Ok(None);
                    }
                    if status.is_success() {
                        return Ok(Some(resp.text().await?));
                    }
                    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                        DomainError::MarketData(format!("Yahoo API returned {status}"))
                    } else {
                        let body = resp.text().await.unwrap_or_default();
                        return Err(DomainError::MarketData(format!(
                            "Yahoo API returned {status}: {body}"
                        )));
                    }
                }
                Err(e) => DomainError::from(e),
            };

            if attempt >= self.retries {
                return Err(retryable);
            }
            attempt += 1;
            tracing::debug!(url, attempt, error = %retryable, "retrying market data request");
            tokio::time::sleep(self.backoff * attempt).await;
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, serde::Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, serde::Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: Option<i64>,
}

#[derive(Debug, serde::Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Parse a chart payload. Rows with any missing OHLC value are skipped; a
/// missing volume becomes 0.
pub fn parse_chart(ticker: &str, body: &str) -> Result<Option<PriceSeries>, DomainError> {
    let data: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = data.chart.error {
        if !err.is_null() {
            tracing::debug!(ticker, error = %err, "chart API reported an error");
            return Ok(None);
        }
    }

    let Some(first) = data.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };

    let offset = first.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let quote = first.indicators.quote.into_iter().next().unwrap_or_default();

    let at = |v: &Vec<Option<f64>>, i: usize| v.get(i).copied().flatten();
    let mut bars = Vec::with_capacity(first.timestamp.len());
    for (i, ts) in first.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            at(&quote.open, i),
            at(&quote.high, i),
            at(&quote.low, i),
            at(&quote.close, i),
        ) else {
            continue;
        };
        let Some(date) = to_date(ts + offset) else {
            continue;
        };
        let volume = at(&quote.volume, i).map(|v| v.max(0.0) as u64).unwrap_or(0);
        bars.push(PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    if bars.is_empty() {
        return Ok(None);
    }
    Ok(Some(PriceSeries::new(ticker, bars)))
}

/// `base/<ticker>?query`, with the ticker percent-encoded as one path segment.
fn endpoint(base: &str, ticker: &str, query: &[(&str, &str)]) -> Result<Url, DomainError> {
    let mut url = Url::parse(base).map_err(|e| DomainError::MarketData(format!("bad endpoint {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| DomainError::MarketData(format!("bad endpoint {base}")))?
        .push(ticker);
    url.query_pairs_mut().extend_pairs(query);
    Ok(url)
}

fn to_date(unix_secs: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(unix_secs, 0).map(|dt| dt.date_naive())
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, serde::Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<QuoteSummaryModules>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryModules {
    #[serde(default)]
    asset_profile: Option<AssetProfile>,
    #[serde(default)]
    price: Option<PriceModule>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetProfile {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    long_business_summary: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    market_cap: Option<RawValue>,
}

#[derive(Debug, serde::Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<f64>,
}

/// Parse a quote-summary payload into fixed fundamentals fields.
pub fn parse_quote_summary(body: &str) -> Result<Option<Fundamentals>, DomainError> {
    let data: QuoteSummaryResponse = serde_json::from_str(body)?;

    if let Some(err) = data.quote_summary.error {
        if !err.is_null() {
            return Ok(None);
        }
    }

    let Some(modules) = data.quote_summary.result.and_then(|r| r.into_iter().next()) else {
        return Ok(None);
    };

    let (sector, industry, summary) = match modules.asset_profile {
        Some(p) => (p.sector, p.industry, p.long_business_summary),
        None => (None, None, None),
    };
    let (name, market_cap) = match modules.price {
        Some(p) => (
            p.long_name.or(p.short_name),
            p.market_cap
                .and_then(|m| m.raw)
                .filter(|c| *c >= 0.0)
                .map(|c| c as u64),
        ),
        None => (None, None),
    };

    let fundamentals = Fundamentals {
        name,
        sector: sector.filter(|s| !s.is_empty()),
        industry: industry.filter(|s| !s.is_empty()),
        market_cap,
        summary: summary.filter(|s| !s.is_empty()),
    };

    if fundamentals.is_empty() {
        return Ok(None);
    }
    Ok(Some(fundamentals))
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    async fn fetch_history(
        &self,
        ticker: &str,
        lookback: Lookback,
    ) -> Result<Option<PriceSeries>, DomainError> {
        let url = endpoint(
            CHART_URL,
            ticker,
            &[
                ("range", lookback.as_range()),
                ("interval", "1d"),
                ("includeAdjustedClose", "false"),
            ],
        )?;
        match self.get_text(url.as_str()).await? {
            Some(body) => parse_chart(ticker, &body),
            None => Ok(None),
        }
    }

    async fn fetch_fundamentals(&self, ticker: &str) -> Result<Option<Fundamentals>, DomainError> {
        let url = endpoint(QUOTE_SUMMARY_URL, ticker, &[("modules", "assetProfile,price")])?;
        match self.get_text(url.as_str()).await? {
            Some(body) => parse_quote_summary(&body),
            None => Ok(None),
        }
    }
}
