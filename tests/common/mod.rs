//! Shared test helpers: keyword embedder, in-memory market data, temp catalogs.

#![allow(dead_code)]

use assetfinder::domain::entities::catalog::EmbeddingCatalog;
use assetfinder::domain::entities::fundamentals::Fundamentals;
use assetfinder::domain::entities::price_series::{PriceBar, PriceSeries};
use assetfinder::domain::error::DomainError;
use assetfinder::domain::ports::embedding_port::EmbeddingProvider;
use assetfinder::domain::ports::market_data::MarketDataProvider;
use assetfinder::domain::values::lookback::Lookback;
use assetfinder::infrastructure::catalog::csv_catalog;
use assetfinder::AssetFinder;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

pub const VOCAB: [&str; 8] = [
    "apple", "iphone", "software", "electric", "car", "oil", "energy", "bank",
];

/// One axis per vocabulary word, counting occurrences.
pub fn keyword_vector(text: &str) -> Vec<f32> {
    let mut v = vec![0.0; VOCAB.len()];
    for word in text.to_lowercase().split(|c: char| !c.is_alphanumeric()) {
        if let Some(i) = VOCAB.iter().position(|w| *w == word) {
            v[i] += 1.0;
        }
    }
    v
}

/// Deterministic embedder over [`VOCAB`].
pub struct KeywordEmbedder {
    pub calls: AtomicUsize,
    advertised_dim: usize,
}

impl KeywordEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            advertised_dim: VOCAB.len(),
        }
    }

    /// Embedder that does not announce its dimension up front.
    pub fn silent() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            advertised_dim: 0,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| keyword_vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.advertised_dim
    }
}

/// Returns vectors of a fixed, configurable size.
pub struct FixedSizeEmbedder {
    pub size: usize,
    pub advertise: bool,
}

#[async_trait]
impl EmbeddingProvider for FixedSizeEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|_| vec![0.5; self.size]).collect())
    }

    fn dimension(&self) -> usize {
        if self.advertise {
            self.size
        } else {
            0
        }
    }
}

/// Always fails, like an unreachable embedding API.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        Err(DomainError::Embedding("connection refused".into()))
    }

    fn dimension(&self) -> usize {
        0
    }
}

#[derive(Default)]
pub struct FakeMarketData {
    pub history: HashMap<String, PriceSeries>,
    pub fundamentals: HashMap<String, Fundamentals>,
    pub fail: bool,
}

#[async_trait]
impl MarketDataProvider for FakeMarketData {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_history(&self, ticker: &str, _lookback: Lookback) -> Result<Option<PriceSeries>, DomainError> {
        if self.fail {
            return Err(DomainError::MarketData("timed out".into()));
        }
        Ok(self.history.get(ticker).cloned())
    }

    async fn fetch_fundamentals(&self, ticker: &str) -> Result<Option<Fundamentals>, DomainError> {
        if self.fail {
            return Err(DomainError::MarketData("timed out".into()));
        }
        Ok(self.fundamentals.get(ticker).cloned())
    }
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

pub fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(
        ticker,
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| PriceBar::from_close(date(i as u32 + 1), *c))
            .collect(),
    )
}

pub fn market() -> FakeMarketData {
    let mut m = FakeMarketData::default();
    m.history.insert(
        "AAPL".into(),
        series("AAPL", &[185.0, 184.0, 181.5, 182.0, 186.0, 185.5, 187.0]),
    );
    m.history.insert("TSLA".into(), series("TSLA", &[240.0]));
    m.history.insert("XOM".into(), series("XOM", &[100.0, 0.0, 101.0]));
    m.fundamentals.insert(
        "AAPL".into(),
        Fundamentals {
            name: Some("Apple Inc.".into()),
            sector: Some("Technology".into()),
            industry: Some("Consumer Electronics".into()),
            market_cap: Some(2_950_000_000_000),
            summary: Some("Designs smartphones and personal computers.".into()),
        },
    );
    m
}

/// Catalog rows: (ticker, name, text whose keyword vector is the embedding).
pub const ROWS: [(&str, &str, &str); 6] = [
    ("AAPL", "Apple Inc.", "apple iphone"),
    ("MSFT", "Microsoft Corporation", "software"),
    ("TSLA", "Tesla, Inc.", "electric car"),
    ("XOM", "Exxon Mobil Corporation", "oil energy"),
    ("JPM", "JPMorgan Chase & Co.", "bank"),
    ("NULL", "Zero Vector Holdings", ""),
];

pub fn catalog_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut s = String::from("Ticker,Name,embeddings\n");
    for (ticker, name, text) in rows {
        let emb = serde_json::to_string(&keyword_vector(text)).unwrap();
        s.push_str(&format!("{ticker},\"{name}\",\"{emb}\"\n"));
    }
    s
}

pub fn write_catalog(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

pub fn catalog() -> Arc<EmbeddingCatalog> {
    let file = write_catalog(&catalog_csv(&ROWS));
    Arc::new(csv_catalog::load(file.path()).unwrap())
}

pub fn setup() -> AssetFinder {
    setup_with(Arc::new(KeywordEmbedder::new()), market())
}

pub fn setup_with(embedder: Arc<dyn EmbeddingProvider>, market: FakeMarketData) -> AssetFinder {
    AssetFinder::with_providers(catalog(), embedder, Arc::new(market)).unwrap()
}
