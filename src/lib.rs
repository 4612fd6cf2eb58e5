pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::asset_detail::{AssetDetail, AssetDetailUseCase, DetailRequest};
use crate::application::encoder::QueryEncoder;
use crate::application::search::SearchUseCase;
use crate::application::session::Session;
use crate::config::{Config, EmbeddingBackend};
use crate::domain::entities::catalog::EmbeddingCatalog;
use crate::domain::entities::fundamentals::Fundamentals;
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::entities::ranked_result::RankedResult;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::market_data::MarketDataProvider;
use crate::domain::values::lookback::Lookback;
use crate::infrastructure::catalog::csv_catalog;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use crate::infrastructure::market_data::yahoo::YahooMarketData;
use std::sync::Arc;

pub use crate::application::ranking::{rank, DEFAULT_K};
pub use crate::domain::values::returns::compute_returns;

/// Process-wide entry point. Owns the catalog and the providers, built once
/// and shared read-only by every request.
pub struct AssetFinder {
    search_uc: SearchUseCase,
    detail_uc: AssetDetailUseCase,
    catalog: Arc<EmbeddingCatalog>,
    default_limit: usize,
}

impl AssetFinder {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let catalog = Arc::new(csv_catalog::load(&config.catalog_path)?);

        let emb = &config.embedding;
        let embedder: Arc<dyn EmbeddingProvider> = match emb.backend {
            EmbeddingBackend::OpenAi => Arc::new(OpenAiProvider::new(
                emb.api_key.clone(),
                emb.model.clone(),
                emb.base_url.clone(),
                emb.dimension,
                config.http_timeout,
            )),
            EmbeddingBackend::Voyage => Arc::new(VoyageProvider::new(
                emb.api_key.clone(),
                emb.model.clone(),
                emb.base_url.clone(),
                emb.dimension,
                config.http_timeout,
            )),
        };
        let market: Arc<dyn MarketDataProvider> =
            Arc::new(YahooMarketData::new(config.http_timeout, config.http_retries));

        Ok(Self::with_providers(catalog, embedder, market)?.with_default_limit(config.default_limit))
    }

    /// Fails with `DimensionMismatch` when the embedder advertises a vector
    /// size different from the catalog's.
    pub fn with_providers(
        catalog: Arc<EmbeddingCatalog>,
        embedder: Arc<dyn EmbeddingProvider>,
        market: Arc<dyn MarketDataProvider>,
    ) -> Result<Self, DomainError> {
        let encoder = QueryEncoder::new(embedder, &catalog)?;
        Ok(Self {
            search_uc: SearchUseCase::new(catalog.clone(), encoder),
            detail_uc: AssetDetailUseCase::new(market),
            catalog,
            default_limit: DEFAULT_K,
        })
    }

    pub fn with_default_limit(mut self, k: usize) -> Self {
        self.default_limit = k;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn catalog(&self) -> &EmbeddingCatalog {
        &self.catalog
    }

    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RankedResult>, DomainError> {
        self.search_uc.search(query, k).await
    }

    /// Search and store the shortlist in `session`.
    pub async fn search_in_session(
        &self,
        session: &mut Session,
        query: &str,
        k: usize,
    ) -> Result<Vec<RankedResult>, DomainError> {
        let results = self.search_uc.search(query, k).await?;
        session.record_search(query, results.clone());
        Ok(results)
    }

    pub async fn fundamentals(&self, ticker: &str) -> Option<Fundamentals> {
        self.detail_uc.fundamentals(ticker).await
    }

    pub async fn history(&self, ticker: &str, lookback: Lookback) -> Option<PriceSeries> {
        self.detail_uc.history(ticker, lookback).await
    }

    pub async fn detail(&self, ticker: &str, req: &DetailRequest) -> AssetDetail {
        self.detail_uc.execute(ticker, req).await
    }

    /// Detail for the asset currently selected in `session`.
    pub async fn detail_selected(
        &self,
        session: &Session,
        req: &DetailRequest,
    ) -> Result<AssetDetail, DomainError> {
        let selected = session
            .selected()
            .ok_or_else(|| DomainError::NotFound("no asset selected".into()))?;
        Ok(self.detail_uc.execute(&selected.ticker, req).await)
    }
}
