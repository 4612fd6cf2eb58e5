use crate::application::encoder::QueryEncoder;
use crate::application::ranking::rank;
use crate::domain::entities::catalog::EmbeddingCatalog;
use crate::domain::entities::ranked_result::RankedResult;
use crate::domain::error::DomainError;
use std::sync::Arc;

pub struct SearchUseCase {
    catalog: Arc<EmbeddingCatalog>,
    encoder: QueryEncoder,
}

impl SearchUseCase {
    pub fn new(catalog: Arc<EmbeddingCatalog>, encoder: QueryEncoder) -> Self {
        Self { catalog, encoder }
    }

    /// Encode `query` and return the `k` closest catalog entries.
    ///
    /// Only `DimensionMismatch` escapes as an error. A failed embedding call
    /// is a per-request problem and yields an empty result.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RankedResult>, DomainError> {
        if self.catalog.is_empty() || k == 0 {
            return Ok(vec![]);
        }

        let vector = match self.encoder.encode(query).await {
            Ok(v) => v,
            Err(e @ DomainError::DimensionMismatch { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "query encoding failed, returning no results");
                return Ok(vec![]);
            }
        };

        let results = rank(&vector, &self.catalog, k);
        tracing::debug!(query, returned = results.len(), catalog = self.catalog.len(), "search ranked");
        Ok(results)
    }

    pub fn catalog(&self) -> &EmbeddingCatalog {
        &self.catalog
    }
}
