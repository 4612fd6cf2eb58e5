use crate::domain::entities::catalog::EmbeddingCatalog;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Turns query text into a vector in the catalog's embedding space.
pub struct QueryEncoder {
    provider: Arc<dyn EmbeddingProvider>,
    expected_dim: Option<usize>,
    verified: AtomicBool,
}

impl QueryEncoder {
    /// Fails fast when the provider advertises a dimension that cannot match
    /// the catalog.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, catalog: &EmbeddingCatalog) -> Result<Self, DomainError> {
        let expected_dim = catalog.dimension();
        let native = provider.dimension();
        if let Some(expected) = expected_dim {
            if native > 0 && native != expected {
                return Err(DomainError::DimensionMismatch {
                    expected,
                    actual: native,
                });
            }
        }
        Ok(Self {
            provider,
            expected_dim,
            verified: AtomicBool::new(false),
        })
    }

    /// Empty or whitespace-only text is passed to the model as is.
    pub async fn encode(&self, text: &str) -> Result<Vec<f32>, DomainError> {
        let vectors = self.provider.embed(&[text.to_string()]).await?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Embedding("provider returned no vector".into()))?;

        if let Some(expected) = self.expected_dim {
            if vector.len() != expected {
                return Err(DomainError::DimensionMismatch {
                    expected,
                    actual: vector.len(),
                });
            }
            if !self.verified.swap(true, Ordering::Relaxed) {
                tracing::debug!(dimension = expected, "query encoder dimension verified");
            }
        }
        Ok(vector)
    }
}
