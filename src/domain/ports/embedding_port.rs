use crate::domain::error::DomainError;

/// A text-embedding model used to encode search queries. Built once at
/// startup and shared across requests.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Native vector size, or 0 when the provider cannot know it in advance.
    fn dimension(&self) -> usize;
}
