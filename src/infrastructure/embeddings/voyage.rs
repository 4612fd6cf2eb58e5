use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.voyageai.com";
pub const DEFAULT_MODEL: &str = "voyage-3-lite";
const QUERY_INPUT_TYPE: &str = "query";

/// Voyage AI embeddings. Requests are sent with `input_type: query`; the
/// catalog vectors must have been built with `document`.
pub struct VoyageProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    output_dimension: Option<usize>,
}

#[derive(Serialize)]
struct EmbedBody<'a> {
    input: &'a [String],
    model: &'a str,
    input_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dimension: Option<usize>,
}

#[derive(Deserialize)]
struct EmbedReply {
    data: Vec<EmbedItem>,
}

#[derive(Deserialize)]
struct EmbedItem {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

impl VoyageProvider {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        output_dimension: Option<usize>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            output_dimension,
        }
    }

    fn native_dimension(model: &str) -> usize {
        match model {
            "voyage-3-lite" => 512,
            "voyage-3" | "voyage-finance-2" => 1024,
            "voyage-3-large" | "voyage-large-2" => 1536,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for VoyageProvider {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if self.api_key.is_empty() {
            return Err(DomainError::Embedding("Voyage API key is not set".into()));
        }

        let resp = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&EmbedBody {
                input: texts,
                model: &self.model,
                input_type: QUERY_INPUT_TYPE,
                output_dimension: self.output_dimension,
            })
            .send()
            .await
            .map_err(|e| DomainError::Embedding(format!("Voyage request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Embedding(format!("Voyage returned {status}: {body}")));
        }

        let mut reply: EmbedReply = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Voyage response: {e}")))?;
        if reply.data.len() != texts.len() {
            return Err(DomainError::Embedding(format!(
                "Voyage returned {} vectors for {} inputs",
                reply.data.len(),
                texts.len()
            )));
        }
        reply.data.sort_by_key(|d| d.index);
        tracing::debug!(model = %self.model, inputs = texts.len(), "voyage embeddings received");
        Ok(reply.data.into_iter().map(|d| d.embedding).collect())
    }

    fn dimension(&self) -> usize {
        self.output_dimension
            .unwrap_or_else(|| Self::native_dimension(&self.model))
    }
}
