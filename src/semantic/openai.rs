//! OpenAI-compatible embeddings client.
//!
//! Talks to any service exposing the `/v1/embeddings` API (hosted OpenAI,
//! or a local server for sentence-transformer models such as
//! `all-MiniLM-L6-v2`).

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::TextEmbedder;
use crate::error::{HybridRankError, Result};

/// Configuration for the embeddings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Full URL of the embeddings endpoint.
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Maximum number of texts per request.
    pub batch_size: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/v1/embeddings".to_string(),
            model: "all-MiniLM-L6-v2".to_string(),
            api_key: None,
            batch_size: 64,
            timeout_secs: 60,
        }
    }
}

/// Request structure for the embeddings API.
#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

/// Response structure from the embeddings API.
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

/// Individual embedding data from API response.
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    /// Position of the input this embedding belongs to.
    index: usize,
    embedding: Vec<f32>,
}

/// Text embedder backed by an OpenAI-compatible HTTP service.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl OpenAiEmbedder {
    /// Create a new embedder.
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(HybridRankError::invalid_config(
                "embedding batch_size must be greater than 0",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmbeddingConfig {
        &self.config
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut builder = self.client.post(&self.config.endpoint).json(&request);
        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .map_err(|e| HybridRankError::embedding(format!("embedding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HybridRankError::embedding(format!(
                "embedding service returned HTTP {status}"
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .map_err(|e| HybridRankError::embedding(format!("invalid embedding response: {e}")))?;

        order_embeddings(body.data, texts.len())
    }
}

impl TextEmbedder for OpenAiEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size) {
            embeddings.extend(self.embed_batch(chunk)?);
        }
        Ok(embeddings)
    }
}

/// Place each embedding at the position named by its `index` field.
fn order_embeddings(data: Vec<EmbeddingData>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(HybridRankError::embedding(format!(
            "expected {expected} embeddings, got {}",
            data.len()
        )));
    }

    let mut ordered: Vec<Option<Vec<f32>>> = vec![None; expected];
    for item in data {
        let slot = ordered.get_mut(item.index).ok_or_else(|| {
            HybridRankError::embedding(format!("embedding index {} out of range", item.index))
        })?;
        *slot = Some(item.embedding);
    }

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, embedding)| {
            embedding.ok_or_else(|| HybridRankError::embedding(format!("missing embedding {i}")))
        })
        .collect()
}
