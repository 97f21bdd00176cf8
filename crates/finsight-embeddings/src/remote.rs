//! Remote embedding provider over an Ollama-compatible HTTP endpoint.
//!
//! Batches inputs, validates the returned dimensionality against the
//! configured index dimensionality (a mismatch is a configuration
//! fault, not a per-query failure), and caches query embeddings.

use finsight_core::config::EmbeddingConfig;
use finsight_core::errors::{ConfigError, FinsightResult, RemoteError};
use finsight_core::traits::IEmbeddingProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::QueryCache;

const SERVICE: &str = "embedding";

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// HTTP embedding client.
pub struct RemoteEmbedder {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    batch_size: usize,
    cache: QueryCache,
}

impl RemoteEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Self {
        info!(
            endpoint = %config.endpoint,
            model = %config.model,
            dims = config.dimensions,
            batch_size = config.batch_size,
            "remote embedder initialized"
        );
        Self {
            client: reqwest::blocking::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
            cache: QueryCache::new(config.cache_size),
        }
    }

    fn embed_one_batch(&self, batch: &[String]) -> FinsightResult<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.endpoint);
        let request = EmbedRequest {
            model: &self.model,
            input: batch,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RemoteError::bad_response(
                SERVICE,
                format!("HTTP {status}: {}", body.trim()),
            )
            .into());
        }

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| RemoteError::bad_response(SERVICE, e))?;

        if parsed.embeddings.len() != batch.len() {
            return Err(RemoteError::bad_response(
                SERVICE,
                format!(
                    "expected {} vectors, got {}",
                    batch.len(),
                    parsed.embeddings.len()
                ),
            )
            .into());
        }

        for vector in &parsed.embeddings {
            if vector.len() != self.dimensions {
                return Err(ConfigError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                }
                .into());
            }
        }

        Ok(parsed.embeddings)
    }
}

impl IEmbeddingProvider for RemoteEmbedder {
    fn embed_batch(&self, texts: &[String]) -> FinsightResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        let batches = texts.len().div_ceil(self.batch_size);
        debug!(texts = texts.len(), batches, "embedding batch request");

        for (i, batch) in texts.chunks(self.batch_size).enumerate() {
            let mut batch_vectors = self.embed_one_batch(batch)?;
            vectors.append(&mut batch_vectors);
            debug!(batch = i + 1, batches, done = vectors.len(), "batch embedded");
        }

        Ok(vectors)
    }

    fn embed_query(&self, query: &str) -> FinsightResult<Vec<f32>> {
        let key = QueryCache::key(query);
        if let Some(vector) = self.cache.get(&key) {
            debug!("query embedding cache hit");
            return Ok(vector);
        }

        let input = [query.to_string()];
        let vectors = self.embed_batch(&input)?;
        let vector = vectors.into_iter().next().ok_or_else(|| {
            RemoteError::bad_response(SERVICE, "empty embedding response for query")
        })?;

        self.cache.put(key, &vector);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "remote"
    }
}
