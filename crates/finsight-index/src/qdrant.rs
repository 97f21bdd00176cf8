//! Qdrant vector index over the REST API.
//!
//! Collection distance is cosine; point ids are fresh v4 UUIDs; chunk
//! text and metadata are flattened into one payload object per point.

use std::collections::BTreeMap;

use finsight_core::config::IndexConfig;
use finsight_core::errors::{ConfigError, FinsightResult, IndexError, RemoteError};
use finsight_core::models::{ChunkRecord, Passage, PassageMetadata};
use finsight_core::traits::IVectorIndex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

const SERVICE: &str = "vector-index";

#[derive(Serialize)]
struct UpsertPoint {
    id: String,
    vector: Vec<f32>,
    payload: Value,
}

#[derive(Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
struct CountResponse {
    result: CountResult,
}

#[derive(Deserialize)]
struct CountResult {
    count: u64,
}

/// REST client for one Qdrant collection.
pub struct QdrantIndex {
    client: reqwest::blocking::Client,
    base_url: String,
    collection: String,
    dimensions: usize,
}

impl QdrantIndex {
    pub fn new(config: &IndexConfig, dimensions: usize) -> Self {
        info!(
            url = %config.url,
            collection = %config.collection,
            dims = dimensions,
            "qdrant index initialized"
        );
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            dimensions,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn collection_exists(&self) -> FinsightResult<bool> {
        let response = self
            .client
            .get(self.collection_url())
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;
        Ok(response.status().is_success())
    }

    fn check_dimensions(&self, vector: &[f32]) -> FinsightResult<()> {
        if vector.len() != self.dimensions {
            return Err(ConfigError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }

    fn parse_hit(hit: ScoredPoint) -> Passage {
        let id = match &hit.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let mut payload = hit.payload;
        let text = payload
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if let Some(object) = payload.as_object_mut() {
            object.remove("text");
        }
        let metadata: PassageMetadata = serde_json::from_value(payload).unwrap_or_else(|e| {
            warn!(error = %e, "unreadable payload metadata, returning bare passage");
            PassageMetadata::default()
        });

        Passage {
            id,
            // Four decimals is plenty for ranking and keeps logs stable.
            score: (hit.score * 10_000.0).round() / 10_000.0,
            text,
            metadata,
        }
    }
}

impl IVectorIndex for QdrantIndex {
    fn ensure_collection(&self) -> FinsightResult<()> {
        if self.collection_exists()? {
            debug!(collection = %self.collection, "collection already exists");
            return Ok(());
        }

        let body = json!({
            "vectors": { "size": self.dimensions, "distance": "Cosine" }
        });
        let response = self
            .client
            .put(self.collection_url())
            .json(&body)
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(IndexError::UpsertFailed {
                reason: format!(
                    "collection creation returned HTTP {}",
                    response.status()
                ),
            }
            .into());
        }

        info!(
            collection = %self.collection,
            dims = self.dimensions,
            "collection created (cosine)"
        );
        Ok(())
    }

    fn upsert(&self, chunks: &[ChunkRecord], vectors: &[Vec<f32>]) -> FinsightResult<usize> {
        if chunks.len() != vectors.len() {
            return Err(IndexError::LengthMismatch {
                chunks: chunks.len(),
                vectors: vectors.len(),
            }
            .into());
        }
        for vector in vectors {
            self.check_dimensions(vector)?;
        }

        self.ensure_collection()?;

        let points: Vec<UpsertPoint> = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| {
                Ok(UpsertPoint {
                    id: uuid::Uuid::new_v4().to_string(),
                    vector: vector.clone(),
                    payload: serde_json::to_value(chunk)?,
                })
            })
            .collect::<FinsightResult<_>>()?;

        let url = format!("{}/points?wait=true", self.collection_url());
        let response = self
            .client
            .put(&url)
            .json(&json!({ "points": points }))
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(IndexError::UpsertFailed {
                reason: format!("HTTP {}", response.status()),
            }
            .into());
        }

        info!(points = points.len(), collection = %self.collection, "points upserted");
        Ok(points.len())
    }

    fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filters: Option<&BTreeMap<String, String>>,
    ) -> FinsightResult<Vec<Passage>> {
        self.check_dimensions(query_vector)?;

        let mut body = json!({
            "vector": query_vector,
            "limit": top_k,
            "with_payload": true,
        });
        if let Some(filters) = filters {
            let must: Vec<Value> = filters
                .iter()
                .map(|(key, value)| json!({ "key": key, "match": { "value": value } }))
                .collect();
            body["filter"] = json!({ "must": must });
        }

        let url = format!("{}/points/search", self.collection_url());
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::SearchFailed {
                reason: format!("HTTP {status}"),
            }
            .into());
        }

        let parsed: SearchResponse = response
            .json()
            .map_err(|e| RemoteError::bad_response(SERVICE, e))?;

        let passages: Vec<Passage> = parsed.result.into_iter().map(Self::parse_hit).collect();
        debug!(top_k, hits = passages.len(), "search complete");
        Ok(passages)
    }

    fn count(&self) -> FinsightResult<u64> {
        if !self.collection_exists()? {
            return Ok(0);
        }
        let url = format!("{}/points/count", self.collection_url());
        let response = self
            .client
            .post(&url)
            .json(&json!({ "exact": true }))
            .send()
            .map_err(|e| RemoteError::http(SERVICE, e))?;

        let parsed: CountResponse = response
            .json()
            .map_err(|e| RemoteError::bad_response(SERVICE, e))?;
        Ok(parsed.result.count)
    }
}
