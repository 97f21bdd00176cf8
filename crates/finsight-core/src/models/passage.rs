//! Retrieved passages and their source metadata.

use serde::{Deserialize, Serialize};

/// Source metadata attached to every indexed chunk.
///
/// Serialized flattened alongside the passage's own fields, so one
/// passage renders as a single flat mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_index: Option<u32>,
}

/// One retrieved unit of text with its similarity score.
///
/// Created by a search call, immutable afterwards, never persisted
/// beyond the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Unique within one search response.
    pub id: String,
    /// Cosine similarity in [-1, 1]; used only for ranking and
    /// threshold comparison.
    pub score: f32,
    pub text: String,
    #[serde(flatten)]
    pub metadata: PassageMetadata,
}

/// The unit of ingestion handed to `IVectorIndex::upsert`, paired
/// one-to-one with an embedding vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub text: String,
    #[serde(flatten)]
    pub metadata: PassageMetadata,
}
