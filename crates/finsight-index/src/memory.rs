//! Brute-force in-memory vector index.
//!
//! Exact cosine search over a mutex-guarded point list. Used by tests
//! and air-gapped runs; behaviorally equivalent to the remote backend
//! for small corpora.

use std::collections::BTreeMap;
use std::sync::Mutex;

use finsight_core::errors::{ConfigError, FinsightResult, IndexError};
use finsight_core::models::{ChunkRecord, Passage, PassageMetadata};
use finsight_core::traits::IVectorIndex;
use tracing::debug;

struct StoredPoint {
    id: String,
    vector: Vec<f32>,
    chunk: ChunkRecord,
}

/// In-process vector index.
pub struct MemoryIndex {
    points: Mutex<Vec<StoredPoint>>,
    dimensions: usize,
}

impl MemoryIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            points: Mutex::new(Vec::new()),
            dimensions,
        }
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

    fn matches(metadata: &PassageMetadata, filters: &BTreeMap<String, String>) -> bool {
        filters.iter().all(|(key, expected)| {
            let actual = match key.as_str() {
                "company" => metadata.company.clone(),
                "fiscal_year" => metadata.fiscal_year.clone(),
                "document_type" => metadata.document_type.clone(),
                "section" => metadata.section.clone(),
                "source_file" => metadata.source_file.clone(),
                "chunk_index" => metadata.chunk_index.map(|i| i.to_string()),
                _ => None,
            };
            actual.as_deref() == Some(expected.as_str())
        })
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

impl IVectorIndex for MemoryIndex {
    fn ensure_collection(&self) -> FinsightResult<()> {
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
        // Validate every vector before touching the store, so a bad
        // batch never results in a partial write.
        for vector in vectors {
            self.check_dimensions(vector)?;
        }

        let mut points = self
            .points
            .lock()
            .map_err(|_| IndexError::UpsertFailed {
                reason: "point store poisoned".into(),
            })?;
        for (chunk, vector) in chunks.iter().zip(vectors) {
            points.push(StoredPoint {
                id: uuid::Uuid::new_v4().to_string(),
                vector: vector.clone(),
                chunk: chunk.clone(),
            });
        }

        debug!(added = chunks.len(), total = points.len(), "points stored");
        Ok(chunks.len())
    }

    fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filters: Option<&BTreeMap<String, String>>,
    ) -> FinsightResult<Vec<Passage>> {
        self.check_dimensions(query_vector)?;

        let points = self
            .points
            .lock()
            .map_err(|_| IndexError::SearchFailed {
                reason: "point store poisoned".into(),
            })?;

        let mut hits: Vec<Passage> = points
            .iter()
            .filter(|p| match filters {
                Some(filters) => Self::matches(&p.chunk.metadata, filters),
                None => true,
            })
            .map(|p| Passage {
                id: p.id.clone(),
                score: cosine(query_vector, &p.vector),
                text: p.chunk.text.clone(),
                metadata: p.chunk.metadata.clone(),
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        Ok(hits)
    }

    fn count(&self) -> FinsightResult<u64> {
        let points = self
            .points
            .lock()
            .map_err(|_| IndexError::SearchFailed {
                reason: "point store poisoned".into(),
            })?;
        Ok(points.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = [0.6, 0.8];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
