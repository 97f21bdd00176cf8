use std::collections::BTreeMap;

use crate::errors::FinsightResult;
use crate::models::{ChunkRecord, Passage};

/// Persistent vector index over (id, vector, payload) points.
///
/// Scores are cosine similarity in [-1, 1]. No thresholding happens
/// inside the index — that is a caller/evaluation concern.
pub trait IVectorIndex: Send + Sync {
    /// Create the collection if it does not exist. Idempotent.
    fn ensure_collection(&self) -> FinsightResult<()>;

    /// Insert chunks with their vectors, assigning fresh unique ids.
    ///
    /// Fails with a validation error and performs no partial write when
    /// the two slices differ in length.
    fn upsert(&self, chunks: &[ChunkRecord], vectors: &[Vec<f32>]) -> FinsightResult<usize>;

    /// Nearest-neighbour search, ordered by descending score.
    ///
    /// `filters` are equality conditions on payload fields.
    fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filters: Option<&BTreeMap<String, String>>,
    ) -> FinsightResult<Vec<Passage>>;

    /// Number of points in the collection.
    fn count(&self) -> FinsightResult<u64>;
}
