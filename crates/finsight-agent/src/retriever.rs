//! Semantic retrieval: embed the query, search the vector index.

use std::sync::Arc;

use finsight_core::errors::FinsightResult;
use finsight_core::models::Passage;
use finsight_core::traits::{IEmbeddingProvider, IVectorIndex};
use tracing::{debug, info};

/// The retrieval engine. Scores pass through untouched — thresholding
/// is an evaluation concern, not a retrieval one.
pub struct Retriever {
    embedder: Arc<dyn IEmbeddingProvider>,
    index: Arc<dyn IVectorIndex>,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        embedder: Arc<dyn IEmbeddingProvider>,
        index: Arc<dyn IVectorIndex>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            index,
            top_k,
        }
    }

    /// Top-k passages for a query, ordered by descending similarity.
    pub fn search(&self, query: &str) -> FinsightResult<Vec<Passage>> {
        let vector = self.embedder.embed_query(query)?;
        debug!(dims = vector.len(), "query embedded");

        let passages = self.index.search(&vector, self.top_k, None)?;
        info!(
            top_k = self.top_k,
            hits = passages.len(),
            scores = ?passages.iter().map(|p| p.score).collect::<Vec<_>>(),
            "retrieval complete"
        );
        Ok(passages)
    }
}
