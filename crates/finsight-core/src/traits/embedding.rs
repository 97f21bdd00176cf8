use crate::errors::FinsightResult;

/// Embedding generation provider.
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input, in order.
    fn embed_batch(&self, texts: &[String]) -> FinsightResult<Vec<Vec<f32>>>;

    /// Embed a single query string.
    fn embed_query(&self, query: &str) -> FinsightResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
