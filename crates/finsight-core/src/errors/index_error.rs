/// Vector index errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("upsert length mismatch: {chunks} chunks vs {vectors} vectors")]
    LengthMismatch { chunks: usize, vectors: usize },

    #[error("collection '{collection}' does not exist")]
    CollectionMissing { collection: String },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("upsert failed: {reason}")]
    UpsertFailed { reason: String },
}
