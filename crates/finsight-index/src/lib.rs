//! # finsight-index
//!
//! `IVectorIndex` backends. The Qdrant backend speaks the REST API with
//! a blocking client; the in-memory backend does exact brute-force
//! cosine search for tests and air-gapped runs. Both enforce the
//! configured dimensionality and the upsert length contract.

mod memory;
mod qdrant;

pub use memory::MemoryIndex;
pub use qdrant::QdrantIndex;

use finsight_core::config::IndexConfig;
use finsight_core::traits::IVectorIndex;

/// Build the index backend named by the config.
pub fn create_index(config: &IndexConfig, dimensions: usize) -> Box<dyn IVectorIndex> {
    match config.backend.as_str() {
        "memory" => Box::new(MemoryIndex::new(dimensions)),
        other => {
            if other != "qdrant" {
                tracing::warn!(backend = other, "unknown index backend, using qdrant");
            }
            Box::new(QdrantIndex::new(config, dimensions))
        }
    }
}
