//! # finsight-embeddings
//!
//! Embedding providers behind `IEmbeddingProvider`: a remote
//! HTTP-endpoint client with batching, dimension validation, and an L1
//! query cache — plus a deterministic hashed fallback that needs no
//! network at all.

mod cache;
mod hashed;
mod remote;

pub use hashed::HashedEmbedder;
pub use remote::RemoteEmbedder;

use finsight_core::config::EmbeddingConfig;
use finsight_core::traits::IEmbeddingProvider;

/// Build the provider named by the config.
///
/// Unrecognized kinds fall back to the remote provider so a typo fails
/// loudly at first use instead of silently degrading quality.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "hashed" => Box::new(HashedEmbedder::new(config.dimensions)),
        other => {
            if other != "remote" {
                tracing::warn!(provider = other, "unknown embedding provider, using remote");
            }
            Box::new(RemoteEmbedder::new(config))
        }
    }
}
