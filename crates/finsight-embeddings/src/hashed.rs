//! Deterministic hashed bag-of-words embedder.
//!
//! Buckets each token into a fixed-dimension vector via blake3 and
//! weights by dampened term frequency. Far weaker than a neural model,
//! but deterministic and network-free — enough for tests and for
//! smoke-running the pipeline against a locally built index.

use std::collections::HashMap;

use finsight_core::errors::FinsightResult;
use finsight_core::traits::IEmbeddingProvider;

/// Offline fallback embedding provider.
pub struct HashedEmbedder {
    dimensions: usize,
}

impl HashedEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(&self, token: &str) -> usize {
        let digest = blake3::hash(token.as_bytes());
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest.as_bytes()[..8]);
        (u64::from_le_bytes(raw) as usize) % self.dimensions
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_lowercase();
            *counts.entry(self.bucket(&token)).or_default() += 1.0;
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (bucket, count) in counts {
            // Dampen repeated terms so one word cannot dominate.
            vector[bucket] = count.sqrt();
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl IEmbeddingProvider for HashedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> FinsightResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn embed_query(&self, query: &str) -> FinsightResult<Vec<f32>> {
        Ok(self.vector_for(query))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_have_configured_dimensions() {
        let embedder = HashedEmbedder::new(128);
        let vector = embedder.embed_query("operating income by segment").unwrap();
        assert_eq!(vector.len(), 128);
    }

    #[test]
    fn vectors_are_unit_norm() {
        let embedder = HashedEmbedder::new(128);
        let vector = embedder.embed_query("cloud infrastructure revenue").unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
    }

    #[test]
    fn embedding_is_deterministic() {
        let embedder = HashedEmbedder::new(64);
        let a = embedder.embed_query("fiscal year risks").unwrap();
        let b = embedder.embed_query("fiscal year risks").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let embedder = HashedEmbedder::new(32);
        let vector = embedder.embed_query("").unwrap();
        assert!(vector.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn overlapping_texts_score_closer_than_disjoint() {
        let embedder = HashedEmbedder::new(256);
        let a = embedder.embed_query("revenue growth in cloud services").unwrap();
        let b = embedder.embed_query("cloud services revenue expansion").unwrap();
        let c = embedder.embed_query("litigation and regulatory exposure").unwrap();
        let dot = |x: &[f32], y: &[f32]| x.iter().zip(y).map(|(p, q)| p * q).sum::<f32>();
        assert!(dot(&a, &b) > dot(&a, &c));
    }

    #[test]
    fn batch_order_matches_input_order() {
        let embedder = HashedEmbedder::new(64);
        let texts = vec!["alpha".to_string(), "beta".to_string()];
        let batch = embedder.embed_batch(&texts).unwrap();
        assert_eq!(batch[0], embedder.embed_query("alpha").unwrap());
        assert_eq!(batch[1], embedder.embed_query("beta").unwrap());
    }
}
