//! Capability traits: the seams between the pipeline and its remote
//! collaborators. Concrete providers live in their own crates and are
//! injected at construction time.

mod chart;
mod embedding;
mod language_model;
mod vector_index;

pub use chart::IChartRenderer;
pub use embedding::IEmbeddingProvider;
pub use language_model::{Completion, GenerationOptions, ILanguageModel};
pub use vector_index::IVectorIndex;
