//! # finsight-core
//!
//! Foundation crate for the finsight disclosure-analysis pipeline.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod intent;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AgentConfig;
pub use errors::{FinsightError, FinsightResult};
pub use intent::Intent;
pub use models::{
    AgentResponse, ChunkRecord, EvalResult, Passage, PassageMetadata, QueryState, ToolOutput,
    ToolPayload, TrendResult,
};
