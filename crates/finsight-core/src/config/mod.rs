//! Workspace configuration.
//!
//! One `AgentConfig` aggregates per-subsystem sections, all
//! serde-deserializable from TOML with full defaults — an empty file is
//! a valid config.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, FinsightResult};

/// Top-level configuration for the pipeline and its capabilities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub index: IndexConfig,
    pub router: RouterConfig,
    pub trend: TrendConfig,
    pub tools: ToolsConfig,
    pub eval: EvalConfig,
    pub paths: PathsConfig,
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> FinsightResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: AgentConfig = toml::from_str(&raw).map_err(|e| ConfigError::Invalid {
            reason: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Startup validation. Dimension and bound errors here are fatal.
    pub fn validate(&self) -> FinsightResult<()> {
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::Invalid {
                reason: "embedding.dimensions must be positive".into(),
            }
            .into());
        }
        if self.index.top_k == 0 {
            return Err(ConfigError::Invalid {
                reason: "index.top_k must be positive".into(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.eval.recall_threshold) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "eval.recall_threshold must be in [0, 1], got {}",
                    self.eval.recall_threshold
                ),
            }
            .into());
        }
        Ok(())
    }
}

/// Embedding capability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider kind: "remote" (HTTP endpoint) or "hashed" (offline fallback).
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "remote".into(),
            endpoint: "http://localhost:11434".into(),
            model: "mxbai-embed-large".into(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}

/// Language model capability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".into(),
            model: "llama3.1".into(),
            max_tokens: defaults::DEFAULT_LLM_MAX_TOKENS,
            temperature: defaults::DEFAULT_LLM_TEMPERATURE,
            top_p: defaults::DEFAULT_LLM_TOP_P,
        }
    }
}

/// Vector index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Backend kind: "qdrant" (REST) or "memory" (in-process).
    pub backend: String,
    pub url: String,
    pub collection: String,
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            backend: "qdrant".into(),
            url: "http://localhost:6333".into(),
            collection: "disclosure_reports".into(),
            top_k: defaults::DEFAULT_TOP_K,
        }
    }
}

/// Keyword routing configuration.
///
/// The two sets are checked in order: plot keywords first, then
/// financial. A query matching both routes to `plot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub plot_keywords: Vec<String>,
    pub financial_keywords: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            plot_keywords: defaults::default_plot_keywords(),
            financial_keywords: defaults::default_financial_keywords(),
        }
    }
}

/// Trend engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub revenue_columns: Vec<String>,
    pub income_columns: Vec<String>,
    /// Query terms that select the income vocabulary over revenue.
    pub income_query_terms: Vec<String>,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            revenue_columns: defaults::default_revenue_columns(),
            income_columns: defaults::default_income_columns(),
            income_query_terms: defaults::default_income_query_terms(),
        }
    }
}

/// Feature gates for the structured-analysis tools.
///
/// A disabled tool redirects its queries to the retriever with a
/// degraded-path note instead of failing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub financial_enabled: bool,
    pub plot_enabled: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            financial_enabled: true,
            plot_enabled: true,
        }
    }
}

/// Evaluation harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub recall_threshold: f32,
    pub results_file: PathBuf,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            recall_threshold: defaults::DEFAULT_RECALL_THRESHOLD,
            results_file: PathBuf::from("logs/eval_results.jsonl"),
        }
    }
}

/// Filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of CSV extracts produced by table extraction.
    pub structured_dir: PathBuf,
    /// Directory chart renderers write images into.
    pub static_dir: PathBuf,
    pub metrics_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            structured_dir: PathBuf::from("data/structured"),
            static_dir: PathBuf::from("static"),
            metrics_file: PathBuf::from("logs/metrics.jsonl"),
        }
    }
}
