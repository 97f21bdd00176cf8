//! Append-only JSONL log of evaluation records.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use finsight_core::errors::FinsightResult;
use finsight_core::models::EvalResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One persisted evaluation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalRecord {
    pub query: String,
    /// Bounded preview, enough to identify the answer in review.
    pub answer_preview: String,
    pub faithfulness: f64,
    pub answer_relevancy: f64,
    pub context_recall: f64,
    pub mean_score: f64,
    pub num_chunks: usize,
    pub latency_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvalRecord {
    pub fn new(query: &str, answer: &str, result: &EvalResult, latency_s: f64) -> Self {
        Self {
            query: query.to_string(),
            answer_preview: answer.chars().take(200).collect(),
            faithfulness: result.faithfulness,
            answer_relevancy: result.answer_relevancy,
            context_recall: result.context_recall,
            mean_score: result.mean_score(),
            num_chunks: result.num_chunks,
            latency_s: (latency_s * 1000.0).round() / 1000.0,
            error: result.error.clone(),
        }
    }
}

/// JSONL sink, opened in append mode per write so concurrent
/// evaluation runs interleave records instead of losing them.
pub struct EvalLog {
    path: PathBuf,
}

impl EvalLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn append(&self, record: &EvalRecord) -> FinsightResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{line}")?;
        debug!(path = %self.path.display(), "eval record appended");
        Ok(())
    }
}
