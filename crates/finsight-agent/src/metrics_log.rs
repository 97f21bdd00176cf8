//! Append-only per-request metrics persistence.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use finsight_core::errors::FinsightResult;
use finsight_core::models::AgentResponse;
use serde::Serialize;
use tracing::debug;

#[derive(Serialize)]
struct MetricsRecord<'a> {
    timestamp: String,
    query: String,
    tools: &'a [String],
    image: bool,
    error: bool,
    #[serde(flatten)]
    metrics: &'a BTreeMap<String, f64>,
}

/// JSONL metrics sink. The file is opened in append mode per write so
/// concurrent writers never clobber each other's records.
pub struct MetricsLog {
    path: PathBuf,
}

impl MetricsLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Append one record for a completed request.
    pub fn append(&self, query: &str, response: &AgentResponse) -> FinsightResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = MetricsRecord {
            timestamp: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            query: crate::engine::truncate(query, 100),
            tools: &response.tools_used,
            image: response.image_path.is_some(),
            error: response.error.is_some(),
            metrics: &response.metrics,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{line}")?;
        debug!(path = %self.path.display(), "metrics record appended");
        Ok(())
    }
}
