//! The shared state record threaded through the pipeline.
//!
//! Each stage consumes the previous stage's state by value and returns
//! a new one, so "error once set is never cleared" and "metric keys are
//! never overwritten" hold by construction rather than by discipline.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

use super::passage::Passage;
use super::tool_output::ToolOutput;

/// Pipeline state for a single query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryState {
    /// The original user question. Immutable once set.
    pub query: String,
    /// Set exactly once by the router.
    pub intent: Intent,
    pub intent_reasoning: String,
    /// Populated by the dispatcher; never mutated afterwards.
    pub evidence: Vec<Passage>,
    /// Raw envelope from the invoked engine.
    pub tool_output: Option<ToolOutput>,
    /// Set exactly once by the synthesizer. Never empty on completion.
    pub answer: String,
    pub tools_used: Vec<String>,
    pub image_path: Option<PathBuf>,
    /// True if the intent was redirected to a fallback capability.
    pub degraded: bool,
    /// First fatal error encountered; later errors are logged, not stored.
    pub error: Option<String>,
    /// Stage name → elapsed seconds. Append-only.
    pub metrics: BTreeMap<String, f64>,
}

impl QueryState {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            intent: Intent::Unknown,
            intent_reasoning: String::new(),
            evidence: Vec::new(),
            tool_output: None,
            answer: String::new(),
            tools_used: Vec::new(),
            image_path: None,
            degraded: false,
            error: None,
            metrics: BTreeMap::new(),
        }
    }

    /// Record the first error only. Subsequent calls are dropped with a
    /// debug trace so the original failure stays visible downstream.
    pub fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.error.is_none() {
            self.error = Some(message);
        } else {
            tracing::debug!(dropped = %message, "error already recorded, keeping first");
        }
    }

    /// Append a stage timing. Existing keys are never overwritten.
    pub fn record_metric(&mut self, stage: &str, seconds: f64) {
        let rounded = (seconds * 1000.0).round() / 1000.0;
        self.metrics.entry(stage.to_string()).or_insert(rounded);
    }
}

/// The response contract exposed to CLI/HTTP callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub answer: String,
    pub tools_used: Vec<String>,
    pub evidence: Vec<Passage>,
    pub image_path: Option<PathBuf>,
    pub metrics: BTreeMap<String, f64>,
    pub error: Option<String>,
}

impl From<QueryState> for AgentResponse {
    fn from(state: QueryState) -> Self {
        Self {
            answer: state.answer,
            tools_used: state.tools_used,
            evidence: state.evidence,
            image_path: state.image_path,
            metrics: state.metrics,
            error: state.error,
        }
    }
}
