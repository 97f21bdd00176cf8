//! Query intent classification labels.
//!
//! The router assigns exactly one intent per query; the dispatcher maps
//! each intent to the engine that handles it.

use serde::{Deserialize, Serialize};

/// The classified category of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Narrative, qualitative, or risk questions — semantic search.
    Retriever,
    /// Quantitative trend or number analysis — structured extracts.
    Financial,
    /// Requests for a chart, graph, or visualization.
    Plot,
    /// Not yet classified. Only valid before the router has run.
    Unknown,
}

impl Intent {
    /// Stable lowercase label, matching the wire/config representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Retriever => "retriever",
            Intent::Financial => "financial",
            Intent::Plot => "plot",
            Intent::Unknown => "unknown",
        }
    }

    /// Parse a label produced by the LLM classifier. Unrecognized labels
    /// return `None` so the caller can apply its fallback.
    pub fn parse_label(label: &str) -> Option<Intent> {
        match label.trim().to_lowercase().as_str() {
            "retriever" => Some(Intent::Retriever),
            "financial" => Some(Intent::Financial),
            "plot" => Some(Intent::Plot),
            _ => None,
        }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Intent::Unknown
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
