//! Quality-evaluation scores for a finished (query, answer) pair.

use serde::{Deserialize, Serialize};

/// Scores produced by the evaluation harness. Never mutated after
/// construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalResult {
    /// Are the answer's claims supported by the evidence? [0, 1]
    pub faithfulness: f64,
    /// Does the answer address the question? [0, 1]
    pub answer_relevancy: f64,
    /// Fraction of evidence at or above the similarity threshold. [0, 1]
    pub context_recall: f64,
    pub num_chunks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvalResult {
    /// Unweighted average of the three metrics, rounded to 3 decimals.
    pub fn mean_score(&self) -> f64 {
        let mean = (self.faithfulness + self.answer_relevancy + self.context_recall) / 3.0;
        (mean * 1000.0).round() / 1000.0
    }
}
