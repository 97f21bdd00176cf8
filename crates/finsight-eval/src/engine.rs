//! Evaluator: runs all three metrics for one finished triple.

use std::sync::Arc;

use finsight_core::models::{EvalResult, Passage};
use finsight_core::traits::ILanguageModel;
use tracing::info;

use crate::judge::LlmJudge;
use crate::recall;

/// Scores (query, answer, evidence) triples. Judge calls degrade to
/// 0.0 scores internally; anything else that fails is attached to the
/// result's error field without discarding metrics already computed.
pub struct Evaluator {
    judge: LlmJudge,
    recall_threshold: f32,
}

impl Evaluator {
    pub fn new(llm: Arc<dyn ILanguageModel>, recall_threshold: f32) -> Self {
        Self {
            judge: LlmJudge::new(llm),
            recall_threshold,
        }
    }

    /// Run faithfulness, answer relevancy, and context recall.
    ///
    /// `contexts` are the evidence texts; `evidence` carries the
    /// similarity scores for the recall heuristic.
    pub fn evaluate(
        &self,
        query: &str,
        answer: &str,
        contexts: &[String],
        evidence: &[Passage],
    ) -> EvalResult {
        let mut result = EvalResult {
            num_chunks: contexts.len(),
            ..Default::default()
        };

        let combined_context = contexts.join("\n---\n");
        result.faithfulness = self.judge.score_faithfulness(query, answer, &combined_context);
        result.answer_relevancy = self.judge.score_relevancy(query, answer);

        let scores: Vec<f32> = evidence.iter().map(|p| p.score).collect();
        result.context_recall = recall::context_recall(&scores, self.recall_threshold);

        info!(
            faithfulness = result.faithfulness,
            relevancy = result.answer_relevancy,
            recall = result.context_recall,
            mean = result.mean_score(),
            "sample evaluated"
        );
        result
    }
}
