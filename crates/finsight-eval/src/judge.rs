//! LLM judge for faithfulness and answer relevancy.
//!
//! Prompts are deliberately simple: demand one JSON object
//! `{"score": <float>}`. Parsing tries JSON first, then falls back to
//! the first 0/1-prefixed float literal in the response. Nothing here
//! is ever fatal — a judge that cannot be understood scores 0.0.

use std::sync::Arc;
use std::sync::LazyLock;

use finsight_core::config::defaults::{
    JUDGE_ANSWER_CLIP_CHARS, JUDGE_CONTEXT_CLIP_CHARS, JUDGE_MAX_TOKENS, ROUTING_TEMPERATURE,
    ROUTING_TOP_P,
};
use finsight_core::traits::{GenerationOptions, ILanguageModel};
use regex::Regex;
use tracing::{debug, warn};

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([01](?:\.\d+)?)\b").unwrap());

const FAITHFULNESS_INSTRUCTION: &str = "You are an evaluation judge. Given a QUESTION, an \
ANSWER, and CONTEXT passages, score how faithful the answer is to the context. A faithful \
answer contains only information that can be inferred from the context. Respond ONLY with \
JSON: {\"score\": <float between 0.0 and 1.0>}. No other text.";

const RELEVANCY_INSTRUCTION: &str = "You are an evaluation judge. Given a QUESTION and an \
ANSWER, score how relevant the answer is to the question. A relevant answer directly \
addresses what was asked without unnecessary information. Respond ONLY with JSON: \
{\"score\": <float between 0.0 and 1.0>}. No other text.";

/// Scores one metric per call against the injected language model.
pub struct LlmJudge {
    llm: Arc<dyn ILanguageModel>,
}

impl LlmJudge {
    pub fn new(llm: Arc<dyn ILanguageModel>) -> Self {
        Self { llm }
    }

    /// Is every claim in the answer supported by the context?
    /// 1.0 = fully grounded, 0.0 = hallucinated.
    pub fn score_faithfulness(&self, query: &str, answer: &str, context: &str) -> f64 {
        let user = format!(
            "QUESTION: {query}\n\n\
             CONTEXT:\n{}\n\n\
             ANSWER: {}\n\n\
             Score faithfulness (0.0 = not grounded, 1.0 = fully grounded).",
            clip(context, JUDGE_CONTEXT_CLIP_CHARS),
            clip(answer, JUDGE_ANSWER_CLIP_CHARS),
        );
        let raw = self.call(FAITHFULNESS_INSTRUCTION, &user);
        let score = parse_score(&raw);
        debug!(score, raw = %clip(&raw, 100), "faithfulness scored");
        score
    }

    /// Does the answer address the question asked?
    /// 1.0 = directly answers it, 0.0 = off-topic.
    pub fn score_relevancy(&self, query: &str, answer: &str) -> f64 {
        let user = format!(
            "QUESTION: {query}\n\n\
             ANSWER: {}\n\n\
             Score answer relevancy (0.0 = off-topic, 1.0 = perfectly addresses the question).",
            clip(answer, JUDGE_ANSWER_CLIP_CHARS),
        );
        let raw = self.call(RELEVANCY_INSTRUCTION, &user);
        let score = parse_score(&raw);
        debug!(score, raw = %clip(&raw, 100), "relevancy scored");
        score
    }

    /// One deterministic, short judge call. Transport failures come
    /// back as a zero score instead of an error.
    fn call(&self, system: &str, user: &str) -> String {
        let options = GenerationOptions {
            max_tokens: JUDGE_MAX_TOKENS,
            temperature: ROUTING_TEMPERATURE,
            top_p: ROUTING_TOP_P,
        };
        match self.llm.generate(system, user, &options) {
            Ok(completion) => completion.text,
            Err(e) => {
                warn!(error = %e, "judge call failed, scoring 0.0");
                r#"{"score": 0.0}"#.to_string()
            }
        }
    }
}

/// Extract a score from judge output, clamped to [0, 1].
/// Unparseable output scores 0.0 and is logged, never fatal.
pub(crate) fn parse_score(raw: &str) -> f64 {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(raw.trim()) {
        // Valid JSON is authoritative: a missing score key is 0.0, not
        // an invitation to scrape digits out of other fields.
        return value
            .get("score")
            .and_then(|s| s.as_f64())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
    }

    if let Some(captures) = SCORE_RE.captures(raw) {
        if let Ok(score) = captures[1].parse::<f64>() {
            return score.clamp(0.0, 1.0);
        }
    }

    warn!(raw = %clip(raw, 200), "could not parse judge score, defaulting to 0.0");
    0.0
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
