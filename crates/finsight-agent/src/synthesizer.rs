//! Answer synthesis from the dispatcher's output.
//!
//! Three paths, all ending in a non-empty answer: grounded LLM
//! synthesis, a fixed template when an upstream error exists (no LLM
//! call), and a degraded template with a raw-output preview when the
//! LLM itself fails.

use std::sync::Arc;
use std::time::Instant;

use finsight_core::config::defaults::RAW_OUTPUT_PREVIEW_CHARS;
use finsight_core::config::LlmConfig;
use finsight_core::models::{QueryState, ToolOutput};
use finsight_core::traits::{GenerationOptions, ILanguageModel};
use tracing::{error, info};

const SYSTEM_PROMPT: &str = "You are a financial intelligence assistant specializing in \
annual disclosure filings. Use the provided tool output to give a clear, concise, factual \
answer. If the tool output contains a note, include it politely in your answer. If numeric \
data is present, highlight key figures. Keep the answer under 300 words.";

/// The synthesis stage.
pub struct Synthesizer {
    llm: Arc<dyn ILanguageModel>,
    options: GenerationOptions,
}

impl Synthesizer {
    pub fn new(config: &LlmConfig, llm: Arc<dyn ILanguageModel>) -> Self {
        Self {
            llm,
            options: GenerationOptions {
                max_tokens: config.max_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
            },
        }
    }

    /// Pipeline stage wrapper around `compose`.
    pub fn synthesize(&self, mut state: QueryState) -> QueryState {
        let t0 = Instant::now();
        state.answer = self.compose(
            &state.query,
            state.tool_output.as_ref(),
            state.error.as_deref(),
        );
        state.record_metric("llm_latency_s", t0.elapsed().as_secs_f64());
        info!(answer_len = state.answer.len(), "synthesis complete");
        state
    }

    /// Compose the final answer.
    ///
    /// With an upstream error this never touches the LLM: the user gets
    /// a template naming the failure instead of a hallucinated answer.
    pub fn compose(
        &self,
        query: &str,
        tool_output: Option<&ToolOutput>,
        upstream_error: Option<&str>,
    ) -> String {
        if let Some(error) = upstream_error {
            return format!(
                "I encountered an error while processing your request: {error}. \
                 Please ensure the filings have been ingested and try again."
            );
        }

        let output_json = tool_output
            .and_then(|output| serde_json::to_string_pretty(output).ok())
            .unwrap_or_else(|| "{}".to_string());

        let user_message = format!(
            "User Question: {query}\n\n\
             Tool Output (JSON):\n{output_json}\n\n\
             Please provide a clear, factual answer based on the tool output."
        );

        match self.llm.generate(SYSTEM_PROMPT, &user_message, &self.options) {
            Ok(completion) if !completion.text.trim().is_empty() => {
                info!(
                    answer_len = completion.text.len(),
                    tokens_in = ?completion.input_tokens,
                    tokens_out = ?completion.output_tokens,
                    "answer generated"
                );
                completion.text
            }
            Ok(_) => {
                error!("LLM returned an empty answer, using degraded template");
                degraded_answer(&output_json)
            }
            Err(e) => {
                error!(error = %e, "LLM synthesis failed, using degraded template");
                degraded_answer(&output_json)
            }
        }
    }
}

/// Template answer retaining partial value: a bounded preview of the
/// raw tool output.
fn degraded_answer(output_json: &str) -> String {
    let preview: String = output_json.chars().take(RAW_OUTPUT_PREVIEW_CHARS).collect();
    format!(
        "I was unable to generate a response due to a language model error. \
         Raw tool output: {preview}"
    )
}
