//! Query classification: deterministic keyword routing first,
//! LLM-assisted disambiguation as the fallback.
//!
//! The plot keyword set is checked before the financial set, so a query
//! asking to "chart the revenue trend" routes to `plot`.

use std::sync::Arc;

use finsight_core::config::defaults::{ROUTING_MAX_TOKENS, ROUTING_TEMPERATURE, ROUTING_TOP_P};
use finsight_core::config::RouterConfig;
use finsight_core::intent::Intent;
use finsight_core::traits::{GenerationOptions, ILanguageModel};
use serde::Deserialize;
use tracing::{debug, info, warn};

const KEYWORD_REASONING: &str = "keyword-based routing";
const FALLBACK_REASONING: &str = "fallback due to classification error";

const CLASSIFIER_INSTRUCTION: &str = "You are a routing agent. Given a user query about \
annual disclosure filings, classify it into exactly one of these categories:\n\
  - 'retriever' : narrative, qualitative, or risk questions\n\
  - 'financial' : quantitative trend or number analysis\n\
  - 'plot'      : requests for a chart, graph, or visualization\n\n\
Reply ONLY with valid JSON: {\"tool\": \"<category>\", \"reason\": \"<one sentence>\"}";

#[derive(Deserialize)]
struct Classification {
    tool: String,
    #[serde(default)]
    reason: String,
}

/// The routing stage.
pub struct Router {
    config: RouterConfig,
    llm: Arc<dyn ILanguageModel>,
}

impl Router {
    pub fn new(config: RouterConfig, llm: Arc<dyn ILanguageModel>) -> Self {
        Self { config, llm }
    }

    /// Classify a query into an intent with a human-readable reason.
    ///
    /// Never fails: every error path resolves to the retriever intent.
    pub fn classify(&self, query: &str) -> (Intent, String) {
        if let Some(intent) = self.keyword_route(query) {
            info!(intent = %intent, "keyword routing matched");
            return (intent, KEYWORD_REASONING.to_string());
        }

        debug!("no keyword match, falling back to LLM routing");
        self.llm_route(query)
    }

    fn keyword_route(&self, query: &str) -> Option<Intent> {
        let lower = query.to_lowercase();
        // Plot before financial: a query matching both is a chart request.
        if self.config.plot_keywords.iter().any(|kw| lower.contains(kw.as_str())) {
            return Some(Intent::Plot);
        }
        if self
            .config
            .financial_keywords
            .iter()
            .any(|kw| lower.contains(kw.as_str()))
        {
            return Some(Intent::Financial);
        }
        None
    }

    /// Routing must be reproducible, so the classifier runs at
    /// temperature zero. Any failure maps to the retriever fallback.
    fn llm_route(&self, query: &str) -> (Intent, String) {
        let options = GenerationOptions {
            max_tokens: ROUTING_MAX_TOKENS,
            temperature: ROUTING_TEMPERATURE,
            top_p: ROUTING_TOP_P,
        };

        let raw = match self.llm.generate(CLASSIFIER_INSTRUCTION, query, &options) {
            Ok(completion) => completion.text,
            Err(e) => {
                warn!(error = %e, "LLM routing failed, defaulting to retriever");
                return (Intent::Retriever, FALLBACK_REASONING.to_string());
            }
        };

        match parse_classification(&raw) {
            Some((intent, reason)) => {
                info!(intent = %intent, reason = %reason, "LLM routing complete");
                (intent, reason)
            }
            None => {
                warn!(raw = %raw, "unusable classification output, defaulting to retriever");
                (Intent::Retriever, FALLBACK_REASONING.to_string())
            }
        }
    }
}

/// Parse the strict `{"tool": ..., "reason": ...}` contract. Anything
/// else — prose, markdown fences, out-of-enum labels — is rejected.
fn parse_classification(raw: &str) -> Option<(Intent, String)> {
    let parsed: Classification = serde_json::from_str(raw.trim()).ok()?;
    let intent = Intent::parse_label(&parsed.tool)?;
    let reason = if parsed.reason.is_empty() {
        "LLM classification".to_string()
    } else {
        parsed.reason
    };
    Some((intent, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsight_core::errors::{FinsightResult, RemoteError};
    use finsight_core::traits::Completion;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted language model: returns a fixed response (or error) and
    /// counts invocations.
    struct ScriptedModel {
        response: Option<String>,
        calls: AtomicUsize,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                response: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ILanguageModel for ScriptedModel {
        fn generate(
            &self,
            _system: &str,
            _user: &str,
            _options: &GenerationOptions,
        ) -> FinsightResult<Completion> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(text) => Ok(Completion {
                    text: text.clone(),
                    input_tokens: Some(10),
                    output_tokens: Some(5),
                }),
                None => Err(RemoteError::http("llm", "connection refused").into()),
            }
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn router(llm: Arc<ScriptedModel>) -> Router {
        Router::new(RouterConfig::default(), llm)
    }

    #[test]
    fn plot_keywords_route_to_plot() {
        let llm = Arc::new(ScriptedModel::failing());
        let (intent, reason) = router(llm.clone()).classify("Show a revenue trend graph");
        assert_eq!(intent, Intent::Plot);
        assert_eq!(reason, KEYWORD_REASONING);
        assert_eq!(llm.call_count(), 0, "keyword routing must not call the LLM");
    }

    #[test]
    fn plot_wins_over_financial_on_overlap() {
        let llm = Arc::new(ScriptedModel::failing());
        // Contains both "chart" (plot) and "revenue"/"growth" (financial).
        let (intent, _) = router(llm).classify("chart the revenue growth since 2023");
        assert_eq!(intent, Intent::Plot);
    }

    #[test]
    fn financial_keywords_route_to_financial() {
        let llm = Arc::new(ScriptedModel::failing());
        let (intent, _) = router(llm).classify("How did operating margin develop?");
        assert_eq!(intent, Intent::Financial);
    }

    #[test]
    fn ambiguous_query_uses_llm_classification() {
        let llm = Arc::new(ScriptedModel::replying(
            r#"{"tool": "retriever", "reason": "narrative question about strategy"}"#,
        ));
        let (intent, reason) = router(llm.clone()).classify("What is the cloud strategy?");
        assert_eq!(intent, Intent::Retriever);
        assert_eq!(reason, "narrative question about strategy");
        assert_eq!(llm.call_count(), 1);
    }

    #[test]
    fn llm_failure_falls_back_to_retriever() {
        let llm = Arc::new(ScriptedModel::failing());
        let (intent, reason) = router(llm).classify("Tell me about leadership changes");
        assert_eq!(intent, Intent::Retriever);
        assert_eq!(reason, FALLBACK_REASONING);
    }

    #[test]
    fn unparseable_llm_output_falls_back() {
        let llm = Arc::new(ScriptedModel::replying(
            "Sure! I'd classify this as a financial question.",
        ));
        let (intent, reason) = router(llm).classify("Tell me about headcount");
        assert_eq!(intent, Intent::Retriever);
        assert_eq!(reason, FALLBACK_REASONING);
    }

    #[test]
    fn out_of_enum_label_falls_back() {
        let llm = Arc::new(ScriptedModel::replying(
            r#"{"tool": "calculator", "reason": "math"}"#,
        ));
        let (intent, _) = router(llm).classify("Tell me about the auditors");
        assert_eq!(intent, Intent::Retriever);
    }

    #[test]
    fn missing_reason_gets_a_default() {
        let parsed = parse_classification(r#"{"tool": "plot"}"#).unwrap();
        assert_eq!(parsed.0, Intent::Plot);
        assert_eq!(parsed.1, "LLM classification");
    }
}
