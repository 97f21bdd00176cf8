//! AgentEngine: the router → dispatcher → synthesizer pipeline.

use std::sync::Arc;
use std::time::Instant;

use finsight_core::config::AgentConfig;
use finsight_core::models::{AgentResponse, QueryState};
use finsight_core::traits::{IChartRenderer, IEmbeddingProvider, ILanguageModel, IVectorIndex};
use finsight_trend::TrendEngine;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::retriever::Retriever;
use crate::router::Router;
use crate::synthesizer::Synthesizer;

/// The full query pipeline. Capabilities are injected once at
/// construction and shared read-only across stages.
pub struct AgentEngine {
    router: Router,
    dispatcher: Dispatcher,
    synthesizer: Synthesizer,
}

impl AgentEngine {
    pub fn new(
        config: &AgentConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        llm: Arc<dyn ILanguageModel>,
        index: Arc<dyn IVectorIndex>,
        renderer: Option<Arc<dyn IChartRenderer>>,
    ) -> Self {
        let retriever = Retriever::new(embedder, index, config.index.top_k);
        let trend = TrendEngine::new(config.paths.structured_dir.clone(), config.trend.clone());

        Self {
            router: Router::new(config.router.clone(), llm.clone()),
            dispatcher: Dispatcher::new(retriever, trend, renderer, config.tools.clone()),
            synthesizer: Synthesizer::new(&config.llm, llm),
        }
    }

    /// Run the pipeline for one query. Stages execute strictly in
    /// order; every failure path still yields a non-empty answer.
    pub fn run(&self, query: &str) -> AgentResponse {
        info!(query = %truncate(query, 120), "pipeline start");
        let t_total = Instant::now();
        let mut state = QueryState::new(query);

        let t0 = Instant::now();
        let (intent, reasoning) = self.router.classify(query);
        state.intent = intent;
        state.intent_reasoning = reasoning;
        state.record_metric("router_latency_s", t0.elapsed().as_secs_f64());

        let state = self.dispatcher.execute(state);
        let mut state = self.synthesizer.synthesize(state);

        state.record_metric("total_latency_s", t_total.elapsed().as_secs_f64());
        info!(
            intent = %state.intent,
            degraded = state.degraded,
            answer_len = state.answer.len(),
            error = state.error.is_some(),
            "pipeline complete"
        );
        AgentResponse::from(state)
    }
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
