//! End-to-end pipeline tests with scripted capability fakes: routing,
//! dispatch, degraded redirects, synthesis, and failure isolation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use finsight_agent::AgentEngine;
use finsight_core::config::AgentConfig;
use finsight_core::errors::{FinsightResult, IndexError, RemoteError};
use finsight_core::models::{ChunkRecord, Passage, PassageMetadata};
use finsight_core::traits::{
    Completion, GenerationOptions, IChartRenderer, IEmbeddingProvider, ILanguageModel,
    IVectorIndex,
};

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

struct FixedEmbedder;

impl IEmbeddingProvider for FixedEmbedder {
    fn embed_batch(&self, texts: &[String]) -> FinsightResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0, 0.0]).collect())
    }

    fn embed_query(&self, _query: &str) -> FinsightResult<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0, 0.0])
    }

    fn dimensions(&self) -> usize {
        4
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct CannedIndex {
    passages: Vec<Passage>,
    fail: bool,
}

impl CannedIndex {
    fn with_hits() -> Self {
        let passage = |id: &str, score: f32, text: &str| Passage {
            id: id.to_string(),
            score,
            text: text.to_string(),
            metadata: PassageMetadata {
                company: Some("Contoso".into()),
                fiscal_year: Some("2024".into()),
                section: Some("Risk Factors".into()),
                ..Default::default()
            },
        };
        Self {
            passages: vec![
                passage("p1", 0.91, "Cybersecurity threats intensified."),
                passage("p2", 0.84, "Regulatory scrutiny increased."),
            ],
            fail: false,
        }
    }

    fn empty() -> Self {
        Self {
            passages: vec![],
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            passages: vec![],
            fail: true,
        }
    }
}

impl IVectorIndex for CannedIndex {
    fn ensure_collection(&self) -> FinsightResult<()> {
        Ok(())
    }

    fn upsert(&self, _chunks: &[ChunkRecord], _vectors: &[Vec<f32>]) -> FinsightResult<usize> {
        Ok(0)
    }

    fn search(
        &self,
        _query_vector: &[f32],
        _top_k: usize,
        _filters: Option<&BTreeMap<String, String>>,
    ) -> FinsightResult<Vec<Passage>> {
        if self.fail {
            return Err(IndexError::SearchFailed {
                reason: "vector index unreachable".into(),
            }
            .into());
        }
        Ok(self.passages.clone())
    }

    fn count(&self) -> FinsightResult<u64> {
        Ok(self.passages.len() as u64)
    }
}

/// Replays scripted responses in order, repeating the last one, and
/// records every user message it was shown.
struct QueueModel {
    responses: Vec<Option<String>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl QueueModel {
    fn new(responses: Vec<Option<&str>>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|r| r.map(str::to_string))
                .collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn prompt(&self, index: usize) -> String {
        self.prompts.lock().unwrap()[index].clone()
    }
}

impl ILanguageModel for QueueModel {
    fn generate(
        &self,
        _system: &str,
        user: &str,
        _options: &GenerationOptions,
    ) -> FinsightResult<Completion> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(user.to_string());

        let scripted = self
            .responses
            .get(call)
            .or_else(|| self.responses.last())
            .cloned()
            .flatten();
        match scripted {
            Some(text) => Ok(Completion {
                text,
                input_tokens: Some(100),
                output_tokens: Some(50),
            }),
            None => Err(RemoteError::http("llm", "connection refused").into()),
        }
    }

    fn name(&self) -> &str {
        "queued"
    }
}

struct PathRenderer {
    path: PathBuf,
}

impl IChartRenderer for PathRenderer {
    fn render(
        &self,
        _metric_label: &str,
        _values_by_year: &BTreeMap<u16, f64>,
    ) -> FinsightResult<PathBuf> {
        Ok(self.path.clone())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn config(structured_dir: &Path) -> AgentConfig {
    let mut config = AgentConfig::default();
    config.embedding.dimensions = 4;
    config.paths.structured_dir = structured_dir.to_path_buf();
    config
}

fn write_extract(dir: &Path) {
    std::fs::write(
        dir.join("contoso_FY23_10K.csv"),
        "Item,Total Revenue\nTotal,\"211,915\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("contoso_FY24_10K.csv"),
        "Item,Total Revenue\nTotal,\"245,122\"\n",
    )
    .unwrap();
}

fn engine(
    config: &AgentConfig,
    index: CannedIndex,
    llm: Arc<QueueModel>,
    renderer: Option<Arc<dyn IChartRenderer>>,
) -> AgentEngine {
    AgentEngine::new(
        config,
        Arc::new(FixedEmbedder),
        llm,
        Arc::new(index),
        renderer,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn narrative_query_runs_retrieval_and_synthesis() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(QueueModel::new(vec![
        Some(r#"{"tool": "retriever", "reason": "qualitative question"}"#),
        Some("The filings highlight cybersecurity and regulatory risks."),
    ]));
    let engine = engine(&config(dir.path()), CannedIndex::with_hits(), llm.clone(), None);

    let response = engine.run("What are the key risks the company faces?");

    assert_eq!(response.tools_used, vec!["retriever"]);
    assert_eq!(response.evidence.len(), 2);
    assert_eq!(response.evidence[0].id, "p1");
    assert!(response.answer.contains("cybersecurity"));
    assert!(response.error.is_none());
    // Routing + synthesis, nothing more.
    assert_eq!(llm.call_count(), 2);
    for key in ["router_latency_s", "tool_latency_s", "llm_latency_s", "total_latency_s"] {
        assert!(response.metrics.contains_key(key), "missing metric {key}");
    }
}

#[test]
fn financial_query_skips_llm_routing_and_reports_trend() {
    let dir = tempfile::tempdir().unwrap();
    write_extract(dir.path());
    let llm = Arc::new(QueueModel::new(vec![Some("Revenue grew about 15.7% YoY.")]));
    let engine = engine(&config(dir.path()), CannedIndex::empty(), llm.clone(), None);

    let response = engine.run("How has revenue changed between 2023 and 2024?");

    assert_eq!(response.tools_used, vec!["financial"]);
    assert!(response.error.is_none());
    assert!(response.evidence.is_empty());
    // Keyword routing means the single LLM call is the synthesis one,
    // and its prompt embeds the computed growth figures.
    assert_eq!(llm.call_count(), 1);
    let prompt = llm.prompt(0);
    assert!(prompt.contains("yoy_growth_pct"), "prompt: {prompt}");
    assert!(prompt.contains("15.67"), "prompt: {prompt}");
}

#[test]
fn disabled_financial_tool_degrades_to_retriever_with_note() {
    let dir = tempfile::tempdir().unwrap();
    write_extract(dir.path());
    let mut config = config(dir.path());
    config.tools.financial_enabled = false;

    let llm = Arc::new(QueueModel::new(vec![Some("Here is what the filings say.")]));
    let engine = engine(&config, CannedIndex::with_hits(), llm.clone(), None);

    let response = engine.run("Compare revenue growth year over year");

    assert_eq!(response.tools_used, vec!["retriever"]);
    assert!(response.error.is_none());
    // The redirect note must reach the synthesis prompt verbatim.
    let prompt = llm.prompt(0);
    assert!(
        prompt.contains("Searching the narrative report text instead."),
        "prompt: {prompt}"
    );
}

#[test]
fn plot_query_renders_chart_and_captures_path() {
    let dir = tempfile::tempdir().unwrap();
    write_extract(dir.path());
    let chart_path = dir.path().join("trend.png");
    let renderer: Arc<dyn IChartRenderer> = Arc::new(PathRenderer {
        path: chart_path.clone(),
    });

    let llm = Arc::new(QueueModel::new(vec![Some("Chart attached.")]));
    let engine = engine(
        &config(dir.path()),
        CannedIndex::empty(),
        llm.clone(),
        Some(renderer),
    );

    let response = engine.run("Plot the revenue trend");

    assert_eq!(response.tools_used, vec!["plot"]);
    assert_eq!(response.image_path, Some(chart_path));
    assert!(response.error.is_none());
}

#[test]
fn plot_without_renderer_degrades_to_retriever() {
    let dir = tempfile::tempdir().unwrap();
    write_extract(dir.path());
    let llm = Arc::new(QueueModel::new(vec![Some("No chart available.")]));
    let engine = engine(&config(dir.path()), CannedIndex::with_hits(), llm.clone(), None);

    let response = engine.run("Plot the revenue trend");

    assert_eq!(response.tools_used, vec!["retriever"]);
    assert!(response.image_path.is_none());
    let prompt = llm.prompt(0);
    assert!(prompt.contains("Searching the narrative report text instead."));
}

#[test]
fn index_failure_degrades_to_error_answer_without_synthesis_call() {
    let dir = tempfile::tempdir().unwrap();
    // Routing fails too: total LLM calls must stay at exactly one (the
    // routing attempt), since the synthesizer short-circuits on error.
    let llm = Arc::new(QueueModel::new(vec![None]));
    let engine = engine(&config(dir.path()), CannedIndex::failing(), llm.clone(), None);

    let response = engine.run("Anything notable about litigation?");

    assert_eq!(llm.call_count(), 1, "only the routing attempt may call the LLM");
    assert!(response.error.is_some());
    assert!(response.answer.contains("vector index unreachable"));
    assert!(
        response.answer.contains("ingested"),
        "error template should point at ingestion: {}",
        response.answer
    );
}

#[test]
fn empty_retrieval_still_produces_an_answer() {
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(QueueModel::new(vec![
        Some(r#"{"tool": "retriever", "reason": "default"}"#),
        Some("I could not find relevant passages for that question."),
    ]));
    let engine = engine(&config(dir.path()), CannedIndex::empty(), llm.clone(), None);

    let response = engine.run("What does the chairman's letter say?");

    assert!(response.evidence.is_empty());
    assert!(!response.answer.is_empty());
    assert!(response.error.is_none());
    // The empty status was put in front of the synthesizer.
    let prompt = llm.prompt(1);
    assert!(prompt.contains("\"status\": \"empty\""), "prompt: {prompt}");
}

#[test]
fn trend_engine_failure_is_contained_as_state_error() {
    // No CSV extracts on disk: the financial path fails, the pipeline
    // must still answer.
    let dir = tempfile::tempdir().unwrap();
    let llm = Arc::new(QueueModel::new(vec![Some("unused")]));
    let engine = engine(&config(dir.path()), CannedIndex::empty(), llm.clone(), None);

    let response = engine.run("What is the revenue trend?");

    assert_eq!(response.tools_used, vec!["financial"]);
    assert!(response.error.is_some());
    assert!(response.answer.contains("no CSV extracts"));
    assert_eq!(llm.call_count(), 0, "error path must not consult the LLM");
}
