//! Central default values for all subsystem configs.

/// Embedding vector dimensionality the index is created with.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1024;

/// Texts per embedding request.
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;

/// Max entries in the L1 query-embedding cache.
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 4_096;

/// Nearest neighbours returned per search.
pub const DEFAULT_TOP_K: usize = 5;

/// Answer synthesis generation bounds.
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_LLM_TOP_P: f32 = 0.9;

/// Routing classification runs deterministic and short.
pub const ROUTING_MAX_TOKENS: u32 = 80;
pub const ROUTING_TEMPERATURE: f32 = 0.0;
pub const ROUTING_TOP_P: f32 = 1.0;

/// Judge calls return a single score object.
pub const JUDGE_MAX_TOKENS: u32 = 128;

/// Minimum cosine similarity for a passage to count as recalled.
pub const DEFAULT_RECALL_THRESHOLD: f32 = 0.70;

/// Character bound on the raw-output preview embedded in the
/// synthesizer's degraded answer.
pub const RAW_OUTPUT_PREVIEW_CHARS: usize = 500;

/// Clipping bounds for judge prompts.
pub const JUDGE_CONTEXT_CLIP_CHARS: usize = 3_000;
pub const JUDGE_ANSWER_CLIP_CHARS: usize = 1_000;

/// Column-name sample size included in a no-data diagnosis.
pub const COLUMN_SAMPLE_LIMIT: usize = 20;

pub fn default_plot_keywords() -> Vec<String> {
    [
        "plot",
        "chart",
        "graph",
        "visuali",
        "show trend",
        "bar chart",
        "line chart",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_financial_keywords() -> Vec<String> {
    [
        "revenue",
        "growth",
        "compare",
        "comparison",
        "trend",
        "income",
        "profit",
        "operating",
        "year over year",
        "yoy",
        "fiscal",
        "earnings",
        "sales",
        "margin",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Column vocabulary for revenue-like metrics.
pub fn default_revenue_columns() -> Vec<String> {
    [
        "revenue",
        "net revenue",
        "total revenue",
        "sales",
        "net sales",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Column vocabulary for income-like metrics.
pub fn default_income_columns() -> Vec<String> {
    [
        "operating income",
        "income from operations",
        "net income",
        "operating profit",
        "gross profit",
        "gross margin",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Query terms that switch metric selection to the income vocabulary.
pub fn default_income_query_terms() -> Vec<String> {
    ["income", "profit", "operating"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
