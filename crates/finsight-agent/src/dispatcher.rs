//! Intent dispatch: invoke the right engine, normalize its output into
//! the shared envelope, and degrade gracefully when a tool is disabled
//! or unavailable.

use std::sync::Arc;
use std::time::Instant;

use finsight_core::config::ToolsConfig;
use finsight_core::errors::FinsightResult;
use finsight_core::intent::Intent;
use finsight_core::models::{QueryState, ToolOutput, ToolPayload};
use finsight_core::traits::IChartRenderer;
use finsight_trend::{TrendEngine, TrendOutcome};
use tracing::{error, info, warn};

use crate::retriever::Retriever;

/// Note surfaced in the answer when a structured tool was bypassed.
const FALLBACK_NOTE: &str = "Structured financial analysis and chart generation are \
currently unavailable. Searching the narrative report text instead.";

/// The dispatch stage. Owns the engines; the chart renderer is an
/// optional external collaborator.
pub struct Dispatcher {
    retriever: Retriever,
    trend: TrendEngine,
    renderer: Option<Arc<dyn IChartRenderer>>,
    tools: ToolsConfig,
}

impl Dispatcher {
    pub fn new(
        retriever: Retriever,
        trend: TrendEngine,
        renderer: Option<Arc<dyn IChartRenderer>>,
        tools: ToolsConfig,
    ) -> Self {
        Self {
            retriever,
            trend,
            renderer,
            tools,
        }
    }

    /// Execute the engine for the routed intent.
    ///
    /// All engine failures are converted to an error envelope plus the
    /// state's error field; nothing propagates past this boundary.
    pub fn execute(&self, mut state: QueryState) -> QueryState {
        let t0 = Instant::now();
        let (tool, redirected) = self.resolve_tool(state.intent);
        if redirected {
            info!(
                requested = %state.intent,
                "tool unavailable, redirecting to retriever"
            );
            state.degraded = true;
        }

        info!(tool = %tool, "invoking tool");
        let mut output = match self.invoke(tool, &mut state) {
            Ok(output) => output,
            Err(e) => {
                error!(tool = %tool, error = %e, "tool invocation failed");
                let message = e.to_string();
                state.record_error(message.clone());
                ToolOutput::error(message)
            }
        };

        if redirected {
            output = output.with_note(FALLBACK_NOTE);
        }

        state.tools_used.push(tool.as_str().to_string());
        state.record_metric("tool_latency_s", t0.elapsed().as_secs_f64());
        info!(
            tool = %tool,
            status = output.status(),
            evidence = state.evidence.len(),
            "dispatch complete"
        );
        state.tool_output = Some(output);
        state
    }

    /// Map the routed intent onto an available tool.
    fn resolve_tool(&self, intent: Intent) -> (Intent, bool) {
        match intent {
            Intent::Financial if !self.tools.financial_enabled => (Intent::Retriever, true),
            Intent::Plot if !self.tools.plot_enabled || self.renderer.is_none() => {
                (Intent::Retriever, true)
            }
            Intent::Unknown => {
                warn!("dispatch reached with unclassified intent, using retriever");
                (Intent::Retriever, false)
            }
            other => (other, false),
        }
    }

    fn invoke(&self, tool: Intent, state: &mut QueryState) -> FinsightResult<ToolOutput> {
        match tool {
            Intent::Financial => self.run_trend(&state.query),
            Intent::Plot => self.run_plot(state),
            Intent::Retriever | Intent::Unknown => self.run_retriever(state),
        }
    }

    fn run_retriever(&self, state: &mut QueryState) -> FinsightResult<ToolOutput> {
        let passages = self.retriever.search(&state.query)?;
        if passages.is_empty() {
            warn!("no passages found for query");
            return Ok(ToolOutput::empty("No relevant documents found."));
        }

        state.evidence = passages.clone();
        Ok(ToolOutput::ok(ToolPayload::Retrieval {
            chunk_count: passages.len(),
            chunks: passages,
        }))
    }

    fn run_trend(&self, query: &str) -> FinsightResult<ToolOutput> {
        Ok(match self.trend.analyze(query)? {
            TrendOutcome::Ok(result) => ToolOutput::ok(ToolPayload::Trend(result)),
            TrendOutcome::NoData {
                message,
                available_columns,
            } => ToolOutput::NoData {
                message,
                available_columns,
            },
            TrendOutcome::NoNumericData {
                message,
                matching_columns,
            } => ToolOutput::NoNumericData {
                message,
                matching_columns,
            },
        })
    }

    fn run_plot(&self, state: &mut QueryState) -> FinsightResult<ToolOutput> {
        let Some(renderer) = &self.renderer else {
            // resolve_tool redirects before this point; kept as a guard
            // for direct callers.
            return Ok(ToolOutput::error("chart renderer not configured"));
        };

        Ok(match self.trend.analyze(&state.query)? {
            TrendOutcome::Ok(result) => {
                let path = renderer.render(&result.metric, &result.values_by_year)?;
                info!(path = %path.display(), "chart rendered");
                state.image_path = Some(path.clone());
                ToolOutput::ok(ToolPayload::Chart {
                    metric: result.metric,
                    years_plotted: result.values_by_year.keys().copied().collect(),
                    image_path: Some(path.to_string_lossy().into_owned()),
                })
            }
            TrendOutcome::NoData {
                message,
                available_columns,
            } => ToolOutput::NoData {
                message,
                available_columns,
            },
            TrendOutcome::NoNumericData {
                message,
                matching_columns,
            } => ToolOutput::NoNumericData {
                message,
                matching_columns,
            },
        })
    }
}
