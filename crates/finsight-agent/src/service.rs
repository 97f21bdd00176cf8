//! Entry-point facade between transports (CLI/HTTP) and the engine.

use std::time::Instant;

use finsight_core::models::AgentResponse;
use tracing::{info, warn};

use crate::engine::AgentEngine;
use crate::metrics_log::MetricsLog;

/// Runs the engine, tracks service-level latency, and persists metrics.
pub struct AgentService {
    engine: AgentEngine,
    metrics: MetricsLog,
}

impl AgentService {
    pub fn new(engine: AgentEngine, metrics: MetricsLog) -> Self {
        info!("agent service initialized");
        Self { engine, metrics }
    }

    /// Execute the pipeline for a user query.
    ///
    /// Metrics persistence failures are logged and swallowed — losing a
    /// metrics record must never lose an answer.
    pub fn run(&self, query: &str) -> AgentResponse {
        let t0 = Instant::now();
        let mut response = self.engine.run(query);

        let elapsed = (t0.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
        response
            .metrics
            .entry("total_service_latency_s".to_string())
            .or_insert(elapsed);

        if let Err(e) = self.metrics.append(query, &response) {
            warn!(error = %e, "could not persist metrics record");
        }

        info!(
            total_s = elapsed,
            tools = ?response.tools_used,
            answer_len = response.answer.len(),
            "service run complete"
        );
        response
    }
}
