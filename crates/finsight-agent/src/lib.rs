//! # finsight-agent
//!
//! The online query pipeline. One query flows router → dispatcher →
//! synthesizer, strictly in order, through an owned `QueryState`;
//! every stage catches its own failures so the pipeline always ends
//! with a human-readable answer.

mod dispatcher;
mod engine;
mod metrics_log;
mod retriever;
mod router;
mod service;
mod synthesizer;

pub use dispatcher::Dispatcher;
pub use engine::AgentEngine;
pub use metrics_log::MetricsLog;
pub use retriever::Retriever;
pub use router::Router;
pub use service::AgentService;
pub use synthesizer::Synthesizer;
