//! Batch evaluation: run validation queries through the live agent
//! service, score each result, and persist records.

use std::time::Instant;

use finsight_agent::AgentService;
use tracing::{info, warn};

use crate::engine::Evaluator;
use crate::log::{EvalLog, EvalRecord};
use crate::validation::ValidationSample;

/// Aggregate means over one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct EvalSummary {
    pub samples: usize,
    pub avg_faithfulness: f64,
    pub avg_relevancy: f64,
    pub avg_recall: f64,
    pub avg_mean: f64,
}

/// Drives the agent + evaluator over a sample set.
pub struct EvalRunner<'a> {
    service: &'a AgentService,
    evaluator: &'a Evaluator,
    log: &'a EvalLog,
}

impl<'a> EvalRunner<'a> {
    pub fn new(service: &'a AgentService, evaluator: &'a Evaluator, log: &'a EvalLog) -> Self {
        Self {
            service,
            evaluator,
            log,
        }
    }

    /// Run and score each sample, appending records to the log.
    ///
    /// A sample that produces no answer is recorded with zero scores
    /// and an error note; it never aborts the run.
    pub fn run(&self, samples: &[ValidationSample]) -> Vec<EvalRecord> {
        let mut records = Vec::with_capacity(samples.len());

        for (i, sample) in samples.iter().enumerate() {
            info!(sample = i + 1, total = samples.len(), query = sample.query, "evaluating");
            let t0 = Instant::now();
            let response = self.service.run(sample.query);

            let record = if response.answer.is_empty() {
                warn!(query = sample.query, "no answer returned, recording zero scores");
                EvalRecord {
                    query: sample.query.to_string(),
                    answer_preview: String::new(),
                    faithfulness: 0.0,
                    answer_relevancy: 0.0,
                    context_recall: 0.0,
                    mean_score: 0.0,
                    num_chunks: 0,
                    latency_s: 0.0,
                    error: Some("no answer from agent".into()),
                }
            } else {
                let contexts: Vec<String> = response
                    .evidence
                    .iter()
                    .map(|p| p.text.clone())
                    .filter(|t| !t.is_empty())
                    .collect();
                let result = self.evaluator.evaluate(
                    sample.query,
                    &response.answer,
                    &contexts,
                    &response.evidence,
                );
                EvalRecord::new(
                    sample.query,
                    &response.answer,
                    &result,
                    t0.elapsed().as_secs_f64(),
                )
            };

            if let Err(e) = self.log.append(&record) {
                warn!(error = %e, "could not persist eval record");
            }
            records.push(record);
        }

        records
    }
}

/// Unweighted averages across a run's records.
pub fn summarize(records: &[EvalRecord]) -> EvalSummary {
    if records.is_empty() {
        return EvalSummary::default();
    }
    let n = records.len() as f64;
    let round3 = |x: f64| (x * 1000.0).round() / 1000.0;
    EvalSummary {
        samples: records.len(),
        avg_faithfulness: round3(records.iter().map(|r| r.faithfulness).sum::<f64>() / n),
        avg_relevancy: round3(records.iter().map(|r| r.answer_relevancy).sum::<f64>() / n),
        avg_recall: round3(records.iter().map(|r| r.context_recall).sum::<f64>() / n),
        avg_mean: round3(records.iter().map(|r| r.mean_score).sum::<f64>() / n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(faithfulness: f64, relevancy: f64, recall: f64) -> EvalRecord {
        EvalRecord {
            query: "q".into(),
            answer_preview: "a".into(),
            faithfulness,
            answer_relevancy: relevancy,
            context_recall: recall,
            mean_score: (faithfulness + relevancy + recall) / 3.0,
            num_chunks: 1,
            latency_s: 0.1,
            error: None,
        }
    }

    #[test]
    fn summary_averages_each_metric() {
        let records = vec![record(1.0, 0.8, 0.6), record(0.6, 0.4, 0.2)];
        let summary = summarize(&records);
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.avg_faithfulness, 0.8);
        assert_eq!(summary.avg_relevancy, 0.6);
        assert_eq!(summary.avg_recall, 0.4);
    }

    #[test]
    fn empty_run_summarizes_to_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.avg_mean, 0.0);
    }
}
