//! TrendEngine: extract loading → column detection → per-year
//! aggregation → YoY growth.

use std::collections::BTreeMap;
use std::path::PathBuf;

use finsight_core::config::defaults::COLUMN_SAMPLE_LIMIT;
use finsight_core::config::TrendConfig;
use finsight_core::errors::FinsightResult;
use finsight_core::models::TrendResult;
use tracing::{debug, info};

use crate::columns::{self, Metric};
use crate::numeric;
use crate::tables::{self, Table};

/// Outcome of one trend analysis. "No data" conditions are statuses,
/// not errors — only extract-loading failures escape as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendOutcome {
    Ok(TrendResult),
    /// No column matched the requested metric vocabulary.
    NoData {
        message: String,
        /// Sample of the headers that do exist, for diagnosis.
        available_columns: Vec<String>,
    },
    /// Columns matched but no cell parsed to a usable number.
    NoNumericData {
        message: String,
        matching_columns: Vec<String>,
    },
}

/// Structured trend analysis over a directory of CSV extracts.
pub struct TrendEngine {
    structured_dir: PathBuf,
    config: TrendConfig,
}

impl TrendEngine {
    pub fn new(structured_dir: PathBuf, config: TrendConfig) -> Self {
        Self {
            structured_dir,
            config,
        }
    }

    /// Analyze the metric the query asks about across all extracts.
    pub fn analyze(&self, query: &str) -> FinsightResult<TrendOutcome> {
        let tables = tables::load_tables(&self.structured_dir)?;

        let metric = columns::metric_for_query(query, &self.config);
        let keywords = match metric {
            Metric::Revenue => &self.config.revenue_columns,
            Metric::Income => &self.config.income_columns,
        };

        let columns_used = self.matched_headers(&tables, keywords);
        info!(metric = metric.label(), columns = ?columns_used, "metric columns detected");

        if columns_used.is_empty() {
            return Ok(TrendOutcome::NoData {
                message: format!(
                    "No columns matching '{}' found in the extracts.",
                    metric.label()
                ),
                available_columns: self.header_sample(&tables),
            });
        }

        let values_by_year = self.collect_values(&tables, keywords);
        if values_by_year.is_empty() {
            return Ok(TrendOutcome::NoNumericData {
                message: "Could not parse numeric values from the matching columns.".into(),
                matching_columns: columns_used,
            });
        }

        info!(
            metric = metric.label(),
            years = values_by_year.len(),
            "trend analysis complete"
        );
        Ok(TrendOutcome::Ok(TrendResult::from_values(
            metric.label(),
            values_by_year,
            columns_used,
        )))
    }

    /// Union of matching headers across tables, order-preserving.
    fn matched_headers(&self, tables: &[Table], keywords: &[String]) -> Vec<String> {
        let mut seen = Vec::new();
        for table in tables {
            for header in columns::matching_columns(&table.headers, keywords) {
                if !seen.contains(header) {
                    seen.push(header.clone());
                }
            }
        }
        seen
    }

    /// Bounded sample of all headers, for the no-data diagnosis.
    fn header_sample(&self, tables: &[Table]) -> Vec<String> {
        let mut sample = Vec::new();
        for table in tables {
            for header in &table.headers {
                if !sample.contains(header) {
                    sample.push(header.clone());
                    if sample.len() >= COLUMN_SAMPLE_LIMIT {
                        return sample;
                    }
                }
            }
        }
        sample
    }

    /// One value per fiscal year: positive maxima over matching cells.
    ///
    /// Non-positive numbers are treated as placeholders, not metrics.
    /// Duplicate rows within a year (subtotals restated per segment)
    /// keep the maximum. Rows from files without a fiscal-year marker
    /// are skipped.
    fn collect_values(&self, tables: &[Table], keywords: &[String]) -> BTreeMap<u16, f64> {
        let mut values_by_year: BTreeMap<u16, f64> = BTreeMap::new();

        for table in tables {
            let Some(year) = numeric::year_from_filename(&table.source_file) else {
                debug!(file = %table.source_file, "no fiscal-year marker, skipping");
                continue;
            };

            let column_indices: Vec<usize> = table
                .headers
                .iter()
                .enumerate()
                .filter(|(_, header)| {
                    let lower = header.to_lowercase();
                    keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
                })
                .map(|(i, _)| i)
                .collect();

            for row in &table.rows {
                for &index in &column_indices {
                    let Some(cell) = row.get(index) else { continue };
                    let Some(value) = numeric::parse_numeric(cell) else {
                        continue;
                    };
                    if value <= 0.0 {
                        continue;
                    }
                    let value = round2(value);
                    values_by_year
                        .entry(year)
                        .and_modify(|current| *current = current.max(value))
                        .or_insert(value);
                }
            }
        }

        values_by_year
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
