//! Metric column detection.

use finsight_core::config::TrendConfig;

/// Which metric vocabulary a query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Revenue,
    Income,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Income => "Operating Income",
        }
    }
}

/// Pick the metric by inspecting the query text itself.
///
/// This is independent of how the router classified the query: the
/// engine re-reads the raw text so it behaves identically when invoked
/// directly.
pub fn metric_for_query(query: &str, config: &TrendConfig) -> Metric {
    let lower = query.to_lowercase();
    if config
        .income_query_terms
        .iter()
        .any(|term| lower.contains(term.as_str()))
    {
        Metric::Income
    } else {
        Metric::Revenue
    }
}

/// Column headers matching any vocabulary keyword, case-insensitive
/// substring match, preserving header order.
pub fn matching_columns<'a>(headers: &'a [String], keywords: &[String]) -> Vec<&'a String> {
    headers
        .iter()
        .filter(|header| {
            let lower = header.to_lowercase();
            keywords.iter().any(|kw| lower.contains(&kw.to_lowercase()))
        })
        .collect()
}
