//! Year-over-year trend computation results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregated metric values per fiscal year with YoY growth.
///
/// `BTreeMap` keys keep years ascending by construction, which the
/// growth computation relies on: the earliest year has no prior
/// baseline and therefore `None` growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Human-readable metric label, e.g. "Revenue".
    pub metric: String,
    pub values_by_year: BTreeMap<u16, f64>,
    pub yoy_growth_pct: BTreeMap<u16, Option<f64>>,
    /// Column headers that contributed values.
    pub columns_used: Vec<String>,
}

impl TrendResult {
    /// Build a result from aggregated per-year values, computing growth.
    pub fn from_values(
        metric: impl Into<String>,
        values_by_year: BTreeMap<u16, f64>,
        columns_used: Vec<String>,
    ) -> Self {
        let yoy_growth_pct = compute_yoy(&values_by_year);
        Self {
            metric: metric.into(),
            values_by_year,
            yoy_growth_pct,
            columns_used,
        }
    }
}

/// Year-over-year percentage growth for consecutive fiscal years.
///
/// Growth = (curr - prev) / |prev| * 100, rounded to 2 decimals.
/// The earliest year and any year whose predecessor value is zero or
/// missing get `None`.
pub fn compute_yoy(values_by_year: &BTreeMap<u16, f64>) -> BTreeMap<u16, Option<f64>> {
    let mut growth = BTreeMap::new();
    let mut prev: Option<f64> = None;

    for (&year, &value) in values_by_year {
        let pct = match prev {
            Some(prev_value) if prev_value != 0.0 => {
                Some(round2((value - prev_value) / prev_value.abs() * 100.0))
            }
            _ => None,
        };
        growth.insert(year, pct);
        prev = Some(value);
    }

    growth
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
