//! Numeric cell parsing and fiscal-year attribution.

use std::sync::LazyLock;

use regex::Regex;

/// Fiscal-year marker in extract filenames, e.g. `ACME_FY23Q4_10K.csv`
/// or `acme_fy2024_annual.csv`.
static FISCAL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FY(\d{4}|\d{2})").unwrap());

/// Extract the fiscal year from a filename. Two-digit years are
/// interpreted as 20xx.
pub fn year_from_filename(filename: &str) -> Option<u16> {
    let captures = FISCAL_YEAR_RE.captures(filename)?;
    let digits = &captures[1];
    let value: u16 = digits.parse().ok()?;
    if digits.len() == 2 {
        Some(2000 + value)
    } else {
        Some(value)
    }
}

/// Parse a possibly formatted number string like `211,915` or `$123.4M`.
///
/// Strips everything except digits, `.` and `-` before parsing.
/// Returns `None` for empty or unparseable cells.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
